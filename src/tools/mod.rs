mod bin_locator;
mod ffprobe_info;
mod file_hasher;
mod frame_extractor;
mod human_format;
mod path_validator;
mod ratio_math;
mod text_renderer;
mod video_scanner;

pub use bin_locator::{check_bins, guess_bins};
pub use ffprobe_info::{
    FfprobeProber, ProbeOutput, Prober, RawFormat, RawNumber, RawStream, parse_probe_output,
};
pub use file_hasher::calculate_sha1;
pub use frame_extractor::{FfmpegFrameExtractor, Frame, FrameExtractor};
pub use human_format::{
    human_bit_rate, human_duration, human_duration_with, human_frame_rate, human_size,
};
pub use path_validator::{ensure_directory_exists, resolve_existing_file};
pub use ratio_math::{evaluate_ratio, reduce_fraction, round_up};
pub use text_renderer::{
    DEFAULT_FONT_SIZE, FontRenderer, TextRenderer, draw_text_block,
};
pub use video_scanner::expand_video_inputs;
