mod container_format;
mod report;
mod stream_record;
mod video;

pub use container_format::describe_container;
pub use stream_record::{
    AudioDetails, StreamKind, StreamRecord, SubtitleDetails, VideoDetails, build_stream,
};
pub use video::{MetadataOptions, SCAN_TYPE_PREFIX_BYTES, ScanType, VideoMetadata};
