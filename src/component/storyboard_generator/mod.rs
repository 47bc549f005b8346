//! 分鏡圖產生元件
//!
//! 流程：
//! A. 均勻取樣時間點
//! B. 平行擷取影格
//! C. 縮放並繪製時間戳
//! D. 拼貼為網格
//! E. 加上資訊區與版本標記

mod assembler;
mod main;
mod sampler;
mod thumbnail;
mod tile_compositor;

pub use assembler::{
    SheetStyle, assemble_storyboard, banner_text, render_banner, render_text_sheet,
};
pub use main::{JPEG_QUALITY, StoryBoard, StoryboardOptions, save_storyboard_jpeg};
pub use sampler::sample_points;
pub use thumbnail::{TIMESTAMP_MARGIN, ThumbnailOptions, TimestampAlign, create_thumbnail};
pub use tile_compositor::{TileOptions, WHITE, tile_images, tile_images_owned};
