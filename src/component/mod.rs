pub mod storyboard_generator;
pub mod video_metadata;

pub use storyboard_generator::{StoryBoard, StoryboardOptions};
pub use video_metadata::{MetadataOptions, VideoMetadata};
