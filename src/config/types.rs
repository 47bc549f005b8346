use crate::component::storyboard_generator::TimestampAlign;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl FileTypeTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// `generate` 子命令的預設值，命令列參數優先
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryboardSettings {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub include_banner: bool,
    pub include_sha1sum: bool,
    pub draw_timestamp: bool,
    pub timestamp_align: TimestampAlign,
    pub jobs: Option<usize>,
}

impl Default for StoryboardSettings {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
            tile_width: 480,
            include_banner: true,
            include_sha1sum: true,
            draw_timestamp: true,
            timestamp_align: TimestampAlign::Right,
            jobs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub ffmpeg_bin: Option<String>,
    pub ffprobe_bin: Option<String>,
    pub font_file: Option<PathBuf>,
    pub font_size: f32,
    pub storyboard: StoryboardSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            ffmpeg_bin: None,
            ffprobe_bin: None,
            font_file: None,
            font_size: crate::tools::DEFAULT_FONT_SIZE,
            storyboard: StoryboardSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub settings: UserSettings,
}
