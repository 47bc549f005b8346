use crate::config::types::{Config, FileTypeTable, UserSettings};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的檔案類型設定（不需要外部檔案）
const FILE_TYPE_TABLE_JSON: &str = include_str!("../data/file_type_table.json");

/// 使用者設定檔，位於目前工作目錄
pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        Self::with_settings_file(Path::new(SETTINGS_FILE))
    }

    /// 從指定路徑載入設定，檔案不存在時使用預設值
    pub fn with_settings_file(path: &Path) -> Result<Self> {
        let file_type_table = Self::load_embedded_file_type_table()?;
        let settings = Self::load_settings(path)?;

        Ok(Self {
            file_type_table,
            settings,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            debug!("找不到 {}，使用預設設定", path.display());
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取設定檔 {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("無法解析設定檔 {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入檔案類型表
    fn load_embedded_file_type_table() -> Result<FileTypeTable> {
        serde_json::from_str(FILE_TYPE_TABLE_JSON).context("無法解析嵌入的檔案類型設定")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::storyboard_generator::TimestampAlign;
    use crate::config::Language;

    #[test]
    fn test_embedded_file_type_table() {
        let table = Config::load_embedded_file_type_table().unwrap();
        assert!(table.is_video_file(Path::new("/a/b.mp4")));
        assert!(table.is_video_file(Path::new("/a/b.MKV")));
        assert!(!table.is_video_file(Path::new("/a/b.txt")));
        assert!(!table.is_video_file(Path::new("/a/mp4")));
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_settings_file(&dir.path().join("settings.json")).unwrap();
        assert_eq!(config.settings, UserSettings::default());
        assert_eq!(config.settings.storyboard.columns, 4);
        assert!((config.settings.font_size - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "language": "zh-TW",
                "ffprobe_bin": "/opt/ffmpeg/bin/ffprobe",
                "storyboard": { "columns": 3, "timestamp_align": "center", "jobs": 2 }
            }"#,
        )
        .unwrap();

        let settings = Config::with_settings_file(&path).unwrap().settings;
        assert_eq!(settings.language, Language::ZhTw);
        assert_eq!(settings.ffprobe_bin.as_deref(), Some("/opt/ffmpeg/bin/ffprobe"));
        assert_eq!(settings.ffmpeg_bin, None);
        assert_eq!(settings.storyboard.columns, 3);
        assert_eq!(settings.storyboard.rows, 4);
        assert_eq!(settings.storyboard.timestamp_align, TimestampAlign::Center);
        assert_eq!(settings.storyboard.jobs, Some(2));
        assert!(settings.storyboard.include_banner);
    }

    #[test]
    fn test_malformed_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::with_settings_file(&path).is_err());
    }
}
