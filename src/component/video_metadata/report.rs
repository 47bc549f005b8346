use super::video::VideoMetadata;
use crate::error::Result;
use serde_json::{Value, json};
use std::fmt::Write;

const LABEL_WIDTH: usize = 24;

impl VideoMetadata {
    /// 多行文字報告，用於終端機輸出與分鏡圖的資訊區
    ///
    /// `include_sha1` 為 `true` 時會觸發 SHA-1 計算。
    pub fn format_report(&self, include_sha1: bool) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut field = |label: &str, value: &str| {
            lines.push(format!("{label:<LABEL_WIDTH$}{value}"));
        };

        if let Some(title) = self.title() {
            field("Title:", title);
        }
        field("Filename:", self.filename());
        field(
            "File size:",
            &format!("{} ({})", self.size(), self.size_human()),
        );
        if include_sha1 {
            field("SHA-1 digest:", self.sha1()?);
        }
        field("Container format:", self.format());
        field("Duration:", self.duration_human());
        if let Some(dimension) = self.dimension_text() {
            field("Pixel dimensions:", dimension);
        }
        if let Some(dar) = self.dar_text() {
            field("Display aspect ratio:", dar);
        }
        field("Scan type:", &self.scan_type().to_string());
        if let Some(frame_rate) = self.frame_rate_text() {
            field("Frame rate:", frame_rate);
        }
        field("Streams:", "");

        let mut report = String::new();
        for line in &lines {
            let _ = writeln!(report, "{}", line.trim_end());
        }
        for stream in self.streams() {
            let _ = writeln!(report, "    #{}: {}", stream.index(), stream.display_line());
        }

        Ok(report.trim_end().to_string())
    }

    /// JSON 格式的中繼資料
    pub fn to_json(&self, include_sha1: bool) -> Result<Value> {
        let sha1 = if include_sha1 {
            Some(self.sha1()?.to_string())
        } else {
            None
        };

        Ok(json!({
            "path": self.path().to_string_lossy(),
            "filename": self.filename(),
            "title": self.title(),
            "format": self.format(),
            "size": self.size(),
            "size_human": self.size_human(),
            "sha1": sha1,
            "duration": self.duration(),
            "duration_human": self.duration_human(),
            "scan_type": self.scan_type(),
            "dimension": self.dimension(),
            "dimension_text": self.dimension_text(),
            "dar": self.dar(),
            "dar_text": self.dar_text(),
            "frame_rate": self.frame_rate(),
            "frame_rate_text": self.frame_rate_text(),
            "streams": self.streams(),
        }))
    }
}
