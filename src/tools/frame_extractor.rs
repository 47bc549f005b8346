use crate::error::{Result, StoryboardError};
use image::DynamicImage;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 指定時間點擷取出的單一影格
///
/// 影格本身不會被修改，縮圖一律產生新的影像。
#[derive(Debug, Clone)]
pub struct Frame {
    pub timestamp: f64,
    pub image: DynamicImage,
}

/// 影格擷取工具介面
pub trait FrameExtractor: Send + Sync {
    fn extract_frame(&self, path: &Path, timestamp: f64) -> Result<Frame>;
}

/// 以 ffmpeg 執行檔實作的 [`FrameExtractor`]，影格以 PNG 經 stdout 傳回
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    bin: PathBuf,
    codec: String,
}

impl FfmpegFrameExtractor {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            codec: "png".to_string(),
        }
    }
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract_frame(&self, path: &Path, timestamp: f64) -> Result<Frame> {
        let failure = |message: String| StoryboardError::ExtractionFailed {
            path: path.to_path_buf(),
            timestamp,
            message,
        };

        if !path.exists() {
            return Err(StoryboardError::NotFound(path.to_path_buf()));
        }

        debug!("擷取影格: {} @ {timestamp:.3}s", path.display());

        let output = Command::new(&self.bin)
            .args(["-hide_banner", "-loglevel", "error", "-ss"])
            .arg(timestamp.to_string())
            .arg("-i")
            .arg(path)
            .args(["-f", "image2", "-vcodec", &self.codec, "-vframes", "1", "-"])
            .output()
            .map_err(|e| failure(format!("無法執行 {}: {e}", self.bin.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(stderr.trim().to_string()));
        }

        if output.stdout.is_empty() {
            return Err(failure("ffmpeg 沒有輸出影格（時間點可能超出範圍）".to_string()));
        }

        let image = image::load_from_memory(&output.stdout)
            .map_err(|e| failure(format!("無法解碼 ffmpeg 輸出的影格: {e}")))?;

        Ok(Frame { timestamp, image })
    }
}
