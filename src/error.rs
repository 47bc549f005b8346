use std::path::PathBuf;

use thiserror::Error;

/// 函式庫層統一錯誤型別
///
/// 每支影片的處理流程遇到任何一種錯誤都會中止該影片，
/// 但不影響批次中的其他影片。
#[derive(Debug, Error)]
pub enum StoryboardError {
    /// 輸入路徑不存在
    #[error("找不到檔案: {}", .0.display())]
    NotFound(PathBuf),

    /// ffprobe 執行失敗或輸出無法解析，訊息保留工具的原始診斷文字
    #[error("ffprobe 分析失敗 '{}': {message}", path.display())]
    ProbeFailed { path: PathBuf, message: String },

    /// 呼叫端或設定錯誤（拼貼前置條件、對齊選項、取樣數量等）
    #[error("參數驗證失敗: {0}")]
    Validation(String),

    /// 指定時間點的影格擷取失敗
    #[error("影格擷取失敗 '{}' @ {timestamp:.3}s: {message}", path.display())]
    ExtractionFailed {
        path: PathBuf,
        timestamp: f64,
        message: String,
    },

    /// 收到中斷信號
    #[error("操作已取消")]
    Cancelled,

    /// 字型無法載入
    #[error("字型載入失敗: {0}")]
    Font(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoryboardError>;

impl StoryboardError {
    pub(crate) fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
