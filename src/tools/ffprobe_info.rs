use crate::error::{Result, StoryboardError};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// ffprobe 以 JSON 輸出的容器與串流資訊
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeOutput {
    pub format: Option<RawFormat>,
    #[serde(default)]
    pub streams: Vec<RawStream>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    pub format_name: Option<String>,
    pub size: Option<RawNumber>,
    pub duration: Option<RawNumber>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// 單一串流的原始欄位，所有欄位皆可能缺席
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStream {
    pub index: Option<i64>,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub profile: Option<String>,
    pub level: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_aspect_ratio: Option<String>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    pub bit_rate: Option<RawNumber>,
    pub codec_tag_string: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// ffprobe 的數值欄位通常以字串輸出（例如 `"size": "1048576"`）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => u64::try_from(*n).ok(),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// 影片分析工具介面
///
/// - `probe`：取得容器與串流資訊
/// - `probe_frames`：分析一段原始位元組，回傳逐幀的診斷文字
pub trait Prober: Send + Sync {
    fn probe(&self, path: &Path) -> Result<ProbeOutput>;

    /// `path` 僅用於錯誤訊息，實際分析的是 `head`
    fn probe_frames(&self, path: &Path, head: &[u8]) -> Result<String>;
}

/// 以 ffprobe 執行檔實作的 [`Prober`]
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    bin: PathBuf,
}

impl FfprobeProber {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl Prober for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<ProbeOutput> {
        debug!("ffprobe -show_format -show_streams {}", path.display());

        let output = Command::new(&self.bin)
            .args([
                "-loglevel",
                "fatal",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .map_err(|e| {
                StoryboardError::probe_failed(
                    path,
                    format!("無法執行 {}: {e}", self.bin.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoryboardError::probe_failed(path, stderr.trim()));
        }

        parse_probe_output(&output.stdout).map_err(|e| StoryboardError::probe_failed(path, e))
    }

    fn probe_frames(&self, path: &Path, head: &[u8]) -> Result<String> {
        debug!(
            "ffprobe -show_frames 分析前 {} 位元組: {}",
            head.len(),
            path.display()
        );

        let mut child = Command::new(&self.bin)
            .args(["-select_streams", "v", "-show_frames", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                StoryboardError::probe_failed(
                    path,
                    format!("無法執行 {}: {e}", self.bin.display()),
                )
            })?;

        // 另開執行緒寫入 stdin，避免與 stdout 互相阻塞
        let writer = child.stdin.take().map(|mut stdin| {
            let head = head.to_vec();
            thread::spawn(move || {
                // 輸入被截斷時 ffprobe 可能提早結束，忽略 broken pipe
                let _ = stdin.write_all(&head);
            })
        });

        let output = child.wait_with_output()?;
        if let Some(handle) = writer {
            let _ = handle.join();
        }

        // 截斷的輸入常導致非零結束碼，只看是否有正面證據
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// 解析 ffprobe 的 JSON 輸出
pub fn parse_probe_output(stdout: &[u8]) -> std::result::Result<ProbeOutput, String> {
    serde_json::from_slice(stdout).map_err(|e| format!("無法解析 ffprobe 輸出: {e}"))
}
