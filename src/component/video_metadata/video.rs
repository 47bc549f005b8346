use super::container_format::describe_container;
use super::stream_record::{StreamRecord, build_stream};
use crate::error::{Result, StoryboardError};
use crate::tools::{
    Prober, RawNumber, calculate_sha1, human_duration, human_size, resolve_existing_file,
};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 交錯掃描判斷只分析檔案開頭的位元組數
pub const SCAN_TYPE_PREFIX_BYTES: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    Progressive,
    Interlaced,
}

impl ScanType {
    /// 逐幀診斷中出現任何交錯影格即視為交錯掃描
    #[must_use]
    pub fn classify(frame_diagnostics: &str) -> Self {
        if frame_diagnostics.contains("interlaced_frame=1") {
            Self::Interlaced
        } else {
            Self::Progressive
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progressive => write!(f, "Progressive scan"),
            Self::Interlaced => write!(f, "Interlaced scan"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    /// 覆寫 ffprobe 回報的長度（秒）
    pub video_duration: Option<f64>,
    /// 計算 SHA-1 時顯示進度
    pub print_progress: bool,
}

/// 影片容器層級的資訊與所有串流
#[derive(Debug)]
pub struct VideoMetadata {
    path: PathBuf,
    filename: String,
    title: Option<String>,
    format: String,
    size: u64,
    duration: f64,
    scan_type: ScanType,
    dimension: Option<(u32, u32)>,
    dimension_text: Option<String>,
    dar: Option<f64>,
    dar_text: Option<String>,
    frame_rate: Option<f64>,
    frame_rate_text: Option<String>,
    streams: Vec<StreamRecord>,
    print_progress: bool,
    size_human: OnceLock<String>,
    duration_human: OnceLock<String>,
    sha1: OnceLock<String>,
}

impl VideoMetadata {
    /// 分析影片並建立完整的中繼資料
    pub fn probe(path: &Path, prober: &dyn Prober, options: &MetadataOptions) -> Result<Self> {
        let path = resolve_existing_file(path)?;
        info!("分析影片: {}", path.display());

        let probe = prober.probe(&path)?;
        let format = probe
            .format
            .as_ref()
            .ok_or_else(|| StoryboardError::probe_failed(&path, "輸出缺少 format 區段"))?;

        let size = format
            .size
            .as_ref()
            .and_then(RawNumber::as_u64)
            .ok_or_else(|| StoryboardError::probe_failed(&path, "無法取得檔案大小"))?;

        let duration = match options.video_duration {
            Some(duration) => duration,
            None => format
                .duration
                .as_ref()
                .and_then(RawNumber::as_f64)
                .ok_or_else(|| StoryboardError::probe_failed(&path, "無法取得影片長度"))?,
        };
        if !duration.is_finite() || duration < 0.0 {
            return Err(StoryboardError::probe_failed(
                &path,
                format!("影片長度無效: {duration}"),
            ));
        }

        let scan_type = detect_scan_type(&path, prober)?;
        debug!("{}: {scan_type}", path.display());

        let mut metadata = Self {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            title: format.tags.get("title").cloned(),
            format: describe_container(format.format_name.as_deref(), &path),
            size,
            duration,
            scan_type,
            dimension: None,
            dimension_text: None,
            dar: None,
            dar_text: None,
            frame_rate: None,
            frame_rate_text: None,
            streams: Vec::with_capacity(probe.streams.len()),
            print_progress: options.print_progress,
            size_human: OnceLock::new(),
            duration_human: OnceLock::new(),
            sha1: OnceLock::new(),
            path,
        };

        let mut seen_indices = HashSet::new();
        for raw in &probe.streams {
            let record = build_stream(raw, &metadata.path)?;
            if !seen_indices.insert(record.index()) {
                return Err(StoryboardError::probe_failed(
                    &metadata.path,
                    format!("串流 index 重複: {}", record.index()),
                ));
            }
            metadata.adopt_video_summary(&record);
            metadata.streams.push(record);
        }

        Ok(metadata)
    }

    /// 容器層級的尺寸、DAR 與幀率取自第一個帶有該值的視訊串流
    fn adopt_video_summary(&mut self, record: &StreamRecord) {
        let Some(video) = record.video_details() else {
            return;
        };
        if self.dimension.is_none() {
            self.dimension = Some((video.width, video.height));
            self.dimension_text = Some(video.dimension_text.clone());
        }
        if self.dar.is_none() && video.dar.is_some() {
            self.dar = video.dar;
            self.dar_text.clone_from(&video.dar_text);
        }
        if self.frame_rate.is_none() && video.frame_rate.is_some() {
            self.frame_rate = video.frame_rate;
            self.frame_rate_text.clone_from(&video.frame_rate_text);
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    pub fn size_human(&self) -> &str {
        self.size_human.get_or_init(|| human_size(self.size))
    }

    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn duration_human(&self) -> &str {
        self.duration_human
            .get_or_init(|| human_duration(self.duration))
    }

    #[must_use]
    pub const fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    #[must_use]
    pub const fn dimension(&self) -> Option<(u32, u32)> {
        self.dimension
    }

    #[must_use]
    pub fn dimension_text(&self) -> Option<&str> {
        self.dimension_text.as_deref()
    }

    #[must_use]
    pub const fn dar(&self) -> Option<f64> {
        self.dar
    }

    #[must_use]
    pub fn dar_text(&self) -> Option<&str> {
        self.dar_text.as_deref()
    }

    #[must_use]
    pub const fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    #[must_use]
    pub fn frame_rate_text(&self) -> Option<&str> {
        self.frame_rate_text.as_deref()
    }

    #[must_use]
    pub fn streams(&self) -> &[StreamRecord] {
        &self.streams
    }

    /// 檔案的 SHA-1 摘要，第一次呼叫時計算並快取
    pub fn sha1(&self) -> Result<&str> {
        if let Some(digest) = self.sha1.get() {
            return Ok(digest);
        }
        debug!("計算 SHA-1: {}", self.path.display());
        let digest = calculate_sha1(&self.path, self.print_progress)?;
        Ok(self.sha1.get_or_init(|| digest))
    }

    /// 已計算過的 SHA-1，不觸發計算
    #[must_use]
    pub fn sha1_if_computed(&self) -> Option<&str> {
        self.sha1.get().map(String::as_str)
    }
}

fn detect_scan_type(path: &Path, prober: &dyn Prober) -> Result<ScanType> {
    let head = {
        let file = File::open(path)?;
        let mut head = Vec::with_capacity(SCAN_TYPE_PREFIX_BYTES);
        file.take(SCAN_TYPE_PREFIX_BYTES as u64)
            .read_to_end(&mut head)?;
        head
    };
    let diagnostics = prober.probe_frames(path, &head)?;
    Ok(ScanType::classify(&diagnostics))
}
