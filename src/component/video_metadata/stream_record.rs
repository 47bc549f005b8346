//! 串流資訊：依 `codec_type` 分類並產生單行描述

use crate::error::{Result, StoryboardError};
use crate::tools::{
    RawNumber, RawStream, evaluate_ratio, human_bit_rate, human_frame_rate, reduce_fraction,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDetails {
    pub width: u32,
    pub height: u32,
    pub dimension_text: String,
    pub dar: Option<f64>,
    pub dar_text: Option<String>,
    pub frame_rate: Option<f64>,
    pub frame_rate_text: Option<String>,
    pub bit_rate: Option<f64>,
    pub bit_rate_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioDetails {
    pub bit_rate: Option<f64>,
    pub bit_rate_text: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleDetails {
    pub language_code: Option<String>,
}

/// 串流類型，影音與字幕串流附帶各自的細節
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamKind {
    Video(VideoDetails),
    Audio(AudioDetails),
    Subtitle(SubtitleDetails),
    Data,
    Other { codec_type: String },
    Unknown,
}

/// 單一串流的記錄
///
/// `display_line` 只由其他欄位推導，建立後不再變動。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamRecord {
    index: u32,
    codec: Option<String>,
    #[serde(flatten)]
    kind: StreamKind,
    display_line: String,
}

impl StreamRecord {
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn kind(&self) -> &StreamKind {
        &self.kind
    }

    #[must_use]
    pub fn codec(&self) -> Option<&str> {
        self.codec.as_deref()
    }

    #[must_use]
    pub fn display_line(&self) -> &str {
        &self.display_line
    }

    #[must_use]
    pub fn video_details(&self) -> Option<&VideoDetails> {
        match &self.kind {
            StreamKind::Video(details) => Some(details),
            _ => None,
        }
    }
}

/// 將 ffprobe 的原始串流轉為 [`StreamRecord`]
///
/// `source` 僅用於錯誤訊息。
pub fn build_stream(raw: &RawStream, source: &Path) -> Result<StreamRecord> {
    let index = raw
        .index
        .ok_or_else(|| StoryboardError::probe_failed(source, "串流缺少 index 欄位"))?;
    let index = u32::try_from(index)
        .map_err(|_| StoryboardError::probe_failed(source, format!("串流 index 無效: {index}")))?;

    let (codec, kind) = match raw.codec_type.as_deref() {
        None => (None, StreamKind::Unknown),
        Some("video") => (
            Some(video_codec_label(raw)),
            StreamKind::Video(video_details(raw, index, source)?),
        ),
        Some("audio") => (
            Some(audio_codec_label(raw)),
            StreamKind::Audio(AudioDetails {
                bit_rate: bit_rate(raw),
                bit_rate_text: bit_rate(raw).map(human_bit_rate),
                language_code: language_code(raw),
            }),
        ),
        Some("subtitle") => (
            Some(subtitle_codec_label(raw)),
            StreamKind::Subtitle(SubtitleDetails {
                language_code: language_code(raw),
            }),
        ),
        Some("data") => (None, StreamKind::Data),
        Some(other) => (
            None,
            StreamKind::Other {
                codec_type: other.to_string(),
            },
        ),
    };

    let display_line = render_display_line(codec.as_deref(), &kind);
    Ok(StreamRecord {
        index,
        codec,
        kind,
        display_line,
    })
}

fn video_details(raw: &RawStream, index: u32, source: &Path) -> Result<VideoDetails> {
    let (Some(width), Some(height)) = (raw.width, raw.height) else {
        return Err(StoryboardError::probe_failed(
            source,
            format!("視訊串流 #{index} 缺少寬度或高度"),
        ));
    };

    // 優先採用 ffprobe 的 DAR，無法解析時改以像素尺寸約分
    let (dar, dar_text) = match raw
        .display_aspect_ratio
        .as_deref()
        .and_then(|text| evaluate_ratio(text).map(|value| (value, text)))
    {
        Some((value, text)) => (Some(value), Some(text.to_string())),
        None => match reduce_fraction(u64::from(width), u64::from(height)) {
            Some((w, h)) => (Some(w as f64 / h as f64), Some(format!("{w}:{h}"))),
            None => (None, None),
        },
    };

    // 只有缺少 r_frame_rate 欄位時才改用 avg_frame_rate
    let frame_rate = match (&raw.r_frame_rate, &raw.avg_frame_rate) {
        (Some(rate), _) | (None, Some(rate)) => evaluate_ratio(rate),
        (None, None) => None,
    };

    Ok(VideoDetails {
        width,
        height,
        dimension_text: format!("{width}x{height}"),
        dar,
        dar_text,
        frame_rate,
        frame_rate_text: frame_rate.map(human_frame_rate),
        bit_rate: bit_rate(raw),
        bit_rate_text: bit_rate(raw).map(human_bit_rate),
    })
}

fn video_codec_label(raw: &RawStream) -> String {
    let profile = raw.profile.as_deref();
    match raw.codec_name.as_deref() {
        None => "unknown codec".to_string(),
        Some("h264") => match (profile, raw.level) {
            (Some(profile), Some(level)) => {
                format!("H.264 ({profile} Profile level {:.1})", level as f64 / 10.0)
            }
            _ => "H.264".to_string(),
        },
        Some("mpeg2video") => profile.map_or_else(
            || "MPEG-2 video".to_string(),
            |profile| format!("MPEG-2 video ({profile} Profile)"),
        ),
        Some("mpeg4") => profile.map_or_else(
            || "MPEG-4 Part 2".to_string(),
            |profile| format!("MPEG-4 Part 2 ({profile})"),
        ),
        Some("mjpeg") => "MJPEG".to_string(),
        Some("theora") => "Theora".to_string(),
        Some(other) => other.to_uppercase(),
    }
}

fn audio_codec_label(raw: &RawStream) -> String {
    match raw.codec_name.as_deref() {
        None => "unknown codec".to_string(),
        Some("aac") => match raw.profile.as_deref() {
            Some("LC") => "AAC (Low Complexity)".to_string(),
            Some(profile) => format!("AAC ({profile})"),
            None => "AAC".to_string(),
        },
        Some("ac3") => "Dolby AC-3".to_string(),
        Some("mp3") => "MP3".to_string(),
        Some("vorbis") => "Vorbis".to_string(),
        Some(other) => other.to_uppercase(),
    }
}

fn subtitle_codec_label(raw: &RawStream) -> String {
    match raw.codec_name.as_deref() {
        None if raw.codec_tag_string.as_deref() == Some("c608") => "EIA-608".to_string(),
        None => "unknown codec".to_string(),
        Some("srt" | "subrip") => "SubRip".to_string(),
        Some("ass") => "ASS".to_string(),
        Some("cc_dec") => "closed caption (EIA-608 / CEA-708)".to_string(),
        Some(other) => other.to_uppercase(),
    }
}

fn bit_rate(raw: &RawStream) -> Option<f64> {
    raw.bit_rate.as_ref().and_then(RawNumber::as_f64)
}

fn language_code(raw: &RawStream) -> Option<String> {
    raw.tags
        .get("language")
        .or_else(|| raw.tags.get("LANGUAGE"))
        .filter(|code| !code.is_empty())
        .cloned()
}

fn render_display_line(codec: Option<&str>, kind: &StreamKind) -> String {
    let codec = codec.unwrap_or("unknown codec");
    match kind {
        StreamKind::Video(v) => {
            let mut line = format!(
                "Video, {codec}, {} (DAR {})",
                v.dimension_text,
                v.dar_text.as_deref().unwrap_or("unknown")
            );
            for extra in [&v.frame_rate_text, &v.bit_rate_text].into_iter().flatten() {
                line.push_str(", ");
                line.push_str(extra);
            }
            line
        }
        StreamKind::Audio(a) => {
            let mut line = match &a.language_code {
                Some(lang) => format!("Audio ({lang}), {codec}"),
                None => format!("Audio, {codec}"),
            };
            if let Some(rate) = &a.bit_rate_text {
                line.push_str(", ");
                line.push_str(rate);
            }
            line
        }
        StreamKind::Subtitle(s) => match &s.language_code {
            Some(lang) => format!("Subtitle ({lang}), {codec}"),
            None => format!("Subtitle, {codec}"),
        },
        StreamKind::Data | StreamKind::Other { .. } | StreamKind::Unknown => "Data".to_string(),
    }
}
