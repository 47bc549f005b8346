use crate::error::{Result, StoryboardError};
use crate::tools::{Frame, TextRenderer, human_duration_with};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 時間戳與縮圖下緣的距離
pub const TIMESTAMP_MARGIN: i32 = 5;

const TEXT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// 時間戳在縮圖下緣的水平位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampAlign {
    Left,
    Center,
    #[default]
    Right,
}

impl TimestampAlign {
    fn x_position(self, image_width: u32, text_width: u32) -> i32 {
        match self {
            Self::Left => TIMESTAMP_MARGIN,
            Self::Center => (image_width as i32 - text_width as i32) / 2,
            Self::Right => image_width as i32 - TIMESTAMP_MARGIN - text_width as i32,
        }
    }
}

impl FromStr for TimestampAlign {
    type Err = StoryboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(StoryboardError::validation(format!(
                "無法辨識的時間戳對齊方式 '{other}'（可用: left, center, right）"
            ))),
        }
    }
}

impl fmt::Display for TimestampAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Center => write!(f, "center"),
            Self::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThumbnailOptions {
    pub width: u32,
    /// 未指定時沿用影格本身的寬高比
    pub aspect_ratio: Option<f64>,
    /// `None` 表示不繪製時間戳
    pub timestamp: Option<TimestampAlign>,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: 480,
            aspect_ratio: None,
            timestamp: Some(TimestampAlign::Right),
        }
    }
}

/// 將影格縮放為縮圖，必要時在下緣繪製時間戳
///
/// 高度為 `round(width / aspect_ratio)`。原始影格不會被修改。
pub fn create_thumbnail(
    frame: &Frame,
    options: &ThumbnailOptions,
    renderer: &dyn TextRenderer,
) -> Result<RgbaImage> {
    if options.width == 0 {
        return Err(StoryboardError::validation("縮圖寬度必須為正整數"));
    }

    let aspect_ratio = options
        .aspect_ratio
        .unwrap_or_else(|| f64::from(frame.image.width()) / f64::from(frame.image.height()));
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(StoryboardError::validation(format!(
            "寬高比無效: {aspect_ratio}"
        )));
    }

    let height = (f64::from(options.width) / aspect_ratio).round() as u32;
    if height == 0 {
        return Err(StoryboardError::validation(format!(
            "縮圖高度為零（寬度 {}，寬高比 {aspect_ratio}）",
            options.width
        )));
    }

    let mut thumbnail = frame
        .image
        .resize_exact(options.width, height, FilterType::Lanczos3)
        .into_rgba8();

    if let Some(align) = options.timestamp {
        draw_timestamp(&mut thumbnail, frame.timestamp, align, renderer);
    }

    Ok(thumbnail)
}

/// 白字黑框：先在八個方向各偏移 1px 畫黑字，再於原位畫白字
fn draw_timestamp(
    thumbnail: &mut RgbaImage,
    timestamp: f64,
    align: TimestampAlign,
    renderer: &dyn TextRenderer,
) {
    let text = human_duration_with(timestamp, 0, false);
    let (text_width, text_height) = renderer.text_size(&text);
    let (width, height) = thumbnail.dimensions();

    let x = align.x_position(width, text_width);
    let y = height as i32 - TIMESTAMP_MARGIN - text_height as i32;

    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx != 0 || dy != 0 {
                renderer.draw_text(thumbnail, x + dx, y + dy, &text, TEXT_BLACK);
            }
        }
    }
    renderer.draw_text(thumbnail, x, y, &text, TEXT_WHITE);
}
