use crate::tools::{TextRenderer, draw_text_block};
use image::imageops;
use image::{Rgba, RgbaImage};

/// 文字區塊的繪製樣式
pub struct SheetStyle<'a> {
    pub renderer: &'a dyn TextRenderer,
    pub text_color: Rgba<u8>,
    /// 行距倍數
    pub text_spacing: f32,
    pub background: Rgba<u8>,
}

/// 分鏡圖底部的版本標記
#[must_use]
pub fn banner_text() -> String {
    format!(
        "Generated by video_storyboard version {}.",
        env!("CARGO_PKG_VERSION")
    )
}

/// 將多行文字畫在指定寬度的畫布上，高度由文字行數決定
#[must_use]
pub fn render_text_sheet(text: &str, width: u32, style: &SheetStyle<'_>) -> RgbaImage {
    let (_, height) = draw_text_block(
        None,
        (0, 0),
        text,
        style.renderer,
        style.text_color,
        style.text_spacing,
    );
    let mut sheet = RgbaImage::from_pixel(width, height, style.background);
    draw_text_block(
        Some(&mut sheet),
        (0, 0),
        text,
        style.renderer,
        style.text_color,
        style.text_spacing,
    );
    sheet
}

/// 單行置中的版本標記，文字比畫布寬時靠左對齊
#[must_use]
pub fn render_banner(text: &str, width: u32, style: &SheetStyle<'_>) -> RgbaImage {
    let (text_width, height) = draw_text_block(
        None,
        (0, 0),
        text,
        style.renderer,
        style.text_color,
        style.text_spacing,
    );
    let x = width.saturating_sub(text_width) / 2;
    let mut banner = RgbaImage::from_pixel(width, height, style.background);
    draw_text_block(
        Some(&mut banner),
        (x as i32, 0),
        text,
        style.renderer,
        style.text_color,
        style.text_spacing,
    );
    banner
}

/// 由上而下組合資訊區、縮圖網格與（選用的）版本標記，外圍加上 padding
#[must_use]
pub fn assemble_storyboard(
    metadata_sheet: &RgbaImage,
    grid: &RgbaImage,
    banner: Option<&RgbaImage>,
    padding: (u32, u32),
    background: Rgba<u8>,
) -> RgbaImage {
    let (horizontal, vertical) = padding;
    let sections: Vec<&RgbaImage> = [Some(metadata_sheet), Some(grid), banner]
        .into_iter()
        .flatten()
        .collect();

    let content_width = sections.iter().map(|s| s.width()).max().unwrap_or(0);
    let content_height: u32 = sections.iter().map(|s| s.height()).sum();
    let mut canvas = RgbaImage::from_pixel(
        content_width + 2 * horizontal,
        content_height + 2 * vertical,
        background,
    );

    let mut y = vertical;
    for section in sections {
        imageops::replace(&mut canvas, section, i64::from(horizontal), i64::from(y));
        y += section.height();
    }

    canvas
}
