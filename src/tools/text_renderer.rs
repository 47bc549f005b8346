use crate::error::{Result, StoryboardError};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// 未指定字型時依序嘗試的系統字型
const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/opentype/source-code-pro/SourceCodePro-Regular.otf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// 文字量測與繪製介面
pub trait TextRenderer {
    /// 字型大小（像素），用於計算行高
    fn font_size(&self) -> f32;

    /// 單行文字的寬高
    fn text_size(&self, text: &str) -> (u32, u32);

    /// 在 `(x, y)`（左上角）繪製單行文字，超出畫布的部分會被裁切
    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>);
}

/// 以 TrueType / OpenType 字型檔實作的 [`TextRenderer`]
pub struct FontRenderer {
    font: FontVec,
    size: f32,
}

impl FontRenderer {
    pub fn from_file(path: &Path, size: f32) -> Result<Self> {
        let data = fs::read(path)
            .map_err(|e| StoryboardError::Font(format!("無法讀取 '{}': {e}", path.display())))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| StoryboardError::Font(format!("無法載入 '{}': {e}", path.display())))?;
        debug!("已載入字型: {} ({size}px)", path.display());
        Ok(Self { font, size })
    }

    /// 指定字型檔時直接載入，否則從常見的系統字型中挑選第一個可用的
    pub fn discover(font_file: Option<&Path>, size: f32) -> Result<Self> {
        if let Some(path) = font_file {
            return Self::from_file(path, size);
        }

        DEFAULT_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .filter(|path| path.is_file())
            .find_map(|path| Self::from_file(&path, size).ok())
            .ok_or_else(|| {
                StoryboardError::Font("找不到可用的預設字型，請以 --font 指定字型檔".to_string())
            })
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.size)
    }
}

impl TextRenderer for FontRenderer {
    fn font_size(&self) -> f32 {
        self.size
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale(), &self.font, text)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale(), &self.font, text);
    }
}

/// 繪製多行文字區塊，回傳區塊的 `(寬, 高)`
///
/// `canvas` 為 `None` 時只量測不繪製，用於先決定畫布尺寸。
/// 行高為 `round(font_size * spacing)`。
pub fn draw_text_block(
    mut canvas: Option<&mut RgbaImage>,
    origin: (i32, i32),
    text: &str,
    renderer: &dyn TextRenderer,
    color: Rgba<u8>,
    spacing: f32,
) -> (u32, u32) {
    let line_height = (renderer.font_size() * spacing).round() as u32;
    let (x, mut y) = origin;
    let mut width = 0;
    let mut height = 0;

    for line in text.lines() {
        let (line_width, _) = renderer.text_size(line);
        if let Some(canvas) = canvas.as_deref_mut() {
            renderer.draw_text(canvas, x, y, line, color);
        }
        width = width.max(line_width);
        height += line_height;
        y += line_height as i32;
    }

    (width, height)
}
