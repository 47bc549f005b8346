use crate::error::{Result, StoryboardError};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 拼貼選項
///
/// 指定 `tile_size` 時所有圖片先縮放到該尺寸；
/// 否則同一欄寬度一致、同一列高度一致即可。
#[derive(Debug, Clone, Copy)]
pub struct TileOptions {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: Option<(u32, u32)>,
    /// (水平, 垂直) 間距
    pub spacing: (u32, u32),
    /// (水平, 垂直) 外框
    pub margins: (u32, u32),
    pub background: Rgba<u8>,
}

impl TileOptions {
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            tile_size: None,
            spacing: (0, 0),
            margins: (0, 0),
            background: WHITE,
        }
    }

    #[must_use]
    pub const fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_size = Some((width, height));
        self
    }

    #[must_use]
    pub const fn with_spacing(mut self, horizontal: u32, vertical: u32) -> Self {
        self.spacing = (horizontal, vertical);
        self
    }

    #[must_use]
    pub const fn with_margins(mut self, horizontal: u32, vertical: u32) -> Self {
        self.margins = (horizontal, vertical);
        self
    }

    #[must_use]
    pub const fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }
}

/// 每欄寬度與每列高度
struct Layout {
    column_widths: Vec<u32>,
    row_heights: Vec<u32>,
}

impl Layout {
    fn canvas_size(&self, options: &TileOptions) -> Result<(u32, u32)> {
        let span = |sizes: &[u32], spacing: u32, margin: u32| -> Result<u32> {
            let total = sizes.iter().map(|&s| u64::from(s)).sum::<u64>()
                + (sizes.len() as u64).saturating_sub(1) * u64::from(spacing)
                + 2 * u64::from(margin);
            u32::try_from(total)
                .map_err(|_| StoryboardError::validation(format!("拼貼畫布過大: {total}px")))
        };
        Ok((
            span(&self.column_widths, options.spacing.0, options.margins.0)?,
            span(&self.row_heights, options.spacing.1, options.margins.1)?,
        ))
    }
}

/// 依列優先（row-major）順序將圖片拼貼為網格
///
/// 來源圖片不會被修改；需要提早釋放來源時改用 [`tile_images_owned`]。
pub fn tile_images(images: &[RgbaImage], options: &TileOptions) -> Result<RgbaImage> {
    let layout = plan_layout(images, options)?;
    let (width, height) = layout.canvas_size(options)?;
    let mut canvas = RgbaImage::from_pixel(width, height, options.background);

    let columns = options.columns as usize;
    let mut y = options.margins.1;
    for (row, &row_height) in layout.row_heights.iter().enumerate() {
        let mut x = options.margins.0;
        for (col, &column_width) in layout.column_widths.iter().enumerate() {
            let image = &images[row * columns + col];
            match options.tile_size {
                Some((tile_width, tile_height)) => {
                    let resized =
                        imageops::resize(image, tile_width, tile_height, FilterType::Lanczos3);
                    imageops::replace(&mut canvas, &resized, i64::from(x), i64::from(y));
                }
                None => imageops::replace(&mut canvas, image, i64::from(x), i64::from(y)),
            }
            x += column_width + options.spacing.0;
        }
        y += row_height + options.spacing.1;
    }

    Ok(canvas)
}

/// 與 [`tile_images`] 相同，但取得來源所有權並在拼貼後釋放
pub fn tile_images_owned(images: Vec<RgbaImage>, options: &TileOptions) -> Result<RgbaImage> {
    let canvas = tile_images(&images, options);
    drop(images);
    canvas
}

fn plan_layout(images: &[RgbaImage], options: &TileOptions) -> Result<Layout> {
    let (columns, rows) = (options.columns, options.rows);
    if columns == 0 || rows == 0 {
        return Err(StoryboardError::validation(format!(
            "拼貼欄列數必須為正整數: {columns}x{rows}"
        )));
    }

    let expected = columns as usize * rows as usize;
    if images.len() != expected {
        return Err(StoryboardError::validation(format!(
            "預期 {columns}x{rows} = {expected} 張圖片，實際為 {} 張",
            images.len()
        )));
    }

    if let Some((width, height)) = options.tile_size {
        if width == 0 || height == 0 {
            return Err(StoryboardError::validation(format!(
                "拼貼尺寸必須為正整數: {width}x{height}"
            )));
        }
        return Ok(Layout {
            column_widths: vec![width; columns as usize],
            row_heights: vec![height; rows as usize],
        });
    }

    let columns = columns as usize;
    let at = |row: usize, col: usize| &images[row * columns + col];

    // 同一欄的寬度須與第一列一致
    let column_widths: Vec<u32> = (0..columns).map(|col| at(0, col).width()).collect();
    for col in 0..columns {
        let reference = at(0, col);
        for row in 1..rows as usize {
            let image = at(row, col);
            if image.width() != reference.width() {
                return Err(StoryboardError::validation(format!(
                    "圖片 #{}（第 {row} 列, 第 {col} 欄, {}x{}）的寬度與圖片 #{col}（第 0 列, 第 {col} 欄, {}x{}）不一致",
                    row * columns + col,
                    image.width(),
                    image.height(),
                    reference.width(),
                    reference.height(),
                )));
            }
        }
    }

    // 同一列的高度須與第一欄一致
    let row_heights: Vec<u32> = (0..rows as usize).map(|row| at(row, 0).height()).collect();
    for row in 0..rows as usize {
        let reference = at(row, 0);
        for col in 1..columns {
            let image = at(row, col);
            if image.height() != reference.height() {
                return Err(StoryboardError::validation(format!(
                    "圖片 #{}（第 {row} 列, 第 {col} 欄, {}x{}）的高度與圖片 #{}（第 {row} 列, 第 0 欄, {}x{}）不一致",
                    row * columns + col,
                    image.width(),
                    image.height(),
                    row * columns,
                    reference.width(),
                    reference.height(),
                )));
            }
        }
    }

    Ok(Layout {
        column_widths,
        row_heights,
    })
}
