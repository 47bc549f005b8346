use super::assembler::{
    SheetStyle, assemble_storyboard, banner_text, render_banner, render_text_sheet,
};
use super::sampler::sample_points;
use super::thumbnail::{ThumbnailOptions, TimestampAlign, create_thumbnail};
use super::tile_compositor::{TileOptions, WHITE, tile_images_owned};
use crate::component::video_metadata::VideoMetadata;
use crate::error::{Result, StoryboardError};
use crate::tools::{Frame, FrameExtractor, TextRenderer};
use console::style;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use rust_i18n::t;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const JPEG_QUALITY: u8 = 90;

/// 分鏡圖選項
#[derive(Debug, Clone)]
pub struct StoryboardOptions {
    /// 整張圖的 (水平, 垂直) 外框
    pub padding: (u32, u32),
    pub include_banner: bool,
    pub text_color: Rgba<u8>,
    pub text_spacing: f32,
    /// 資訊區是否包含 SHA-1（需讀取整個檔案）
    pub include_sha1: bool,
    /// (欄, 列)
    pub tiling: (u32, u32),
    pub tile_width: u32,
    /// 未指定時使用影片的 DAR，再退回影格本身的比例
    pub tile_aspect_ratio: Option<f64>,
    pub tile_spacing: (u32, u32),
    /// `None` 表示縮圖不繪製時間戳
    pub timestamp: Option<TimestampAlign>,
    pub background: Rgba<u8>,
    /// 平行擷取影格的執行緒數，`None` 由 rayon 決定
    pub jobs: Option<usize>,
    pub print_progress: bool,
}

impl Default for StoryboardOptions {
    fn default() -> Self {
        Self {
            padding: (10, 10),
            include_banner: true,
            text_color: Rgba([0, 0, 0, 255]),
            text_spacing: 1.2,
            include_sha1: true,
            tiling: (4, 4),
            tile_width: 480,
            tile_aspect_ratio: None,
            tile_spacing: (4, 3),
            timestamp: Some(TimestampAlign::Right),
            background: WHITE,
            jobs: None,
            print_progress: false,
        }
    }
}

/// 單支影片的分鏡圖產生器
///
/// 擷取出的影格會被快取，相同數量的請求不會重新擷取。
pub struct StoryBoard<E: FrameExtractor> {
    video: VideoMetadata,
    extractor: E,
    frames: Vec<Frame>,
    shutdown_signal: Option<Arc<AtomicBool>>,
}

impl<E: FrameExtractor> StoryBoard<E> {
    pub const fn new(video: VideoMetadata, extractor: E) -> Self {
        Self {
            video,
            extractor,
            frames: Vec::new(),
            shutdown_signal: None,
        }
    }

    /// 設定中斷信號，擷取過程中收到信號時回傳 [`StoryboardError::Cancelled`]
    #[must_use]
    pub fn with_shutdown_signal(mut self, shutdown_signal: Arc<AtomicBool>) -> Self {
        self.shutdown_signal = Some(shutdown_signal);
        self
    }

    pub const fn video(&self) -> &VideoMetadata {
        &self.video
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// 在均勻分布的時間點擷取 `count` 張影格
    ///
    /// 影格以時間遞增排序；任一張失敗則整批失敗，不保留部分結果。
    pub fn gen_frames(
        &mut self,
        count: usize,
        jobs: Option<usize>,
        print_progress: bool,
    ) -> Result<&[Frame]> {
        if count > 0 && self.frames.len() == count {
            debug!("使用快取的 {count} 張影格");
            return Ok(&self.frames);
        }

        self.frames.clear();
        let timestamps = sample_points(self.video.duration(), count)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs.unwrap_or(0))
            .build()
            .map_err(|e| StoryboardError::validation(format!("無法建立執行緒池: {e}")))?;

        let progress_bar = if print_progress {
            extraction_progress_bar(count as u64)
        } else {
            ProgressBar::hidden()
        };

        let path = self.video.path();
        let extractor = &self.extractor;
        let shutdown_signal = self.shutdown_signal.as_deref();
        let results: Vec<Result<Frame>> = pool.install(|| {
            timestamps
                .par_iter()
                .map(|&timestamp| {
                    if shutdown_signal.is_some_and(|signal| signal.load(Ordering::SeqCst)) {
                        return Err(StoryboardError::Cancelled);
                    }
                    let frame = extractor.extract_frame(path, timestamp);
                    progress_bar.inc(1);
                    frame
                })
                .collect()
        });

        let frames = results.into_iter().collect::<Result<Vec<_>>>();
        match &frames {
            Ok(_) => progress_bar.finish_and_clear(),
            Err(_) => progress_bar.abandon(),
        }

        self.frames = frames?;
        info!("已擷取 {} 張影格: {}", self.frames.len(), path.display());
        Ok(&self.frames)
    }

    /// 只有縮圖網格的分鏡圖
    pub fn bare_storyboard(
        &mut self,
        options: &StoryboardOptions,
        renderer: &dyn TextRenderer,
    ) -> Result<RgbaImage> {
        let (columns, rows) = options.tiling;
        if columns == 0 || rows == 0 {
            return Err(StoryboardError::validation(format!(
                "拼貼欄列數必須為正整數: {columns}x{rows}"
            )));
        }

        self.gen_frames(
            columns as usize * rows as usize,
            options.jobs,
            options.print_progress,
        )?;

        narrate(options, &t!("storyboard.generating_thumbnails"));
        let aspect_ratio = options
            .tile_aspect_ratio
            .or_else(|| self.video.dar())
            .or_else(|| {
                self.frames.first().map(|frame| {
                    f64::from(frame.image.width()) / f64::from(frame.image.height())
                })
            });
        let thumbnail_options = ThumbnailOptions {
            width: options.tile_width,
            aspect_ratio,
            timestamp: options.timestamp,
        };
        let thumbnails = self
            .frames
            .iter()
            .map(|frame| create_thumbnail(frame, &thumbnail_options, renderer))
            .collect::<Result<Vec<_>>>()?;

        narrate(options, &t!("storyboard.tiling"));
        let tile_options = TileOptions::new(columns, rows)
            .with_spacing(options.tile_spacing.0, options.tile_spacing.1)
            .with_background(options.background);
        tile_images_owned(thumbnails, &tile_options)
    }

    /// 完整分鏡圖：資訊區、縮圖網格、版本標記
    pub fn storyboard(
        &mut self,
        options: &StoryboardOptions,
        renderer: &dyn TextRenderer,
    ) -> Result<RgbaImage> {
        let grid = self.bare_storyboard(options, renderer)?;
        let style = SheetStyle {
            renderer,
            text_color: options.text_color,
            text_spacing: options.text_spacing,
            background: options.background,
        };

        narrate(options, &t!("storyboard.drawing_metadata_sheet"));
        let report = self.video.format_report(options.include_sha1)?;
        let metadata_sheet = render_text_sheet(&report, grid.width(), &style);

        let banner = if options.include_banner {
            narrate(options, &t!("storyboard.drawing_banner"));
            Some(render_banner(&banner_text(), grid.width(), &style))
        } else {
            None
        };

        narrate(options, &t!("storyboard.assembling"));
        Ok(assemble_storyboard(
            &metadata_sheet,
            &grid,
            banner.as_ref(),
            options.padding,
            options.background,
        ))
    }
}

/// 以 JPEG（品質 90）儲存分鏡圖，透明度會被捨棄
pub fn save_storyboard_jpeg(image: RgbaImage, path: &Path) -> Result<()> {
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let mut writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(&rgb)?;
    writer.flush()?;
    info!("已儲存分鏡圖: {}", path.display());
    Ok(())
}

fn narrate(options: &StoryboardOptions, message: &str) {
    if options.print_progress {
        eprintln!("{}", style(message).dim());
    }
}

fn extraction_progress_bar(total: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(total);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress_bar.set_message(t!("storyboard.extracting_frames").to_string());
    progress_bar
}
