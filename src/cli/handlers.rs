use super::args::{Cli, Command, GenerateArgs, MetadataArgs};
use crate::component::storyboard_generator::{
    StoryBoard, StoryboardOptions, TimestampAlign, save_storyboard_jpeg,
};
use crate::component::video_metadata::{MetadataOptions, VideoMetadata};
use crate::config::{Config, UserSettings};
use crate::tools::{
    FfmpegFrameExtractor, FfprobeProber, FontRenderer, TextRenderer, check_bins,
    ensure_directory_exists, expand_video_inputs, guess_bins,
};
use anyhow::{Context, Result};
use console::style;
use log::{error, info, warn};
use rust_i18n::t;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 批次處理結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    const fn new(total: usize) -> Self {
        Self {
            total,
            successful: 0,
            failed: 0,
        }
    }

    /// 所有影片皆成功處理（中斷後未處理的影片也視為失敗）
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.successful == self.total
    }
}

/// ffmpeg / ffprobe 路徑：命令列 > 設定檔 > 依平台推測
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Toolchain {
    #[must_use]
    pub fn resolve(cli: &Cli, settings: &UserSettings) -> Self {
        let (guessed_ffmpeg, guessed_ffprobe) = guess_bins();
        Self {
            ffmpeg: cli
                .ffmpeg_bin
                .clone()
                .or_else(|| settings.ffmpeg_bin.clone())
                .unwrap_or(guessed_ffmpeg),
            ffprobe: cli
                .ffprobe_bin
                .clone()
                .or_else(|| settings.ffprobe_bin.clone())
                .unwrap_or(guessed_ffprobe),
        }
    }
}

/// 執行子命令，設定或工具錯誤回傳 `Err`，個別影片的失敗記錄在摘要中
pub fn run(cli: &Cli, config: &Config, shutdown_signal: &Arc<AtomicBool>) -> Result<BatchSummary> {
    let toolchain = Toolchain::resolve(cli, &config.settings);
    match &cli.command {
        Command::Metadata(args) => {
            check_bins(&[toolchain.ffprobe.as_str()])?;
            run_metadata(cli, args, config, &toolchain, shutdown_signal)
        }
        Command::Generate(args) => {
            check_bins(&[toolchain.ffmpeg.as_str(), toolchain.ffprobe.as_str()])?;
            run_generate(cli, args, config, &toolchain, shutdown_signal)
        }
    }
}

fn run_metadata(
    cli: &Cli,
    args: &MetadataArgs,
    config: &Config,
    toolchain: &Toolchain,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<BatchSummary> {
    let videos = expand_video_inputs(&args.videos, &config.file_type_table);
    if videos.is_empty() {
        warn!("找不到任何影片檔案");
        eprintln!("{}", style(t!("cli.no_videos")).yellow());
        return Ok(BatchSummary::default());
    }

    let prober = FfprobeProber::new(&toolchain.ffprobe);
    let options = MetadataOptions {
        video_duration: cli.video_duration,
        print_progress: !cli.quiet,
    };

    let mut summary = BatchSummary::new(videos.len());
    let mut printer = ReportPrinter::new(io::stdout().lock());
    for video in &videos {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，停止處理");
            eprintln!("{}", style(t!("cli.interrupted")).yellow());
            break;
        }

        let result = VideoMetadata::probe(video, &prober, &options)
            .map_err(anyhow::Error::from)
            .and_then(|metadata| render_metadata(&metadata, args));

        match result {
            Ok(text) => {
                printer.print(&text).context("無法輸出報告")?;
                summary.successful += 1;
            }
            Err(e) => {
                report_failure(video, &e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// 依序輸出報告，報告之間以一個空行分隔
struct ReportPrinter<W: Write> {
    out: W,
    printed_any: bool,
}

impl<W: Write> ReportPrinter<W> {
    const fn new(out: W) -> Self {
        Self {
            out,
            printed_any: false,
        }
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        if self.printed_any {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{text}")?;
        self.printed_any = true;
        Ok(())
    }
}

fn render_metadata(metadata: &VideoMetadata, args: &MetadataArgs) -> Result<String> {
    if args.json {
        let value = metadata.to_json(args.include_sha1sum)?;
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(metadata.format_report(args.include_sha1sum)?)
    }
}

fn run_generate(
    cli: &Cli,
    args: &GenerateArgs,
    config: &Config,
    toolchain: &Toolchain,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<BatchSummary> {
    let options = storyboard_options(cli, args, &config.settings)?;

    let font_file = args.font.as_deref().or(config.settings.font_file.as_deref());
    let font_size = args.font_size.unwrap_or(config.settings.font_size);
    let renderer = FontRenderer::discover(font_file, font_size).context("無法載入字型")?;

    if let Some(output_dir) = &args.output_dir {
        ensure_directory_exists(output_dir)
            .with_context(|| format!("無法建立輸出資料夾: {}", output_dir.display()))?;
    }

    let videos = expand_video_inputs(&args.videos, &config.file_type_table);
    if videos.is_empty() {
        warn!("找不到任何影片檔案");
        eprintln!("{}", style(t!("cli.no_videos")).yellow());
        return Ok(BatchSummary::default());
    }

    let prober = FfprobeProber::new(&toolchain.ffprobe);
    let extractor = FfmpegFrameExtractor::new(&toolchain.ffmpeg);
    let metadata_options = MetadataOptions {
        video_duration: cli.video_duration,
        print_progress: options.print_progress,
    };

    let mut output_names = OutputNames::new(args.output_dir.clone());
    let mut summary = BatchSummary::new(videos.len());
    for (index, video) in videos.iter().enumerate() {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，停止處理");
            eprintln!("{}", style(t!("cli.interrupted")).yellow());
            break;
        }

        if options.print_progress {
            eprintln!(
                "{} {}",
                style(format!("[{}/{}]", index + 1, videos.len())).cyan(),
                style(video.display()).bold()
            );
        }

        let result = generate_single(
            video,
            &prober,
            &extractor,
            &renderer,
            &options,
            &metadata_options,
            &mut output_names,
            shutdown_signal,
        );

        match result {
            Ok(output_path) => {
                if options.print_progress {
                    eprintln!("  {} {}", style("✓").green(), t!("cli.saved_to"));
                }
                println!("{}", output_path.display());
                summary.successful += 1;
            }
            Err(e) => {
                report_failure(video, &e);
                summary.failed += 1;
            }
        }
    }

    if options.print_progress {
        print_summary(&summary);
    }

    Ok(summary)
}

/// 命令列參數覆寫設定檔中的分鏡圖預設值
fn storyboard_options(
    cli: &Cli,
    args: &GenerateArgs,
    settings: &UserSettings,
) -> Result<StoryboardOptions> {
    let defaults = &settings.storyboard;
    let timestamp_align = args
        .timestamp_align
        .as_deref()
        .map(str::parse::<TimestampAlign>)
        .transpose()?
        .unwrap_or(defaults.timestamp_align);

    Ok(StoryboardOptions {
        tiling: args.tiling.unwrap_or((defaults.columns, defaults.rows)),
        tile_width: args.tile_width.unwrap_or(defaults.tile_width),
        include_banner: defaults.include_banner && !args.no_banner,
        include_sha1: defaults.include_sha1sum && !args.no_sha1sum,
        timestamp: (defaults.draw_timestamp && !args.no_timestamp).then_some(timestamp_align),
        jobs: args.jobs.or(defaults.jobs),
        print_progress: !cli.quiet,
        ..StoryboardOptions::default()
    })
}

#[allow(clippy::too_many_arguments)]
fn generate_single(
    video: &Path,
    prober: &FfprobeProber,
    extractor: &FfmpegFrameExtractor,
    renderer: &dyn TextRenderer,
    options: &StoryboardOptions,
    metadata_options: &MetadataOptions,
    output_names: &mut OutputNames,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<PathBuf> {
    let metadata = VideoMetadata::probe(video, prober, metadata_options)?;
    let mut storyboard = StoryBoard::new(metadata, extractor.clone())
        .with_shutdown_signal(Arc::clone(shutdown_signal));
    let image = storyboard.storyboard(options, renderer)?;

    let output_path = output_names.next_for(storyboard.video().path())?;
    save_storyboard_jpeg(image, &output_path)
        .with_context(|| format!("無法寫入分鏡圖: {}", output_path.display()))?;

    info!("分鏡圖已建立: {}", output_path.display());
    Ok(output_path)
}

/// 分鏡圖的輸出路徑
///
/// 有輸出資料夾時為 `{DIR}/{stem}.storyboard.jpg`，同一批次中檔名重複時
/// 改用 `{stem}-2.storyboard.jpg`、`{stem}-3.storyboard.jpg` 依序遞增；
/// 否則建立 `storyboard-*.jpg` 暫存檔。
#[derive(Debug, Default)]
pub struct OutputNames {
    output_dir: Option<PathBuf>,
    taken: HashSet<PathBuf>,
}

impl OutputNames {
    #[must_use]
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir,
            taken: HashSet::new(),
        }
    }

    pub fn next_for(&mut self, video: &Path) -> Result<PathBuf> {
        let Some(dir) = &self.output_dir else {
            let file = tempfile::Builder::new()
                .prefix("storyboard-")
                .suffix(".jpg")
                .tempfile()
                .context("無法建立暫存檔")?;
            let (_, path) = file.keep().context("無法保留暫存檔")?;
            return Ok(path);
        };

        let stem = video
            .file_stem()
            .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().into_owned());
        let mut path = dir.join(format!("{stem}.storyboard.jpg"));
        let mut suffix = 2;
        while self.taken.contains(&path) {
            path = dir.join(format!("{stem}-{suffix}.storyboard.jpg"));
            suffix += 1;
        }
        if suffix > 2 {
            warn!(
                "輸出檔名重複，{} 改存為 {}",
                video.display(),
                path.display()
            );
        }
        self.taken.insert(path.clone());
        Ok(path)
    }
}

fn report_failure(video: &Path, e: &anyhow::Error) {
    error!("處理影片失敗 {}: {e:#}", video.display());
    eprintln!(
        "{} {}: {e:#}",
        style(t!("cli.error_prefix")).red().bold(),
        video.display()
    );
}

fn print_summary(summary: &BatchSummary) {
    eprintln!();
    eprintln!("{}", style(t!("cli.summary_title")).cyan().bold());
    eprintln!("  {}", t!("cli.summary_total", count = summary.total));
    eprintln!(
        "  {}",
        style(t!("cli.summary_successful", count = summary.successful)).green()
    );
    if summary.failed > 0 {
        eprintln!(
            "  {}",
            style(t!("cli.summary_failed", count = summary.failed)).red()
        );
    }
}
