use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "video_storyboard")]
#[command(version, about = "Generate video storyboards and metadata reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the ffmpeg binary
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg_bin: Option<String>,

    /// Path to the ffprobe binary
    #[arg(long, global = true, value_name = "PATH")]
    pub ffprobe_bin: Option<String>,

    /// Override the duration reported by ffprobe
    #[arg(long, global = true, value_name = "SECONDS")]
    pub video_duration: Option<f64>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print video metadata
    Metadata(MetadataArgs),

    /// Generate storyboards
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct MetadataArgs {
    /// Video files or directories containing videos
    #[arg(required = true, value_name = "VIDEO")]
    pub videos: Vec<PathBuf>,

    /// Include the SHA-1 digest of each file
    #[arg(short = 's', long)]
    pub include_sha1sum: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Video files or directories containing videos
    #[arg(required = true, value_name = "VIDEO")]
    pub videos: Vec<PathBuf>,

    /// Directory for the generated storyboards (default: temporary files)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Grid layout, e.g. 4x4
    #[arg(long, value_name = "COLSxROWS", value_parser = parse_tiling)]
    pub tiling: Option<(u32, u32)>,

    /// Width of each thumbnail in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_width: Option<u32>,

    /// Omit the version banner at the bottom
    #[arg(long)]
    pub no_banner: bool,

    /// Omit the SHA-1 digest from the metadata sheet
    #[arg(long)]
    pub no_sha1sum: bool,

    /// Do not draw timestamps on thumbnails
    #[arg(long)]
    pub no_timestamp: bool,

    /// Timestamp position: left, center or right
    #[arg(long, value_name = "ALIGN")]
    pub timestamp_align: Option<String>,

    /// TrueType/OpenType font file
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Font size in pixels
    #[arg(long, value_name = "PIXELS")]
    pub font_size: Option<f32>,

    /// Number of parallel frame extraction jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// 解析 `CxR` 格式的拼貼設定
pub fn parse_tiling(value: &str) -> Result<(u32, u32), String> {
    let (columns, rows) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("invalid tiling '{value}': expected positive integers"))
    };
    Ok((parse(columns)?, parse(rows)?))
}
