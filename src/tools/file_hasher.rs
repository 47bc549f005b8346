use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024; // 64KB chunk

/// 計算檔案的 SHA-1 摘要（40 個小寫十六進位字元）
///
/// `show_progress` 為 `true` 時於 stderr 顯示讀取進度。
pub fn calculate_sha1(path: &Path, show_progress: bool) -> Result<String> {
    let file = File::open(path)?;
    let total = file.metadata()?.len();
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    let progress_bar = if show_progress {
        hashing_progress_bar(total)
    } else {
        ProgressBar::hidden()
    };

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        progress_bar.inc(bytes_read as u64);
    }
    progress_bar.finish_and_clear();

    Ok(hex::encode(hasher.finalize()))
}

fn hashing_progress_bar(total: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(total);
    progress_bar.set_style(
        ProgressStyle::with_template(
            "{bytes:>10} {elapsed_precise} [{bytes_per_sec:>12}] [{bar:30}] {percent:>3}% ETA {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> "),
    );
    progress_bar
}
