use anyhow::{Result, bail};
use log::debug;
use std::process::{Command, Stdio};

/// 依平台推測 ffmpeg / ffprobe 的執行檔名稱
#[must_use]
pub fn guess_bins() -> (String, String) {
    if cfg!(windows) {
        ("ffmpeg.exe".to_string(), "ffprobe.exe".to_string())
    } else {
        ("ffmpeg".to_string(), "ffprobe".to_string())
    }
}

/// 以 `-version` 確認執行檔可用
pub fn check_bins(bins: &[&str]) -> Result<()> {
    for bin in bins {
        debug!("檢查執行檔: {bin}");
        let status = Command::new(bin)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => bail!("'{bin} -version' 執行失敗 ({status})"),
            Err(e) => bail!("找不到或無法執行 '{bin}': {e}"),
        }
    }
    Ok(())
}
