use std::path::Path;

/// 將 ffprobe 的 `format_name` 轉為容器格式名稱，部分格式需參考副檔名
#[must_use]
pub fn describe_container(format_name: Option<&str>, path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let label = match format_name {
        Some("mpegts") => "MPEG transport stream",
        Some("mpeg") => "MPEG program stream",
        Some("mov,mp4,m4a,3gp,3g2,mj2") => match extension.as_str() {
            "mov" | "qt" => "QuickTime movie",
            "3gp" => "3GPP",
            "3g2" => "3GPP2",
            "mj2" | "mjp2" => "Motion JPEG 2000",
            _ => return format!("MPEG-4 Part 14 ({})", extension.to_uppercase()),
        },
        Some("mpegvideo") => "MPEG video",
        Some("matroska,webm") if extension == "webm" => "WebM",
        Some("matroska,webm") => "Matroska",
        Some("flv") => "Flash video",
        Some("ogg") => "Ogg",
        Some("avi") => "Audio Video Interleaved",
        Some("asf") => "Advanced Systems Format",
        _ => return extension.to_uppercase(),
    };
    label.to_string()
}
