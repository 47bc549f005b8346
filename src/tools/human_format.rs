//! 人類可讀的數值格式化（檔案大小、時間長度、幀率、位元率）

use super::ratio_math::round_up;

const BINARY_UNITS: [&str; 7] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];
const MULTIPLIER: f64 = 1024.0;

/// 將位元組數轉為二進位前綴字串，例如 `1536` -> `1.50KiB`
///
/// 數值一律向上取整，顯示值不會小於實際大小。
#[must_use]
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    human_size_scaled(bytes as f64)
}

fn human_size_scaled(mut size: f64) -> String {
    let mut unit = BINARY_UNITS[0];
    for candidate in BINARY_UNITS {
        size /= MULTIPLIER;
        unit = candidate;
        // 以取整前的數值判斷是否進位到下一個單位
        if size < MULTIPLIER {
            return if size < 10.0 {
                format!("{:.2}{unit}B", round_up(size, 2))
            } else {
                format!("{:.1}{unit}B", round_up(size, 1))
            };
        }
    }
    // 已到最大單位 Zi，不再進位
    format!("{:.1}{unit}B", round_up(size, 1))
}

/// `HH:MM:SS.ss` 格式的時間長度
#[must_use]
pub fn human_duration(seconds: f64) -> String {
    human_duration_with(seconds, 2, false)
}

/// 可調整秒數小數位數與小時位數的時間長度格式
///
/// - `digits == 0` 時秒數以整數顯示（無條件捨去）
/// - `one_hour_digit` 為 `true` 時小時不補零，例如 `0:00:01`
#[must_use]
pub fn human_duration_with(seconds: f64, digits: usize, one_hour_digit: bool) -> String {
    let whole_minutes = (seconds / 60.0).floor();
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = (whole_minutes as u64) % 60;
    // 以減法取餘數，保留小數精度
    let secs = seconds - 60.0 * whole_minutes;

    let hh = if one_hour_digit {
        format!("{hours}")
    } else {
        format!("{hours:02}")
    };
    let ss = if digits == 0 {
        format!("{:02}", secs as u64)
    } else {
        format!("{secs:0width$.digits$}", width = digits + 3)
    };

    format!("{hh}:{minutes:02}:{ss}")
}

/// 位元率字串，例如 `128000` -> `128 kb/s`
///
/// 剛好落在 .5 的值採用銀行家捨入（round half to even）。
#[must_use]
pub fn human_bit_rate(bits_per_second: f64) -> String {
    format!("{} kb/s", (bits_per_second / 1000.0).round_ties_even() as i64)
}

/// 幀率字串：整數幀率顯示為 `30 fps`，其餘顯示兩位小數 `29.97 fps`
#[must_use]
pub fn human_frame_rate(fps: f64) -> String {
    if (fps - fps.round()).abs() < 0.0001 {
        format!("{} fps", fps.round() as i64)
    } else {
        format!("{fps:.2} fps")
    }
}
