use regex::Regex;
use std::sync::LazyLock;

/// `num:den` 或 `num/den`，兩者皆為正整數
static RATIO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9][0-9]*)[:/]([1-9][0-9]*)$").expect("invalid ratio regex"));

/// 解析比例字串（例如 "16:9" 或 "30000/1001"）
///
/// 分子或分母為零、負數、非整數或分隔符號錯誤時回傳 `None`，
/// 呼叫端以 `None` 作為「改用計算值」的訊號。
#[must_use]
pub fn evaluate_ratio(ratio: &str) -> Option<f64> {
    let captures = RATIO_PATTERN.captures(ratio)?;
    let numerator: u64 = captures[1].parse().ok()?;
    let denominator: u64 = captures[2].parse().ok()?;
    Some(numerator as f64 / denominator as f64)
}

/// 將非負數「向上」取整到指定的小數位數
#[must_use]
pub fn round_up(number: f64, digits: i32) -> f64 {
    let multiplier = 10f64.powi(digits);
    (number * multiplier).ceil() / multiplier
}

/// 以最大公因數約分，任一方為零時回傳 `None`
#[must_use]
pub fn reduce_fraction(numerator: u64, denominator: u64) -> Option<(u64, u64)> {
    if numerator == 0 || denominator == 0 {
        return None;
    }
    let divisor = gcd(numerator, denominator);
    Some((numerator / divisor, denominator / divisor))
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
