use crate::error::{Result, StoryboardError};

/// 將影片長度等分為 `count` 段，取每段的中點
///
/// 第 `i` 個時間點為 `(2i + 1) * duration / (2 * count)`，
/// 避開片頭片尾常見的黑畫面。
pub fn sample_points(duration: f64, count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(StoryboardError::validation("取樣數量必須為正整數"));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(StoryboardError::validation(format!(
            "影片長度必須為正數，實際為 {duration}"
        )));
    }

    let denominator = 2.0 * count as f64;
    Ok((0..count)
        .map(|i| (2 * i + 1) as f64 * duration / denominator)
        .collect())
}
