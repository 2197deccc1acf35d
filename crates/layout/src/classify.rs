use serde::Serialize;
use spanlens_core::config::Config;

pub const BUCKET_LABELS: [&str; 5] = ["fastest", "fast", "medium", "slow", "slowest"];
pub const BUCKET_COLORS: [&str; 5] = ["#66bb6a", "#d4e157", "#ffee58", "#ffa726", "#ef5350"];

/// One of five ordered severity buckets, fastest to slowest. Identical
/// ratios always classify to the identical bucket.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DurationBucket {
    pub index: usize,
    pub label: &'static str,
    pub color: &'static str,
}

fn bucket(index: usize) -> DurationBucket {
    DurationBucket {
        index,
        label: BUCKET_LABELS[index],
        color: BUCKET_COLORS[index],
    }
}

/// Classifies a duration ratio with the default thresholds.
pub fn classify_duration(ratio: f64) -> DurationBucket {
    classify_duration_with(&Config::default().classifier_thresholds, ratio)
}

/// Classifies a duration ratio against configured thresholds. The four
/// thresholds are the upper bounds of buckets 0..=3; anything at or above
/// the last threshold, including ratios above 1 from inconsistent durations,
/// lands in the top bucket. Negative or non-numeric input classifies to the
/// bottom bucket instead of erroring.
pub fn classify_duration_with(thresholds: &[f64; 4], ratio: f64) -> DurationBucket {
    if ratio.is_nan() || ratio < 0.0 {
        return bucket(0);
    }
    let index = thresholds
        .iter()
        .position(|&t| ratio < t)
        .unwrap_or(BUCKET_LABELS.len() - 1);
    bucket(index)
}

/// Ratio of a span's duration to a reference duration (the root's for flame
/// layouts, the set maximum for the dependency graph). A zero reference with
/// a positive duration saturates to 1 rather than dividing by zero.
pub fn duration_ratio(duration_ms: f64, reference_ms: f64) -> f64 {
    if reference_ms > 0.0 {
        duration_ms / reference_ms
    } else if duration_ms > 0.0 {
        1.0
    } else {
        0.0
    }
}
