use super::RankedType;

/// Minimum secondary/primary score ratio for a secondary type to be reported.
pub const SECONDARY_ADMISSION_RATIO: f64 = 0.3;

/// A secondary type is only reported next to a strictly positive primary.
pub(crate) fn admits_secondary(primary_score: f64, secondary_score: f64) -> bool {
    primary_score > 0.0 && secondary_score / primary_score >= SECONDARY_ADMISSION_RATIO
}

pub(crate) fn total_score(ranking: &[RankedType]) -> f64 {
    ranking.iter().map(|ranked| ranked.score).sum()
}

/// Share of `total` in whole percent, rounded half away from zero. Zero when `total` is zero.
///
/// Multiplies before dividing, so exact halves stay exact: 23 of 40 is 57.5 and reports 58,
/// where `score / total * 100` lands on 57.49999999999999 and reports 57. Rounded shares may
/// therefore sum to 101.
pub fn percentage_of(score: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }

    (score * 100.0 / total).round() as i64
}
