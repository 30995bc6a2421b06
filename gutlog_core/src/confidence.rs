//! Confidence classifier for trigger evidence.
//!
//! Maps a food's (bad, good) occurrence counters to a confidence tier
//! using fixed thresholds. Pure and deterministic: the same counts always
//! yield the same tier.

use crate::Confidence;

/// Classify evidence counters into a confidence tier.
///
/// Rules, checked in priority order (first match wins):
/// 1. bad >= 8 and bad ratio >= 0.75 -> High
/// 2. bad >= 5 and bad ratio >= 0.70 -> Medium
/// 3. bad >= 3 and bad ratio >= 0.65 -> Low
/// 4. otherwise -> None
///
/// Monotonic: raising `bad` with `good` fixed never lowers the tier, and
/// raising `good` with `bad` fixed never raises it.
pub fn classify(bad: u32, good: u32) -> Confidence {
    let total = bad + good;
    if total == 0 {
        return Confidence::None;
    }

    let ratio = bad as f64 / total as f64;

    if bad >= 8 && ratio >= 0.75 {
        Confidence::High
    } else if bad >= 5 && ratio >= 0.70 {
        Confidence::Medium
    } else if bad >= 3 && ratio >= 0.65 {
        Confidence::Low
    } else {
        Confidence::None
    }
}
