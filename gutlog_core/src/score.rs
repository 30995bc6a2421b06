//! Health score computation and baseline blending.
//!
//! The displayed score is a blend of the user's self-reported onboarding
//! baseline and a score calculated from recent logs. The weight schedule
//! shifts trust from self-report toward measured behaviour as logs
//! accumulate, stabilising at a 90/10 split so a single bad day can never
//! fully override months of baseline context.

use crate::journal::Journal;
use crate::scales::Urgency;
use crate::types::{GutMoment, HealthGrade, HealthScore, MomentTag, OnboardingProfile, ScoreBreakdown};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

/// Log window feeding the calculated score
pub const SCORE_WINDOW_DAYS: i64 = 7;

/// Baseline weight for a given log count
fn baseline_weight(log_count: usize) -> f64 {
    match log_count {
        0 => 1.0,
        1..=2 => 0.7,
        3..=4 => 0.5,
        5..=6 => 0.3,
        _ => 0.1,
    }
}

/// Grade step function over the final blended value
pub fn grade_for(value: u8) -> HealthGrade {
    match value {
        90..=u8::MAX => HealthGrade::Excellent,
        80..=89 => HealthGrade::Good,
        70..=79 => HealthGrade::Fair,
        50..=69 => HealthGrade::Sus,
        _ => HealthGrade::Poor,
    }
}

/// Blend a calculated score with the onboarding baseline.
///
/// At zero logs the calculated score is ignored entirely and the result is
/// flagged as a pure baseline. The blended value is rounded, then clamped
/// to [0, 100].
pub fn blend(
    calculated: u8,
    baseline: u8,
    log_count: usize,
    breakdown: Option<ScoreBreakdown>,
) -> HealthScore {
    let w = baseline_weight(log_count);
    let blended = f64::from(baseline) * w + f64::from(calculated) * (1.0 - w);
    let value = blended.round().clamp(0.0, 100.0) as u8;

    HealthScore {
        value,
        grade: grade_for(value),
        breakdown,
        is_baseline: log_count == 0,
    }
}

/// Calculate the data-derived score breakdown from a window of moments.
///
/// Components: Bristol 0-40, symptoms 0-30, regularity 0-20, medical 0-10.
/// Absence of data within a component earns full marks for that component;
/// regularity alone rewards actually having logged.
pub fn calculated_from_moments(moments: &[GutMoment], window_days: i64) -> ScoreBreakdown {
    // Bristol: mean band fraction over moments that carry a Bristol type
    let bands: Vec<f64> = moments
        .iter()
        .filter_map(|m| m.bristol.map(|b| b.band().fraction()))
        .collect();
    let bristol = if bands.is_empty() {
        40
    } else {
        let mean = bands.iter().sum::<f64>() / bands.len() as f64;
        (40.0 * mean).round() as u8
    };

    // Symptoms: share of symptom-free moments
    let symptoms = if moments.is_empty() {
        30
    } else {
        let symptomatic = moments.iter().filter(|m| m.symptoms.any()).count();
        let clean_ratio = 1.0 - symptomatic as f64 / moments.len() as f64;
        (30.0 * clean_ratio).round() as u8
    };

    // Regularity: distinct logging days against the window length
    let days: BTreeSet<_> = moments.iter().map(|m| m.logged_at.date_naive()).collect();
    let regularity = {
        let ratio = (days.len() as f64 / window_days as f64).min(1.0);
        (20.0 * ratio).round() as u8
    };

    // Medical red flags: blood zeroes the component, mucus or severe
    // urgency halves it
    let any_blood = moments.iter().any(|m| m.tags.contains(&MomentTag::Blood));
    let any_flag = moments.iter().any(|m| {
        m.tags.contains(&MomentTag::Mucus) || m.urgency == Some(Urgency::Severe)
    });
    let medical = if any_blood {
        0
    } else if any_flag {
        5
    } else {
        10
    };

    ScoreBreakdown {
        bristol,
        symptoms,
        regularity,
        medical,
    }
}

/// Compute the blended health score for a user as of `now`.
///
/// Consumes the trailing 7-day moment window from the journal; the
/// onboarding profile seeds the baseline, falling back to `default_baseline`
/// when no profile exists.
pub fn compute_health_score(
    journal: &Journal,
    profile: Option<&OnboardingProfile>,
    user: &str,
    now: DateTime<Utc>,
    default_baseline: u8,
) -> Result<HealthScore> {
    let moments = journal.moments_since(user, now - Duration::days(SCORE_WINDOW_DAYS))?;
    let baseline = profile.map(|p| p.baseline_score).unwrap_or(default_baseline);
    let log_count = moments.len();

    if log_count == 0 {
        tracing::debug!("No logs in window for {}: pure baseline score", user);
        return Ok(blend(0, baseline, 0, None));
    }

    let breakdown = calculated_from_moments(&moments, SCORE_WINDOW_DAYS);
    Ok(blend(breakdown.total(), baseline, log_count, Some(breakdown)))
}
