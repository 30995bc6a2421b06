//! Food-trigger correlation engine.
//!
//! On every newly logged gut moment, looks back over a fixed trailing
//! window, collects the set of candidate foods from meals in that window,
//! and updates per-food evidence counters through the trigger store's
//! atomic update primitive.

use crate::confidence::classify;
use crate::journal::Journal;
use crate::store::TriggerStore;
use crate::types::{is_bad_outcome, GutMoment, TriggerRecord};
use crate::Result;
use chrono::Duration;
use std::collections::BTreeSet;

/// How far back a gut moment looks for candidate meals
pub const CORRELATION_WINDOW_HOURS: i64 = 6;

/// Attribute a gut moment to the foods eaten in the trailing window.
///
/// Each unique food in the window gets exactly one bad or good increment
/// for this event, no matter how many meals contained it. Records are only
/// created once a food has at least one bad occurrence, so healthy foods
/// never inflate the trigger table. Per-food persistence failures are
/// logged and do not abort the remaining foods.
pub fn attribute_moment<S: TriggerStore>(
    store: &S,
    journal: &Journal,
    user: &str,
    moment: &GutMoment,
) -> Result<()> {
    let window_start = moment.logged_at - Duration::hours(CORRELATION_WINDOW_HOURS);
    let meals = journal.meals_between(user, window_start, moment.logged_at)?;

    // Set semantics: a food eaten twice in one window is one piece of evidence
    let foods: BTreeSet<String> = meals
        .iter()
        .flat_map(|m| m.foods_for_analysis().iter().cloned())
        .collect();

    if foods.is_empty() {
        tracing::debug!("No meals within {}h of moment {}", CORRELATION_WINDOW_HOURS, moment.id);
        return Ok(());
    }

    let bad = is_bad_outcome(moment);
    let symptom_names = moment.symptoms.active_names();

    tracing::info!(
        "Attributing {} moment {} to {} candidate food(s)",
        if bad { "bad" } else { "good" },
        moment.id,
        foods.len()
    );

    for food in &foods {
        let result = store.update_trigger(user, food, |existing| {
            apply_evidence(existing, food, bad, &symptom_names)
        });

        if let Err(e) = result {
            // Best effort per food: keep going for the siblings
            tracing::warn!("Failed to update trigger for food {:?}: {}", food, e);
        }
    }

    Ok(())
}

/// Pure per-food update rule applied inside the store's atomic update
fn apply_evidence(
    existing: Option<TriggerRecord>,
    food: &str,
    bad: bool,
    symptom_names: &[String],
) -> Option<TriggerRecord> {
    let mut record = match existing {
        // Confirmed verdicts are frozen against the automatic path
        Some(record) if record.is_frozen() => return Some(record),
        Some(record) => record,
        None => {
            if !bad {
                // First encounter is good: decline to create a record
                return None;
            }
            TriggerRecord::new(food)
        }
    };

    if bad {
        record.bad_occurrences += 1;
        record.symptoms.extend(symptom_names.iter().cloned());
    } else {
        record.good_occurrences += 1;
    }
    record.confidence = classify(record.bad_occurrences, record.good_occurrences);

    Some(record)
}
