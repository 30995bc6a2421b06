//! Trigger list aggregation and user verdict operations.
//!
//! The full per-food evidence table is filtered down to what is worth
//! surfacing: foods with real evidence, or foods the user has explicitly
//! confirmed. Confirm pins a verdict and freezes the record; dismiss
//! deletes it outright so evidence restarts from zero on a re-trigger.

use crate::store::TriggerStore;
use crate::{Confidence, Result, TriggerRecord};
use std::cmp::Reverse;

/// The user-facing trigger list.
///
/// Only records that are confirmed or carry a non-None confidence tier.
/// Ordered High, Medium, Low, then confirmed-but-otherwise-None; ties
/// broken by descending bad occurrences, then food name for stability.
pub fn list_triggers<S: TriggerStore>(store: &S, user: &str) -> Result<Vec<TriggerRecord>> {
    let mut records: Vec<TriggerRecord> = store
        .load_triggers(user)?
        .into_iter()
        .filter(|r| r.user_confirmed == Some(true) || r.confidence != Confidence::None)
        .collect();

    records.sort_by(|a, b| {
        (Reverse(a.confidence), Reverse(a.bad_occurrences), &a.food_name)
            .cmp(&(Reverse(b.confidence), Reverse(b.bad_occurrences), &b.food_name))
    });

    Ok(records)
}

/// Pin a trigger verdict. The record becomes immune to automatic updates.
///
/// Returns false when no record exists for the food; confirmation never
/// fabricates evidence.
pub fn confirm_trigger<S: TriggerStore>(store: &S, user: &str, food: &str) -> Result<bool> {
    let mut found = false;
    store.update_trigger(user, food, |existing| {
        existing.map(|mut record| {
            found = true;
            record.user_confirmed = Some(true);
            record
        })
    })?;

    if found {
        tracing::info!("Confirmed trigger {:?} for user {}", food, user);
    }
    Ok(found)
}

/// Delete a trigger record. A later re-trigger starts evidence from zero.
pub fn dismiss_trigger<S: TriggerStore>(store: &S, user: &str, food: &str) -> Result<bool> {
    let removed = store.remove_trigger(user, food)?;
    if removed {
        tracing::info!("Dismissed trigger {:?} for user {}", food, user);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileTriggerStore;

    fn store() -> (tempfile::TempDir, FileTriggerStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTriggerStore::new(dir.path());
        (dir, store)
    }

    fn seed(
        store: &FileTriggerStore,
        food: &str,
        bad: u32,
        good: u32,
        confidence: Confidence,
        confirmed: Option<bool>,
    ) {
        store
            .update_trigger("alice", food, |_| {
                let mut r = TriggerRecord::new(food);
                r.bad_occurrences = bad;
                r.good_occurrences = good;
                r.confidence = confidence;
                r.user_confirmed = confirmed;
                Some(r)
            })
            .unwrap();
    }

    #[test]
    fn test_list_filters_unevidenced_records() {
        let (_dir, store) = store();

        seed(&store, "garlic", 3, 1, Confidence::Low, None);
        seed(&store, "rice", 1, 0, Confidence::None, None);

        let listed = list_triggers(&store, "alice").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].food_name, "garlic");
    }

    #[test]
    fn test_list_includes_confirmed_none_tier() {
        let (_dir, store) = store();

        seed(&store, "garlic", 1, 0, Confidence::None, Some(true));

        let listed = list_triggers(&store, "alice").unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_list_ordering() {
        let (_dir, store) = store();

        seed(&store, "onion", 5, 1, Confidence::Medium, None);
        seed(&store, "garlic", 9, 1, Confidence::High, None);
        seed(&store, "beans", 3, 1, Confidence::Low, None);
        seed(&store, "wheat", 1, 0, Confidence::None, Some(true));

        let listed = list_triggers(&store, "alice").unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.food_name.as_str()).collect();
        assert_eq!(names, ["garlic", "onion", "beans", "wheat"]);
    }

    #[test]
    fn test_ties_broken_by_bad_occurrences() {
        let (_dir, store) = store();

        seed(&store, "onion", 4, 1, Confidence::Low, None);
        seed(&store, "beans", 3, 1, Confidence::Low, None);

        let listed = list_triggers(&store, "alice").unwrap();
        assert_eq!(listed[0].food_name, "onion");
        assert_eq!(listed[1].food_name, "beans");
    }

    #[test]
    fn test_equal_evidence_ordered_by_food_name() {
        let (_dir, store) = store();

        seed(&store, "onion", 3, 1, Confidence::Low, None);
        seed(&store, "beans", 3, 1, Confidence::Low, None);
        seed(&store, "garlic", 3, 1, Confidence::Low, None);

        let listed = list_triggers(&store, "alice").unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.food_name.as_str()).collect();
        assert_eq!(names, ["beans", "garlic", "onion"]);
    }

    #[test]
    fn test_confirm_existing_record() {
        let (_dir, store) = store();

        seed(&store, "garlic", 3, 1, Confidence::Low, None);
        assert!(confirm_trigger(&store, "alice", "garlic").unwrap());

        let records = store.load_triggers("alice").unwrap();
        assert_eq!(records[0].user_confirmed, Some(true));
    }

    #[test]
    fn test_confirm_missing_record_is_false() {
        let (_dir, store) = store();
        assert!(!confirm_trigger(&store, "alice", "nothing").unwrap());
        assert!(store.load_triggers("alice").unwrap().is_empty());
    }

    #[test]
    fn test_dismiss_deletes_record() {
        let (_dir, store) = store();

        seed(&store, "garlic", 3, 1, Confidence::Low, None);
        assert!(dismiss_trigger(&store, "alice", "garlic").unwrap());
        assert!(list_triggers(&store, "alice").unwrap().is_empty());
        assert!(store.load_triggers("alice").unwrap().is_empty());

        // Second dismiss finds nothing
        assert!(!dismiss_trigger(&store, "alice", "garlic").unwrap());
    }
}
