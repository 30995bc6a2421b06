//! Onboarding profile reader.
//!
//! The onboarding questionnaire runs in a separate surface; its output is
//! consumed here as a read-only JSON file seeding the score blend before
//! behavioural data exists.

use crate::{OnboardingProfile, Result};
use std::path::Path;

/// Load the onboarding profile from a JSON file.
///
/// Returns None when the file doesn't exist (user skipped onboarding).
/// An unreadable or malformed file is logged and treated as absent rather
/// than failing the caller.
pub fn load_profile(path: &Path) -> Result<Option<OnboardingProfile>> {
    if !path.exists() {
        tracing::debug!("No onboarding profile at {:?}", path);
        return Ok(None);
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read profile at {:?}: {}. Ignoring.", path, e);
            return Ok(None);
        }
    };

    match serde_json::from_str::<OnboardingProfile>(&contents) {
        Ok(profile) => {
            tracing::info!(
                "Loaded onboarding profile (baseline {})",
                profile.baseline_score
            );
            Ok(Some(profile))
        }
        Err(e) => {
            tracing::warn!("Failed to parse profile at {:?}: {}. Ignoring.", path, e);
            Ok(None)
        }
    }
}
