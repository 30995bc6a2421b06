//! Core domain types for the gut-health tracking engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Meal and gut moment event records
//! - Trigger evidence aggregates and confidence tiers
//! - Health scores and breakdowns
//! - The onboarding profile consumed as a read-only input

use crate::scales::{BristolType, PainScore, Urgency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Meal Types
// ============================================================================

/// Which meal of the day an entry belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A logged meal. Immutable once created; `update` produces a superseding
/// copy rather than mutating in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub meal_type: MealType,
    pub foods: Vec<String>,
    pub normalized_foods: Option<Vec<String>>,
}

impl Meal {
    pub fn new(logged_at: DateTime<Utc>, meal_type: MealType, foods: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at,
            meal_type,
            foods,
            normalized_foods: None,
        }
    }

    /// Food names to use for correlation: normalized names when the food
    /// analyzer has run, raw names otherwise.
    pub fn foods_for_analysis(&self) -> &[String] {
        self.normalized_foods.as_deref().unwrap_or(&self.foods)
    }

    /// Produce a superseding version of this meal with a fresh id.
    pub fn update(&self, foods: Vec<String>, normalized_foods: Option<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: self.logged_at,
            meal_type: self.meal_type,
            foods,
            normalized_foods,
        }
    }
}

// ============================================================================
// Gut Moment Types
// ============================================================================

/// Symptom flags captured on a gut moment
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Symptoms {
    pub bloating: bool,
    pub gas: bool,
    pub cramping: bool,
    pub nausea: bool,
}

impl Symptoms {
    pub fn any(&self) -> bool {
        self.bloating || self.gas || self.cramping || self.nausea
    }

    /// Names of the symptoms currently set, in a fixed order
    pub fn active_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.bloating {
            names.push("bloating".to_string());
        }
        if self.gas {
            names.push("gas".to_string());
        }
        if self.cramping {
            names.push("cramping".to_string());
        }
        if self.nausea {
            names.push("nausea".to_string());
        }
        names
    }
}

/// Observational tags on a gut moment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MomentTag {
    Strain,
    Blood,
    Mucus,
    Urgency,
}

/// A logged gut moment. Immutable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GutMoment {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub bristol: Option<BristolType>,
    #[serde(default)]
    pub symptoms: Symptoms,
    #[serde(default)]
    pub tags: Vec<MomentTag>,
    pub urgency: Option<Urgency>,
    pub pain: Option<PainScore>,
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
    pub incomplete_evacuation: Option<bool>,
}

impl GutMoment {
    pub fn new(logged_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at,
            bristol: None,
            symptoms: Symptoms::default(),
            tags: Vec::new(),
            urgency: None,
            pain: None,
            notes: None,
            duration_minutes: None,
            incomplete_evacuation: None,
        }
    }
}

/// The explicit bad-outcome predicate used by the correlation engine.
///
/// A moment counts as a negative outcome when any symptom flag is set,
/// the Bristol type is in the concerning band (1, 6, 7), urgency is
/// severe, or blood was observed.
pub fn is_bad_outcome(moment: &GutMoment) -> bool {
    moment.symptoms.any()
        || moment.bristol.is_some_and(|b| b.is_concerning())
        || moment.urgency == Some(Urgency::Severe)
        || moment.tags.contains(&MomentTag::Blood)
}

// ============================================================================
// Trigger Evidence Types
// ============================================================================

/// Evidence strength bucket for a trigger food.
///
/// Ordered: None < Low < Medium < High.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

/// Per-food evidence aggregate for one user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TriggerRecord {
    pub food_name: String,
    pub bad_occurrences: u32,
    pub good_occurrences: u32,
    pub confidence: Confidence,
    /// Some(true) = user confirmed (frozen), Some(false) = user rejected,
    /// None = automatic tracking only. Dismissal deletes the record outright
    /// rather than setting Some(false), so evidence restarts from zero if
    /// the food re-triggers.
    pub user_confirmed: Option<bool>,
    /// Symptom names observed during bad occurrences
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
}

impl TriggerRecord {
    pub fn new(food_name: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            bad_occurrences: 0,
            good_occurrences: 0,
            confidence: Confidence::None,
            user_confirmed: None,
            symptoms: BTreeSet::new(),
        }
    }

    /// Confirmed verdicts are frozen against automatic updates
    pub fn is_frozen(&self) -> bool {
        self.user_confirmed == Some(true)
    }
}

// ============================================================================
// Health Score Types
// ============================================================================

/// Letter grade derived from a score value
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Sus,
    Poor,
}

/// Component breakdown of a calculated score
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// 0-40
    pub bristol: u8,
    /// 0-30
    pub symptoms: u8,
    /// 0-20
    pub regularity: u8,
    /// 0-10
    pub medical: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.bristol + self.symptoms + self.regularity + self.medical
    }
}

/// A blended 0-100 gut health score. Always derived on demand, never
/// persisted as mutable state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthScore {
    pub value: u8,
    pub grade: HealthGrade,
    pub breakdown: Option<ScoreBreakdown>,
    pub is_baseline: bool,
}

// ============================================================================
// Onboarding Profile
// ============================================================================

/// Read-only output of the onboarding questionnaire, consumed as the seed
/// for score blending before behavioural data exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub condition: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub baseline_score: u8,
}
