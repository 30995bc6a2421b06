//! Clinical value objects: Bristol stool types, pain scores, urgency.
//!
//! These are small immutable classifiers that bucket raw numeric or
//! categorical input into domain terms. Strict constructors fail fast on
//! out-of-range input; `clamped` variants exist for untrusted sources
//! (external API output, hand-edited files).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Bristol Stool Scale
// ============================================================================

/// A validated Bristol stool type (1..=7)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BristolType(u8);

/// Clinical class of a Bristol type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BristolClass {
    Constipation,
    Normal,
    Diarrhea,
}

/// Scoring band for a Bristol type.
///
/// Three categorical buckets, deliberately not a linear scale: types 3-4
/// earn full points, 2 and 5 are acceptable, everything else is concerning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BristolBand {
    Full,
    Acceptable,
    Concerning,
}

impl BristolBand {
    /// Fraction of the component maximum this band earns
    pub fn fraction(self) -> f64 {
        match self {
            BristolBand::Full => 1.0,
            BristolBand::Acceptable => 0.75,
            BristolBand::Concerning => 0.25,
        }
    }
}

impl BristolType {
    /// Strict constructor: fails on anything outside 1..=7
    pub fn new(raw: u8) -> Result<Self> {
        if (1..=7).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(Error::Validation(format!(
                "Bristol type must be 1..=7, got {}",
                raw
            )))
        }
    }

    /// Lenient constructor for untrusted input: clamps into 1..=7
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(1, 7) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn class(self) -> BristolClass {
        match self.0 {
            1 | 2 => BristolClass::Constipation,
            3..=5 => BristolClass::Normal,
            _ => BristolClass::Diarrhea,
        }
    }

    pub fn band(self) -> BristolBand {
        match self.0 {
            3 | 4 => BristolBand::Full,
            2 | 5 => BristolBand::Acceptable,
            _ => BristolBand::Concerning,
        }
    }

    /// True for types 1, 6 and 7
    pub fn is_concerning(self) -> bool {
        self.band() == BristolBand::Concerning
    }
}

// ============================================================================
// Pain Score
// ============================================================================

/// A validated pain score (0..=10)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PainScore(u8);

/// Severity bucket for a pain score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl PainScore {
    /// Strict constructor: fails on anything above 10
    pub fn new(raw: u8) -> Result<Self> {
        if raw <= 10 {
            Ok(Self(raw))
        } else {
            Err(Error::Validation(format!(
                "Pain score must be 0..=10, got {}",
                raw
            )))
        }
    }

    /// Lenient constructor for untrusted input: clamps into 0..=10
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, 10) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn severity(self) -> Severity {
        match self.0 {
            0 => Severity::None,
            1..=3 => Severity::Mild,
            4..=6 => Severity::Moderate,
            _ => Severity::Severe,
        }
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// Urgency reported alongside a gut moment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    None,
    Mild,
    Severe,
}

impl Urgency {
    /// Parse urgency from free-form input. Unknown strings map to None.
    pub fn parse_lenient(s: &str) -> Urgency {
        match s.trim().to_lowercase().as_str() {
            "mild" | "moderate" => Urgency::Mild,
            "severe" | "urgent" => Urgency::Severe,
            _ => Urgency::None,
        }
    }
}
