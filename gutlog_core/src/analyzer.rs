//! Food analyzer seam.
//!
//! The real classifier (vision/LLM-backed, FODMAP-aware) lives outside
//! this crate; the engine treats it as a black box that returns a safety
//! tier and a normalized name per input string. `LocalNormalizer` is the
//! built-in stand-in: it canonicalizes names through a small alias table
//! and reports everything as safe.

use crate::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Safety tier reported by the analyzer
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTier {
    Safe,
    Caution,
    Avoid,
}

/// Per-food analyzer output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodAssessment {
    pub normalized_name: String,
    pub safety_tier: SafetyTier,
    pub explanation: Option<String>,
}

/// Opaque food classifier interface
pub trait FoodAnalyzer {
    fn analyze(&self, foods: &[String]) -> Result<Vec<FoodAssessment>>;
}

/// Common spelling/plural aliases, applied after lowercasing
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("onions", "onion"),
        ("garlic cloves", "garlic"),
        ("tomatoes", "tomato"),
        ("beans", "bean"),
        ("lentils", "lentil"),
        ("mushrooms", "mushroom"),
        ("apples", "apple"),
        ("eggs", "egg"),
    ])
});

/// Offline analyzer: normalizes names, never flags anything
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalNormalizer;

impl LocalNormalizer {
    fn normalize(name: &str) -> String {
        let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let lowered = collapsed.to_lowercase();
        ALIASES
            .get(lowered.as_str())
            .map(|canonical| canonical.to_string())
            .unwrap_or(lowered)
    }
}

impl FoodAnalyzer for LocalNormalizer {
    fn analyze(&self, foods: &[String]) -> Result<Vec<FoodAssessment>> {
        Ok(foods
            .iter()
            .map(|food| FoodAssessment {
                normalized_name: Self::normalize(food),
                safety_tier: SafetyTier::Safe,
                explanation: None,
            })
            .collect())
    }
}
