#![forbid(unsafe_code)]

//! Core domain model and business logic for the gutlog tracking system.
//!
//! This crate provides:
//! - Domain types (meals, gut moments, trigger records, health scores)
//! - Clinical value objects (Bristol scale, pain scores, urgency)
//! - The food-trigger correlation engine and confidence classifier
//! - Trigger aggregation with confirm/dismiss verdicts
//! - Health score blending from baseline and logged data
//! - Persistence (JSONL journal, locked trigger store, CSV export)

pub mod types;
pub mod error;
pub mod scales;
pub mod config;
pub mod logging;
pub mod confidence;
pub mod journal;
pub mod store;
pub mod correlation;
pub mod triggers;
pub mod score;
pub mod analyzer;
pub mod profile;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use scales::{BristolBand, BristolClass, BristolType, PainScore, Severity, Urgency};
pub use config::Config;
pub use confidence::classify;
pub use journal::Journal;
pub use store::{FileTriggerStore, TriggerStore};
pub use correlation::{attribute_moment, CORRELATION_WINDOW_HOURS};
pub use triggers::{confirm_trigger, dismiss_trigger, list_triggers};
pub use score::{blend, compute_health_score, grade_for, SCORE_WINDOW_DAYS};
pub use analyzer::{FoodAnalyzer, FoodAssessment, LocalNormalizer, SafetyTier};
pub use profile::load_profile;
pub use export::export_moments_csv;
