//! Per-user append-only event journal.
//!
//! Meals and gut moments are appended to JSONL (JSON Lines) files with
//! file locking for safe concurrent access. Corrupt lines are skipped with
//! a warning rather than failing the whole read.

use crate::{GutMoment, Meal, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// JSONL-backed journal rooted at a data directory.
///
/// Layout: `<root>/users/<user>/meals.jsonl` and `moments.jsonl`.
#[derive(Clone, Debug)]
pub struct Journal {
    root: PathBuf,
}

impl Journal {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn user_dir(&self, user: &str) -> PathBuf {
        self.root.join("users").join(user)
    }

    pub fn meals_path(&self, user: &str) -> PathBuf {
        self.user_dir(user).join("meals.jsonl")
    }

    pub fn moments_path(&self, user: &str) -> PathBuf {
        self.user_dir(user).join("moments.jsonl")
    }

    /// Meals logged within `[from, to]`, oldest first
    pub fn meals_between(
        &self,
        user: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Meal>> {
        let mut meals: Vec<Meal> = read_lines(&self.meals_path(user))?
            .into_iter()
            .filter(|m: &Meal| m.logged_at >= from && m.logged_at <= to)
            .collect();
        meals.sort_by_key(|m| m.logged_at);
        Ok(meals)
    }

    /// Gut moments logged at or after `from`, newest first
    pub fn moments_since(&self, user: &str, from: DateTime<Utc>) -> Result<Vec<GutMoment>> {
        let mut moments: Vec<GutMoment> = read_lines(&self.moments_path(user))?
            .into_iter()
            .filter(|m: &GutMoment| m.logged_at >= from)
            .collect();
        moments.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        Ok(moments)
    }

    pub fn append_meal(&self, user: &str, meal: &Meal) -> Result<()> {
        append_line(&self.meals_path(user), meal)?;
        tracing::debug!("Appended meal {} for user {}", meal.id, user);
        Ok(())
    }

    pub fn append_moment(&self, user: &str, moment: &GutMoment) -> Result<()> {
        append_line(&self.moments_path(user), moment)?;
        tracing::debug!("Appended gut moment {} for user {}", moment.id, user);
        Ok(())
    }
}

/// Append one event as a JSON line under an exclusive lock
fn append_line<T: Serialize>(path: &Path, event: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let mut writer = std::io::BufWriter::new(&file);
    let line = serde_json::to_string(event)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    file.unlock()?;
    Ok(())
}

/// Read all events from a JSONL file under a shared lock.
///
/// Missing file reads as empty. Unparseable lines are skipped with a warning.
fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(event) => events.push(event),
            Err(e) => {
                tracing::warn!(
                    "Skipping unparseable journal line {} in {:?}: {}",
                    line_num + 1,
                    path,
                    e
                );
            }
        }
    }

    file.unlock()?;
    Ok(events)
}
