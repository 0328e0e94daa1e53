use crate::dates::is_editable_day;
use crate::models::{
    DEFAULT_PROTEIN_GOAL, DEFAULT_WATER_GOAL, Entry, EntryPatch, EntryStore, Goals,
};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Only the current calendar day may be mutated.
    EditWindow { date: String },
    /// Quick-add amounts must be strictly positive.
    InvalidAmount(i64),
    InvalidMetric(String),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::EditWindow { date } => {
                write!(f, "only today's entry can be edited, not {date}")
            }
            EntryError::InvalidAmount(amount) => {
                write!(f, "amount must be positive, got {amount}")
            }
            EntryError::InvalidMetric(metric) => {
                write!(f, "metric must be 'water' or 'protein', got '{metric}'")
            }
        }
    }
}

impl std::error::Error for EntryError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Water,
    Protein,
}

impl Metric {
    pub fn parse(value: &str) -> Result<Self, EntryError> {
        match value.trim() {
            "water" => Ok(Metric::Water),
            "protein" => Ok(Metric::Protein),
            other => Err(EntryError::InvalidMetric(other.to_string())),
        }
    }
}

/// Applies a partial edit to the entry at `date`, enforcing the edit window.
/// Fields absent from the patch keep their prior value.
pub fn submit_entry(
    store: &mut EntryStore,
    date: &str,
    patch: EntryPatch,
    today: NaiveDate,
) -> Result<Entry, EntryError> {
    if !is_editable_day(date, today) {
        return Err(EntryError::EditWindow {
            date: date.to_string(),
        });
    }
    Ok(store.upsert(date, patch))
}

/// Adds `amount` to today's value for the metric. Always targets today, so
/// the edit window cannot be violated here.
pub fn quick_add(
    store: &mut EntryStore,
    metric: Metric,
    amount: i64,
    today: NaiveDate,
) -> Result<Entry, EntryError> {
    if amount <= 0 {
        return Err(EntryError::InvalidAmount(amount));
    }
    let amount = u32::try_from(amount).map_err(|_| EntryError::InvalidAmount(amount))?;

    let key = crate::dates::date_key(today);
    let current = store.get(&key);
    let patch = match metric {
        Metric::Water => EntryPatch {
            water: Some(current.water.saturating_add(amount)),
            ..EntryPatch::default()
        },
        Metric::Protein => EntryPatch {
            protein: Some(current.protein.saturating_add(amount)),
            ..EntryPatch::default()
        },
    };
    Ok(store.upsert(&key, patch))
}

/// Replaces the goals wholesale. Non-positive or missing values fall back to
/// the defaults instead of failing; entry mutations are strict, goals are not.
pub fn update_goals(goals: &mut Goals, water_goal: Option<i64>, protein_goal: Option<i64>) -> Goals {
    goals.water_goal = sanitize_goal(water_goal, DEFAULT_WATER_GOAL);
    goals.protein_goal = sanitize_goal(protein_goal, DEFAULT_PROTEIN_GOAL);
    goals.clone()
}

fn sanitize_goal(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => u32::try_from(v).unwrap_or(default),
        _ => default,
    }
}
