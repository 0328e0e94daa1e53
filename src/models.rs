use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_WATER_GOAL: u32 = 3000;
pub const DEFAULT_PROTEIN_GOAL: u32 = 160;

/// One calendar day's logged intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Entry {
    #[serde(default)]
    pub water: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub notes: String,
}

impl Entry {
    /// A day counts as logged once either metric is non-zero.
    pub fn is_logged(&self) -> bool {
        self.water > 0 || self.protein > 0
    }
}

/// Partial update for an entry; absent fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub water: Option<u32>,
    pub protein: Option<u32>,
    pub notes: Option<String>,
}

/// Daily targets. Persisted as a single record, independent of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "default_water_goal")]
    pub water_goal: u32,
    #[serde(default = "default_protein_goal")]
    pub protein_goal: u32,
}

fn default_water_goal() -> u32 {
    DEFAULT_WATER_GOAL
}

fn default_protein_goal() -> u32 {
    DEFAULT_PROTEIN_GOAL
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            water_goal: DEFAULT_WATER_GOAL,
            protein_goal: DEFAULT_PROTEIN_GOAL,
        }
    }
}

/// Date-keyed working set for the session. Mutated only through the
/// gateway operations; rendering code reads derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntryStore {
    entries: BTreeMap<String, Entry>,
}

impl EntryStore {
    pub fn new(entries: BTreeMap<String, Entry>) -> Self {
        Self { entries }
    }

    /// Stored entry for the key, or a zero-valued one if absent. Never fails.
    pub fn get(&self, key: &str) -> Entry {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Bulk replacement, used on load and on remote-change refresh.
    pub fn replace_all(&mut self, entries: BTreeMap<String, Entry>) {
        self.entries = entries;
    }

    /// Merges the patch into the entry at `key` (synthesizing a zero entry
    /// when absent) and stores the result.
    pub fn upsert(&mut self, key: &str, patch: EntryPatch) -> Entry {
        let entry = self.entries.entry(key.to_string()).or_default();
        if let Some(water) = patch.water {
            entry.water = water;
        }
        if let Some(protein) = patch.protein {
            entry.protein = protein;
        }
        if let Some(notes) = patch.notes {
            entry.notes = notes;
        }
        entry.clone()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the repository persists for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserData {
    #[serde(default)]
    pub entries: EntryStore,
    #[serde(default)]
    pub goals: Goals,
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub date: String,
    pub water: Option<u32>,
    pub protein: Option<u32>,
    pub notes: Option<String>,
}

impl EntryRequest {
    pub fn into_patch(self) -> EntryPatch {
        EntryPatch {
            water: self.water,
            protein: self.protein,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    pub metric: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct GoalsRequest {
    pub water_goal: Option<i64>,
    pub protein_goal: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub date: String,
    pub water: u32,
    pub protein: u32,
    pub notes: String,
    pub persisted: bool,
}

impl EntryResponse {
    pub fn new(date: String, entry: Entry, persisted: bool) -> Self {
        Self {
            date,
            water: entry.water,
            protein: entry.protein,
            notes: entry.notes,
            persisted,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodaySnapshot {
    pub date: String,
    pub water: u32,
    pub protein: u32,
    pub notes: String,
    pub water_goal: u32,
    pub protein_goal: u32,
    pub water_pct: f64,
    pub protein_pct: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyAverage {
    pub avg_water: u32,
    pub avg_protein: u32,
    pub days_counted: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub water: u32,
    pub protein: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub weekly_average: WeeklyAverage,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthsResponse {
    pub months: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthEntry {
    pub date: String,
    pub water: u32,
    pub protein: u32,
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthHistoryResponse {
    pub month: String,
    pub entries: Vec<MonthEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub water_goal: u32,
    pub protein_goal: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangesResponse {
    pub revision: u64,
}
