use crate::dates::{month_key, month_of};
use crate::models::{EntryStore, MonthEntry};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Every month with at least one stored entry, plus the current month even
/// when it is empty, most recent first.
pub fn available_months(store: &EntryStore, today: NaiveDate) -> Vec<String> {
    let mut months: BTreeSet<String> = store
        .keys()
        .map(|key| month_of(key).to_string())
        .collect();
    months.insert(month_key(today));
    months.into_iter().rev().collect()
}

/// Stored entries for the given `YYYY-MM` month, newest first. Days without
/// a stored record are omitted; only the trend series zero-fills.
pub fn entries_for_month(store: &EntryStore, month: &str) -> Vec<MonthEntry> {
    let mut entries: Vec<MonthEntry> = store
        .iter()
        .filter(|(key, _)| month_of(key) == month)
        .map(|(key, entry)| MonthEntry {
            date: key.to_string(),
            water: entry.water,
            protein: entry.protein,
            notes: entry.notes.clone(),
        })
        .collect();
    entries.reverse();
    entries
}
