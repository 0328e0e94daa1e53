use crate::dates::{date_key, trailing_window};
use crate::models::{EntryStore, Goals, TodaySnapshot, TrendPoint, WeeklyAverage};
use chrono::NaiveDate;

const WEEKLY_WINDOW: u32 = 7;
const TREND_WINDOW: u32 = 30;

/// Progress toward a goal, clamped to `[0, 100]`. A zero goal reads as 0
/// rather than dividing; goals are validated positive at the settings
/// boundary but the engine must not trust that.
pub fn percentage(value: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(goal) * 100.0).min(100.0)
}

/// Today's totals against the current goals.
pub fn today_snapshot(store: &EntryStore, goals: &Goals, today: NaiveDate) -> TodaySnapshot {
    let key = date_key(today);
    let entry = store.get(&key);
    TodaySnapshot {
        water_pct: percentage(entry.water, goals.water_goal),
        protein_pct: percentage(entry.protein, goals.protein_goal),
        date: key,
        water: entry.water,
        protein: entry.protein,
        notes: entry.notes,
        water_goal: goals.water_goal,
        protein_goal: goals.protein_goal,
    }
}

/// Rolling 7-day average over logged days only: days with neither metric
/// recorded are excluded from both the sums and the divisor.
pub fn weekly_average(store: &EntryStore, today: NaiveDate) -> WeeklyAverage {
    let mut water_total = 0u64;
    let mut protein_total = 0u64;
    let mut days_counted = 0u8;

    for date in trailing_window(WEEKLY_WINDOW, today) {
        let entry = store.get(&date_key(date));
        if entry.is_logged() {
            water_total += u64::from(entry.water);
            protein_total += u64::from(entry.protein);
            days_counted += 1;
        }
    }

    if days_counted == 0 {
        return WeeklyAverage {
            avg_water: 0,
            avg_protein: 0,
            days_counted: 0,
        };
    }

    let denom = f64::from(days_counted);
    WeeklyAverage {
        avg_water: (water_total as f64 / denom).round() as u32,
        avg_protein: (protein_total as f64 / denom).round() as u32,
        days_counted,
    }
}

/// Dense 30-day series, oldest first, zero-filled for unlogged days.
pub fn trend_series(store: &EntryStore, today: NaiveDate) -> Vec<TrendPoint> {
    trend_series_over(store, today, TREND_WINDOW)
}

fn trend_series_over(store: &EntryStore, today: NaiveDate, window: u32) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(window as usize);
    for date in trailing_window(window, today) {
        let key = date_key(date);
        let entry = store.get(&key);
        points.push(TrendPoint {
            date: key,
            water: entry.water,
            protein: entry.protein,
        });
    }
    points
}
