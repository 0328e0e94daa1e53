use crate::errors::AppError;
use crate::gateway::{self, Metric};
use crate::history;
use crate::models::{
    ChangesResponse, EntryRequest, EntryResponse, GoalsRequest, GoalsResponse,
    MonthHistoryResponse, MonthsResponse, QuickAddRequest, StatsResponse, TodaySnapshot, UserData,
};
use crate::state::AppState;
use crate::stats;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const CHANGES_POLL_TIMEOUT: Duration = Duration::from_secs(25);

pub async fn get_today(State(state): State<AppState>) -> Json<TodaySnapshot> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Json(stats::today_snapshot(&data.entries, &data.goals, today))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Json(StatsResponse {
        weekly_average: stats::weekly_average(&data.entries, today),
        trend: stats::trend_series(&data.entries, today),
    })
}

pub async fn get_months(State(state): State<AppState>) -> Json<MonthsResponse> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Json(MonthsResponse {
        months: history::available_months(&data.entries, today),
    })
}

pub async fn get_month_history(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Json<MonthHistoryResponse> {
    let data = state.data.lock().await;
    let entries = history::entries_for_month(&data.entries, &month);
    Json(MonthHistoryResponse { month, entries })
}

pub async fn get_goals(State(state): State<AppState>) -> Json<GoalsResponse> {
    let data = state.data.lock().await;
    Json(GoalsResponse {
        water_goal: data.goals.water_goal,
        protein_goal: data.goals.protein_goal,
    })
}

pub async fn submit_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let today = state.clock.today();
    let date = payload.date.clone();

    // Mutate under the lock, then persist from a snapshot so an incoming
    // remote replacement never races a held lock.
    let (entry, snapshot) = {
        let mut data = state.data.lock().await;
        let entry = gateway::submit_entry(&mut data.entries, &date, payload.into_patch(), today)?;
        (entry, data.clone())
    };

    let persisted = persist_entry(&state, &snapshot, &date).await;
    state.notify_change();
    Ok(Json(EntryResponse::new(date, entry, persisted)))
}

pub async fn quick_add(
    State(state): State<AppState>,
    Json(payload): Json<QuickAddRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let metric = Metric::parse(&payload.metric)?;
    let today = state.clock.today();
    let date = crate::dates::date_key(today);

    let (entry, snapshot) = {
        let mut data = state.data.lock().await;
        let entry = gateway::quick_add(&mut data.entries, metric, payload.amount, today)?;
        (entry, data.clone())
    };

    let persisted = persist_entry(&state, &snapshot, &date).await;
    state.notify_change();
    Ok(Json(EntryResponse::new(date, entry, persisted)))
}

pub async fn update_goals(
    State(state): State<AppState>,
    Json(payload): Json<GoalsRequest>,
) -> Result<Json<GoalsResponse>, AppError> {
    let (goals, snapshot) = {
        let mut data = state.data.lock().await;
        let goals =
            gateway::update_goals(&mut data.goals, payload.water_goal, payload.protein_goal);
        (goals, data.clone())
    };

    if let Err(err) = state.storage.save_goals(&snapshot).await {
        warn!("failed to persist goals: {}", err.message);
    }
    state.notify_change();
    Ok(Json(GoalsResponse {
        water_goal: goals.water_goal,
        protein_goal: goals.protein_goal,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ChangesQuery {
    #[serde(default)]
    pub since: u64,
}

/// Long-poll change notification: resolves once the store revision exceeds
/// `since`, or with the current revision after a timeout. The rendering
/// layer re-queries the derived views whenever the revision moves.
pub async fn get_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Json<ChangesResponse> {
    let mut receiver = state.subscribe();
    let wait = async {
        loop {
            let revision = *receiver.borrow_and_update();
            if revision > query.since {
                return revision;
            }
            if receiver.changed().await.is_err() {
                return revision;
            }
        }
    };

    let revision = match tokio::time::timeout(CHANGES_POLL_TIMEOUT, wait).await {
        Ok(revision) => revision,
        Err(_) => state.current_revision(),
    };
    Json(ChangesResponse { revision })
}

/// The mutation already succeeded locally; a save failure becomes a warning
/// and `persisted: false` in the response, never a rollback.
async fn persist_entry(state: &AppState, snapshot: &UserData, date: &str) -> bool {
    match state.storage.save_entry(snapshot, date).await {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to persist entry for {date}: {}", err.message);
            false
        }
    }
}
