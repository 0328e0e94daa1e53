use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/history/months", get(handlers::get_months))
        .route("/api/history/:month", get(handlers::get_month_history))
        .route("/api/goals", get(handlers::get_goals))
        .route("/api/goals", put(handlers::update_goals))
        .route("/api/entry", post(handlers::submit_entry))
        .route("/api/quick-add", post(handlers::quick_add))
        .route("/api/changes", get(handlers::get_changes))
        .with_state(state)
}
