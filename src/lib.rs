pub mod app;
pub mod dates;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod history;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use state::{AppState, Clock};
pub use storage::{Repository, resolve_data_path, spawn_remote_watch, sync_poll_interval};
