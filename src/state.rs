use crate::models::UserData;
use crate::storage::Repository;
use chrono::{Local, NaiveDate};
use std::{env, sync::Arc};
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};

/// Injected "current date" provider so the engine stays testable; the
/// canonical key is the local calendar day, never the UTC one.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }

    /// `APP_FIXED_TODAY=YYYY-MM-DD` pins the clock (used by the HTTP tests).
    pub fn from_env() -> Self {
        match env::var("APP_FIXED_TODAY") {
            Ok(value) => match value.parse::<NaiveDate>() {
                Ok(date) => Clock::Fixed(date),
                Err(err) => {
                    warn!("ignoring unparsable APP_FIXED_TODAY '{value}': {err}");
                    Clock::System
                }
            },
            Err(_) => Clock::System,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Repository,
    pub clock: Clock,
    pub data: Arc<Mutex<UserData>>,
    changes: watch::Sender<u64>,
}

impl AppState {
    pub fn new(storage: Repository, clock: Clock, data: UserData) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            storage,
            clock,
            data: Arc::new(Mutex::new(data)),
            changes,
        }
    }

    /// Bumps the revision observed by `/api/changes` subscribers. Called
    /// after every successful mutation and after a store replacement.
    pub fn notify_change(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn current_revision(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Remote replacement always wins: the incoming snapshot overwrites the
    /// session data unconditionally. Returns false when nothing changed, so
    /// redundant refresh notifications are skipped.
    pub async fn replace_data(&self, incoming: UserData) -> bool {
        let mut data = self.data.lock().await;
        if *data == incoming {
            return false;
        }
        info!(entries = incoming.entries.len(), "store refreshed from repository");
        *data = incoming;
        drop(data);
        self.notify_change();
        true
    }
}
