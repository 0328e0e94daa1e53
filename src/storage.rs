use crate::errors::AppError;
use crate::models::UserData;
use crate::state::AppState;
use std::{env, path::Path, path::PathBuf, time::Duration, time::SystemTime};
use tokio::fs;
use tracing::{debug, error};

const DEFAULT_SYNC_POLL_SECS: u64 = 2;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/intake.json"))
}

/// JSON file holding one user's entries and goals.
#[derive(Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load failures fall back to empty data rather than blocking startup.
    pub async fn load(&self) -> UserData {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    UserData::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => UserData::default(),
            Err(err) => {
                error!("failed to read data file: {err}");
                UserData::default()
            }
        }
    }

    pub async fn persist(&self, data: &UserData) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
        fs::write(&self.path, payload).await.map_err(AppError::internal)?;
        Ok(())
    }

    async fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).await.ok()?.modified().ok()
    }
}

/// One persistence capability, two deployment variants. `Local` is a plain
/// on-device file; `Synced` assumes the file is rewritten externally (another
/// device syncing the same account) and gets a change watcher at startup.
#[derive(Clone)]
pub enum Repository {
    Local(FileRepository),
    Synced(FileRepository),
}

impl Repository {
    /// `APP_SYNC_WATCH=1` selects the synced variant.
    pub fn from_env() -> Result<Self, std::io::Error> {
        let file = FileRepository::new(resolve_data_path()?);
        let synced = env::var("APP_SYNC_WATCH").is_ok_and(|value| value == "1");
        Ok(if synced {
            Repository::Synced(file)
        } else {
            Repository::Local(file)
        })
    }

    fn file(&self) -> &FileRepository {
        match self {
            Repository::Local(file) | Repository::Synced(file) => file,
        }
    }

    pub fn path(&self) -> &Path {
        self.file().path()
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, Repository::Synced(_))
    }

    pub async fn load(&self) -> UserData {
        self.file().load().await
    }

    pub async fn save_entry(&self, data: &UserData, date: &str) -> Result<(), AppError> {
        debug!("persisting entry for {date}");
        self.file().persist(data).await
    }

    pub async fn save_goals(&self, data: &UserData) -> Result<(), AppError> {
        debug!("persisting goals");
        self.file().persist(data).await
    }
}

pub fn sync_poll_interval() -> Duration {
    let secs = env::var("APP_SYNC_POLL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SYNC_POLL_SECS);
    Duration::from_secs(secs.max(1))
}

/// Polls the data file for external rewrites and pushes fresh snapshots into
/// the session. The incoming snapshot replaces local data unconditionally;
/// content is diffed first so our own writes do not trigger refresh storms.
pub fn spawn_remote_watch(state: AppState, poll_interval: Duration) {
    tokio::spawn(async move {
        let mut last_seen = state.storage.file().modified().await;
        loop {
            tokio::time::sleep(poll_interval).await;

            let Some(modified) = state.storage.file().modified().await else {
                continue;
            };
            if last_seen == Some(modified) {
                continue;
            }
            last_seen = Some(modified);

            let incoming = state.storage.load().await;
            if !state.replace_data(incoming).await {
                debug!("data file touched but content unchanged");
            }
        }
    });
}
