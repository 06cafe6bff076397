//! Loading deck items from a JSON file and watching it for changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::mpsc;

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ItemsError {
    #[error("failed to read items from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse items in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("timed out reading items from {} after {}s", path.display(), timeout.as_secs())]
    Timeout { path: PathBuf, timeout: Duration },
}

/// Accepts either a bare array or `{ "items": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemFile<T> {
    List(Vec<T>),
    Wrapped { items: Vec<T> },
}

pub fn parse_items<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<Vec<T>, ItemsError> {
    match serde_json::from_str::<ItemFile<T>>(raw) {
        Ok(ItemFile::List(items) | ItemFile::Wrapped { items }) => Ok(items),
        Err(source) => Err(ItemsError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn read_raw(path: &Path, timeout: Duration) -> Result<String, ItemsError> {
    match tokio::time::timeout(timeout, tokio::fs::read_to_string(path)).await {
        Ok(Ok(raw)) => Ok(raw),
        Ok(Err(source)) => Err(ItemsError::Read {
            path: path.to_path_buf(),
            source,
        }),
        Err(_) => Err(ItemsError::Timeout {
            path: path.to_path_buf(),
            timeout,
        }),
    }
}

/// Re-read `path` every [`POLL_INTERVAL`] and send the parsed list whenever
/// the file content changes. Failed reads are logged and retried on the
/// next poll. Stops when the receiver is dropped.
pub fn spawn_watcher<T>(path: PathBuf, initial: String) -> mpsc::Receiver<Vec<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut last = initial;
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }
            let raw = match read_raw(&path, READ_TIMEOUT).await {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!("{err}");
                    continue;
                }
            };
            if raw == last {
                continue;
            }
            match parse_items::<T>(&path, &raw) {
                Ok(items) => {
                    tracing::info!(count = items.len(), path = %path.display(), "Items file changed");
                    last = raw;
                    if tx.send(items).await.is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!("{err}"),
            }
        }
    });
    rx
}

/// Read the file once, returning the items and the raw text for change detection.
pub async fn load_items<T: DeserializeOwned>(
    path: &Path,
) -> Result<(Vec<T>, String), ItemsError> {
    let raw = read_raw(path, READ_TIMEOUT).await?;
    let items = parse_items(path, &raw)?;
    Ok((items, raw))
}
