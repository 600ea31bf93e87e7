//! File-backed session store
//!
//! Persists the [`SessionRecord`] as JSON and exposes its three fields as
//! observable `watch` channels. Writers serialize through an internal
//! mutex; observers are only notified after the file write has succeeded,
//! so the channels never get ahead of durable state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lnxauth_core::{domain::SessionRecord, ports::ISessionStore};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Session store backed by a JSON file
///
/// The file is rewritten whole on every change: serialized to a sibling
/// temp file, then renamed over the target, giving single-write atomicity.
/// A missing file reads as the signed-out defaults; a record that violates
/// the signed-out invariant is normalized (and logged) rather than trusted.
pub struct FilePreferenceStore {
    /// Path of the session record file
    path: PathBuf,
    /// Serializes writers; the watch senders are the in-memory truth
    write_lock: Mutex<()>,
    logged_in: watch::Sender<bool>,
    user_name: watch::Sender<String>,
    user_email: watch::Sender<String>,
}

impl FilePreferenceStore {
    /// Opens the store at `path`, reading the current record if present
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = Self::read_record(&path).await?;

        debug!(path = %path.display(), state = %record, "Opened preference store");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            logged_in: watch::channel(record.logged_in).0,
            user_name: watch::channel(record.user_name).0,
            user_email: watch::channel(record.user_email).0,
        })
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and normalizes the persisted record
    async fn read_record(path: &Path) -> Result<SessionRecord> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionRecord::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read session file: {}", path.display()));
            }
        };

        let record: SessionRecord = serde_json::from_str(&content)
            .with_context(|| format!("Malformed session file: {}", path.display()))?;

        if record.is_consistent() {
            Ok(record)
        } else {
            warn!(
                path = %path.display(),
                "Signed-out session record retained an identity, normalizing"
            );
            Ok(SessionRecord::default())
        }
    }

    /// Writes `record` durably: temp file in the same directory, then rename
    async fn persist(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(record).context("Failed to serialize record")?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace session file: {}", self.path.display()))?;

        Ok(())
    }

    /// Publishes `record` to the three field channels
    fn publish(&self, record: &SessionRecord) {
        self.logged_in.send_replace(record.logged_in);
        self.user_name.send_replace(record.user_name.clone());
        self.user_email.send_replace(record.user_email.clone());
    }
}

#[async_trait::async_trait]
impl ISessionStore for FilePreferenceStore {
    fn logged_in(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    fn user_name(&self) -> watch::Receiver<String> {
        self.user_name.subscribe()
    }

    fn user_email(&self) -> watch::Receiver<String> {
        self.user_email.subscribe()
    }

    async fn save(&self, name: &str, email: &str) -> Result<()> {
        let _write = self.write_lock.lock().await;

        let record = SessionRecord::signed_in(name, email);
        self.persist(&record).await?;
        self.publish(&record);

        info!(name, email, "Saved signed-in session record");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _write = self.write_lock.lock().await;

        let record = SessionRecord::signed_out();
        self.persist(&record).await?;
        self.publish(&record);

        info!("Cleared session record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::open(dir.path().join("session.json"))
            .await
            .unwrap();

        assert!(!*store.logged_in().borrow());
        assert_eq!(*store.user_name().borrow(), "");
        assert_eq!(*store.user_email().borrow(), "");
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        assert!(FilePreferenceStore::open(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_open_normalizes_inconsistent_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(
            &path,
            br#"{"logged_in": false, "user_name": "Ada", "user_email": "ada@example.com"}"#,
        )
        .await
        .unwrap();

        let store = FilePreferenceStore::open(&path).await.unwrap();
        assert!(!*store.logged_in().borrow());
        assert_eq!(*store.user_name().borrow(), "");
        assert_eq!(*store.user_email().borrow(), "");
    }
}
