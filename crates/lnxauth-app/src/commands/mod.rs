//! CLI command implementations

pub mod session;

pub use session::{LoginCommand, LogoutCommand, StatusCommand};

use std::sync::Arc;

use anyhow::{Context, Result};
use lnxauth_core::config::Config;
use lnxauth_prefs::FilePreferenceStore;

/// Opens the session store at the configured preferences path
pub(crate) async fn open_store(config: &Config) -> Result<Arc<FilePreferenceStore>> {
    let store = FilePreferenceStore::open(config.preferences.file.clone())
        .await
        .context("Failed to open the session store")?;
    Ok(Arc::new(store))
}
