//! Activity journal
//!
//! Appends a timestamped line to a daily markdown notes file whenever
//! something worth remembering happens (currently: a weight is logged).
//! Recording is best-effort: failures are logged and never reach the
//! caller.

use crate::config::JournalConfig;
use chrono::{DateTime, FixedOffset, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Daily notes journal. Disabled when no directory is configured.
#[derive(Clone)]
pub struct ActivityJournal {
    dir: Option<Arc<PathBuf>>,
    offset: FixedOffset,
    write_lock: Arc<Mutex<()>>,
}

impl ActivityJournal {
    pub fn new(dir: Option<PathBuf>, offset: FixedOffset) -> Self {
        Self {
            dir: dir.map(Arc::new),
            offset,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &JournalConfig, offset: FixedOffset) -> Self {
        let dir = if config.enabled { config.dir.clone() } else { None };
        Self::new(dir, offset)
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Record an event now. Never fails.
    pub async fn record(&self, message: &str) {
        self.record_at(Utc::now().with_timezone(&self.offset), message)
            .await;
    }

    /// Record an event at a given time. Entries from one process are
    /// written one at a time so the day's header always comes first.
    pub async fn record_at(&self, at: DateTime<FixedOffset>, message: &str) {
        let Some(dir) = &self.dir else {
            return;
        };

        let _guard = self.write_lock.lock().await;
        if let Err(e) = Self::write_entry(dir, at, message).await {
            warn!(error = %e, dir = %dir.display(), "Failed to write activity journal");
        }
    }

    /// Path of the notes file for the day of `at`
    pub fn file_for(dir: &Path, at: DateTime<FixedOffset>) -> PathBuf {
        dir.join(format!("{}.md", at.format("%Y-%m-%d")))
    }

    /// Append one entry, creating the day's file with its header if needed
    pub async fn write_entry(
        dir: &Path,
        at: DateTime<FixedOffset>,
        message: &str,
    ) -> std::io::Result<()> {
        let path = Self::file_for(dir, at);
        let entry = format!("\n- [{}] {}", at.format("%-I:%M:%S %P"), message);

        fs::create_dir_all(dir).await?;

        // Only the writer that creates the file adds the header
        let (mut file, contents) = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                let header = format!(
                    "# Memory Log - {}\n\n## Fitness Tracking\n",
                    at.format("%B %-d, %Y")
                );
                (file, format!("{header}{entry}"))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let file = OpenOptions::new().append(true).open(&path).await?;
                (file, entry)
            }
            Err(e) => return Err(e),
        };

        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %path.display(), "Journal entry written");
        Ok(())
    }
}
