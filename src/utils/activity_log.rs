use crate::domain::model::LogEntry;
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Append-only activity log mirrored to stdout.
///
/// The file is reopened in append mode for every entry. Clones share one
/// lock, so appends from clones never interleave and timestamps never go
/// backwards within the process.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
    echo_stdout: bool,
    last_timestamp: Arc<Mutex<Option<DateTime<Local>>>>,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo_stdout: true,
            last_timestamp: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_stdout(mut self, echo_stdout: bool) -> Self {
        self.echo_stdout = echo_stdout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a message. A failed file write is reported through tracing and
    /// otherwise ignored so the caller's cycle keeps going.
    pub fn record(&self, message: impl Into<String>) -> LogEntry {
        let message = message.into();
        match self.try_record(&message) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to append to {}: {}", self.path.display(), e);
                LogEntry {
                    timestamp: Local::now(),
                    message,
                }
            }
        }
    }

    pub fn try_record(&self, message: &str) -> Result<LogEntry> {
        let mut last = self
            .last_timestamp
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = Local::now();
        let timestamp = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(timestamp);

        let entry = LogEntry {
            timestamp,
            message: message.to_string(),
        };
        let line = entry.render();

        if self.echo_stdout {
            println!("{}", line);
        }
        tracing::debug!(target: "claw_agent::activity", "{}", entry.message);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        Ok(entry)
    }
}
