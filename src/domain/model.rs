use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An open issue on the tracker carrying the bounty label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: BTreeSet<String>,
}

/// Only `title` is required; every other field may be missing or null.
#[derive(Debug, Deserialize)]
struct RawIssue {
    title: String,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    labels: Option<Vec<RawLabel>>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    #[serde(default)]
    name: Option<String>,
}

impl Bounty {
    /// Builds a bounty from one element of the tracker's issue list.
    /// Entries without a string `title` are not issues and yield `None`.
    pub fn from_issue(issue: &serde_json::Value) -> Option<Self> {
        let raw: RawIssue = match serde_json::from_value(issue.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping tracker entry without a usable title: {}", e);
                return None;
            }
        };
        Some(Self {
            number: raw.number.unwrap_or_default(),
            title: raw.title,
            url: raw.html_url.unwrap_or_default(),
            labels: raw
                .labels
                .unwrap_or_default()
                .into_iter()
                .filter_map(|l| l.name)
                .collect(),
        })
    }

    /// Parses a whole issue list, preserving tracker order.
    pub fn parse_all(issues: &[serde_json::Value]) -> Vec<Self> {
        let bounties: Vec<Self> = issues.iter().filter_map(Self::from_issue).collect();
        if bounties.len() < issues.len() {
            tracing::warn!(
                "Skipped {} of {} tracker entries without a title",
                issues.len() - bounties.len(),
                issues.len()
            );
        }
        bounties
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Suitable,
    Unsuitable,
    NeedsReview,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Suitable => "suitable",
            Verdict::Unsuitable => "unsuitable",
            Verdict::NeedsReview => "needs-review",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Claimed,
    Implemented,
    Submitted,
}

/// Acknowledgement returned by each step of the action sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

impl ActionResult {
    pub fn new(status: ActionStatus) -> Self {
        Self {
            status,
            wallet: None,
        }
    }

    pub fn with_wallet(status: ActionStatus, wallet: impl Into<String>) -> Self {
        Self {
            status,
            wallet: Some(wallet.into()),
        }
    }
}

/// Raw reply from a mutating tracker call. Error payloads are passed through
/// untouched; `is_error` only looks at the status code.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl TrackerReply {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }
}

/// Local time with its UTC offset, so lines stay ordered across DST changes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn render(&self) -> String {
        format!("[{}] {}", self.timestamp.format(TIMESTAMP_FORMAT), self.message)
    }
}
