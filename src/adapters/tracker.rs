use crate::adapters::http::{HttpClient, HttpOutcome, HttpSettings, Payload};
use crate::config::AgentConfig;
use crate::domain::model::{Bounty, TrackerReply};
use crate::domain::ports::IssueTracker;
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use url::Url;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub-style issue tracker client scoped to the configured bounty repo.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: HttpClient,
    api_url: String,
    headers: HeaderMap,
    repo_owner: String,
    repo_name: String,
    bounty_label: String,
    issue_state: String,
}

impl TrackerClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let http = HttpClient::new(HttpSettings {
            accept_invalid_certs: false,
            timeout: config.request_timeout(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        // 沒有 token 時以匿名方式呼叫，速率限制較低
        match config.token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    AgentError::InvalidConfigValueError {
                        field: "tracker_token".to_string(),
                        value: "<redacted>".to_string(),
                        reason: e.to_string(),
                    }
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => tracing::info!("No tracker token configured, sending unauthenticated requests"),
        }

        Ok(Self {
            http,
            api_url: config.tracker_api_url.trim_end_matches('/').to_string(),
            headers,
            repo_owner: config.repo_owner.clone(),
            repo_name: config.repo_name.clone(),
            bounty_label: config.bounty_label.clone(),
            issue_state: config.issue_state.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.api_url, path)).map_err(|e| {
            AgentError::InvalidConfigValueError {
                field: "tracker_api_url".to_string(),
                value: self.api_url.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Lists issues of the bounty repo, filtered server-side. A payload that
    /// is not an array (rate limiting, auth problems) counts as no issues.
    pub async fn list_issues(&self, labels: &str, state: &str) -> Result<Vec<serde_json::Value>> {
        let mut url = self.endpoint(&format!(
            "/repos/{}/{}/issues",
            self.repo_owner, self.repo_name
        ))?;
        url.query_pairs_mut()
            .append_pair("labels", labels)
            .append_pair("state", state);

        match self.http.get(url.as_str(), self.headers.clone()).await {
            HttpOutcome::Success {
                payload: Payload::Json(serde_json::Value::Array(items)),
                ..
            } => Ok(items),
            HttpOutcome::Success { status, payload, .. } => {
                tracing::warn!(
                    "Issue list returned no array (status {}): {}",
                    status,
                    payload.as_text()
                );
                Ok(Vec::new())
            }
            HttpOutcome::TransportError { url, message } => {
                Err(AgentError::Transport { url, message })
            }
        }
    }

    pub async fn fork_repository(&self, owner: &str, repo: &str) -> Result<TrackerReply> {
        let url = self.endpoint(&format!("/repos/{}/{}/forks", owner, repo))?;
        self.post(url, None).await
    }

    /// Creates `refs/heads/{branch_name}` at `base_commit`. An existing
    /// branch comes back as an error reply from the tracker.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch_name: &str,
        base_commit: &str,
    ) -> Result<TrackerReply> {
        let url = self.endpoint(&format!("/repos/{}/{}/git/refs", owner, repo))?;
        let body = serde_json::json!({
            "ref": format!("refs/heads/{}", branch_name),
            "sha": base_commit,
        });
        self.post(url, Some(&body)).await
    }

    async fn post(&self, url: Url, body: Option<&serde_json::Value>) -> Result<TrackerReply> {
        match self.http.post(url.as_str(), self.headers.clone(), body).await {
            HttpOutcome::Success { status, payload, .. } => {
                let body = match payload {
                    Payload::Json(value) => value,
                    Payload::Text(text) => serde_json::Value::String(text),
                };
                Ok(TrackerReply { status, body })
            }
            HttpOutcome::TransportError { url, message } => {
                Err(AgentError::Transport { url, message })
            }
        }
    }
}

#[async_trait]
impl IssueTracker for TrackerClient {
    async fn open_bounties(&self) -> Result<Vec<Bounty>> {
        let issues = self.list_issues(&self.bounty_label, &self.issue_state).await?;
        Ok(Bounty::parse_all(&issues))
    }
}
