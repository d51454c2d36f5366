use crate::adapters::http::{HttpClient, HttpOutcome, HttpSettings, Payload};
use crate::config::AgentConfig;
use crate::domain::ports::Ledger;
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use url::Url;

/// Read-only client for the ledger node. Every call goes to the node; nothing
/// is cached.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: HttpClient,
    base_url: String,
}

impl LedgerClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let http = HttpClient::new(HttpSettings {
            accept_invalid_certs: config.accept_invalid_node_certs,
            timeout: config.request_timeout(),
        })?;
        Ok(Self::with_http(http, &config.node_url))
    }

    pub fn with_http(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            AgentError::InvalidConfigValueError {
                field: "node_url".to_string(),
                value: self.base_url.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Returns the body as received together with its parsed form.
    async fn fetch(&self, url: Url) -> Result<(String, Payload)> {
        match self.http.get(url.as_str(), HeaderMap::new()).await {
            HttpOutcome::Success { payload, raw, .. } => Ok((raw, payload)),
            HttpOutcome::TransportError { url, message } => {
                Err(AgentError::Transport { url, message })
            }
        }
    }
}

#[async_trait]
impl Ledger for LedgerClient {
    async fn get_balance(&self, wallet_id: &str) -> Result<String> {
        let mut url = self.endpoint("/wallet/balance")?;
        url.query_pairs_mut().append_pair("miner_id", wallet_id);
        let (raw, _) = self.fetch(url).await?;
        Ok(raw)
    }

    async fn get_epoch(&self) -> Result<serde_json::Value> {
        let url = self.endpoint("/epoch")?;
        match self.fetch(url).await?.1 {
            Payload::Json(value) => Ok(value),
            Payload::Text(text) => Err(AgentError::MalformedResponse {
                message: format!("epoch response is not JSON: {}", text),
            }),
        }
    }

    async fn health_check(&self) -> Result<String> {
        let url = self.endpoint("/health")?;
        let (raw, _) = self.fetch(url).await?;
        Ok(raw)
    }
}
