pub mod cli;

use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use cli::CliConfig;

/// Process-wide settings. Built once at start and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub wallet_id: String,
    pub node_url: String,
    /// The node serves a self-signed certificate, so verification is off
    /// unless explicitly enabled.
    pub accept_invalid_node_certs: bool,
    pub tracker_api_url: String,
    #[serde(skip_serializing)]
    pub tracker_token: Option<String>,
    pub repo_owner: String,
    pub repo_name: String,
    pub bounty_label: String,
    pub issue_state: String,
    pub log_file: String,
    pub request_timeout_seconds: u64,
    pub cooldown_unit_millis: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            wallet_id: "link-claw-agent".to_string(),
            node_url: "https://50.28.86.131".to_string(),
            accept_invalid_node_certs: true,
            tracker_api_url: "https://api.github.com".to_string(),
            tracker_token: None,
            repo_owner: "Scottcjn".to_string(),
            repo_name: "rustchain-bounties".to_string(),
            bounty_label: "bounty".to_string(),
            issue_state: "open".to_string(),
            log_file: "claw_agent.log".to_string(),
            request_timeout_seconds: 30,
            cooldown_unit_millis: 1000,
        }
    }
}

impl AgentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| AgentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn cooldown_unit(&self) -> Duration {
        Duration::from_millis(self.cooldown_unit_millis)
    }

    /// Token with blank values treated as absent.
    pub fn token(&self) -> Option<&str> {
        self.tracker_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("wallet_id", &self.wallet_id)?;
        validation::validate_url("node_url", &self.node_url)?;
        validation::validate_url("tracker_api_url", &self.tracker_api_url)?;
        validation::validate_non_empty_string("repo_owner", &self.repo_owner)?;
        validation::validate_non_empty_string("repo_name", &self.repo_name)?;
        validation::validate_non_empty_string("bounty_label", &self.bounty_label)?;
        validation::validate_non_empty_string("issue_state", &self.issue_state)?;
        validation::validate_path("log_file", &self.log_file)?;
        validation::validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 600)?;
        validation::validate_range("cooldown_unit_millis", self.cooldown_unit_millis, 1, u64::MAX)?;
        Ok(())
    }
}
