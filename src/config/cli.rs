use crate::config::AgentConfig;
use crate::utils::error::Result;
use clap::Parser;

/// Command-line and environment overrides. Every flag is optional; without
/// any the agent runs on built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "claw-agent")]
#[command(about = "Polls a bounty board, picks suitable tasks and reports wallet balance")]
pub struct CliConfig {
    #[arg(long, env = "CLAW_CONFIG", help = "TOML file with agent settings")]
    pub config: Option<String>,

    #[arg(long, env = "CLAW_WALLET_ID")]
    pub wallet_id: Option<String>,

    #[arg(long, env = "CLAW_NODE_URL")]
    pub node_url: Option<String>,

    #[arg(long, help = "Verify the node's TLS certificate")]
    pub verify_node_tls: bool,

    #[arg(long, env = "CLAW_TRACKER_API_URL")]
    pub tracker_api_url: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub tracker_token: Option<String>,

    #[arg(long)]
    pub repo_owner: Option<String>,

    #[arg(long)]
    pub repo_name: Option<String>,

    #[arg(long, env = "CLAW_LOG_FILE")]
    pub log_file: Option<String>,

    #[arg(long)]
    pub request_timeout_seconds: Option<u64>,

    #[arg(long, help = "Length of one cooldown unit in milliseconds")]
    pub cooldown_unit_millis: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit diagnostic logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file if given, then flags and environment.
    pub fn into_agent_config(self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_file(path)?,
            None => AgentConfig::default(),
        };

        if let Some(v) = self.wallet_id {
            config.wallet_id = v;
        }
        if let Some(v) = self.node_url {
            config.node_url = v;
        }
        if self.verify_node_tls {
            config.accept_invalid_node_certs = false;
        }
        if let Some(v) = self.tracker_api_url {
            config.tracker_api_url = v;
        }
        if self.tracker_token.is_some() {
            config.tracker_token = self.tracker_token;
        }
        if let Some(v) = self.repo_owner {
            config.repo_owner = v;
        }
        if let Some(v) = self.repo_name {
            config.repo_name = v;
        }
        if let Some(v) = self.log_file {
            config.log_file = v;
        }
        if let Some(v) = self.request_timeout_seconds {
            config.request_timeout_seconds = v;
        }
        if let Some(v) = self.cooldown_unit_millis {
            config.cooldown_unit_millis = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = CliConfig::default().into_agent_config().unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"wallet_id = \"from-file\"\nrepo_name = \"file-repo\"\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_string_lossy().to_string()),
            wallet_id: Some("from-flag".to_string()),
            verify_node_tls: true,
            ..CliConfig::default()
        };

        let config = cli.into_agent_config().unwrap();
        assert_eq!(config.wallet_id, "from-flag");
        assert_eq!(config.repo_name, "file-repo");
        assert!(!config.accept_invalid_node_certs);
    }

    #[test]
    fn test_parse_from_args() {
        let cli = CliConfig::try_parse_from([
            "claw-agent",
            "--repo-owner",
            "someone",
            "--cooldown-unit-millis",
            "5",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        let config = cli.into_agent_config().unwrap();
        assert_eq!(config.repo_owner, "someone");
        assert_eq!(config.cooldown_unit_millis, 5);
    }
}
