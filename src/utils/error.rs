use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },
}

impl AgentError {
    /// Errors worth retrying on the next poll cycle.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AgentError::Transport { .. }
                | AgentError::MalformedResponse { .. }
                | AgentError::ApiError(_)
                | AgentError::IoError(_)
                | AgentError::ActionFailed { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AgentError::Transport { .. } => "Check network connectivity and the remote endpoint",
            AgentError::MalformedResponse { .. } => {
                "The remote service returned unexpected data; it will be retried"
            }
            AgentError::ApiError(_) => "Check TLS and proxy settings",
            AgentError::IoError(_) => "Check permissions on the log file location",
            AgentError::SerializationError(_) => "Inspect the payload being encoded",
            AgentError::ConfigError { .. }
            | AgentError::MissingConfigError { .. }
            | AgentError::InvalidConfigValueError { .. } => {
                "Fix the configuration file, flags or environment and restart"
            }
            AgentError::ActionFailed { .. } => "The bounty will be reconsidered on a later cycle",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_transient() {
        let err = AgentError::Transport {
            url: "https://node".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.is_transient());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn config_errors_are_not_transient() {
        let err = AgentError::MissingConfigError {
            field: "wallet_id".to_string(),
        };
        assert!(!err.is_transient());
        assert!(err.recovery_suggestion().contains("configuration"));
    }
}
