pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{executor::StubExecutor, ledger::LedgerClient, tracker::TrackerClient};
pub use config::{AgentConfig, CliConfig};
pub use core::orchestrator::{CycleOutcome, Orchestrator, RunSummary};
pub use utils::activity_log::ActivityLog;
pub use utils::error::{AgentError, Result};
