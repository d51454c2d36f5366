use crate::domain::model::{ActionResult, Bounty};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of candidate bounties.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn open_bounties(&self) -> Result<Vec<Bounty>>;
}

/// Read-only view of the remote ledger node.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_balance(&self, wallet_id: &str) -> Result<String>;
    async fn get_epoch(&self) -> Result<serde_json::Value>;
    async fn health_check(&self) -> Result<String>;
}

/// The claim, implement and submit steps run for a selected bounty.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn claim(&self, bounty: &Bounty) -> Result<ActionResult>;
    async fn implement(&self, bounty: &Bounty) -> Result<ActionResult>;
    async fn submit(&self, bounty: &Bounty) -> Result<ActionResult>;
}
