use crate::domain::model::{ActionResult, ActionStatus, Bounty};
use crate::domain::ports::ActionExecutor;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Executor that only acknowledges each step. Nothing is posted to the
/// tracker and no code is written.
#[derive(Debug, Clone)]
pub struct StubExecutor {
    wallet_id: String,
}

impl StubExecutor {
    pub fn new(wallet_id: impl Into<String>) -> Self {
        Self {
            wallet_id: wallet_id.into(),
        }
    }
}

#[async_trait]
impl ActionExecutor for StubExecutor {
    async fn claim(&self, bounty: &Bounty) -> Result<ActionResult> {
        tracing::debug!("stub claim for #{}", bounty.number);
        Ok(ActionResult::with_wallet(ActionStatus::Claimed, &self.wallet_id))
    }

    async fn implement(&self, bounty: &Bounty) -> Result<ActionResult> {
        tracing::debug!("stub implement for #{}", bounty.number);
        Ok(ActionResult::new(ActionStatus::Implemented))
    }

    async fn submit(&self, bounty: &Bounty) -> Result<ActionResult> {
        tracing::debug!("stub submit for #{}", bounty.number);
        Ok(ActionResult::new(ActionStatus::Submitted))
    }
}
