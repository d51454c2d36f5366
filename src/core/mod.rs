pub mod orchestrator;
pub mod selector;

pub use crate::domain::model::{ActionResult, Bounty, Evaluation, Verdict};
pub use crate::domain::ports::{ActionExecutor, IssueTracker, Ledger};
pub use crate::utils::error::Result;
