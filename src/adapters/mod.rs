// Adapters layer: concrete implementations for the remote node, the issue
// tracker and the action executor.

pub mod executor;
pub mod http;
pub mod ledger;
pub mod tracker;
