use crate::config::AgentConfig;
use crate::core::selector;
use crate::domain::model::{Bounty, Evaluation, Verdict};
use crate::domain::ports::{ActionExecutor, IssueTracker, Ledger};
use crate::utils::activity_log::ActivityLog;
use crate::utils::error::{AgentError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Cooldown after a bounty went through claim, implement and submit.
pub const ACTED_COOLDOWN_UNITS: u32 = 3600;
/// Cooldown after a scan that found nothing suitable.
pub const IDLE_COOLDOWN_UNITS: u32 = 300;
/// Cooldown after a failed cycle.
pub const ERROR_COOLDOWN_UNITS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrapping,
    Polling,
    Selecting,
    Acting,
    CoolingDown,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Acted(Bounty),
    NoSuitableBounty { scanned: usize },
    Failed(AgentError),
}

impl CycleOutcome {
    pub fn cooldown_units(&self) -> u32 {
        match self {
            CycleOutcome::Acted(_) => ACTED_COOLDOWN_UNITS,
            CycleOutcome::NoSuitableBounty { .. } => IDLE_COOLDOWN_UNITS,
            CycleOutcome::Failed(_) => ERROR_COOLDOWN_UNITS,
        }
    }

    pub fn cooldown(&self, unit: Duration) -> Duration {
        unit.saturating_mul(self.cooldown_units())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub acted: u64,
    pub idle: u64,
    pub failed: u64,
}

/// First bounty judged suitable, in tracker order.
pub fn select_first_suitable(bounties: &[Bounty]) -> Option<(&Bounty, Evaluation)> {
    bounties.iter().find_map(|bounty| {
        let evaluation = selector::evaluate(bounty);
        tracing::debug!(
            "#{} '{}' -> {} ({})",
            bounty.number,
            bounty.title,
            evaluation.verdict,
            evaluation.reason
        );
        (evaluation.verdict == Verdict::Suitable).then_some((bounty, evaluation))
    })
}

/// Single-threaded poll loop: scan, select, act, cool down.
pub struct Orchestrator<T: IssueTracker, L: Ledger, E: ActionExecutor> {
    config: Arc<AgentConfig>,
    tracker: T,
    ledger: L,
    executor: E,
    activity: ActivityLog,
    phase: Phase,
}

impl<T: IssueTracker, L: Ledger, E: ActionExecutor> Orchestrator<T, L, E> {
    pub fn new(
        config: Arc<AgentConfig>,
        tracker: T,
        ledger: L,
        executor: E,
        activity: ActivityLog,
    ) -> Self {
        Self {
            config,
            tracker,
            ledger,
            executor,
            activity,
            phase: Phase::Bootstrapping,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Startup banner plus informational node checks. Nothing here can fail
    /// the process.
    pub async fn bootstrap(&mut self) {
        self.enter(Phase::Bootstrapping);

        let rule = "=".repeat(50);
        self.activity.record(rule.as_str());
        self.activity.record("🦀 CLAW - AI Agent Bounty Hunter STARTED");
        self.activity.record(rule.as_str());
        self.activity
            .record(format!("Wallet ID: {}", self.config.wallet_id));
        self.activity.record(format!("Node: {}", self.config.node_url));

        match self.ledger.health_check().await {
            Ok(health) => self.activity.record(format!("Node health: {}", health.trim())),
            Err(e) => self.activity.record(format!("⚠️ Node health check failed: {}", e)),
        };
        match self.ledger.get_epoch().await {
            Ok(epoch) => self.activity.record(format!("Epoch: {}", epoch)),
            Err(e) => self.activity.record(format!("⚠️ Epoch lookup failed: {}", e)),
        };

        self.check_balance().await;
    }

    /// Logs the wallet balance; a failure is logged and swallowed.
    pub async fn check_balance(&self) -> Option<String> {
        match self.ledger.get_balance(&self.config.wallet_id).await {
            Ok(balance) => {
                self.activity
                    .record(format!("💰 Wallet balance: {}", balance.trim()));
                Some(balance)
            }
            Err(e) => {
                self.activity
                    .record(format!("❌ Balance check failed: {}", e));
                None
            }
        }
    }

    async fn scan(&mut self) -> Result<Vec<Bounty>> {
        self.enter(Phase::Polling);
        self.activity.record("🔍 Scanning bounty board...");

        let bounties = self.tracker.open_bounties().await?;
        self.activity
            .record(format!("Found {} open bounties", bounties.len()));
        Ok(bounties)
    }

    async fn act(&mut self, bounty: &Bounty) -> Result<()> {
        self.enter(Phase::Acting);

        self.activity.record(format!(
            "🎯 Claiming bounty #{}: {}",
            bounty.number, bounty.title
        ));
        let claimed = self.executor.claim(bounty).await?;
        tracing::debug!("claim result: {:?}", claimed);

        self.activity
            .record(format!("🔧 Implementing solution for #{}", bounty.number));
        let implemented = self.executor.implement(bounty).await?;
        tracing::debug!("implement result: {:?}", implemented);

        self.activity
            .record(format!("📤 Submitting PR for bounty #{}", bounty.number));
        let submitted = self.executor.submit(bounty).await?;
        tracing::debug!("submit result: {:?}", submitted);

        self.check_balance().await;
        Ok(())
    }

    /// Runs one poll cycle and reports how it ended. Errors never escape.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let bounties = match self.scan().await {
            Ok(bounties) => bounties,
            Err(e) => return CycleOutcome::Failed(e),
        };

        self.enter(Phase::Selecting);
        let selected = select_first_suitable(&bounties).map(|(bounty, _)| bounty.clone());

        match selected {
            Some(bounty) => {
                self.activity
                    .record(format!("✅ Found suitable bounty: {}", bounty.title));
                match self.act(&bounty).await {
                    Ok(()) => CycleOutcome::Acted(bounty),
                    Err(e) => CycleOutcome::Failed(e),
                }
            }
            None => CycleOutcome::NoSuitableBounty {
                scanned: bounties.len(),
            },
        }
    }

    /// Loops until `shutdown` resolves. The shutdown future is raced against
    /// both the cycle and the cooldown.
    pub async fn run<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        tokio::select! {
            _ = self.bootstrap() => {}
            _ = &mut shutdown => {
                self.activity.record("👋 Agent stopped");
                return summary;
            }
        }

        loop {
            let outcome = tokio::select! {
                outcome = self.run_cycle() => outcome,
                _ = &mut shutdown => break,
            };

            summary.cycles += 1;
            match &outcome {
                CycleOutcome::Acted(bounty) => {
                    summary.acted += 1;
                    tracing::info!("Completed bounty #{}", bounty.number);
                }
                CycleOutcome::NoSuitableBounty { scanned } => {
                    summary.idle += 1;
                    tracing::info!("No suitable bounty among {} scanned", scanned);
                }
                CycleOutcome::Failed(e) => {
                    summary.failed += 1;
                    self.activity.record(format!("❌ Error: {}", e));
                    tracing::error!("Cycle failed: {} ({})", e, e.recovery_suggestion());
                }
            }

            self.enter(Phase::CoolingDown);
            let cooldown = outcome.cooldown(self.config.cooldown_unit());
            tracing::info!("Cooling down for {:?}", cooldown);

            tokio::select! {
                _ = tokio::time::sleep(cooldown) => {}
                _ = &mut shutdown => break,
            }
        }

        self.activity.record("👋 Agent stopped");
        summary
    }
}
