use clap::Parser;
use claw_agent::utils::{logger, validation::Validate};
use claw_agent::{
    ActivityLog, CliConfig, LedgerClient, Orchestrator, StubExecutor, TrackerClient,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    // 載入並驗證配置
    let config = match cli.into_agent_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Agent config: {:?}", config);

    if config.accept_invalid_node_certs {
        tracing::warn!(
            "TLS verification is disabled for {} (self-signed node certificate)",
            config.node_url
        );
    }

    let config = Arc::new(config);
    let tracker = TrackerClient::new(&config)?;
    let ledger = LedgerClient::new(&config)?;
    let executor = StubExecutor::new(config.wallet_id.clone());
    let activity = ActivityLog::new(&config.log_file);

    let mut orchestrator = Orchestrator::new(config.clone(), tracker, ledger, executor, activity);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = orchestrator.run(shutdown).await;
    tracing::info!(
        "Stopped after {} cycles ({} acted, {} idle, {} failed)",
        summary.cycles,
        summary.acted,
        summary.idle,
        summary.failed
    );

    Ok(())
}
