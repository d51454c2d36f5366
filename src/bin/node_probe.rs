use clap::Parser;
use claw_agent::domain::ports::Ledger;
use claw_agent::utils::{logger, validation::Validate};
use claw_agent::{CliConfig, LedgerClient};

/// One-shot report of balance, epoch and health from the configured node.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose, false);

    let config = cli.into_agent_config()?;
    config.validate()?;

    let ledger = LedgerClient::new(&config)?;

    println!("🔎 Node: {}", config.node_url);

    match ledger.health_check().await {
        Ok(health) => println!("  health:  {}", health.trim()),
        Err(e) => println!("  health:  ❌ {}", e),
    }

    match ledger.get_epoch().await {
        Ok(epoch) => println!("  epoch:   {}", serde_json::to_string_pretty(&epoch)?),
        Err(e) => println!("  epoch:   ❌ {}", e),
    }

    match ledger.get_balance(&config.wallet_id).await {
        Ok(balance) => println!("  balance: {} ({})", balance.trim(), config.wallet_id),
        Err(e) => println!("  balance: ❌ {}", e),
    }

    Ok(())
}
