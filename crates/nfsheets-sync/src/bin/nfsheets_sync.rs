//! One-shot sync: mirror the current on-chain cell state into the
//! configured Google Sheets document, then exit. Scheduling and run
//! exclusion belong to the caller (cron with a lock, or similar).

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use alloy::providers::ProviderBuilder;

use nfsheets_chain::ChainReader;
use nfsheets_sheets::{ServiceAccountKey, SheetsClient};
use nfsheets_sync::{SheetTarget, SyncConfig, SyncCycle, SyncOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SyncConfig::from_env().context("configuration")?;
    tracing::info!("Starting sync...");

    let credentials = ServiceAccountKey::from_path(&config.credentials_file)
        .context("loading service-account credentials")?;
    let provider = ProviderBuilder::new().connect_http(config.rpc_endpoint.clone());

    let mut reader = ChainReader::new(config.contract_address, provider);
    if let Some(page_size) = config.page_size {
        reader = reader.with_page_size(page_size);
    }
    let writer = SheetsClient::new(credentials, config.spreadsheet_id.clone());

    let mut cycle = SyncCycle::new(
        SheetTarget {
            sheet_name: config.sheet_name.clone(),
            sheet_id: config.sheet_tab_id,
        },
        config.grid,
    );
    if let Some(timeout) = config.phase_timeout {
        cycle = cycle.with_phase_timeout(timeout);
    }

    match cycle.run(&reader, &writer).await? {
        SyncOutcome::Skipped => tracing::info!("No data to sync, skipping this run!"),
        SyncOutcome::Synced { cells, block } => tracing::info!(cells, block, "Synced!"),
    }
    Ok(())
}
