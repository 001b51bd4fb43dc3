//! Interactive counterpart to the sync pipeline: inspect a cell, mint an
//! unowned one, or update a cell the configured signer owns.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::primitives::utils::format_ether;
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use reqwest::Url;

use nfsheets_chain::{CellWallet, ChainReader};
use nfsheets_common::{CellCoord, GridDims};

#[derive(Parser, Debug)]
#[command(name = "nfsheets", about = "Inspect, mint, and update NFSheets cells")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show token id, owner, value, and mint price for a cell.
    Info {
        /// Cell reference such as B5.
        cell: String,
    },
    /// Mint an unowned cell with an initial value.
    Mint {
        /// Cell reference such as B5.
        cell: String,
        /// Initial cell content.
        #[arg(long)]
        value: String,
    },
    /// Update the value of a cell the signer owns.
    Set {
        /// Cell reference such as B5.
        cell: String,
        /// New cell content.
        #[arg(long)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let grid = grid_from_env()?;
    let contract: Address = require_env("NFSHEETS_CONTRACT_ADDRESS")?
        .parse()
        .context("NFSHEETS_CONTRACT_ADDRESS is not a valid address")?;
    let rpc: Url = require_env("NFSHEETS_RPC_ENDPOINT")?
        .parse()
        .context("NFSHEETS_RPC_ENDPOINT is not a valid URL")?;

    match cli.command {
        Command::Info { cell } => {
            let coord = parse_cell(&cell, grid)?;
            let provider = ProviderBuilder::new().connect_http(rpc);
            let reader = ChainReader::new(contract, provider);
            let token = coord.token_id(grid);

            println!("cell {coord} is token {token}");
            match reader.owner_of(token).await? {
                Some(owner) => {
                    let value = reader.value_of(token).await?;
                    println!("owner: {owner}");
                    println!("value: {value:?}");
                }
                None => {
                    let price = reader.price().await?;
                    println!("owner: unminted");
                    println!("mint price: {} ETH", format_ether(price));
                }
            }
        }
        Command::Mint { cell, value } => {
            let coord = parse_cell(&cell, grid)?;
            let signer = signer_from_env()?;
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(rpc);
            let reader = ChainReader::new(contract, provider.clone());

            let token = coord.token_id(grid);
            if let Some(owner) = reader.owner_of(token).await? {
                bail!("cell {coord} is already owned by {owner}");
            }
            let price = reader.price().await?;
            let tx = CellWallet::new(contract, provider)
                .mint(coord, &value, price)
                .await?;
            println!("minted {coord} for {} ETH (tx {tx})", format_ether(price));
        }
        Command::Set { cell, value } => {
            let coord = parse_cell(&cell, grid)?;
            let signer = signer_from_env()?;
            let sender = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(rpc);
            let reader = ChainReader::new(contract, provider.clone());

            let token = coord.token_id(grid);
            match reader.owner_of(token).await? {
                None => bail!("cell {coord} is unminted; use `nfsheets mint`"),
                Some(owner) if owner != sender => {
                    bail!("cell {coord} is owned by {owner}, not by {sender}")
                }
                Some(_) => {}
            }
            let tx = CellWallet::new(contract, provider)
                .set_value(token, &value)
                .await?;
            println!("updated {coord} (tx {tx})");
        }
    }
    Ok(())
}

fn parse_cell(text: &str, grid: GridDims) -> Result<CellCoord> {
    CellCoord::parse(&text.to_ascii_uppercase(), grid)
        .with_context(|| format!("invalid cell reference {text:?}"))
}

fn require_env(var: &str) -> Result<String> {
    std::env::var(var).with_context(|| format!("missing required environment variable {var}"))
}

fn grid_from_env() -> Result<GridDims> {
    match std::env::var("NFSHEETS_NUM_ROWS") {
        Err(_) => Ok(GridDims::DEPLOYED),
        Ok(text) => {
            let rows: u32 = text
                .parse()
                .context("NFSHEETS_NUM_ROWS must be a positive integer")?;
            if rows == 0 {
                bail!("NFSHEETS_NUM_ROWS must be a positive integer");
            }
            Ok(GridDims::new(rows, GridDims::DEPLOYED.num_columns()))
        }
    }
}

fn signer_from_env() -> Result<PrivateKeySigner> {
    require_env("NFSHEETS_PRIVATE_KEY")?
        .trim()
        .parse()
        .context("NFSHEETS_PRIVATE_KEY is not a valid private key")
}
