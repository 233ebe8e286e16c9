mod show;
mod transfer;

use crate::config::Config;
use crate::error::Result;
use crate::n26::{Credentials, HttpApi, N26Client};
use clap::{Parser, Subcommand};
use tracing::info;

pub use show::ShowResource;
pub use transfer::TransferArgs;

#[derive(Parser, Debug)]
#[command(name = "n26-cli")]
#[command(about = "Query an N26 account and create SEPA transfers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Auth => authenticate().await,
            Commands::Show { resource } => resource.execute().await,
            Commands::Transfer(args) => args.execute().await,
            Commands::Memo {
                transaction_id,
                text,
            } => update_memo(transaction_id, text).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify credentials by authenticating once
    Auth,
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
    /// Create a SEPA transfer
    Transfer(TransferArgs),
    /// Create or update the memo on a transaction
    Memo {
        transaction_id: String,
        text: String,
    },
}

/// Build a client against the live API from the on-disk config.
pub(crate) fn build_client() -> Result<N26Client<HttpApi>> {
    let config = Config::load()?;
    Ok(N26Client::new(
        HttpApi::new(),
        Credentials::new(config.n26.username, config.n26.password),
    ))
}

async fn authenticate() -> Result<()> {
    let client = build_client()?;
    client.authenticate().await?;

    info!("N26 authentication verified");

    Ok(())
}

async fn update_memo(transaction_id: &str, text: &str) -> Result<()> {
    let client = build_client()?;
    client.memo(transaction_id, text).await?;

    info!(transaction_id = transaction_id, "Memo saved");

    Ok(())
}
