use crate::cli::build_client;
use crate::config::Config;
use crate::error::Result;
use crate::n26::types::TransactionFilter;
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration paths
    Paths,
    /// Show account details and balances
    Account,
    /// Show registered addresses
    Addresses,
    /// Show cards attached to the account
    Cards,
    /// Show the account holder's profile
    Me,
    /// Show known transfer recipients
    Recipients,
    /// Show transactions, optionally filtered
    Transactions {
        /// Limit the number of results
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by category, repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
        /// "From" timestamp bound, epoch milliseconds
        #[arg(long)]
        from: Option<i64>,
        /// "To" timestamp bound, epoch milliseconds
        #[arg(long)]
        to: Option<i64>,
        /// Text search
        #[arg(long)]
        text: Option<String>,
        /// Include only pending transactions
        #[arg(long)]
        pending: bool,
    },
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
            ShowResource::Account => print_json(&build_client()?.account().await?),
            ShowResource::Addresses => print_json(&build_client()?.addresses().await?),
            ShowResource::Cards => print_json(&build_client()?.cards().await?),
            ShowResource::Me => print_json(&build_client()?.me().await?),
            ShowResource::Recipients => print_json(&build_client()?.recipients().await?),
            ShowResource::Transactions {
                limit,
                categories,
                from,
                to,
                text,
                pending,
            } => {
                let filter = TransactionFilter {
                    limit: *limit,
                    categories: categories.clone(),
                    from: *from,
                    to: *to,
                    text: text.clone(),
                    pending: pending.then_some(true),
                };
                print_json(&build_client()?.transactions(filter).await?)
            }
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;

    info!(path = ?config_path, "Config path");

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
