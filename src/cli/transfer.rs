use crate::cli::build_client;
use crate::error::Result;
use crate::n26::types::TransferRequest;
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Card PIN confirming the transfer
    #[arg(long)]
    pin: String,
    /// Recipient IBAN
    #[arg(long)]
    iban: String,
    /// Recipient BIC
    #[arg(long)]
    bic: String,
    /// Recipient name
    #[arg(long)]
    name: String,
    /// Amount in EUR
    #[arg(long)]
    amount: Decimal,
    /// Reference text, at most 135 characters
    #[arg(long)]
    reference: String,
}

impl TransferArgs {
    pub async fn execute(&self) -> Result<()> {
        let request = TransferRequest {
            pin: self.pin.clone(),
            iban: self.iban.clone(),
            bic: self.bic.clone(),
            name: self.name.clone(),
            amount: self.amount,
            reference: self.reference.clone(),
        };

        let client = build_client()?;
        let transfer = client.transfer(request).await?;

        info!(id = transfer.id, "Transfer created");
        println!("{}", serde_json::to_string_pretty(&transfer)?);

        Ok(())
    }
}
