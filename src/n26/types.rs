use crate::error::{AppError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// SEPA credit transfers cap the unstructured remittance line at 140
/// characters; N26 reserves five of them.
pub const MAX_REFERENCE_LENGTH: usize = 135;

/// Token grant returned by `POST /oauth/token`.
///
/// `jti`, `scope` and `token_type` are carried along verbatim; only
/// `access_token` and `expires_in` feed the session lifecycle.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Validity window in seconds, measured from the moment of issue.
    pub expires_in: i64,
    pub jti: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub iban: String,
    pub status: Option<String>,
    pub usable_balance: Decimal,
    pub available_balance: Decimal,
    pub bank_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub total_results: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressPage {
    pub paging: Paging,
    pub data: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub address_line1: Option<String>,
    pub street_name: Option<String>,
    pub house_number_block: Option<String>,
    pub zip_code: Option<String>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardPage {
    pub paging: Paging,
    pub data: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub card_type: Option<String>,
    pub n26_status: Option<String>,
    pub masked_pan: Option<String>,
    pub expiration_date: Option<String>,
    pub pin_defined: Option<bool>,
    pub card_activated: Option<bool>,
    pub username_on_card: Option<String>,
}

/// `GET /api/me` — the profile behind the credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub kyc_first_name: Option<String>,
    pub kyc_last_name: Option<String>,
    pub title: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<i64>,
    pub birth_place: Option<String>,
    pub mobile_phone_number: Option<String>,
    pub nationality: Option<String>,
    pub signup_completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    pub iban: String,
    pub name: String,
    pub bic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub amount: Decimal,
    pub currency_code: Option<String>,
    pub original_amount: Option<Decimal>,
    pub original_currency: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub merchant_name: Option<String>,
    pub merchant_city: Option<String>,
    pub mcc: Option<u32>,
    pub mcc_group: Option<u32>,
    pub category: Option<String>,
    pub partner_name: Option<String>,
    pub partner_iban: Option<String>,
    pub partner_bic: Option<String>,
    pub reference_text: Option<String>,
    pub visible_ts: Option<i64>,
    pub pending: Option<bool>,
    pub recurring: Option<bool>,
}

/// Query options for `GET /api/smrt/transactions`. All fields optional;
/// `Default` gives an unfiltered listing.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub limit: Option<u32>,
    pub categories: Vec<String>,
    /// "From" timestamp bound, epoch milliseconds.
    pub from: Option<i64>,
    /// "To" timestamp bound, epoch milliseconds.
    pub to: Option<i64>,
    pub text: Option<String>,
    pub pending: Option<bool>,
}

impl TransactionFilter {
    /// Render the filter as query-string pairs, omitting unset fields.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if !self.categories.is_empty() {
            query.push(("categories", self.categories.join(",")));
        }
        if let Some(from) = self.from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            query.push(("to", to.to_string()));
        }
        if let Some(ref text) = self.text {
            query.push(("textFilter", text.clone()));
        }
        if let Some(pending) = self.pending {
            query.push(("pending", pending.to_string()));
        }
        query
    }
}

/// Outgoing SEPA transfer. Validated locally before any network I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub pin: String,
    pub iban: String,
    pub bic: String,
    pub name: String,
    pub amount: Decimal,
    pub reference: String,
}

impl TransferRequest {
    /// Pre-flight validation.
    ///
    /// Empty strings and a zero amount count as missing. The reference is
    /// limited to [`MAX_REFERENCE_LENGTH`] characters.
    pub fn validate(&self) -> Result<()> {
        if self.pin.is_empty()
            || self.iban.is_empty()
            || self.bic.is_empty()
            || self.name.is_empty()
            || self.reference.is_empty()
            || self.amount.is_zero()
        {
            return Err(AppError::MissingParameters);
        }

        if self.reference.chars().count() > MAX_REFERENCE_LENGTH {
            return Err(AppError::ReferenceTooLong);
        }

        Ok(())
    }
}

/// Transfer confirmation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub n26_iban: Option<String>,
    pub reference_text: Option<String>,
    pub partner_name: Option<String>,
    pub partner_iban: Option<String>,
    pub partner_bic: Option<String>,
    pub partner_account_is_sepa: Option<bool>,
    pub amount: Decimal,
    pub currency_code: Option<String>,
    pub link_id: Option<String>,
    pub recurring: Option<bool>,
    pub visible_ts: Option<i64>,
}
