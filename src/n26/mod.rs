mod client;
mod http;
mod session;
pub mod types;

pub use client::N26Client;
pub use http::HttpApi;
pub use session::{Credentials, Session};

use crate::error::Result;
use crate::n26::types::{
    Account, AddressPage, AuthResponse, CardPage, Profile, Recipient, Transaction,
    TransactionFilter, Transfer, TransferRequest,
};

use async_trait::async_trait;

/// The remote API collaborator. One method per capability, each taking the
/// bearer token to use; `auth` exchanges credentials for a token grant.
///
/// The HTTP implementation is [`HttpApi`]; tests substitute a double.
#[async_trait]
pub trait BankApi: Send + Sync {
    async fn auth(&self, identifier: &str, secret: &str) -> Result<AuthResponse>;

    async fn get_account(&self, token: &str) -> Result<Account>;

    async fn get_addresses(&self, token: &str) -> Result<AddressPage>;

    async fn get_cards(&self, token: &str) -> Result<CardPage>;

    async fn get_me(&self, token: &str) -> Result<Profile>;

    async fn create_or_update_memo(
        &self,
        token: &str,
        transaction_id: &str,
        memo: &str,
    ) -> Result<()>;

    async fn get_recipients(&self, token: &str) -> Result<Vec<Recipient>>;

    async fn get_transactions(
        &self,
        token: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;

    async fn create_transfer(&self, token: &str, request: &TransferRequest) -> Result<Transfer>;
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;
    use crate::error::AppError;
    use crate::n26::types::Paging;
    use rust_decimal::prelude::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// `BankApi` double that records every call and the token it was handed.
    /// `auth` issues sequential tokens (`token-1`, `token-2`, …).
    #[derive(Clone)]
    pub(crate) struct RecordingApi {
        pub calls: Arc<Mutex<Vec<String>>>,
        pub tokens_seen: Arc<Mutex<Vec<String>>>,
        issued: Arc<AtomicUsize>,
        expires_in: i64,
        fail_auth: bool,
        fail_calls: bool,
    }

    impl RecordingApi {
        pub(crate) fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                tokens_seen: Arc::new(Mutex::new(Vec::new())),
                issued: Arc::new(AtomicUsize::new(0)),
                expires_in: 1799,
                fail_auth: false,
                fail_calls: false,
            }
        }

        pub(crate) fn failing_auth(mut self) -> Self {
            self.fail_auth = true;
            self
        }

        pub(crate) fn failing_calls(mut self) -> Self {
            self.fail_calls = true;
            self
        }

        pub(crate) fn call_names(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn tokens(&self) -> Vec<String> {
            self.tokens_seen.lock().unwrap().clone()
        }

        fn record(&self, name: &str, token: &str) -> Result<()> {
            self.calls.lock().unwrap().push(name.to_string());
            self.tokens_seen.lock().unwrap().push(token.to_string());
            if self.fail_calls {
                return Err(AppError::Api(format!("{name} failed")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BankApi for RecordingApi {
        async fn auth(&self, _identifier: &str, _secret: &str) -> Result<AuthResponse> {
            self.calls.lock().unwrap().push("auth".to_string());
            if self.fail_auth {
                return Err(AppError::Auth("invalid credentials".to_string()));
            }
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AuthResponse {
                access_token: format!("token-{n}"),
                expires_in: self.expires_in,
                jti: None,
                scope: Some("trust".to_string()),
                token_type: Some("bearer".to_string()),
            })
        }

        async fn get_account(&self, token: &str) -> Result<Account> {
            self.record("getAccount", token)?;
            Ok(Account {
                id: "acc-1".to_string(),
                iban: "DE89370400440532013000".to_string(),
                status: Some("OPEN_PRIMARY_ACCOUNT".to_string()),
                usable_balance: dec!(100.00),
                available_balance: dec!(100.00),
                bank_balance: dec!(120.00),
            })
        }

        async fn get_addresses(&self, token: &str) -> Result<AddressPage> {
            self.record("getAddresses", token)?;
            Ok(AddressPage {
                paging: Paging { total_results: 0 },
                data: Vec::new(),
            })
        }

        async fn get_cards(&self, token: &str) -> Result<CardPage> {
            self.record("getCards", token)?;
            Ok(CardPage {
                paging: Paging { total_results: 0 },
                data: Vec::new(),
            })
        }

        async fn get_me(&self, token: &str) -> Result<Profile> {
            self.record("getMe", token)?;
            Ok(Profile {
                id: "user-1".to_string(),
                email: "user@example.com".to_string(),
                first_name: Some("Max".to_string()),
                last_name: Some("Mustermann".to_string()),
                kyc_first_name: None,
                kyc_last_name: None,
                title: None,
                gender: None,
                birth_date: None,
                birth_place: None,
                mobile_phone_number: None,
                nationality: None,
                signup_completed: Some(true),
            })
        }

        async fn create_or_update_memo(
            &self,
            token: &str,
            _transaction_id: &str,
            _memo: &str,
        ) -> Result<()> {
            self.record("createOrUpdateMemo", token)
        }

        async fn get_recipients(&self, token: &str) -> Result<Vec<Recipient>> {
            self.record("getRecipients", token)?;
            Ok(Vec::new())
        }

        async fn get_transactions(
            &self,
            token: &str,
            _filter: &TransactionFilter,
        ) -> Result<Vec<Transaction>> {
            self.record("getTransactions", token)?;
            Ok(Vec::new())
        }

        async fn create_transfer(
            &self,
            token: &str,
            request: &TransferRequest,
        ) -> Result<Transfer> {
            self.record("createTransfer", token)?;
            Ok(Transfer {
                id: "transfer-1".to_string(),
                n26_iban: None,
                reference_text: Some(request.reference.clone()),
                partner_name: Some(request.name.clone()),
                partner_iban: Some(request.iban.clone()),
                partner_bic: Some(request.bic.clone()),
                partner_account_is_sepa: Some(true),
                amount: request.amount,
                currency_code: Some("EUR".to_string()),
                link_id: None,
                recurring: Some(false),
                visible_ts: None,
            })
        }
    }
}
