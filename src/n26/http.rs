use crate::error::{AppError, Result};
use crate::n26::types::{
    Account, AddressPage, AuthResponse, CardPage, Profile, Recipient, Transaction,
    TransactionFilter, Transfer, TransferRequest,
};
use crate::n26::BankApi;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;

const API_BASE_URL: &str = "https://api.tech26.de";

// Fixed OAuth client for the password grant, shared by all official apps.
const CLIENT_ID: &str = "my-trusted-wdpClient";
const CLIENT_SECRET: &str = "secret";

/// `BankApi` backed by the N26 REST API over reqwest.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let response = Self::ensure_success(response, what).await?;
        Ok(response.json().await?)
    }

    async fn ensure_success(response: Response, what: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Api(format!(
            "Failed to {}: {} - {}",
            what, status, body
        )))
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BankApi for HttpApi {
    #[instrument(name = "Requesting token grant", skip_all)]
    async fn auth(&self, identifier: &str, secret: &str) -> Result<AuthResponse> {
        let response = self
            .client
            .post(self.url("/oauth/token"))
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", identifier),
                ("password", secret),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "Token grant rejected: {} - {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn get_account(&self, token: &str) -> Result<Account> {
        self.get_json(token, "/api/accounts", &[], "fetch account")
            .await
    }

    async fn get_addresses(&self, token: &str) -> Result<AddressPage> {
        self.get_json(token, "/api/addresses", &[], "fetch addresses")
            .await
    }

    async fn get_cards(&self, token: &str) -> Result<CardPage> {
        self.get_json(token, "/api/v2/cards", &[], "fetch cards")
            .await
    }

    async fn get_me(&self, token: &str) -> Result<Profile> {
        self.get_json(token, "/api/me", &[], "fetch profile").await
    }

    async fn create_or_update_memo(
        &self,
        token: &str,
        transaction_id: &str,
        memo: &str,
    ) -> Result<()> {
        let path = format!("/api/transactions/{}/memo", transaction_id);
        let response = self
            .client
            .put(self.url(&path))
            .bearer_auth(token)
            .json(&json!({ "memo": memo }))
            .send()
            .await?;

        Self::ensure_success(response, "save memo").await?;
        Ok(())
    }

    async fn get_recipients(&self, token: &str) -> Result<Vec<Recipient>> {
        self.get_json(
            token,
            "/api/transactions/recipients",
            &[],
            "fetch recipients",
        )
        .await
    }

    async fn get_transactions(
        &self,
        token: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.get_json(
            token,
            "/api/smrt/transactions",
            &filter.to_query(),
            "fetch transactions",
        )
        .await
    }

    async fn create_transfer(&self, token: &str, request: &TransferRequest) -> Result<Transfer> {
        let body = json!({
            "transaction": {
                "pin": request.pin,
                "partnerIban": request.iban,
                "partnerBic": request.bic,
                "partnerName": request.name,
                "amount": request.amount,
                "referenceText": request.reference,
                "type": "DT",
            }
        });

        let response = self
            .client
            .post(self.url("/api/transactions"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response, "create transfer").await?;
        Ok(response.json().await?)
    }
}
