use crate::error::{AppError, Result};
use crate::n26::session::{Credentials, Session};
use crate::n26::types::{
    Account, AddressPage, CardPage, Profile, Recipient, Transaction, TransactionFilter, Transfer,
    TransferRequest,
};
use crate::n26::BankApi;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Session-aware client for the N26 API.
///
/// Every endpoint method funnels through [`dispatch`](Self::dispatch), which
/// renews the access token when it has outlived its validity window before
/// handing the call to the underlying [`BankApi`]. The API is only reachable
/// from inside that funnel, so a call can never skip the freshness check.
pub struct N26Client<A> {
    api: A,
    session: RwLock<Session>,
}

impl<A: BankApi> N26Client<A> {
    pub fn new(api: A, credentials: Credentials) -> Self {
        Self {
            api,
            session: RwLock::new(Session::new(credentials)),
        }
    }

    /// Authenticate now, regardless of the current token's state.
    #[instrument(name = "Authenticating to N26", skip_all)]
    pub async fn authenticate(&self) -> Result<()> {
        let mut session = self.session.write().await;
        session.authenticate(&self.api).await
    }

    /// Run one remote operation with a token that is fresh at dispatch time.
    ///
    /// Fresh-token loads take only the read lock, so concurrent calls on a
    /// live session are never serialized. Renewal happens under the write
    /// lock with a re-check, so several calls finding the token stale at once
    /// authenticate a single time between them.
    async fn dispatch<T, F>(&self, call: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a A, String) -> BoxFuture<'a, Result<T>>,
    {
        let token = match self.fresh_token().await {
            Some(token) => token,
            None => self.renew_token().await?,
        };

        call(&self.api, token).await
    }

    async fn fresh_token(&self) -> Option<String> {
        let session = self.session.read().await;
        let now = chrono::Utc::now().timestamp();
        if session.is_fresh(now) {
            session.access_token().map(str::to_owned)
        } else {
            None
        }
    }

    async fn renew_token(&self) -> Result<String> {
        let mut session = self.session.write().await;

        // Another task may have renewed while we waited for the write lock.
        let now = chrono::Utc::now().timestamp();
        if !session.is_fresh(now) {
            debug!("Access token stale, re-authenticating");
            session.authenticate(&self.api).await?;
        }

        session
            .access_token()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Auth("no access token after authentication".to_string()))
    }

    /// Get account details and balances.
    #[instrument(name = "Fetching account", skip_all)]
    pub async fn account(&self) -> Result<Account> {
        self.dispatch(|api, token| async move { api.get_account(&token).await }.boxed())
            .await
    }

    /// Get registered addresses.
    #[instrument(name = "Fetching addresses", skip_all)]
    pub async fn addresses(&self) -> Result<AddressPage> {
        self.dispatch(|api, token| async move { api.get_addresses(&token).await }.boxed())
            .await
    }

    /// Get cards attached to the account.
    #[instrument(name = "Fetching cards", skip_all)]
    pub async fn cards(&self) -> Result<CardPage> {
        self.dispatch(|api, token| async move { api.get_cards(&token).await }.boxed())
            .await
    }

    /// Get the profile of the account holder.
    #[instrument(name = "Fetching profile", skip_all)]
    pub async fn me(&self) -> Result<Profile> {
        self.dispatch(|api, token| async move { api.get_me(&token).await }.boxed())
            .await
    }

    /// Create or update the memo attached to a transaction.
    #[instrument(name = "Saving memo", skip_all, fields(transaction_id))]
    pub async fn memo(&self, transaction_id: &str, text: &str) -> Result<()> {
        let transaction_id = transaction_id.to_owned();
        let text = text.to_owned();
        self.dispatch(move |api, token| {
            async move {
                api.create_or_update_memo(&token, &transaction_id, &text)
                    .await
            }
            .boxed()
        })
        .await
    }

    /// Get known transfer recipients.
    #[instrument(name = "Fetching recipients", skip_all)]
    pub async fn recipients(&self) -> Result<Vec<Recipient>> {
        self.dispatch(|api, token| async move { api.get_recipients(&token).await }.boxed())
            .await
    }

    /// Get transactions matching the filter.
    #[instrument(name = "Fetching transactions", skip_all)]
    pub async fn transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>> {
        self.dispatch(move |api, token| {
            async move { api.get_transactions(&token, &filter).await }.boxed()
        })
        .await
    }

    /// Create a SEPA transfer.
    ///
    /// The request is validated locally first; an invalid request fails with
    /// [`AppError::MissingParameters`] or [`AppError::ReferenceTooLong`]
    /// before any network I/O and without touching the session.
    #[instrument(name = "Creating transfer", skip_all)]
    pub async fn transfer(&self, request: TransferRequest) -> Result<Transfer> {
        request.validate()?;
        self.dispatch(move |api, token| {
            async move { api.create_transfer(&token, &request).await }.boxed()
        })
        .await
    }
}
