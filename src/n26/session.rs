use crate::error::Result;
use crate::n26::BankApi;
use std::fmt;
use tracing::debug;

/// Login credentials for the password grant. Immutable once constructed.
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Opaque grant fields carried along from authentication. Not consulted by
/// the freshness logic.
#[derive(Debug, Clone)]
pub struct TokenMeta {
    pub jti: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone)]
struct TokenState {
    access_token: String,
    /// Epoch seconds at the moment the grant was received.
    issued_at: i64,
    /// Validity window in seconds, server-supplied.
    expires_in: i64,
    meta: TokenMeta,
}

/// Owns the credentials and the current token grant, if any.
///
/// A session starts out unauthenticated and goes stale purely by the passage
/// of time; there is no logout. Renewal overwrites the token state in place.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    state: Option<TokenState>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: None,
        }
    }

    /// Exchange the credentials for a fresh token via `BankApi::auth`.
    ///
    /// On failure the error is propagated unchanged and any previous token
    /// state is left untouched.
    pub async fn authenticate<A: BankApi>(&mut self, api: &A) -> Result<()> {
        let auth = api
            .auth(&self.credentials.identifier, &self.credentials.secret)
            .await?;

        debug!(expires_in = auth.expires_in, "Obtained new access token");

        self.state = Some(TokenState {
            access_token: auth.access_token,
            issued_at: chrono::Utc::now().timestamp(),
            expires_in: auth.expires_in,
            meta: TokenMeta {
                jti: auth.jti,
                scope: auth.scope,
                token_type: auth.token_type,
            },
        });

        Ok(())
    }

    /// Whether the token on hand is still within its validity window.
    ///
    /// Strict inequality: a token whose age equals `expires_in` exactly is
    /// already stale and must be renewed before use.
    pub fn is_fresh(&self, now: i64) -> bool {
        match self.state {
            Some(ref state) => now - state.issued_at < state.expires_in,
            None => false,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn meta(&self) -> Option<&TokenMeta> {
        self.state.as_ref().map(|s| &s.meta)
    }

    /// Install a token grant directly, bypassing authentication.
    #[cfg(test)]
    pub(crate) fn issue_token(&mut self, access_token: &str, issued_at: i64, expires_in: i64) {
        self.state = Some(TokenState {
            access_token: access_token.to_string(),
            issued_at,
            expires_in,
            meta: TokenMeta {
                jti: None,
                scope: None,
                token_type: None,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::n26::mocks::RecordingApi;

    fn mock_credentials() -> Credentials {
        Credentials::new("user@example.com", "hunter2")
    }

    #[test]
    fn test_new_session_is_not_fresh() {
        let session = Session::new(mock_credentials());
        assert!(!session.is_fresh(0));
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_freshness_boundary_is_strict() {
        let mut session = Session::new(mock_credentials());
        session.issue_token("token", 1_000, 1_800);

        assert!(session.is_fresh(1_000));
        assert!(session.is_fresh(2_799));
        // Age exactly equal to the window is already stale.
        assert!(!session.is_fresh(2_800));
        assert!(!session.is_fresh(2_801));
    }

    #[tokio::test]
    async fn test_authenticate_populates_token_state() {
        let api = RecordingApi::new();
        let mut session = Session::new(mock_credentials());

        session.authenticate(&api).await.unwrap();

        assert_eq!(session.access_token(), Some("token-1"));
        assert!(session.is_fresh(chrono::Utc::now().timestamp()));
        assert_eq!(session.meta().unwrap().scope.as_deref(), Some("trust"));
    }

    #[tokio::test]
    async fn test_authenticate_failure_leaves_state_untouched() {
        let api = RecordingApi::new().failing_auth();
        let mut session = Session::new(mock_credentials());
        session.issue_token("old-token", 1_000, 1_800);

        let result = session.authenticate(&api).await;

        assert!(matches!(result, Err(AppError::Auth(_))));
        assert_eq!(session.access_token(), Some("old-token"));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let debug = format!("{:?}", mock_credentials());
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
