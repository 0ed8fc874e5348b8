// ── Session lifecycle ──
//
// Owns the shared token slot and an API client built from AppConfig.
// Login and register store the bearer token, logout clears it. The
// slot is shared with the client, so authenticated requests always
// read the latest token at call time.

use std::sync::Arc;
use std::time::Duration;

use motorpool_api::models::CurrentUser;
use motorpool_api::{ApiClient, TokenStore, TransportConfig};
use secrecy::SecretString;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::CoreError;
use crate::guard::{self, RouteDecision};

/// A connection to the rental platform, authenticated or not.
///
/// Cloning is cheap; clones share the HTTP client and the token slot.
#[derive(Clone)]
pub struct Session {
    client: Arc<ApiClient>,
    token: TokenStore,
}

impl Session {
    /// Build a session from configuration.
    ///
    /// No network traffic happens until the first request.
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let token = TokenStore::new();
        let transport = TransportConfig {
            timeout: Duration::from_secs(config.timeout_secs),
            ..TransportConfig::default()
        };
        let client = ApiClient::with_transport(config.api_base.clone(), &transport)?
            .with_token_store(token.clone());

        Ok(Self {
            client: Arc::new(client),
            token,
        })
    }

    /// Borrow the underlying API client for direct endpoint access.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Whether a bearer token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    /// Log in and keep the returned bearer token for later requests.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        let response = self.client.login(email, password).await?;
        self.token.set(response.token);
        debug!(email, "session authenticated");
        Ok(())
    }

    /// Create an account and keep its bearer token.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), CoreError> {
        let response = self
            .client
            .register(email, password, first_name, last_name)
            .await?;
        self.token.set(response.token);
        debug!(email, "session registered");
        Ok(())
    }

    /// Drop the bearer token. Later authenticated calls will be
    /// rejected by the platform until the next login.
    pub fn logout(&self) {
        self.token.clear();
        debug!("session token cleared");
    }

    /// Fetch the identity behind the current token.
    pub async fn current_user(&self) -> Result<CurrentUser, CoreError> {
        Ok(self.client.me().await?)
    }

    /// Gate an admin route on the current session's identity.
    pub async fn require_admin(&self) -> RouteDecision {
        guard::require_admin(&self.client).await
    }
}
