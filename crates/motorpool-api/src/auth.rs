// Registration, login, and identity endpoints.
//
// Register and login are unauthenticated and answer with a bearer token
// inside the envelope. Nothing is stored here; session handling lives a
// layer up in motorpool-core.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CurrentUser, TokenResponse};

impl ApiClient {
    /// Create an account and receive its bearer token.
    ///
    /// `POST /auth/register`
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        first_name: &str,
        last_name: &str,
    ) -> Result<TokenResponse, Error> {
        debug!(email, "registering account");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
            "first_name": first_name,
            "last_name": last_name,
        });
        self.post("/auth/register", &body).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// `POST /auth/login`
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("/auth/login", &body).await
    }

    /// Fetch the authenticated identity summary.
    ///
    /// `GET /auth/me` (authenticated)
    pub async fn me(&self) -> Result<CurrentUser, Error> {
        self.get_auth("/auth/me").await
    }
}
