// Account endpoints: profile, wallet balance, transaction history.

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, Balance, Transaction, UserProfile};

impl ApiClient {
    /// Fetch the authenticated user's profile.
    ///
    /// `GET /api/v1/users/me`
    pub async fn profile(&self) -> Result<UserProfile, Error> {
        self.get_auth("/api/v1/users/me").await
    }

    /// Update profile names. Only the provided fields are sent; the
    /// platform rejects an update with nothing to change.
    ///
    /// `PATCH /api/v1/users/me`
    pub async fn update_profile(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Ack, Error> {
        let mut body = Map::new();
        if let Some(v) = first_name {
            body.insert("first_name".to_owned(), Value::from(v));
        }
        if let Some(v) = last_name {
            body.insert("last_name".to_owned(), Value::from(v));
        }
        self.patch_auth("/api/v1/users/me", &body).await
    }

    /// Current wallet balance.
    ///
    /// `GET /api/v1/users/balance`
    pub async fn balance(&self) -> Result<Balance, Error> {
        self.get_auth("/api/v1/users/balance").await
    }

    /// Top up the wallet; the amount must be positive. Answers with the
    /// new balance.
    ///
    /// `PATCH /api/v1/users/balance`
    pub async fn top_up(&self, amount: f64) -> Result<Balance, Error> {
        debug!(amount, "topping up balance");
        let body = serde_json::json!({ "amount": amount });
        self.patch_auth("/api/v1/users/balance", &body).await
    }

    /// Wallet transaction history, newest first.
    ///
    /// `GET /api/v1/transactions`. Admins may pass `user_id` to inspect
    /// someone else's history.
    pub async fn transactions(&self, user_id: Option<u64>) -> Result<Vec<Transaction>, Error> {
        match user_id {
            Some(id) => {
                let params = [("user_id", id.to_string())];
                self.get_auth_with_params("/api/v1/transactions", &params).await
            }
            None => self.get_auth("/api/v1/transactions").await,
        }
    }
}
