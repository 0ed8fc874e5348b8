// Rental lifecycle endpoints.
//
// A rental is created `pending`, becomes `active` once paid, and ends as
// `completed` or `cancelled`. The lifecycle actions are bodyless POSTs
// that answer with a `{"message": ...}` acknowledgement.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, NewRental, Rental, RentalReceipt};

impl ApiClient {
    /// Book a car.
    ///
    /// `POST /api/v1/rentals`, answers with a receipt carrying the rental
    /// id and computed total price.
    pub async fn create_rental(&self, rental: &NewRental) -> Result<RentalReceipt, Error> {
        debug!(car_id = rental.car_id, "creating rental");
        self.post_auth("/api/v1/rentals", rental).await
    }

    /// List rentals visible to the caller.
    ///
    /// `GET /api/v1/rentals`. Regular users get their own; admins may
    /// pass `user_id` to inspect someone else's.
    pub async fn list_rentals(&self, user_id: Option<u64>) -> Result<Vec<Rental>, Error> {
        match user_id {
            Some(id) => {
                let params = [("user_id", id.to_string())];
                self.get_auth_with_params("/api/v1/rentals", &params).await
            }
            None => self.get_auth("/api/v1/rentals").await,
        }
    }

    /// Pay for a pending rental from the wallet balance.
    ///
    /// `POST /api/v1/rentals/{id}/pay`
    pub async fn pay_rental(&self, id: u64) -> Result<Ack, Error> {
        debug!(id, "paying rental");
        self.post_auth_empty(&format!("/api/v1/rentals/{id}/pay")).await
    }

    /// Complete an active rental and free the car.
    ///
    /// `POST /api/v1/rentals/{id}/finish`
    pub async fn finish_rental(&self, id: u64) -> Result<Ack, Error> {
        debug!(id, "finishing rental");
        self.post_auth_empty(&format!("/api/v1/rentals/{id}/finish")).await
    }

    /// Cancel a pending or active rental (active ones are refunded).
    ///
    /// `POST /api/v1/rentals/{id}/cancel`
    pub async fn cancel_rental(&self, id: u64) -> Result<Ack, Error> {
        debug!(id, "cancelling rental");
        self.post_auth_empty(&format!("/api/v1/rentals/{id}/cancel")).await
    }
}
