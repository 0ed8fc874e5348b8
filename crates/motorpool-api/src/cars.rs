// Car catalogue endpoints.
//
// Browsing is public; create, update, and delete are admin-gated
// server-side and use the authenticated verbs.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Car, CarBooking, CarFilter, CarUpdate, NewCar};

impl ApiClient {
    /// List the catalogue, filtered, sorted, and paged per `filter`.
    ///
    /// `GET /api/v1/cars`
    pub async fn list_cars(&self, filter: &CarFilter) -> Result<Vec<Car>, Error> {
        let params = filter.to_params();
        if params.is_empty() {
            self.get("/api/v1/cars").await
        } else {
            self.get_with_params("/api/v1/cars", &params).await
        }
    }

    /// Fetch a single car.
    ///
    /// `GET /api/v1/cars/{id}`
    pub async fn get_car(&self, id: u64) -> Result<Car, Error> {
        self.get(&format!("/api/v1/cars/{id}")).await
    }

    /// Occupied windows in a car's schedule (cancelled rentals excluded).
    ///
    /// `GET /api/v1/cars/{id}/bookings`
    pub async fn car_bookings(&self, id: u64) -> Result<Vec<CarBooking>, Error> {
        self.get(&format!("/api/v1/cars/{id}/bookings")).await
    }

    /// Add a car to the fleet (admin).
    ///
    /// `POST /api/v1/cars`, answers with the stored car.
    pub async fn create_car(&self, car: &NewCar) -> Result<Car, Error> {
        debug!(mark = %car.mark, model = %car.model, "creating car");
        self.post_auth("/api/v1/cars", car).await
    }

    /// Apply a partial update to a car (admin).
    ///
    /// `PUT /api/v1/cars/{id}`, answers with the updated car.
    pub async fn update_car(&self, id: u64, update: &CarUpdate) -> Result<Car, Error> {
        debug!(id, "updating car");
        self.put_auth(&format!("/api/v1/cars/{id}"), update).await
    }

    /// Remove a car from the fleet (admin).
    ///
    /// `DELETE /api/v1/cars/{id}`, answers 204 with no body.
    pub async fn delete_car(&self, id: u64) -> Result<(), Error> {
        debug!(id, "deleting car");
        self.delete_auth(&format!("/api/v1/cars/{id}")).await
    }
}
