// Wire types for the rental platform API.
//
// Entities persisted through the platform's ORM serialize their base
// columns in PascalCase (`ID`, `CreatedAt`), while domain columns are
// snake_case; the renames below pin that down. Fields the platform can
// omit are defaulted so a sparse row never fails a whole list response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Auth ─────────────────────────────────────────────────────────────

/// Bearer token issued by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: SecretString,
}

/// Identity summary from `GET /auth/me`.
///
/// `is_admin` is the authorization signal; `role` is informational
/// (`"user"` or `"admin"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_admin: bool,
}

// ── Cars ─────────────────────────────────────────────────────────────

/// A car in the fleet.
///
/// `category` is one of `economy`, `business`, `luxury`; `status` one of
/// `available`, `booked`, `maintenance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Car {
    #[serde(default, rename = "ID")]
    pub id: u64,
    #[serde(default, rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mark: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price_per_hour: f64,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub rating: f64,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a car (admin only).
#[derive(Debug, Clone, Serialize)]
pub struct NewCar {
    pub mark: String,
    pub model: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub price_per_hour: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Partial update for a car (admin only). Absent fields are left as-is
/// by the platform, so everything is optional and skipped when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CarUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// An occupied window in a car's schedule, from
/// `GET /api/v1/cars/{id}/bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarBooking {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: String,
}

/// Query filters for the car catalogue.
///
/// Everything is optional; only set fields become query parameters and
/// values go over the wire unchecked. The platform accepts
/// `price_per_hour`, `rating`, or `created_at` as sort keys and answers
/// 400 `invalid limit` for `limit` values outside `1..=200`.
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    pub mark: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    /// `asc` (platform default) or `desc`.
    pub order: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl CarFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.sort = Some(key.into());
        self
    }

    pub fn descending(mut self) -> Self {
        self.order = Some("desc".to_owned());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render the set fields as query parameters.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(v) = &self.mark {
            params.push(("mark", v.clone()));
        }
        if let Some(v) = &self.category {
            params.push(("category", v.clone()));
        }
        if let Some(v) = &self.status {
            params.push(("status", v.clone()));
        }
        if let Some(v) = self.min_price {
            params.push(("min_price", v.to_string()));
        }
        if let Some(v) = self.max_price {
            params.push(("max_price", v.to_string()));
        }
        if let Some(v) = &self.sort {
            params.push(("sort", v.clone()));
        }
        if let Some(v) = &self.order {
            params.push(("order", v.clone()));
        }
        if let Some(v) = self.limit {
            params.push(("limit", v.to_string()));
        }
        if let Some(v) = self.offset {
            params.push(("offset", v.to_string()));
        }
        params
    }
}

// ── Rentals ──────────────────────────────────────────────────────────

/// A rental agreement.
///
/// Lifecycle `status`: `pending` -> `active` -> `completed`, or
/// `cancelled` from either of the first two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    #[serde(default, rename = "ID")]
    pub id: u64,
    #[serde(default, rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub car_id: u64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for booking a car.
#[derive(Debug, Clone, Serialize)]
pub struct NewRental {
    pub car_id: u64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Confirmation returned when a rental is created, before payment.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalReceipt {
    #[serde(default)]
    pub rental_id: u64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Plain `{"message": ...}` acknowledgement (payment, completion,
/// cancellation, profile updates).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

// ── Account ──────────────────────────────────────────────────────────

/// The authenticated user's profile, from `GET /api/v1/users/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub balance: f64,
}

/// Wallet balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub balance: f64,
}

/// A wallet transaction (top-ups and rental payments).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, rename = "ID")]
    pub id: u64,
    #[serde(default, rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub rental_id: Option<u64>,
    /// `topup` or `payment`.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: f64,
    /// `success` or `failed`.
    #[serde(default)]
    pub status: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Admin ────────────────────────────────────────────────────────────

/// One day of the trailing-week revenue series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueByDay {
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub revenue: f64,
}

/// Fleet and revenue metrics from `GET /api/v1/admin/metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminMetrics {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub revenue_last_30_days: f64,
    /// Per-day revenue for the last seven days, oldest first. The
    /// platform serializes the series as `null` rather than `[]` when
    /// no payments fall inside the window.
    #[serde(default)]
    pub revenue_last_7_days: Option<Vec<RevenueByDay>>,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_cars: u64,
    #[serde(default)]
    pub total_rentals: u64,
    #[serde(default)]
    pub rentals_by_status: BTreeMap<String, u64>,
    /// Share of the fleet currently booked, in percent.
    #[serde(default)]
    pub fleet_load: f64,
    #[serde(default)]
    pub average_car_rating: f64,
    #[serde(default)]
    pub average_user_rating: f64,
    /// Catch-all for leaderboards and later additions
    /// (`top_cars_by_rentals`, `top_users_by_spend`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
