// Admin endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::AdminMetrics;

impl ApiClient {
    /// Fleet, revenue, and user metrics (admin).
    ///
    /// `GET /api/v1/admin/metrics`
    pub async fn admin_metrics(&self) -> Result<AdminMetrics, Error> {
        self.get_auth("/api/v1/admin/metrics").await
    }
}
