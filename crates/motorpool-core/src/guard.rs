// ── Admin route guard ──

use motorpool_api::ApiClient;
use tracing::debug;

/// Outcome of a route guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let navigation continue to the requested route.
    Proceed,
    /// Send the visitor to the given path instead.
    Redirect(String),
}

/// Gate a route on the caller being an administrator.
///
/// Asks the platform who the bearer token belongs to and only admits
/// admins. Anything else -- a non-admin role, a rejected token, or the
/// platform being unreachable -- turns into a redirect to the home page
/// rather than an error surface.
pub async fn require_admin(client: &ApiClient) -> RouteDecision {
    match client.me().await {
        Ok(user) if user.is_admin => RouteDecision::Proceed,
        Ok(user) => {
            debug!(role = %user.role, "admin route refused, not an admin");
            RouteDecision::Redirect("/".to_owned())
        }
        Err(err) => {
            debug!(error = %err, "admin route refused, identity check failed");
            RouteDecision::Redirect("/".to_owned())
        }
    }
}
