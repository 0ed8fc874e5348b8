// motorpool-core: Session, notification, and configuration layer over motorpool-api.

pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod stream;
pub mod toast;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AppConfig, ConfigError};
pub use error::CoreError;
pub use guard::{RouteDecision, require_admin};
pub use session::Session;
pub use stream::ToastStream;
pub use toast::{Toast, ToastId, ToastLevel, ToastStore};
