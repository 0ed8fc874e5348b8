// motorpool-api: Async Rust client for the Motorpool car-rental platform API

pub mod client;
pub mod envelope;
pub mod error;
pub mod models;
pub mod token;
pub mod transport;

mod account;
mod admin;
mod auth;
mod cars;
mod rentals;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use error::Error;
pub use token::TokenStore;
pub use transport::TransportConfig;
