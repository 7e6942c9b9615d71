//! Track PMS API access: credentials, wire models, the HTTP client and the
//! unit paginator.

pub mod auth;
pub mod client;
pub mod error;
pub(crate) mod lenient;
pub mod models;
pub mod paginator;

pub use auth::Credentials;
pub use client::{http_client, TrackClient, UnitSource};
pub use error::TrackError;
pub use models::Unit;
