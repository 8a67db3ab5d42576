//! The Souk HTTP server.
//!
//! Server-rendered storefront: shop listings, cart, checkout, accounts,
//! marketing pages, and the admin back office. State is shared through an
//! `Arc<AppState>` holding the store, the session map and the injected
//! payment/mail/newsletter collaborators.

pub mod carts;
pub mod checkout;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::WebError;
pub use routes::build_router;
pub use state::{AppState, SharedState};
