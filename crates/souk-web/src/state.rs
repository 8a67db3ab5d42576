//! Process-wide application state.

use crate::collaborators::{
    DynMailClient, DynNewsletterClient, DynPaymentClient, MailgunClient, MailchimpClient,
    StripeChargeClient,
};
use crate::config::Config;
use crate::session::Sessions;
use souk_store::Store;
use std::sync::Arc;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Everything the handlers need: the store, the session map, and the
/// injected collaborators.
pub struct AppState {
    /// Document store.
    pub store: Arc<Store>,
    /// Session map.
    pub sessions: Sessions,
    /// Loaded configuration.
    pub config: Config,
    /// Payment processor.
    pub payment: DynPaymentClient,
    /// Contact mail sender.
    pub mail: DynMailClient,
    /// Newsletter list manager.
    pub newsletter: DynNewsletterClient,
}

impl AppState {
    /// Build state with the production collaborators.
    pub fn new(config: Config) -> SharedState {
        let payment = Arc::new(StripeChargeClient::new(&config.payment));
        let mail = Arc::new(MailgunClient::new(&config.mail));
        let newsletter = Arc::new(MailchimpClient::new(&config.newsletter));
        Self::with_collaborators(config, Arc::new(Store::new()), payment, mail, newsletter)
    }

    /// Build state with explicit collaborators and store. Tests inject
    /// mocks here.
    pub fn with_collaborators(
        config: Config,
        store: Arc<Store>,
        payment: DynPaymentClient,
        mail: DynMailClient,
        newsletter: DynNewsletterClient,
    ) -> SharedState {
        Arc::new(AppState {
            store,
            sessions: Sessions::new(),
            config,
            payment,
            mail,
            newsletter,
        })
    }
}
