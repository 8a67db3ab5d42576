//! External collaborators: payment, contact mail, newsletter.
//!
//! Each collaborator is an object-safe async trait constructed once at
//! startup and injected through the app state, so handlers and tests never
//! reach for a concrete client themselves.

use std::sync::Arc;
use thiserror::Error;

mod mail;
mod newsletter;
mod payment;

pub mod mock;

pub use mail::MailgunClient;
pub use newsletter::MailchimpClient;
pub use payment::StripeChargeClient;

/// A collaborator call failure.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The payment processor declined the charge.
    #[error("charge declined: {0}")]
    ChargeDeclined(String),

    /// The address is already on the newsletter list.
    #[error("already subscribed: {0}")]
    AlreadySubscribed(String),

    /// Transport or API failure.
    #[error("collaborator request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(e: reqwest::Error) -> Self {
        CollaboratorError::Request(e.to_string())
    }
}

/// Receipt for a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    /// Processor-side charge reference.
    pub reference: String,
}

/// A contact-form submission to forward by mail.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender address, used as reply-to.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Payment processor.
#[async_trait::async_trait]
pub trait PaymentClient: Send + Sync {
    /// Charge the given amount in minor units against a card token.
    async fn charge(
        &self,
        amount_minor: i64,
        currency_code: &str,
        token: &str,
        description: &str,
    ) -> Result<ChargeReceipt, CollaboratorError>;
}

/// Outbound mail for the contact form.
#[async_trait::async_trait]
pub trait MailClient: Send + Sync {
    /// Forward a contact submission to the store mailbox.
    async fn send_contact(&self, message: ContactMessage) -> Result<(), CollaboratorError>;
}

/// Newsletter list manager.
#[async_trait::async_trait]
pub trait NewsletterClient: Send + Sync {
    /// Subscribe an address to the list.
    ///
    /// A duplicate subscription is `AlreadySubscribed`.
    async fn subscribe(&self, email: &str) -> Result<(), CollaboratorError>;
}

pub type DynPaymentClient = Arc<dyn PaymentClient>;
pub type DynMailClient = Arc<dyn MailClient>;
pub type DynNewsletterClient = Arc<dyn NewsletterClient>;
