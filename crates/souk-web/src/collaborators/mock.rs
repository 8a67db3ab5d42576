//! In-memory collaborators for tests.

use super::{
    ChargeReceipt, CollaboratorError, ContactMessage, MailClient, NewsletterClient, PaymentClient,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Payment client that records charges and can be told to decline.
#[derive(Default)]
pub struct MockPaymentClient {
    decline: AtomicBool,
    counter: AtomicU64,
    /// Charges accepted so far, as (amount, currency, token).
    pub charges: Mutex<Vec<(i64, String, String)>>,
}

impl MockPaymentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent charge fail.
    pub fn declining() -> Self {
        let client = Self::default();
        client.decline.store(true, Ordering::SeqCst);
        client
    }
}

#[async_trait::async_trait]
impl PaymentClient for MockPaymentClient {
    async fn charge(
        &self,
        amount_minor: i64,
        currency_code: &str,
        token: &str,
        _description: &str,
    ) -> Result<ChargeReceipt, CollaboratorError> {
        if self.decline.load(Ordering::SeqCst) {
            return Err(CollaboratorError::ChargeDeclined(
                "card declined".to_string(),
            ));
        }
        self.charges
            .lock()
            .push((amount_minor, currency_code.to_string(), token.to_string()));
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(ChargeReceipt {
            reference: format!("ch_mock_{}", n),
        })
    }
}

/// Mail client that collects sent messages.
#[derive(Default)]
pub struct MockMailClient {
    pub sent: Mutex<Vec<ContactMessage>>,
}

impl MockMailClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MailClient for MockMailClient {
    async fn send_contact(&self, message: ContactMessage) -> Result<(), CollaboratorError> {
        self.sent.lock().push(message);
        Ok(())
    }
}

/// Newsletter client that remembers subscribed addresses.
#[derive(Default)]
pub struct MockNewsletterClient {
    pub subscribed: Mutex<Vec<String>>,
}

impl MockNewsletterClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl NewsletterClient for MockNewsletterClient {
    async fn subscribe(&self, email: &str) -> Result<(), CollaboratorError> {
        let mut subscribed = self.subscribed.lock();
        if subscribed.iter().any(|e| e == email) {
            return Err(CollaboratorError::AlreadySubscribed(email.to_string()));
        }
        subscribed.push(email.to_string());
        Ok(())
    }
}
