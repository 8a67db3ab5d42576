//! Server-side sessions.
//!
//! Sessions are cookie-keyed and live in process memory. The session owns
//! the working cart for anonymous shoppers and the flash queue for every
//! visitor.

use crate::flash::Flash;
use serde::{Deserialize, Serialize};
use souk_commerce::ids::AccountId;
use souk_commerce::Cart;

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let bytes: [u8; 16] = rng.gen();
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        Self(format!("sess_{}", hex))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A visitor session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID.
    pub id: SessionId,
    /// Signed-in account, if any.
    pub account_id: Option<AccountId>,
    /// Working cart carried by the session.
    pub cart: Option<Cart>,
    /// Pending flash messages.
    pub flash: Vec<Flash>,
    /// URL to return to after signin.
    pub return_to: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last activity.
    pub last_activity_at: i64,
    /// Unix timestamp when session expires.
    pub expires_at: i64,
}

impl Session {
    /// Default session duration: 3 hours.
    pub const DEFAULT_DURATION_SECS: i64 = 3 * 60 * 60;

    /// Session duration with "remember me": 7 days.
    pub const REMEMBER_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// Create a fresh anonymous session.
    pub fn anonymous() -> Self {
        let now = souk_commerce::current_timestamp();
        Self {
            id: SessionId::generate(),
            account_id: None,
            cart: None,
            flash: Vec::new(),
            return_to: None,
            created_at: now,
            last_activity_at: now,
            expires_at: now + Self::DEFAULT_DURATION_SECS,
        }
    }

    /// Check if a visitor is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.account_id.is_some()
    }

    /// Check if session is expired.
    pub fn is_expired(&self) -> bool {
        souk_commerce::current_timestamp() > self.expires_at
    }

    /// Update last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity_at = souk_commerce::current_timestamp();
    }

    /// Bind the session to an account after a successful signin or signup.
    ///
    /// With `remember` set, the session lifetime is extended to 7 days.
    pub fn sign_in(&mut self, account_id: AccountId, remember: bool) {
        self.account_id = Some(account_id);
        let duration = if remember {
            Self::REMEMBER_DURATION_SECS
        } else {
            Self::DEFAULT_DURATION_SECS
        };
        self.expires_at = souk_commerce::current_timestamp() + duration;
        self.touch();
    }

    /// Drop the account binding and the working cart.
    pub fn sign_out(&mut self) {
        self.account_id = None;
        self.cart = None;
        self.touch();
    }

    /// Queue a flash message for the next rendered page.
    pub fn push_flash(&mut self, flash: Flash) {
        self.flash.push(flash);
    }

    /// Drain all pending flash messages.
    pub fn take_flash(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flash)
    }

    /// Take the stored post-signin redirect target, if any.
    pub fn take_return_to(&mut self) -> Option<String> {
        self.return_to.take()
    }

    /// Total quantity across the working cart, for the header badge.
    pub fn cart_qty(&self) -> i64 {
        self.cart.as_ref().map(|c| c.total_qty).unwrap_or(0)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_signed_in());
        assert!(!session.is_expired());
        assert_eq!(session.cart_qty(), 0);
    }

    #[test]
    fn test_session_ids_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_flash_consumed_once() {
        let mut session = Session::anonymous();
        session.push_flash(Flash::success("added to cart"));
        session.push_flash(Flash::error("out of stock"));

        let drained = session.take_flash();
        assert_eq!(drained.len(), 2);
        assert!(session.take_flash().is_empty());
    }

    #[test]
    fn test_remember_me_extends_lifetime() {
        let mut short = Session::anonymous();
        short.sign_in("acct_1".into(), false);

        let mut long = Session::anonymous();
        long.sign_in("acct_1".into(), true);

        assert!(long.expires_at > short.expires_at);
        assert!(long.expires_at - long.last_activity_at >= Session::REMEMBER_DURATION_SECS);
    }

    #[test]
    fn test_sign_out_clears_cart() {
        let mut session = Session::anonymous();
        session.cart = Some(Cart::new(Default::default()));
        session.sign_in("acct_1".into(), false);

        session.sign_out();
        assert!(!session.is_signed_in());
        assert!(session.cart.is_none());
    }
}
