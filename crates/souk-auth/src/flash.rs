//! Flash messages.
//!
//! Flashes are queued on the session by the handler that produced them and
//! drained by the next rendered page. They survive exactly one read.

use serde::{Deserialize, Serialize};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashLevel {
    /// Operation succeeded.
    Success,
    /// Operation failed or input was rejected.
    Error,
}

/// A one-shot message rendered on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Message severity.
    pub level: FlashLevel,
    /// Message text.
    pub message: String,
}

impl Flash {
    /// Create a success flash.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error flash.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// CSS class used when rendering the message.
    pub fn css_class(&self) -> &'static str {
        match self.level {
            FlashLevel::Success => "alert-success",
            FlashLevel::Error => "alert-danger",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_constructors() {
        let ok = Flash::success("saved");
        assert_eq!(ok.level, FlashLevel::Success);
        assert_eq!(ok.css_class(), "alert-success");

        let bad = Flash::error("nope");
        assert_eq!(bad.level, FlashLevel::Error);
        assert_eq!(bad.css_class(), "alert-danger");
    }
}
