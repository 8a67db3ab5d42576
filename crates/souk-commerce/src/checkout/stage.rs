//! Checkout stage machine.
//!
//! The checkout is a linear sequence with no retries: a failed charge is
//! terminal for the request (the customer may resubmit), and the post-charge
//! stages run to completion without rollback.

use serde::{Deserialize, Serialize};

/// Stages of a checkout, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStage {
    /// Checkout submitted; the charge amount has been computed.
    Pending,
    /// The payment collaborator is being charged.
    Charging,
    /// The order record has been persisted.
    OrderRecorded,
    /// Product stock has been decremented per line item.
    StockAdjusted,
    /// The persisted cart has been deleted and the session cleared.
    CartCleared,
    /// The account address has been back-filled if it was missing.
    AddressBackfilled,
    /// Checkout finished; the customer is redirected to order history.
    Done,
    /// The charge was rejected; the cart is untouched.
    Failed,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Pending => "pending",
            CheckoutStage::Charging => "charging",
            CheckoutStage::OrderRecorded => "order_recorded",
            CheckoutStage::StockAdjusted => "stock_adjusted",
            CheckoutStage::CartCleared => "cart_cleared",
            CheckoutStage::AddressBackfilled => "address_backfilled",
            CheckoutStage::Done => "done",
            CheckoutStage::Failed => "failed",
        }
    }

    /// Check if the checkout has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStage::Done | CheckoutStage::Failed)
    }

    /// The stage that follows on success, if any.
    pub fn next(&self) -> Option<CheckoutStage> {
        match self {
            CheckoutStage::Pending => Some(CheckoutStage::Charging),
            CheckoutStage::Charging => Some(CheckoutStage::OrderRecorded),
            CheckoutStage::OrderRecorded => Some(CheckoutStage::StockAdjusted),
            CheckoutStage::StockAdjusted => Some(CheckoutStage::CartCleared),
            CheckoutStage::CartCleared => Some(CheckoutStage::AddressBackfilled),
            CheckoutStage::AddressBackfilled => Some(CheckoutStage::Done),
            CheckoutStage::Done | CheckoutStage::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_linear() {
        let mut stage = CheckoutStage::Pending;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(stage, CheckoutStage::Done);
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_terminal_stages() {
        assert!(CheckoutStage::Done.is_terminal());
        assert!(CheckoutStage::Failed.is_terminal());
        assert!(!CheckoutStage::Charging.is_terminal());
        assert!(CheckoutStage::Failed.next().is_none());
    }
}
