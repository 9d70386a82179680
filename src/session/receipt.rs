//! The value handed to the confirmation view when an order completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::LineItem;
use crate::pricing::OrderSummary;
use crate::recommend::AddOn;

/// A frozen snapshot of the order at completion time. The session clears
/// its cart right after assembling one of these, so the receipt is the
/// only place the completed order survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    pub add_ons: Vec<AddOn>,
    pub summary: OrderSummary,
}

impl OrderReceipt {
    pub(crate) fn assemble(
        lines: Vec<LineItem>,
        add_ons: Vec<AddOn>,
        summary: OrderSummary,
    ) -> OrderReceipt {
        OrderReceipt {
            order_id: order_id(),
            placed_at: Utc::now(),
            lines,
            add_ons,
            summary,
        }
    }
}

/// Short uppercase token for the confirmation page, e.g. `BH-3F9A27C1`.
fn order_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("BH-{}", raw[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = order_id();
        assert!(id.starts_with("BH-"));
        assert_eq!(id.len(), 11);
        assert!(id[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_order_ids_are_unique() {
        assert_ne!(order_id(), order_id());
    }
}
