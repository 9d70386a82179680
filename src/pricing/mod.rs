//! The order summary: every monetary field recomputed wholesale from one
//! consistent snapshot of the cart, the selected recommendations and the
//! promo code. Nothing is incrementally adjusted, so the summary can
//! never drift from the state it describes.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::core::{Money, Rate};
use crate::recommend::RecommendationSet;

/// Rates, fees and the recognized promo code. Defaults are the
/// storefront's own: 8% tax, a flat $1.50 fee on non-empty orders, and a 20%
/// discount for `BREWHAVEN20`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    tax_rate: Rate,
    service_fee: Money,
    promo_code: String,
    promo_discount: Rate,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Rate::percent(8),
            service_fee: Money::from_cents(150),
            promo_code: "BREWHAVEN20".to_string(),
            promo_discount: Rate::percent(20),
        }
    }
}

impl PricingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tax_rate(mut self, rate: Rate) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn with_service_fee(mut self, fee: Money) -> Self {
        self.service_fee = fee;
        self
    }

    pub fn with_promo(mut self, code: impl Into<String>, discount: Rate) -> Self {
        self.promo_code = code.into();
        self.promo_discount = discount;
        self
    }

    pub fn tax_rate(&self) -> Rate {
        self.tax_rate
    }

    pub fn service_fee(&self) -> Money {
        self.service_fee
    }

    /// The single code that earns the discount.
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    pub fn promo_discount(&self) -> Rate {
        self.promo_discount
    }
}

/// The derived totals for the current order state.
///
/// `promo_code` is the only field a caller chooses; it is stored verbatim
/// whether or not it is recognized. Everything else is owned by
/// [`compute_summary`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub item_count: u32,
    pub items_total: Money,
    pub subtotal: Money,
    pub taxes: Money,
    pub fee: Money,
    pub savings: Money,
    pub total: Money,
    pub promo_code: Option<String>,
}

/// Computes the summary for one snapshot of the order state.
///
/// Line items price as base + schema-resolved option deltas + attached
/// add-ons, times quantity; selected recommended add-ons contribute their
/// configured price. Tax and discount are rate applications over the
/// subtotal; the service fee only applies to non-empty orders.
pub fn compute_summary(
    catalog: &Catalog,
    cart: &Cart,
    recommended: &RecommendationSet,
    promo_code: Option<&str>,
    config: &PricingConfig,
) -> OrderSummary {
    let item_count = cart.item_count();
    let lines_total: Money = cart.lines().map(|line| line.line_total(catalog)).sum();
    let items_total = lines_total + recommended.selected_total();
    let subtotal = items_total;

    let taxes = config.tax_rate.of(subtotal);
    let fee = if subtotal.is_positive() {
        config.service_fee
    } else {
        Money::ZERO
    };
    let savings = match promo_code {
        Some(code) if code == config.promo_code => config.promo_discount.of(subtotal),
        _ => Money::ZERO,
    };

    OrderSummary {
        item_count,
        items_total,
        subtotal,
        taxes,
        fee,
        savings,
        total: subtotal + taxes + fee - savings,
        promo_code: promo_code.map(str::to_string),
    }
}
