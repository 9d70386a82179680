//! The session facade: one customer's cart, recommendations and summary,
//! wired to a persistence collaborator.
//!
//! Every mutation runs to completion and then commits in a fixed order
//! (persist the cart, refresh the recommendations if the category set
//! changed, recompute the summary), so a read issued right after a write
//! always sees all three views agree.

pub mod receipt;
pub mod store;

pub use receipt::OrderReceipt;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredCart};

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cart::{Cart, Customization, Identity, LineItem, LineItemId};
use crate::catalog::Catalog;
use crate::core::{OrderError, Result};
use crate::pricing::{self, OrderSummary, PricingConfig};
use crate::recommend::{AddOnId, RecommendationSet};

/// Session-level knobs. The defaults match the storefront: two
/// suggestions at a time and the promo field prefilled with the
/// recognized code.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub recommendation_limit: usize,
    pub pricing: PricingConfig,
    /// Start the session with the recognized promo code already applied,
    /// as the checkout form does.
    pub prefill_promo: bool,
    /// Fixed seed for the recommendation shuffle; `None` seeds from the
    /// operating system.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: 2,
            pricing: PricingConfig::default(),
            prefill_promo: true,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn without_promo_prefill(mut self) -> Self {
        self.prefill_promo = false;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One customer's ordering session. Owns the cart, the recommendation
/// set and the order summary; serializes every mutation.
pub struct OrderSession {
    catalog: Arc<Catalog>,
    config: SessionConfig,
    store: Box<dyn SessionStore>,
    rng: StdRng,
    cart: Cart,
    recommended: RecommendationSet,
    promo: Option<String>,
    summary: OrderSummary,
}

impl OrderSession {
    /// Opens a session over a catalog and a persistence collaborator.
    ///
    /// The stored cart is loaded tolerantly: a missing, unreadable or
    /// version-mismatched payload starts the session empty. Duplicated
    /// rows in the stored data merge back together on the way in.
    pub fn open(
        catalog: Arc<Catalog>,
        config: SessionConfig,
        store: Box<dyn SessionStore>,
    ) -> OrderSession {
        let lines = match store.load() {
            Ok(Some(payload)) => StoredCart::decode(&payload).map(|s| s.lines).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("session store unreadable ({err}), starting empty");
                Vec::new()
            }
        };
        let cart = Cart::from_lines(lines);
        let promo = config
            .prefill_promo
            .then(|| config.pricing.promo_code().to_string());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = OrderSession {
            catalog,
            config,
            store,
            rng,
            cart,
            recommended: RecommendationSet::new(),
            promo,
            summary: OrderSummary::default(),
        };
        session.refresh_recommendations();
        session.recompute();
        log::info!(
            "session opened with {} line(s), {} unit(s)",
            session.cart.len(),
            session.cart.item_count()
        );
        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn recommended(&self) -> &RecommendationSet {
        &self.recommended
    }

    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.promo.as_deref()
    }

    /// Adds a configured item to the cart, merging into an existing row
    /// when the configuration already appears.
    pub fn add_item(&mut self, name: &str, custom: Customization) -> Result<()> {
        let item = self
            .catalog
            .find_item(name)
            .ok_or_else(|| OrderError::UnknownItem { name: name.to_string() })?
            .clone();
        let line = LineItem::new(&self.catalog, &item, custom)?;
        self.cart = self.cart.add(line);
        self.commit_cart_change()
    }

    /// Sets a row's quantity, clamped to at least one. A stale identity
    /// is a silent no-op.
    pub fn change_quantity(&mut self, identity: &Identity, quantity: u32) -> Result<()> {
        self.cart = self.cart.change_quantity(identity, quantity);
        self.commit_cart_change()
    }

    /// Removes a row. A stale identity is a silent no-op.
    pub fn remove_item(&mut self, identity: &Identity) -> Result<()> {
        self.cart = self.cart.remove(identity);
        self.commit_cart_change()
    }

    /// Runs the edit flow against the row with the given opaque id,
    /// replacing its configuration and re-merging if the edit collides
    /// with another row. A stale id is a silent no-op.
    pub fn update_item(&mut self, id: LineItemId, custom: Customization) -> Result<()> {
        let Some(line) = self.cart.get_by_id(id) else {
            log::debug!("edit for absent row {id} ignored");
            return Ok(());
        };
        let edited = line.reconfigure(&self.catalog, custom)?;
        self.cart = self.cart.update(edited);
        self.commit_cart_change()
    }

    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart = self.cart.clear();
        self.commit_cart_change()
    }

    /// Flips a recommended add-on's selection. Only the summary needs
    /// recomputing; the cart is untouched.
    pub fn toggle_recommended(&mut self, id: &AddOnId) {
        self.recommended.toggle(id);
        self.recompute();
    }

    /// Edits a recommended add-on through the customization flow.
    pub fn edit_recommended(&mut self, id: &AddOnId, custom: Customization) -> Result<()> {
        self.recommended.edit(id, &self.catalog, custom)?;
        self.recompute();
        Ok(())
    }

    /// Stores the code verbatim, recognized or not, and recomputes.
    pub fn apply_promo(&mut self, code: impl Into<String>) {
        self.promo = Some(code.into());
        self.recompute();
    }

    /// Completes the order: freezes a receipt, discards the stored cart,
    /// and resets the session to a fresh empty state.
    pub fn complete_order(&mut self) -> Result<OrderReceipt> {
        let receipt = OrderReceipt::assemble(
            self.cart.lines().cloned().collect(),
            self.recommended.selected().cloned().collect(),
            self.summary.clone(),
        );
        self.store.discard()?;
        self.cart = self.cart.clear();
        self.promo = self
            .config
            .prefill_promo
            .then(|| self.config.pricing.promo_code().to_string());
        self.refresh_recommendations();
        self.recompute();
        log::info!("order {} completed for {}", receipt.order_id, receipt.summary.total);
        Ok(receipt)
    }

    /// The commit pipeline for cart mutations: persist, then refresh the
    /// recommendations iff the category set changed, then recompute.
    ///
    /// The derived views are rebuilt even when the save fails: the cart
    /// mutation has already committed, so the recommendations and summary
    /// must describe it either way. The save error still propagates.
    fn commit_cart_change(&mut self) -> Result<()> {
        let saved = StoredCart::new(self.cart.lines().cloned().collect())
            .encode()
            .and_then(|payload| self.store.save(&payload));
        self.refresh_recommendations();
        self.recompute();
        saved
    }

    fn refresh_recommendations(&mut self) {
        self.recommended.refresh(
            &self.catalog,
            &self.cart.category_set(),
            self.config.recommendation_limit,
            &mut self.rng,
        );
    }

    fn recompute(&mut self) {
        self.summary = pricing::compute_summary(
            &self.catalog,
            &self.cart,
            &self.recommended,
            self.promo.as_deref(),
            &self.config.pricing,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;

    fn session() -> OrderSession {
        OrderSession::open(
            Arc::new(Catalog::sample()),
            SessionConfig::new().with_seed(11).without_promo_prefill(),
            Box::new(MemorySessionStore::new()),
        )
    }

    #[test]
    fn test_open_empty_session() {
        let session = session();
        assert!(session.cart().is_empty());
        assert_eq!(session.summary().total, Money::ZERO);
        // Recommendations are seeded even before anything is in the cart.
        assert_eq!(session.recommended().len(), 2);
    }

    #[test]
    fn test_prefilled_promo_is_the_recognized_code() {
        let session = OrderSession::open(
            Arc::new(Catalog::sample()),
            SessionConfig::default(),
            Box::new(MemorySessionStore::new()),
        );
        assert_eq!(session.promo_code(), Some("BREWHAVEN20"));
    }

    #[test]
    fn test_add_unknown_item_is_rejected() {
        let mut session = session();
        let err = session.add_item("Flat White", Customization::new()).unwrap_err();
        assert!(matches!(err, OrderError::UnknownItem { .. }));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_rejected_entry_leaves_state_untouched() {
        let mut session = session();
        // Latte requires a size.
        assert!(session.add_item("Latte", Customization::new()).is_err());
        assert!(session.cart().is_empty());
        assert_eq!(session.summary().total, Money::ZERO);
    }
}
