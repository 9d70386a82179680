//! # Brew Haven cart & order-pricing engine
//!
//! The core of an online café storefront: line-item identity, the cart
//! store with merge-on-match semantics, recommendation generation, and
//! the pricing engine that recomputes the authoritative order summary
//! after every state change. Rendering, checkout forms and receipts are
//! external collaborators; this crate is the part with invariants.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use brewhaven::{Catalog, Customization, MemorySessionStore, Money, OrderSession, SessionConfig};
//!
//! # fn main() -> brewhaven::Result<()> {
//! let catalog = Arc::new(Catalog::sample());
//! let config = SessionConfig::new().without_promo_prefill();
//! let mut session = OrderSession::open(catalog, config, Box::new(MemorySessionStore::new()));
//!
//! session.add_item("Latte", Customization::new().select("size", "small"))?;
//! assert_eq!(session.summary().subtotal, Money::from_dollars(4, 50));
//! assert_eq!(session.summary().total, Money::from_cents(636));
//!
//! // The same configuration merges instead of duplicating.
//! session.add_item("Latte", Customization::new().select("size", "small"))?;
//! assert_eq!(session.cart().len(), 1);
//! assert_eq!(session.summary().item_count, 2);
//!
//! session.apply_promo("BREWHAVEN20");
//! assert!(session.summary().savings.is_positive());
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod pricing;
pub mod recommend;
pub mod session;

pub use cart::{AttachedAddOn, Cart, Customization, Identity, LineItem, LineItemId};
pub use catalog::{
    Catalog, Category, Choice, MenuItem, OptionGroup, OptionSchema, OptionValue, SchemaKind,
    SchemaQuery, SelectedOptions, SelectionKind,
};
pub use core::{Money, OrderError, Rate, Result};
pub use pricing::{compute_summary, OrderSummary, PricingConfig};
pub use recommend::{AddOn, AddOnId, RecommendationSet};
pub use session::{
    FileSessionStore, MemorySessionStore, OrderReceipt, OrderSession, SessionConfig, SessionStore,
    StoredCart,
};
