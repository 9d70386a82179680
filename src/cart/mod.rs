//! Line items, their structural identity, and the cart store.

pub mod identity;
pub mod line_item;
pub mod store;

pub use identity::Identity;
pub use line_item::{AttachedAddOn, Customization, LineItem, LineItemId};
pub use store::Cart;
