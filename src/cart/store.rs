//! The cart: an immutable mapping from configuration identity to line
//! item. Every operation returns a new cart value, so callers never see a
//! half-applied mutation.

use std::collections::BTreeSet;

use im::Vector;

use super::identity::Identity;
use super::line_item::{LineItem, LineItemId};
use crate::catalog::Category;

/// The ordered cart rows. Backed by a persistent vector, so the
/// value-returning operations share structure instead of copying.
///
/// Invariant: no two rows share an identity. `add` and `update` merge
/// rather than duplicate; `from_lines` re-establishes the invariant over
/// externally supplied rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vector<LineItem>,
}

impl Cart {
    pub fn new() -> Cart {
        Cart::default()
    }

    /// Rebuilds a cart from persisted rows, folding through [`Cart::add`]
    /// so duplicated configurations in the stored data merge back into
    /// single rows.
    pub fn from_lines(lines: impl IntoIterator<Item = LineItem>) -> Cart {
        lines.into_iter().fold(Cart::new(), |cart, line| cart.add(line))
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all rows; also the storefront's cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(LineItem::quantity).sum()
    }

    /// The unordered set of categories represented in the cart. Drives
    /// recommendation regeneration.
    pub fn category_set(&self) -> BTreeSet<Category> {
        self.lines.iter().map(LineItem::category).collect()
    }

    pub fn get(&self, identity: &Identity) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.identity() == *identity)
    }

    pub fn get_by_id(&self, id: LineItemId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Adds an entry, merging into an existing row when the configuration
    /// matches: the existing row absorbs the entry's quantity.
    pub fn add(&self, entry: LineItem) -> Cart {
        let identity = entry.identity();
        let mut lines = self.lines.clone();
        match lines.iter().position(|line| line.identity() == identity) {
            Some(at) => {
                let merged_quantity = lines[at].quantity().saturating_add(entry.quantity());
                let merged = lines[at].clone().with_quantity(merged_quantity);
                lines.set(at, merged);
            }
            None => lines.push_back(entry),
        }
        Cart { lines }
    }

    /// Sets the matching row's quantity, clamped to at least one. A miss
    /// leaves the cart unchanged; removal is the only way to drop a row.
    pub fn change_quantity(&self, identity: &Identity, quantity: u32) -> Cart {
        let mut lines = self.lines.clone();
        match lines.iter().position(|line| line.identity() == *identity) {
            Some(at) => {
                let updated = lines[at].clone().with_quantity(quantity);
                lines.set(at, updated);
            }
            None => {
                log::debug!("quantity change for absent identity {identity} ignored");
                return self.clone();
            }
        }
        Cart { lines }
    }

    /// Deletes the matching row. A miss leaves the cart unchanged.
    pub fn remove(&self, identity: &Identity) -> Cart {
        match self.lines.iter().position(|line| line.identity() == *identity) {
            Some(at) => {
                let mut lines = self.lines.clone();
                lines.remove(at);
                Cart { lines }
            }
            None => {
                log::debug!("removal for absent identity {identity} ignored");
                self.clone()
            }
        }
    }

    /// Replaces the row sharing the updated entry's opaque id with the new
    /// configuration, then re-merges: if the edit made the row collide
    /// with another row's identity, the earlier row absorbs its quantity.
    /// A miss on the id leaves the cart unchanged.
    pub fn update(&self, updated: LineItem) -> Cart {
        let Some(at) = self.lines.iter().position(|line| line.id() == updated.id()) else {
            log::debug!("update for absent row {} ignored", updated.id());
            return self.clone();
        };
        let mut lines = self.lines.clone();
        lines.set(at, updated);
        Cart { lines }.merged()
    }

    pub fn clear(&self) -> Cart {
        Cart::new()
    }

    /// Collapses rows with equal identities into the earliest occurrence.
    fn merged(&self) -> Cart {
        let mut lines: Vector<LineItem> = Vector::new();
        for line in &self.lines {
            let identity = line.identity();
            match lines.iter().position(|kept| kept.identity() == identity) {
                Some(at) => {
                    let quantity = lines[at].quantity().saturating_add(line.quantity());
                    let merged = lines[at].clone().with_quantity(quantity);
                    lines.set(at, merged);
                }
                None => lines.push_back(line.clone()),
            }
        }
        Cart { lines }
    }
}
