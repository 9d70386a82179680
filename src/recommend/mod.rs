//! Recommended add-ons: a bounded, shuffled selection of items from the
//! categories the cart does not yet touch.
//!
//! Regeneration is throttled: the set only re-rolls when the unordered
//! set of categories represented in the cart changes, so quantity ticks
//! and same-category adds leave the visible suggestions alone.

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Customization;
use crate::catalog::{Catalog, Category, MenuItem, SchemaQuery, SelectedOptions};
use crate::core::{Money, Result};

/// Identity of one recommended add-on, minted fresh at generation time.
/// Independent of any line item's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddOnId(Uuid);

impl AddOnId {
    pub fn fresh() -> AddOnId {
        AddOnId(Uuid::new_v4())
    }

    /// The raw id bytes, used when the id feeds a canonical encoding.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AddOnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One suggested item, independently toggleable and editable.
///
/// `price` is the configured unit price: the catalog base price plus any
/// option deltas picked up through the edit flow. A freshly generated
/// entry has no configuration and prices at its base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    id: AddOnId,
    name: String,
    category: Category,
    base_price: Money,
    price: Money,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    selected: bool,
    #[serde(default)]
    options: SelectedOptions,
    #[serde(default)]
    note: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl AddOn {
    /// A fresh, unselected suggestion for a catalog item.
    pub fn suggest(item: &MenuItem) -> AddOn {
        AddOn {
            id: AddOnId::fresh(),
            name: item.name.clone(),
            category: item.category,
            base_price: item.base_price,
            price: item.base_price,
            image: item.image.clone(),
            selected: false,
            options: SelectedOptions::new(),
            note: String::new(),
            quantity: 1,
        }
    }

    pub fn id(&self) -> AddOnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn options(&self) -> &SelectedOptions {
        &self.options
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Applies an edit-flow configuration, re-pricing the entry from its
    /// base price plus the schema-resolved option deltas. The id and
    /// selection state survive.
    fn reconfigure(&mut self, catalog: &Catalog, custom: Customization) -> Result<()> {
        let query = SchemaQuery::by_name(&self.name).with_category(self.category);
        let schema = catalog.resolve_schema(query);
        let (options, _, note, quantity) = custom.into_parts();
        schema.validate(&self.name, &options)?;
        self.price = self.base_price + schema.options_delta(&options);
        self.options = options;
        self.note = note;
        self.quantity = quantity;
        Ok(())
    }
}

/// The current suggestions plus the cart category set they were rolled
/// against, so refreshes can tell a real change from a quantity tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSet {
    entries: Vec<AddOn>,
    rolled_against: Option<BTreeSet<Category>>,
}

impl RecommendationSet {
    pub fn new() -> RecommendationSet {
        RecommendationSet::default()
    }

    pub fn entries(&self) -> &[AddOn] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &AddOnId) -> Option<&AddOn> {
        self.entries.iter().find(|a| a.id == *id)
    }

    /// Entries the customer has opted into.
    pub fn selected(&self) -> impl Iterator<Item = &AddOn> {
        self.entries.iter().filter(|a| a.selected)
    }

    /// Sum of the selected entries' prices.
    pub fn selected_total(&self) -> Money {
        self.selected().map(AddOn::price).sum()
    }

    /// Re-rolls the suggestions iff the cart's category set differs from
    /// the one the current entries were generated against. Returns whether
    /// a regeneration happened.
    pub fn refresh(
        &mut self,
        catalog: &Catalog,
        in_cart: &BTreeSet<Category>,
        limit: usize,
        rng: &mut impl Rng,
    ) -> bool {
        if self.rolled_against.as_ref() == Some(in_cart) {
            return false;
        }
        self.entries = generate(catalog, in_cart, limit, rng);
        self.rolled_against = Some(in_cart.clone());
        true
    }

    /// Flips the selection flag on the matching entry. Misses are silent
    /// no-ops, matching the cart store's tolerance for stale references.
    pub fn toggle(&mut self, id: &AddOnId) {
        match self.entries.iter_mut().find(|a| a.id == *id) {
            Some(entry) => entry.selected = !entry.selected,
            None => log::debug!("toggle for unknown add-on {id} ignored"),
        }
    }

    /// Runs the edit flow against the matching entry, replacing its
    /// configuration in place. A miss is a silent no-op.
    pub fn edit(&mut self, id: &AddOnId, catalog: &Catalog, custom: Customization) -> Result<()> {
        match self.entries.iter_mut().find(|a| a.id == *id) {
            Some(entry) => entry.reconfigure(catalog, custom),
            None => {
                log::debug!("edit for unknown add-on {id} ignored");
                Ok(())
            }
        }
    }
}

/// Rolls a fresh suggestion list: pool every item from the categories not
/// in the cart (all categories when the cart is empty), shuffle, take the
/// first `limit`, then drop any repeated catalog item.
///
/// The dedup key is the underlying item name, so the same product can
/// never be offered twice even if the pool somehow repeats it.
fn generate(
    catalog: &Catalog,
    in_cart: &BTreeSet<Category>,
    limit: usize,
    rng: &mut impl Rng,
) -> Vec<AddOn> {
    let mut pool: Vec<&MenuItem> = catalog
        .categories()
        .filter(|c| in_cart.is_empty() || !in_cart.contains(c))
        .flat_map(|c| catalog.items_in(c))
        .collect();
    pool.shuffle(rng);

    let mut seen = BTreeSet::new();
    pool.into_iter()
        .take(limit)
        .filter(|item| seen.insert(item.name.clone()))
        .map(AddOn::suggest)
        .collect()
}
