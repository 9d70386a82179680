//! A configured menu item held in the cart.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::identity::Identity;
use crate::catalog::{Catalog, Category, MenuItem, OptionValue, SchemaKind, SchemaQuery, SelectedOptions};
use crate::core::{Money, Result};
use crate::recommend::{AddOn, AddOnId};

/// Opaque per-row id, assigned once at creation so edits can address the
/// row even while its configuration (and hence identity) changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(Uuid);

impl LineItemId {
    pub fn fresh() -> LineItemId {
        LineItemId(Uuid::new_v4())
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An add-on riding on one line item. Its price folds into that line's
/// unit price; its id is the add-on's own identity from the
/// recommendation flow it was picked from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedAddOn {
    id: AddOnId,
    name: String,
    price: Money,
}

impl AttachedAddOn {
    /// An attachment minted outside the recommendation flow, with a fresh
    /// identity of its own.
    pub fn new(name: impl Into<String>, price: Money) -> AttachedAddOn {
        AttachedAddOn {
            id: AddOnId::fresh(),
            name: name.into(),
            price,
        }
    }

    pub fn id(&self) -> AddOnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

impl From<&AddOn> for AttachedAddOn {
    fn from(add_on: &AddOn) -> AttachedAddOn {
        AttachedAddOn {
            id: add_on.id(),
            name: add_on.name().to_string(),
            price: add_on.price(),
        }
    }
}

/// The configurable half of a line item, gathered by a customization
/// flow before the item is allowed into the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customization {
    options: SelectedOptions,
    add_ons: Vec<AttachedAddOn>,
    note: String,
    quantity: u32,
}

impl Customization {
    pub fn new() -> Customization {
        Customization::default()
    }

    /// Sets one option group's value, replacing any previous value.
    pub fn select(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Sets a multi-select group's values.
    pub fn select_many<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.select(key, OptionValue::Many(values))
    }

    pub fn attach(mut self, add_on: AttachedAddOn) -> Self {
        self.add_ons.push(add_on);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Seeds an edit flow with a line's current configuration.
    pub fn from_line(line: &LineItem) -> Customization {
        Customization {
            options: line.options.clone(),
            add_ons: line.add_ons.clone(),
            note: line.note.clone(),
            quantity: line.quantity,
        }
    }

    pub(crate) fn into_parts(self) -> (SelectedOptions, Vec<AttachedAddOn>, String, u32) {
        (self.options, self.add_ons, self.note, self.quantity.max(1))
    }
}

/// One cart row: a menu item plus the configuration that distinguishes
/// it from other rows of the same item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default = "LineItemId::fresh")]
    id: LineItemId,
    name: String,
    category: Category,
    base_price: Money,
    #[serde(default)]
    schema: Option<SchemaKind>,
    #[serde(default)]
    options: SelectedOptions,
    #[serde(default)]
    add_ons: Vec<AttachedAddOn>,
    #[serde(default)]
    note: String,
    #[serde(default = "default_quantity", deserialize_with = "de_quantity")]
    quantity: u32,
}

impl LineItem {
    /// Builds a line item for `item`, rejecting it if the customization
    /// leaves a required option group unselected.
    pub fn new(catalog: &Catalog, item: &MenuItem, custom: Customization) -> Result<LineItem> {
        let schema = catalog.resolve_schema(SchemaQuery::from(item));
        let (options, add_ons, note, quantity) = custom.into_parts();
        schema.validate(&item.name, &options)?;
        Ok(LineItem {
            id: LineItemId::fresh(),
            name: item.name.clone(),
            category: item.category,
            base_price: item.base_price,
            schema: item.schema,
            options,
            add_ons,
            note,
            quantity,
        })
    }

    /// Re-runs the customization flow against the same base item. The
    /// opaque id survives; the identity usually does not.
    pub fn reconfigure(&self, catalog: &Catalog, custom: Customization) -> Result<LineItem> {
        let schema = catalog.resolve_schema(self.schema_query());
        let (options, add_ons, note, quantity) = custom.into_parts();
        schema.validate(&self.name, &options)?;
        Ok(LineItem {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            base_price: self.base_price,
            schema: self.schema,
            options,
            add_ons,
            note,
            quantity,
        })
    }

    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn base_price(&self) -> Money {
        self.base_price
    }

    pub fn options(&self) -> &SelectedOptions {
        &self.options
    }

    pub fn add_ons(&self) -> &[AttachedAddOn] {
        &self.add_ons
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The structural key this row merges under.
    pub fn identity(&self) -> Identity {
        Identity::compute(&self.name, &self.options, &self.add_ons, &self.note)
    }

    /// Price of a single unit: base price plus option deltas plus
    /// attached add-ons.
    pub fn unit_price(&self, catalog: &Catalog) -> Money {
        let schema = catalog.resolve_schema(self.schema_query());
        let attached: Money = self.add_ons.iter().map(AttachedAddOn::price).sum();
        self.base_price + schema.options_delta(&self.options) + attached
    }

    pub fn line_total(&self, catalog: &Catalog) -> Money {
        self.unit_price(catalog) * self.quantity
    }

    /// Same row with a new quantity, clamped to at least one.
    pub fn with_quantity(mut self, quantity: u32) -> LineItem {
        self.quantity = quantity.max(1);
        self
    }

    fn schema_query(&self) -> SchemaQuery<'_> {
        let mut query = SchemaQuery::by_name(&self.name).with_category(self.category);
        if let Some(kind) = self.schema {
            query = query.with_kind(kind);
        }
        query
    }
}

fn default_quantity() -> u32 {
    1
}

fn de_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = u32::deserialize(deserializer)?;
    Ok(quantity.max(1))
}
