use crate::core::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The menu categories the storefront sells. A closed set: adding a
/// category is a source change, which keeps the category → schema mapping
/// total and checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Coffee,
    Sandwiches,
    Pastries,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Coffee, Category::Sandwiches, Category::Pastries];

    /// The customization schema every item of this category falls back to.
    pub fn schema_kind(self) -> SchemaKind {
        match self {
            Category::Coffee => SchemaKind::Drink,
            Category::Sandwiches => SchemaKind::Sandwich,
            Category::Pastries => SchemaKind::Pastry,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Coffee => "Coffee",
            Category::Sandwiches => "Sandwiches",
            Category::Pastries => "Pastries",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keys of the customization schemas the catalog can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    Drink,
    Sandwich,
    Pastry,
}

/// A catalog entry. Immutable reference data; the display name doubles as
/// the item's identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub category: Category,
    pub base_price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Explicit customization schema tag. When absent, schema resolution
    /// falls back to the category mapping.
    #[serde(default)]
    pub schema: Option<SchemaKind>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: Category, base_price: Money) -> Self {
        Self {
            name: name.into(),
            category,
            base_price,
            description: String::new(),
            image: None,
            schema: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn schema(mut self, kind: SchemaKind) -> Self {
        self.schema = Some(kind);
        self
    }
}
