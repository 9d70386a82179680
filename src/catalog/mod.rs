pub mod item;
pub mod sample;
pub mod schema;

pub use item::{Category, MenuItem, SchemaKind};
pub use schema::{Choice, OptionGroup, OptionSchema, OptionValue, SelectedOptions, SelectionKind};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// What a caller knows about an item when asking for its customization
/// schema. A recommended add-on synthesized from a bare catalog row may
/// carry only a name; resolution still has to succeed from that.
#[derive(Debug, Clone, Copy)]
pub struct SchemaQuery<'a> {
    name: &'a str,
    category: Option<Category>,
    kind: Option<SchemaKind>,
}

impl<'a> SchemaQuery<'a> {
    pub fn by_name(name: &'a str) -> Self {
        Self {
            name,
            category: None,
            kind: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_kind(mut self, kind: SchemaKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl<'a> From<&'a MenuItem> for SchemaQuery<'a> {
    fn from(item: &'a MenuItem) -> Self {
        Self {
            name: &item.name,
            category: Some(item.category),
            kind: item.schema,
        }
    }
}

/// The read-only menu: items grouped by category plus the customization
/// schemas they resolve to. Supplied once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: BTreeMap<Category, Vec<MenuItem>>,
    schemas: BTreeMap<SchemaKind, OptionSchema>,
}

fn empty_schema() -> &'static OptionSchema {
    static EMPTY: OnceLock<OptionSchema> = OnceLock::new();
    EMPTY.get_or_init(OptionSchema::new)
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item under its own category.
    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.entry(item.category).or_default().push(item);
        self
    }

    pub fn with_schema(mut self, kind: SchemaKind, schema: OptionSchema) -> Self {
        self.schemas.insert(kind, schema);
        self
    }

    /// Categories that actually have items, in stable order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.items
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(category, _)| *category)
    }

    pub fn items_in(&self, category: Category) -> &[MenuItem] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First item with the given display name, scanning all categories.
    pub fn find_item(&self, name: &str) -> Option<&MenuItem> {
        self.items
            .values()
            .flat_map(|items| items.iter())
            .find(|item| item.name == name)
    }

    pub fn schema(&self, kind: SchemaKind) -> Option<&OptionSchema> {
        self.schemas.get(&kind)
    }

    /// Resolve the customization schema for a query, trying in order:
    /// the explicit schema tag, the query's category mapped through
    /// [`Category::schema_kind`], a catalog scan by display name (again
    /// mapped through the category table), and finally the empty schema.
    ///
    /// A step only resolves when the catalog actually has that schema;
    /// otherwise the chain keeps falling through.
    pub fn resolve_schema(&self, query: SchemaQuery<'_>) -> &OptionSchema {
        if let Some(kind) = query.kind
            && let Some(schema) = self.schemas.get(&kind)
        {
            return schema;
        }
        if let Some(category) = query.category
            && let Some(schema) = self.schemas.get(&category.schema_kind())
        {
            return schema;
        }
        if let Some(item) = self.find_item(query.name)
            && let Some(schema) = self.schemas.get(&item.category.schema_kind())
        {
            return schema;
        }
        empty_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;

    fn schema_with_marker(key: &str) -> OptionSchema {
        OptionSchema::new().with_group(
            key,
            OptionGroup::new(key, SelectionKind::Single, vec![Choice::new("x", "X")]),
        )
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_item(MenuItem::new("Latte", Category::Coffee, Money::from_dollars(4, 50)))
            .with_item(MenuItem::new(
                "Butter Croissant",
                Category::Pastries,
                Money::from_dollars(3, 50),
            ))
            .with_schema(SchemaKind::Drink, schema_with_marker("drink"))
            .with_schema(SchemaKind::Pastry, schema_with_marker("pastry"))
    }

    #[test]
    fn test_explicit_tag_wins() {
        let catalog = catalog();
        let query = SchemaQuery::by_name("Latte")
            .with_category(Category::Coffee)
            .with_kind(SchemaKind::Pastry);
        assert!(catalog.resolve_schema(query).group("pastry").is_some());
    }

    #[test]
    fn test_tag_without_schema_falls_through_to_category() {
        let catalog = catalog();
        // Sandwich schema is not registered, so the tag cannot resolve.
        let query = SchemaQuery::by_name("Latte")
            .with_category(Category::Coffee)
            .with_kind(SchemaKind::Sandwich);
        assert!(catalog.resolve_schema(query).group("drink").is_some());
    }

    #[test]
    fn test_name_scan_fallback() {
        let catalog = catalog();
        let query = SchemaQuery::by_name("Butter Croissant");
        assert!(catalog.resolve_schema(query).group("pastry").is_some());
    }

    #[test]
    fn test_unresolvable_query_gets_empty_schema() {
        let catalog = catalog();
        let query = SchemaQuery::by_name("Not On The Menu");
        assert!(catalog.resolve_schema(query).is_empty());
    }

    #[test]
    fn test_find_item_scans_all_categories() {
        let catalog = catalog();
        assert_eq!(catalog.find_item("Butter Croissant").unwrap().category, Category::Pastries);
        assert!(catalog.find_item("Flat White").is_none());
    }

    #[test]
    fn test_categories_skips_empty_buckets() {
        let catalog = catalog();
        let categories: Vec<_> = catalog.categories().collect();
        assert_eq!(categories, vec![Category::Coffee, Category::Pastries]);
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let catalog = catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
