//! The built-in Brew Haven menu: the storefront catalog data,
//! usable as-is for demos and tests or as a template for external data.

use super::{Catalog, Category, Choice, MenuItem, OptionGroup, OptionSchema, SchemaKind, SelectionKind};
use crate::core::Money;

fn drink_schema() -> OptionSchema {
    OptionSchema::new()
        .with_group(
            "size",
            OptionGroup::new(
                "Size",
                SelectionKind::Single,
                vec![
                    Choice::new("small", "Small"),
                    Choice::new("medium", "Medium").priced(Money::from_cents(40)),
                    Choice::new("large", "Large").priced(Money::from_cents(80)),
                ],
            )
            .required(),
        )
        .with_group(
            "milk",
            OptionGroup::new(
                "Milk",
                SelectionKind::SingleDropdown,
                vec![
                    Choice::new("whole", "Whole"),
                    Choice::new("oat", "Oat").priced(Money::from_cents(70)),
                    Choice::new("almond", "Almond").priced(Money::from_cents(60)),
                ],
            ),
        )
        .with_group(
            "extras",
            OptionGroup::new(
                "Extras",
                SelectionKind::Multi,
                vec![
                    Choice::new("extra-shot", "Extra Shot").priced(Money::from_cents(100)),
                    Choice::new("vanilla", "Vanilla Syrup").priced(Money::from_cents(50)),
                    Choice::new("whipped-cream", "Whipped Cream").priced(Money::from_cents(50)),
                ],
            ),
        )
        .with_group(
            "temperature",
            OptionGroup::new(
                "Temperature",
                SelectionKind::Toggle,
                vec![Choice::new("hot", "Hot"), Choice::new("iced", "Iced")],
            ),
        )
}

fn sandwich_schema() -> OptionSchema {
    OptionSchema::new()
        .with_group(
            "bread",
            OptionGroup::new(
                "Bread",
                SelectionKind::Single,
                vec![
                    Choice::new("white", "White"),
                    Choice::new("wheat", "Wheat"),
                    Choice::new("sourdough", "Sourdough").priced(Money::from_cents(50)),
                ],
            )
            .required(),
        )
        .with_group(
            "toasted",
            OptionGroup::new(
                "Toasted",
                SelectionKind::Toggle,
                vec![Choice::new("yes", "Toasted"), Choice::new("no", "Not Toasted")],
            ),
        )
        .with_group(
            "extras",
            OptionGroup::new(
                "Extras",
                SelectionKind::Multi,
                vec![
                    Choice::new("avocado", "Avocado").priced(Money::from_cents(150)),
                    Choice::new("extra-cheese", "Extra Cheese").priced(Money::from_cents(100)),
                    Choice::new("bacon", "Bacon").priced(Money::from_cents(125)),
                ],
            ),
        )
}

fn pastry_schema() -> OptionSchema {
    OptionSchema::new().with_group(
        "warming",
        OptionGroup::new(
            "Serving",
            SelectionKind::Toggle,
            vec![Choice::new("warmed", "Warmed"), Choice::new("room", "Room Temp")],
        ),
    )
}

impl Catalog {
    /// The Brew Haven menu with its three categories and their schemas.
    pub fn sample() -> Catalog {
        Catalog::new()
            .with_schema(SchemaKind::Drink, drink_schema())
            .with_schema(SchemaKind::Sandwich, sandwich_schema())
            .with_schema(SchemaKind::Pastry, pastry_schema())
            .with_item(
                MenuItem::new("Latte", Category::Coffee, Money::from_dollars(4, 50))
                    .describe("Espresso with steamed milk and a thin layer of foam.")
                    .image("/images/latte.jpg"),
            )
            .with_item(
                MenuItem::new("Cappuccino", Category::Coffee, Money::from_dollars(4, 25))
                    .describe("Equal parts espresso, steamed milk and foam.")
                    .image("/images/cappuccino.jpg"),
            )
            .with_item(
                MenuItem::new("Espresso", Category::Coffee, Money::from_dollars(3, 0))
                    .describe("A double shot, rich and concentrated.")
                    .image("/images/espresso.jpg"),
            )
            .with_item(
                MenuItem::new("Cold Brew", Category::Coffee, Money::from_dollars(4, 75))
                    .describe("Steeped for 18 hours, smooth and low-acid.")
                    .image("/images/cold-brew.jpg"),
            )
            .with_item(
                MenuItem::new("Turkey Pesto", Category::Sandwiches, Money::from_dollars(8, 50))
                    .describe("Roast turkey, basil pesto and provolone on ciabatta.")
                    .image("/images/turkey-pesto.jpg"),
            )
            .with_item(
                MenuItem::new("Caprese", Category::Sandwiches, Money::from_dollars(7, 75))
                    .describe("Fresh mozzarella, tomato and balsamic glaze.")
                    .image("/images/caprese.jpg"),
            )
            .with_item(
                MenuItem::new("Ham & Swiss", Category::Sandwiches, Money::from_dollars(8, 0))
                    .describe("Smoked ham and Swiss with dijon butter.")
                    .image("/images/ham-swiss.jpg"),
            )
            .with_item(
                MenuItem::new("Butter Croissant", Category::Pastries, Money::from_dollars(3, 50))
                    .describe("Laminated daily, baked every morning.")
                    .image("/images/croissant.jpg"),
            )
            .with_item(
                MenuItem::new("Blueberry Muffin", Category::Pastries, Money::from_dollars(3, 25))
                    .describe("Packed with wild blueberries, crumble top.")
                    .image("/images/blueberry-muffin.jpg"),
            )
            .with_item(
                MenuItem::new("Cinnamon Roll", Category::Pastries, Money::from_dollars(3, 75))
                    .describe("Cream-cheese icing, still warm at open.")
                    .image("/images/cinnamon-roll.jpg"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_all_categories_and_schemas() {
        let catalog = Catalog::sample();
        let categories: Vec<_> = catalog.categories().collect();
        assert_eq!(categories.len(), 3);
        for category in Category::ALL {
            assert!(!catalog.items_in(category).is_empty());
            assert!(catalog.schema(category.schema_kind()).is_some());
        }
    }

    #[test]
    fn test_latte_price() {
        let catalog = Catalog::sample();
        let latte = catalog.find_item("Latte").unwrap();
        assert_eq!(latte.base_price, Money::from_dollars(4, 50));
        assert_eq!(latte.category, Category::Coffee);
    }

    #[test]
    fn test_drink_schema_requires_size_only() {
        let catalog = Catalog::sample();
        let schema = catalog.schema(SchemaKind::Drink).unwrap();
        let required: Vec<_> = schema
            .groups()
            .filter(|(_, g)| g.required)
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(required, vec!["size"]);
    }
}
