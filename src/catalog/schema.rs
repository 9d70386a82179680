use crate::core::{Money, OrderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How an option group is presented and how many choices it admits.
///
/// The four kinds correspond to the storefront's radio group, dropdown,
/// checkbox group and two-way toggle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Pick exactly one choice (radio group).
    Single,
    /// Pick exactly one choice from a dropdown.
    SingleDropdown,
    /// Pick any number of choices (checkbox group).
    Multi,
    /// Pick one of exactly two mutually exclusive choices.
    Toggle,
}

/// One selectable choice within an option group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    /// Added to the item's unit price when this choice is selected.
    #[serde(default)]
    pub price_delta: Money,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            price_delta: Money::ZERO,
        }
    }

    pub fn priced(mut self, delta: Money) -> Self {
        self.price_delta = delta;
        self
    }
}

/// A group of choices for one customization dimension (size, milk, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub label: String,
    pub kind: SelectionKind,
    #[serde(default)]
    pub required: bool,
    pub choices: Vec<Choice>,
}

impl OptionGroup {
    pub fn new(label: impl Into<String>, kind: SelectionKind, choices: Vec<Choice>) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
            choices,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Price delta for one choice value; unknown values contribute nothing.
    fn choice_delta(&self, value: &str) -> Money {
        self.choices
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.price_delta)
            .unwrap_or(Money::ZERO)
    }

    /// Total price delta of a selection against this group.
    pub fn selection_delta(&self, value: &OptionValue) -> Money {
        match value {
            OptionValue::One(v) => self.choice_delta(v),
            OptionValue::Many(vs) => vs.iter().map(|v| self.choice_delta(v)).sum(),
        }
    }
}

/// A selected value for one option group: a single choice or, for
/// multi-select groups, a list of choices in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    One(String),
    Many(Vec<String>),
}

impl OptionValue {
    /// Whether the selection actually picks something. An empty string or
    /// an empty list counts as unselected for required-option checks.
    pub fn is_selected(&self) -> bool {
        match self {
            OptionValue::One(v) => !v.is_empty(),
            OptionValue::Many(vs) => !vs.is_empty(),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::One(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::One(v)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(vs: Vec<String>) -> Self {
        OptionValue::Many(vs)
    }
}

/// The options a customization flow resolved for an item, keyed by option
/// group. Sorted keys keep iteration (and identity hashing) deterministic.
pub type SelectedOptions = BTreeMap<String, OptionValue>;

/// The customization schema for one catalog item type: option groups keyed
/// by a stable option key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
    groups: BTreeMap<String, OptionGroup>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, key: impl Into<String>, group: OptionGroup) -> Self {
        self.groups.insert(key.into(), group);
        self
    }

    pub fn group(&self, key: &str) -> Option<&OptionGroup> {
        self.groups.get(key)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &OptionGroup)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Reject a selection that leaves any required group unselected.
    ///
    /// Keys the schema does not know are allowed through; they price at
    /// zero and only contribute to the line's identity.
    pub fn validate(&self, item_name: &str, options: &SelectedOptions) -> Result<()> {
        for (key, group) in &self.groups {
            if !group.required {
                continue;
            }
            let satisfied = options.get(key).is_some_and(OptionValue::is_selected);
            if !satisfied {
                return Err(OrderError::MissingRequiredOption {
                    item: item_name.to_string(),
                    group: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sum of price deltas for every selection the schema can resolve.
    pub fn options_delta(&self, options: &SelectedOptions) -> Money {
        options
            .iter()
            .filter_map(|(key, value)| self.groups.get(key).map(|g| g.selection_delta(value)))
            .sum()
    }
}
