//! Structural identity for configured line items.
//!
//! Two configurations are the same cart row exactly when their canonical
//! encodings match: same base item, same selected options (multi-select
//! order normalized), same attached add-ons (by add-on identity), same
//! note. Quantity and the opaque per-row id never participate.

use std::fmt;

use uuid::Uuid;

use super::line_item::AttachedAddOn;
use crate::catalog::{OptionValue, SelectedOptions};

/// Namespace for derived identities ("brewhaven cart v" as raw bytes).
const IDENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x6272_6577_6861_7665_6e20_6361_7274_2076);

/// The structural key of one line-item configuration.
///
/// Derived, never stored: recompute it from the configuration whenever it
/// is needed, so a deserialized cart can never carry a stale key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(Uuid);

impl Identity {
    /// Computes the identity of a configuration.
    ///
    /// Multi-select values and attached add-ons are sorted before hashing,
    /// so insertion order cannot split one configuration into two rows.
    pub fn compute(
        item_name: &str,
        options: &SelectedOptions,
        add_ons: &[AttachedAddOn],
        note: &str,
    ) -> Identity {
        let mut buf = Vec::new();
        put_str(&mut buf, item_name);

        buf.extend_from_slice(&(options.len() as u32).to_le_bytes());
        for (key, value) in options {
            put_str(&mut buf, key);
            match value {
                OptionValue::One(choice) => {
                    buf.push(0);
                    put_str(&mut buf, choice);
                }
                OptionValue::Many(choices) => {
                    buf.push(1);
                    let mut sorted: Vec<&String> = choices.iter().collect();
                    sorted.sort();
                    buf.extend_from_slice(&(sorted.len() as u32).to_le_bytes());
                    for choice in sorted {
                        put_str(&mut buf, choice);
                    }
                }
            }
        }

        let mut add_on_ids: Vec<[u8; 16]> =
            add_ons.iter().map(|a| *a.id().as_bytes()).collect();
        add_on_ids.sort();
        buf.extend_from_slice(&(add_on_ids.len() as u32).to_le_bytes());
        for id in &add_on_ids {
            buf.extend_from_slice(id);
        }

        put_str(&mut buf, note);

        Identity(Uuid::new_v5(&IDENTITY_NAMESPACE, &buf))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Length-prefixed so "ab"+"c" can never collide with "a"+"bc".
fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;

    fn options(pairs: &[(&str, OptionValue)]) -> SelectedOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_identical_configurations_share_identity() {
        let opts = options(&[("size", "large".into()), ("milk", "oat".into())]);
        let a = Identity::compute("Latte", &opts, &[], "");
        let b = Identity::compute("Latte", &opts, &[], "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_multi_select_order_is_normalized() {
        let forward = options(&[(
            "extras",
            OptionValue::Many(vec!["vanilla".into(), "extra-shot".into()]),
        )]);
        let reversed = options(&[(
            "extras",
            OptionValue::Many(vec!["extra-shot".into(), "vanilla".into()]),
        )]);
        assert_eq!(
            Identity::compute("Latte", &forward, &[], ""),
            Identity::compute("Latte", &reversed, &[], ""),
        );
    }

    #[test]
    fn test_note_distinguishes_configurations() {
        let opts = options(&[("size", "small".into())]);
        let plain = Identity::compute("Latte", &opts, &[], "");
        let noted = Identity::compute("Latte", &opts, &[], "extra hot");
        assert_ne!(plain, noted);
    }

    #[test]
    fn test_option_value_shape_matters() {
        let single = options(&[("extras", "vanilla".into())]);
        let multi = options(&[("extras", OptionValue::Many(vec!["vanilla".into()]))]);
        assert_ne!(
            Identity::compute("Latte", &single, &[], ""),
            Identity::compute("Latte", &multi, &[], ""),
        );
    }

    #[test]
    fn test_present_empty_selection_differs_from_absent() {
        let absent = options(&[]);
        let empty = options(&[("extras", OptionValue::Many(vec![]))]);
        assert_ne!(
            Identity::compute("Latte", &absent, &[], ""),
            Identity::compute("Latte", &empty, &[], ""),
        );
    }

    #[test]
    fn test_add_on_order_is_normalized() {
        let cookie = AttachedAddOn::new("Cookie", Money::from_cents(250));
        let scone = AttachedAddOn::new("Scone", Money::from_cents(325));
        let opts = options(&[]);
        let ab = Identity::compute("Latte", &opts, &[cookie.clone(), scone.clone()], "");
        let ba = Identity::compute("Latte", &opts, &[scone, cookie], "");
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_distinct_add_on_instances_differ() {
        let opts = options(&[]);
        let first = AttachedAddOn::new("Cookie", Money::from_cents(250));
        let second = AttachedAddOn::new("Cookie", Money::from_cents(250));
        assert_ne!(
            Identity::compute("Latte", &opts, &[first], ""),
            Identity::compute("Latte", &opts, &[second], ""),
        );
    }

    #[test]
    fn test_base_item_distinguishes() {
        let opts = options(&[("size", "small".into())]);
        assert_ne!(
            Identity::compute("Latte", &opts, &[], ""),
            Identity::compute("Cappuccino", &opts, &[], ""),
        );
    }
}
