//! # keyward-core
//!
//! Attribute- and key-addressable containers for the keyward workspace.
//!
//! This crate provides:
//! - The `EntryStore` trait shared by every container variant
//! - `Container`, the unrestricted base container
//! - `NullObject` / `Nullable`, the absorbing null sentinel
//! - `NullableContainer`, which reads missing keys as the sentinel
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keyward_core::{NullableContainer, traits::EntryStore};
//!
//! let n: NullableContainer = [("k1", json!(1))].into_iter().collect();
//! assert!(n.attr("missing")?.attr("child")?.is_null());
//! ```

pub mod container;
pub mod null;
pub mod nullable;
pub mod traits;

pub use container::Container;
pub use null::{NullObject, Nullable, UNDEFINED};
pub use nullable::NullableContainer;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use keyward_contracts::error::{AttributeCause, ContainerError};

    use super::*;
    use crate::traits::EntryStore;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn sample() -> Container {
        [("k", json!(17)), ("name", json!("fred"))].into_iter().collect()
    }

    fn nested_nullable() -> NullableContainer {
        [
            ("k1", json!(1)),
            ("k2", json!({ "nk1": "fred" })),
            ("zero", json!(0)),
            ("blank", json!("")),
        ]
        .into_iter()
        .collect()
    }

    // ── Container ─────────────────────────────────────────────────────────────

    #[test]
    fn attr_and_item_share_storage() {
        let mut c = sample();
        assert_eq!(c.attr("k").unwrap(), c.item("k").unwrap());

        c.set_attr("added", "via-attr");
        assert_eq!(c.item("added").unwrap(), &json!("via-attr"));

        c.set_item("k", 18);
        assert_eq!(c.attr("k").unwrap(), &json!(18));
    }

    #[test]
    fn missing_key_and_missing_attribute_errors() {
        let c = sample();
        assert_eq!(c.item("nope"), Err(ContainerError::key_not_found("nope")));
        assert_eq!(
            c.attr("nope"),
            Err(ContainerError::attribute("nope", AttributeCause::Missing))
        );
    }

    #[test]
    fn repr_shows_type_and_entries_in_order() {
        let c = sample();
        assert_eq!(c.repr(), r#"Container({"k": 17, "name": "fred"})"#);
        assert_eq!(c.to_string(), c.repr());
        assert_eq!(Container::new().repr(), "Container({})");
    }

    #[test]
    fn keys_values_items_follow_insertion_order() {
        let mut c = sample();
        c.set_item("a", json!(null));
        assert_eq!(c.keys().collect::<Vec<_>>(), ["k", "name", "a"]);
        assert_eq!(
            c.values().cloned().collect::<Vec<_>>(),
            [json!(17), json!("fred"), json!(null)]
        );
        let items: Vec<(&str, &Value)> = c.items().collect();
        assert_eq!(items[1], ("name", &json!("fred")));
        assert_eq!((&c).into_iter().count(), 3);
    }

    #[test]
    fn get_and_get_or() {
        let c = sample();
        let fallback = json!("default");
        assert_eq!(c.get("k"), Some(&json!(17)));
        assert_eq!(c.get("missing"), None);
        assert_eq!(c.get_or("missing", &fallback), &fallback);
        assert_eq!(c.get_or("k", &fallback), &json!(17));
    }

    #[test]
    fn setdefault_inserts_only_when_absent() {
        let mut c = sample();
        assert_eq!(c.setdefault("k", json!(0)), &json!(17));
        assert_eq!(c.setdefault("fresh", json!([])), &json!([]));
        c.setdefault("fresh", json!(1))
            .as_array_mut()
            .unwrap()
            .push(json!("x"));
        assert_eq!(c.item("fresh").unwrap(), &json!(["x"]));
    }

    #[test]
    fn pop_pop_or_and_del_item() {
        let mut c = sample();
        assert_eq!(c.pop("k").unwrap(), json!(17));
        assert_eq!(c.pop("k"), Err(ContainerError::key_not_found("k")));
        assert_eq!(c.pop_or("k", json!("gone")), json!("gone"));

        c.del_item("name").unwrap();
        assert!(c.is_empty());
        assert_eq!(c.del_item("name"), Err(ContainerError::key_not_found("name")));
    }

    #[test]
    fn popitem_removes_last_inserted() {
        let mut c = sample();
        c.set_item("last", "x");
        assert_eq!(c.popitem().unwrap(), ("last".to_string(), json!("x")));
        assert_eq!(c.popitem().unwrap(), ("name".to_string(), json!("fred")));
        assert_eq!(c.popitem().unwrap(), ("k".to_string(), json!(17)));
        assert_eq!(c.popitem(), Err(ContainerError::EmptyContainer));
    }

    #[test]
    fn pop_preserves_order_of_remaining_entries() {
        let mut c: Container = [("a", json!(1)), ("b", json!(2)), ("c", json!(3))]
            .into_iter()
            .collect();
        c.pop("a").unwrap();
        assert_eq!(c.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn update_overwrites_and_appends() {
        let mut c = sample();
        c.update([("k", json!(1)), ("jeff", json!({ "j1": "robbins" }))]);
        assert_eq!(c.item("k").unwrap(), &json!(1));
        assert_eq!(c.keys().collect::<Vec<_>>(), ["k", "name", "jeff"]);
    }

    #[test]
    fn clone_is_equal_and_independent() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_item("k", 0);
        if let Some(name) = copy.get_mut("name") {
            *name = json!("changed");
        }
        assert_ne!(copy, original);
        assert_eq!(original.item("k").unwrap(), &json!(17));
        assert_eq!(original.item("name").unwrap(), &json!("fred"));
    }

    #[test]
    fn equality_ignores_order() {
        let a: Container = [("x", json!(1)), ("y", json!(2))].into_iter().collect();
        let b: Container = [("y", json!(2)), ("x", json!(1))].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn from_keys_maps_every_key_to_value() {
        let c = Container::from_keys(["a", "b"], json!(null));
        assert_eq!(c.len(), 2);
        assert_eq!(c.item("b").unwrap(), &json!(null));
    }

    #[test]
    fn clear_empties_container() {
        let mut c = sample();
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.to_json(), json!({}));
    }

    #[test]
    fn container_serializes_as_plain_map() {
        let c = sample();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"k":17,"name":"fred"}"#);
        let decoded: Container = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, c);
        assert_eq!(decoded.keys().collect::<Vec<_>>(), ["k", "name"]);
    }

    // ── NullObject ────────────────────────────────────────────────────────────

    #[test]
    fn null_object_absorbs_lookups() {
        let null = UNDEFINED;
        assert_eq!(null.attr("anything").unwrap(), UNDEFINED);
        assert_eq!(null.item("anything"), UNDEFINED);
        assert_eq!(null.to_string(), "");
        assert!(!null.is_truthy());
    }

    #[test]
    fn null_object_rejects_mutation_and_reserved_names() {
        assert!(matches!(
            UNDEFINED.set_attr("bar", json!(null)),
            Err(ContainerError::UnsupportedOperation { .. })
        ));
        assert_eq!(
            UNDEFINED.attr("__name__"),
            Err(ContainerError::attribute("__name__", AttributeCause::Reserved))
        );
    }

    // ── NullableContainer ─────────────────────────────────────────────────────

    #[test]
    fn nullable_missing_reads_return_sentinel() {
        let n = nested_nullable();

        let missing = n.attr("missing").unwrap();
        assert!(missing.is_null());
        assert_eq!(missing.to_string(), "");
        assert!(!missing.is_truthy());

        let deep = missing.attr("anything").unwrap().attr("else").unwrap();
        assert_eq!(deep, Nullable::Null(UNDEFINED));
        assert!(n.item("missing").item("x").is_null());

        assert!(!n.contains("missing"));
    }

    #[test]
    fn nullable_present_values_are_returned() {
        let n = nested_nullable();
        assert_eq!(n.item("k1").value(), Some(&json!(1)));
        assert!(n.item("k1").is_truthy());
        assert_eq!(
            n.attr("k2").unwrap().attr("nk1").unwrap().value(),
            Some(&json!("fred"))
        );
        assert_eq!(n.attr("k2").unwrap().item("nk1").to_string(), r#""fred""#);
    }

    #[test]
    fn nullable_falsy_values_read_as_sentinel_but_are_contained() {
        let n = nested_nullable();
        assert!(n.item("zero").is_null());
        assert!(n.attr("blank").unwrap().is_null());
        assert!(n.contains("zero"));
        assert!(n.contains("blank"));
        assert_eq!(n.get("zero"), Some(&json!(0)));
    }

    #[test]
    fn nullable_lookups_through_scalars_degrade_to_sentinel() {
        let n = nested_nullable();
        assert!(n.attr("k1").unwrap().attr("child").unwrap().is_null());
    }

    #[test]
    fn nullable_reserved_attribute_is_not_absorbed() {
        let n = nested_nullable();
        assert_eq!(
            n.attr("__name__"),
            Err(ContainerError::attribute("__name__", AttributeCause::Reserved))
        );
        // Subscript reads have no reserved names.
        assert!(n.item("__name__").is_null());
    }

    #[test]
    fn nullable_sentinel_rejects_assignment() {
        let n = nested_nullable();
        match n.attr("foo").unwrap().attr("bar").unwrap() {
            Nullable::Null(null) => assert!(null.set_attr("baz", json!(null)).is_err()),
            other => panic!("expected sentinel, got {:?}", other),
        }
    }

    #[test]
    fn nullable_inherits_container_operations() {
        let mut n = nested_nullable();
        n.set_attr("Value", "goodbye");
        n.update([("jeff", json!({ "j1": "robbins", "j2": "scott" }))]);
        assert_eq!(n.attr("jeff").unwrap().attr("j1").unwrap().value(), Some(&json!("robbins")));
        assert!(n.attr("wendy").unwrap().attr("carson").unwrap().is_null());
        assert_eq!(n.pop("Value").unwrap(), json!("goodbye"));
        assert!(n.repr().starts_with("NullableContainer({\"k1\": 1"));
    }

    #[test]
    fn nullable_serializes_as_plain_map() {
        let n: NullableContainer = [("Value", json!("hello"))].into_iter().collect();
        assert_eq!(serde_json::to_value(&n).unwrap(), json!({ "Value": "hello" }));
        let empty = NullableContainer::new();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
        let decoded: NullableContainer = serde_json::from_value(json!({ "a": 1 })).unwrap();
        assert_eq!(decoded.item("a").value(), Some(&json!(1)));
    }
}
