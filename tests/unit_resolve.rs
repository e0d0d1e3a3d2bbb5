use assert_matches::assert_matches;
use sheet_sync::errors::SyncError;
use sheet_sync::resolve::resolve_after_keys;
use std::collections::HashSet;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn existing(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_existing_forms_a_chain() {
    let plan = resolve_after_keys(&keys(&["A", "B", "C"]), &existing(&[]), false).unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan["A"], None);
    assert_eq!(plan["B"].as_deref(), Some("A"));
    assert_eq!(plan["C"].as_deref(), Some("B"));
}

#[test]
fn empty_existing_strict_fails_on_first_key() {
    let err = resolve_after_keys(&keys(&["A", "B"]), &existing(&[]), true).unwrap_err();
    assert_matches!(err, SyncError::NoAnchor { key } if key == "A");
}

#[test]
fn new_key_between_existing_anchors_to_predecessor() {
    let plan = resolve_after_keys(&keys(&["A", "B", "C"]), &existing(&["A", "C"]), false).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan["B"].as_deref(), Some("A"));
}

#[test]
fn consecutive_new_keys_chain_off_each_other() {
    let plan =
        resolve_after_keys(&keys(&["A", "B", "C", "D"]), &existing(&["A"]), false).unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan["B"].as_deref(), Some("A"));
    assert_eq!(plan["C"].as_deref(), Some("B"));
    assert_eq!(plan["D"].as_deref(), Some("C"));
}

#[test]
fn leading_new_key_appends_in_lenient_mode() {
    let plan =
        resolve_after_keys(&keys(&["NEW", "A", "B"]), &existing(&["A", "B"]), false).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan["NEW"], None);
}

#[test]
fn leading_new_key_fails_strict_mode_naming_the_key() {
    let err =
        resolve_after_keys(&keys(&["NEW", "A", "B"]), &existing(&["A", "B"]), true).unwrap_err();
    assert_matches!(err, SyncError::NoAnchor { key } if key == "NEW");
}

#[test]
fn fully_existing_order_yields_empty_plan() {
    let plan =
        resolve_after_keys(&keys(&["A", "B", "C"]), &existing(&["A", "B", "C"]), false).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn existing_keys_never_appear_in_the_plan() {
    let plan = resolve_after_keys(
        &keys(&["A", "X", "B", "Y"]),
        &existing(&["A", "B"]),
        false,
    )
    .unwrap();

    assert!(!plan.contains_key("A"));
    assert!(!plan.contains_key("B"));
    assert_eq!(plan["X"].as_deref(), Some("A"));
    assert_eq!(plan["Y"].as_deref(), Some("B"));
}

#[test]
fn anchors_are_existing_or_strictly_earlier() {
    let order = keys(&["A", "N1", "B", "N2", "N3", "C"]);
    let existing = existing(&["A", "B", "C"]);
    let plan = resolve_after_keys(&order, &existing, false).unwrap();

    for (key, anchor) in &plan {
        let Some(anchor) = anchor else { continue };
        let key_pos = order.iter().position(|k| k == key).unwrap();
        let anchor_ok = existing.contains(anchor)
            || order.iter().position(|k| k == anchor).unwrap() < key_pos;
        assert!(anchor_ok, "anchor '{anchor}' for '{key}' is not eligible");
    }
}

#[test]
fn plan_preserves_first_occurrence_order() {
    let plan =
        resolve_after_keys(&keys(&["A", "N2", "N1", "N3"]), &existing(&["A"]), false).unwrap();

    let planned: Vec<&str> = plan.keys().map(String::as_str).collect();
    assert_eq!(planned, vec!["N2", "N1", "N3"]);
}

#[test]
fn duplicate_key_first_occurrence_wins() {
    let plan = resolve_after_keys(&keys(&["A", "B", "B"]), &existing(&["A"]), false).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan["B"].as_deref(), Some("A"));
}
