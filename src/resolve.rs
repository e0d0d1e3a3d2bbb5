use crate::errors::SyncError;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Each key missing from the target, mapped to the key its new row goes
/// immediately after, or `None` for append at end. Entries keep the
/// first-occurrence order of the source.
pub type InsertPlan = IndexMap<String, Option<String>>;

/// Convert the source ordering plus the target's existing keys into an
/// insertion plan.
///
/// Walks `ordered_keys` left to right. Keys already present in
/// `existing_keys` are updates and never enter the plan. For a new key the
/// nearest preceding key that is either existing or already planned becomes
/// its anchor, so consecutive new keys chain off each other. The backward
/// scan runs over the slice itself, never over a hashed collection, so the
/// result depends only on the input order.
///
/// Without an eligible anchor the key maps to `None` (append at end), or in
/// strict mode the whole resolution fails naming the key. A key repeated in
/// the source order is planned once; later occurrences are skipped.
pub fn resolve_after_keys(
    ordered_keys: &[String],
    existing_keys: &HashSet<String>,
    strict: bool,
) -> Result<InsertPlan, SyncError> {
    let mut plan: InsertPlan = IndexMap::new();
    let mut known: HashSet<&str> = existing_keys.iter().map(String::as_str).collect();

    for (index, key) in ordered_keys.iter().enumerate() {
        if existing_keys.contains(key) {
            // Update, not an insert.
            continue;
        }
        if plan.contains_key(key) {
            // Duplicate in the source order; the first occurrence wins.
            continue;
        }

        let anchor = ordered_keys[..index]
            .iter()
            .rev()
            .find(|prev| known.contains(prev.as_str()));

        match anchor {
            Some(anchor) => {
                plan.insert(key.clone(), Some(anchor.clone()));
            }
            None if strict => {
                return Err(SyncError::NoAnchor { key: key.clone() });
            }
            None => {
                plan.insert(key.clone(), None);
            }
        }
        known.insert(key.as_str());
    }

    Ok(plan)
}
