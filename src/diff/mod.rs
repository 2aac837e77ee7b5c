//! Object diff builders.
//!
//! Each submodule pairs an `equal(old, new) -> bool` predicate with a
//! `diff(old, new) -> Vec<MigrationStep>` builder, rather than exporting
//! equality as a separate public API.

use std::collections::BTreeMap;

pub mod columns;
pub mod constraints;
pub mod extensions;
pub mod functions;
pub mod indexes;
pub mod policies;
pub mod privileges;
pub mod schemas;
pub mod sequences;
pub mod tables;
pub mod triggers;
pub mod types;
pub mod views;

/// Splits two ordered slices into `(added, dropped, modified)` keyed by
/// `key`. `added`/`dropped` preserve the input slices' order; `modified`
/// preserves `old`'s order. Global alphabetic/topological ordering, where
/// the caller needs it, is applied afterwards.
pub fn diff_list<'a, T, K, FKey, FEqual>(
    old: &'a [T],
    new: &'a [T],
    key: FKey,
    equal: FEqual,
) -> (Vec<&'a T>, Vec<&'a T>, Vec<(&'a T, &'a T)>)
where
    K: Ord,
    FKey: Fn(&T) -> K,
    FEqual: Fn(&T, &T) -> bool,
{
    let old_by_key: BTreeMap<K, &T> = old.iter().map(|t| (key(t), t)).collect();
    let new_by_key: BTreeMap<K, &T> = new.iter().map(|t| (key(t), t)).collect();

    let added: Vec<&T> = new
        .iter()
        .filter(|t| !old_by_key.contains_key(&key(t)))
        .collect();
    let dropped: Vec<&T> = old
        .iter()
        .filter(|t| !new_by_key.contains_key(&key(t)))
        .collect();
    let modified: Vec<(&T, &T)> = old
        .iter()
        .filter_map(|o| {
            new_by_key.get(&key(o)).and_then(|&n| {
                if !equal(o, n) {
                    Some((o, n))
                } else {
                    None
                }
            })
        })
        .collect();

    (added, dropped, modified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_added_dropped_modified() {
        let old = vec![1, 2, 3];
        let new = vec![2, 3, 4];
        let (added, dropped, modified) =
            diff_list(&old, &new, |n| *n, |a, b| a == b || (*a % 2 == *b % 2));
        assert_eq!(added, vec![&4]);
        assert_eq!(dropped, vec![&1]);
        assert!(modified.is_empty());
    }
}
