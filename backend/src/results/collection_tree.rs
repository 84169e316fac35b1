//! Collection forest reconstruction and filtering.

use std::collections::{HashMap, HashSet};

use common::catalog::CollectionRecord;
use common::view::CollectionNode;

/// Rebuild the owned collection forest from the flat record list.
///
/// A single group-by-parent pass indexes children; roots are the records
/// without a parent. Records pointing at an unknown parent are dropped,
/// and cycles are unreachable from any root, so malformed input can never
/// recurse forever.
pub fn build_forest(records: &[CollectionRecord]) -> Vec<CollectionNode> {
    let known_ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let mut children_by_parent: HashMap<&str, Vec<&CollectionRecord>> = HashMap::new();
    let mut roots: Vec<&CollectionRecord> = Vec::new();
    for record in records {
        match record.parent.as_deref() {
            None => roots.push(record),
            Some(parent) if known_ids.contains(parent) => {
                children_by_parent.entry(parent).or_default().push(record);
            }
            Some(parent) => {
                tracing::warn!(
                    collection = %record.id,
                    parent = %parent,
                    "dropping collection with unreachable parent"
                );
            }
        }
    }
    roots
        .iter()
        .map(|record| attach_children(record, &children_by_parent))
        .collect()
}

fn attach_children(
    record: &CollectionRecord,
    children_by_parent: &HashMap<&str, Vec<&CollectionRecord>>,
) -> CollectionNode {
    let sub_collections = children_by_parent
        .get(record.id.as_str())
        .map(|children| {
            children
                .iter()
                .map(|child| attach_children(child, children_by_parent))
                .collect()
        })
        .unwrap_or_default();
    CollectionNode {
        id: record.id.clone(),
        name: record.name.clone(),
        parent: record.parent.clone(),
        sub_collections,
    }
}

/// Keep a node when its own id is allowed or any recursively filtered
/// descendant survived; surviving nodes retain only surviving descendants.
pub fn prune(allowed_ids: &HashSet<String>, forest: &[CollectionNode]) -> Vec<CollectionNode> {
    forest
        .iter()
        .filter_map(|node| {
            let sub_collections = prune(allowed_ids, &node.sub_collections);
            if allowed_ids.contains(&node.id) || !sub_collections.is_empty() {
                Some(CollectionNode {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    parent: node.parent.clone(),
                    sub_collections,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>) -> CollectionRecord {
        CollectionRecord {
            id: id.to_string(),
            parent: parent.map(|p| p.to_string()),
            ..CollectionRecord::default()
        }
    }

    fn chain_of_four() -> Vec<CollectionNode> {
        build_forest(&[
            record("1", None),
            record("2", Some("1")),
            record("3", Some("2")),
            record("4", Some("3")),
        ])
    }

    #[test]
    fn forest_is_rebuilt_from_flat_records() {
        let forest = chain_of_four();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "1");
        assert_eq!(forest[0].sub_collections[0].id, "2");
        assert_eq!(forest[0].sub_collections[0].sub_collections[0].id, "3");
    }

    #[test]
    fn unreachable_parents_are_dropped() {
        let forest = build_forest(&[record("1", None), record("orphan", Some("missing"))]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "1");
    }

    #[test]
    fn cyclic_records_do_not_recurse_forever() {
        let forest = build_forest(&[
            record("a", Some("b")),
            record("b", Some("a")),
            record("top", None),
        ]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "top");
    }

    #[test]
    fn deep_match_retains_the_full_ancestor_chain() {
        let allowed: HashSet<String> = ["4".to_string()].into_iter().collect();
        let pruned = prune(&allowed, &chain_of_four());

        let mut node = &pruned[0];
        for expected in ["1", "2", "3"] {
            assert_eq!(node.id, expected);
            assert_eq!(node.sub_collections.len(), 1);
            node = &node.sub_collections[0];
        }
        assert_eq!(node.id, "4");
        assert!(node.sub_collections.is_empty());
    }

    #[test]
    fn unmatched_branches_are_removed() {
        let forest = build_forest(&[
            record("1", None),
            record("2", Some("1")),
            record("5", None),
        ]);
        let allowed: HashSet<String> = ["2".to_string()].into_iter().collect();
        let pruned = prune(&allowed, &forest);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].id, "1");
        assert_eq!(pruned[0].sub_collections[0].id, "2");
    }
}
