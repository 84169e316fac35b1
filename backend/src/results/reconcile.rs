//! Merging the compiled-query results into the final biobank view.

use std::collections::{BTreeMap, HashMap, HashSet};

use common::catalog::{BiobankRecord, CollectionBiobankLink};
use common::view::{BiobankView, ResultCounts};

use crate::results::collection_tree;

/// Everything the reconciliation depends on. `biobank_ids` and
/// `collection_links` are `None` until their fetches have completed.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInputs<'a> {
    /// Biobank ids matched by the biobank query, in result order.
    pub biobank_ids: Option<&'a [String]>,
    /// Flat collection → biobank associations matched by the collection query.
    pub collection_links: Option<&'a [CollectionBiobankLink]>,
    /// Whether any collection-level filter constrained the association list.
    pub collection_filter_active: bool,
    /// Full biobank records fetched so far, keyed by id.
    pub biobanks: &'a BTreeMap<String, BiobankRecord>,
}

/// No partial results: the view cannot finalize until both id fetches have
/// landed. A failed dependency is treated the same way by never committing.
pub fn loading(inputs: &ReconcileInputs) -> bool {
    inputs.biobank_ids.is_none() || inputs.collection_links.is_none()
}

/// The final biobank id list. With an active collection filter this is the
/// distinct biobank ids of the association list that also appear in the
/// biobank id set, keeping first occurrences; otherwise the biobank id set
/// unchanged.
pub fn matched_biobank_ids(inputs: &ReconcileInputs) -> Vec<String> {
    let (Some(biobank_ids), Some(links)) = (inputs.biobank_ids, inputs.collection_links)
    else {
        return Vec::new();
    };
    if !inputs.collection_filter_active {
        return biobank_ids.to_vec();
    }
    let allowed: HashSet<&str> = biobank_ids.iter().map(|id| id.as_str()).collect();
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| allowed.contains(link.biobank_id.as_str()))
        .filter(|link| seen.insert(link.biobank_id.clone()))
        .map(|link| link.biobank_id.clone())
        .collect()
}

/// Build the final view: full record plus pruned collection forest where
/// the record has arrived, a bare id otherwise.
pub fn reconcile(inputs: &ReconcileInputs) -> Vec<BiobankView> {
    if loading(inputs) {
        return Vec::new();
    }
    let allowed_collections: HashSet<String> = inputs
        .collection_links
        .unwrap_or_default()
        .iter()
        .map(|link| link.collection_id.clone())
        .collect();
    matched_biobank_ids(inputs)
        .into_iter()
        .map(|biobank_id| match inputs.biobanks.get(&biobank_id) {
            Some(record) => {
                let forest = collection_tree::build_forest(&record.collections);
                BiobankView {
                    id: biobank_id,
                    record: Some(record.clone()),
                    collections: collection_tree::prune(&allowed_collections, &forest),
                }
            }
            None => BiobankView {
                id: biobank_id,
                record: None,
                collections: Vec::new(),
            },
        })
        .collect()
}

/// Matched biobank count plus the number of association entries belonging
/// to matched biobanks. Without a biobank match constraint the collection
/// count falls back to the raw association count.
pub fn counts(inputs: &ReconcileInputs) -> ResultCounts {
    let matched = matched_biobank_ids(inputs);
    let links = inputs.collection_links.unwrap_or_default();
    let collections = if !matched.is_empty() && !links.is_empty() {
        let mut per_biobank: HashMap<&str, usize> = HashMap::new();
        for link in links {
            *per_biobank.entry(link.biobank_id.as_str()).or_default() += 1;
        }
        matched
            .iter()
            .filter_map(|id| per_biobank.get(id.as_str()))
            .sum()
    } else {
        links.len()
    };
    ResultCounts {
        biobanks: matched.len(),
        collections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog::CollectionRecord;

    fn link(collection_id: &str, biobank_id: &str) -> CollectionBiobankLink {
        CollectionBiobankLink {
            collection_id: collection_id.to_string(),
            biobank_id: biobank_id.to_string(),
            collection_name: None,
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn loading_until_both_inputs_arrive() {
        let biobanks = BTreeMap::new();
        let ids = ids(&["A"]);
        let links = vec![link("c1", "A")];

        let mut inputs = ReconcileInputs {
            biobank_ids: None,
            collection_links: None,
            collection_filter_active: false,
            biobanks: &biobanks,
        };
        assert!(loading(&inputs));
        inputs.biobank_ids = Some(&ids);
        assert!(loading(&inputs));
        inputs.collection_links = Some(&links);
        assert!(!loading(&inputs));
    }

    #[test]
    fn active_collection_filter_intersects_the_id_sets() {
        let biobanks = BTreeMap::new();
        let biobank_ids = ids(&["A", "B"]);
        let links = vec![link("c1", "A")];
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: true,
            biobanks: &biobanks,
        };
        assert_eq!(matched_biobank_ids(&inputs), ["A"]);
    }

    #[test]
    fn no_collection_filter_passes_the_biobank_ids_through() {
        let biobanks = BTreeMap::new();
        let biobank_ids = ids(&["A", "B"]);
        let links = Vec::new();
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: false,
            biobanks: &biobanks,
        };
        assert_eq!(matched_biobank_ids(&inputs), ["A", "B"]);
    }

    #[test]
    fn duplicate_associations_keep_first_occurrence_order() {
        let biobanks = BTreeMap::new();
        let biobank_ids = ids(&["A", "B", "C"]);
        let links = vec![
            link("c1", "B"),
            link("c2", "A"),
            link("c3", "B"),
            link("c4", "unknown"),
        ];
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: true,
            biobanks: &biobanks,
        };
        assert_eq!(matched_biobank_ids(&inputs), ["B", "A"]);
    }

    #[test]
    fn unfetched_records_surface_as_bare_ids() {
        let mut biobanks = BTreeMap::new();
        biobanks.insert(
            "A".to_string(),
            BiobankRecord {
                id: "A".to_string(),
                name: "Biobank A".to_string(),
                collections: vec![CollectionRecord {
                    id: "c1".to_string(),
                    ..CollectionRecord::default()
                }],
                ..BiobankRecord::default()
            },
        );
        let biobank_ids = ids(&["A", "B"]);
        let links = vec![link("c1", "A"), link("c2", "B")];
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: false,
            biobanks: &biobanks,
        };
        let views = reconcile(&inputs);
        assert_eq!(views.len(), 2);
        assert!(views[0].record.is_some());
        assert_eq!(views[0].collections.len(), 1);
        assert!(views[1].record.is_none());
        assert_eq!(views[1].id, "B");
    }

    #[test]
    fn collection_count_sums_matched_biobanks() {
        let biobanks = BTreeMap::new();
        let biobank_ids = ids(&["A"]);
        let links = vec![link("c1", "A"), link("c2", "A"), link("c3", "B")];
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: true,
            biobanks: &biobanks,
        };
        assert_eq!(
            counts(&inputs),
            ResultCounts {
                biobanks: 1,
                collections: 2
            }
        );
    }

    #[test]
    fn collection_count_falls_back_to_the_raw_association_count() {
        let biobanks = BTreeMap::new();
        let biobank_ids = Vec::new();
        let links = vec![link("c1", "A"), link("c2", "B")];
        let inputs = ReconcileInputs {
            biobank_ids: Some(&biobank_ids),
            collection_links: Some(&links),
            collection_filter_active: false,
            biobanks: &biobanks,
        };
        assert_eq!(counts(&inputs).collections, 2);
    }
}
