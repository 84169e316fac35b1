//! The reconciled result view consumed by the UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{BiobankRecord, FacetOption};

/// Facet name → selected option objects, non-empty facets only.
pub type ActiveFilterSummary = BTreeMap<String, Vec<FacetOption>>;

/// One collection with its surviving sub-collections. The forest is
/// rebuilt on every raw-response ingestion, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionNode {
    pub id: String,
    pub name: Option<String>,
    pub parent: Option<String>,
    pub sub_collections: Vec<CollectionNode>,
}

/// One biobank in the result list. `record` is `None` while the full
/// attribute record is still being fetched; consumers treat a bare id as
/// "still resolving", never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiobankView {
    pub id: String,
    pub record: Option<BiobankRecord>,
    pub collections: Vec<CollectionNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultCounts {
    pub biobanks: usize,
    pub collections: usize,
}
