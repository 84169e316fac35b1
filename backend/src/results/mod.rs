//! Result reconciliation: compiled-query outputs in, biobank view out.

pub mod collection_tree;

mod reconcile;
pub use reconcile::{ReconcileInputs, counts, loading, matched_biobank_ids, reconcile};
