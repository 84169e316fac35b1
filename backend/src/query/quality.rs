//! Resolution of quality-standard facets into primary-key id sets.

use common::catalog::QualityAssessment;

/// Sentinel ids guaranteed absent from the catalog. Injected when a
/// quality facet is selected but no entity satisfies it, so the compiled
/// query matches nothing instead of everything.
pub const INVALID_COLLECTION_ID: &str = "invalid_collection";
pub const INVALID_BIOBANK_ID: &str = "invalid_biobank";

/// Distinct assessed-entity ids in first-seen order. With an active
/// selection and zero association rows, the sentinel is returned.
pub fn resolve_quality_targets(
    selection_active: bool,
    assessments: &[QualityAssessment],
    sentinel: &str,
) -> Vec<String> {
    if !selection_active {
        return Vec::new();
    }
    let mut targets: Vec<String> = Vec::new();
    for assessment in assessments {
        if let Some(target_id) = assessment.target_id() {
            if !targets.iter().any(|id| id == target_id) {
                targets.push(target_id.to_string());
            }
        }
    }
    if targets.is_empty() {
        targets.push(sentinel.to_string());
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog::EntityRef;

    fn collection_row(id: &str) -> QualityAssessment {
        QualityAssessment {
            collection: Some(EntityRef {
                id: id.to_string(),
                label: None,
            }),
            biobank: None,
            quality_standard: None,
        }
    }

    #[test]
    fn targets_are_distinct_and_ordered() {
        let rows = vec![
            collection_row("col-1"),
            collection_row("col-1"),
            collection_row("col-2"),
        ];
        assert_eq!(
            resolve_quality_targets(true, &rows, INVALID_COLLECTION_ID),
            ["col-1", "col-2"]
        );
    }

    #[test]
    fn empty_lookup_with_active_selection_yields_the_sentinel() {
        assert_eq!(
            resolve_quality_targets(true, &[], INVALID_COLLECTION_ID),
            [INVALID_COLLECTION_ID]
        );
        assert_eq!(
            resolve_quality_targets(true, &[], INVALID_BIOBANK_ID),
            [INVALID_BIOBANK_ID]
        );
    }

    #[test]
    fn inactive_selection_yields_no_predicate() {
        assert!(resolve_quality_targets(false, &[], INVALID_COLLECTION_ID).is_empty());
    }
}
