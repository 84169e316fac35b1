//! Quality assessment association lookups.

use common::catalog::QualityAssessment;

use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::query::rsql::{and, in_query, transform_to_rsql};

/// Collections assessed at one of the selected quality levels. An empty
/// selection means the facet is inactive and nothing is fetched.
pub async fn get_collection_quality_assessments(
    client: &CatalogClient,
    selected_levels: &[String],
) -> anyhow::Result<Vec<QualityAssessment>> {
    if selected_levels.is_empty() {
        return Ok(Vec::new());
    }
    let q = transform_to_rsql(&and(in_query("assess_level_col", selected_levels)));
    client
        .get_items::<QualityAssessment>("eu_bbmri_eric_col_qual_info", &[("q", &q)])
        .await
}

/// Biobanks assessed at one of the selected quality levels.
pub async fn get_biobank_quality_assessments(
    client: &CatalogClient,
    selected_levels: &[String],
) -> anyhow::Result<Vec<QualityAssessment>> {
    if selected_levels.is_empty() {
        return Ok(Vec::new());
    }
    let q = transform_to_rsql(&and(in_query("assess_level_bio", selected_levels)));
    client
        .get_items::<QualityAssessment>("eu_bbmri_eric_bio_qual_info", &[("q", &q)])
        .await
}
