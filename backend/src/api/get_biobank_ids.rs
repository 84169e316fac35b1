//! The compiled biobank query as an ordered id set.

use serde::Deserialize;

use crate::catalog_utils::molgenis_utils::CatalogClient;

#[derive(Debug, Deserialize)]
struct IdRow {
    id: String,
}

/// Fetch the biobank ids matching the compiled biobank query, sorted by
/// name so the result order is stable.
pub async fn get_biobank_ids(
    client: &CatalogClient,
    rsql: &str,
) -> anyhow::Result<Vec<String>> {
    let mut params = vec![("filter", "id"), ("size", "10000"), ("sort", "name")];
    if !rsql.is_empty() {
        params.push(("q", rsql));
    }
    let rows = client
        .get_rows::<IdRow>("eu_bbmri_eric_biobanks", &params)
        .await?;
    Ok(rows.into_iter().map(|row| row.id).collect())
}
