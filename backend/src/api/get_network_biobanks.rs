//! Biobanks belonging to the selected collection networks.

use serde::Deserialize;

use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::query::rsql::{and, in_query, transform_to_rsql};

#[derive(Debug, Deserialize)]
struct IdRow {
    id: String,
}

/// Ids of biobanks that are members of any of the given networks. Feeds
/// the collection query's network OR-group: a collection also matches a
/// network filter when its parent biobank is in the network.
pub async fn get_network_biobanks(
    client: &CatalogClient,
    networks: &[String],
) -> anyhow::Result<Vec<String>> {
    if networks.is_empty() {
        return Ok(Vec::new());
    }
    let q = transform_to_rsql(&and(in_query("network", networks)));
    let rows = client
        .get_rows::<IdRow>(
            "eu_bbmri_eric_biobanks",
            &[("filter", "id"), ("size", "10000"), ("q", &q)],
        )
        .await?;
    Ok(rows.into_iter().map(|row| row.id).collect())
}
