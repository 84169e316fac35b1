//! The compiled collection query as a flat collection→biobank list.

use serde::Deserialize;

use common::catalog::CollectionBiobankLink;

use crate::catalog_utils::molgenis_utils::CatalogClient;

#[derive(Debug, Deserialize)]
struct CollectionInfoRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    biobank: BiobankRef,
}

#[derive(Debug, Deserialize)]
struct BiobankRef {
    links: SelfLinks,
}

#[derive(Debug, Deserialize)]
struct SelfLinks {
    #[serde(rename = "self")]
    self_url: String,
}

/// Fetch the `{collectionId, biobankId}` associations matching the
/// compiled collection query. An empty query fetches all associations
/// (no collection filter active).
pub async fn get_collection_info(
    client: &CatalogClient,
    rsql: &str,
) -> anyhow::Result<Vec<CollectionBiobankLink>> {
    let mut params = vec![
        ("filter", "id,biobank,name,label"),
        ("size", "10000"),
        ("sort", "biobank_label"),
    ];
    if !rsql.is_empty() {
        params.push(("q", rsql));
    }
    let rows = client
        .get_rows::<CollectionInfoRow>("eu_bbmri_eric_collections", &params)
        .await?;
    rows.into_iter()
        .map(|row| {
            // the row endpoint only exposes the biobank as a self link;
            // its id is the trailing path segment
            let biobank_id = row
                .biobank
                .links
                .self_url
                .rsplit('/')
                .next()
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!("malformed biobank link: {}", row.biobank.links.self_url)
                })?;
            Ok(CollectionBiobankLink {
                collection_id: row.id,
                biobank_id: biobank_id.to_string(),
                collection_name: row.name,
            })
        })
        .collect()
}
