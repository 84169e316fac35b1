//! Full biobank records for the matched id list.

use common::catalog::BiobankRecord;

use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::query::rsql::{and, in_query, transform_to_rsql};

/// Nested attribute selector pulling each biobank's flat collection list
/// along with the record itself.
pub const BIOBANK_ATTRIBUTE_SELECTOR: &str = "collections(id,description,materials,\
diagnosis_available,name,type,order_of_magnitude(*),size,sub_collections(*),\
parent_collection,quality(*),data_categories),*";

/// Fetch the full records of the given biobanks.
pub async fn get_biobanks(
    client: &CatalogClient,
    biobank_ids: &[String],
) -> anyhow::Result<Vec<BiobankRecord>> {
    if biobank_ids.is_empty() {
        return Ok(Vec::new());
    }
    let q = transform_to_rsql(&and(in_query("id", biobank_ids)));
    client
        .get_items::<BiobankRecord>(
            "eu_bbmri_eric_biobanks",
            &[
                ("num", "10000"),
                ("attrs", BIOBANK_ATTRIBUTE_SELECTOR),
                ("q", &q),
            ],
        )
        .await
}
