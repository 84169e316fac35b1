//! Detail-report fetches for single biobanks, collections and networks.

use crate::api::get_biobanks::BIOBANK_ATTRIBUTE_SELECTOR;
use crate::catalog_utils::molgenis_utils::CatalogClient;

/// Attribute selector for collection reports; pulls the full nested
/// detail the report page renders.
pub const COLLECTION_REPORT_ATTRIBUTE_SELECTOR: &str = "*,diagnosis_available(label),\
biobank(id,name,juridical_person,country,url,contact),contact(title_before_name,\
first_name,last_name,title_after_name,email,phone),sub_collections(*)";

/// Quality detail selector for the biobank report.
const BIOBANK_QUALITY_SELECTOR: &str = "quality(id,standards(*),assess_level_bio(*),\
certification_number,certification_image_link,certification_report,label)";

pub async fn get_biobank_report(
    client: &CatalogClient,
    biobank_id: &str,
) -> anyhow::Result<serde_json::Value> {
    let attrs = format!("{BIOBANK_ATTRIBUTE_SELECTOR},{BIOBANK_QUALITY_SELECTOR},contact(*)");
    client
        .get_entity("eu_bbmri_eric_biobanks", biobank_id, &[("attrs", &attrs)])
        .await
}

pub async fn get_collection_report(
    client: &CatalogClient,
    collection_id: &str,
) -> anyhow::Result<serde_json::Value> {
    client
        .get_entity(
            "eu_bbmri_eric_collections",
            collection_id,
            &[("attrs", COLLECTION_REPORT_ATTRIBUTE_SELECTOR)],
        )
        .await
}

#[derive(Debug, Clone)]
pub struct NetworkReport {
    pub network: serde_json::Value,
    pub biobanks: Vec<serde_json::Value>,
    pub collections: Vec<serde_json::Value>,
}

/// Fetch a network plus its member biobanks and collections. The three
/// fetches are independent and run concurrently; any failure fails the
/// report as a whole.
pub async fn get_network_report(
    client: &CatalogClient,
    network_id: &str,
) -> anyhow::Result<NetworkReport> {
    let network_q = format!("network=={network_id}");
    let biobank_params = [("q", network_q.as_str()), ("num", "10000")];
    let collection_params = [
        ("q", network_q.as_str()),
        ("num", "10000"),
        ("attrs", COLLECTION_REPORT_ATTRIBUTE_SELECTOR),
    ];
    let (network, biobanks, collections) = futures::try_join!(
        client.get_entity::<serde_json::Value>("eu_bbmri_eric_networks", network_id, &[]),
        client.get_items::<serde_json::Value>("eu_bbmri_eric_biobanks", &biobank_params),
        client.get_items::<serde_json::Value>("eu_bbmri_eric_collections", &collection_params),
    )?;
    Ok(NetworkReport {
        network,
        biobanks,
        collections,
    })
}
