//! Facet option fetches.

use std::sync::LazyLock;

use regex::Regex;

use common::catalog::{DiseaseType, FacetOption};
use common::filters::facet_definition;

use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::query::rsql::{and, fuzzy_query, in_query, transform_to_rsql};

/// Matches partial ICD-10 codes such as `C18`, `c22.3` or `XI`.
static IS_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z]|[XVI]+)(\d{0,2}(-([A-Z]\d{0,2})?|\.\d{0,3})?)?$")
        .expect("valid ICD code pattern")
});

/// Generic option fetch for a facet backed by a catalog table.
pub async fn get_facet_options(
    client: &CatalogClient,
    facet_name: &str,
) -> anyhow::Result<Vec<FacetOption>> {
    let Some(table) = facet_definition(facet_name).and_then(|fd| fd.table) else {
        anyhow::bail!("facet {} has no backing table", facet_name);
    };
    client.get_items::<FacetOption>(table, &[]).await
}

/// Search the disease type table. A query shaped like an ICD code searches
/// the code column (sorted by code), anything else the label column.
pub async fn query_diagnosis_options(
    client: &CatalogClient,
    query: &str,
) -> anyhow::Result<Vec<DiseaseType>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let mut params: Vec<(&str, String)> = Vec::new();
    if IS_CODE.is_match(query) {
        params.push(("q", format!("code=like={}", query.to_uppercase())));
        params.push(("sort", "code".to_string()));
    } else {
        params.push(("q", transform_to_rsql(&and(fuzzy_query("label", query)))));
    }
    let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    client
        .get_items::<DiseaseType>("eu_bbmri_eric_disease_types", &params)
        .await
}

/// Look up disease types by exact code set (URL query restoration).
pub async fn get_diagnosis_by_codes(
    client: &CatalogClient,
    codes: &[String],
) -> anyhow::Result<Vec<DiseaseType>> {
    if codes.is_empty() {
        return Ok(Vec::new());
    }
    let q = transform_to_rsql(&and(in_query("code", codes)));
    client
        .get_items::<DiseaseType>("eu_bbmri_eric_disease_types", &[("q", &q)])
        .await
}

/// Network options for the biobank- and collection-network facets. The
/// shared COVID-19 network is surfaced through its own checkboxes, never
/// as a plain network option.
pub async fn get_network_options(client: &CatalogClient) -> anyhow::Result<Vec<FacetOption>> {
    let options = client
        .get_items::<FacetOption>("eu_bbmri_eric_networks", &[])
        .await?;
    Ok(options
        .into_iter()
        .filter(|option| option.id != common::filters::COVID19_NETWORK_ID)
        .collect())
}

/// The commercial-use facet has a fixed option list.
pub fn collaboration_type_options() -> Vec<FacetOption> {
    vec![
        FacetOption::new("true", "Commercial use"),
        FacetOption::new("false", "Non-commercial use"),
    ]
}

/// The common-network-properties facet has a fixed option list.
pub fn common_network_options() -> Vec<FacetOption> {
    vec![
        FacetOption::new("common_sops", "Common SOPs"),
        FacetOption::new("common_collection_focus", "Common Collection Focus"),
        FacetOption::new("common_charter", "Common Charter"),
        FacetOption::new("common_data_access_policy", "Common Data Access Policy"),
        FacetOption::new("common_sample_access_policy", "Common Sample Access Policy"),
        FacetOption::new("common_mta", "Common MTA"),
        FacetOption::new("common_image_access_policy", "Common Image Access Policy"),
        FacetOption::new("common_image_mta", "Common Image MTA"),
        FacetOption::new("common_url", "Common URL"),
    ]
}
