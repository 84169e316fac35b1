//! Display labels for the active selections, used by the exporter.

use std::collections::BTreeMap;

use common::catalog::{DiseaseType, FacetOption};
use common::filters::{FACET_DEFINITIONS, FacetKind, FilterSelections};

use crate::api::get_filter_options::{collaboration_type_options, common_network_options};
use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::query::rsql::{and, in_query, transform_to_rsql};

/// Resolve the selected ids of every active facet to display labels,
/// one lookup per facet. Diagnosis codes render as `[ CODE ] - Label`,
/// facets with fixed option lists resolve locally, free text is skipped
/// (the exporter renders it raw).
pub async fn resolve_filter_labels(
    client: &CatalogClient,
    selections: &FilterSelections,
) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    let mut labels = BTreeMap::new();
    for fd in FACET_DEFINITIONS {
        if fd.kind == FacetKind::FreeText {
            continue;
        }
        let selected = selections.get(fd.name);
        if selected.is_empty() {
            continue;
        }
        let resolved = match fd.table {
            Some(table) if fd.name == "diagnosis_available" => {
                let q = transform_to_rsql(&and(in_query("code", selected)));
                client
                    .get_items::<DiseaseType>(table, &[("attrs", "*"), ("q", &q)])
                    .await?
                    .iter()
                    .map(|d| d.negotiator_label())
                    .collect()
            }
            Some(table) => {
                let q = transform_to_rsql(&and(in_query("id", selected)));
                client
                    .get_items::<FacetOption>(table, &[("attrs", "*"), ("q", &q)])
                    .await?
                    .into_iter()
                    .map(|option| option.label)
                    .collect()
            }
            None => {
                let fixed = match fd.name {
                    "commercial_use" => collaboration_type_options(),
                    "network_common_properties" => common_network_options(),
                    _ => Vec::new(),
                };
                selected
                    .iter()
                    .map(|id| {
                        fixed
                            .iter()
                            .find(|option| &option.id == id)
                            .map(|option| option.label.clone())
                            .unwrap_or_else(|| id.clone())
                    })
                    .collect()
            }
        };
        labels.insert(fd.name.to_string(), resolved);
    }
    Ok(labels)
}
