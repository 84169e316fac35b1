//! The collection-targeted query compiler.
//!
//! Example outputs:
//! `country.id=in=(NL,BE)`, `materials.id=in=(RNA,DNA)`,
//! `diagnosis_available.code=in=(C18,L40)`.

use common::filters::ViewMode;

use crate::query::QuerySnapshot;
use crate::query::rsql::{and, in_query, or, search_expansion, transform_to_rsql};

/// Compile the collection query: one top-level AND over every active
/// collection-level facet, the quality-resolved id set, the network
/// OR-group and (in biobank view) the free-text expansion.
pub fn collection_rsql(snapshot: &QuerySnapshot) -> String {
    let selections = snapshot.selections;
    let mut operands = Vec::new();
    operands.extend(in_query("country", &snapshot.effective_countries()));
    operands.extend(in_query("materials", selections.get("materials")));
    operands.extend(in_query("type", selections.get("type")));
    operands.extend(in_query("data_categories", selections.get("dataType")));
    operands.extend(in_query(
        "diagnosis_available.code",
        selections.get("diagnosis_available"),
    ));
    operands.extend(in_query(
        "id",
        snapshot.collection_ids_with_selected_quality,
    ));
    operands.extend(in_query(
        "collaboration_commercial",
        selections.get("commercial_use"),
    ));

    // A collection matches a network filter through its own network OR
    // through its parent biobank's network membership.
    let selected_networks = selections.get("collection_network");
    if !selected_networks.is_empty() || !snapshot.biobanks_in_a_network.is_empty() {
        let mut network_operands = in_query("network", selected_networks);
        network_operands.extend(in_query("biobank", snapshot.biobanks_in_a_network));
        operands.push(or(network_operands));
    }

    if snapshot.view_mode == ViewMode::BiobankView {
        operands.extend(search_expansion(&selections.search));
    }

    transform_to_rsql(&and(operands))
}
