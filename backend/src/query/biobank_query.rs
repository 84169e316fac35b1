//! The biobank-targeted query compiler.

use common::filters::{SatisfyMode, facet_definition};

use crate::query::QuerySnapshot;
use crate::query::rsql::{and, facet_predicate, in_query, transform_to_rsql};

/// Compile the biobank query: country, quality-resolved biobank ids,
/// biobank-network membership and the COVID-19 facet (a satisfy-all
/// facet, one `==` comparison per selected value).
pub fn biobank_rsql(snapshot: &QuerySnapshot) -> String {
    let selections = snapshot.selections;
    let covid_mode = facet_definition("covid19")
        .map(|fd| fd.satisfy_mode)
        .unwrap_or(SatisfyMode::All);

    let mut operands = Vec::new();
    operands.extend(in_query("country", &snapshot.effective_countries()));
    operands.extend(in_query("id", snapshot.biobank_ids_with_selected_quality));
    operands.extend(in_query("network", selections.get("biobank_network")));
    operands.extend(facet_predicate(
        "covid19biobank",
        selections.get("covid19"),
        covid_mode,
    ));
    transform_to_rsql(&and(operands))
}
