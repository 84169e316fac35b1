//! The network-targeted query compiler.
//!
//! Example output: `common_sops==true;name=q=covid`.

use crate::query::QuerySnapshot;
use crate::query::rsql::{and, equality_comparisons, fuzzy_query, transform_to_rsql};

/// Compile the network query: one `== true` comparison per selected
/// common-network property plus a name search.
pub fn network_rsql(snapshot: &QuerySnapshot) -> String {
    let selections = snapshot.selections;
    let mut operands = Vec::new();
    for property in selections.get("network_common_properties") {
        operands.extend(equality_comparisons(property, &["true".to_string()]));
    }
    operands.extend(fuzzy_query("name", &selections.search));
    transform_to_rsql(&and(operands))
}
