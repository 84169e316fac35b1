//! Query compilation: facet selections plus pre-resolved indirect id sets
//! in, RSQL filter strings out.

pub mod rsql;
pub mod quality;

mod collection_query;
pub use collection_query::collection_rsql;

mod biobank_query;
pub use biobank_query::biobank_rsql;

mod network_query;
pub use network_query::network_rsql;

use common::filters::{FilterSelections, ViewMode};

/// Immutable snapshot of everything a compilation depends on. The
/// compilers never read ambient state and never fetch; indirect sets are
/// resolved before a snapshot is taken.
#[derive(Debug, Clone, Copy)]
pub struct QuerySnapshot<'a> {
    pub selections: &'a FilterSelections,
    /// Collection ids satisfying the selected collection quality standards
    /// (or the non-matching sentinel).
    pub collection_ids_with_selected_quality: &'a [String],
    /// Biobank ids satisfying the selected biobank quality standards.
    pub biobank_ids_with_selected_quality: &'a [String],
    /// Biobanks known to belong to one of the selected collection networks.
    pub biobanks_in_a_network: &'a [String],
    pub view_mode: ViewMode,
    pub show_country_facet: bool,
    pub preconfigured_country_code: Option<&'a str>,
}

impl<'a> QuerySnapshot<'a> {
    /// The effective country selection: the preconfigured code when the
    /// country facet is hidden, the user's selection otherwise.
    pub fn effective_countries(&self) -> Vec<String> {
        if !self.show_country_facet {
            return self
                .preconfigured_country_code
                .map(|code| vec![code.to_string()])
                .unwrap_or_default();
        }
        self.selections.get("country").to_vec()
    }
}
