//! Catalog API operations and module exports.

mod get_filter_options;
pub use get_filter_options::{
    collaboration_type_options, common_network_options, get_diagnosis_by_codes,
    get_facet_options, get_network_options, query_diagnosis_options,
};

mod get_quality_assessments;
pub use get_quality_assessments::{
    get_biobank_quality_assessments, get_collection_quality_assessments,
};

mod get_network_biobanks;
pub use get_network_biobanks::get_network_biobanks;

mod get_collection_info;
pub use get_collection_info::get_collection_info;

mod get_biobank_ids;
pub use get_biobank_ids::get_biobank_ids;

mod get_biobanks;
pub use get_biobanks::{BIOBANK_ATTRIBUTE_SELECTOR, get_biobanks};

mod reports;
pub use reports::{
    NetworkReport, get_biobank_report, get_collection_report, get_network_report,
};

mod get_filter_labels;
pub use get_filter_labels::resolve_filter_labels;

mod send_to_negotiator;
pub use send_to_negotiator::{export_current_selection, send_to_negotiator};

mod refresh;
pub use refresh::{refresh_filter_labels, refresh_search_results};
