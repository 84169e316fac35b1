//! Filter facet definitions and the user's current selections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of the shared COVID-19 network entity in the catalog.
pub const COVID19_NETWORK_ID: &str = "COVID19";
/// Checkbox id for "biobanks providing COVID-19 services".
pub const COVID19_BIOBANK_CHECKBOX_ID: &str = "covid19_biobank_network";
/// Checkbox id for "COVID-19 collections".
pub const COVID19_COLLECTION_CHECKBOX_ID: &str = "covid19_collection_network";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatisfyMode {
    /// Any selected value may match (compiles to set membership).
    Any,
    /// Every selected value must match (compiles to per-value equality).
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetKind {
    Multi,
    Single,
    FreeText,
}

/// Which listing the explorer is currently showing. Free-text search only
/// feeds the collection query when biobanks/collections are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    BiobankView,
    NetworkView,
}

#[derive(Debug, Clone, Copy)]
pub struct FacetDefinition {
    /// Unique facet name, also the URL query parameter name.
    pub name: &'static str,
    /// Catalog table backing this facet's options, if any.
    pub table: Option<&'static str>,
    /// Clause prefix for the human-readable query description.
    pub human_readable: &'static str,
    pub satisfy_mode: SatisfyMode,
    pub kind: FacetKind,
}

/// All facets in their externally fixed order. This order drives both the
/// compiled query fragment order and the human-readable description.
pub const FACET_DEFINITIONS: &[FacetDefinition] = &[
    FacetDefinition {
        name: "search",
        table: None,
        human_readable: "Free text search contains",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::FreeText,
    },
    FacetDefinition {
        name: "country",
        table: Some("eu_bbmri_eric_countries"),
        human_readable: "selected countries are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "materials",
        table: Some("eu_bbmri_eric_material_types"),
        human_readable: "selected material types are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "type",
        table: Some("eu_bbmri_eric_collection_types"),
        human_readable: "selected collection types are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "dataType",
        table: Some("eu_bbmri_eric_data_types"),
        human_readable: "selected data categories are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "diagnosis_available",
        table: Some("eu_bbmri_eric_disease_types"),
        human_readable: "selected disease types are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "collection_quality",
        table: Some("eu_bbmri_eric_assess_level_col"),
        human_readable: "selected collection quality standards are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "biobank_quality",
        table: Some("eu_bbmri_eric_assess_level_bio"),
        human_readable: "selected biobank quality standards are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "covid19",
        table: Some("eu_bbmri_eric_COVID_19"),
        human_readable: "biobank COVID-19 features are",
        satisfy_mode: SatisfyMode::All,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "collection_network",
        table: Some("eu_bbmri_eric_networks"),
        human_readable: "selected collection networks are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "biobank_network",
        table: Some("eu_bbmri_eric_networks"),
        human_readable: "selected biobank networks are",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Multi,
    },
    FacetDefinition {
        name: "commercial_use",
        table: None,
        human_readable: "biobank collaboration type is",
        satisfy_mode: SatisfyMode::Any,
        kind: FacetKind::Single,
    },
    FacetDefinition {
        name: "network_common_properties",
        table: None,
        human_readable: "common network properties are",
        satisfy_mode: SatisfyMode::All,
        kind: FacetKind::Multi,
    },
];

pub fn facet_definition(name: &str) -> Option<&'static FacetDefinition> {
    FACET_DEFINITIONS.iter().find(|fd| fd.name == name)
}

/// The user's current filter selections, the sole input of the query
/// compilers. Facet values keep their selection order but behave as sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterSelections {
    pub search: String,
    pub facets: BTreeMap<String, Vec<String>>,
}

impl FilterSelections {
    pub fn get(&self, name: &str) -> &[String] {
        self.facets.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Replace the selection of one facet. Duplicate ids collapse to their
    /// first occurrence; an empty selection removes the facet entirely.
    pub fn set_facet(&mut self, name: &str, values: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        if deduped.is_empty() {
            self.facets.remove(name);
        } else {
            self.facets.insert(name.to_string(), deduped);
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Wholesale reset of every selection ("reset filters" action).
    pub fn reset(&mut self) {
        *self = FilterSelections::default();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.facets.values().all(|v| v.is_empty())
    }

    /// Map the two COVID-19 checkbox selections onto the shared network id.
    ///
    /// The biobank-facing checkbox injects the id into `biobank_network`
    /// only, the collection-facing one into `collection_network` only.
    /// Re-selecting never duplicates the id; deselecting removes exactly
    /// the shared id and leaves other network ids alone.
    pub fn apply_covid_network_selection(&mut self, selected_checkbox_ids: &[String]) {
        let biobank_on = selected_checkbox_ids
            .iter()
            .any(|id| id == COVID19_BIOBANK_CHECKBOX_ID);
        let collection_on = selected_checkbox_ids
            .iter()
            .any(|id| id == COVID19_COLLECTION_CHECKBOX_ID);
        self.toggle_covid_network("biobank_network", biobank_on);
        self.toggle_covid_network("collection_network", collection_on);
    }

    fn toggle_covid_network(&mut self, facet: &str, on: bool) {
        let values = self.facets.entry(facet.to_string()).or_default();
        let present = values.iter().any(|id| id == COVID19_NETWORK_ID);
        if on && !present {
            values.push(COVID19_NETWORK_ID.to_string());
        } else if !on && present {
            values.retain(|id| id != COVID19_NETWORK_ID);
        }
        if values.is_empty() {
            self.facets.remove(facet);
        }
    }

    /// Serialize the active selections as URL query pairs with
    /// comma-separated values, in facet definition order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for fd in FACET_DEFINITIONS {
            if fd.kind == FacetKind::FreeText {
                if !self.search.is_empty() {
                    pairs.push(("search".to_string(), self.search.clone()));
                }
                continue;
            }
            let values = self.get(fd.name);
            if !values.is_empty() {
                pairs.push((fd.name.to_string(), values.join(",")));
            }
        }
        pairs
    }

    /// Apply URL query pairs back onto the selections. Unknown parameters
    /// (such as the negotiator edit token) are left to the caller.
    pub fn apply_query_pairs(&mut self, pairs: &[(String, String)]) {
        for (name, value) in pairs {
            match facet_definition(name) {
                Some(fd) if fd.kind == FacetKind::FreeText => {
                    self.search = value.clone();
                }
                Some(fd) => {
                    let values = value
                        .split(',')
                        .filter(|v| !v.is_empty())
                        .map(|v| v.to_string())
                        .collect();
                    self.set_facet(fd.name, values);
                }
                None => {}
            }
        }
    }
}
