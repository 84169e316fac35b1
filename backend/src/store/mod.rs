//! The explorer's single mutable state.
//!
//! All mutation goes through named update methods; every selection change
//! bumps a generation counter, and fetch results are committed together
//! with the generation observed when the fetch started, so a stale
//! late-arriving response can never overwrite a newer selection's state.

use std::collections::BTreeMap;

use common::catalog::{
    BiobankRecord, CollectionBiobankLink, DiseaseType, FacetOption, QualityAssessment,
};
use common::filters::{FilterSelections, ViewMode};
use common::negotiator_query::NegotiatorQuery;
use common::view::{ActiveFilterSummary, BiobankView, ResultCounts};

use crate::api::{collaboration_type_options, common_network_options};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::negotiator;
use crate::query::quality::{
    INVALID_BIOBANK_ID, INVALID_COLLECTION_ID, resolve_quality_targets,
};
use crate::query::{QuerySnapshot, biobank_rsql, collection_rsql, network_rsql};
use crate::results::{ReconcileInputs, counts, loading, matched_biobank_ids, reconcile};

/// Fixed options of the COVID-19 network checkbox facet.
pub fn covid_network_options() -> Vec<FacetOption> {
    vec![
        FacetOption::new(
            common::filters::COVID19_BIOBANK_CHECKBOX_ID,
            "Biobanks providing COVID-19 services",
        ),
        FacetOption::new(
            common::filters::COVID19_COLLECTION_CHECKBOX_ID,
            "COVID-19 collections",
        ),
    ]
}

#[derive(Debug)]
pub struct ExplorerStore {
    config: ExplorerConfig,
    selections: FilterSelections,
    covid_network_selection: Vec<String>,
    view_mode: ViewMode,
    n_token: Option<String>,
    generation: u64,

    facet_options: BTreeMap<String, Vec<FacetOption>>,
    diagnosis_options: Vec<DiseaseType>,
    /// Exporter label cache, valid for the life of the current selections.
    filter_labels: BTreeMap<String, Vec<String>>,

    collection_ids_with_selected_quality: Vec<String>,
    biobank_ids_with_selected_quality: Vec<String>,
    biobanks_in_a_network: Vec<String>,

    collection_links: Option<Vec<CollectionBiobankLink>>,
    collection_filter_active: bool,
    biobank_ids: Option<Vec<String>>,
    biobanks: BTreeMap<String, BiobankRecord>,

    error: Option<ExplorerError>,
}

impl ExplorerStore {
    pub fn new(config: ExplorerConfig) -> Self {
        // facets without a backing table carry their fixed option lists
        // from the start, so the active-filter summary can always label them
        let mut facet_options = BTreeMap::new();
        facet_options.insert("commercial_use".to_string(), collaboration_type_options());
        facet_options.insert(
            "network_common_properties".to_string(),
            common_network_options(),
        );
        ExplorerStore {
            config,
            selections: FilterSelections::default(),
            covid_network_selection: Vec::new(),
            view_mode: ViewMode::default(),
            n_token: None,
            generation: 0,
            facet_options,
            diagnosis_options: Vec::new(),
            filter_labels: BTreeMap::new(),
            collection_ids_with_selected_quality: Vec::new(),
            biobank_ids_with_selected_quality: Vec::new(),
            biobanks_in_a_network: Vec::new(),
            collection_links: None,
            collection_filter_active: false,
            biobank_ids: None,
            biobanks: BTreeMap::new(),
            error: None,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selections(&self) -> &FilterSelections {
        &self.selections
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn n_token(&self) -> Option<&str> {
        self.n_token.as_deref()
    }

    /// Invalidate everything derived from the selections. Result state is
    /// cleared rather than kept stale, so the view reports loading until
    /// the next refresh lands.
    fn bump(&mut self) {
        self.generation += 1;
        self.filter_labels.clear();
        self.collection_ids_with_selected_quality.clear();
        self.biobank_ids_with_selected_quality.clear();
        self.biobanks_in_a_network.clear();
        self.collection_links = None;
        self.collection_filter_active = false;
        self.biobank_ids = None;
        self.error = None;
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(
                committed = generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return true;
        }
        false
    }

    // ---- selection updates -------------------------------------------------

    pub fn set_facet(&mut self, name: &str, values: Vec<String>) {
        self.selections.set_facet(name, values);
        self.bump();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.selections.set_search(search);
        self.bump();
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.bump();
    }

    pub fn set_covid_network_selection(&mut self, selected_checkbox_ids: Vec<String>) {
        self.selections
            .apply_covid_network_selection(&selected_checkbox_ids);
        self.covid_network_selection = selected_checkbox_ids;
        self.bump();
    }

    pub fn reset_filters(&mut self) {
        self.selections.reset();
        self.covid_network_selection.clear();
        self.bump();
    }

    /// Restore selections from URL query pairs. Diagnosis selections carry
    /// codes only, so the caller passes the fetched disease types to
    /// rebuild the option labels.
    pub fn restore_from_query(
        &mut self,
        pairs: &[(String, String)],
        diagnoses: Vec<DiseaseType>,
    ) {
        self.selections.apply_query_pairs(pairs);
        if let Some((_, token)) = pairs.iter().find(|(name, _)| name == "nToken") {
            self.n_token = Some(token.clone());
        }
        if !diagnoses.is_empty() {
            self.diagnosis_options = diagnoses;
        }
        self.bump();
    }

    /// The current selections as URL query pairs, including the edit token.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.selections.to_query_pairs();
        if let Some(token) = &self.n_token {
            pairs.push(("nToken".to_string(), token.clone()));
        }
        pairs
    }

    // ---- option caches -----------------------------------------------------

    pub fn set_facet_options(&mut self, name: &str, options: Vec<FacetOption>) {
        self.facet_options.insert(name.to_string(), options);
    }

    /// Network options feed both network facets; the shared COVID-19
    /// network is handled by its own checkboxes and never listed.
    pub fn set_network_options(&mut self, options: Vec<FacetOption>) {
        let options: Vec<FacetOption> = options
            .into_iter()
            .filter(|option| option.id != common::filters::COVID19_NETWORK_ID)
            .collect();
        self.facet_options
            .insert("biobank_network".to_string(), options.clone());
        self.facet_options
            .insert("collection_network".to_string(), options);
    }

    pub fn set_diagnosis_options(&mut self, options: Vec<DiseaseType>) {
        self.diagnosis_options = options;
    }

    // ---- fetch commits, generation guarded ---------------------------------

    pub fn commit_collection_quality(
        &mut self,
        generation: u64,
        assessments: Vec<QualityAssessment>,
    ) {
        if self.is_stale(generation) {
            return;
        }
        let active = !self.selections.get("collection_quality").is_empty();
        self.collection_ids_with_selected_quality =
            resolve_quality_targets(active, &assessments, INVALID_COLLECTION_ID);
    }

    pub fn commit_biobank_quality(
        &mut self,
        generation: u64,
        assessments: Vec<QualityAssessment>,
    ) {
        if self.is_stale(generation) {
            return;
        }
        let active = !self.selections.get("biobank_quality").is_empty();
        self.biobank_ids_with_selected_quality =
            resolve_quality_targets(active, &assessments, INVALID_BIOBANK_ID);
    }

    pub fn commit_network_biobanks(&mut self, generation: u64, biobank_ids: Vec<String>) {
        if self.is_stale(generation) {
            return;
        }
        self.biobanks_in_a_network = biobank_ids;
    }

    pub fn commit_collection_links(
        &mut self,
        generation: u64,
        links: Vec<CollectionBiobankLink>,
        filter_active: bool,
    ) {
        if self.is_stale(generation) {
            return;
        }
        self.collection_links = Some(links);
        self.collection_filter_active = filter_active;
    }

    pub fn commit_biobank_ids(&mut self, generation: u64, biobank_ids: Vec<String>) {
        if self.is_stale(generation) {
            return;
        }
        self.biobank_ids = Some(biobank_ids);
    }

    pub fn commit_biobanks(&mut self, generation: u64, records: Vec<BiobankRecord>) {
        if self.is_stale(generation) {
            return;
        }
        for record in records {
            self.biobanks.insert(record.id.clone(), record);
        }
    }

    pub fn commit_filter_labels(
        &mut self,
        generation: u64,
        labels: BTreeMap<String, Vec<String>>,
    ) {
        if self.is_stale(generation) {
            return;
        }
        self.filter_labels = labels;
    }

    pub fn filter_labels(&self) -> &BTreeMap<String, Vec<String>> {
        &self.filter_labels
    }

    /// Record a fetch failure so `error_message` can surface it. Guarded
    /// like the other commits: a failure of a superseded fetch is dropped.
    pub fn commit_error(&mut self, generation: u64, error: ExplorerError) {
        if self.is_stale(generation) {
            return;
        }
        self.error = Some(error);
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.user_message())
    }

    // ---- compiled queries --------------------------------------------------

    pub fn query_snapshot(&self) -> QuerySnapshot<'_> {
        QuerySnapshot {
            selections: &self.selections,
            collection_ids_with_selected_quality: &self.collection_ids_with_selected_quality,
            biobank_ids_with_selected_quality: &self.biobank_ids_with_selected_quality,
            biobanks_in_a_network: &self.biobanks_in_a_network,
            view_mode: self.view_mode,
            show_country_facet: self.config.show_country_facet,
            preconfigured_country_code: self.config.preconfigured_country_code.as_deref(),
        }
    }

    pub fn collection_rsql(&self) -> String {
        collection_rsql(&self.query_snapshot())
    }

    pub fn biobank_rsql(&self) -> String {
        biobank_rsql(&self.query_snapshot())
    }

    pub fn network_rsql(&self) -> String {
        network_rsql(&self.query_snapshot())
    }

    // ---- derived result view ----------------------------------------------

    fn reconcile_inputs(&self) -> ReconcileInputs<'_> {
        ReconcileInputs {
            biobank_ids: self.biobank_ids.as_deref(),
            collection_links: self.collection_links.as_deref(),
            collection_filter_active: self.collection_filter_active,
            biobanks: &self.biobanks,
        }
    }

    pub fn loading(&self) -> bool {
        loading(&self.reconcile_inputs())
    }

    pub fn biobanks(&self) -> Vec<BiobankView> {
        reconcile(&self.reconcile_inputs())
    }

    pub fn counts(&self) -> ResultCounts {
        counts(&self.reconcile_inputs())
    }

    /// Matched biobank ids whose full record has not arrived yet.
    pub fn unfetched_biobank_ids(&self) -> Vec<String> {
        matched_biobank_ids(&self.reconcile_inputs())
            .into_iter()
            .filter(|id| !self.biobanks.contains_key(id))
            .collect()
    }

    // ---- active filter summary --------------------------------------------

    /// Map of facet name to the selected option objects, for facets with a
    /// non-empty selection only.
    pub fn active_filters(&self) -> ActiveFilterSummary {
        let mut active = ActiveFilterSummary::new();
        if !self.selections.search.is_empty() {
            active.insert(
                "search".to_string(),
                vec![FacetOption::new("search", self.selections.search.clone())],
            );
        }
        for (name, selected) in &self.selections.facets {
            if selected.is_empty() {
                continue;
            }
            let options = if name == "diagnosis_available" {
                selected
                    .iter()
                    .map(|code| {
                        self.diagnosis_options
                            .iter()
                            .find(|d| &d.code == code)
                            .map(|d| FacetOption::new(code.clone(), d.decorated_label()))
                            .unwrap_or_else(|| FacetOption::new(code.clone(), code.clone()))
                    })
                    .collect()
            } else {
                let cached = self.facet_options.get(name);
                selected
                    .iter()
                    .map(|id| {
                        cached
                            .and_then(|options| options.iter().find(|o| &o.id == id))
                            .cloned()
                            .unwrap_or_else(|| FacetOption::new(id.clone(), id.clone()))
                    })
                    .collect()
            };
            active.insert(name.clone(), options);
        }
        if !self.covid_network_selection.is_empty() {
            let options = covid_network_options();
            active.insert(
                "covid19network".to_string(),
                self.covid_network_selection
                    .iter()
                    .filter_map(|id| options.iter().find(|o| &o.id == id).cloned())
                    .collect(),
            );
        }
        active
    }

    // ---- export ------------------------------------------------------------

    /// Assemble the negotiator payload from the current state and the
    /// resolved labels. `custom_collection_ids` switches to the explicit
    /// custom-selection mode.
    pub fn negotiator_payload(
        &self,
        custom_collection_ids: Option<&[String]>,
    ) -> NegotiatorQuery {
        let pairs = self
            .to_query_pairs()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = if pairs.is_empty() {
            self.config.base_url.clone()
        } else {
            format!("{}?{}", self.config.base_url, pairs)
        };
        let human_readable = negotiator::human_readable(&self.selections, &self.filter_labels);
        negotiator::negotiator_query(
            &url,
            &self.config.negotiator_entity_id,
            &self.collection_rsql(),
            self.n_token.as_deref(),
            &human_readable,
            custom_collection_ids,
        )
    }
}
