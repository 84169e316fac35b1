//! End-to-end flow over the store with canned catalog data: restore a
//! selection from a URL, compile both queries, commit fetch results and
//! check the reconciled view and the export payload.

use std::collections::BTreeMap;

use common::catalog::{
    BiobankRecord, CollectionBiobankLink, CollectionRecord, DiseaseType, EntityRef,
    QualityAssessment,
};
use common::filters::COVID19_BIOBANK_CHECKBOX_ID;
use backend::api::refresh_search_results;
use backend::catalog_utils::molgenis_utils::CatalogClient;
use backend::config::ExplorerConfig;
use backend::store::ExplorerStore;

fn link(collection_id: &str, biobank_id: &str) -> CollectionBiobankLink {
    CollectionBiobankLink {
        collection_id: collection_id.to_string(),
        biobank_id: biobank_id.to_string(),
        collection_name: None,
    }
}

fn biobank(id: &str, name: &str, collection_ids: &[&str]) -> BiobankRecord {
    BiobankRecord {
        id: id.to_string(),
        name: name.to_string(),
        collections: collection_ids
            .iter()
            .map(|cid| CollectionRecord {
                id: cid.to_string(),
                name: Some(format!("collection {cid}")),
                ..CollectionRecord::default()
            })
            .collect(),
        ..BiobankRecord::default()
    }
}

fn assessment(collection_id: &str) -> QualityAssessment {
    QualityAssessment {
        collection: Some(EntityRef {
            id: collection_id.to_string(),
            label: None,
        }),
        biobank: None,
        quality_standard: None,
    }
}

#[test]
fn url_restore_compile_commit_and_reconcile() {
    let mut store = ExplorerStore::new(ExplorerConfig {
        base_url: "https://directory.example.org/#/".to_string(),
        ..ExplorerConfig::default()
    });

    store.restore_from_query(
        &[
            ("country".to_string(), "NL,BE".to_string()),
            ("materials".to_string(), "RNA".to_string()),
            ("diagnosis_available".to_string(), "C22.3".to_string()),
        ],
        vec![DiseaseType {
            code: "C22.3".to_string(),
            label: "Angiosarcoma of liver".to_string(),
        }],
    );

    assert_eq!(
        store.collection_rsql(),
        "country=in=(NL,BE);materials=in=RNA;diagnosis_available.code=in=C22.3"
    );
    assert_eq!(store.biobank_rsql(), "country=in=(NL,BE)");
    assert!(store.loading());

    let generation = store.generation();
    store.commit_collection_links(
        generation,
        vec![link("c1", "A"), link("c2", "B"), link("c3", "B")],
        true,
    );
    store.commit_biobank_ids(
        generation,
        vec!["A".to_string(), "B".to_string(), "C".to_string()],
    );
    store.commit_biobanks(
        generation,
        vec![
            biobank("A", "Biobank A", &["c1", "other"]),
            biobank("B", "Biobank B", &["c2", "c3"]),
        ],
    );

    assert!(!store.loading());
    let views = store.biobanks();
    // C matched the biobank query but no collection filter, so it drops out
    assert_eq!(
        views.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
        ["A", "B"]
    );
    // non-matching collections are pruned from the per-biobank tree
    assert_eq!(views[0].collections.len(), 1);
    assert_eq!(views[0].collections[0].id, "c1");

    let counts = store.counts();
    assert_eq!(counts.biobanks, 2);
    assert_eq!(counts.collections, 3);

    let active = store.active_filters();
    assert_eq!(
        active["diagnosis_available"][0].label,
        "C22.3 - Angiosarcoma of liver"
    );
}

#[test]
fn stale_generation_commits_never_overwrite_newer_selections() {
    let mut store = ExplorerStore::new(ExplorerConfig::default());
    store.set_facet("country", vec!["NL".to_string()]);
    let old_generation = store.generation();

    store.set_facet("country", vec!["BE".to_string()]);
    store.commit_biobank_ids(old_generation, vec!["stale".to_string()]);
    store.commit_collection_links(old_generation, vec![link("c1", "stale")], true);
    assert!(store.loading());

    let generation = store.generation();
    store.commit_biobank_ids(generation, vec!["fresh".to_string()]);
    store.commit_collection_links(generation, Vec::new(), false);
    assert_eq!(store.biobanks()[0].id, "fresh");
}

#[test]
fn quality_and_covid_selections_flow_into_the_compiled_queries() {
    let mut store = ExplorerStore::new(ExplorerConfig::default());
    store.set_facet("collection_quality", vec!["eric".to_string()]);
    store.set_covid_network_selection(vec![COVID19_BIOBANK_CHECKBOX_ID.to_string()]);

    // two matching assessments for the same collection collapse to one id
    store.commit_collection_quality(
        store.generation(),
        vec![assessment("c1"), assessment("c1"), assessment("c2")],
    );
    assert_eq!(store.collection_rsql(), "id=in=(c1,c2)");
    assert_eq!(store.biobank_rsql(), "network=in=COVID19");

    // an active quality selection with no matches must match nothing
    store.set_facet("biobank_quality", vec!["accredited".to_string()]);
    store.commit_collection_quality(store.generation(), vec![assessment("c1")]);
    store.commit_biobank_quality(store.generation(), Vec::new());
    assert_eq!(
        store.biobank_rsql(),
        "id=in=invalid_biobank;network=in=COVID19"
    );
}

#[tokio::test]
async fn failed_refresh_lands_in_the_error_slot() {
    let store = tokio::sync::Mutex::new(ExplorerStore::new(ExplorerConfig::default()));
    store
        .lock()
        .await
        .set_facet("country", vec!["NL".to_string()]);

    // nothing listens on this port, so the result fetches fail
    let client = CatalogClient::new("http://127.0.0.1:1");
    refresh_search_results(&client, &store).await;

    let store = store.lock().await;
    assert!(store.loading());
    assert!(store.error_message().is_some());
}

#[tokio::test]
async fn stale_fetch_failures_do_not_pollute_newer_selections() {
    let store = tokio::sync::Mutex::new(ExplorerStore::new(ExplorerConfig::default()));
    store
        .lock()
        .await
        .set_facet("country", vec!["NL".to_string()]);

    // a selection change while the failing refresh is in flight: the
    // failure is either dropped as stale or wiped by the bump, never shown
    let client = CatalogClient::new("http://127.0.0.1:1");
    futures::join!(refresh_search_results(&client, &store), async {
        store
            .lock()
            .await
            .set_facet("country", vec!["BE".to_string()]);
    });

    assert!(store.lock().await.error_message().is_none());
}

#[test]
fn export_payload_reflects_the_compiled_state_and_labels() {
    let mut store = ExplorerStore::new(ExplorerConfig {
        base_url: "https://directory.example.org/#/".to_string(),
        ..ExplorerConfig::default()
    });
    store.set_search("melanoma".to_string());
    store.set_facet("materials", vec!["RNA".to_string(), "PLASMA".to_string()]);

    let mut labels = BTreeMap::new();
    labels.insert(
        "materials".to_string(),
        vec!["RNA".to_string(), "Plasma".to_string()],
    );
    store.commit_filter_labels(store.generation(), labels);

    let payload = store.negotiator_payload(None);
    assert_eq!(
        payload.url,
        "https://directory.example.org/#/?search=melanoma&materials=RNA,PLASMA"
    );
    assert_eq!(payload.entity_id, "eu_bbmri_eric_collections");
    assert_eq!(
        payload.human_readable,
        "Free text search contains melanoma and selected material types are RNA,Plasma"
    );
    assert!(payload.rsql.contains("materials=in=(RNA,PLASMA)"));

    let custom = vec!["c9".to_string()];
    let payload = store.negotiator_payload(Some(&custom));
    assert_eq!(payload.rsql, "id=in=c9");
    assert!(payload.human_readable.ends_with("with custom collection selection."));
}
