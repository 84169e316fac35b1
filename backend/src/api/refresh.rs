//! Full search refresh: resolve indirect facets, compile, fetch, commit.

use tokio::sync::Mutex;

use crate::api::get_biobank_ids::get_biobank_ids;
use crate::api::get_biobanks::get_biobanks;
use crate::api::get_collection_info::get_collection_info;
use crate::api::get_filter_labels::resolve_filter_labels;
use crate::api::get_network_biobanks::get_network_biobanks;
use crate::api::get_quality_assessments::{
    get_biobank_quality_assessments, get_collection_quality_assessments,
};
use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::error::ExplorerError;
use crate::store::ExplorerStore;

/// Refresh the result view for the store's current selections.
///
/// Runs in three phases. Phase one resolves the indirect facets (quality
/// standards, collection networks) concurrently and commits the resolved
/// id sets. Phase two compiles both queries from a snapshot and fetches
/// the collection associations and biobank ids concurrently. Phase three
/// fetches the full records of matched biobanks not seen before.
///
/// Every commit carries the generation captured up front; if the user
/// changes a selection while a fetch is in flight, the commits are
/// dropped and the refresh ends early without touching newer state. A
/// failed fetch lands in the store's error slot (same generation guard)
/// and the remaining phases are skipped; there are no retries. The store
/// lock is only ever held between awaits, never across one.
pub async fn refresh_search_results(client: &CatalogClient, store: &Mutex<ExplorerStore>) {
    let (generation, collection_quality, biobank_quality, collection_networks) = {
        let store = store.lock().await;
        (
            store.generation(),
            store.selections().get("collection_quality").to_vec(),
            store.selections().get("biobank_quality").to_vec(),
            store.selections().get("collection_network").to_vec(),
        )
    };

    let resolved = futures::try_join!(
        get_collection_quality_assessments(client, &collection_quality),
        get_biobank_quality_assessments(client, &biobank_quality),
        get_network_biobanks(client, &collection_networks),
    );
    let (collection_assessments, biobank_assessments, network_biobanks) = match resolved {
        Ok(resolved) => resolved,
        Err(error) => {
            store
                .lock()
                .await
                .commit_error(generation, ExplorerError::Resolution(error));
            return;
        }
    };

    let (collection_rsql, biobank_rsql) = {
        let mut store = store.lock().await;
        store.commit_collection_quality(generation, collection_assessments);
        store.commit_biobank_quality(generation, biobank_assessments);
        store.commit_network_biobanks(generation, network_biobanks);
        if store.generation() != generation {
            return;
        }
        (store.collection_rsql(), store.biobank_rsql())
    };

    let collection_filter_active = !collection_rsql.is_empty();
    let fetched = futures::try_join!(
        get_collection_info(client, &collection_rsql),
        get_biobank_ids(client, &biobank_rsql),
    );
    let (collection_links, biobank_ids) = match fetched {
        Ok(fetched) => fetched,
        Err(error) => {
            store
                .lock()
                .await
                .commit_error(generation, ExplorerError::Resolution(error));
            return;
        }
    };

    let unfetched = {
        let mut store = store.lock().await;
        store.commit_collection_links(generation, collection_links, collection_filter_active);
        store.commit_biobank_ids(generation, biobank_ids);
        if store.generation() != generation {
            return;
        }
        store.unfetched_biobank_ids()
    };

    match get_biobanks(client, &unfetched).await {
        Ok(records) => store.lock().await.commit_biobanks(generation, records),
        Err(error) => store
            .lock()
            .await
            .commit_error(generation, ExplorerError::Resolution(error)),
    }
}

/// Resolve and cache the display labels of the active selections, for the
/// export payload's query description. A failure lands in the error slot
/// like any other fetch failure.
pub async fn refresh_filter_labels(client: &CatalogClient, store: &Mutex<ExplorerStore>) {
    let (generation, selections) = {
        let store = store.lock().await;
        (store.generation(), store.selections().clone())
    };
    match resolve_filter_labels(client, &selections).await {
        Ok(labels) => store.lock().await.commit_filter_labels(generation, labels),
        Err(error) => store
            .lock()
            .await
            .commit_error(generation, ExplorerError::Resolution(error)),
    }
}
