//! Export submission to the negotiator system.

use tokio::sync::Mutex;

use common::negotiator_query::NegotiatorQuery;

use crate::catalog_utils::molgenis_utils::CatalogClient;
use crate::error::ExplorerError;
use crate::store::ExplorerStore;

const EXPORT_PATH: &str = "/plugin/directory/export";

/// Submit the export payload. On success the response body is the URL the
/// user should be redirected to; on failure the raw error body is kept
/// verbatim for message derivation.
pub async fn send_to_negotiator(
    client: &CatalogClient,
    query: &NegotiatorQuery,
) -> Result<String, ExplorerError> {
    let (status, body) = client
        .post_json(EXPORT_PATH, query)
        .await
        .map_err(ExplorerError::Resolution)?;
    if status.is_success() {
        // the redirect URL may arrive as a JSON string or as plain text
        let redirect_url = serde_json::from_str::<String>(&body).unwrap_or(body);
        tracing::info!(%redirect_url, "negotiator export accepted");
        return Ok(redirect_url);
    }
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
    Err(ExplorerError::Export { body })
}

/// Build the export payload from the store's current state and submit it.
/// On success returns the redirect URL; on failure the error lands in the
/// store's error slot so `error_message` can derive the user message.
pub async fn export_current_selection(
    client: &CatalogClient,
    store: &Mutex<ExplorerStore>,
    custom_collection_ids: Option<&[String]>,
) -> Option<String> {
    let (generation, query) = {
        let store = store.lock().await;
        (
            store.generation(),
            store.negotiator_payload(custom_collection_ids),
        )
    };
    match send_to_negotiator(client, &query).await {
        Ok(redirect_url) => Some(redirect_url),
        Err(error) => {
            store.lock().await.commit_error(generation, error);
            None
        }
    }
}
