//! Thin REST client for the catalog read API.

use serde::{Deserialize, de::DeserializeOwned};

use common::catalog::ItemsEnvelope;

/// One row of the `/api/data/<table>` endpoint, which wraps every record
/// in a `data` object.
#[derive(Debug, Deserialize)]
pub struct RowItem<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct RowsEnvelope<T> {
    pub items: Vec<RowItem<T>>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogClient {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CATALOG_URL").unwrap_or("http://localhost:8080".to_string());
        CatalogClient::new(base_url)
    }

    async fn get_text(&self, path: &str, params: &[(&str, &str)]) -> anyhow::Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?params, "catalog request");
        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("catalog error {}: {}", status, body);
        }
        Ok(body)
    }

    /// Fetch the `items` of a `/api/v2/<table>` envelope.
    pub async fn get_items<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<Vec<T>> {
        let body = self.get_text(&format!("/api/v2/{table}"), params).await?;
        let envelope: ItemsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.items)
    }

    /// Fetch one entity of a `/api/v2/<table>/<id>` endpoint.
    pub async fn get_entity<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let body = self
            .get_text(&format!("/api/v2/{table}/{id}"), params)
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the rows of a `/api/data/<table>` endpoint, unwrapping the
    /// per-row `data` object.
    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<Vec<T>> {
        let body = self.get_text(&format!("/api/data/{table}"), params).await?;
        let envelope: RowsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.items.into_iter().map(|row| row.data).collect())
    }

    /// POST a JSON body; returns the raw response text and status so the
    /// caller can apply its own error contract.
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<(reqwest::StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "catalog post");
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }
}
