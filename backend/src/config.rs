//! Engine configuration, read once at startup.

use crate::error::ExplorerError;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080";
pub const DEFAULT_NEGOTIATOR_ENTITY_ID: &str = "eu_bbmri_eric_collections";

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base URL of the catalog read API.
    pub catalog_url: String,
    /// Entity the negotiator receives queries for.
    pub negotiator_entity_id: String,
    /// When false, the country facet is hidden and every query is pinned
    /// to `preconfigured_country_code`.
    pub show_country_facet: bool,
    pub preconfigured_country_code: Option<String>,
    /// Base URL of the explorer itself, embedded in export payloads.
    pub base_url: String,
}

impl ExplorerConfig {
    pub fn new(
        catalog_url: String,
        negotiator_entity_id: String,
        show_country_facet: bool,
        preconfigured_country_code: Option<String>,
        base_url: String,
    ) -> Result<Self, ExplorerError> {
        if !show_country_facet && preconfigured_country_code.is_none() {
            return Err(ExplorerError::Configuration(
                "You have to specify a preconfigured country code when hiding the country facet"
                    .to_string(),
            ));
        }
        Ok(ExplorerConfig {
            catalog_url,
            negotiator_entity_id,
            show_country_facet,
            preconfigured_country_code,
            base_url,
        })
    }

    pub fn from_env() -> Result<Self, ExplorerError> {
        let catalog_url =
            std::env::var("CATALOG_URL").unwrap_or(DEFAULT_CATALOG_URL.to_string());
        let negotiator_entity_id = std::env::var("NEGOTIATOR_ENTITY_ID")
            .unwrap_or(DEFAULT_NEGOTIATOR_ENTITY_ID.to_string());
        let show_country_facet = std::env::var("SHOW_COUNTRY_FACET")
            .map(|v| v != "false")
            .unwrap_or(true);
        let preconfigured_country_code = std::env::var("PRECONFIGURED_COUNTRY_CODE").ok();
        let base_url = std::env::var("EXPLORER_BASE_URL").unwrap_or_default();
        ExplorerConfig::new(
            catalog_url,
            negotiator_entity_id,
            show_country_facet,
            preconfigured_country_code,
            base_url,
        )
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            negotiator_entity_id: DEFAULT_NEGOTIATOR_ENTITY_ID.to_string(),
            show_country_facet: true,
            preconfigured_country_code: None,
            base_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_country_facet_requires_a_country_code() {
        let err = ExplorerConfig::new(
            DEFAULT_CATALOG_URL.to_string(),
            DEFAULT_NEGOTIATOR_ENTITY_ID.to_string(),
            false,
            None,
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ExplorerError::Configuration(_)));
    }

    #[test]
    fn hidden_country_facet_with_code_is_valid() {
        let config = ExplorerConfig::new(
            DEFAULT_CATALOG_URL.to_string(),
            DEFAULT_NEGOTIATOR_ENTITY_ID.to_string(),
            false,
            Some("BE".to_string()),
            String::new(),
        )
        .unwrap();
        assert_eq!(config.preconfigured_country_code.as_deref(), Some("BE"));
    }
}
