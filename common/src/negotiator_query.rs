//! The export payload handed to the external negotiator system.

use serde::{Deserialize, Serialize};

/// Wire field names follow the negotiator's existing contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiatorQuery {
    /// The explorer URL reproducing the current selections, with the
    /// negotiator edit token stripped.
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "entityId")]
    pub entity_id: String,
    pub rsql: String,
    #[serde(rename = "nToken")]
    pub n_token: Option<String>,
    #[serde(rename = "humanReadable")]
    pub human_readable: String,
}
