//! Raw record shapes returned by the catalog read API.

use serde::{Deserialize, Serialize};

/// Response envelope of the `/api/v2/<table>` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsEnvelope<T> {
    pub items: Vec<T>,
}

/// One selectable option of a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    #[serde(alias = "name")]
    pub label: String,
}

impl FacetOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        FacetOption {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A disease classification entry; selections carry the code, not the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseType {
    pub code: String,
    #[serde(alias = "name")]
    pub label: String,
}

impl DiseaseType {
    /// Display label used in facet option lists, e.g. `C22.3 - Angiosarcoma of liver`.
    pub fn decorated_label(&self) -> String {
        format!("{} - {}", self.code, self.label)
    }

    /// Display label used in the exported query description,
    /// e.g. `[ C22.3 ] - Angiosarcoma of liver`.
    pub fn negotiator_label(&self) -> String {
        format!("[ {} ] - {}", self.code, self.label)
    }
}

/// Reference to another catalog entity inside a nested response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    #[serde(default, alias = "name")]
    pub label: Option<String>,
}

/// One quality assessment row linking a standard to an assessed entity.
/// Exactly one of `collection` / `biobank` is set depending on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    #[serde(default)]
    pub collection: Option<EntityRef>,
    #[serde(default)]
    pub biobank: Option<EntityRef>,
    #[serde(default)]
    pub quality_standard: Option<EntityRef>,
}

impl QualityAssessment {
    pub fn target_id(&self) -> Option<&str> {
        self.collection
            .as_ref()
            .or(self.biobank.as_ref())
            .map(|r| r.id.as_str())
    }
}

/// One row of the collection listing: which biobank a matching collection
/// belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionBiobankLink {
    pub collection_id: String,
    pub biobank_id: String,
    #[serde(default)]
    pub collection_name: Option<String>,
}

/// A flat collection record as returned inside a biobank's attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CollectionRecord {
    pub id: String,
    pub name: Option<String>,
    /// Id of the parent collection; `None` for top-level collections.
    pub parent: Option<String>,
    pub materials: Vec<EntityRef>,
}

/// A full biobank record with its flat collection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BiobankRecord {
    pub id: String,
    pub name: String,
    pub acronym: Option<String>,
    pub country: Option<EntityRef>,
    pub collections: Vec<CollectionRecord>,
}
