//! RxNorm vocabulary records
//!
//! Resolved remote entries as the gateway reconstructs them from the RxNav
//! response trees. All types are immutable once constructed.

use serde::{Deserialize, Serialize};

/// One resolved RxNorm concept
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RxNormConcept {
    /// RxNorm concept unique identifier
    pub rxcui: String,
    /// Concept display name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    /// Term type tag (BN, IN, SCD, ...)
    pub tty: String,
    pub language: String,
    pub suppress: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub umlscui: Option<String>,
}

/// Ingredient owned by a [`RxNormDrug`]; no independent lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RxNormIngredient {
    pub rxcui: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_names: Vec<String>,
}

/// One resolved drug-level entry with its ingredients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RxNormDrug {
    pub rxcui: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    pub tty: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<RxNormIngredient>,
}

/// One flattened interaction pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugInteraction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comment from the enclosing interaction type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// RxCUIs of the participating concepts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drug_rxcuis: Vec<String>,
}

/// One drug classification entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugClass {
    /// Classification term-type tag (VA..VJ)
    pub class_type: String,
    pub class_name: String,
    pub class_id: String,
}

/// Secondary clinical attributes attached to a match
///
/// `None` means the attribute was never fetched (or came back empty), not
/// that it is known to be an empty set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClinicalMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<DrugInteraction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_classes: Option<Vec<DrugClass>>,
}

impl ClinicalMetadata {
    /// True when no secondary attribute was fetched
    pub fn is_empty(&self) -> bool {
        self.interactions.is_none() && self.drug_classes.is_none()
    }
}
