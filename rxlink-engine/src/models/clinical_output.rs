//! Flattened clinical view of a match
//!
//! Read-only projection for external consumption; recomputed on demand from
//! the match record, never stored as a source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinical application output record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalView {
    pub ndc_code: String,
    /// Proprietary name, else non-proprietary, else "Unknown"
    pub drug_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    /// Primary RxNorm CUI (first resolved concept)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rxnorm_cui: Option<String>,
    /// Primary RxNorm display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rxnorm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    /// Active ingredient names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    /// Drug class names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drug_classes: Vec<String>,
    pub match_confidence: f64,
    /// Mirrors the match timestamp so the projection stays deterministic
    pub last_updated: DateTime<Utc>,
}
