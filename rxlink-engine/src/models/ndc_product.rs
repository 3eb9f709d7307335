//! FDA NDC product record
//!
//! Immutable snapshot of one national-registry catalog entry. Records arrive
//! already validated and normalized by the ingestion collaborator; the engine
//! never re-validates identifier format beyond the 10-to-11-digit padding
//! rule applied at lookup time.

use serde::{Deserialize, Serialize};

/// One FDA NDC catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdcProduct {
    /// Product NDC code (with or without hyphens)
    pub product_ndc: String,
    /// Type of product
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proprietary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proprietary_name_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_proprietary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_marketing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_marketing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labeler_name: Option<String>,
    /// Active substance name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_unit: Option<String>,
    /// Chemical structure class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharm_class_cs: Option<String>,
    /// Physiologic effect class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharm_class_pe: Option<String>,
    /// Mechanism of action class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharm_class_moa: Option<String>,
}

impl NdcProduct {
    /// Minimal record with only the required fields populated
    pub fn new(product_ndc: impl Into<String>, product_type: impl Into<String>) -> Self {
        Self {
            product_ndc: product_ndc.into(),
            product_type: product_type.into(),
            proprietary_name: None,
            proprietary_name_suffix: None,
            non_proprietary_name: None,
            dosage_form_name: None,
            route_name: None,
            start_marketing_date: None,
            end_marketing_date: None,
            marketing_category_name: None,
            application_number: None,
            labeler_name: None,
            substance_name: None,
            strength_number: None,
            strength_unit: None,
            pharm_class_cs: None,
            pharm_class_pe: None,
            pharm_class_moa: None,
        }
    }

    /// Display name: proprietary, else non-proprietary, else "Unknown"
    pub fn display_name(&self) -> &str {
        self.proprietary_name
            .as_deref()
            .or(self.non_proprietary_name.as_deref())
            .unwrap_or("Unknown")
    }

    /// "{number} {unit}" when both components are present
    pub fn strength(&self) -> Option<String> {
        match (&self.strength_number, &self.strength_unit) {
            (Some(number), Some(unit)) => Some(format!("{} {}", number, unit)),
            _ => None,
        }
    }
}
