//! Clinical view projection
//!
//! Pure derivation from a match record to the flattened clinical output
//! shape. Never fails; absent data yields empty or `None` fields.

use crate::models::{ClinicalView, NdcMatch};

/// Derives flattened clinical views from match records
#[derive(Debug, Clone, Copy, Default)]
pub struct ClinicalProjector;

impl ClinicalProjector {
    pub fn new() -> Self {
        Self
    }

    /// Project one match
    ///
    /// Primary concept is the first of `match.concepts`. Ingredient names
    /// come from the first drug's ingredient list only; current match
    /// construction never attaches more than one drug, so later entries
    /// would be ignored.
    pub fn project(&self, m: &NdcMatch) -> ClinicalView {
        let primary = m.concepts.first();

        let ingredients = m
            .drugs
            .first()
            .map(|drug| drug.ingredients.iter().map(|i| i.name.clone()).collect())
            .unwrap_or_default();

        let drug_classes = m
            .metadata
            .drug_classes
            .as_ref()
            .map(|classes| classes.iter().map(|c| c.class_name.clone()).collect())
            .unwrap_or_default();

        ClinicalView {
            ndc_code: m.product.product_ndc.clone(),
            drug_name: m.product.display_name().to_string(),
            generic_name: m.product.non_proprietary_name.clone(),
            rxnorm_cui: primary.map(|c| c.rxcui.clone()),
            rxnorm_name: primary.map(|c| c.name.clone()),
            dosage_form: m.product.dosage_form_name.clone(),
            route: m.product.route_name.clone(),
            strength: m.product.strength(),
            ingredients,
            drug_classes,
            match_confidence: m.confidence,
            last_updated: m.matched_at,
        }
    }

    /// Project a whole batch
    pub fn project_all(&self, matches: &[NdcMatch]) -> Vec<ClinicalView> {
        matches.iter().map(|m| self.project(m)).collect()
    }
}
