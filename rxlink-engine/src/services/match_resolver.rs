//! Per-record match resolution
//!
//! Resolves one NDC product end-to-end: identifier lookup, concept and drug
//! fetch, confidence scoring, best-effort clinical metadata, and match
//! construction. Terminal gateway failures are converted to a logged
//! `Failed` outcome here, at this boundary, so the orchestrator never sees
//! an error and sibling records stay isolated.

use chrono::Utc;
use std::sync::Arc;

use crate::models::{ClinicalMetadata, MatchMethod, NdcMatch, NdcProduct, ResolveOutcome};
use crate::services::confidence_scorer::ConfidenceScorer;
use crate::services::rxnorm_client::RxNormClient;

/// Resolves one product into a match, a miss, or a failed lookup
pub struct MatchResolver {
    client: Arc<RxNormClient>,
    scorer: ConfidenceScorer,
}

impl MatchResolver {
    pub fn new(client: Arc<RxNormClient>) -> Self {
        Self {
            client,
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Resolve one product record
    ///
    /// A resolved identifier whose concept and drug fetches both come back
    /// empty still constructs a degenerate match with score 0.0: a real
    /// identifier linkage is recorded, not discarded. Metadata fetches are
    /// best-effort and never gate the match.
    pub async fn resolve(&self, product: &NdcProduct) -> ResolveOutcome {
        let rxcui = match self.client.find_rxcui_by_ndc(&product.product_ndc).await {
            Ok(Some(rxcui)) => rxcui,
            Ok(None) => {
                tracing::debug!(ndc = %product.product_ndc, "No RxCUI resolved");
                return ResolveOutcome::Miss;
            }
            Err(e) => {
                tracing::warn!(ndc = %product.product_ndc, error = %e, "RxCUI lookup failed");
                return ResolveOutcome::Failed;
            }
        };

        let concept = match self.client.get_concept(&rxcui).await {
            Ok(concept) => concept,
            Err(e) => {
                tracing::warn!(ndc = %product.product_ndc, rxcui = %rxcui, error = %e, "Concept fetch failed");
                return ResolveOutcome::Failed;
            }
        };
        let drug = match self.client.get_drug(&rxcui).await {
            Ok(drug) => drug,
            Err(e) => {
                tracing::warn!(ndc = %product.product_ndc, rxcui = %rxcui, error = %e, "Drug fetch failed");
                return ResolveOutcome::Failed;
            }
        };

        let concepts: Vec<_> = concept.into_iter().collect();
        let drugs: Vec<_> = drug.into_iter().collect();
        let confidence = self.scorer.score(product, &concepts, &drugs);
        let metadata = self.fetch_clinical_metadata(&rxcui).await;

        tracing::debug!(
            ndc = %product.product_ndc,
            rxcui = %rxcui,
            confidence,
            "Match resolved"
        );

        ResolveOutcome::Matched(Box::new(NdcMatch {
            product: product.clone(),
            concepts,
            drugs,
            confidence,
            method: MatchMethod::NdcLookup,
            matched_at: Utc::now(),
            metadata,
        }))
    }

    /// Secondary clinical attributes; lookup failures degrade to absent
    /// fields and never abort the match
    async fn fetch_clinical_metadata(&self, rxcui: &str) -> ClinicalMetadata {
        let mut metadata = ClinicalMetadata::default();

        match self.client.get_drug_interactions(rxcui).await {
            Ok(interactions) if !interactions.is_empty() => {
                metadata.interactions = Some(interactions);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(rxcui = %rxcui, error = %e, "Interaction fetch failed, continuing without");
            }
        }

        match self.client.get_drug_classes(rxcui).await {
            Ok(classes) if !classes.is_empty() => {
                metadata.drug_classes = Some(classes);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(rxcui = %rxcui, error = %e, "Drug class fetch failed, continuing without");
            }
        }

        metadata
    }
}
