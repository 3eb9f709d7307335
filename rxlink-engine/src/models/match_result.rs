//! Match records and batch accounting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ndc_product::NdcProduct;
use super::rxnorm::{ClinicalMetadata, RxNormConcept, RxNormDrug};

/// How a match was resolved
///
/// Both the direct NDC-status path and the ingredient-name fallback collapse
/// into the single `NdcLookup` tag; the enum leaves room to split them
/// without a schema break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    NdcLookup,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::NdcLookup => "ndc_lookup",
        }
    }
}

/// Linkage record between one NDC product and its resolved RxNorm artifacts
///
/// Constructed exclusively by the match resolver and immutable thereafter;
/// corrections produce a new record. A product with no resolvable identifier
/// yields no `NdcMatch` at all (a miss), never an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdcMatch {
    pub product: NdcProduct,
    pub concepts: Vec<RxNormConcept>,
    pub drugs: Vec<RxNormDrug>,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    pub method: MatchMethod,
    pub matched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "ClinicalMetadata::is_empty")]
    pub metadata: ClinicalMetadata,
}

/// Per-record resolution result
///
/// Keeps a clean miss ("no remote match") distinguishable from a lookup
/// failure ("lookup attempt failed"); both leave the record out of the match
/// collection, the distinction matters only for diagnostics.
#[derive(Debug)]
pub enum ResolveOutcome {
    Matched(Box<NdcMatch>),
    Miss,
    Failed,
}

impl ResolveOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ResolveOutcome::Matched(_))
    }

    pub fn into_match(self) -> Option<NdcMatch> {
        match self {
            ResolveOutcome::Matched(m) => Some(*m),
            _ => None,
        }
    }
}

/// Counts and timing for one processed batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub missed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Collected matches plus the summary for one batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub matches: Vec<NdcMatch>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// Matches at or above a confidence threshold
    pub fn matches_above(&self, threshold: f64) -> Vec<&NdcMatch> {
        self.matches
            .iter()
            .filter(|m| m.confidence >= threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_method_serializes_as_snake_case() {
        let json = serde_json::to_string(&MatchMethod::NdcLookup).unwrap();
        assert_eq!(json, "\"ndc_lookup\"");
        assert_eq!(MatchMethod::NdcLookup.as_str(), "ndc_lookup");
    }

    #[test]
    fn matches_above_filters_by_confidence() {
        let low = NdcMatch {
            product: NdcProduct::new("00071015527", "HUMAN PRESCRIPTION DRUG"),
            concepts: vec![],
            drugs: vec![],
            confidence: 0.5,
            method: MatchMethod::NdcLookup,
            matched_at: Utc::now(),
            metadata: ClinicalMetadata::default(),
        };
        let high = NdcMatch {
            confidence: 0.8,
            ..low.clone()
        };

        let outcome = BatchOutcome {
            matches: vec![low, high],
            summary: BatchSummary {
                total: 2,
                matched: 2,
                missed: 0,
                failed: 0,
                elapsed: Duration::from_millis(1),
            },
        };

        assert_eq!(outcome.matches_above(0.8).len(), 1);
        assert_eq!(outcome.matches_above(0.5).len(), 2);
        assert_eq!(outcome.matches_above(0.9).len(), 0);
    }
}
