//! Match confidence scoring
//!
//! Pure, deterministic scoring of one NDC product against its resolved
//! RxNorm artifacts. No side effects; identical inputs always produce the
//! identical score.

use crate::models::{NdcProduct, RxNormConcept, RxNormDrug};

/// Base credit for any remote resolution at all
const RESOLUTION_WEIGHT: f64 = 0.5;
/// Credit for a proprietary-name / concept-name overlap
const NAME_WEIGHT: f64 = 0.3;
/// Credit for a substance-name / ingredient-name overlap
const INGREDIENT_WEIGHT: f64 = 0.2;

/// Confidence scorer
///
/// The heuristic is fixed: it is additive over three evidence terms and
/// clamps to 1.0. Scores are never configurable or learned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score in [0, 1]; exactly 0.0 when concepts and drugs are both empty
    pub fn score(
        &self,
        product: &NdcProduct,
        concepts: &[RxNormConcept],
        drugs: &[RxNormDrug],
    ) -> f64 {
        let mut confidence = 0.0;

        if !concepts.is_empty() || !drugs.is_empty() {
            confidence += RESOLUTION_WEIGHT;
        }

        if let Some(proprietary) = non_empty(product.proprietary_name.as_deref()) {
            for concept in concepts {
                if names_overlap(proprietary, &concept.name) {
                    confidence += NAME_WEIGHT;
                    break;
                }
            }
        }

        if let Some(substance) = non_empty(product.substance_name.as_deref()) {
            'drugs: for drug in drugs {
                for ingredient in &drug.ingredients {
                    if names_overlap(substance, &ingredient.name) {
                        confidence += INGREDIENT_WEIGHT;
                        break 'drugs;
                    }
                }
            }
        }

        confidence.min(1.0)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Case-insensitive substring relationship in either direction
fn names_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RxNormIngredient;

    fn product(proprietary: Option<&str>, substance: Option<&str>) -> NdcProduct {
        let mut p = NdcProduct::new("00071015527", "HUMAN PRESCRIPTION DRUG");
        p.proprietary_name = proprietary.map(str::to_string);
        p.substance_name = substance.map(str::to_string);
        p
    }

    fn concept(name: &str) -> RxNormConcept {
        RxNormConcept {
            rxcui: "198440".to_string(),
            name: name.to_string(),
            synonym: None,
            tty: "SCD".to_string(),
            language: "ENG".to_string(),
            suppress: "N".to_string(),
            umlscui: None,
        }
    }

    fn drug_with_ingredient(ingredient: &str) -> RxNormDrug {
        RxNormDrug {
            rxcui: "161".to_string(),
            name: ingredient.to_string(),
            synonym: None,
            tty: "IN".to_string(),
            base_names: vec![],
            ingredients: vec![RxNormIngredient {
                rxcui: "161".to_string(),
                name: ingredient.to_string(),
                base_names: vec![],
            }],
        }
    }

    #[test]
    fn no_resolution_scores_zero() {
        let scorer = ConfidenceScorer::new();
        let p = product(Some("Acetaminophen 500mg"), Some("ACETAMINOPHEN"));
        assert_eq!(scorer.score(&p, &[], &[]), 0.0);
    }

    #[test]
    fn resolution_without_name_evidence_scores_base() {
        let scorer = ConfidenceScorer::new();
        let p = product(Some("Tylenol Extra"), None);
        let score = scorer.score(&p, &[concept("warfarin sodium")], &[]);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn name_overlap_adds_three_tenths() {
        let scorer = ConfidenceScorer::new();
        // Concept name contained in the proprietary name
        let p = product(Some("Acetaminophen 500mg"), None);
        let score = scorer.score(&p, &[concept("acetaminophen")], &[]);
        assert!((score - 0.8).abs() < f64::EPSILON);

        // Other direction: proprietary name contained in the concept name
        let p = product(Some("acetaminophen"), None);
        let score = scorer.score(&p, &[concept("Acetaminophen 500 MG Oral Tablet")], &[]);
        assert!((score - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn full_evidence_scores_exactly_one() {
        let scorer = ConfidenceScorer::new();
        let p = product(Some("Acetaminophen 500mg"), Some("ACETAMINOPHEN"));
        let score = scorer.score(
            &p,
            &[concept("acetaminophen")],
            &[drug_with_ingredient("Acetaminophen")],
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn ingredient_only_evidence() {
        let scorer = ConfidenceScorer::new();
        let p = product(None, Some("ACETAMINOPHEN"));
        let score = scorer.score(&p, &[], &[drug_with_ingredient("Acetaminophen")]);
        assert!((score - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn unrelated_names_earn_no_bonus() {
        let scorer = ConfidenceScorer::new();
        let p = product(Some("Lipitor"), Some("ATORVASTATIN CALCIUM"));
        let score = scorer.score(
            &p,
            &[concept("warfarin sodium")],
            &[drug_with_ingredient("Warfarin")],
        );
        assert_eq!(score, 0.5);
    }

    #[test]
    fn score_is_deterministic() {
        let scorer = ConfidenceScorer::new();
        let p = product(Some("Acetaminophen 500mg"), Some("ACETAMINOPHEN"));
        let concepts = [concept("acetaminophen")];
        let drugs = [drug_with_ingredient("Acetaminophen")];

        let first = scorer.score(&p, &concepts, &drugs);
        for _ in 0..10 {
            assert_eq!(scorer.score(&p, &concepts, &drugs), first);
        }
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let scorer = ConfidenceScorer::new();
        let combos = [
            product(None, None),
            product(Some(""), Some("")),
            product(Some("a"), Some("a")),
            product(Some("Acetaminophen"), Some("ACETAMINOPHEN")),
        ];
        let concepts = [concept("a")];
        let drugs = [drug_with_ingredient("a")];

        for p in &combos {
            for c in [&[][..], &concepts[..]] {
                for d in [&[][..], &drugs[..]] {
                    let score = scorer.score(p, c, d);
                    assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
                }
            }
        }
    }
}
