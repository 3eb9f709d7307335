//! Data models for the record-linkage engine

pub mod clinical_output;
pub mod match_result;
pub mod ndc_product;
pub mod rxnorm;

pub use clinical_output::ClinicalView;
pub use match_result::{BatchOutcome, BatchSummary, MatchMethod, NdcMatch, ResolveOutcome};
pub use ndc_product::NdcProduct;
pub use rxnorm::{
    ClinicalMetadata, DrugClass, DrugInteraction, RxNormConcept, RxNormDrug, RxNormIngredient,
};
