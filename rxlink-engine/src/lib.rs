//! rxlink-engine - NDC to RxNorm record-linkage core
//!
//! Reconciles FDA NDC product records against the RxNorm clinical vocabulary
//! reached through the RxNav REST service. For each local record the engine
//! resolves the most plausible RxCUI, enriches it with concept, drug,
//! interaction, and drug-class detail, scores the linkage deterministically,
//! and does this for large batches under bounded concurrency with retrying
//! network access.
//!
//! Download of the FDA registry, persistence of results, and any HTTP/CLI
//! surface are external collaborators; they consume the plain serde records
//! this crate produces (`NdcMatch`, `ClinicalView`) and feed it validated
//! `NdcProduct` sequences.

pub mod models;
pub mod services;

pub use models::{
    BatchOutcome, BatchSummary, ClinicalMetadata, ClinicalView, DrugClass, DrugInteraction,
    MatchMethod, NdcMatch, NdcProduct, ResolveOutcome, RxNormConcept, RxNormDrug,
    RxNormIngredient,
};
pub use services::{
    normalize_ndc, BatchConfig, BatchOrchestrator, ClinicalProjector, ConfidenceScorer,
    LookupError, MatchResolver, RxNormClient,
};
