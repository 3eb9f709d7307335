//! Service components for the record-linkage pipeline

pub mod batch_orchestrator;
pub mod clinical_projector;
pub mod confidence_scorer;
pub mod match_resolver;
pub mod rxnorm_client;

pub use batch_orchestrator::{BatchConfig, BatchOrchestrator};
pub use clinical_projector::ClinicalProjector;
pub use confidence_scorer::ConfidenceScorer;
pub use match_resolver::MatchResolver;
pub use rxnorm_client::{normalize_ndc, LookupError, RxNormClient};
