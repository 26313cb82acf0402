//! Tierscope - scenario complexity validation
//!
//! Scores generated scenario text against four task-complexity frameworks
//! (Wood, Campbell, Liu & Li, element interactivity), fuses them into a
//! single tiered score, and decides whether a scenario matches its intended
//! difficulty tier or should be regenerated.
//!
//! Analysis is deterministic: identical input always produces an identical
//! `ComplexityScore`, no network, no model calls.

pub mod analyzers;
pub mod config;
pub mod engine;
pub mod graph;
pub mod models;
pub mod rules;
pub mod scoring;

pub use analyzers::{AnalyzerError, AnalyzerHints};
pub use config::{ComplexityValidationConfig, FrameworkWeights, TierThresholds, ANALYZER_VERSION};
pub use engine::{
    ProgressCallback, ProgressEvent, ProgressEventKind, ValidationEngine, ValidationSummary,
};
pub use models::{
    ComplexityScore, ScenarioInput, ScenarioValidationResult, Tier, ValidationBatchStats,
};
pub use scoring::CompositeScorer;

/// Analyze one piece of scenario text against an intended tier. Passing
/// `None` uses the default configuration. The convenience entry point for
/// library callers; use [`ValidationEngine`] directly for batches.
pub fn analyze_complexity(
    content: &str,
    intended_tier: Tier,
    hints: &AnalyzerHints,
    config: Option<ComplexityValidationConfig>,
) -> Result<ComplexityScore, AnalyzerError> {
    ValidationEngine::new(config.unwrap_or_default()).analyze(content, intended_tier, hints)
}
