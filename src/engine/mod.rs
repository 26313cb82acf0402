//! Validation engine with parallel batch support
//!
//! The ValidationEngine orchestrates a full validation pass per scenario:
//! derives analyzer hints from the structured input, runs the four framework
//! analyzers, fuses them through the composite scorer, and decides whether
//! the scenario should be regenerated. Batches run in parallel with rayon
//! and report progress through callbacks.

use crate::analyzers::{
    analyze_campbell_attributes, analyze_element_interactivity, analyze_liu_li_dimensions,
    analyze_wood_metrics, AnalyzerError, AnalyzerHints,
};
use crate::config::{ComplexityValidationConfig, ANALYZER_VERSION};
use crate::models::{
    ComplexityScore, ScenarioInput, ScenarioValidationResult, Tier, ValidationBatchStats,
};
use crate::rules;
use crate::scoring::{CompositeScorer, CRITERIA};
use anyhow::Result;
use chrono::Utc;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Maximum targeted regeneration hints attached to one result
const MAX_PROMPT_ENHANCEMENTS: usize = 5;

/// Excerpts extracted per hint category during hint derivation
const MAX_HINT_EXCERPTS: usize = 5;

/// What a progress event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEventKind {
    ValidationStart,
    ValidationProgress,
    ValidationComplete,
    BatchComplete,
}

/// Compact per-scenario verdict embedded in completion events
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub tier_match: bool,
    pub predicted_tier: Tier,
    pub intended_tier: Tier,
    pub confidence_score: f64,
    pub overall_score: f64,
}

impl ValidationSummary {
    fn from_result(result: &ScenarioValidationResult) -> Self {
        Self {
            is_valid: result.is_valid,
            tier_match: result.score.tier_match,
            predicted_tier: result.score.predicted_tier,
            intended_tier: result.score.intended_tier,
            confidence_score: result.score.confidence_score,
            overall_score: result.score.overall_score,
        }
    }
}

/// Progress report emitted during batch validation
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub kind: ProgressEventKind,
    /// Scenarios finished so far
    pub current: usize,
    pub total: usize,
    /// current / total * 100; 100 for an empty batch
    pub percentage: f64,
    /// Set for per-scenario events
    pub scenario_id: Option<String>,
    pub message: Option<String>,
    /// Set on `ValidationComplete` events
    pub summary: Option<ValidationSummary>,
    pub elapsed_ms: u64,
}

impl ProgressEvent {
    fn new(kind: ProgressEventKind, current: usize, total: usize, started: Instant) -> Self {
        let percentage = if total == 0 {
            100.0
        } else {
            current as f64 / total as f64 * 100.0
        };
        Self {
            kind,
            current,
            total,
            percentage,
            scenario_id: None,
            message: None,
            summary: None,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Progress callback for batch validation
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Orchestrates scenario validation
pub struct ValidationEngine {
    scorer: CompositeScorer,
    /// Worker threads for batch validation
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl ValidationEngine {
    /// Create an engine with auto-detected worker count.
    pub fn new(config: ComplexityValidationConfig) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
            .min(16);
        Self {
            scorer: CompositeScorer::new(config),
            workers,
            progress_callback: None,
        }
    }

    /// Set worker thread count (0 = auto-detect)
    pub fn with_workers(mut self, workers: usize) -> Self {
        if workers > 0 {
            self.workers = workers;
        }
        self
    }

    /// Set a progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &ComplexityValidationConfig {
        self.scorer.config()
    }

    pub fn scorer(&self) -> &CompositeScorer {
        &self.scorer
    }

    /// Run the four analyzers over one scenario and fuse their results.
    pub fn analyze(
        &self,
        content: &str,
        intended_tier: Tier,
        hints: &AnalyzerHints,
    ) -> Result<ComplexityScore, AnalyzerError> {
        let wood = analyze_wood_metrics(content, hints)?;
        let campbell = analyze_campbell_attributes(content, hints)?;
        let liu_li = analyze_liu_li_dimensions(content, hints)?;
        let interactivity =
            analyze_element_interactivity(content, hints, Some(wood.total_elements))?;
        Ok(self
            .scorer
            .score(intended_tier, wood, campbell, liu_li, interactivity))
    }

    /// Validate one scenario end to end. Analyzer failures never propagate:
    /// they produce a zero-score result flagged for regeneration.
    pub fn validate_scenario(&self, scenario: &ScenarioInput) -> ScenarioValidationResult {
        let started = Instant::now();
        let hints = derive_hints(scenario);

        let score = match self.analyze(&scenario.content, scenario.intended_tier, &hints) {
            Ok(score) => score,
            Err(e) => {
                warn!(scenario_id = %scenario.id, error = %e, "analysis failed");
                fallback_score(scenario.intended_tier, &e)
            }
        };

        let is_valid = self.scorer.is_valid_scenario(&score);
        let should_regenerate = !is_valid
            && scenario.regeneration_attempts < self.config().max_regeneration_attempts;
        let regeneration_reason = if is_valid {
            None
        } else {
            score.rejection_reasons.first().cloned()
        };
        let prompt_enhancements = if is_valid {
            Vec::new()
        } else {
            prompt_enhancements(&score)
        };

        ScenarioValidationResult {
            scenario_id: scenario.id.clone(),
            is_valid,
            score,
            validated_at: Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
            should_regenerate,
            regeneration_reason,
            prompt_enhancements,
            regeneration_attempts: scenario.regeneration_attempts,
        }
    }

    /// Validate a batch of scenarios in parallel. Result order matches
    /// input order regardless of completion order.
    pub fn validate_batch(
        &self,
        scenarios: &[ScenarioInput],
    ) -> Result<(Vec<ScenarioValidationResult>, ValidationBatchStats)> {
        let started = Instant::now();
        let total = scenarios.len();
        info!(total, workers = self.workers, "validating scenario batch");

        self.emit(ProgressEvent::new(
            ProgressEventKind::ValidationStart,
            0,
            total,
            started,
        ));

        let completed = Arc::new(AtomicUsize::new(0));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let results: Vec<ScenarioValidationResult> = pool.install(|| {
            scenarios
                .par_iter()
                .map(|scenario| {
                    let result = self.validate_scenario(scenario);

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    let verdict = if result.is_valid {
                        format!("{} passed", result.scenario_id)
                    } else {
                        format!("{} failed", result.scenario_id)
                    };

                    let mut event = ProgressEvent::new(
                        ProgressEventKind::ValidationComplete,
                        done,
                        total,
                        started,
                    );
                    event.scenario_id = Some(result.scenario_id.clone());
                    event.summary = Some(ValidationSummary::from_result(&result));
                    event.message = Some(verdict.clone());
                    self.emit(event);

                    let mut tick = ProgressEvent::new(
                        ProgressEventKind::ValidationProgress,
                        done,
                        total,
                        started,
                    );
                    tick.scenario_id = Some(result.scenario_id.clone());
                    tick.message = Some(verdict);
                    self.emit(tick);

                    result
                })
                .collect()
        });

        let stats = ValidationBatchStats::from_results(&results);

        let mut event = ProgressEvent::new(
            ProgressEventKind::BatchComplete,
            total,
            total,
            started,
        );
        event.message = Some(format!(
            "{}/{} passed ({:.0}%)",
            stats.passed,
            stats.total_validated,
            stats.pass_rate * 100.0
        ));
        self.emit(event);

        info!(
            passed = stats.passed,
            failed = stats.failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch validation complete"
        );
        Ok((results, stats))
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref callback) = self.progress_callback {
            callback(&event);
        }
    }
}

/// Build analyzer hints from a scenario's structured fields plus cheap
/// content extraction. Structured input always wins; extraction only fills
/// hints the caller left empty.
pub fn derive_hints(scenario: &ScenarioInput) -> AnalyzerHints {
    let content = &scenario.content;

    let calculation_steps = scenario
        .calculation_steps
        .clone()
        .map(infer_sequential_dependencies);

    // A single extracted phrase is not evidence of a single path, so
    // approach/outcome lists only become hints when they show multiplicity.
    let approaches = rules::APPROACH_PHRASES.match_excerpts(content, MAX_HINT_EXCERPTS);
    let outcomes = rules::OBJECTIVE_PHRASES.match_excerpts(content, MAX_HINT_EXCERPTS);
    let trade_offs = rules::TRADEOFF_PHRASES.match_excerpts(content, MAX_HINT_EXCERPTS);
    let gaps = rules::INFO_GAP_PHRASES.match_excerpts(content, MAX_HINT_EXCERPTS);
    let time_constraint = rules::TIME_PRESSURE_HIGH
        .match_excerpts(content, 1)
        .into_iter()
        .next();

    AnalyzerHints {
        calculation_steps,
        variables: scenario.variables.clone(),
        dependency_edges: scenario.relationships.clone(),
        element_count: None,
        // Boolean overrides are reserved for structured caller input; the
        // analyzers run their own pattern heuristics over the text.
        has_conditionals: None,
        has_state_changes: None,
        has_multiple_paths: None,
        has_multiple_outcomes: None,
        has_conflicting_interdependence: None,
        candidate_approaches: (approaches.len() >= 2).then_some(approaches),
        candidate_outcomes: (outcomes.len() >= 2).then_some(outcomes),
        trade_offs: (!trade_offs.is_empty()).then_some(trade_offs),
        information_gaps: (!gaps.is_empty()).then_some(gaps),
        has_variable_conditions: None,
        has_unreliable_data: None,
        has_incongruent_data: None,
        time_constraint,
        domain: scenario.domain.clone(),
    }
}

/// Steps supplied without any dependency information are assumed sequential:
/// each step depends on the one before it.
fn infer_sequential_dependencies(
    mut steps: Vec<crate::models::CalculationStep>,
) -> Vec<crate::models::CalculationStep> {
    let bare = steps.len() >= 2
        && steps.iter().all(|s| s.depends_on.is_empty())
        && steps.iter().all(|s| !s.id.is_empty());
    if bare {
        for i in 1..steps.len() {
            let prev = steps[i - 1].id.clone();
            steps[i].depends_on.push(prev);
        }
    }
    steps
}

/// A score reflecting a failed analysis. Never matches any intended tier
/// above simple and carries the failure as its rejection reason.
fn fallback_score(intended_tier: Tier, error: &AnalyzerError) -> ComplexityScore {
    ComplexityScore {
        intended_tier,
        predicted_tier: Tier::Simple,
        tier_match: intended_tier == Tier::Simple,
        rejection_reasons: vec![format!("Analysis failed: {error}")],
        analyzer_version: format!("{}+rules-{}", ANALYZER_VERSION, rules::RULESET_VERSION),
        ..Default::default()
    }
}

/// Targeted regeneration guidance for an invalid score, keyed off the
/// failed criteria, capped at `MAX_PROMPT_ENHANCEMENTS`.
fn prompt_enhancements(score: &ComplexityScore) -> Vec<String> {
    let tier = score.intended_tier;
    let mut out = Vec::new();
    for name in CRITERIA {
        if score
            .validation_flags
            .criteria
            .get(name)
            .copied()
            .unwrap_or(false)
        {
            continue;
        }
        out.push(enhancement_for(name, tier));
        if out.len() >= MAX_PROMPT_ENHANCEMENTS {
            return out;
        }
    }
    if out.is_empty() {
        out.push(generic_enhancement(tier));
    }
    out
}

fn enhancement_for(criterion: &str, tier: Tier) -> String {
    match criterion {
        "wood_distinct_acts" => match tier {
            Tier::Simple => "Reduce the task to 2-4 clearly separate calculation steps".to_string(),
            Tier::Moderate => "Structure the task as 4-8 distinct calculation steps".to_string(),
            Tier::Complex => "Expand the task to 8-15 distinct calculation steps".to_string(),
        },
        "wood_coordinative" => match tier {
            Tier::Simple => {
                "Keep steps strictly sequential with no cross-dependencies".to_string()
            }
            Tier::Moderate => {
                "Make some steps depend on the results of earlier steps".to_string()
            }
            Tier::Complex => {
                "Interleave steps so several depend on each other's intermediate results"
                    .to_string()
            }
        },
        "wood_dynamic" => match tier {
            Tier::Simple => "Remove mid-task changes; all inputs should be fixed upfront".to_string(),
            _ => "Introduce conditions or values that change as the task progresses".to_string(),
        },
        "campbell_attributes" => match tier {
            Tier::Simple => {
                "Present exactly one way to solve the task with one clear answer".to_string()
            }
            Tier::Moderate => {
                "Offer more than one viable approach or more than one acceptable outcome"
                    .to_string()
            }
            Tier::Complex => {
                "Include competing approaches, several desired outcomes, and an explicit \
                 trade-off or source of uncertainty"
                    .to_string()
            }
        },
        "liuli_size" => match tier {
            Tier::Simple => "Limit the scenario to 3-6 distinct quantities or facts".to_string(),
            Tier::Moderate => "Include 5-12 distinct quantities or facts".to_string(),
            Tier::Complex => "Include at least 10 distinct quantities or facts".to_string(),
        },
        "liuli_novelty" => match tier {
            Tier::Simple => "Use a routine, familiar task framing".to_string(),
            Tier::Moderate => "Add an unfamiliar twist to an otherwise familiar task".to_string(),
            Tier::Complex => "Frame the task around a novel, unprecedented situation".to_string(),
        },
        "interactivity_ratio" => match tier {
            Tier::Simple => {
                "Let each value be usable on its own rather than in combination".to_string()
            }
            _ => "Require more values to be considered simultaneously".to_string(),
        },
        "interactivity_depth" => match tier {
            Tier::Simple => "Avoid chains of values derived from other values".to_string(),
            _ => "Build longer chains where each value derives from earlier ones".to_string(),
        },
        "overall_score_min" => format!(
            "Increase overall difficulty; the scenario scores below the {tier} band"
        ),
        "overall_score_max" => format!(
            "Decrease overall difficulty; the scenario scores above the {tier} band"
        ),
        _ => generic_enhancement(tier),
    }
}

fn generic_enhancement(tier: Tier) -> String {
    format!("Adjust the scenario's overall difficulty to match the '{tier}' tier")
}
