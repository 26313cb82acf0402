//! Core data models for tierscope
//!
//! These models are used throughout the codebase for representing
//! scenario inputs, framework metrics, and validation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scenario difficulty tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl Tier {
    /// Ordinal position used for tier-deviation comparisons (simple < moderate < complex)
    pub fn ordinal(&self) -> u32 {
        match self {
            Tier::Simple => 0,
            Tier::Moderate => 1,
            Tier::Complex => 2,
        }
    }

    /// Absolute ordinal distance between two tiers
    pub fn distance(&self, other: Tier) -> u32 {
        self.ordinal().abs_diff(other.ordinal())
    }

    pub fn all() -> [Tier; 3] {
        [Tier::Simple, Tier::Moderate, Tier::Complex]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Simple => write!(f, "simple"),
            Tier::Moderate => write!(f, "moderate"),
            Tier::Complex => write!(f, "complex"),
        }
    }
}

/// Wood framework: coordinative complexity between acts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum CoordinativeComplexity {
    #[default]
    Sequential,
    Interdependent,
    Networked,
}

/// Wood framework: dynamic complexity over time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DynamicComplexity {
    #[default]
    Static,
    Low,
    High,
}

/// Campbell framework: uncertainty of linkages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum UncertaintyLevel {
    #[default]
    None,
    Bounded,
    High,
}

/// Liu & Li framework: novelty dimension
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum NoveltyLevel {
    #[default]
    Routine,
    SemiFamiliar,
    Novel,
}

/// Liu & Li framework: time pressure dimension
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TimePressure {
    #[default]
    Low,
    Moderate,
    High,
}

/// Metrics from Wood's task complexity model (component, coordinative, dynamic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WoodMetrics {
    /// Distinct acts required, clamped to [2, 15]
    pub distinct_acts: u32,
    /// Information cues per act, rounded to 1 decimal
    pub information_cues_per_act: f64,
    /// distinct_acts * ceil(information_cues_per_act)
    pub total_elements: u32,
    pub coordinative_complexity: CoordinativeComplexity,
    pub dynamic_complexity: DynamicComplexity,
    pub component_complexity_score: f64,
}

/// Attributes from Campbell's four sources of task complexity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CampbellAttributes {
    pub multiple_paths: bool,
    pub multiple_outcomes: bool,
    pub conflicting_interdependence: bool,
    /// >= 1; at least 2 when multiple_paths is true
    pub path_count: u32,
    /// >= 1; at least 2 when multiple_outcomes is true
    pub outcome_count: u32,
    /// Short text excerpts around detected conflicts, capped at 5
    pub conflicts: Vec<String>,
    pub uncertainty_level: UncertaintyLevel,
    pub uncertainty_indicators: u32,
    /// 4-bit encoding: paths=8, outcomes=4, conflict=2, uncertainty=1
    pub campbell_type: u8,
}

/// The ten dimensions of Liu & Li's task complexity model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LiuLiDimensions {
    /// Distinct information elements, minimum 3
    pub size: u32,
    /// Fraction of domain vocabulary categories present, in [0, 1]
    pub variety: f64,
    pub ambiguity: f64,
    pub relationships: f64,
    pub variability: f64,
    pub unreliability: f64,
    pub incongruity: f64,
    pub novelty: NoveltyLevel,
    /// Non-negative weighted sum over action verbs or explicit steps
    pub action_complexity: f64,
    pub time_pressure: TimePressure,
}

/// Element interactivity (cognitive load theory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementInteractivityAnalysis {
    pub total_elements: u32,
    pub simultaneous_elements: u32,
    /// min(simultaneous / total, 1); 0 when total_elements is 0
    pub interactivity_ratio: f64,
    /// Longest path in the dependency graph
    pub dependency_depth: u32,
    pub dependency_edges: u32,
}

/// Per-framework sub-scores feeding the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalculationBreakdown {
    pub wood_score: f64,
    pub campbell_score: f64,
    pub liu_li_score: f64,
    pub interactivity_score: f64,
}

/// Machine-checkable validation flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationFlags {
    /// At least 60% of named criteria pass
    pub meets_minimum_criteria: bool,
    /// Tier-specific Campbell attribute rule holds
    pub has_required_attributes: bool,
    /// Overall score sits inside the intended tier's range
    pub within_tier_bounds: bool,
    /// Interactivity ratio and depth both sit inside tier bounds
    pub interactivity_matches: bool,
    /// Every named criterion check, in stable order
    pub criteria: BTreeMap<String, bool>,
}

/// Composite complexity judgment for one scenario, the unit of output.
///
/// Immutable once returned; the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComplexityScore {
    /// Weighted fusion of the four framework scores, rounded to 1 decimal
    pub overall_score: f64,
    pub predicted_tier: Tier,
    pub intended_tier: Tier,
    pub tier_match: bool,
    /// Fraction-of-criteria-met estimate in [0, 1]
    pub confidence_score: f64,
    pub wood: WoodMetrics,
    pub campbell: CampbellAttributes,
    pub liu_li: LiuLiDimensions,
    pub interactivity: ElementInteractivityAnalysis,
    pub calculation_breakdown: CalculationBreakdown,
    pub validation_flags: ValidationFlags,
    /// Human-readable reasons, tier mismatch first
    pub rejection_reasons: Vec<String>,
    pub analyzer_version: String,
}

/// A calculation step supplied as a structured hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalculationStep {
    #[serde(default)]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Contribution to action complexity (default 2.0 when absent)
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A named variable supplied as a structured hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioVariable {
    pub name: String,
    #[serde(default)]
    pub var_type: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// A directed dependency edge: `from` depends on `to`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

/// Raw scenario input to the validation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioInput {
    pub id: String,
    pub intended_tier: Tier,
    pub content: String,
    #[serde(default)]
    pub calculation_steps: Option<Vec<CalculationStep>>,
    #[serde(default)]
    pub variables: Option<Vec<ScenarioVariable>>,
    #[serde(default)]
    pub relationships: Option<Vec<DependencyEdge>>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Regeneration attempts already consumed by the caller's retry loop
    #[serde(default)]
    pub regeneration_attempts: u32,
}

/// Outcome of validating one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioValidationResult {
    pub scenario_id: String,
    pub is_valid: bool,
    pub score: ComplexityScore,
    pub validated_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub should_regenerate: bool,
    pub regeneration_reason: Option<String>,
    /// Targeted regeneration guidance, capped at 5 strings
    pub prompt_enhancements: Vec<String>,
    pub regeneration_attempts: u32,
}

/// Aggregate statistics over a validation batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationBatchStats {
    pub total_validated: usize,
    pub passed: usize,
    pub failed: usize,
    /// passed / total; 0 for an empty batch (never NaN)
    pub pass_rate: f64,
    pub avg_confidence_score: f64,
    pub intended_tier_distribution: BTreeMap<Tier, usize>,
    pub predicted_tier_distribution: BTreeMap<Tier, usize>,
    /// Per intended tier: fraction of scenarios whose predicted tier matched
    pub tier_match_rate: BTreeMap<Tier, f64>,
    pub avg_validation_time_ms: f64,
    pub total_regeneration_attempts: u64,
}

impl ValidationBatchStats {
    /// Aggregate stats from per-scenario results. Safe on an empty slice:
    /// all rates are 0, never NaN.
    pub fn from_results(results: &[ScenarioValidationResult]) -> Self {
        let mut stats = Self::default();
        stats.total_validated = results.len();

        let mut match_counts: BTreeMap<Tier, (usize, usize)> = BTreeMap::new();
        let mut confidence_sum = 0.0;
        let mut duration_sum = 0u64;

        for r in results {
            if r.is_valid {
                stats.passed += 1;
            } else {
                stats.failed += 1;
            }
            confidence_sum += r.score.confidence_score;
            duration_sum += r.duration_ms;
            stats.total_regeneration_attempts += u64::from(r.regeneration_attempts);

            *stats
                .intended_tier_distribution
                .entry(r.score.intended_tier)
                .or_insert(0) += 1;
            *stats
                .predicted_tier_distribution
                .entry(r.score.predicted_tier)
                .or_insert(0) += 1;

            let entry = match_counts.entry(r.score.intended_tier).or_insert((0, 0));
            entry.1 += 1;
            if r.score.tier_match {
                entry.0 += 1;
            }
        }

        if !results.is_empty() {
            let n = results.len() as f64;
            stats.pass_rate = stats.passed as f64 / n;
            stats.avg_confidence_score = confidence_sum / n;
            stats.avg_validation_time_ms = duration_sum as f64 / n;
        }

        for (tier, (matched, total)) in match_counts {
            let rate = if total > 0 {
                matched as f64 / total as f64
            } else {
                0.0
            };
            stats.tier_match_rate.insert(tier, rate);
        }

        stats
    }
}
