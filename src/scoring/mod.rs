//! Composite scoring
//!
//! Fuses the four framework analyses into a single `ComplexityScore`:
//! weighted overall score, predicted tier, named criterion checks,
//! confidence, and rejection reasons.

use crate::analyzers::{
    calculate_campbell_score, calculate_interactivity_score, calculate_liu_li_score,
    calculate_wood_score,
};
use crate::config::{ComplexityValidationConfig, TierRequirements, ANALYZER_VERSION};
use crate::models::{
    CalculationBreakdown, CampbellAttributes, ComplexityScore, ElementInteractivityAnalysis,
    LiuLiDimensions, Tier, UncertaintyLevel, ValidationFlags, WoodMetrics,
};
use crate::rules::RULESET_VERSION;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Fraction of named criteria that must pass for `meets_minimum_criteria`
const MIN_CRITERIA_FRACTION: f64 = 0.6;

/// Maximum confidence bonus for an overall score deep inside its tier band
const MARGIN_BONUS_MAX: f64 = 0.10;

/// The ten named criterion checks, in stable report order.
pub const CRITERIA: [&str; 10] = [
    "wood_distinct_acts",
    "wood_coordinative",
    "wood_dynamic",
    "campbell_attributes",
    "liuli_size",
    "liuli_novelty",
    "interactivity_ratio",
    "interactivity_depth",
    "overall_score_min",
    "overall_score_max",
];

pub struct CompositeScorer {
    config: ComplexityValidationConfig,
}

impl CompositeScorer {
    pub fn new(config: ComplexityValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplexityValidationConfig {
        &self.config
    }

    /// Fuse framework analyses into a composite score for one scenario.
    pub fn score(
        &self,
        intended_tier: Tier,
        wood: WoodMetrics,
        campbell: CampbellAttributes,
        liu_li: LiuLiDimensions,
        interactivity: ElementInteractivityAnalysis,
    ) -> ComplexityScore {
        let breakdown = CalculationBreakdown {
            wood_score: calculate_wood_score(&wood),
            campbell_score: calculate_campbell_score(&campbell),
            liu_li_score: calculate_liu_li_score(&liu_li),
            interactivity_score: calculate_interactivity_score(&interactivity),
        };

        let w = &self.config.weights;
        let overall = breakdown.wood_score * w.wood
            + breakdown.campbell_score * w.campbell
            + breakdown.liu_li_score * w.liu_li
            + breakdown.interactivity_score * w.interactivity;
        let overall_score = (overall * 10.0).round() / 10.0;

        let predicted_tier = self.config.tier_thresholds.classify(overall_score);
        let tier_match = predicted_tier == intended_tier;

        let criteria = self.evaluate_criteria(
            intended_tier,
            overall_score,
            &wood,
            &campbell,
            &liu_li,
            &interactivity,
        );
        let passed = criteria.values().filter(|&&b| b).count();
        let pass_fraction = passed as f64 / criteria.len() as f64;

        let req = TierRequirements::for_tier(intended_tier, &self.config);
        let within_tier_bounds = self.within_tier_bounds(intended_tier, overall_score);
        let interactivity_matches = in_ratio_band(&req, interactivity.interactivity_ratio)
            && in_depth_band(&req, interactivity.dependency_depth);

        let flags = ValidationFlags {
            meets_minimum_criteria: pass_fraction >= MIN_CRITERIA_FRACTION,
            has_required_attributes: required_attributes_hold(intended_tier, &campbell),
            within_tier_bounds,
            interactivity_matches,
            criteria,
        };

        let confidence_score = self.confidence(intended_tier, overall_score, pass_fraction);
        let rejection_reasons = self.rejection_reasons(
            intended_tier,
            predicted_tier,
            overall_score,
            tier_match,
            &flags,
        );

        debug!(
            overall_score,
            %predicted_tier,
            %intended_tier,
            confidence_score,
            "scored scenario"
        );

        ComplexityScore {
            overall_score,
            predicted_tier,
            intended_tier,
            tier_match,
            confidence_score,
            wood,
            campbell,
            liu_li,
            interactivity,
            calculation_breakdown: breakdown,
            validation_flags: flags,
            rejection_reasons,
            analyzer_version: format!("{ANALYZER_VERSION}+rules-{RULESET_VERSION}"),
        }
    }

    /// Validation verdict for a scored scenario. Strict mode (or a zero
    /// allowed deviation) requires an exact tier match; otherwise the
    /// predicted tier may sit within `allowed_tier_deviation` ordinal steps
    /// of the intended one. A score below the confidence floor never passes.
    pub fn is_valid_scenario(&self, score: &ComplexityScore) -> bool {
        if score.confidence_score < self.config.minimum_confidence {
            return false;
        }
        if self.config.strict_mode || self.config.allowed_tier_deviation == 0 {
            score.tier_match
        } else {
            score.intended_tier.distance(score.predicted_tier) <= self.config.allowed_tier_deviation
        }
    }

    /// Human-readable markdown breakdown of how a score was produced.
    pub fn explain(&self, score: &ComplexityScore) -> String {
        let mut out = String::new();
        let w = &self.config.weights;
        let b = &score.calculation_breakdown;

        writeln!(out, "## Complexity Score Breakdown\n").ok();
        writeln!(
            out,
            "| Framework | Score | Weight | Contribution |\n|---|---|---|---|"
        )
        .ok();
        for (name, sub, weight) in [
            ("Wood", b.wood_score, w.wood),
            ("Campbell", b.campbell_score, w.campbell),
            ("Liu & Li", b.liu_li_score, w.liu_li),
            ("Element interactivity", b.interactivity_score, w.interactivity),
        ] {
            writeln!(
                out,
                "| {name} | {sub:.1} | {weight:.2} | {:.2} |",
                sub * weight
            )
            .ok();
        }
        writeln!(
            out,
            "\n**Overall**: {:.1} -> predicted `{}` (intended `{}`, {})",
            score.overall_score,
            score.predicted_tier,
            score.intended_tier,
            if score.tier_match { "match" } else { "mismatch" }
        )
        .ok();
        writeln!(out, "**Confidence**: {:.2}\n", score.confidence_score).ok();

        writeln!(out, "### Criteria\n").ok();
        for name in CRITERIA {
            let pass = score
                .validation_flags
                .criteria
                .get(name)
                .copied()
                .unwrap_or(false);
            writeln!(out, "- [{}] {name}", if pass { "x" } else { " " }).ok();
        }
        if !score.rejection_reasons.is_empty() {
            writeln!(out, "\n### Rejection Reasons\n").ok();
            for reason in &score.rejection_reasons {
                writeln!(out, "- {reason}").ok();
            }
        }
        out
    }

    fn evaluate_criteria(
        &self,
        intended_tier: Tier,
        overall_score: f64,
        wood: &WoodMetrics,
        campbell: &CampbellAttributes,
        liu_li: &LiuLiDimensions,
        interactivity: &ElementInteractivityAnalysis,
    ) -> BTreeMap<String, bool> {
        let req = TierRequirements::for_tier(intended_tier, &self.config);
        let (lo, hi) = self.config.tier_thresholds.range(intended_tier);

        let checks: [(&str, bool); 10] = [
            (
                "wood_distinct_acts",
                (req.acts_min..=req.acts_max).contains(&wood.distinct_acts),
            ),
            (
                "wood_coordinative",
                req.coordinative.contains(&wood.coordinative_complexity),
            ),
            (
                "wood_dynamic",
                req.dynamic.contains(&wood.dynamic_complexity),
            ),
            (
                "campbell_attributes",
                required_attributes_hold(intended_tier, campbell),
            ),
            (
                "liuli_size",
                (req.size_min..=req.size_max).contains(&liu_li.size),
            ),
            ("liuli_novelty", req.novelty.contains(&liu_li.novelty)),
            (
                "interactivity_ratio",
                in_ratio_band(&req, interactivity.interactivity_ratio),
            ),
            (
                "interactivity_depth",
                in_depth_band(&req, interactivity.dependency_depth),
            ),
            ("overall_score_min", overall_score >= lo),
            (
                "overall_score_max",
                intended_tier == Tier::Complex || overall_score < hi,
            ),
        ];

        checks
            .into_iter()
            .map(|(name, pass)| (name.to_string(), pass))
            .collect()
    }

    fn within_tier_bounds(&self, tier: Tier, overall_score: f64) -> bool {
        let (lo, hi) = self.config.tier_thresholds.range(tier);
        overall_score >= lo && (tier == Tier::Complex || overall_score < hi)
    }

    /// Confidence is the fraction of criteria met, plus a bonus of up to
    /// 0.10 for a score well clear of the intended tier's boundaries.
    fn confidence(&self, tier: Tier, overall_score: f64, pass_fraction: f64) -> f64 {
        let mut confidence = pass_fraction;
        if self.within_tier_bounds(tier, overall_score) {
            let (lo, hi) = self.config.tier_thresholds.range(tier);
            let width = hi - lo;
            if width > 0.0 {
                let margin = (overall_score - lo).min(hi - overall_score).max(0.0);
                confidence += MARGIN_BONUS_MAX * (margin / (width / 2.0)).min(1.0);
            }
        }
        confidence.min(1.0)
    }

    fn rejection_reasons(
        &self,
        intended_tier: Tier,
        predicted_tier: Tier,
        overall_score: f64,
        tier_match: bool,
        flags: &ValidationFlags,
    ) -> Vec<String> {
        let mut reasons = Vec::new();
        if !tier_match {
            reasons.push(format!(
                "Predicted tier '{predicted_tier}' does not match intended tier \
                 '{intended_tier}' (overall score {overall_score:.1})"
            ));
        }
        for name in CRITERIA {
            if !flags.criteria.get(name).copied().unwrap_or(false) {
                reasons.push(criterion_failure(name, intended_tier).to_string());
            }
        }
        if !flags.meets_minimum_criteria {
            reasons.push("Fewer than 60% of tier criteria are satisfied".to_string());
        }
        if !flags.has_required_attributes {
            reasons.push(format!(
                "Campbell attributes do not fit a {intended_tier} scenario"
            ));
        }
        if !flags.within_tier_bounds {
            reasons.push(format!(
                "Overall score {overall_score:.1} is outside the {intended_tier} tier's range"
            ));
        }
        if !flags.interactivity_matches {
            reasons.push(format!(
                "Element interactivity profile does not fit a {intended_tier} scenario"
            ));
        }
        reasons
    }
}

/// Tier-specific Campbell attribute expectations. Simple requires none of
/// the boolean attributes; moderate requires any attribute or non-none
/// uncertainty; complex requires at least two of the four complexity
/// sources.
fn required_attributes_hold(tier: Tier, campbell: &CampbellAttributes) -> bool {
    let uncertain = campbell.uncertainty_level != UncertaintyLevel::None;
    match tier {
        Tier::Simple => {
            !campbell.multiple_paths
                && !campbell.multiple_outcomes
                && !campbell.conflicting_interdependence
        }
        Tier::Moderate => {
            campbell.multiple_paths
                || campbell.multiple_outcomes
                || campbell.conflicting_interdependence
                || uncertain
        }
        Tier::Complex => {
            let sources = [
                campbell.multiple_paths,
                campbell.multiple_outcomes,
                campbell.conflicting_interdependence,
                uncertain,
            ];
            sources.iter().filter(|&&s| s).count() >= 2
        }
    }
}

fn in_ratio_band(req: &TierRequirements, ratio: f64) -> bool {
    ratio >= req.ratio_min && ratio <= req.ratio_max
}

fn in_depth_band(req: &TierRequirements, depth: u32) -> bool {
    depth >= req.depth_min && depth <= req.depth_max
}

/// Fixed explanation for each failed criterion, phrased for a scenario author.
fn criterion_failure(name: &str, tier: Tier) -> &'static str {
    match (name, tier) {
        ("wood_distinct_acts", Tier::Simple) => {
            "Step count is outside the 2-4 range expected of a simple scenario"
        }
        ("wood_distinct_acts", Tier::Moderate) => {
            "Step count is outside the 4-8 range expected of a moderate scenario"
        }
        ("wood_distinct_acts", Tier::Complex) => {
            "Step count is outside the 8-15 range expected of a complex scenario"
        }
        ("wood_coordinative", _) => {
            "Coordination between steps does not match the intended tier"
        }
        ("wood_dynamic", _) => "Dynamic complexity does not match the intended tier",
        ("campbell_attributes", Tier::Simple) => {
            "A simple scenario should have a single path, a single outcome, and no \
             conflicting trade-offs"
        }
        ("campbell_attributes", Tier::Moderate) => {
            "A moderate scenario needs multiple paths, multiple outcomes, conflict, \
             or uncertainty"
        }
        ("campbell_attributes", Tier::Complex) => {
            "A complex scenario needs at least two of: multiple paths, multiple \
             outcomes, conflict, uncertainty"
        }
        ("liuli_size", _) => "Information element count is outside the intended tier's band",
        ("liuli_novelty", _) => "Task novelty does not match the intended tier",
        ("interactivity_ratio", _) => {
            "Element interactivity ratio is outside the intended tier's band"
        }
        ("interactivity_depth", _) => {
            "Dependency chain depth is outside the intended tier's band"
        }
        ("overall_score_min", _) => "Overall complexity score falls below the intended tier's range",
        ("overall_score_max", _) => "Overall complexity score exceeds the intended tier's range",
        _ => "A tier criterion was not satisfied",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoordinativeComplexity, DynamicComplexity, NoveltyLevel, TimePressure};

    fn scorer() -> CompositeScorer {
        CompositeScorer::new(ComplexityValidationConfig::default())
    }

    fn simple_wood() -> WoodMetrics {
        WoodMetrics {
            distinct_acts: 2,
            information_cues_per_act: 1.0,
            total_elements: 2,
            coordinative_complexity: CoordinativeComplexity::Sequential,
            dynamic_complexity: DynamicComplexity::Static,
            component_complexity_score: 2.0,
        }
    }

    fn simple_campbell() -> CampbellAttributes {
        CampbellAttributes {
            path_count: 1,
            outcome_count: 1,
            ..Default::default()
        }
    }

    fn simple_liuli() -> LiuLiDimensions {
        LiuLiDimensions {
            size: 3,
            novelty: NoveltyLevel::Routine,
            time_pressure: TimePressure::Low,
            ..Default::default()
        }
    }

    fn simple_interactivity() -> ElementInteractivityAnalysis {
        ElementInteractivityAnalysis {
            total_elements: 3,
            simultaneous_elements: 2,
            interactivity_ratio: 0.3,
            dependency_depth: 1,
            dependency_edges: 1,
        }
    }

    #[test]
    fn test_overall_is_weighted_fusion() {
        let score = scorer().score(
            Tier::Simple,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        let b = &score.calculation_breakdown;
        let expected =
            b.wood_score * 0.25 + b.campbell_score * 0.25 + b.liu_li_score * 0.30
                + b.interactivity_score * 0.20;
        assert!((score.overall_score - (expected * 10.0).round() / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_simple_scenario_passes() {
        let s = scorer();
        let score = s.score(
            Tier::Simple,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert_eq!(score.predicted_tier, Tier::Simple);
        assert!(score.tier_match);
        assert!(score.validation_flags.meets_minimum_criteria);
        assert!(score.rejection_reasons.is_empty());
        assert!(s.is_valid_scenario(&score));
    }

    #[test]
    fn test_criteria_map_is_complete_and_stable() {
        let score = scorer().score(
            Tier::Moderate,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert_eq!(score.validation_flags.criteria.len(), CRITERIA.len());
        for name in CRITERIA {
            assert!(score.validation_flags.criteria.contains_key(name), "{name}");
        }
    }

    #[test]
    fn test_tier_mismatch_reason_is_first() {
        let score = scorer().score(
            Tier::Complex,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert!(!score.tier_match);
        assert!(score.rejection_reasons[0].contains("does not match intended tier"));
    }

    #[test]
    fn test_strict_mode_requires_exact_match() {
        let mut config = ComplexityValidationConfig::default();
        config.strict_mode = true;
        let s = CompositeScorer::new(config);
        let score = s.score(
            Tier::Moderate,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert_eq!(score.predicted_tier, Tier::Simple);
        assert!(!s.is_valid_scenario(&score));
    }

    #[test]
    fn test_deviation_tolerance_accepts_adjacent_tier() {
        let s = scorer();
        let wood = WoodMetrics {
            distinct_acts: 8,
            information_cues_per_act: 2.0,
            total_elements: 16,
            coordinative_complexity: CoordinativeComplexity::Networked,
            dynamic_complexity: DynamicComplexity::High,
            component_complexity_score: 24.0,
        };
        let campbell = CampbellAttributes {
            multiple_paths: true,
            multiple_outcomes: true,
            conflicting_interdependence: true,
            path_count: 3,
            outcome_count: 3,
            conflicts: vec!["trade-off between speed and cost".into()],
            uncertainty_level: UncertaintyLevel::High,
            uncertainty_indicators: 3,
            campbell_type: 15,
        };
        let liu_li = LiuLiDimensions {
            size: 14,
            variety: 0.8,
            ambiguity: 0.6,
            relationships: 0.5,
            variability: 0.4,
            unreliability: 0.3,
            incongruity: 0.3,
            novelty: NoveltyLevel::Novel,
            action_complexity: 4.5,
            time_pressure: TimePressure::High,
        };
        let interactivity = ElementInteractivityAnalysis {
            total_elements: 14,
            simultaneous_elements: 9,
            interactivity_ratio: 0.64,
            dependency_depth: 4,
            dependency_edges: 10,
        };
        let score = s.score(Tier::Complex, wood, campbell, liu_li, interactivity);
        // A rich scenario lands at least in the moderate band; within the
        // default one-tier tolerance of complex intent.
        assert!(score.overall_score >= 15.0, "score={}", score.overall_score);
        assert!(score.intended_tier.distance(score.predicted_tier) <= 1);
        assert!(s.is_valid_scenario(&score));
    }

    #[test]
    fn test_low_confidence_rejects() {
        let mut config = ComplexityValidationConfig::default();
        config.minimum_confidence = 0.99;
        let s = CompositeScorer::new(config);
        let score = s.score(
            Tier::Complex,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert!(score.confidence_score < 0.99);
        assert!(!s.is_valid_scenario(&score));
    }

    #[test]
    fn test_confidence_is_bounded() {
        for tier in Tier::all() {
            let score = scorer().score(
                tier,
                simple_wood(),
                simple_campbell(),
                simple_liuli(),
                simple_interactivity(),
            );
            assert!(
                (0.0..=1.0).contains(&score.confidence_score),
                "confidence={} for {tier}",
                score.confidence_score
            );
        }
    }

    #[test]
    fn test_required_attributes_per_tier() {
        let simple = simple_campbell();
        assert!(required_attributes_hold(Tier::Simple, &simple));
        assert!(!required_attributes_hold(Tier::Moderate, &simple));
        assert!(!required_attributes_hold(Tier::Complex, &simple));

        let rich = CampbellAttributes {
            multiple_paths: true,
            multiple_outcomes: true,
            conflicting_interdependence: true,
            path_count: 3,
            outcome_count: 2,
            ..Default::default()
        };
        assert!(!required_attributes_hold(Tier::Simple, &rich));
        assert!(required_attributes_hold(Tier::Moderate, &rich));
        assert!(required_attributes_hold(Tier::Complex, &rich));
    }

    #[test]
    fn test_simple_rejects_any_boolean_attribute() {
        let outcomes_only = CampbellAttributes {
            multiple_outcomes: true,
            outcome_count: 2,
            ..Default::default()
        };
        assert!(!required_attributes_hold(Tier::Simple, &outcomes_only));
    }

    #[test]
    fn test_moderate_accepts_uncertainty_alone() {
        let uncertain_only = CampbellAttributes {
            uncertainty_level: UncertaintyLevel::Bounded,
            uncertainty_indicators: 2,
            ..Default::default()
        };
        assert!(required_attributes_hold(Tier::Moderate, &uncertain_only));
    }

    #[test]
    fn test_complex_accepts_any_two_sources() {
        // Conflict plus uncertainty, with a single path and outcome.
        let two_of_four = CampbellAttributes {
            conflicting_interdependence: true,
            conflicts: vec!["speed versus accuracy".into()],
            uncertainty_level: UncertaintyLevel::High,
            uncertainty_indicators: 3,
            path_count: 1,
            outcome_count: 1,
            ..Default::default()
        };
        assert!(required_attributes_hold(Tier::Complex, &two_of_four));

        let one_of_four = CampbellAttributes {
            multiple_paths: true,
            path_count: 2,
            ..Default::default()
        };
        assert!(!required_attributes_hold(Tier::Complex, &one_of_four));
    }

    #[test]
    fn test_failed_flags_emit_summary_reasons() {
        let score = scorer().score(
            Tier::Complex,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert!(!score.validation_flags.has_required_attributes);
        assert!(!score.validation_flags.within_tier_bounds);
        assert!(!score.validation_flags.interactivity_matches);
        let reasons = score.rejection_reasons.join("\n");
        assert!(reasons.contains("Campbell attributes do not fit"));
        assert!(reasons.contains("outside the complex tier's range"));
        assert!(reasons.contains("interactivity profile does not fit"));
    }

    #[test]
    fn test_explain_mentions_frameworks_and_verdict() {
        let s = scorer();
        let score = s.score(
            Tier::Simple,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        let text = s.explain(&score);
        assert!(text.contains("Wood"));
        assert!(text.contains("Liu & Li"));
        assert!(text.contains("Overall"));
        assert!(text.contains("match"));
    }

    #[test]
    fn test_analyzer_version_stamped() {
        let score = scorer().score(
            Tier::Simple,
            simple_wood(),
            simple_campbell(),
            simple_liuli(),
            simple_interactivity(),
        );
        assert!(score.analyzer_version.starts_with("tierscope-"));
    }
}
