//! End-to-end validation tests
//!
//! Exercises the full pipeline from raw scenario input through hint
//! derivation, the four analyzers, composite scoring, and batch statistics.

use tierscope::engine::derive_hints;
use tierscope::models::{CalculationStep, ScenarioInput, ScenarioVariable};
use tierscope::{
    analyze_complexity, AnalyzerHints, ComplexityValidationConfig, Tier, TierThresholds,
    ValidationEngine,
};

fn scenario(id: &str, tier: Tier, content: &str) -> ScenarioInput {
    ScenarioInput {
        id: id.to_string(),
        intended_tier: tier,
        content: content.to_string(),
        ..Default::default()
    }
}

const TRIVIAL: &str = "Calculate the sum of 5 and 10.";

const MODERATE: &str = "A bakery tracks daily revenue of $450 and ingredient costs of $180.
1. Calculate the gross profit for one day.
2. Compute the weekly profit across 6 operating days.
3. Determine the profit margin as a percentage.
4. Estimate how the margin changes if costs increase by 10%.
5. Decide whether the owner's target margin of 55% is achievable.
You could either reduce costs or raise prices; each option affects customer demand differently.";

const COMPLEX: &str = "A logistics startup is entering an unfamiliar market with no historical data.
1. Estimate the fleet size from projected demand of 12,000 packages per week.
2. Calculate fuel costs, which fluctuate daily between $3.10 and $4.25 per gallon.
3. Model driver wages, which depend on the fleet size derived from step 1.
4. Compute warehouse rent, which varies by region and changes quarterly.
5. Derive insurance premiums using the result of step 1 and accident projections.
6. Combine steps 2 through 5 into a weekly operating cost based on the fleet assumptions.
7. Project revenue under three conflicting pricing strategies.
8. Evaluate the trade-off between rapid growth and profitability.
9. Determine break-even timing, while the demand forecast itself is uncertain.
10. Recommend one strategy, balancing competing stakeholder outcomes.
Several alternative approaches exist and the outcomes conflict with each other. Multiple \
estimates must be tracked simultaneously, in parallel, at the same time as conditions \
change throughout the analysis. The market is unprecedented, the deadline is urgent, \
and some inputs are unknown.";

#[test]
fn trivial_content_is_never_complex() {
    let score = analyze_complexity(TRIVIAL, Tier::Simple, &AnalyzerHints::default(), None).unwrap();
    assert_ne!(score.predicted_tier, Tier::Complex);
    assert!(score.overall_score < 15.0, "score={}", score.overall_score);
}

#[test]
fn richer_content_scores_strictly_higher() {
    let simple = analyze_complexity(TRIVIAL, Tier::Simple, &AnalyzerHints::default(), None).unwrap();
    let moderate = analyze_complexity(MODERATE, Tier::Moderate, &AnalyzerHints::default(), None).unwrap();
    let complex = analyze_complexity(COMPLEX, Tier::Complex, &AnalyzerHints::default(), None).unwrap();

    assert!(
        simple.overall_score < moderate.overall_score,
        "{} vs {}",
        simple.overall_score,
        moderate.overall_score
    );
    assert!(
        moderate.overall_score < complex.overall_score,
        "{} vs {}",
        moderate.overall_score,
        complex.overall_score
    );
}

#[test]
fn identical_input_gives_identical_scores() {
    let hints = AnalyzerHints::default();
    let a = analyze_complexity(COMPLEX, Tier::Complex, &hints, None).unwrap();
    let b = analyze_complexity(COMPLEX, Tier::Complex, &hints, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn breakdown_fuses_into_overall() {
    let score = analyze_complexity(MODERATE, Tier::Moderate, &AnalyzerHints::default(), None).unwrap();
    let b = &score.calculation_breakdown;
    let expected = b.wood_score * 0.25
        + b.campbell_score * 0.25
        + b.liu_li_score * 0.30
        + b.interactivity_score * 0.20;
    assert!((score.overall_score - (expected * 10.0).round() / 10.0).abs() < 1e-9);
}

#[test]
fn structured_hints_override_text_heuristics() {
    let hints = AnalyzerHints {
        has_multiple_paths: Some(true),
        ..Default::default()
    };
    let score = analyze_complexity(TRIVIAL, Tier::Simple, &hints, None).unwrap();
    assert!(score.campbell.multiple_paths);
    assert!(score.campbell.path_count >= 2);
}

#[test]
fn custom_config_changes_classification() {
    let config = ComplexityValidationConfig {
        tier_thresholds: TierThresholds {
            simple_max: 1.0,
            moderate_max: 30.0,
        },
        ..Default::default()
    };
    let default_score =
        analyze_complexity(TRIVIAL, Tier::Moderate, &AnalyzerHints::default(), None).unwrap();
    let configured =
        analyze_complexity(TRIVIAL, Tier::Moderate, &AnalyzerHints::default(), Some(config))
            .unwrap();
    assert_eq!(default_score.predicted_tier, Tier::Simple);
    assert_eq!(configured.predicted_tier, Tier::Moderate);
}

#[test]
fn complex_intent_with_trivial_content_flags_regeneration() {
    let engine = ValidationEngine::new(ComplexityValidationConfig {
        strict_mode: true,
        ..Default::default()
    })
    .with_workers(1);
    let result = engine.validate_scenario(&scenario("r-1", Tier::Complex, TRIVIAL));

    assert!(!result.is_valid);
    assert!(result.should_regenerate);
    let reason = result.regeneration_reason.as_deref().unwrap();
    assert!(reason.contains("complex"), "reason: {reason}");
    assert!(!result.prompt_enhancements.is_empty());
    assert!(result.prompt_enhancements.len() <= 5);
}

#[test]
fn complex_scenario_passes_with_default_tolerance() {
    let engine = ValidationEngine::new(ComplexityValidationConfig::default()).with_workers(1);
    let result = engine.validate_scenario(&scenario("c-1", Tier::Complex, COMPLEX));
    assert!(
        result.score.intended_tier.distance(result.score.predicted_tier) <= 1,
        "predicted {}",
        result.score.predicted_tier
    );
    assert!(result.is_valid, "reasons: {:?}", result.score.rejection_reasons);
}

#[test]
fn batch_statistics_aggregate_correctly() {
    let engine = ValidationEngine::new(ComplexityValidationConfig {
        strict_mode: true,
        ..Default::default()
    })
    .with_workers(2);
    let scenarios = vec![
        scenario("b-1", Tier::Simple, TRIVIAL),
        scenario("b-2", Tier::Simple, TRIVIAL),
        scenario("b-3", Tier::Complex, TRIVIAL),
    ];
    let (results, stats) = engine.validate_batch(&scenarios).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(stats.total_validated, 3);
    assert_eq!(stats.passed, 2);
    assert_eq!(stats.failed, 1);
    assert!((stats.pass_rate - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.intended_tier_distribution[&Tier::Simple], 2);
    assert_eq!(stats.intended_tier_distribution[&Tier::Complex], 1);
    assert_eq!(stats.tier_match_rate[&Tier::Simple], 1.0);
    assert_eq!(stats.tier_match_rate[&Tier::Complex], 0.0);
}

#[test]
fn derived_hints_pick_up_structured_fields() {
    let mut input = scenario("h-1", Tier::Moderate, MODERATE);
    input.calculation_steps = Some(vec![
        CalculationStep {
            id: "gross".into(),
            description: "gross profit".into(),
            ..Default::default()
        },
        CalculationStep {
            id: "weekly".into(),
            description: "weekly profit".into(),
            ..Default::default()
        },
    ]);
    input.variables = Some(vec![
        ScenarioVariable {
            name: "revenue".into(),
            ..Default::default()
        },
        ScenarioVariable {
            name: "costs".into(),
            ..Default::default()
        },
    ]);

    let hints = derive_hints(&input);
    let steps = hints.calculation_steps.as_ref().unwrap();
    // Bare steps are assumed sequential
    assert_eq!(steps[1].depends_on, vec!["gross".to_string()]);
    assert_eq!(hints.variables.as_ref().unwrap().len(), 2);
}

#[test]
fn scenario_json_round_trips() {
    let raw = r#"[
        {"id": "j-1", "intended_tier": "moderate", "content": "Compute the margin."},
        {"id": "j-2", "intended_tier": "complex", "content": "Model the fleet.",
         "variables": [{"name": "fleet", "depends_on": ["demand"]}],
         "regeneration_attempts": 2}
    ]"#;
    let scenarios: Vec<ScenarioInput> = serde_json::from_str(raw).unwrap();
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].intended_tier, Tier::Moderate);
    assert_eq!(scenarios[1].regeneration_attempts, 2);

    let engine = ValidationEngine::new(ComplexityValidationConfig::default()).with_workers(1);
    let result = engine.validate_scenario(&scenarios[1]);
    let json = serde_json::to_string(&result).unwrap();
    let back: tierscope::models::ScenarioValidationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scenario_id, "j-2");
    assert_eq!(back.regeneration_attempts, 2);
}

#[test]
fn config_file_drives_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tierscope.toml");
    std::fs::write(
        &path,
        "strict_mode = true\nminimum_confidence = 0.9\n",
    )
    .unwrap();

    let config = ComplexityValidationConfig::load_from(&path);
    assert!(config.strict_mode);
    assert_eq!(config.minimum_confidence, 0.9);

    let engine = ValidationEngine::new(config).with_workers(1);
    let result = engine.validate_scenario(&scenario("f-1", Tier::Complex, TRIVIAL));
    assert!(!result.is_valid);
}

#[test]
fn analyzer_version_is_stamped_on_every_score() {
    let score = analyze_complexity(TRIVIAL, Tier::Simple, &AnalyzerHints::default(), None).unwrap();
    assert!(score.analyzer_version.starts_with(tierscope::ANALYZER_VERSION));
    assert!(score.analyzer_version.contains(tierscope::rules::RULESET_VERSION));
}
