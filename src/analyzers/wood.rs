//! Wood's task complexity model
//!
//! Three facets: component complexity (distinct acts x information cues),
//! coordinative complexity (how acts relate), and dynamic complexity
//! (whether the task environment changes mid-task).

use super::{round1, AnalyzerError, AnalyzerHints};
use crate::graph::DependencyGraph;
use crate::models::{CoordinativeComplexity, DynamicComplexity, WoodMetrics};
use crate::rules;

const MIN_ACTS: u32 = 2;
const MAX_ACTS: u32 = 15;

pub fn analyze_wood_metrics(
    content: &str,
    hints: &AnalyzerHints,
) -> Result<WoodMetrics, AnalyzerError> {
    let distinct_acts = count_distinct_acts(content, hints);
    let information_cues_per_act = information_cues_per_act(content, hints, distinct_acts);
    let total_elements = distinct_acts * information_cues_per_act.ceil() as u32;
    let coordinative_complexity = coordinative_complexity(content, hints)?;
    let dynamic_complexity = dynamic_complexity(content, hints);

    let multiplier = match coordinative_complexity {
        CoordinativeComplexity::Networked => 1.5,
        CoordinativeComplexity::Interdependent => 1.2,
        CoordinativeComplexity::Sequential => 1.0,
    };
    let component_complexity_score =
        round1(distinct_acts as f64 * information_cues_per_act * multiplier);

    Ok(WoodMetrics {
        distinct_acts,
        information_cues_per_act,
        total_elements,
        coordinative_complexity,
        dynamic_complexity,
        component_complexity_score,
    })
}

/// Weighted Wood score. Monotonic non-decreasing in every input factor.
pub fn calculate_wood_score(metrics: &WoodMetrics) -> f64 {
    let acts = metrics.distinct_acts.min(10) as f64 * 0.5;
    let cues = metrics.information_cues_per_act.min(5.0);
    let coordinative = match metrics.coordinative_complexity {
        CoordinativeComplexity::Sequential => 1.0,
        CoordinativeComplexity::Interdependent => 3.0,
        CoordinativeComplexity::Networked => 5.0,
    };
    let dynamic = match metrics.dynamic_complexity {
        DynamicComplexity::Static => 0.0,
        DynamicComplexity::Low => 2.0,
        DynamicComplexity::High => 4.0,
    };
    round1(acts + cues + coordinative + dynamic)
}

fn count_distinct_acts(content: &str, hints: &AnalyzerHints) -> u32 {
    if let Some(steps) = &hints.calculation_steps {
        return (steps.len() as u32).clamp(MIN_ACTS, MAX_ACTS);
    }

    let verbs = rules::CALCULATION_VERBS.match_count(content) as f64;
    let numbered = rules::NUMBERED_ITEMS.match_count(content) as f64;
    // Bullets down-weighted: not every bullet is an action
    let bullets = rules::BULLET_ITEMS.weighted_sum(content);

    let signal = verbs.max(numbered).max(bullets).round() as u32;
    signal.clamp(MIN_ACTS, MAX_ACTS)
}

fn information_cues_per_act(content: &str, hints: &AnalyzerHints, distinct_acts: u32) -> f64 {
    let cue_count = if let Some(vars) = &hints.variables {
        vars.len().max(1)
    } else {
        rules::INFORMATION_CUES.distinct_matches(content).len().max(1)
    };
    round1(cue_count as f64 / distinct_acts as f64)
}

fn coordinative_complexity(
    content: &str,
    hints: &AnalyzerHints,
) -> Result<CoordinativeComplexity, AnalyzerError> {
    let edges = hints.explicit_edges();
    if !edges.is_empty() {
        let graph = DependencyGraph::from_edges(&edges)?;
        if graph.has_cycle() {
            return Ok(CoordinativeComplexity::Networked);
        }
        if graph.max_in_degree() >= 2 {
            return Ok(CoordinativeComplexity::Interdependent);
        }
        return Ok(CoordinativeComplexity::Sequential);
    }

    let networked = rules::NETWORKED_COORDINATION.match_count(content);
    let conditional_bonus = match hints.has_conditionals {
        Some(true) => 2,
        Some(false) => 0,
        None => {
            if rules::CONDITIONAL_MARKERS.matches_any(content) {
                2
            } else {
                0
            }
        }
    };
    let interdependent =
        rules::INTERDEPENDENT_COORDINATION.match_count(content) + conditional_bonus;
    let sequential = rules::SEQUENTIAL_COORDINATION.match_count(content);

    if networked >= 2 {
        Ok(CoordinativeComplexity::Networked)
    } else if interdependent >= 2 || (interdependent >= 1 && sequential >= 1) {
        Ok(CoordinativeComplexity::Interdependent)
    } else {
        Ok(CoordinativeComplexity::Sequential)
    }
}

fn dynamic_complexity(content: &str, hints: &AnalyzerHints) -> DynamicComplexity {
    match hints.has_state_changes {
        Some(false) => return DynamicComplexity::Static,
        Some(true) => return DynamicComplexity::High,
        None => {}
    }
    let high = rules::DYNAMIC_HIGH.match_count(content);
    // State-change verbs alone never reach High; they only lift Static to Low.
    let low = rules::DYNAMIC_LOW.match_count(content)
        + rules::STATE_CHANGE_MARKERS.match_count(content);

    if high >= 2 {
        DynamicComplexity::High
    } else if high >= 1 || low >= 1 {
        DynamicComplexity::Low
    } else {
        DynamicComplexity::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationStep, DependencyEdge};

    fn step(id: &str, desc: &str) -> CalculationStep {
        CalculationStep {
            id: id.into(),
            description: desc.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_distinct_acts_always_in_bounds() {
        let inputs = [
            "",
            "nothing here",
            "Calculate, compute, determine, derive, estimate, sum, add, subtract, \
             multiply, divide, calculate, compute, determine, derive, estimate, sum, \
             add, subtract, multiply, divide the figures.",
        ];
        for content in inputs {
            let m = analyze_wood_metrics(content, &AnalyzerHints::default()).unwrap();
            assert!(
                (2..=15).contains(&m.distinct_acts),
                "acts={} for {content:?}",
                m.distinct_acts
            );
        }
    }

    #[test]
    fn test_explicit_steps_drive_act_count() {
        let hints = AnalyzerHints {
            calculation_steps: Some(vec![step("s1", "Add 5 and 10")]),
            ..Default::default()
        };
        let m = analyze_wood_metrics("Calculate the sum of 5 and 10.", &hints).unwrap();
        // One step clamps up to the minimum of 2
        assert!((2..=3).contains(&m.distinct_acts));
    }

    #[test]
    fn test_total_elements_invariant() {
        let m = analyze_wood_metrics(
            "Calculate revenue of $500 and then subtract 10% fees over 3 years.",
            &AnalyzerHints::default(),
        )
        .unwrap();
        assert_eq!(
            m.total_elements,
            m.distinct_acts * m.information_cues_per_act.ceil() as u32
        );
    }

    #[test]
    fn test_explicit_cycle_is_networked() {
        let hints = AnalyzerHints {
            dependency_edges: Some(vec![
                DependencyEdge { from: "A".into(), to: "B".into() },
                DependencyEdge { from: "B".into(), to: "A".into() },
            ]),
            ..Default::default()
        };
        let m = analyze_wood_metrics("two steps", &hints).unwrap();
        assert_eq!(m.coordinative_complexity, CoordinativeComplexity::Networked);
    }

    #[test]
    fn test_shared_dependency_is_interdependent() {
        let hints = AnalyzerHints {
            dependency_edges: Some(vec![
                DependencyEdge { from: "B".into(), to: "A".into() },
                DependencyEdge { from: "C".into(), to: "A".into() },
            ]),
            ..Default::default()
        };
        let m = analyze_wood_metrics("steps", &hints).unwrap();
        assert_eq!(
            m.coordinative_complexity,
            CoordinativeComplexity::Interdependent
        );
    }

    #[test]
    fn test_state_change_override_forces_static() {
        let content = "Prices fluctuate wildly and market conditions are volatile, \
                       shifting in real-time as everything evolves.";
        let hints = AnalyzerHints {
            has_state_changes: Some(false),
            ..Default::default()
        };
        let m = analyze_wood_metrics(content, &hints).unwrap();
        assert_eq!(m.dynamic_complexity, DynamicComplexity::Static);
    }

    #[test]
    fn test_state_change_true_forces_high() {
        let hints = AnalyzerHints {
            has_state_changes: Some(true),
            ..Default::default()
        };
        let m = analyze_wood_metrics("Add two numbers.", &hints).unwrap();
        assert_eq!(m.dynamic_complexity, DynamicComplexity::High);
    }

    #[test]
    fn test_state_change_verbs_alone_read_as_low() {
        let m = analyze_wood_metrics(
            "Estimate how the margin changes if costs increase by 10%.",
            &AnalyzerHints::default(),
        )
        .unwrap();
        assert_eq!(m.dynamic_complexity, DynamicComplexity::Low);
    }

    #[test]
    fn test_high_dynamic_needs_repeated_markers() {
        let one_marker = analyze_wood_metrics(
            "Fuel costs fluctuate daily.",
            &AnalyzerHints::default(),
        )
        .unwrap();
        assert_eq!(one_marker.dynamic_complexity, DynamicComplexity::Low);

        let two_markers = analyze_wood_metrics(
            "Fuel costs fluctuate daily and demand is unpredictable.",
            &AnalyzerHints::default(),
        )
        .unwrap();
        assert_eq!(two_markers.dynamic_complexity, DynamicComplexity::High);
    }

    #[test]
    fn test_referential_transparency() {
        let content = "First calculate revenue of $1,000, then determine the margin, \
                       which depends on the cost estimate.";
        let hints = AnalyzerHints::default();
        let a = analyze_wood_metrics(content, &hints).unwrap();
        let b = analyze_wood_metrics(content, &hints).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_monotonic_in_coordinative_level() {
        let base = WoodMetrics {
            distinct_acts: 5,
            information_cues_per_act: 2.0,
            total_elements: 10,
            coordinative_complexity: CoordinativeComplexity::Sequential,
            dynamic_complexity: DynamicComplexity::Static,
            component_complexity_score: 10.0,
        };
        let seq = calculate_wood_score(&base);
        let inter = calculate_wood_score(&WoodMetrics {
            coordinative_complexity: CoordinativeComplexity::Interdependent,
            ..base.clone()
        });
        let net = calculate_wood_score(&WoodMetrics {
            coordinative_complexity: CoordinativeComplexity::Networked,
            ..base
        });
        assert!(seq < inter && inter < net);
    }

    #[test]
    fn test_score_formula() {
        let m = WoodMetrics {
            distinct_acts: 12, // capped at 10
            information_cues_per_act: 6.0, // capped at 5
            total_elements: 72,
            coordinative_complexity: CoordinativeComplexity::Networked,
            dynamic_complexity: DynamicComplexity::High,
            component_complexity_score: 0.0,
        };
        // 10*0.5 + 5 + 5 + 4
        assert_eq!(calculate_wood_score(&m), 19.0);
    }
}
