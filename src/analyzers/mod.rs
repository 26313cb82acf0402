//! Framework analyzers
//!
//! Four mutually independent analyzers, each a pure function of raw text
//! plus optional structured hints. No I/O, no shared state: identical inputs
//! always produce identical metrics. Failures surface as an explicit
//! `AnalyzerError` which the validation engine maps to a zero-score result;
//! analyzers never panic on malformed content.

pub mod campbell;
pub mod interactivity;
pub mod liuli;
pub mod wood;

pub use campbell::{analyze_campbell_attributes, calculate_campbell_score};
pub use interactivity::{analyze_element_interactivity, calculate_interactivity_score};
pub use liuli::{analyze_liu_li_dimensions, calculate_liu_li_score};
pub use wood::{analyze_wood_metrics, calculate_wood_score};

use crate::graph::GraphError;
use crate::models::{CalculationStep, DependencyEdge, ScenarioVariable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error while deriving metrics from malformed input. Recovered at the
/// validation-engine boundary, never propagated to public callers.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid structured hint: {0}")]
    InvalidHint(String),
    #[error("dependency graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Optional structured hints accompanying scenario text. Every field
/// overrides the corresponding text heuristic when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerHints {
    pub calculation_steps: Option<Vec<CalculationStep>>,
    pub variables: Option<Vec<ScenarioVariable>>,
    pub dependency_edges: Option<Vec<DependencyEdge>>,
    pub element_count: Option<u32>,
    pub has_conditionals: Option<bool>,
    pub has_state_changes: Option<bool>,
    pub has_multiple_paths: Option<bool>,
    pub has_multiple_outcomes: Option<bool>,
    pub has_conflicting_interdependence: Option<bool>,
    pub candidate_approaches: Option<Vec<String>>,
    pub candidate_outcomes: Option<Vec<String>>,
    pub trade_offs: Option<Vec<String>>,
    pub information_gaps: Option<Vec<String>>,
    pub has_variable_conditions: Option<bool>,
    pub has_unreliable_data: Option<bool>,
    pub has_incongruent_data: Option<bool>,
    pub time_constraint: Option<String>,
    pub domain: Option<String>,
}

impl AnalyzerHints {
    /// All explicit dependency edges: supplied relationships, then variable
    /// dependencies, then step dependencies. Empty when nothing structured
    /// was given.
    pub fn explicit_edges(&self) -> Vec<DependencyEdge> {
        let mut edges = Vec::new();
        if let Some(rels) = &self.dependency_edges {
            edges.extend(rels.iter().cloned());
        }
        if let Some(vars) = &self.variables {
            for v in vars {
                for dep in &v.depends_on {
                    edges.push(DependencyEdge {
                        from: v.name.clone(),
                        to: dep.clone(),
                    });
                }
            }
        }
        if let Some(steps) = &self.calculation_steps {
            for s in steps {
                for dep in &s.depends_on {
                    edges.push(DependencyEdge {
                        from: s.id.clone(),
                        to: dep.clone(),
                    });
                }
            }
        }
        edges
    }
}

/// Round to 1 decimal place, the precision every framework score reports.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round1(3.15), 3.2);
        assert_eq!(round1(10.0), 10.0);
    }

    #[test]
    fn test_explicit_edges_merges_sources() {
        let hints = AnalyzerHints {
            dependency_edges: Some(vec![DependencyEdge {
                from: "x".into(),
                to: "y".into(),
            }]),
            variables: Some(vec![ScenarioVariable {
                name: "margin".into(),
                var_type: None,
                depends_on: vec!["revenue".into(), "cost".into()],
            }]),
            calculation_steps: Some(vec![CalculationStep {
                id: "s2".into(),
                description: "total".into(),
                depends_on: vec!["s1".into()],
                outputs: vec![],
                weight: None,
            }]),
            ..Default::default()
        };
        let edges = hints.explicit_edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0].from, "x");
        assert_eq!(edges[1].from, "margin");
        assert_eq!(edges[3].to, "s1");
    }

    #[test]
    fn test_explicit_edges_empty_for_default_hints() {
        assert!(AnalyzerHints::default().explicit_edges().is_empty());
    }
}
