//! Element interactivity analysis (cognitive load theory)
//!
//! Estimates how many scenario elements must be held and processed
//! simultaneously, using the explicit dependency graph when one exists and
//! dependency/simultaneity language otherwise.

use super::{AnalyzerError, AnalyzerHints};
use crate::graph::DependencyGraph;
use crate::models::ElementInteractivityAnalysis;
use crate::rules;
use rustc_hash::FxHashSet;

const MIN_ESTIMATED_ELEMENTS: u32 = 3;
const MIN_SIMULTANEOUS: u32 = 2;
const MAX_ESTIMATED_DEPTH: u32 = 5;
const MAX_ESTIMATED_EDGES: u32 = 15;

/// Wood's `total_elements`, passed in when available so both analyzers agree
/// on the element count. The interactivity analyzer stays independent of the
/// Wood analyzer itself.
pub fn analyze_element_interactivity(
    content: &str,
    hints: &AnalyzerHints,
    wood_total_elements: Option<u32>,
) -> Result<ElementInteractivityAnalysis, AnalyzerError> {
    let total_elements = total_elements(content, hints, wood_total_elements);

    let edges = hints.explicit_edges();
    let (dependency_depth, dependency_edges, graph) = if edges.is_empty() {
        let dep_signals = rules::DEPENDENCY_LANGUAGE.match_count(content) as u32;
        (
            dep_signals.min(MAX_ESTIMATED_DEPTH),
            (dep_signals * 2).min(MAX_ESTIMATED_EDGES),
            None,
        )
    } else {
        let graph = DependencyGraph::from_edges(&edges)?;
        (graph.longest_depth(), graph.edge_count() as u32, Some(graph))
    };

    let simultaneous_elements =
        simultaneous_elements(content, total_elements, dependency_depth, graph.as_ref());

    let interactivity_ratio = if total_elements == 0 {
        0.0
    } else {
        (simultaneous_elements as f64 / total_elements as f64).min(1.0)
    };

    Ok(ElementInteractivityAnalysis {
        total_elements,
        simultaneous_elements,
        interactivity_ratio,
        dependency_depth,
        dependency_edges,
    })
}

pub fn calculate_interactivity_score(analysis: &ElementInteractivityAnalysis) -> f64 {
    let score = analysis.interactivity_ratio * 10.0
        + analysis.dependency_depth.min(5) as f64 * 0.6
        + analysis.dependency_edges.min(10) as f64 * 0.2;
    super::round1(score)
}

/// Precedence chain: explicit count, Wood's total, variable count, unique
/// ids across steps, then a content-based estimate.
fn total_elements(content: &str, hints: &AnalyzerHints, wood_total: Option<u32>) -> u32 {
    if let Some(n) = hints.element_count {
        return n;
    }
    if let Some(n) = wood_total {
        return n;
    }
    if let Some(vars) = &hints.variables {
        if !vars.is_empty() {
            return vars.len() as u32;
        }
    }
    if let Some(steps) = &hints.calculation_steps {
        if !steps.is_empty() {
            let mut ids: FxHashSet<&str> = FxHashSet::default();
            for s in steps {
                ids.insert(s.id.as_str());
                for d in &s.depends_on {
                    ids.insert(d.as_str());
                }
                for o in &s.outputs {
                    ids.insert(o.as_str());
                }
            }
            return ids.len() as u32;
        }
    }

    let numeric = rules::NUMERIC_TOKENS.distinct_matches(content).len();
    let vocab = rules::VOCAB_CATEGORIES
        .iter()
        .map(|set| set.match_count(content))
        .sum::<usize>();
    ((numeric + vocab) as u32).max(MIN_ESTIMATED_ELEMENTS)
}

fn simultaneous_elements(
    content: &str,
    total_elements: u32,
    depth: u32,
    graph: Option<&DependencyGraph>,
) -> u32 {
    let indicator_count = rules::SIMULTANEOUS_LANGUAGE.match_count(content) as u32;

    let estimate = if let Some(graph) = graph {
        // The widest fan-in plus the node itself must be held together
        let fan = graph.max_dependency_count() as u32 + 1;
        let floor = (indicator_count as f64 * 1.5).ceil() as u32;
        fan.max(floor)
    } else if indicator_count >= 3 {
        (total_elements as f64 * 0.7).round() as u32
    } else if indicator_count >= 1 {
        (total_elements as f64 * 0.4).round() as u32
    } else {
        let normalized_depth = (depth as f64 / 5.0).min(0.5);
        (normalized_depth * total_elements as f64).round() as u32
    };

    estimate.max(MIN_SIMULTANEOUS)
}
