//! Campbell's four sources of task complexity
//!
//! Multiple paths, multiple outcomes, conflicting interdependence, and
//! uncertain linkages. Each source resolves by priority: explicit boolean
//! override, then explicit structured list, then pattern heuristic.

use super::{AnalyzerError, AnalyzerHints};
use crate::models::{CampbellAttributes, UncertaintyLevel};
use crate::rules::{self, normalize, RuleSet};
use rustc_hash::FxHashSet;

const MAX_CONFLICT_EXCERPTS: usize = 5;
const EXCERPT_BEFORE: usize = 30;
const EXCERPT_AFTER: usize = 50;

pub fn analyze_campbell_attributes(
    content: &str,
    hints: &AnalyzerHints,
) -> Result<CampbellAttributes, AnalyzerError> {
    let (multiple_paths, path_count) = resolve_source(
        content,
        hints.has_multiple_paths,
        hints.candidate_approaches.as_deref(),
        &rules::PATH_INDICATORS,
    );
    let (multiple_outcomes, outcome_count) = resolve_source(
        content,
        hints.has_multiple_outcomes,
        hints.candidate_outcomes.as_deref(),
        &rules::OUTCOME_INDICATORS,
    );

    let conflicts = extract_conflicts(content, hints);
    let conflict_matches = rules::CONFLICT_INDICATORS.match_count(content);
    let conflicting_interdependence = hints
        .has_conflicting_interdependence
        .unwrap_or(conflict_matches >= 2 || !conflicts.is_empty());

    let high = rules::UNCERTAINTY_HIGH.match_count(content) as u32;
    let bounded = rules::UNCERTAINTY_BOUNDED.match_count(content) as u32;
    let uncertainty_level = if high >= 2 {
        UncertaintyLevel::High
    } else if high >= 1 || bounded >= 2 {
        UncertaintyLevel::Bounded
    } else {
        UncertaintyLevel::None
    };

    let campbell_type = encode_type(
        multiple_paths,
        multiple_outcomes,
        conflicting_interdependence,
        uncertainty_level != UncertaintyLevel::None,
    );

    Ok(CampbellAttributes {
        multiple_paths,
        multiple_outcomes,
        conflicting_interdependence,
        path_count,
        outcome_count,
        conflicts,
        uncertainty_level,
        uncertainty_indicators: high + bounded,
        campbell_type,
    })
}

pub fn calculate_campbell_score(attrs: &CampbellAttributes) -> f64 {
    let mut score = 0.0;
    if attrs.multiple_paths {
        score += 3.0 + (attrs.path_count.saturating_sub(1)).min(3) as f64;
    }
    if attrs.multiple_outcomes {
        score += 3.0 + (attrs.outcome_count.saturating_sub(1)).min(3) as f64;
    }
    if attrs.conflicting_interdependence {
        score += 4.0 + (attrs.conflicts.len().min(3)) as f64;
    }
    score += match attrs.uncertainty_level {
        UncertaintyLevel::None => 0.0,
        UncertaintyLevel::Bounded => 3.0,
        UncertaintyLevel::High => 5.0,
    };
    score
}

/// 4-bit encoding: paths=8, outcomes=4, conflict=2, uncertainty=1.
fn encode_type(paths: bool, outcomes: bool, conflict: bool, uncertainty: bool) -> u8 {
    (u8::from(paths) << 3) | (u8::from(outcomes) << 2) | (u8::from(conflict) << 1) | u8::from(uncertainty)
}

/// Resolve one paths/outcomes source: boolean override beats explicit list
/// beats pattern heuristic. Returns (detected, count >= 1).
fn resolve_source(
    content: &str,
    explicit: Option<bool>,
    list: Option<&[String]>,
    patterns: &RuleSet,
) -> (bool, u32) {
    let distinct_list = list.map(|items| {
        items
            .iter()
            .map(|s| normalize(s))
            .filter(|s| !s.is_empty())
            .collect::<FxHashSet<_>>()
            .len() as u32
    });

    let (detected, count) = match (explicit, distinct_list) {
        (Some(flag), list_count) => (flag, list_count.unwrap_or(0)),
        (None, Some(n)) => (n >= 2, n),
        (None, None) => {
            let matches = patterns.match_count(content) as u32;
            (matches >= 2, matches)
        }
    };

    if detected {
        (true, count.max(2))
    } else {
        (false, 1)
    }
}

/// Conflict excerpts: explicit trade-offs win; otherwise context windows
/// around the first few conflict-pattern matches, deduplicated.
fn extract_conflicts(content: &str, hints: &AnalyzerHints) -> Vec<String> {
    if let Some(trade_offs) = &hints.trade_offs {
        let mut seen = FxHashSet::default();
        return trade_offs
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(normalize(s)))
            .take(MAX_CONFLICT_EXCERPTS)
            .collect();
    }

    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    for (start, end) in rules::CONFLICT_INDICATORS.match_ranges(content, 3) {
        let window = rules::context_window(content, start, end, EXCERPT_BEFORE, EXCERPT_AFTER);
        if seen.insert(normalize(&window)) {
            out.push(window);
        }
        if out.len() >= MAX_CONFLICT_EXCERPTS {
            break;
        }
    }
    out
}
