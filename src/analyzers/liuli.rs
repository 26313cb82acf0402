//! Liu & Li's ten-dimension task complexity model
//!
//! size, variety, ambiguity, relationships, variability, unreliability,
//! incongruity, novelty, action complexity, and time pressure. Every
//! dimension honors the override precedence: explicit value, then structured
//! input, then text heuristic.

use super::{round1, AnalyzerError, AnalyzerHints};
use crate::models::{LiuLiDimensions, NoveltyLevel, TimePressure};
use crate::rules::{self, normalize};
use rustc_hash::FxHashSet;

const MIN_SIZE: u32 = 3;
/// Proxy value when a [0,1] dimension is overridden by an explicit boolean.
const BOOL_PROXY_TRUE: f64 = 0.6;
const BOOL_PROXY_FALSE: f64 = 0.05;
/// Per-item proxy weight when overridden by an explicit list.
const LIST_PROXY_WEIGHT: f64 = 0.2;
/// Content longer than this reads as semi-familiar when no novelty
/// markers fire.
const NOVELTY_LENGTH_FALLBACK: usize = 2000;
const DEFAULT_STEP_WEIGHT: f64 = 2.0;

pub fn analyze_liu_li_dimensions(
    content: &str,
    hints: &AnalyzerHints,
) -> Result<LiuLiDimensions, AnalyzerError> {
    Ok(LiuLiDimensions {
        size: size(content, hints),
        variety: variety(content, hints),
        ambiguity: overridable_dimension(
            content,
            &rules::AMBIGUITY_MARKERS,
            None,
            hints.information_gaps.as_deref(),
        ),
        relationships: relationships(content, hints),
        variability: overridable_dimension(
            content,
            &rules::VARIABILITY_MARKERS,
            hints.has_variable_conditions,
            None,
        ),
        unreliability: overridable_dimension(
            content,
            &rules::UNRELIABILITY_MARKERS,
            hints.has_unreliable_data,
            None,
        ),
        incongruity: overridable_dimension(
            content,
            &rules::INCONGRUITY_MARKERS,
            hints.has_incongruent_data,
            None,
        ),
        novelty: novelty(content),
        action_complexity: action_complexity(content, hints),
        time_pressure: time_pressure(content, hints),
    })
}

/// Weighted linear combination over all ten dimensions.
pub fn calculate_liu_li_score(dims: &LiuLiDimensions) -> f64 {
    let size = (dims.size.min(20)) as f64 * 0.25;
    let action = dims.action_complexity.min(20.0) * 0.25;
    let scaled = dims.variety * 4.0
        + dims.ambiguity * 5.0
        + dims.relationships * 4.0
        + dims.variability * 3.0
        + dims.unreliability * 3.0
        + dims.incongruity * 3.0;
    let novelty = match dims.novelty {
        NoveltyLevel::Routine => 1.0,
        NoveltyLevel::SemiFamiliar => 2.5,
        NoveltyLevel::Novel => 4.0,
    };
    let time = match dims.time_pressure {
        TimePressure::Low => 0.5,
        TimePressure::Moderate => 2.0,
        TimePressure::High => 3.5,
    };
    round1(size + action + scaled + novelty + time)
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn size(content: &str, hints: &AnalyzerHints) -> u32 {
    if let Some(n) = hints.element_count {
        return n.max(MIN_SIZE);
    }
    if let Some(vars) = &hints.variables {
        return (vars.len() as u32).max(MIN_SIZE);
    }
    let distinct = rules::NUMERIC_TOKENS.distinct_matches(content).len() as u32;
    distinct.max(MIN_SIZE)
}

fn variety(content: &str, hints: &AnalyzerHints) -> f64 {
    if let Some(vars) = &hints.variables {
        let typed: Vec<&str> = vars
            .iter()
            .filter_map(|v| v.var_type.as_deref())
            .collect();
        if !typed.is_empty() {
            let unique: FxHashSet<String> = typed.iter().map(|t| normalize(t)).collect();
            return clamp01(unique.len() as f64 / vars.len() as f64);
        }
    }
    let detected = rules::VOCAB_CATEGORIES
        .iter()
        .filter(|set| set.matches_any(content))
        .count();
    detected as f64 / rules::VOCAB_CATEGORIES.len() as f64
}

/// A [0,1] pattern dimension with optional explicit overrides. A non-empty
/// list yields a per-item proxy, an explicit boolean a fixed proxy, and
/// only absent overrides fall through to the text heuristic.
fn overridable_dimension(
    content: &str,
    markers: &rules::RuleSet,
    flag: Option<bool>,
    list: Option<&[String]>,
) -> f64 {
    if let Some(items) = list {
        let n = items.iter().filter(|s| !s.trim().is_empty()).count();
        if n > 0 {
            return clamp01(n as f64 * LIST_PROXY_WEIGHT).max(BOOL_PROXY_TRUE);
        }
        return BOOL_PROXY_FALSE;
    }
    match flag {
        Some(true) => BOOL_PROXY_TRUE,
        Some(false) => BOOL_PROXY_FALSE,
        None => clamp01(markers.weighted_sum(content)),
    }
}

fn relationships(content: &str, hints: &AnalyzerHints) -> f64 {
    let edges = hints.explicit_edges();
    if !edges.is_empty() {
        let mut nodes: FxHashSet<&str> = FxHashSet::default();
        for e in &edges {
            nodes.insert(e.from.as_str());
            nodes.insert(e.to.as_str());
        }
        let n = nodes.len();
        let max_pairs = n * n.saturating_sub(1) / 2;
        if max_pairs == 0 {
            return 0.0;
        }
        return clamp01(edges.len() as f64 / max_pairs as f64);
    }
    clamp01(rules::RELATIONSHIP_LANGUAGE.weighted_sum(content))
}

fn novelty(content: &str) -> NoveltyLevel {
    let novel = rules::NOVEL_MARKERS.match_count(content);
    let semi = rules::SEMI_FAMILIAR_MARKERS.match_count(content);
    let routine = rules::ROUTINE_MARKERS.match_count(content);

    if novel >= 2 {
        NoveltyLevel::Novel
    } else if semi >= 2 {
        NoveltyLevel::SemiFamiliar
    } else if routine >= 1 {
        NoveltyLevel::Routine
    } else if content.len() > NOVELTY_LENGTH_FALLBACK {
        NoveltyLevel::SemiFamiliar
    } else {
        NoveltyLevel::Routine
    }
}

fn action_complexity(content: &str, hints: &AnalyzerHints) -> f64 {
    if let Some(steps) = &hints.calculation_steps {
        return steps
            .iter()
            .map(|s| s.weight.unwrap_or(DEFAULT_STEP_WEIGHT))
            .sum();
    }
    rules::ACTION_VERBS.weighted_sum(content)
}

fn time_pressure(content: &str, hints: &AnalyzerHints) -> TimePressure {
    if let Some(constraint) = &hints.time_constraint {
        if rules::TIME_PRESSURE_HIGH.matches_any(constraint) {
            return TimePressure::High;
        }
        if rules::TIME_PRESSURE_LOW.matches_any(constraint) {
            return TimePressure::Low;
        }
        // An explicit constraint that classifies as neither extreme still
        // implies some pressure.
        return TimePressure::Moderate;
    }
    if rules::TIME_PRESSURE_HIGH.matches_any(content) {
        TimePressure::High
    } else if rules::TIME_PRESSURE_MODERATE.matches_any(content) {
        TimePressure::Moderate
    } else {
        TimePressure::Low
    }
}
