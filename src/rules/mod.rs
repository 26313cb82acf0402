//! Heuristic rule tables
//!
//! Every regex heuristic in the analyzers lives here as data: a named rule
//! set of (pattern, weight) entries, compiled once on first use. Scoring
//! logic folds over these tables instead of embedding literals, so each rule
//! can be unit-tested independently and a locale/domain swap never touches
//! control flow.
//!
//! All patterns are matched case-insensitively.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Bump when rule tables change; carried into `analyzer_version`.
pub const RULESET_VERSION: &str = "2026.08";

/// One heuristic rule: a regex pattern with a per-match weight.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub weight: f64,
}

/// A named table of rules, compiled lazily.
pub struct RuleSet {
    name: &'static str,
    rules: &'static [Rule],
    compiled: OnceLock<Vec<Regex>>,
}

impl RuleSet {
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            rules,
            compiled: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    fn compiled(&self) -> &[Regex] {
        self.compiled.get_or_init(|| {
            self.rules
                .iter()
                .map(|r| {
                    Regex::new(&format!("(?i){}", r.pattern))
                        .unwrap_or_else(|e| panic!("invalid rule {}/{}: {e}", self.name, r.name))
                })
                .collect()
        })
    }

    /// Total number of matches across all rules.
    pub fn match_count(&self, text: &str) -> usize {
        self.compiled().iter().map(|re| re.find_iter(text).count()).sum()
    }

    /// Sum of rule weights over every match.
    pub fn weighted_sum(&self, text: &str) -> f64 {
        self.compiled()
            .iter()
            .zip(self.rules)
            .map(|(re, rule)| re.find_iter(text).count() as f64 * rule.weight)
            .sum()
    }

    pub fn matches_any(&self, text: &str) -> bool {
        self.compiled().iter().any(|re| re.is_match(text))
    }

    /// Deduplicated matched strings, case/whitespace-normalized.
    pub fn distinct_matches(&self, text: &str) -> FxHashSet<String> {
        let mut seen = FxHashSet::default();
        for re in self.compiled() {
            for m in re.find_iter(text) {
                seen.insert(normalize(m.as_str()));
            }
        }
        seen
    }

    /// Byte ranges of the first `limit` matches, in rule order then text order.
    pub fn match_ranges(&self, text: &str, limit: usize) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        'outer: for re in self.compiled() {
            for m in re.find_iter(text) {
                ranges.push((m.start(), m.end()));
                if ranges.len() >= limit {
                    break 'outer;
                }
            }
        }
        ranges
    }

    /// Trimmed, deduplicated matched excerpts, capped at `limit`.
    pub fn match_excerpts(&self, text: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        'outer: for re in self.compiled() {
            for m in re.find_iter(text) {
                let excerpt = m.as_str().trim().to_string();
                if seen.insert(normalize(&excerpt)) {
                    out.push(excerpt);
                    if out.len() >= limit {
                        break 'outer;
                    }
                }
            }
        }
        out
    }
}

/// Lowercase + collapse whitespace, for dedup keys.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Slice a char-boundary-safe context window of `before`/`after` bytes
/// around a match range.
pub fn context_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> String {
    let mut lo = start.saturating_sub(before);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + after).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].trim().to_string()
}

macro_rules! rules {
    ($($name:literal => $pattern:literal @ $weight:literal),* $(,)?) => {
        &[$(Rule { name: $name, pattern: $pattern, weight: $weight }),*]
    };
}

// ---------------------------------------------------------------------------
// Wood framework
// ---------------------------------------------------------------------------

/// Verbs that signal a distinct calculation act.
pub static CALCULATION_VERBS: RuleSet = RuleSet::new(
    "calculation_verbs",
    rules![
        "calculate" => r"\bcalculat\w*" @ 1.0,
        "compute" => r"\bcomput\w*" @ 1.0,
        "determine" => r"\bdetermin\w*" @ 1.0,
        "derive" => r"\bderiv\w*" @ 1.0,
        "estimate" => r"\bestimat\w*" @ 1.0,
        "sum" => r"\bsum\b" @ 1.0,
        "add" => r"\badd\b" @ 1.0,
        "subtract" => r"\bsubtract\w*" @ 1.0,
        "multiply" => r"\bmultipl\w*" @ 1.0,
        "divide" => r"\bdivid\w*" @ 1.0,
        "project" => r"\bproject\w*\s+(?:the|a|an|forward)" @ 1.0,
        "discount" => r"\bdiscount\w*" @ 1.0,
        "allocate" => r"\ballocat\w*" @ 1.0,
        "reconcile" => r"\breconcil\w*" @ 1.0,
        "amortize" => r"\bamorti[sz]\w*" @ 1.0,
    ],
);

/// Numbered list items (`1.`, `2)`, ...)
pub static NUMBERED_ITEMS: RuleSet = RuleSet::new(
    "numbered_items",
    rules!["numbered" => r"(?m)^\s*\d{1,2}[.)]\s+" @ 1.0],
);

/// Bullet list items. Weighted 0.7 since not all bullets are actions.
pub static BULLET_ITEMS: RuleSet = RuleSet::new(
    "bullet_items",
    rules!["bullet" => r"(?m)^\s*[-*\u{2022}]\s+" @ 0.7],
);

/// Information cue families: each match is one cue candidate, deduplicated
/// across families before counting.
pub static INFORMATION_CUES: RuleSet = RuleSet::new(
    "information_cues",
    rules![
        "currency" => r"\$\s?\d+(?:,\d{3})*(?:\.\d+)?\s?(?:[kmb]\b|million|billion|thousand)?" @ 1.0,
        "currency_word" => r"\d+(?:,\d{3})*(?:\.\d+)?\s?(?:dollars|euros|pounds|usd|eur|gbp)\b" @ 1.0,
        "percentage" => r"\d+(?:\.\d+)?\s?(?:%|percent\b)" @ 1.0,
        "time_span" => r"\d+(?:\.\d+)?[-\s]?(?:years?|months?|quarters?|weeks?|days?|hours?)\b" @ 1.0,
        "ratio" => r"\d+(?:\.\d+)?\s?(?::|-to-|\bto\b|x)\s?\d+(?:\.\d+)?" @ 1.0,
        "financial_figure" => r"(?:revenue|cost|profit|margin|rate|interest|tax|depreciation|principal|budget)s?\s+of\s+\$?\d+(?:,\d{3})*(?:\.\d+)?" @ 1.0,
        "quantity" => r"\d+(?:,\d{3})*\s?(?:units?|items?|employees?|customers?|shares?|orders?|products?|stores?)\b" @ 1.0,
        "value" => r"(?:value|amount|total|balance|price)\s+(?:of\s+)?\$?\d+(?:,\d{3})*(?:\.\d+)?" @ 1.0,
    ],
);

/// Networked coordination language (acts form a web, not a chain).
pub static NETWORKED_COORDINATION: RuleSet = RuleSet::new(
    "networked_coordination",
    rules![
        "mutual_dependence" => r"\b(?:each|all)\s+\w+\s+(?:depends?\s+on|affects?)\b" @ 1.0,
        "feedback_loop" => r"feedback\s+loops?" @ 1.0,
        "interdependent" => r"\binterdependen\w*" @ 1.0,
        "circular" => r"\bcircular\w*" @ 1.0,
        "network" => r"\bnetwork\s+of\b" @ 1.0,
        "mutually" => r"\bmutually\b" @ 1.0,
        "interrelated" => r"\binterrelat\w*" @ 1.0,
        "web_of" => r"\bweb\s+of\b" @ 1.0,
    ],
);

/// Interdependent coordination language (later acts consume earlier outputs).
pub static INTERDEPENDENT_COORDINATION: RuleSet = RuleSet::new(
    "interdependent_coordination",
    rules![
        "depends_on" => r"\bdepends?\s+on\b" @ 1.0,
        "based_on_result" => r"based\s+on\s+(?:the|that|this)\s+(?:result|answer|figure|total|output)" @ 1.0,
        "using_result" => r"using\s+the\s+(?:result|output|total|value)s?" @ 1.0,
        "requires_the" => r"\brequires?\s+the\b" @ 1.0,
        "before_you_can" => r"before\s+(?:you|we|one)\s+can\b" @ 1.0,
        "feeds_into" => r"\bfeeds?\s+into\b" @ 1.0,
        "carry_forward" => r"\bcarr(?:y|ied|ies)\s+(?:forward|over)\b" @ 1.0,
        "derived_from" => r"\bderived\s+from\b" @ 1.0,
    ],
);

/// Sequential coordination language (plain ordered steps).
pub static SEQUENTIAL_COORDINATION: RuleSet = RuleSet::new(
    "sequential_coordination",
    rules![
        "first" => r"\bfirst\b" @ 1.0,
        "then" => r"\bthen\b" @ 1.0,
        "next" => r"\bnext\b" @ 1.0,
        "after" => r"\bafter(?:wards?)?\b" @ 1.0,
        "finally" => r"\bfinally\b" @ 1.0,
        "step_n" => r"\bstep\s+\d" @ 1.0,
        "subsequently" => r"\bsubsequently\b" @ 1.0,
        "followed_by" => r"\bfollowed\s+by\b" @ 1.0,
    ],
);

/// High dynamic complexity: the task environment shifts mid-task.
pub static DYNAMIC_HIGH: RuleSet = RuleSet::new(
    "dynamic_high",
    rules![
        "changes_over_time" => r"changes?\s+over\s+time" @ 1.0,
        "fluctuate" => r"\bfluctuat\w*" @ 1.0,
        "volatile" => r"\bvolatil\w*" @ 1.0,
        "unpredictable" => r"\bunpredictab\w*" @ 1.0,
        "shifting" => r"\bshifting\b" @ 1.0,
        "evolve" => r"\bevolv\w*" @ 1.0,
        "real_time" => r"\breal[-\s]time\b" @ 1.0,
        "midway_change" => r"\bmid[-\s]?way\b|\bpartway\s+through\b" @ 1.0,
        "revised" => r"\brevis(?:ed|ion)\b" @ 1.0,
    ],
);

/// Low dynamic complexity: mild change language.
pub static DYNAMIC_LOW: RuleSet = RuleSet::new(
    "dynamic_low",
    rules![
        "updated" => r"\bupdat\w*" @ 1.0,
        "adjust" => r"\badjust\w*" @ 1.0,
        "may_change" => r"\bmay\s+change\b" @ 1.0,
        "periodically" => r"\bperiodical\w*" @ 1.0,
        "grows" => r"\bgrow(?:s|th|ing)\b" @ 1.0,
        "declines" => r"\bdeclin\w*" @ 1.0,
        "trend" => r"\btrend\w*" @ 1.0,
        "seasonal" => r"\bseason\w*" @ 1.0,
    ],
);

// ---------------------------------------------------------------------------
// Campbell framework
// ---------------------------------------------------------------------------

/// Multiple-path indicators.
pub static PATH_INDICATORS: RuleSet = RuleSet::new(
    "path_indicators",
    rules![
        "alternative" => r"\balternativ\w*" @ 1.0,
        "option" => r"\boptions?\b" @ 1.0,
        "either" => r"\beither\b" @ 1.0,
        "approach" => r"\bapproach(?:es)?\b" @ 1.0,
        "method" => r"\bmethods?\b" @ 1.0,
        "could_instead" => r"\bcould\s+(?:also|instead)\b" @ 1.0,
        "multiple_ways" => r"multiple\s+ways" @ 1.0,
        "choose" => r"\bchoos\w*|\bchoice\b" @ 1.0,
        "strategy" => r"\bstrateg(?:y|ies)\b" @ 1.0,
    ],
);

/// Multiple-outcome indicators.
pub static OUTCOME_INDICATORS: RuleSet = RuleSet::new(
    "outcome_indicators",
    rules![
        "outcome" => r"\boutcomes?\b" @ 1.0,
        "result_in" => r"\bresults?\s+in\b" @ 1.0,
        "scenario" => r"\bscenarios?\b" @ 1.0,
        "best_case" => r"best[-\s]case" @ 1.0,
        "worst_case" => r"worst[-\s]case" @ 1.0,
        "depending_on" => r"\bdepending\s+on\b" @ 1.0,
        "may_lead_to" => r"\b(?:may|might|could)\s+lead\s+to\b" @ 1.0,
        "range_of" => r"\brange\s+of\s+(?:possible|potential)\b" @ 1.0,
    ],
);

/// Conflicting-interdependence indicators.
pub static CONFLICT_INDICATORS: RuleSet = RuleSet::new(
    "conflict_indicators",
    rules![
        "trade_off" => r"\btrade[-\s]?offs?\b" @ 1.0,
        "conflict" => r"\bconflict\w*" @ 1.0,
        "competing" => r"\bcompeting\b" @ 1.0,
        "tension" => r"\btension\b" @ 1.0,
        "at_the_expense" => r"at\s+the\s+expense\s+of" @ 1.0,
        "balance_against" => r"\bbalanc\w*\s+\w+\s+against\b" @ 1.0,
        "sacrifice" => r"\bsacrific\w*" @ 1.0,
        "mutually_exclusive" => r"mutually\s+exclusive" @ 1.0,
        "cannot_both" => r"\bcan(?:no|')t\s+(?:do\s+)?both\b" @ 1.0,
        "on_the_other_hand" => r"on\s+the\s+other\s+hand" @ 1.0,
    ],
);

/// Bounded uncertainty: estimable unknowns.
pub static UNCERTAINTY_BOUNDED: RuleSet = RuleSet::new(
    "uncertainty_bounded",
    rules![
        "estimate" => r"\bestimat\w*" @ 1.0,
        "approximately" => r"\bapproximat\w*" @ 1.0,
        "around" => r"\baround\s+\$?\d" @ 1.0,
        "roughly" => r"\broughly\b" @ 1.0,
        "expected" => r"\bexpect\w*" @ 1.0,
        "likely" => r"\blikely\b" @ 1.0,
        "probable" => r"\bprobab\w*" @ 1.0,
        "assume" => r"\bassum\w*" @ 1.0,
        "forecast" => r"\bforecast\w*" @ 1.0,
    ],
);

/// High uncertainty: unknowable linkages.
pub static UNCERTAINTY_HIGH: RuleSet = RuleSet::new(
    "uncertainty_high",
    rules![
        "unknown" => r"\bunknown\b" @ 1.0,
        "uncertain" => r"\buncertain\w*" @ 1.0,
        "unclear" => r"\bunclear\b" @ 1.0,
        "unpredictable" => r"\bunpredictab\w*" @ 1.0,
        "no_reliable" => r"no\s+reliable\b" @ 1.0,
        "cannot_determine" => r"cannot\s+be\s+(?:determined|known|predicted)" @ 1.0,
        "ambiguous" => r"\bambiguous\b" @ 1.0,
        "speculative" => r"\bspeculat\w*" @ 1.0,
        "no_historical" => r"no\s+(?:historical|prior|past)\s+data" @ 1.0,
    ],
);

// ---------------------------------------------------------------------------
// Liu & Li framework
// ---------------------------------------------------------------------------

/// Distinct numeric/currency/percentage tokens, for the size dimension.
pub static NUMERIC_TOKENS: RuleSet = RuleSet::new(
    "numeric_tokens",
    rules!["numeric" => r"\$?\d+(?:,\d{3})*(?:\.\d+)?%?" @ 1.0],
);

pub static FINANCIAL_VOCAB: RuleSet = RuleSet::new(
    "financial_vocab",
    rules![
        "financial" => r"\b(?:revenue|profit|cash\s+flow|interest|loan|investment|dividend|equity|debt|capital)\b" @ 1.0,
    ],
);

pub static ACCOUNTING_VOCAB: RuleSet = RuleSet::new(
    "accounting_vocab",
    rules![
        "accounting" => r"\b(?:ledger|depreciation|accrual|balance\s+sheet|journal|amorti[sz]ation|payable|receivable|audit|expense)\b" @ 1.0,
    ],
);

pub static STATISTICAL_VOCAB: RuleSet = RuleSet::new(
    "statistical_vocab",
    rules![
        "statistical" => r"\b(?:average|mean|median|variance|deviation|correlation|regression|distribution|probability|percentile)\b" @ 1.0,
    ],
);

pub static OPERATIONAL_VOCAB: RuleSet = RuleSet::new(
    "operational_vocab",
    rules![
        "operational" => r"\b(?:inventory|production|capacity|throughput|supply|logistics|headcount|utili[sz]ation|schedule|warehouse)\b" @ 1.0,
    ],
);

pub static VALUATION_VOCAB: RuleSet = RuleSet::new(
    "valuation_vocab",
    rules![
        "valuation" => r"\b(?:valuation|npv|present\s+value|discount\s+rate|irr|wacc|terminal\s+value|fair\s+value|multiple\s+of\s+earnings)\b" @ 1.0,
    ],
);

/// The five domain vocabulary categories behind the variety dimension.
pub static VOCAB_CATEGORIES: [&RuleSet; 5] = [
    &FINANCIAL_VOCAB,
    &ACCOUNTING_VOCAB,
    &STATISTICAL_VOCAB,
    &OPERATIONAL_VOCAB,
    &VALUATION_VOCAB,
];

pub static AMBIGUITY_MARKERS: RuleSet = RuleSet::new(
    "ambiguity_markers",
    rules![
        "unclear" => r"\bunclear\b" @ 0.15,
        "ambiguous" => r"\bambiguous\b" @ 0.15,
        "vague" => r"\bvague\b" @ 0.15,
        "not_specified" => r"not\s+(?:specified|stated|given)" @ 0.15,
        "somewhat" => r"\bsome(?:how|what)\b" @ 0.1,
        "interpret" => r"\binterpret\w*" @ 0.1,
        "may_or_may_not" => r"may\s+or\s+may\s+not" @ 0.15,
        "possibly" => r"\bpossibl[ey]\b" @ 0.1,
    ],
);

pub static VARIABILITY_MARKERS: RuleSet = RuleSet::new(
    "variability_markers",
    rules![
        "varies" => r"\bvar(?:y|ies|ying)\b" @ 0.15,
        "fluctuate" => r"\bfluctuat\w*" @ 0.15,
        "ranges" => r"\brange[sd]?\s+(?:from|between)\b" @ 0.1,
        "seasonal" => r"\bseasonal\w*" @ 0.15,
        "different_each" => r"different\s+(?:each|every)" @ 0.15,
        "inconsistent" => r"\binconsistent\w*" @ 0.1,
        "month_to_month" => r"month[-\s]to[-\s]month" @ 0.15,
    ],
);

pub static UNRELIABILITY_MARKERS: RuleSet = RuleSet::new(
    "unreliability_markers",
    rules![
        "unreliable" => r"\bunreliable\b" @ 0.15,
        "incomplete" => r"\bincomplete\b" @ 0.15,
        "missing" => r"\bmissing\b" @ 0.15,
        "outdated" => r"\boutdated\b" @ 0.15,
        "unverified" => r"\bunverified\b" @ 0.15,
        "reportedly" => r"\breported(?:ly)?\b" @ 0.1,
        "claims" => r"\bclaim(?:s|ed)\b" @ 0.1,
        "rough" => r"\brough(?:ly)?\b" @ 0.1,
    ],
);

pub static INCONGRUITY_MARKERS: RuleSet = RuleSet::new(
    "incongruity_markers",
    rules![
        "contradict" => r"\bcontradict\w*" @ 0.15,
        "discrepancy" => r"\bdiscrepanc\w*" @ 0.15,
        "mismatch" => r"\bmismatch\w*" @ 0.15,
        "conflicting_data" => r"conflicting\s+(?:data|figures|numbers|reports)" @ 0.15,
        "doesnt_add_up" => r"doesn'?t\s+(?:add\s+up|match|agree)" @ 0.15,
        "differs_from" => r"\bdiffers?\s+from\b" @ 0.1,
        "inconsistent_with" => r"inconsistent\s+with" @ 0.15,
    ],
);

pub static RELATIONSHIP_LANGUAGE: RuleSet = RuleSet::new(
    "relationship_language",
    rules![
        "depends_on" => r"\bdepends?\s+on\b" @ 0.15,
        "linked" => r"\blink(?:ed|s)?\s+to\b" @ 0.1,
        "related_to" => r"\brelated\s+to\b" @ 0.1,
        "affects" => r"\baffects?\b" @ 0.15,
        "influences" => r"\binfluenc\w*" @ 0.15,
        "correlated" => r"\bcorrelat\w*" @ 0.15,
        "drives" => r"\bdrives?\b" @ 0.1,
        "function_of" => r"\bfunction\s+of\b" @ 0.15,
        "tied_to" => r"\btied\s+to\b" @ 0.1,
    ],
);

pub static NOVEL_MARKERS: RuleSet = RuleSet::new(
    "novel_markers",
    rules![
        "never_before" => r"never\s+(?:before|previously)" @ 1.0,
        "unprecedented" => r"\bunprecedented\b" @ 1.0,
        "new_kind" => r"new\s+(?:type|kind|market|product|venture)" @ 1.0,
        "first_time" => r"first\s+time" @ 1.0,
        "unfamiliar" => r"\bunfamiliar\b" @ 1.0,
        "novel" => r"\bnovel\b" @ 1.0,
        "emerging" => r"\bemerging\b" @ 1.0,
        "untested" => r"\buntested\b" @ 1.0,
    ],
);

pub static SEMI_FAMILIAR_MARKERS: RuleSet = RuleSet::new(
    "semi_familiar_markers",
    rules![
        "similar_to" => r"similar\s+to" @ 1.0,
        "variant" => r"\bvariant\b|\bvariation\s+of\b" @ 1.0,
        "adapted" => r"\badapted\b" @ 1.0,
        "unusual" => r"\bunusual\b" @ 1.0,
        "modified" => r"\bmodified\b" @ 1.0,
        "atypical" => r"\batypical\b" @ 1.0,
        "less_common" => r"less\s+common" @ 1.0,
        "with_a_twist" => r"with\s+a\s+twist" @ 1.0,
    ],
);

pub static ROUTINE_MARKERS: RuleSet = RuleSet::new(
    "routine_markers",
    rules![
        "standard" => r"\bstandard\b" @ 1.0,
        "typical" => r"\btypical\b" @ 1.0,
        "routine" => r"\broutine\b" @ 1.0,
        "usual" => r"\busual\b" @ 1.0,
        "common" => r"\bcommon\b" @ 1.0,
        "straightforward" => r"\bstraightforward\b" @ 1.0,
        "basic" => r"\bbasic\b" @ 1.0,
        "simple" => r"\bsimple\b" @ 1.0,
        "textbook" => r"\btextbook\b" @ 1.0,
    ],
);

/// Action verb table: per-occurrence weights 1-4 by cognitive demand.
pub static ACTION_VERBS: RuleSet = RuleSet::new(
    "action_verbs",
    rules![
        "add" => r"\badd\b" @ 1.0,
        "subtract" => r"\bsubtract\w*" @ 1.0,
        "sum" => r"\bsum\b" @ 1.0,
        "count" => r"\bcount\b" @ 1.0,
        "calculate" => r"\bcalculat\w*" @ 2.0,
        "compute" => r"\bcomput\w*" @ 2.0,
        "determine" => r"\bdetermin\w*" @ 2.0,
        "compare" => r"\bcompar\w*" @ 2.0,
        "analyze" => r"\banaly[sz]\w*" @ 3.0,
        "evaluate" => r"\bevaluat\w*" @ 3.0,
        "assess" => r"\bassess\w*" @ 3.0,
        "reconcile" => r"\breconcil\w*" @ 3.0,
        "forecast" => r"\bforecast\w*" @ 3.0,
        "optimize" => r"\boptimi[sz]\w*" @ 4.0,
        "synthesize" => r"\bsynthesi[sz]\w*" @ 4.0,
        "model" => r"\bmodel(?:s|ing|led)?\b" @ 4.0,
        "design" => r"\bdesign\w*" @ 4.0,
        "strategize" => r"\bstrategi[sz]\w*" @ 4.0,
    ],
);

pub static TIME_PRESSURE_HIGH: RuleSet = RuleSet::new(
    "time_pressure_high",
    rules![
        "immediately" => r"\bimmediately\b" @ 1.0,
        "urgent" => r"\burgent\w*" @ 1.0,
        "end_of_day" => r"by\s+(?:the\s+)?end\s+of\s+(?:the\s+)?day" @ 1.0,
        "within_hour" => r"within\s+(?:the\s+|an?\s+)?hours?" @ 1.0,
        "deadline_now" => r"deadline\s+(?:is\s+)?(?:today|tomorrow)" @ 1.0,
        "asap" => r"\basap\b|as\s+soon\s+as\s+possible" @ 1.0,
        "time_critical" => r"time[-\s]critical" @ 1.0,
        "before_meeting" => r"before\s+the\s+meeting" @ 1.0,
    ],
);

pub static TIME_PRESSURE_MODERATE: RuleSet = RuleSet::new(
    "time_pressure_moderate",
    rules![
        "by_weekday" => r"by\s+(?:next\s+)?(?:monday|tuesday|wednesday|thursday|friday|week)" @ 1.0,
        "within_days" => r"within\s+\d+\s+(?:business\s+)?(?:days?|weeks?)" @ 1.0,
        "quarter_deadline" => r"(?:quarterly|quarter[-\s]end|month[-\s]end)\s+deadline" @ 1.0,
        "due_by" => r"\bdue\s+(?:by|on|in)\b" @ 1.0,
        "soon" => r"\bsoon\b" @ 1.0,
    ],
);

pub static TIME_PRESSURE_LOW: RuleSet = RuleSet::new(
    "time_pressure_low",
    rules![
        "no_rush" => r"no\s+rush" @ 1.0,
        "whenever" => r"when(?:ever)?\s+(?:convenient|possible|you\s+have\s+time)" @ 1.0,
        "eventually" => r"\beventually\b" @ 1.0,
        "no_deadline" => r"no\s+(?:deadline|time\s+limit)" @ 1.0,
        "annual" => r"\bannual(?:ly)?\b" @ 1.0,
    ],
);

// ---------------------------------------------------------------------------
// Element interactivity
// ---------------------------------------------------------------------------

pub static DEPENDENCY_LANGUAGE: RuleSet = RuleSet::new(
    "dependency_language",
    rules![
        "depends_on" => r"\bdepends?\s+on\b" @ 1.0,
        "requires" => r"\brequires?\b" @ 1.0,
        "based_on" => r"\bbased\s+on\b" @ 1.0,
        "derived_from" => r"\bderived\s+from\b" @ 1.0,
        "input_to" => r"\binput\s+to\b" @ 1.0,
        "feeds" => r"\bfeeds?\b" @ 1.0,
        "prerequisite" => r"\bprerequisite\w*" @ 1.0,
        "after_calculating" => r"after\s+(?:calculating|computing|determining)" @ 1.0,
        "using_result" => r"using\s+the\s+(?:result|output|total)" @ 1.0,
    ],
);

pub static SIMULTANEOUS_LANGUAGE: RuleSet = RuleSet::new(
    "simultaneous_language",
    rules![
        "simultaneously" => r"\bsimultaneous\w*" @ 1.0,
        "at_the_same_time" => r"at\s+the\s+same\s+time" @ 1.0,
        "concurrently" => r"\bconcurrent\w*" @ 1.0,
        "while_also" => r"while\s+(?:also|keeping|tracking)" @ 1.0,
        "in_parallel" => r"in\s+parallel" @ 1.0,
        "juggle" => r"\bjuggl\w*" @ 1.0,
        "keep_track" => r"keep\s+track\s+of" @ 1.0,
        "balance_multiple" => r"\bbalanc\w*\s+(?:multiple|several|all)\b" @ 1.0,
        "all_at_once" => r"all\s+at\s+once" @ 1.0,
        "hold_in_mind" => r"\bhold\b[^.!?\n]{0,30}\bin\s+mind\b" @ 1.0,
    ],
);

// ---------------------------------------------------------------------------
// Validation engine text extraction
// ---------------------------------------------------------------------------

pub static CONDITIONAL_MARKERS: RuleSet = RuleSet::new(
    "conditional_markers",
    rules![
        "if" => r"\bif\b" @ 1.0,
        "unless" => r"\bunless\b" @ 1.0,
        "in_case" => r"in\s+case\b" @ 1.0,
        "provided_that" => r"provided\s+that" @ 1.0,
        "whenever" => r"\bwhenever\b" @ 1.0,
        "otherwise" => r"\botherwise\b" @ 1.0,
        "depending_on_whether" => r"depending\s+on\s+whether" @ 1.0,
    ],
);

pub static STATE_CHANGE_MARKERS: RuleSet = RuleSet::new(
    "state_change_markers",
    rules![
        "becomes" => r"\bbecomes?\b" @ 1.0,
        "changes_to" => r"\bchanges?\s+to\b" @ 1.0,
        "increases" => r"\bincreas\w*" @ 1.0,
        "decreases" => r"\bdecreas\w*" @ 1.0,
        "updated_to" => r"\bupdated\s+to\b" @ 1.0,
        "transitions" => r"\btransition\w*" @ 1.0,
        "converts" => r"\bconvert\w*" @ 1.0,
        "grows_to" => r"\bgrows?\s+(?:to|by)\b" @ 1.0,
        "drops_to" => r"\bdrops?\s+(?:to|by)\b" @ 1.0,
        "switches" => r"\bswitch\w*" @ 1.0,
    ],
);

/// Candidate solution approaches, captured with trailing context.
pub static APPROACH_PHRASES: RuleSet = RuleSet::new(
    "approach_phrases",
    rules![
        "approach" => r"(?:approach|method|option|strategy|alternative)(?:\s+\d+)?[:\s][^.!?\n]{5,80}" @ 1.0,
    ],
);

/// Stated objectives or goals.
pub static OBJECTIVE_PHRASES: RuleSet = RuleSet::new(
    "objective_phrases",
    rules![
        "objective" => r"(?:goal|objective|aim|target|purpose)\s+(?:is|of)?[^.!?\n]{5,80}" @ 1.0,
        "in_order_to" => r"in\s+order\s+to\s+[^.!?\n]{5,80}" @ 1.0,
        "maximize" => r"(?:maximi[sz]e|minimi[sz]e)\s+[^.!?\n]{5,80}" @ 1.0,
    ],
);

/// Trade-off statements.
pub static TRADEOFF_PHRASES: RuleSet = RuleSet::new(
    "tradeoff_phrases",
    rules![
        "tradeoff" => r"(?:trade[-\s]?off|at\s+the\s+expense\s+of|sacrific\w*|competing\s+\w+)[^.!?\n]{0,80}" @ 1.0,
    ],
);

/// Information gap statements.
pub static INFO_GAP_PHRASES: RuleSet = RuleSet::new(
    "info_gap_phrases",
    rules![
        "gap" => r"(?:unknown|missing|not\s+(?:provided|given|specified)|unavailable|lacks?\s+\w+)[^.!?\n]{0,80}" @ 1.0,
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rule_tables_compile() {
        // Force compilation of every table; a bad pattern panics here
        // instead of deep inside an analyzer.
        let tables: &[&RuleSet] = &[
            &CALCULATION_VERBS,
            &NUMBERED_ITEMS,
            &BULLET_ITEMS,
            &INFORMATION_CUES,
            &NETWORKED_COORDINATION,
            &INTERDEPENDENT_COORDINATION,
            &SEQUENTIAL_COORDINATION,
            &DYNAMIC_HIGH,
            &DYNAMIC_LOW,
            &PATH_INDICATORS,
            &OUTCOME_INDICATORS,
            &CONFLICT_INDICATORS,
            &UNCERTAINTY_BOUNDED,
            &UNCERTAINTY_HIGH,
            &NUMERIC_TOKENS,
            &FINANCIAL_VOCAB,
            &ACCOUNTING_VOCAB,
            &STATISTICAL_VOCAB,
            &OPERATIONAL_VOCAB,
            &VALUATION_VOCAB,
            &AMBIGUITY_MARKERS,
            &VARIABILITY_MARKERS,
            &UNRELIABILITY_MARKERS,
            &INCONGRUITY_MARKERS,
            &RELATIONSHIP_LANGUAGE,
            &NOVEL_MARKERS,
            &SEMI_FAMILIAR_MARKERS,
            &ROUTINE_MARKERS,
            &ACTION_VERBS,
            &TIME_PRESSURE_HIGH,
            &TIME_PRESSURE_MODERATE,
            &TIME_PRESSURE_LOW,
            &DEPENDENCY_LANGUAGE,
            &SIMULTANEOUS_LANGUAGE,
            &CONDITIONAL_MARKERS,
            &STATE_CHANGE_MARKERS,
            &APPROACH_PHRASES,
            &OBJECTIVE_PHRASES,
            &TRADEOFF_PHRASES,
            &INFO_GAP_PHRASES,
        ];
        for table in tables {
            let _ = table.match_count("sample text");
            assert!(!table.rules().is_empty(), "{} is empty", table.name());
        }
    }

    #[test]
    fn test_match_count_is_case_insensitive() {
        assert_eq!(CALCULATION_VERBS.match_count("CALCULATE the SUM"), 2);
    }

    #[test]
    fn test_distinct_matches_normalizes() {
        let cues = INFORMATION_CUES.distinct_matches("Spend $500 now, then $500 later, plus 10% fees");
        // "$500" appears twice but counts once
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn test_weighted_sum_uses_rule_weights() {
        // "optimize" carries weight 4, "add" weight 1
        let sum = ACTION_VERBS.weighted_sum("optimize the plan and add the totals");
        assert!((sum - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_context_window_char_boundaries() {
        let text = "caf\u{e9} conflict caf\u{e9}";
        let ranges = CONFLICT_INDICATORS.match_ranges(text, 1);
        assert_eq!(ranges.len(), 1);
        let (start, end) = ranges[0];
        // Window boundaries land mid-codepoint without the guard
        let window = context_window(text, start, end, 3, 3);
        assert!(window.contains("conflict"));
    }

    #[test]
    fn test_numbered_and_bullet_items() {
        let text = "1. First thing\n2) Second thing\n- a bullet\n* another\n";
        assert_eq!(NUMBERED_ITEMS.match_count(text), 2);
        assert_eq!(BULLET_ITEMS.match_count(text), 2);
    }
}
