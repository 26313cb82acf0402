//! Validation configuration
//!
//! Loads optional per-project configuration from a `tierscope.toml` file and
//! provides the default thresholds, weights, and tier requirement bands used
//! by the composite scorer.
//!
//! # Configuration Format
//!
//! ```toml
//! # tierscope.toml
//!
//! strict_mode = false
//! allowed_tier_deviation = 1
//! max_regeneration_attempts = 3
//! minimum_confidence = 0.5
//!
//! [weights]
//! wood = 0.25
//! campbell = 0.25
//! liu_li = 0.30
//! interactivity = 0.20
//!
//! [tier_thresholds]
//! simple_max = 15.0
//! moderate_max = 30.0
//! ```

use crate::models::{CoordinativeComplexity, DynamicComplexity, NoveltyLevel, Tier};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Crate component of `ComplexityScore.analyzer_version`. The rule tables
/// carry their own `RULESET_VERSION`; the scorer stamps both.
pub const ANALYZER_VERSION: &str = concat!("tierscope-", env!("CARGO_PKG_VERSION"));

/// Nominal width assigned to the open-ended complex tier when computing
/// the confidence margin bonus.
const COMPLEX_TIER_NOMINAL_WIDTH: f64 = 15.0;

/// Relative weights of the four framework scores. Must sum to 1.0;
/// this is an implementer contract, not actively validated per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkWeights {
    pub wood: f64,
    pub campbell: f64,
    pub liu_li: f64,
    pub interactivity: f64,
}

impl Default for FrameworkWeights {
    fn default() -> Self {
        Self {
            wood: 0.25,
            campbell: 0.25,
            liu_li: 0.30,
            interactivity: 0.20,
        }
    }
}

impl FrameworkWeights {
    pub fn sum(&self) -> f64 {
        self.wood + self.campbell + self.liu_li + self.interactivity
    }
}

/// Ascending score boundaries between tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Scores below this are `simple`
    pub simple_max: f64,
    /// Scores below this (and >= simple_max) are `moderate`; above is `complex`
    pub moderate_max: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            simple_max: 15.0,
            moderate_max: 30.0,
        }
    }
}

impl TierThresholds {
    /// Classify an overall score into a tier
    pub fn classify(&self, score: f64) -> Tier {
        if score < self.simple_max {
            Tier::Simple
        } else if score < self.moderate_max {
            Tier::Moderate
        } else {
            Tier::Complex
        }
    }

    /// Score range `[min, max)` for a tier. The complex tier has no real
    /// upper bound; the returned max is nominal, for margin computations.
    pub fn range(&self, tier: Tier) -> (f64, f64) {
        match tier {
            Tier::Simple => (0.0, self.simple_max),
            Tier::Moderate => (self.simple_max, self.moderate_max),
            Tier::Complex => (self.moderate_max, self.moderate_max + COMPLEX_TIER_NOMINAL_WIDTH),
        }
    }
}

/// Per-tier interactivity bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractivityThresholds {
    pub simple_max_ratio: f64,
    pub moderate_min_ratio: f64,
    pub moderate_max_ratio: f64,
    pub complex_min_ratio: f64,
    pub simple_max_depth: u32,
    pub moderate_min_depth: u32,
    pub moderate_max_depth: u32,
    pub complex_min_depth: u32,
}

impl Default for InteractivityThresholds {
    fn default() -> Self {
        Self {
            simple_max_ratio: 0.4,
            moderate_min_ratio: 0.25,
            moderate_max_ratio: 0.75,
            complex_min_ratio: 0.5,
            simple_max_depth: 1,
            moderate_min_depth: 1,
            moderate_max_depth: 3,
            complex_min_depth: 2,
        }
    }
}

/// The metric bands a scenario of a given tier is expected to satisfy.
/// These back the named criterion checks in the composite scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRequirements {
    pub acts_min: u32,
    pub acts_max: u32,
    pub coordinative: &'static [CoordinativeComplexity],
    pub dynamic: &'static [DynamicComplexity],
    pub size_min: u32,
    pub size_max: u32,
    pub novelty: &'static [NoveltyLevel],
    pub ratio_min: f64,
    pub ratio_max: f64,
    pub depth_min: u32,
    pub depth_max: u32,
}

impl TierRequirements {
    pub fn for_tier(tier: Tier, config: &ComplexityValidationConfig) -> Self {
        let it = &config.interactivity;
        match tier {
            Tier::Simple => Self {
                acts_min: 2,
                acts_max: 4,
                coordinative: &[CoordinativeComplexity::Sequential],
                dynamic: &[DynamicComplexity::Static],
                size_min: 3,
                size_max: 6,
                novelty: &[NoveltyLevel::Routine],
                ratio_min: 0.0,
                ratio_max: it.simple_max_ratio,
                depth_min: 0,
                depth_max: it.simple_max_depth,
            },
            Tier::Moderate => Self {
                acts_min: 4,
                acts_max: 8,
                coordinative: &[
                    CoordinativeComplexity::Sequential,
                    CoordinativeComplexity::Interdependent,
                ],
                dynamic: &[DynamicComplexity::Static, DynamicComplexity::Low],
                size_min: 5,
                size_max: 12,
                novelty: &[NoveltyLevel::Routine, NoveltyLevel::SemiFamiliar],
                ratio_min: it.moderate_min_ratio,
                ratio_max: it.moderate_max_ratio,
                depth_min: it.moderate_min_depth,
                depth_max: it.moderate_max_depth,
            },
            Tier::Complex => Self {
                acts_min: 8,
                acts_max: 15,
                coordinative: &[
                    CoordinativeComplexity::Interdependent,
                    CoordinativeComplexity::Networked,
                ],
                dynamic: &[DynamicComplexity::Low, DynamicComplexity::High],
                size_min: 10,
                size_max: u32::MAX,
                novelty: &[NoveltyLevel::SemiFamiliar, NoveltyLevel::Novel],
                ratio_min: it.complex_min_ratio,
                ratio_max: 1.0,
                depth_min: it.complex_min_depth,
                depth_max: u32::MAX,
            },
        }
    }
}

/// Top-level validation configuration.
///
/// Precondition (not validated per call): weights sum to 1.0 and
/// `simple_max < moderate_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityValidationConfig {
    pub tier_thresholds: TierThresholds,
    pub interactivity: InteractivityThresholds,
    pub weights: FrameworkWeights,
    /// When true, only an exact tier match passes validation
    pub strict_mode: bool,
    /// Maximum ordinal tier distance tolerated when not strict
    pub allowed_tier_deviation: u32,
    pub max_regeneration_attempts: u32,
    /// Advisory only: no timer is wired in this core. Callers wrapping the
    /// call in their own timeout can read this value.
    pub validation_timeout_ms: u64,
    pub minimum_confidence: f64,
}

impl Default for ComplexityValidationConfig {
    fn default() -> Self {
        Self {
            tier_thresholds: TierThresholds::default(),
            interactivity: InteractivityThresholds::default(),
            weights: FrameworkWeights::default(),
            strict_mode: false,
            allowed_tier_deviation: 1,
            max_regeneration_attempts: 3,
            validation_timeout_ms: 30_000,
            minimum_confidence: 0.5,
        }
    }
}

impl ComplexityValidationConfig {
    /// Load configuration from a TOML file. Missing file or parse failure
    /// falls back to defaults with a warning, matching CLI expectations.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<Self>(&raw) {
                Ok(config) => {
                    debug!("Loaded validation config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No config file at {}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
