//! Session tuning configuration via TOML files.
//!
//! All knobs default to the calibrated values the elicitation loop was tuned
//! with, so a missing file or an empty `[session]` table yields a working
//! configuration. Parsed values are validated before use; the session
//! controller assumes every invariant checked here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning constants for a preference elicitation session.
///
/// # Examples
///
/// ```
/// use perfect_color_core::SessionConfig;
///
/// let config = SessionConfig::load_from_file("config/session.toml")
///     .unwrap_or_else(|_| SessionConfig::default());
///
/// assert!(config.max_rounds >= config.min_rounds);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    /// Rounds that must elapse before early convergence may fire.
    pub min_rounds: usize,
    /// Hard cap on the number of comparison rounds.
    pub max_rounds: usize,
    /// ΔE between consecutive colors below which the session converges.
    pub refinement_threshold: f32,
    /// Per-round shrink factor for the perturbation half-widths (> 1).
    pub base_decay_factor: f32,
    /// Desired ΔE between the current color and a generated candidate.
    pub target_delta: f32,
    /// Acceptance band around `target_delta`.
    pub delta_tolerance: f32,
    /// Sampling attempts before a candidate is accepted best-effort.
    pub max_generation_attempts: usize,
}

impl SessionConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::try_from(&raw.session)
    }

    fn try_from(raw: &RawSession) -> Result<Self, ConfigError> {
        if raw.min_rounds == 0 {
            return Err(ConfigError::Parse("session.min_rounds must be ≥ 1".into()));
        }
        if raw.max_rounds < raw.min_rounds {
            return Err(ConfigError::Parse(
                "session.max_rounds must be ≥ session.min_rounds".into(),
            ));
        }
        if !raw.refinement_threshold.is_finite() || raw.refinement_threshold <= 0.0 {
            return Err(ConfigError::Parse(
                "session.refinement_threshold must be positive".into(),
            ));
        }
        if !raw.base_decay_factor.is_finite() || raw.base_decay_factor <= 1.0 {
            return Err(ConfigError::Parse(
                "session.base_decay_factor must be > 1".into(),
            ));
        }
        if !raw.target_delta.is_finite() || raw.target_delta <= 0.0 {
            return Err(ConfigError::Parse(
                "session.target_delta must be positive".into(),
            ));
        }
        if !raw.delta_tolerance.is_finite() || raw.delta_tolerance <= 0.0 {
            return Err(ConfigError::Parse(
                "session.delta_tolerance must be positive".into(),
            ));
        }
        if raw.max_generation_attempts == 0 {
            return Err(ConfigError::Parse(
                "session.max_generation_attempts must be ≥ 1".into(),
            ));
        }

        Ok(Self {
            min_rounds: raw.min_rounds,
            max_rounds: raw.max_rounds,
            refinement_threshold: raw.refinement_threshold,
            base_decay_factor: raw.base_decay_factor,
            target_delta: raw.target_delta,
            delta_tolerance: raw.delta_tolerance,
            max_generation_attempts: raw.max_generation_attempts,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_rounds: default_min_rounds(),
            max_rounds: default_max_rounds(),
            refinement_threshold: default_refinement_threshold(),
            base_decay_factor: default_base_decay_factor(),
            target_delta: default_target_delta(),
            delta_tolerance: default_delta_tolerance(),
            max_generation_attempts: default_max_generation_attempts(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    session: RawSession,
}

#[derive(Debug, Deserialize)]
struct RawSession {
    #[serde(default = "default_min_rounds")]
    min_rounds: usize,
    #[serde(default = "default_max_rounds")]
    max_rounds: usize,
    #[serde(default = "default_refinement_threshold")]
    refinement_threshold: f32,
    #[serde(default = "default_base_decay_factor")]
    base_decay_factor: f32,
    #[serde(default = "default_target_delta")]
    target_delta: f32,
    #[serde(default = "default_delta_tolerance")]
    delta_tolerance: f32,
    #[serde(default = "default_max_generation_attempts")]
    max_generation_attempts: usize,
}

impl Default for RawSession {
    fn default() -> Self {
        Self {
            min_rounds: default_min_rounds(),
            max_rounds: default_max_rounds(),
            refinement_threshold: default_refinement_threshold(),
            base_decay_factor: default_base_decay_factor(),
            target_delta: default_target_delta(),
            delta_tolerance: default_delta_tolerance(),
            max_generation_attempts: default_max_generation_attempts(),
        }
    }
}

fn default_min_rounds() -> usize {
    7
}

fn default_max_rounds() -> usize {
    15
}

fn default_refinement_threshold() -> f32 {
    3.0
}

fn default_base_decay_factor() -> f32 {
    1.5
}

fn default_target_delta() -> f32 {
    10.0
}

fn default_delta_tolerance() -> f32 {
    2.0
}

fn default_max_generation_attempts() -> usize {
    10
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}
