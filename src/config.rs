//! Match configuration
//!
//! Supplied once by the setup collaborator when a match is created and
//! immutable afterwards. Serde round-trip lets a setup screen or test
//! harness ship a config across a process boundary as JSON.

use serde::{Deserialize, Serialize};

/// Longest player name the scoreboard collaborator will render
pub const MAX_NAME_LEN: usize = 10;

/// Everything a match needs to know up front
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Display names, left player first
    pub player_names: [String; 2],
    /// First player to reach this many points wins the match
    pub target_score: u32,
    /// Downward acceleration in m/s^2 (Earth = 9.8)
    pub gravity: f32,
    /// Seed for the match RNG; same seed, same skylines and wind
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            target_score: 3,
            gravity: 9.8,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Replace degenerate values with playable defaults.
    ///
    /// The setup collaborator validates its own text input, but an empty
    /// name, a zero target score or a non-finite gravity would leave the
    /// engine with no sensible behavior, so they are corrected here rather
    /// than surfaced as errors.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (name, fallback) in self.player_names.iter_mut().zip(defaults.player_names) {
            if name.trim().is_empty() {
                *name = fallback;
            } else {
                name.truncate(MAX_NAME_LEN);
            }
        }
        self.target_score = self.target_score.max(1);
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            self.gravity = defaults.gravity;
        }
        self
    }

    /// Parse a config shipped as JSON, sanitizing after the fact
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
