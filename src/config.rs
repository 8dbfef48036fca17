//! Match configuration
//!
//! Fixed when a [`GameState`](crate::sim::GameState) is created and never
//! mutated afterwards. Defaults mirror [`crate::consts`].

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal gap between a paddle and its goal line
    pub paddle_inset: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub serve_speed: f32,
    /// Half-width of the random serve cone (degrees)
    pub serve_angle_spread_deg: f32,
    pub ball_speed_increment: f32,
    pub ball_max_speed: f32,
    /// Deflection at the paddle tips (degrees)
    pub max_deflection_deg: f32,

    // === Rules ===
    pub winning_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            serve_speed: SERVE_SPEED,
            serve_angle_spread_deg: SERVE_ANGLE_SPREAD_DEG,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            ball_max_speed: BALL_MAX_SPEED,
            max_deflection_deg: MAX_DEFLECTION_DEG,

            winning_score: WINNING_SCORE,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("malformed config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.field_width,
            self.field_height,
            self.paddle_width,
            self.paddle_height,
            self.paddle_inset,
            self.paddle_speed,
            self.ball_radius,
            self.serve_speed,
            self.serve_angle_spread_deg,
            self.ball_speed_increment,
            self.ball_max_speed,
            self.max_deflection_deg,
        ];
        ensure!(finite.iter().all(|v| v.is_finite()), "config values must be finite");

        ensure!(
            self.field_width > 0.0 && self.field_height > 0.0,
            "field dimensions must be positive"
        );
        ensure!(
            self.paddle_width > 0.0 && self.paddle_height > 0.0,
            "paddle dimensions must be positive"
        );
        ensure!(
            self.paddle_height <= self.field_height,
            "paddle height {} exceeds field height {}",
            self.paddle_height,
            self.field_height
        );
        ensure!(self.paddle_inset >= 0.0, "paddle inset must not be negative");
        ensure!(
            2.0 * (self.paddle_inset + self.paddle_width) < self.field_width,
            "paddles do not fit side by side in a field {} wide",
            self.field_width
        );
        ensure!(self.paddle_speed >= 0.0, "paddle speed must not be negative");
        ensure!(
            self.ball_radius > 0.0 && 2.0 * self.ball_radius < self.field_height,
            "ball radius must be positive and fit the field"
        );
        ensure!(self.serve_speed > 0.0, "serve speed must be positive");
        ensure!(
            self.ball_speed_increment >= 1.0,
            "speed increment must be at least 1.0"
        );
        ensure!(
            self.ball_max_speed >= self.serve_speed,
            "max speed {} is below serve speed {}",
            self.ball_max_speed,
            self.serve_speed
        );
        ensure!(
            (0.0..90.0).contains(&self.serve_angle_spread_deg),
            "serve angle spread must be in [0, 90) degrees"
        );
        ensure!(
            self.max_deflection_deg > 0.0 && self.max_deflection_deg < 90.0,
            "max deflection must be in (0, 90) degrees"
        );
        ensure!(self.winning_score >= 1, "winning score must be at least 1");
        Ok(())
    }

    /// Max deflection in radians
    pub fn max_deflection(&self) -> f32 {
        self.max_deflection_deg.to_radians()
    }

    /// Serve cone half-width in radians
    pub fn serve_angle_spread(&self) -> f32 {
        self.serve_angle_spread_deg.to_radians()
    }

    /// X of the left paddle's left edge
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_inset
    }

    /// X of the right paddle's left edge
    pub fn right_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_inset - self.paddle_width
    }

    /// Clamp a paddle's top edge so the paddle stays on the field
    ///
    /// A paddle taller than the field is pinned to the top edge.
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.min(self.field_height - self.paddle_height).max(0.0)
    }
}
