//! Duel Pong - a two-player paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, serve/score, phases)
//! - `config`: Startup configuration with JSON loading and validation
//!
//! Rendering, input polling and frame pacing live outside this crate. The
//! caller feeds [`sim::FrameInput`] plus a frame delta into [`sim::tick`] and
//! draws the [`sim::Snapshot`] it reads back.

pub mod config;
pub mod sim;

pub use config::Config;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame delta used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 16.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Gap between a paddle and its side of the field
    pub const PADDLE_INSET: f32 = 32.0;
    /// Vertical paddle speed (units/s)
    pub const PADDLE_SPEED: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const SERVE_SPEED: f32 = 480.0;
    /// Serve angle is drawn uniformly from [-spread, +spread]
    pub const SERVE_ANGLE_SPREAD_DEG: f32 = 20.0;
    /// Speed multiplier applied on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 1.03;
    pub const BALL_MAX_SPEED: f32 = 1500.0;
    /// Deflection at the very tip of a paddle
    pub const MAX_DEFLECTION_DEG: f32 = 75.0;

    /// Points needed to take the match
    pub const WINNING_SCORE: u32 = 3;
}

/// Unit direction for a launch/deflection angle measured from horizontal.
///
/// `sign` picks the horizontal heading (+1 right, -1 left). Returns the zero
/// vector if the inputs degenerate, so callers must check before scaling.
#[inline]
pub fn direction_from_angle(sign: f32, angle: f32) -> Vec2 {
    Vec2::new(sign * angle.cos(), angle.sin()).normalize_or_zero()
}

/// Speed after one paddle hit: ramped by `increment` and capped at `max_speed`
#[inline]
pub fn ramp_speed(speed: f32, increment: f32, max_speed: f32) -> f32 {
    (speed * increment).min(max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_direction_from_angle_is_unit() {
        let dir = direction_from_angle(-1.0, FRAC_PI_4);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0);
        assert!(dir.y > 0.0);
    }

    #[test]
    fn test_direction_from_angle_degenerate() {
        assert_eq!(direction_from_angle(0.0, 0.0), Vec2::ZERO);
        assert_eq!(direction_from_angle(f32::NAN, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_ramp_speed_caps() {
        assert!((ramp_speed(400.0, 1.03, 1500.0) - 412.0).abs() < 1e-3);
        assert_eq!(ramp_speed(1490.0, 1.03, 1500.0), 1500.0);
        assert_eq!(ramp_speed(1500.0, 1.03, 1500.0), 1500.0);
    }
}
