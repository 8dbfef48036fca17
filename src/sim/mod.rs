//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the caller, no clocks
//! - Randomness only through [`ServeRandom`]
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod rng;
pub mod serve;
pub mod state;
pub mod tick;

pub use collision::{PaddleHit, deflection_angle, hit_offset, resolve_paddle, resolve_walls};
pub use geometry::Rect;
pub use rng::{ScriptedRandom, SeededRandom, ServeRandom};
pub use serve::check_side_out;
pub use state::{
    Ball, BallView, GameEvent, GamePhase, GameState, Paddle, Score, Side, Snapshot,
};
pub use tick::{FrameInput, InputEvent, sanitize_dt, tick};
