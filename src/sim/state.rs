//! Game state and core simulation types
//!
//! Everything a frame update reads or writes lives in [`GameState`]. It is the
//! only owner of paddles, ball, score and phase.

use anyhow::Result;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::Config;

/// One side of the field, also used to name a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal sign of travel toward this side (-1 left, +1 right)
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    Start,
    /// Ball waiting at center for the serve input
    Serve {
        /// Ball must be re-centered on the next Serve update
        reset_pending: bool,
    },
    /// Rally in progress
    Playing,
    /// Rally frozen
    Paused,
    /// Match decided
    GameOver { winner: Side },
}

impl GamePhase {
    /// Whether paddle input is honored in this phase
    pub fn paddles_movable(&self) -> bool {
        matches!(self, GamePhase::Serve { .. } | GamePhase::Playing)
    }
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Paddle {
    /// Paddle for `side`, vertically centered
    pub fn new(side: Side, config: &Config) -> Self {
        let x = match side {
            Side::Left => config.left_paddle_x(),
            Side::Right => config.right_paddle_x(),
        };
        Self {
            pos: Vec2::new(x, (config.field_height - config.paddle_height) / 2.0),
            size: Vec2::new(config.paddle_width, config.paddle_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shift vertically by `dy`, then clamp to the field
    pub fn move_by(&mut self, dy: f32, config: &Config) {
        self.pos.y = config.clamp_paddle_y(self.pos.y + dy);
        debug_assert!(
            self.pos.y >= 0.0 && self.pos.y <= config.field_height - self.size.y,
            "paddle left the field: y = {}",
            self.pos.y
        );
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second
    pub vel: Vec2,
}

impl Ball {
    /// Ball resting at field center
    pub fn new(config: &Config) -> Self {
        Self {
            pos: field_center(config),
            radius: config.ball_radius,
            vel: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Bounding box used for paddle overlap
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Snap to field center and stop
    pub fn reset(&mut self, config: &Config) {
        self.pos = field_center(config);
        self.vel = Vec2::ZERO;
    }
}

fn field_center(config: &Config) -> Vec2 {
    Vec2::new(config.field_width / 2.0, config.field_height / 2.0)
}

/// Points for both players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a point for `side`, returning the new tally
    pub fn award(&mut self, side: Side) -> u32 {
        let tally = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *tally += 1;
        *tally
    }
}

/// Something that happened during the last tick, for sound/visual cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    Served { toward: Side },
    WallBounce,
    PaddleHit { side: Side, speed: f32 },
    PointScored { scorer: Side, score: Score },
    MatchWon { winner: Side },
    Paused,
    Resumed,
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Rules and dimensions, fixed for the lifetime of the state
    pub config: Config,
    /// Current phase
    pub phase: GamePhase,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Side the next serve travels toward
    pub serve_direction: Side,
    /// Paddle hits since the last serve
    pub rally_hits: u32,
    /// Frames simulated so far
    pub frame: u64,
    /// Events raised by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh match on the start screen; rejects configs that fail validation
    pub fn new(config: Config, serve_direction: Side) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            phase: GamePhase::Start,
            left_paddle: Paddle::new(Side::Left, &config),
            right_paddle: Paddle::new(Side::Right, &config),
            ball: Ball::new(&config),
            score: Score::default(),
            serve_direction,
            rally_hits: 0,
            frame: 0,
            events: Vec::new(),
            config,
        })
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            left_paddle: self.left_paddle,
            right_paddle: self.right_paddle,
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            score: self.score,
            serve_direction: self.serve_direction,
            winner: self.winner(),
            rally_hits: self.rally_hits,
        }
    }
}

/// What the renderer needs of the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Per-frame scene description handed to the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: BallView,
    pub score: Score,
    pub serve_direction: Side,
    pub winner: Option<Side>,
    pub rally_hits: u32,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
