//! Per-frame simulation step
//!
//! One call to [`tick`] runs exactly one phase handler. Inputs that the active
//! phase does not care about are dropped for that frame.

use serde::{Deserialize, Serialize};

use super::collision::{integrate, resolve_paddle, resolve_walls};
use super::rng::ServeRandom;
use super::serve::{apply_pending_reset, award_point, check_side_out, launch};
use super::state::{GameEvent, GamePhase, GameState, Score, Side};
use crate::consts::MAX_FRAME_DT;

/// A logical input event for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Held: move this player's paddle up
    MoveUp(Side),
    /// Held: move this player's paddle down
    MoveDown(Side),
    StartPressed,
    ServePressed,
    PausePressed,
    RestartPressed,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    pub start: bool,
    pub serve: bool,
    pub pause: bool,
    pub restart: bool,
}

impl FrameInput {
    pub fn from_events(events: &[InputEvent]) -> Self {
        events.iter().copied().collect()
    }

    /// Add one event
    pub fn with(mut self, event: InputEvent) -> Self {
        self.apply(event);
        self
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveUp(Side::Left) => self.left_up = true,
            InputEvent::MoveDown(Side::Left) => self.left_down = true,
            InputEvent::MoveUp(Side::Right) => self.right_up = true,
            InputEvent::MoveDown(Side::Right) => self.right_down = true,
            InputEvent::StartPressed => self.start = true,
            InputEvent::ServePressed => self.serve = true,
            InputEvent::PausePressed => self.pause = true,
            InputEvent::RestartPressed => self.restart = true,
        }
    }

    /// Vertical intent for a paddle: -1 up, +1 down, 0 when idle or both held
    pub fn move_axis(&self, side: Side) -> f32 {
        let (up, down) = match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        };
        match (up, down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

impl FromIterator<InputEvent> for FrameInput {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        let mut input = FrameInput::default();
        for event in iter {
            input.apply(event);
        }
        input
    }
}

/// Clamp a caller-supplied frame delta to something safe to integrate
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the game by one frame
pub fn tick<R: ServeRandom + ?Sized>(
    state: &mut GameState,
    input: &FrameInput,
    dt: f32,
    rng: &mut R,
) {
    state.events.clear();
    state.frame += 1;
    let dt = sanitize_dt(dt);

    match state.phase {
        GamePhase::Start => {
            if input.start {
                set_phase(state, GamePhase::Serve { reset_pending: true });
                state.events.push(GameEvent::MatchStarted);
            }
        }

        GamePhase::Serve { .. } => {
            apply_pending_reset(state);
            move_paddles(state, input, dt);
            if input.serve {
                launch(state, rng);
            }
        }

        GamePhase::Playing => {
            if input.pause {
                set_phase(state, GamePhase::Paused);
                state.events.push(GameEvent::Paused);
                return;
            }
            move_paddles(state, input, dt);
            step_rally(state, dt);
        }

        GamePhase::Paused => {
            if input.pause {
                set_phase(state, GamePhase::Playing);
                state.events.push(GameEvent::Resumed);
            }
        }

        GamePhase::GameOver { .. } => {
            if input.restart {
                state.score = Score::default();
                state.rally_hits = 0;
                state.serve_direction = rng.serve_side();
                set_phase(state, GamePhase::Start);
                state.events.push(GameEvent::Restarted);
            }
        }
    }
}

fn set_phase(state: &mut GameState, phase: GamePhase) {
    log::debug!("Phase {:?} -> {:?}", state.phase, phase);
    state.phase = phase;
}

fn move_paddles(state: &mut GameState, input: &FrameInput, dt: f32) {
    debug_assert!(state.phase.paddles_movable());
    let step = state.config.paddle_speed * dt;
    for side in [Side::Left, Side::Right] {
        let axis = input.move_axis(side);
        if axis != 0.0 {
            let config = &state.config;
            match side {
                Side::Left => state.left_paddle.move_by(axis * step, config),
                Side::Right => state.right_paddle.move_by(axis * step, config),
            }
        }
    }
}

/// Ball motion, bounces and side-out for one Playing frame
fn step_rally(state: &mut GameState, dt: f32) {
    integrate(&mut state.ball, dt);

    if resolve_walls(&mut state.ball, state.config.field_height) {
        state.events.push(GameEvent::WallBounce);
    }

    for side in [Side::Left, Side::Right] {
        let paddle = *state.paddle(side);
        if let Some(hit) = resolve_paddle(&mut state.ball, &paddle, side, &state.config) {
            state.rally_hits += 1;
            state.events.push(GameEvent::PaddleHit {
                side,
                speed: hit.speed,
            });
            log::trace!(
                "{} paddle hit: offset {:.2}, speed {:.1}",
                side.as_str(),
                hit.offset,
                hit.speed
            );
        }
    }

    if let Some(conceder) = check_side_out(&state.ball, state.config.field_width) {
        award_point(state, conceder);
    }
}
