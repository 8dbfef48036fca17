//! Serve and scoring
//!
//! A rally ends when the ball is fully past a goal line. The player on the
//! other side scores; unless that wins the match, the next serve heads toward
//! the side that conceded.

use glam::Vec2;

use super::rng::ServeRandom;
use super::state::{Ball, GameEvent, GamePhase, GameState, Side};
use crate::direction_from_angle;

/// Side whose goal line the ball has completely crossed, if any
pub fn check_side_out(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Left)
    } else if ball.pos.x - ball.radius > field_width {
        Some(Side::Right)
    } else {
        None
    }
}

/// Credit the point for a side-out against `conceder` and pick the next phase.
///
/// The ball is left where it is; a pending Serve reset re-centers it later.
pub fn award_point(state: &mut GameState, conceder: Side) {
    let scorer = conceder.opponent();
    let tally = state.score.award(scorer);
    log::info!(
        "Point to {} ({}-{})",
        scorer.as_str(),
        state.score.left,
        state.score.right
    );
    state.events.push(GameEvent::PointScored {
        scorer,
        score: state.score,
    });

    if tally >= state.config.winning_score {
        log::info!("Match won by {}", scorer.as_str());
        state.phase = GamePhase::GameOver { winner: scorer };
        state.events.push(GameEvent::MatchWon { winner: scorer });
    } else {
        state.serve_direction = conceder;
        state.phase = GamePhase::Serve {
            reset_pending: true,
        };
    }
}

/// Apply a pending ball reset, at most once per Serve entry
pub fn apply_pending_reset(state: &mut GameState) {
    if let GamePhase::Serve {
        reset_pending: true,
    } = state.phase
    {
        state.ball.reset(&state.config);
        state.phase = GamePhase::Serve {
            reset_pending: false,
        };
        log::debug!("Ball reset for serve toward {}", state.serve_direction.as_str());
    }
}

/// Put the ball in play from wherever it rests
pub fn launch<R: ServeRandom + ?Sized>(state: &mut GameState, rng: &mut R) {
    let spread = state.config.serve_angle_spread();
    let angle = rng.serve_angle(spread).clamp(-spread, spread);
    let sign = state.serve_direction.sign();

    let mut dir = direction_from_angle(sign, angle);
    if dir == Vec2::ZERO {
        dir = Vec2::new(sign, 0.0);
    }
    state.ball.vel = dir * state.config.serve_speed;
    state.rally_hits = 0;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Served {
        toward: state.serve_direction,
    });
    log::debug!(
        "Served toward {} at {:.1} deg",
        state.serve_direction.as_str(),
        angle.to_degrees()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};

    fn state() -> GameState {
        GameState::new(Config::default(), Side::Right).unwrap()
    }

    #[test]
    fn test_side_out_needs_full_exit() {
        let mut ball = Ball::new(&Config::default());
        ball.pos.x = -8.0;
        assert_eq!(check_side_out(&ball, 1280.0), None);
        ball.pos.x = -8.01;
        assert_eq!(check_side_out(&ball, 1280.0), Some(Side::Left));
        ball.pos.x = 1288.0;
        assert_eq!(check_side_out(&ball, 1280.0), None);
        ball.pos.x = 1288.5;
        assert_eq!(check_side_out(&ball, 1280.0), Some(Side::Right));
    }

    #[test]
    fn test_point_sets_up_serve_toward_conceder() {
        let mut state = state();
        state.phase = GamePhase::Playing;
        award_point(&mut state, Side::Left);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.serve_direction, Side::Left);
        assert_eq!(
            state.phase,
            GamePhase::Serve {
                reset_pending: true
            }
        );
    }

    #[test]
    fn test_winning_point_ends_match() {
        let mut state = state();
        state.phase = GamePhase::Playing;
        state.score.left = 2;
        state.ball.pos = Vec2::new(1300.0, 200.0);
        state.ball.vel = Vec2::new(700.0, 30.0);
        let ball_before = state.ball;
        let direction_before = state.serve_direction;

        award_point(&mut state, Side::Right);
        assert_eq!(state.score.left, 3);
        assert_eq!(state.phase, GamePhase::GameOver { winner: Side::Left });
        assert_eq!(state.ball, ball_before);
        assert_eq!(state.serve_direction, direction_before);
        assert!(state.events.contains(&GameEvent::MatchWon { winner: Side::Left }));
    }

    #[test]
    fn test_pending_reset_applies_once() {
        let mut state = state();
        state.phase = GamePhase::Serve {
            reset_pending: true,
        };
        state.ball.pos = Vec2::new(-30.0, 100.0);
        state.ball.vel = Vec2::new(-500.0, 10.0);

        apply_pending_reset(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(640.0, 360.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(
            state.phase,
            GamePhase::Serve {
                reset_pending: false
            }
        );

        // A second call leaves a moved ball alone
        state.ball.pos.y = 10.0;
        apply_pending_reset(&mut state);
        assert_eq!(state.ball.pos.y, 10.0);
    }

    #[test]
    fn test_launch_flat() {
        let mut state = state();
        state.serve_direction = Side::Left;
        launch(&mut state, &mut ScriptedRandom::straight());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.vel, Vec2::new(-480.0, 0.0));
    }

    #[test]
    fn test_launch_angle_within_cone() {
        let spread = 20f32.to_radians();
        let mut rng = SeededRandom::new(2024);
        for _ in 0..200 {
            let mut state = state();
            launch(&mut state, &mut rng);
            let vel = state.ball.vel;
            assert!((vel.length() - 480.0).abs() < 1e-2);
            assert!(vel.x > 0.0);
            assert!(vel.y.atan2(vel.x).abs() <= spread + 1e-5);
        }
    }
}
