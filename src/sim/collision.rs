//! Ball motion and collision response
//!
//! Walls reflect the vertical velocity. Paddles ignore the incoming angle
//! entirely: the outgoing angle depends only on where the ball struck the
//! paddle, and the speed ramps by a fixed factor per hit.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::config::Config;
use crate::{direction_from_angle, ramp_speed};

/// Outcome of a paddle strike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    /// Normalized strike offset in [-1, 1] (negative = above center)
    pub offset: f32,
    /// Outgoing angle from horizontal (radians)
    pub angle: f32,
    /// Outgoing speed
    pub speed: f32,
}

/// Advance the ball by one explicit Euler step
#[inline]
pub fn integrate(ball: &mut Ball, dt: f32) {
    ball.pos += ball.vel * dt;
}

/// Bounce off the top and bottom of the field.
///
/// Returns true if a wall was hit. Only the vertical velocity changes.
pub fn resolve_walls(ball: &mut Ball, field_height: f32) -> bool {
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else if ball.pos.y + ball.radius > field_height {
        ball.pos.y = field_height - ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Where the ball struck the paddle, clamped to [-1, 1]
pub fn hit_offset(ball_y: f32, paddle: &Paddle) -> f32 {
    let half_height = paddle.size.y / 2.0;
    ((ball_y - paddle.center().y) / half_height).clamp(-1.0, 1.0)
}

/// Deflection angle for a strike offset
#[inline]
pub fn deflection_angle(offset: f32, max_deflection: f32) -> f32 {
    offset.clamp(-1.0, 1.0) * max_deflection
}

/// Whether the ball is heading toward the paddle on `side`
#[inline]
fn approaching(ball: &Ball, side: Side) -> bool {
    match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    }
}

/// Check the ball against one paddle and bounce it if they touch.
///
/// The hit only registers while the ball travels toward the paddle. After the
/// bounce the ball sits flush against the paddle's field-facing edge with its
/// velocity pointing away, so the same contact cannot resolve twice.
pub fn resolve_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    side: Side,
    config: &Config,
) -> Option<PaddleHit> {
    if !approaching(ball, side) || !ball.rect().overlaps(&paddle.rect()) {
        return None;
    }

    let offset = hit_offset(ball.pos.y, paddle);
    let angle = deflection_angle(offset, config.max_deflection());
    let speed = ramp_speed(
        ball.speed(),
        config.ball_speed_increment,
        config.ball_max_speed,
    );

    // Bounce back toward the opponent's goal
    let away = side.opponent().sign();
    let mut dir = direction_from_angle(away, angle);
    if dir == Vec2::ZERO {
        dir = Vec2::new(away, 0.0);
    }
    ball.vel = dir * speed;

    ball.pos.x = match side {
        Side::Left => paddle.pos.x + paddle.size.x + ball.radius,
        Side::Right => paddle.pos.x - ball.radius,
    };

    debug_assert!(angle.abs() <= config.max_deflection() + f32::EPSILON);
    debug_assert!(speed <= config.ball_max_speed);
    debug_assert!(ball.vel != Vec2::ZERO, "paddle hit produced a dead ball");

    Some(PaddleHit {
        side,
        offset,
        angle,
        speed,
    })
}
