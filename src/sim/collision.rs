//! Collision detection and response
//!
//! Pure helpers for wall bounces, paddle deflection and scoring exits. The
//! per-tick ordering lives in `tick::update_ball`.

use glam::Vec2;

use super::geom::Rect;
use super::state::{Ball, Paddle, Side};

/// Contact point if the ball touches the top or bottom wall.
///
/// Returns the point on the wall being crossed (ball center x, top or bottom
/// edge). No positional correction is done here; the ball may overlap the
/// wall for one frame.
pub fn wall_contact(ball: &Rect, field_height: f32) -> Option<Vec2> {
    if ball.top() <= 0.0 {
        Some(Vec2::new(ball.center().x, ball.top()))
    } else if ball.bottom() >= field_height {
        Some(Vec2::new(ball.center().x, ball.bottom()))
    } else {
        None
    }
}

/// Vertical velocity after a paddle hit.
///
/// Hitting the paddle's center returns 0; hitting its edge returns
/// `speed * factor`, pointing away from the center. Corner hits (ball center
/// past the paddle end) are capped at the edge value.
pub fn deflection_vy(
    paddle_center_y: f32,
    ball_center_y: f32,
    paddle_height: f32,
    speed: f32,
    factor: f32,
) -> f32 {
    let relative = ((paddle_center_y - ball_center_y) / (paddle_height / 2.0)).clamp(-1.0, 1.0);
    -relative * speed * factor
}

/// Bounce the ball off `paddle` if they overlap.
///
/// Snaps the ball flush against the paddle face, reverses `vx` and aims `vy`
/// by contact offset. Returns the contact point on a hit.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, deflection: f32) -> Option<Vec2> {
    if !ball.rect.intersects(&paddle.rect) {
        return None;
    }

    let face_x = match paddle.side {
        Side::Left => {
            if ball.rect.left() < paddle.rect.right() {
                ball.rect.set_left(paddle.rect.right());
            }
            paddle.rect.right()
        }
        Side::Right => {
            if ball.rect.right() > paddle.rect.left() {
                ball.rect.set_right(paddle.rect.left());
            }
            paddle.rect.left()
        }
    };

    ball.vel.x = -ball.vel.x;
    let ball_y = ball.center().y;
    ball.vel.y = deflection_vy(
        paddle.rect.center().y,
        ball_y,
        paddle.rect.h,
        ball.speed,
        deflection,
    );

    Some(Vec2::new(face_x, ball_y))
}

/// Side that scores if the ball has fully left the field horizontally
pub fn scoring_side(ball: &Rect, field_width: f32) -> Option<Side> {
    if ball.right() <= 0.0 {
        Some(Side::Right)
    } else if ball.left() >= field_width {
        Some(Side::Left)
    } else {
        None
    }
}
