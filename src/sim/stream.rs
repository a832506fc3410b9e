//! Obstacle stream: generation, scrolling and recycling
//!
//! The stream is a fixed-depth queue. New obstacles are always appended to
//! the right of the current tail, which keeps the queue sorted by `pos_x`.

use std::collections::VecDeque;

use rand::Rng;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Uniform integer draw from an inclusive float range, never above `hi`
fn random_whole<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let lo_whole = lo.ceil() as i32;
    let hi_whole = (hi.floor() as i32).max(lo_whole);
    (rng.random_range(lo_whole..=hi_whole) as f32).min(hi)
}

/// Generate the obstacle that follows `last` (or the screen origin)
pub fn spawn_next<R: Rng>(last: Option<&Obstacle>, tuning: &Tuning, rng: &mut R) -> Obstacle {
    let last_x = last.map_or(0.0, |o| o.pos_x);

    let gap_size = random_whole(rng, tuning.gap_size.0, tuning.gap_size.1);
    let spacing = random_whole(rng, tuning.spacing.0, tuning.spacing.1);

    // Clamp degenerate placement (gap taller than the space below the minimum)
    let top_max = (tuning.screen_height - gap_size).max(0.0);
    let top_min = tuning.gap_top_min.min(top_max);
    let gap_top = random_whole(rng, top_min, top_max);

    Obstacle::new(
        last_x + spacing,
        tuning.obstacle_width,
        gap_top,
        gap_size,
        tuning.screen_height,
    )
}

/// Fill an empty stream up to its configured depth
pub fn seed<R: Rng>(obstacles: &mut VecDeque<Obstacle>, tuning: &Tuning, rng: &mut R) {
    while obstacles.len() < tuning.stream_depth {
        let next = spawn_next(obstacles.back(), tuning, rng);
        obstacles.push_back(next);
    }
}

/// Scroll every obstacle left by `scroll_speed`
pub fn advance(obstacles: &mut VecDeque<Obstacle>, scroll_speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos_x -= scroll_speed;
    }
}

/// True once the obstacle's right edge is more than `tolerance` past the
/// screen's left edge
#[inline]
pub fn is_off_screen(obstacle: &Obstacle, tolerance: f32) -> bool {
    obstacle.right() + tolerance < 0.0
}

/// Replace off-screen head obstacles with fresh ones at the tail.
///
/// Returns how many were recycled. Queue depth is unchanged.
pub fn recycle<R: Rng>(obstacles: &mut VecDeque<Obstacle>, tuning: &Tuning, rng: &mut R) -> usize {
    let tolerance = tuning.collision_tolerance;
    let mut recycled = 0;
    while obstacles
        .front()
        .is_some_and(|o| is_off_screen(o, tolerance))
        && recycled < obstacles.len()
    {
        obstacles.pop_front();
        let next = spawn_next(obstacles.back(), tuning, rng);
        log::debug!("Recycled obstacle, new tail at x={}", next.pos_x);
        obstacles.push_back(next);
        recycled += 1;
    }
    recycled
}
