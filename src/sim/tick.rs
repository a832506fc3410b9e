//! Fixed-step simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::aabb::intersects;
use super::state::{DeathCause, GameEvent, GamePhase, Session};
use super::stream;
use crate::consts::ACTIVE_WINDOW;

/// Discrete player intents delivered by the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Jump key went down (already debounced by the adapter)
    JumpPressed,
    /// Jump key went up
    JumpReleased,
    TogglePause,
}

/// Apply a single intent to the session
pub fn apply_intent(session: &mut Session, intent: Intent) {
    match intent {
        Intent::JumpPressed => session.jump(),
        // Edge tracking lives in the adapter
        Intent::JumpReleased => {}
        Intent::TogglePause => session.toggle_pause(),
    }
}

/// Advance the session by one physics tick.
///
/// Does nothing while paused. A death resets the session and ends the tick.
pub fn tick(session: &mut Session) {
    session.events.clear();

    if session.phase == GamePhase::Paused {
        return;
    }

    session.time_ticks += 1;

    stream::advance(&mut session.obstacles, session.scroll_speed);

    let tolerance = session.tuning.collision_tolerance;
    let avatar = &mut session.avatar;

    // Soft ceiling
    if avatar.pos.y - tolerance < 0.0 && avatar.vel_y < 0.0 {
        avatar.vel_y = 0.0;
        session.events.push(GameEvent::CeilingHit);
    }

    // Floor
    if avatar.pos.y + avatar.size - tolerance > session.tuning.screen_height {
        die(session, DeathCause::Floor);
        return;
    }

    avatar.advance();

    let recycled = stream::recycle(&mut session.obstacles, &session.tuning, &mut session.rng);
    for _ in 0..recycled {
        session.events.push(GameEvent::ObstacleRecycled);
    }

    if let Some(cause) = resolve_obstacles(session) {
        die(session, cause);
    }
}

/// Score and collide against the leftmost obstacles.
///
/// Returns the cause of death if the avatar hit a bar.
fn resolve_obstacles(session: &mut Session) -> Option<DeathCause> {
    let tolerance = session.tuning.collision_tolerance;
    let hitbox = session.avatar.hitbox();

    for i in 0..ACTIVE_WINDOW.min(session.obstacles.len()) {
        let obstacle = &mut session.obstacles[i];

        if intersects(&hitbox, &obstacle.gap_zone(), tolerance) && !obstacle.scored {
            obstacle.scored = true;
            session.score += 1;
            session.best_score = session.best_score.max(session.score);
            session.events.push(GameEvent::Scored {
                score: session.score,
            });
            log::debug!("Scored: {}", session.score);

            if session.score % session.tuning.score_step == 0 {
                session.scroll_speed += session.tuning.scroll_speed_step;
                session.events.push(GameEvent::SpeedUp {
                    scroll_speed: session.scroll_speed,
                });
                log::info!("Scroll speed up: {}", session.scroll_speed);
            }
        }

        let obstacle = &session.obstacles[i];
        if intersects(&hitbox, &obstacle.top_bar(), tolerance) {
            return Some(DeathCause::TopBar);
        }
        if intersects(&hitbox, &obstacle.bottom_bar(), tolerance) {
            return Some(DeathCause::BottomBar);
        }
    }

    None
}

fn die(session: &mut Session, cause: DeathCause) {
    log::info!("Died ({:?}) at score {}", cause, session.score);
    session.deaths += 1;
    session.reset();
    session.events.push(GameEvent::Died { cause });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Session whose stream is pushed far right so nothing interferes
    fn clear_session(seed: u64) -> Session {
        let mut session = Session::new(seed);
        for (i, obstacle) in session.obstacles.iter_mut().enumerate() {
            obstacle.pos_x = 5000.0 + i as f32 * 400.0;
        }
        session
    }

    /// Obstacle whose gap spans the whole screen (cannot be hit)
    fn open_gate(pos_x: f32) -> Obstacle {
        Obstacle::new(pos_x, 50.0, 0.0, 576.0, 576.0)
    }

    #[test]
    fn test_tick_runs_sequence() {
        let mut session = clear_session(1);
        let xs: Vec<f32> = session.obstacles.iter().map(|o| o.pos_x).collect();

        tick(&mut session);

        assert_eq!(session.time_ticks, 1);
        assert_eq!(session.avatar.pos.y, 200.0);
        assert_eq!(session.avatar.vel_y, 1.0);
        for (o, x) in session.obstacles.iter().zip(xs) {
            assert_eq!(o.pos_x, x - 4.0);
        }
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut session = clear_session(1);
        apply_intent(&mut session, Intent::TogglePause);
        let before = session.obstacles.clone();

        tick(&mut session);

        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.obstacles, before);
        assert_eq!(session.avatar.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_jump_intent() {
        let mut session = clear_session(1);
        apply_intent(&mut session, Intent::JumpPressed);
        assert_eq!(session.avatar.vel_y, -15.0);
        apply_intent(&mut session, Intent::JumpReleased);
        assert_eq!(session.avatar.vel_y, -15.0);

        tick(&mut session);
        assert_eq!(session.avatar.pos.y, 185.0);
        assert_eq!(session.avatar.vel_y, -14.0);
    }

    #[test]
    fn test_ceiling_clamps_rising_velocity() {
        let mut session = clear_session(1);
        session.avatar.pos.y = 5.0;
        session.avatar.vel_y = -10.0;

        tick(&mut session);

        assert!(session.events.contains(&GameEvent::CeilingHit));
        assert_eq!(session.avatar.pos.y, 5.0);
        assert_eq!(session.avatar.vel_y, 1.0);
        assert_eq!(session.deaths, 0);
    }

    #[test]
    fn test_ceiling_ignores_falling_avatar() {
        let mut session = clear_session(1);
        session.avatar.pos.y = 5.0;
        session.avatar.vel_y = 2.0;

        tick(&mut session);

        assert!(!session.events.contains(&GameEvent::CeilingHit));
        assert_eq!(session.avatar.pos.y, 7.0);
    }

    #[test]
    fn test_floor_kills_and_resets() {
        let mut session = clear_session(1);
        session.score = 7;
        session.avatar.pos.y = 576.0;

        tick(&mut session);

        assert_eq!(session.events, vec![GameEvent::Died { cause: DeathCause::Floor }]);
        assert_eq!(session.avatar.pos, Vec2::new(100.0, 200.0));
        assert_eq!(session.score, 0);
        assert_eq!(session.scroll_speed, 4.0);
        assert_eq!(session.obstacles.len(), 4);
        assert_eq!(session.deaths, 1);
    }

    #[test]
    fn test_floor_forgives_tolerance() {
        let mut session = clear_session(1);
        // Bottom edge 8px into the floor is still alive
        session.avatar.pos.y = 576.0 - 30.0 + 8.0;
        tick(&mut session);
        assert_eq!(session.deaths, 0);
    }

    #[test]
    fn test_entering_gap_scores_once() {
        let mut session = clear_session(1);
        session.obstacles[0] = open_gate(90.0);

        tick(&mut session);
        assert_eq!(session.score, 1);
        assert!(session.obstacles[0].scored);
        assert!(session.events.contains(&GameEvent::Scored { score: 1 }));

        // Overlap persists on following ticks
        for _ in 0..5 {
            session.avatar.vel_y = 0.0;
            tick(&mut session);
        }
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_only_two_leftmost_obstacles_are_checked() {
        let mut session = clear_session(1);
        session.obstacles[0] = open_gate(-40.0);
        session.obstacles[1] = open_gate(-30.0);
        // Deeper obstacle overlaps the avatar but is outside the active window
        session.obstacles[2] = open_gate(90.0);

        tick(&mut session);

        assert_eq!(session.score, 0);
        assert!(!session.obstacles[2].scored);
    }

    #[test]
    fn test_top_bar_kills() {
        let mut session = clear_session(1);
        // Gap well below the avatar
        session.obstacles[0] = Obstacle::new(90.0, 50.0, 400.0, 150.0, 576.0);

        tick(&mut session);

        assert!(session.events.contains(&GameEvent::Died { cause: DeathCause::TopBar }));
        assert_eq!(session.avatar.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_bottom_bar_kills() {
        let mut session = clear_session(1);
        // Gap well above the avatar
        session.obstacles[0] = Obstacle::new(90.0, 50.0, 10.0, 150.0, 576.0);

        tick(&mut session);

        assert!(session.events.contains(&GameEvent::Died { cause: DeathCause::BottomBar }));
        assert_eq!(session.deaths, 1);
    }

    #[test]
    fn test_speed_up_every_ten_points() {
        let mut session = clear_session(1);
        let mut speeds = Vec::new();

        for _ in 0..25 {
            session.obstacles[0] = open_gate(90.0);
            session.avatar.pos.y = 200.0;
            session.avatar.vel_y = 0.0;
            tick(&mut session);
            speeds.push((session.score, session.scroll_speed));
        }

        for (score, speed) in speeds {
            let expected = 4.0 + 0.25 * (score / 10) as f32;
            assert_eq!(speed, expected, "score {score}");
        }
        assert_eq!(session.score, 25);
        assert_eq!(session.best_score, 25);
    }

    #[test]
    fn test_recycle_during_tick() {
        let mut session = clear_session(1);
        session.obstacles[0].pos_x = -146.0;
        let old_tail = session.obstacles.back().unwrap().pos_x - 4.0;

        tick(&mut session);

        assert!(session.events.contains(&GameEvent::ObstacleRecycled));
        assert_eq!(session.obstacles.len(), 4);
        assert!(session.obstacles.back().unwrap().pos_x > old_tail);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(99999);
        let mut b = Session::new(99999);

        for i in 0..600 {
            if i % 25 == 0 {
                apply_intent(&mut a, Intent::JumpPressed);
                apply_intent(&mut b, Intent::JumpPressed);
            }
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.avatar, b.avatar);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
        assert_eq!(a.deaths, b.deaths);
    }

    proptest! {
        #[test]
        fn prop_fall_speed_is_capped(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut session = Session::new(seed);
            for jump in jumps {
                if jump {
                    apply_intent(&mut session, Intent::JumpPressed);
                }
                tick(&mut session);
                prop_assert!(session.avatar.vel_y <= session.avatar.max_fall_speed);
                prop_assert_eq!(session.obstacles.len(), 4);
            }
        }
    }
}
