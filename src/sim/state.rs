//! Session state and entity types
//!
//! The [`Session`] is the single mutable root of the world. Everything else is
//! reachable only through it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Rect;
use super::stream;
use crate::tuning::Tuning;

/// Whether physics ticks run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
}

/// What killed the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    TopBar,
    BottomBar,
    Floor,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Avatar entered a gap for the first time
    Scored { score: u32 },
    /// Scroll speed stepped up
    SpeedUp { scroll_speed: f32 },
    /// Head obstacle left the screen and was replaced
    ObstacleRecycled,
    /// Upward motion stopped at the top of the screen
    CeilingHit,
    /// Session was reset
    Died { cause: DeathCause },
}

/// The player-controlled square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x stays fixed after spawn
    pub pos: Vec2,
    /// Side length of the square hitbox
    pub size: f32,
    pub vel_y: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.avatar_spawn_x, tuning.avatar_spawn_y),
            size: tuning.avatar_size,
            vel_y: 0.0,
            gravity: tuning.gravity,
            max_fall_speed: tuning.max_fall_speed,
        }
    }

    /// Move by the current velocity, then accelerate (capped at terminal speed)
    pub fn advance(&mut self) {
        self.pos.y += self.vel_y;
        self.vel_y = (self.vel_y + self.gravity).min(self.max_fall_speed);
    }

    pub fn jump(&mut self, jump_velocity: f32) {
        self.vel_y = jump_velocity;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A vertical pair of bars with an opening between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge; decreases every tick
    pub pos_x: f32,
    pub width: f32,
    /// Height of the top bar (y of the gap's upper edge)
    pub gap_top: f32,
    pub gap_size: f32,
    /// Set once, when the avatar first enters the gap
    pub scored: bool,
    screen_height: f32,
}

impl Obstacle {
    pub fn new(pos_x: f32, width: f32, gap_top: f32, gap_size: f32, screen_height: f32) -> Self {
        debug_assert!(width > 0.0, "obstacle width must be positive");
        debug_assert!(gap_size >= 0.0, "gap size must be non-negative");
        Self {
            pos_x,
            width,
            gap_top,
            gap_size,
            scored: false,
            screen_height,
        }
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    #[inline]
    pub fn bottom_bar_height(&self) -> f32 {
        (self.screen_height - self.gap_bottom()).max(0.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos_x + self.width
    }

    /// Bar above the gap
    pub fn top_bar(&self) -> Rect {
        Rect::new(self.pos_x, 0.0, self.width, self.gap_top)
    }

    /// The opening itself (the scoring zone)
    pub fn gap_zone(&self) -> Rect {
        Rect::new(self.pos_x, self.gap_top, self.width, self.gap_size)
    }

    /// Bar below the gap
    pub fn bottom_bar(&self) -> Rect {
        Rect::new(self.pos_x, self.gap_bottom(), self.width, self.bottom_bar_height())
    }
}

/// Complete game world (deterministic given seed and intents)
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub avatar: Avatar,
    /// Sorted by increasing `pos_x`; append at tail, remove from head
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    /// Best score since the session was created (in-memory only)
    pub best_score: u32,
    /// Obstacle scroll speed in pixels per tick
    pub scroll_speed: f32,
    pub phase: GamePhase,
    /// Physics ticks run since creation
    pub time_ticks: u64,
    /// Number of resets caused by death
    pub deaths: u32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        tuning.assert_valid();

        let mut session = Self {
            avatar: Avatar::new(&tuning),
            obstacles: VecDeque::with_capacity(tuning.stream_depth),
            score: 0,
            best_score: 0,
            scroll_speed: tuning.initial_scroll_speed,
            phase: GamePhase::Running,
            time_ticks: 0,
            deaths: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
        };
        stream::seed(&mut session.obstacles, &session.tuning, &mut session.rng);
        session
    }

    /// Rebuild the world: fresh avatar, reseeded stream, zero score.
    ///
    /// The pause phase and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        stream::seed(&mut self.obstacles, &self.tuning, &mut self.rng);
        self.score = 0;
        self.scroll_speed = self.tuning.initial_scroll_speed;
        log::info!("Session reset (deaths: {}, best: {})", self.deaths, self.best_score);
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
        };
        log::info!("Phase: {:?}", self.phase);
    }

    /// Apply the jump impulse (only while running)
    pub fn jump(&mut self) {
        if self.phase == GamePhase::Running {
            self.avatar.jump(self.tuning.jump_velocity);
        }
    }
}
