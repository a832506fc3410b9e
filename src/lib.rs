//! Gap Runner - A single-screen gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (frame gate, physics, obstacle stream, collisions, scoring)
//! - `platform`: Host adapters (keyboard edge tracking, frame scheduling, render hook)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 576.0;

    /// Fixed physics rate
    pub const PHYSICS_HZ: f64 = 60.0;

    /// Avatar defaults
    pub const AVATAR_SPAWN_X: f32 = 100.0;
    pub const AVATAR_SPAWN_Y: f32 = 200.0;
    pub const AVATAR_SIZE: f32 = 30.0;
    /// Upward impulse applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Per-tick downward acceleration
    pub const GRAVITY: f32 = 1.0;
    /// Terminal fall velocity
    pub const MAX_FALL_SPEED: f32 = 18.0;

    /// Scroll speed at session start (pixels per tick)
    pub const INITIAL_SCROLL_SPEED: f32 = 4.0;
    /// Scroll speed added on every `SCORE_STEP` points
    pub const SCROLL_SPEED_STEP: f32 = 0.25;
    pub const SCORE_STEP: u32 = 10;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const GAP_SIZE_MIN: f32 = 150.0;
    pub const GAP_SIZE_MAX: f32 = 250.0;
    pub const SPACING_MIN: f32 = 300.0;
    pub const SPACING_MAX: f32 = 500.0;
    /// Lowest allowed top edge of a gap
    pub const GAP_TOP_MIN: f32 = 50.0;
    /// Obstacles kept in the stream at all times
    pub const STREAM_DEPTH: usize = 4;
    /// Obstacles checked for collisions each tick (leftmost first)
    pub const ACTIVE_WINDOW: usize = 2;

    /// Collision forgiveness on trailing edges (pixels)
    pub const COLLISION_TOLERANCE: f32 = 8.0;
}
