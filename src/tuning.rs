//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror [`crate::consts`];
//! a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Render surface width. Only the left edge bounds the simulation, so
    /// this is carried for the render host.
    pub screen_width: f32,
    pub screen_height: f32,
    /// Physics updates per second
    pub physics_hz: f64,

    pub avatar_spawn_x: f32,
    pub avatar_spawn_y: f32,
    pub avatar_size: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,

    pub initial_scroll_speed: f32,
    pub scroll_speed_step: f32,
    /// Points between scroll speed increases
    pub score_step: u32,

    pub obstacle_width: f32,
    /// Inclusive gap size range
    pub gap_size: (f32, f32),
    /// Inclusive horizontal spacing range between consecutive obstacles
    pub spacing: (f32, f32),
    pub gap_top_min: f32,
    pub stream_depth: usize,

    pub collision_tolerance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            physics_hz: PHYSICS_HZ,

            avatar_spawn_x: AVATAR_SPAWN_X,
            avatar_spawn_y: AVATAR_SPAWN_Y,
            avatar_size: AVATAR_SIZE,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,

            initial_scroll_speed: INITIAL_SCROLL_SPEED,
            scroll_speed_step: SCROLL_SPEED_STEP,
            score_step: SCORE_STEP,

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: (GAP_SIZE_MIN, GAP_SIZE_MAX),
            spacing: (SPACING_MIN, SPACING_MAX),
            gap_top_min: GAP_TOP_MIN,
            stream_depth: STREAM_DEPTH,

            collision_tolerance: COLLISION_TOLERANCE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Milliseconds per physics tick
    #[inline]
    pub fn period_ms(&self) -> f64 {
        1000.0 / self.physics_hz
    }

    /// Panic on values no session can run with.
    ///
    /// These are configuration bugs, so they are asserted rather than reported.
    pub fn assert_valid(&self) {
        assert!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen must have positive size"
        );
        assert!(self.physics_hz > 0.0, "physics rate must be positive");
        assert!(self.avatar_size > 0.0, "avatar size must be positive");
        assert!(self.max_fall_speed >= 0.0, "max fall speed must be non-negative");
        assert!(self.obstacle_width > 0.0, "obstacle width must be positive");
        assert!(
            0.0 <= self.gap_size.0 && self.gap_size.0 <= self.gap_size.1,
            "gap size range must be ordered and non-negative"
        );
        assert!(
            0.0 < self.spacing.0 && self.spacing.0 <= self.spacing.1,
            "spacing range must be ordered and positive"
        );
        assert!(self.score_step > 0, "score step must be positive");
        assert!(self.stream_depth > 0, "stream must hold at least one obstacle");
        assert!(
            self.collision_tolerance >= 0.0,
            "collision tolerance must be non-negative"
        );
    }
}
