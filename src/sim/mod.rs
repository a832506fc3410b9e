//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (gated by [`FrameGate`])
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod aabb;
pub mod clock;
pub mod state;
pub mod stream;
pub mod tick;

pub use aabb::{Rect, intersects};
pub use clock::{FrameGate, TimerId, should_tick};
pub use state::{Avatar, DeathCause, GameEvent, GamePhase, Obstacle, Session};
pub use tick::{Intent, apply_intent, tick};
