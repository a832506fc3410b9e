//! Platform abstraction layer
//!
//! Thin host-side adapters around the simulation:
//! - Input events (key edges to intents)
//! - Animation-frame scheduling and the per-frame driver
//! - The render hook

pub mod frame_loop;
pub mod input;

pub use frame_loop::{
    FrameHandle, FrameScheduler, FrameView, GameLoop, LoopController, ManualScheduler, Renderer,
};
pub use input::{Key, KeyboardAdapter};
