//! Animation-frame driver
//!
//! The host owns a display-rate callback (e.g. `requestAnimationFrame`). Each
//! fired frame re-registers the next one, consults the frame gate, runs at
//! most one physics tick and renders. A death restarts the registration
//! through the [`LoopController`], which never leaves two loops pending.

use std::collections::VecDeque;

use crate::sim::{
    Avatar, FrameGate, GameEvent, Intent, Obstacle, Session, TimerId, apply_intent, tick,
};

/// Opaque registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host facility for scheduling the next animation frame
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    /// Must be a no-op for unknown or already-fired handles
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What the presentation layer gets each frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub avatar: &'a Avatar,
    pub obstacles: &'a VecDeque<Obstacle>,
    pub score: u32,
    pub paused: bool,
}

impl<'a> FrameView<'a> {
    pub fn of(session: &'a Session) -> Self {
        Self {
            avatar: &session.avatar,
            obstacles: &session.obstacles,
            score: session.score,
            paused: session.is_paused(),
        }
    }
}

pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>);
}

/// In-memory scheduler for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Fire the oldest live registration
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(i) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(i);
        }
    }
}

/// Tracks the single outstanding frame registration
#[derive(Debug, Default)]
pub struct LoopController {
    current: Option<FrameHandle>,
}

impl LoopController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<FrameHandle> {
        self.current
    }

    /// Register the first frame; no-op if already running
    pub fn start<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if self.current.is_none() {
            self.current = Some(scheduler.request_frame());
        }
    }

    /// Register the follow-up of a frame that just fired
    pub fn rearm<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.current = Some(scheduler.request_frame());
    }

    /// Drop any outstanding registration and register a fresh frame
    pub fn restart<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.stop(scheduler);
        self.current = Some(scheduler.request_frame());
    }

    pub fn stop<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.current.take() {
            scheduler.cancel_frame(handle);
        }
    }
}

/// Session plus the timing state that drives it
#[derive(Debug)]
pub struct GameLoop {
    pub session: Session,
    pub gate: FrameGate,
    pub controller: LoopController,
    /// Events from every tick since the last drain
    events: Vec<GameEvent>,
}

impl GameLoop {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            gate: FrameGate::new(),
            controller: LoopController::new(),
            events: Vec::new(),
        }
    }

    pub fn start<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        self.controller.start(scheduler);
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        apply_intent(&mut self.session, intent);
    }

    /// Handle one fired animation frame at `now_ms`.
    ///
    /// Returns whether a physics tick ran.
    pub fn on_frame<S: FrameScheduler, R: Renderer>(
        &mut self,
        now_ms: f64,
        scheduler: &mut S,
        renderer: &mut R,
    ) -> bool {
        self.controller.rearm(scheduler);

        let due = self
            .gate
            .should_tick(TimerId::Physics, self.session.tuning.physics_hz, now_ms);
        let ticked = due && !self.session.is_paused();

        if ticked {
            tick(&mut self.session);
            let died = self
                .session
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Died { .. }));
            self.events.extend_from_slice(&self.session.events);
            if died {
                self.controller.restart(scheduler);
            }
        }

        renderer.render(&FrameView::of(&self.session));
        ticked
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
