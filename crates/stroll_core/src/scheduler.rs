//! Per-frame scheduler.
//!
//! The scheduler does not own a loop.  The platform's per-frame primitive
//! (a winit redraw request, `requestAnimationFrame`, a test harness) is
//! injected as a [`FrameRequester`]; the scheduler asks it for exactly one
//! frame at a time and the platform answers by calling [`Scheduler::tick`].
//!
//! ```rust,ignore
//! let mut scheduler = Scheduler::new(window.clone());
//! scheduler.on_update(|game: &mut Game, dt| game.session.update(&game.input, dt));
//! scheduler.on_render(|game, surface, _dt| game.draw(surface));
//! scheduler.start();
//!
//! // in the platform's frame callback:
//! scheduler.tick(Instant::now(), &mut game, &mut draw_list);
//! ```

use std::fmt;

use log::{debug, trace};

use crate::draw::DrawSurface;
use crate::time::{FrameClock, Instant, Time};

/// The platform's "call me back next frame" primitive.
pub trait FrameRequester {
    fn request_frame(&self);
}

type UpdateFn<S> = Box<dyn FnMut(&mut S, f32)>;
type RenderFn<S> = Box<dyn FnMut(&S, &mut dyn DrawSurface, f32)>;

/// Invokes registered update and render callbacks once per frame.
///
/// Within one tick every update callback runs, in registration order, before
/// any render callback runs.  Render callbacks get a shared borrow of the
/// state so they cannot feed anything back into the simulation.
pub struct Scheduler<S> {
    clock:         FrameClock,
    requester:     Box<dyn FrameRequester>,
    running:       bool,
    frame_pending: bool,
    updates:       Vec<UpdateFn<S>>,
    renders:       Vec<RenderFn<S>>,
}

impl<S> Scheduler<S> {
    /// Creates a stopped scheduler that will pump frames through `requester`.
    pub fn new(requester: impl FrameRequester + 'static) -> Self {
        Self::with_clock(requester, FrameClock::new(Instant::now()))
    }

    /// Like [`new`](Self::new) with an explicit clock epoch.
    pub fn with_clock(requester: impl FrameRequester + 'static, clock: FrameClock) -> Self {
        Self {
            clock,
            requester: Box::new(requester),
            running: false,
            frame_pending: false,
            updates: Vec::new(),
            renders: Vec::new(),
        }
    }

    /// Register a simulation callback; receives the clamped `dt` in seconds.
    pub fn on_update(&mut self, f: impl FnMut(&mut S, f32) + 'static) {
        self.updates.push(Box::new(f));
    }

    /// Register a drawing callback; runs after every update callback.
    pub fn on_render(&mut self, f: impl FnMut(&S, &mut dyn DrawSurface, f32) + 'static) {
        self.renders.push(Box::new(f));
    }

    /// Start pumping frames.  A no-op while already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// [`start`](Self::start) with an explicit timestamp for the first `dt`.
    pub fn start_at(&mut self, now: Instant) {
        if self.running {
            trace!("scheduler already running");
            return;
        }
        debug!("scheduler started");
        self.running = true;
        self.clock.reset(now);
        // a request left over from before a stop is still going to arrive;
        // asking again would run two pumps side by side
        if !self.frame_pending {
            self.request_frame();
        }
    }

    /// Stop scheduling further ticks.  A tick already being delivered is not
    /// interrupted; the next one is simply ignored.
    pub fn stop(&mut self) {
        if self.running {
            debug!("scheduler stopped after {} ticks", self.clock.frame_count());
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Snapshot of the clock at `now` without advancing it.
    pub fn peek(&self, now: Instant) -> Time {
        self.clock.peek(now)
    }

    /// Run one frame.  Called by the platform in answer to a frame request.
    ///
    /// Returns the tick's [`Time`], or `None` if the scheduler was stopped
    /// and the frame was dropped.
    pub fn tick(&mut self, now: Instant, state: &mut S, surface: &mut dyn DrawSurface) -> Option<Time> {
        self.frame_pending = false;
        if !self.running {
            return None;
        }

        let time = self.clock.tick(now);
        let dt = time.delta;

        for update in &mut self.updates {
            update(&mut *state, dt);
        }
        for render in &mut self.renders {
            render(&*state, &mut *surface, dt);
        }

        self.request_frame();
        Some(time)
    }

    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.requester.request_frame();
    }
}

impl<S> fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("running", &self.running)
            .field("frame_pending", &self.frame_pending)
            .field("updates", &self.updates.len())
            .field("renders", &self.renders.len())
            .finish()
    }
}
