// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The redraw controller.
//!
//! A full render costs width x height x max_iterations in the worst
//! case, so we cannot afford one per key-repeat or wheel click.  The
//! controller owns the viewport and folds input into it as it
//! arrives, but it only renders once input has been quiet for the
//! debounce interval.  Intermediate viewports are never drawn; only
//! the latest one matters.
//!
//! The policy lives in `RedrawState`, which is a plain state machine
//! driven by timestamps and can be tested without threads.  The
//! `RedrawController` runs that machine on a background thread of its
//! own: input is posted to it over a channel, so the event loop that
//! posts never waits on a render, and the debounce is a timed receive
//! on that channel rather than a polling loop.
//!
//! ```text
//!            input                      quiet for `debounce`
//!   Idle ----------> PendingDebounce ----------------------> Rendering
//!    ^                 |      ^                                 |  |
//!    |                 +------+ input: move the deadline        |  |
//!    |                                                          |  |
//!    +------------ pass done, nothing new ----------------------+  |
//!                      PendingDebounce <-- pass done, input came --+
//! ```

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info};

use crate::buffer::PixelBuffer;
use crate::config::RedrawSettings;
use crate::errors::{MandelError, Result};
use crate::planes::ViewportState;
use crate::present::Presenter;
use crate::scheduler::RenderScheduler;

/// What the host can ask of the explorer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Move the view toward smaller real parts.
    PanLeft,
    /// Move the view toward larger real parts.
    PanRight,
    /// Move the view toward the top of the image.
    PanUp,
    /// Move the view toward the bottom of the image.
    PanDown,
    /// Magnify.
    ZoomIn,
    /// Pull back.
    ZoomOut,
    /// Stop.
    Quit,
}

/// Whether to keep going after an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Carry on.
    Continue,
    /// A quit was received.
    Quit,
}

/// Where the controller is in its redraw cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The screen shows the current viewport.
    Idle,
    /// The viewport has changed; redraw at `deadline` unless more
    /// input arrives first.
    PendingDebounce {
        /// When to render.
        deadline: Instant,
    },
    /// A pass is running.  `dirty` is set if input arrived meanwhile.
    Rendering {
        /// The viewport moved during the pass.
        dirty: bool,
    },
}

/// The debounce policy, with time passed in rather than read.
#[derive(Debug)]
pub struct RedrawState {
    viewport: ViewportState,
    settings: RedrawSettings,
    phase: Phase,
    last_input: Option<Instant>,
}

impl RedrawState {
    /// Starts idle, looking at `viewport`.
    pub fn new(viewport: ViewportState, settings: RedrawSettings) -> Self {
        RedrawState {
            viewport,
            settings,
            phase: Phase::Idle,
            last_input: None,
        }
    }

    /// The current viewport.
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the next render is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::PendingDebounce { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Ask for a render at `now` without touching the viewport.  Used
    /// to paint the first frame.
    pub fn request(&mut self, now: Instant) {
        match self.phase {
            Phase::Rendering { .. } => self.phase = Phase::Rendering { dirty: true },
            _ => self.phase = Phase::PendingDebounce { deadline: now },
        }
        self.last_input = Some(now);
    }

    /// Fold one input event, received at `at`, into the viewport.
    pub fn apply(&mut self, event: InputEvent, at: Instant) -> Flow {
        let RedrawSettings {
            debounce,
            pan_step,
            zoom_factor,
        } = self.settings;
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::PanLeft => self.viewport.pan(-pan_step, 0.0),
            InputEvent::PanRight => self.viewport.pan(pan_step, 0.0),
            InputEvent::PanUp => self.viewport.pan(0.0, -pan_step),
            InputEvent::PanDown => self.viewport.pan(0.0, pan_step),
            InputEvent::ZoomIn => self.viewport.zoom_in(zoom_factor),
            InputEvent::ZoomOut => self.viewport.zoom_out(zoom_factor),
        }
        self.phase = match self.phase {
            Phase::Rendering { .. } => Phase::Rendering { dirty: true },
            _ => Phase::PendingDebounce {
                deadline: at + debounce,
            },
        };
        self.last_input = Some(at);
        debug!(
            "{:?}: zoom {} centre {} ({:?})",
            event, self.viewport.zoom, self.viewport.center, self.phase
        );
        Flow::Continue
    }

    /// If the pending render is due at `now`, start it: move to
    /// `Rendering` and return the viewport to draw.
    pub fn take_due(&mut self, now: Instant) -> Option<ViewportState> {
        match self.phase {
            Phase::PendingDebounce { deadline } if now >= deadline => {
                self.phase = Phase::Rendering { dirty: false };
                Some(self.viewport)
            }
            _ => None,
        }
    }

    /// The pass has finished, successfully or not.  Go idle, or back to
    /// waiting if the viewport moved while we were busy.
    pub fn finish(&mut self) {
        self.phase = match (self.phase, self.last_input) {
            (Phase::Rendering { dirty: true }, Some(at)) => Phase::PendingDebounce {
                deadline: at + self.settings.debounce,
            },
            (Phase::Rendering { .. }, _) => Phase::Idle,
            (other, _) => other,
        };
    }
}

type Stamped = (InputEvent, Instant);

/// Owns the viewport and the back buffer, and decides when to render.
pub struct RedrawController<P> {
    state: RedrawState,
    scheduler: RenderScheduler,
    presenter: P,
    buffer: PixelBuffer,
    render_on_start: bool,
}

impl<P: Presenter + 'static> RedrawController<P> {
    /// A controller at the default viewport and pacing that shows its
    /// frames through `presenter`.
    pub fn new(scheduler: RenderScheduler, presenter: P) -> Self {
        RedrawController {
            state: RedrawState::new(ViewportState::default(), RedrawSettings::default()),
            buffer: scheduler.blank(),
            scheduler,
            presenter,
            render_on_start: false,
        }
    }

    /// Start somewhere other than the origin.
    pub fn with_viewport(mut self, viewport: ViewportState) -> Self {
        self.state.viewport = viewport;
        self
    }

    /// Change the debounce and step sizes.
    pub fn with_settings(mut self, settings: RedrawSettings) -> Self {
        self.state.settings = settings;
        self
    }

    /// Draw the starting viewport straight away rather than waiting
    /// for the first input.
    pub fn render_on_start(mut self) -> Self {
        self.render_on_start = true;
        self
    }

    /// Start the controller on its own thread.
    pub fn spawn(self) -> Result<RedrawHandle> {
        let (inbox, events) = unbounded();
        let thread = thread::Builder::new()
            .name("redraw".to_string())
            .spawn(move || self.run(events))
            .map_err(MandelError::Thread)?;
        Ok(RedrawHandle { inbox, thread })
    }

    fn run(mut self, events: Receiver<Stamped>) -> ViewportState {
        info!(
            "redraw controller started, debounce {:?}",
            self.state.settings.debounce
        );
        if self.render_on_start {
            self.state.request(Instant::now());
        }
        loop {
            let next = match self.state.deadline() {
                Some(deadline) => {
                    match events.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                        Ok(stamped) => Some(stamped),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match events.recv() {
                    Ok(stamped) => Some(stamped),
                    Err(_) => break,
                },
            };
            let flow = match next {
                Some((event, at)) => self.state.apply(event, at),
                None => match self.state.take_due(Instant::now()) {
                    Some(snapshot) => self.redraw(snapshot, &events),
                    None => Flow::Continue,
                },
            };
            if flow == Flow::Quit {
                break;
            }
        }
        info!("redraw controller stopped");
        self.state.viewport()
    }

    fn redraw(&mut self, snapshot: ViewportState, events: &Receiver<Stamped>) -> Flow {
        let result = self.scheduler.render(snapshot, &mut self.buffer);
        // Input that queued up while we were busy marks the state dirty.
        for (event, at) in events.try_iter() {
            if self.state.apply(event, at) == Flow::Quit {
                return Flow::Quit;
            }
        }
        match result {
            Ok(()) => self.presenter.present(&self.buffer, &snapshot),
            Err(e) => error!("render pass abandoned: {}", e),
        }
        self.state.finish();
        Flow::Continue
    }
}

/// The host's end of a running controller.
#[derive(Debug)]
pub struct RedrawHandle {
    inbox: Sender<Stamped>,
    thread: JoinHandle<ViewportState>,
}

impl RedrawHandle {
    /// Post an input event, stamped now.  Never blocks.  Returns false
    /// if the controller has already stopped.
    pub fn send(&self, event: InputEvent) -> bool {
        self.inbox.send((event, Instant::now())).is_ok()
    }

    /// Wait for the controller to stop, returning its final viewport.
    pub fn join(self) -> Result<ViewportState> {
        let RedrawHandle { inbox, thread } = self;
        drop(inbox);
        thread.join().map_err(|_| MandelError::ControllerPanicked)
    }

    /// Ask the controller to stop and wait for it.
    pub fn quit(self) -> Result<ViewportState> {
        self.send(InputEvent::Quit);
        self.join()
    }
}
