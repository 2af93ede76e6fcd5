//! Finger-scroll state machine.
//!
//! Dragging with the primary button pushes the content 1:1. On release the
//! content either snaps to the nearest step (push mode) or keeps moving
//! and decelerates onto a step boundary (kinetic mode).

use fling_core::{
    release_velocity, Axis, DecelStatus, Deceleration, EventResponse, FrameClock, KineticConfig,
    MotionBuffer, MotionSample, PointerEvent, PointerGrab, Result, ScrollMode, ScrollTarget,
    Stylable, StyleStore, Timeline,
};
use std::time::Duration;

/// Scroller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Nothing happening
    #[default]
    Idle,
    /// Primary button held, content follows the pointer
    Dragging,
    /// Released in kinetic mode, frame ticks move the content
    Decelerating,
}

/// Finger-scroll engine, driven by pointer events and frame ticks.
#[derive(Debug)]
pub struct FingerScroll<C: FrameClock = Timeline> {
    config: KineticConfig,
    state: ScrollState,
    buffer: MotionBuffer,
    deceleration: Option<Deceleration>,
    clock: C,
}

impl FingerScroll<Timeline> {
    /// Create a scroller ticking from an unbounded [`Timeline`].
    pub fn new(config: KineticConfig) -> Result<Self> {
        Self::with_clock(config, Timeline::unbounded())
    }

    /// Create a scroller configured from a style store.
    pub fn from_style(store: &StyleStore, stylable: &dyn Stylable) -> Result<Self> {
        Self::new(KineticConfig::from_style(store, stylable)?)
    }
}

impl<C: FrameClock> FingerScroll<C> {
    /// Create a scroller with a host-supplied frame clock.
    pub fn with_clock(config: KineticConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buffer: MotionBuffer::new(config.motion_buffer)?,
            config,
            state: ScrollState::Idle,
            deceleration: None,
            clock,
        })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &KineticConfig {
        &self.config
    }

    /// Replace the configuration. Stops any deceleration and drops any
    /// buffered motion.
    pub fn set_config(&mut self, config: KineticConfig) -> Result<()> {
        config.validate()?;
        self.stop();
        self.buffer.set_capacity(config.motion_buffer)?;
        if self.state == ScrollState::Dragging {
            self.state = ScrollState::Idle;
        }
        self.config = config;
        Ok(())
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// The frame clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// In-flight deceleration, if any.
    #[must_use]
    pub const fn deceleration(&self) -> Option<&Deceleration> {
        self.deceleration.as_ref()
    }

    /// Buffered drag samples.
    #[must_use]
    pub const fn motion(&self) -> &MotionBuffer {
        &self.buffer
    }

    /// Feed a pointer event.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        target: &mut dyn ScrollTarget,
        grab: &mut dyn PointerGrab,
    ) -> Result<EventResponse> {
        match *event {
            PointerEvent::Press {
                position,
                timestamp,
                ..
            } => {
                if !event.is_primary_button() {
                    return Ok(EventResponse::Ignored);
                }
                self.stop();
                self.buffer.clear();
                self.buffer.push(MotionSample::new(position, timestamp));
                grab.grab();
                self.state = ScrollState::Dragging;
                tracing::debug!(x = position.x, y = position.y, "drag started");
                Ok(EventResponse::Consumed)
            }

            PointerEvent::Motion {
                position,
                timestamp,
            } => {
                if self.state != ScrollState::Dragging {
                    return Ok(EventResponse::Ignored);
                }
                if !grab.is_held() {
                    self.grab_lost();
                    return Ok(EventResponse::Ignored);
                }
                if let Some(last) = self.buffer.latest() {
                    let dx = f64::from(last.position.x - position.x);
                    let dy = f64::from(last.position.y - position.y);
                    target.scroll_by(Axis::Horizontal, dx);
                    target.scroll_by(Axis::Vertical, dy);
                }
                self.buffer.push(MotionSample::new(position, timestamp));
                Ok(EventResponse::Consumed)
            }

            PointerEvent::Release {
                position,
                timestamp,
                ..
            } => {
                if !event.is_primary_button() {
                    return Ok(EventResponse::Ignored);
                }
                if self.state != ScrollState::Dragging {
                    tracing::warn!(state = ?self.state, "release without a drag in progress");
                    return Ok(EventResponse::Ignored);
                }
                if !grab.is_held() {
                    // Someone else owns the pointer now; leave their grab alone.
                    self.grab_lost();
                    return Ok(EventResponse::Ignored);
                }
                grab.ungrab();
                self.state = ScrollState::Idle;

                let velocity = match self.config.mode {
                    ScrollMode::Push => None,
                    ScrollMode::Kinetic => release_velocity(&self.buffer, position, timestamp),
                };
                match velocity {
                    Some(velocity) => {
                        let deceleration =
                            Deceleration::plan(velocity, self.config.decel_rate, &*target)?;
                        tracing::debug!(
                            dx = velocity.dx,
                            dy = velocity.dy,
                            frames = deceleration.frame_budget(),
                            "deceleration planned"
                        );
                        self.deceleration = Some(deceleration);
                        self.clock.start();
                        self.state = ScrollState::Decelerating;
                    }
                    None => {
                        snap_both(target)?;
                        tracing::debug!("drag released, snapped");
                    }
                }
                Ok(EventResponse::Forward)
            }
        }
    }

    /// Deliver a frame tick with the wall time since the previous one.
    ///
    /// Ticks arriving while not decelerating are ignored. When the motion
    /// finishes the clock is stopped and both axes are snapped.
    pub fn on_frame(&mut self, delta: Duration, target: &mut dyn ScrollTarget) -> Result<ScrollState> {
        if self.state != ScrollState::Decelerating || !self.clock.is_running() {
            return Ok(self.state);
        }
        let Some(deceleration) = self.deceleration.as_mut() else {
            return Ok(self.state);
        };

        if deceleration.advance(delta, target) == DecelStatus::Finished {
            tracing::debug!(frames = deceleration.frames_run(), "deceleration finished");
            self.clock.stop();
            self.deceleration = None;
            self.state = ScrollState::Idle;
            snap_both(target)?;
        }
        Ok(self.state)
    }

    /// Halt any deceleration immediately, without snapping.
    pub fn stop(&mut self) {
        if self.state == ScrollState::Decelerating {
            tracing::debug!("deceleration stopped");
            self.state = ScrollState::Idle;
        }
        self.clock.stop();
        self.deceleration = None;
    }

    /// The host took the pointer grab away (e.g. a scrollbar). Abandons a
    /// drag without decelerating or snapping.
    pub fn grab_lost(&mut self) {
        if self.state == ScrollState::Dragging {
            tracing::debug!("pointer grab lost, drag abandoned");
            self.state = ScrollState::Idle;
            self.buffer.clear();
        }
    }
}

fn snap_both(target: &mut dyn ScrollTarget) -> Result<()> {
    target.snap(Axis::Horizontal)?;
    target.snap(Axis::Vertical)
}
