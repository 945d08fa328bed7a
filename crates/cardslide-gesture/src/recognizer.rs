//! Gesture registration and recognition.
//!
//! A gesture is registered declaratively: name, priority, allowed axis,
//! movement slop, and four lifecycle callbacks. The returned handle owns
//! the recognition state machine; the host feeds it raw pointer events
//! and the handle delivers start/move/end with velocity-carrying samples.
//!
//! One interaction is active at a time per handle. Delivery is serialized
//! here so downstream controllers need no reentrancy guarding.

use std::cell::RefCell;

use crate::types::{Direction, GestureDetail, Point, PointerEvent};
use crate::velocity_tracker::VelocityTracker1D;

/// Default recognition slop in logical pixels.
///
/// Large enough to ignore finger jitter, small enough that an intentional
/// drag feels immediate; matches common platform touch-slop conventions.
pub const DEFAULT_THRESHOLD: f32 = 10.0;

pub type CanStartFn = Box<dyn Fn(&GestureDetail) -> bool>;
pub type StartFn = Box<dyn FnMut()>;
pub type DetailFn = Box<dyn FnMut(&GestureDetail)>;

/// Declarative gesture registration.
///
/// `priority` is arbitration data for a host-level conflict resolver
/// (higher wins); this crate's single-gesture recognizer carries it but
/// does not arbitrate.
pub struct GestureConfig {
    pub name: String,
    pub priority: i32,
    pub direction: Direction,
    pub threshold_px: f32,
    can_start: Option<CanStartFn>,
    on_start: Option<StartFn>,
    on_move: Option<DetailFn>,
    on_end: Option<DetailFn>,
}

impl GestureConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            direction: Direction::Y,
            threshold_px: DEFAULT_THRESHOLD,
            can_start: None,
            on_start: None,
            on_move: None,
            on_end: None,
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn threshold(mut self, threshold_px: f32) -> Self {
        self.threshold_px = threshold_px;
        self
    }

    /// Queried on pointer down; returning false suppresses the whole
    /// interaction. Absent means "always allowed".
    pub fn can_start(mut self, f: impl Fn(&GestureDetail) -> bool + 'static) -> Self {
        self.can_start = Some(Box::new(f));
        self
    }

    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_move(mut self, f: impl FnMut(&GestureDetail) + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(&GestureDetail) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No pointer down.
    Idle,
    /// Pointer down was vetoed by `can_start`; ignore until pointer up.
    Rejected,
    /// Pointer down accepted, movement still below the slop.
    Pending,
    /// Slop crossed; start delivered, moves flowing.
    Active,
}

struct RecognizerState {
    phase: Phase,
    start: Point,
    tracker_x: VelocityTracker1D,
    tracker_y: VelocityTracker1D,
    enabled: bool,
    destroyed: bool,
}

/// Handle to a registered gesture.
///
/// Build one with [`create_gesture`]; feed it `pointer_down`,
/// `pointer_move`, `pointer_up` (and `pointer_cancel`) from the host's
/// input loop.
pub struct Gesture {
    config: RefCell<GestureConfig>,
    state: RefCell<RecognizerState>,
}

/// Register a gesture from its declarative configuration.
pub fn create_gesture(config: GestureConfig) -> Gesture {
    Gesture {
        config: RefCell::new(config),
        state: RefCell::new(RecognizerState {
            phase: Phase::Idle,
            start: Point::default(),
            tracker_x: VelocityTracker1D::new(),
            tracker_y: VelocityTracker1D::new(),
            enabled: true,
            destroyed: false,
        }),
    }
}

impl Gesture {
    pub fn name(&self) -> String {
        self.config.borrow().name.clone()
    }

    pub fn priority(&self) -> i32 {
        self.config.borrow().priority
    }

    pub fn enable(&self) {
        let mut state = self.state.borrow_mut();
        if !state.destroyed {
            state.enabled = true;
        }
    }

    /// Stop recognizing. An in-flight interaction is abandoned without an
    /// end delivery.
    pub fn disable(&self) {
        let mut state = self.state.borrow_mut();
        state.enabled = false;
        reset(&mut state);
    }

    /// Tear the gesture down; callbacks are dropped and all further
    /// events are ignored.
    pub fn destroy(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.destroyed = true;
            state.enabled = false;
            reset(&mut state);
        }
        let mut config = self.config.borrow_mut();
        config.can_start = None;
        config.on_start = None;
        config.on_move = None;
        config.on_end = None;
    }

    pub fn pointer_down(&self, event: &PointerEvent) {
        {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                return;
            }
            if state.phase != Phase::Idle {
                log::warn!("pointer down during an open interaction; resetting");
                reset(&mut state);
            }
            state.start = event.position;
            state.tracker_x.add_sample(event.time_ms, event.position.x);
            state.tracker_y.add_sample(event.time_ms, event.position.y);
            state.phase = Phase::Pending;
        }

        let detail = GestureDetail::new(event.clone(), 0.0, 0.0);
        // Callbacks are taken out for the call so they can safely touch
        // this handle again (the borrow is not held across the call).
        let query = self.config.borrow_mut().can_start.take();
        let allowed = match query {
            None => true,
            Some(f) => {
                let allowed = f(&detail);
                self.config.borrow_mut().can_start = Some(f);
                allowed
            }
        };
        if !allowed {
            self.state.borrow_mut().phase = Phase::Rejected;
        }
    }

    pub fn pointer_move(&self, event: &PointerEvent) {
        let (phase, detail, threshold_crossed) = {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                return;
            }
            match state.phase {
                Phase::Idle | Phase::Rejected => return,
                Phase::Pending | Phase::Active => {}
            }

            state.tracker_x.add_sample(event.time_ms, event.position.x);
            state.tracker_y.add_sample(event.time_ms, event.position.y);

            let detail = sample(&state, event);
            let crossed = if state.phase == Phase::Pending {
                let travel = match self.config.borrow().direction {
                    Direction::X => detail.delta_x,
                    Direction::Y => detail.delta_y,
                };
                travel.abs() > self.config.borrow().threshold_px
            } else {
                false
            };
            if crossed {
                state.phase = Phase::Active;
            }
            (state.phase, detail, crossed)
        };

        if threshold_crossed {
            let callback = self.config.borrow_mut().on_start.take();
            if let Some(mut f) = callback {
                f();
                self.config.borrow_mut().on_start = Some(f);
            }
        } else if phase == Phase::Active {
            let callback = self.config.borrow_mut().on_move.take();
            if let Some(mut f) = callback {
                f(&detail);
                self.config.borrow_mut().on_move = Some(f);
            }
        }
    }

    pub fn pointer_up(&self, event: &PointerEvent) {
        let detail = {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                return;
            }
            let was_active = state.phase == Phase::Active;
            let detail = if was_active {
                state.tracker_x.add_sample(event.time_ms, event.position.x);
                state.tracker_y.add_sample(event.time_ms, event.position.y);
                Some(sample(&state, event))
            } else {
                None
            };
            reset(&mut state);
            detail
        };

        if let Some(detail) = detail {
            let callback = self.config.borrow_mut().on_end.take();
            if let Some(mut f) = callback {
                f(&detail);
                self.config.borrow_mut().on_end = Some(f);
            }
        }
    }

    /// Host-level cancellation. Recognition state resets, but no end
    /// delivery happens; whatever session a controller opened stays open.
    pub fn pointer_cancel(&self, _event: &PointerEvent) {
        let mut state = self.state.borrow_mut();
        reset(&mut state);
    }
}

/// Snapshot the interaction as a gesture sample: displacement from the
/// pointer-down origin plus tracker-derived velocities.
fn sample(state: &RecognizerState, event: &PointerEvent) -> GestureDetail {
    GestureDetail::new(
        event.clone(),
        event.position.x - state.start.x,
        event.position.y - state.start.y,
    )
    .with_velocity(state.tracker_x.velocity(), state.tracker_y.velocity())
}

fn reset(state: &mut RecognizerState) {
    state.phase = Phase::Idle;
    state.tracker_x.reset();
    state.tracker_y.reset();
}

#[cfg(test)]
#[path = "tests/recognizer_tests.rs"]
mod tests;
