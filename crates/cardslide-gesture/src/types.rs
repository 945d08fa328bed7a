//! Pointer events and gesture samples.

use crate::element::Element;
use web_time::Instant;

/// Axis a gesture is allowed to recognize along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

fn now_ms() -> i64 {
    thread_local! {
        static EPOCH: Instant = Instant::now();
    }
    EPOCH.with(|epoch| epoch.elapsed().as_millis() as i64)
}

/// A low-level input event as delivered by the host.
///
/// Consumers treat it as read-only; the target is only inspected for
/// start-permission queries.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub target: Option<Element>,
    pub position: Point,
    pub time_ms: i64,
}

impl PointerEvent {
    /// Event stamped with the process-local monotonic clock.
    pub fn new(target: Option<Element>, position: Point) -> Self {
        Self::at(target, position, now_ms())
    }

    /// Event stamped with the host's own clock, for hosts (and tests)
    /// that deliver recorded or synthetic input.
    pub fn at(target: Option<Element>, position: Point, time_ms: i64) -> Self {
        Self {
            target,
            position,
            time_ms,
        }
    }
}

/// Instantaneous state of an in-progress gesture.
///
/// Displacements are measured from the pointer-down position; velocities
/// are in logical pixels per millisecond. Not retained by consumers
/// beyond the callback invocation.
#[derive(Debug, Clone)]
pub struct GestureDetail {
    pub event: PointerEvent,
    pub delta_x: f32,
    pub delta_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl GestureDetail {
    pub fn new(event: PointerEvent, delta_x: f32, delta_y: f32) -> Self {
        Self {
            event,
            delta_x,
            delta_y,
            velocity_x: 0.0,
            velocity_y: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity_x: f32, velocity_y: f32) -> Self {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self
    }
}
