//! Easing functions for the modal dismiss transition.

use crate::bezier::{bezier_progress, time_given_progression};

/// Easing curves used by progress sessions.
///
/// The two modal curves are deliberately asymmetric: a completing swipe
/// decelerates into the dismissed position, while a reverting swipe eases
/// back toward fully presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// cubic-bezier(1, 0, 0.68, 0.28): decelerating return toward the
    /// presented (closed-gesture) position.
    ModalAccelerate,
    /// cubic-bezier(0.32, 0.72, 0, 1): decelerating approach toward the
    /// dismissed position.
    ModalDecelerate,
}

impl Easing {
    /// The curve's free control points, `None` for linear.
    pub fn control_points(&self) -> Option<((f32, f32), (f32, f32))> {
        match self {
            Easing::Linear => None,
            Easing::ModalAccelerate => Some(((1.0, 0.0), (0.68, 0.28))),
            Easing::ModalDecelerate => Some(((0.32, 0.72), (0.0, 1.0))),
        }
    }

    /// Apply the easing to a playback-time fraction in [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self.control_points() {
            None => fraction.clamp(0.0, 1.0),
            Some((c1, c2)) => bezier_progress(c1, c2, fraction),
        }
    }

    /// Playback-time fraction at which this curve's output equals
    /// `progression`. Used to resume an eased animation from the progress a
    /// drag left it at without a visual jump.
    pub fn time_for_progression(&self, progression: f32) -> f32 {
        match self.control_points() {
            None => progression.clamp(0.0, 1.0),
            Some((c1, c2)) => time_given_progression(c1, c2, progression),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}
