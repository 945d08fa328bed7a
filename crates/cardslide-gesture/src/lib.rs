//! Pointer-input recognition and gesture registration for Cardslide
//!
//! Hosts feed raw pointer events into a [`Gesture`] handle built from a
//! declarative [`GestureConfig`]; the recognizer applies a movement slop,
//! tracks velocity, and delivers start/move/end callbacks carrying
//! [`GestureDetail`] samples. The [`Element`] tree answers the
//! "does this interaction originate inside a scrollable sub-region"
//! query controllers use to yield to content scrolling.

mod element;
mod recognizer;
mod types;
mod velocity_tracker;

pub use element::*;
pub use recognizer::*;
pub use types::*;
pub use velocity_tracker::*;
