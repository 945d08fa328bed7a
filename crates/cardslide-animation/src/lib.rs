//! Progress-driven animation primitives for Cardslide
//!
//! Provides the easing curves used by the modal dismiss transition, the
//! cubic-bezier root solver that maps visual progress back to playback
//! time, and the progress-session capability the gesture layer drives.

mod bezier;
mod easing;
mod progress;
mod util;

pub use bezier::*;
pub use easing::*;
pub use progress::*;
pub use util::*;
