//! Swipe-to-close gesture controller for Cardslide modal cards
//!
//! Translates a vertical drag on a presented card into live dismiss
//! progress, then decides on release whether the card completes its
//! dismissal or eases back, based on a velocity-projected threshold.

mod swipe_to_close;

pub use swipe_to_close::*;
