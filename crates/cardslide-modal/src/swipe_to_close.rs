//! Swipe-to-close gesture for modal cards.

use std::cell::Cell;
use std::rc::Rc;

use cardslide_animation::{clamp, Easing, ProgressAnimation};
use cardslide_gesture::{
    create_gesture, Direction, Element, ElementRole, Gesture, GestureConfig, GestureDetail,
};

// Defaults for the card swipe animation.
pub const MIN_BACKDROP_OPACITY: f32 = 0.4;
pub const MIN_PRESENTING_SCALE: f32 = 0.95;
pub const MIN_Y_CARD: f32 = 44.0;
pub const MIN_Y_FULLSCREEN: f32 = 0.0;
pub const MIN_PRESENTING_Y: f32 = 0.0;

/// Horizon for the release decision: where the card would rest after this
/// long at the release velocity.
const PROJECTION_HORIZON_MS: f32 = 1000.0;

/// Projected resting fraction at which a release completes the dismissal.
const COMPLETION_THRESHOLD: f32 = 0.5;

/// Nudge added to the solved resume time so playback always makes
/// strictly forward (completing) or backward (reverting) progress, even
/// when the solved time lands exactly on a boundary.
const RESUME_NUDGE: f32 = 0.001;

pub(crate) struct SwipeToCloseController {
    height: f32,
    is_open: Cell<bool>,
    animation: Rc<dyn ProgressAnimation>,
    on_dismiss: Rc<dyn Fn()>,
}

impl SwipeToCloseController {
    fn new(card: &Element, animation: Rc<dyn ProgressAnimation>, on_dismiss: Rc<dyn Fn()>) -> Self {
        let height = card.offset_height();
        if height <= 0.0 {
            log::warn!("swipe-to-close registered on a card with height {height}");
        }
        Self {
            height,
            is_open: Cell::new(false),
            animation,
            on_dismiss,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.is_open.get()
    }

    /// The gesture yields when the interaction originates inside the
    /// card's scrollable content; anything else, including a targetless
    /// event, is allowed.
    pub(crate) fn can_start(&self, detail: &GestureDetail) -> bool {
        match detail.event.target.as_ref() {
            None => true,
            // A more nuanced policy could still allow content that does
            // not actually need to scroll.
            Some(target) => target.closest(ElementRole::ScrollContent).is_none(),
        }
    }

    pub(crate) fn on_start(&self) {
        let initial = if self.is_open.get() { 1.0 } else { 0.0 };
        self.animation.progress_start(true, initial);
    }

    pub(crate) fn on_move(&self, detail: &GestureDetail) {
        let step = detail.delta_y / self.height;
        if step < 0.0 {
            return;
        }
        self.animation.progress_step(step);
    }

    pub(crate) fn on_end(&self, detail: &GestureDetail) {
        let velocity = detail.velocity_y;
        let step = detail.delta_y / self.height;
        if step < 0.0 {
            return;
        }

        let threshold = (detail.delta_y + velocity * PROJECTION_HORIZON_MS) / self.height;
        let should_complete = threshold >= COMPLETION_THRESHOLD;

        let easing = if should_complete {
            Easing::ModalDecelerate
        } else {
            Easing::ModalAccelerate
        };
        self.animation.easing(easing);

        let nudge = if should_complete {
            -RESUME_NUDGE
        } else {
            RESUME_NUDGE
        };
        let resume_time = easing.time_for_progression(step) + nudge;

        let remaining = if should_complete {
            step * self.height
        } else {
            (1.0 - step) * self.height
        };
        let duration = compute_duration(remaining, velocity);

        self.is_open.set(should_complete);

        let on_dismiss = Rc::clone(&self.on_dismiss);
        self.animation.on_finish(Box::new(move || {
            if should_complete {
                on_dismiss();
            }
        }));
        self.animation.progress_end(
            if should_complete { 1.0 } else { 0.0 },
            resume_time,
            duration,
        );
    }
}

/// Completion time for the remaining travel at the release velocity,
/// scaled 10% snappier and bounded to [100, 400] ms. A zero velocity
/// divides to a non-finite raw duration, which the clamp saturates at the
/// ceiling.
pub fn compute_duration(remaining: f32, velocity: f32) -> f32 {
    clamp(100.0, remaining / (velocity.abs() * 1.1), 400.0)
}

/// Register the swipe-to-close gesture for a presented modal card.
///
/// Captures the card's layout height once; the controller does not
/// re-measure on resize. Returns the gesture handle the host feeds
/// pointer events into (and can enable/disable/destroy).
pub fn swipe_to_close_gesture(
    card: &Element,
    animation: Rc<dyn ProgressAnimation>,
    on_dismiss: impl Fn() + 'static,
) -> Gesture {
    let controller = Rc::new(SwipeToCloseController::new(
        card,
        animation,
        Rc::new(on_dismiss),
    ));

    create_gesture(
        GestureConfig::new("modalSwipeToClose")
            .priority(40)
            .direction(Direction::Y)
            .threshold(10.0)
            .can_start({
                let controller = Rc::clone(&controller);
                move |detail: &GestureDetail| controller.can_start(detail)
            })
            .on_start({
                let controller = Rc::clone(&controller);
                move || controller.on_start()
            })
            .on_move({
                let controller = Rc::clone(&controller);
                move |detail: &GestureDetail| controller.on_move(detail)
            })
            .on_end({
                let controller = Rc::clone(&controller);
                move |detail: &GestureDetail| controller.on_end(detail)
            }),
    )
}

#[cfg(test)]
#[path = "tests/swipe_to_close_tests.rs"]
mod tests;
