use super::*;

use cardslide_animation::{Easing, ProgressAnimation, ProgressTimeline};
use cardslide_gesture::{Element, ElementRole, GestureDetail, Point, PointerEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum SessionCall {
    Start { snap: bool, progress: f32 },
    Step(f32),
    Easing(Easing),
    End { play_to: f32, offset: f32, duration: f32 },
}

/// Records session calls and holds finish callbacks until fired.
#[derive(Default)]
struct RecordingAnimation {
    calls: RefCell<Vec<SessionCall>>,
    finish: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl RecordingAnimation {
    fn calls(&self) -> Vec<SessionCall> {
        self.calls.borrow().clone()
    }

    fn fire_finish(&self) {
        for callback in self.finish.borrow_mut().drain(..) {
            callback();
        }
    }
}

impl ProgressAnimation for RecordingAnimation {
    fn progress_start(&self, use_snap: bool, initial_progress: f32) {
        // Match ProgressTimeline: a new session supersedes the old one,
        // dropping its pending finish callbacks unfired.
        self.finish.borrow_mut().clear();
        self.calls.borrow_mut().push(SessionCall::Start {
            snap: use_snap,
            progress: initial_progress,
        });
    }

    fn progress_step(&self, step: f32) {
        self.calls.borrow_mut().push(SessionCall::Step(step));
    }

    fn progress_end(&self, play_to: f32, time_offset: f32, duration_ms: f32) {
        self.calls.borrow_mut().push(SessionCall::End {
            play_to,
            offset: time_offset,
            duration: duration_ms,
        });
    }

    fn on_finish(&self, callback: Box<dyn FnOnce()>) {
        self.finish.borrow_mut().push(callback);
    }

    fn easing(&self, easing: Easing) {
        self.calls.borrow_mut().push(SessionCall::Easing(easing));
    }
}

struct Rig {
    controller: Rc<SwipeToCloseController>,
    animation: Rc<RecordingAnimation>,
    dismissed: Rc<Cell<u32>>,
}

fn rig(height: f32) -> Rig {
    let card = Element::new(ElementRole::ModalCard, height);
    let animation = Rc::new(RecordingAnimation::default());
    let dismissed = Rc::new(Cell::new(0u32));
    let on_dismiss: Rc<dyn Fn()> = {
        let dismissed = Rc::clone(&dismissed);
        Rc::new(move || dismissed.set(dismissed.get() + 1))
    };
    let animation_capability: Rc<dyn ProgressAnimation> =
        Rc::clone(&animation) as Rc<dyn ProgressAnimation>;
    let controller = Rc::new(SwipeToCloseController::new(
        &card,
        animation_capability,
        on_dismiss,
    ));
    Rig {
        controller,
        animation,
        dismissed,
    }
}

fn detail(delta_y: f32, velocity_y: f32) -> GestureDetail {
    detail_on(None, delta_y, velocity_y)
}

fn detail_on(target: Option<Element>, delta_y: f32, velocity_y: f32) -> GestureDetail {
    GestureDetail::new(PointerEvent::at(target, Point::default(), 0), 0.0, delta_y)
        .with_velocity(0.0, velocity_y)
}

fn last_end(calls: &[SessionCall]) -> Option<(f32, f32, f32)> {
    calls.iter().rev().find_map(|call| match call {
        SessionCall::End {
            play_to,
            offset,
            duration,
        } => Some((*play_to, *offset, *duration)),
        _ => None,
    })
}

// Worked example: height=400, drag to 250 px, release at 0.5 px/ms.
// Projection (250 + 500) / 400 = 1.875 completes the dismissal.
#[test]
fn fast_long_drag_completes_and_dismisses() {
    let r = rig(400.0);

    r.controller.on_start();
    r.controller.on_move(&detail(100.0, 0.8));
    r.controller.on_end(&detail(250.0, 0.5));

    let calls = r.animation.calls();
    assert_eq!(
        calls[0],
        SessionCall::Start {
            snap: true,
            progress: 0.0
        }
    );
    assert_eq!(calls[1], SessionCall::Step(0.25));
    assert!(calls.contains(&SessionCall::Easing(Easing::ModalDecelerate)));

    let (play_to, offset, duration) = last_end(&calls).expect("progress_end issued");
    assert_eq!(play_to, 1.0);
    let expected_offset = Easing::ModalDecelerate.time_for_progression(0.625) - 0.001;
    assert!((offset - expected_offset).abs() < 1e-4);
    // 250 px remaining at 0.55 px/ms effective exceeds the 400 ms cap.
    assert_eq!(duration, 400.0);

    assert!(r.controller.is_open());
    assert_eq!(r.dismissed.get(), 0);
    r.animation.fire_finish();
    assert_eq!(r.dismissed.get(), 1);
}

// Worked example: height=400, release at 50 px with no velocity.
// Projection 0.125 reverts; zero velocity saturates duration at 400 ms.
#[test]
fn slow_short_drag_reverts_without_dismissing() {
    let r = rig(400.0);

    r.controller.on_start();
    r.controller.on_end(&detail(50.0, 0.0));

    let calls = r.animation.calls();
    assert!(calls.contains(&SessionCall::Easing(Easing::ModalAccelerate)));

    let (play_to, offset, duration) = last_end(&calls).expect("progress_end issued");
    assert_eq!(play_to, 0.0);
    let expected_offset = Easing::ModalAccelerate.time_for_progression(0.125) + 0.001;
    assert!((offset - expected_offset).abs() < 1e-4);
    assert_eq!(duration, 400.0);

    assert!(!r.controller.is_open());
    r.animation.fire_finish();
    assert_eq!(r.dismissed.get(), 0);
}

#[test]
fn move_forwards_displacement_fraction_unchanged() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_move(&detail(100.0, 0.0));
    r.controller.on_move(&detail(500.0, 0.0));

    let calls = r.animation.calls();
    assert_eq!(calls[1], SessionCall::Step(0.25));
    // Values past 1.0 are forwarded untouched; clamping is the
    // renderer's concern.
    assert_eq!(calls[2], SessionCall::Step(1.25));
}

#[test]
fn upward_move_is_dead_motion() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_move(&detail(-10.0, 0.0));

    let calls = r.animation.calls();
    assert_eq!(calls.len(), 1, "no step for negative displacement: {calls:?}");
}

#[test]
fn upward_end_abandons_interaction() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(-10.0, 2.0));

    let calls = r.animation.calls();
    assert_eq!(calls.len(), 1, "abandoned end issues nothing: {calls:?}");
    assert!(!r.controller.is_open());
    r.animation.fire_finish();
    assert_eq!(r.dismissed.get(), 0);
}

#[test]
fn decision_matches_projected_threshold_boundary() {
    // delta + velocity * 1000 == height / 2 exactly at the boundary.
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(100.0, 0.1));
    assert!(r.controller.is_open(), ">= 0.5 completes");

    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(100.0, 0.0999));
    assert!(!r.controller.is_open(), "< 0.5 reverts");
}

#[test]
fn fast_flick_completes_from_small_displacement() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(20.0, 2.0));
    assert!(r.controller.is_open());
}

#[test]
fn slow_long_drag_completes_on_displacement_alone() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(300.0, 0.0));
    assert!(r.controller.is_open());
}

#[test]
fn second_drag_on_open_card_starts_from_full_progress() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(300.0, 1.0));
    assert!(r.controller.is_open());

    r.controller.on_start();
    let calls = r.animation.calls();
    assert_eq!(
        calls.last(),
        Some(&SessionCall::Start {
            snap: true,
            progress: 1.0
        })
    );
}

#[test]
fn state_untouched_by_moves() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_move(&detail(390.0, 3.0));
    assert!(!r.controller.is_open());
}

#[test]
fn reverting_end_resets_open_state() {
    let r = rig(400.0);
    r.controller.on_start();
    r.controller.on_end(&detail(300.0, 1.0));
    assert!(r.controller.is_open());

    r.controller.on_start();
    r.controller.on_end(&detail(10.0, 0.0));
    assert!(!r.controller.is_open());
    r.animation.fire_finish();
    assert_eq!(r.dismissed.get(), 0, "reverting end never dismisses");
}

#[test]
fn can_start_yields_only_to_scroll_content() {
    let r = rig(400.0);

    // No target: fail open.
    assert!(r.controller.can_start(&detail_on(None, 0.0, 0.0)));

    // Target outside any scrollable region.
    let card = Element::new(ElementRole::ModalCard, 400.0);
    let header = Element::new(ElementRole::Generic, 44.0);
    card.append_child(&header);
    assert!(r.controller.can_start(&detail_on(Some(header), 0.0, 0.0)));

    // Target inside the scrollable content region.
    let content = Element::new(ElementRole::ScrollContent, 300.0);
    let label = Element::new(ElementRole::Generic, 20.0);
    card.append_child(&content);
    content.append_child(&label);
    assert!(!r.controller.can_start(&detail_on(Some(label), 0.0, 0.0)));
}

#[test]
fn duration_is_bounded() {
    assert_eq!(compute_duration(350.0, 0.0), 400.0);
    assert_eq!(compute_duration(0.0, 0.0), 400.0);
    assert_eq!(compute_duration(10.0, 5.0), 100.0);
    let mid = compute_duration(250.0, 1.0);
    assert!((mid - 250.0 / 1.1).abs() < 1e-3);
    assert!((100.0..=400.0).contains(&mid));
    // Negative velocity uses magnitude.
    assert_eq!(compute_duration(10.0, -5.0), 100.0);
}

#[test]
fn completing_duration_uses_travelled_distance() {
    let r = rig(400.0);
    r.controller.on_start();
    // step = 0.5, completing: remaining = 200 px at 1.1 px/ms -> ~181.8.
    r.controller.on_end(&detail(200.0, 1.0));

    let (_, _, duration) = last_end(&r.animation.calls()).expect("progress_end issued");
    assert!((duration - 200.0 / 1.1).abs() < 1e-2);
}

#[test]
fn full_pipeline_drives_timeline_to_dismissal() {
    let card = Element::new(ElementRole::ModalCard, 400.0);
    let timeline = ProgressTimeline::new();
    let dismissed = Rc::new(Cell::new(0u32));
    let animation: Rc<dyn ProgressAnimation> = Rc::new(timeline.clone());
    let gesture = swipe_to_close_gesture(&card, animation, {
        let dismissed = Rc::clone(&dismissed);
        move || dismissed.set(dismissed.get() + 1)
    });

    // Fast downward swipe: 4 px/ms across 200 px.
    gesture.pointer_down(&PointerEvent::at(None, Point::new(0.0, 0.0), 0));
    for i in 1..=5 {
        let y = 40.0 * i as f32;
        gesture.pointer_move(&PointerEvent::at(None, Point::new(0.0, y), i * 10));
    }
    gesture.pointer_up(&PointerEvent::at(None, Point::new(0.0, 240.0), 60));

    assert!(timeline.session_active());
    for _ in 0..40 {
        timeline.drive(16.0);
    }
    assert_eq!(timeline.progress(), 1.0);
    assert_eq!(dismissed.get(), 1);
}
