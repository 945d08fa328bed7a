use super::*;

use std::cell::Cell;

#[test]
fn session_tracks_live_steps() {
    let timeline = ProgressTimeline::new();
    timeline.progress_start(true, 0.0);
    assert!(timeline.session_active());
    assert!(timeline.snapping());

    timeline.progress_step(0.25);
    assert_eq!(timeline.progress(), 0.25);
    timeline.progress_step(0.6);
    assert_eq!(timeline.progress(), 0.6);
}

#[test]
fn initial_progress_seeds_session() {
    let timeline = ProgressTimeline::new();
    timeline.progress_start(true, 1.0);
    assert_eq!(timeline.progress(), 1.0);
}

#[test]
fn playback_reaches_target_and_fires_finish_once() {
    let timeline = ProgressTimeline::new();
    let finished = Rc::new(Cell::new(0u32));

    timeline.progress_start(true, 0.0);
    timeline.progress_step(0.4);
    timeline.easing(Easing::ModalDecelerate);
    {
        let finished = Rc::clone(&finished);
        timeline.on_finish(Box::new(move || finished.set(finished.get() + 1)));
    }
    timeline.progress_end(1.0, 0.2, 200.0);

    timeline.drive(100.0);
    assert_eq!(finished.get(), 0);
    let midway = timeline.progress();
    assert!(midway > 0.0 && midway < 1.0, "midway progress {midway}");

    timeline.drive(100.0);
    assert_eq!(finished.get(), 1);
    assert_eq!(timeline.progress(), 1.0);
    assert!(!timeline.session_active());

    // Settled playback must not re-fire.
    timeline.drive(100.0);
    assert_eq!(finished.get(), 1);
}

#[test]
fn reverting_playback_returns_to_zero() {
    let timeline = ProgressTimeline::new();
    timeline.progress_start(true, 0.0);
    timeline.progress_step(0.3);
    timeline.easing(Easing::ModalAccelerate);
    timeline.progress_end(0.0, 0.4, 150.0);

    timeline.drive(500.0);
    assert_eq!(timeline.progress(), 0.0);
    assert!(!timeline.session_active());
}

#[test]
fn progress_monotonically_approaches_target() {
    let timeline = ProgressTimeline::new();
    timeline.progress_start(true, 0.0);
    timeline.easing(Easing::ModalDecelerate);
    timeline.progress_end(1.0, 0.0, 160.0);

    let mut last = timeline.progress();
    for _ in 0..10 {
        timeline.drive(16.0);
        let current = timeline.progress();
        assert!(current >= last, "progress regressed: {last} -> {current}");
        last = current;
    }
}

#[test]
fn step_without_session_is_ignored() {
    let timeline = ProgressTimeline::new();
    timeline.progress_step(0.5);
    assert_eq!(timeline.progress(), 0.0);
    assert!(!timeline.session_active());
}

#[test]
fn end_without_session_is_ignored() {
    let timeline = ProgressTimeline::new();
    timeline.progress_end(1.0, 0.0, 200.0);
    timeline.drive(500.0);
    assert_eq!(timeline.progress(), 0.0);
}

#[test]
fn new_session_supersedes_running_playback() {
    let timeline = ProgressTimeline::new();
    let finished = Rc::new(Cell::new(0u32));

    timeline.progress_start(true, 0.0);
    timeline.progress_step(0.8);
    {
        let finished = Rc::clone(&finished);
        timeline.on_finish(Box::new(move || finished.set(finished.get() + 1)));
    }
    timeline.progress_end(1.0, 0.8, 300.0);
    timeline.drive(50.0);

    // A new drag grabs the card mid-flight; the superseded interaction's
    // finish callback must never fire.
    timeline.progress_start(true, 1.0);
    assert_eq!(timeline.progress(), 1.0);
    timeline.progress_step(0.5);
    timeline.drive(1000.0);
    assert_eq!(finished.get(), 0);
    assert_eq!(timeline.progress(), 0.5);
}
