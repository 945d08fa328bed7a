//! Progress-driven animation sessions.
//!
//! A session is owned by one gesture interaction: `progress_start` opens it
//! in snap mode, `progress_step` repositions the visual state while the
//! finger moves, and `progress_end` plays the remainder out under an easing
//! curve, firing finish callbacks when playback settles.

use std::cell::RefCell;
use std::rc::Rc;

use crate::easing::Easing;

/// Animation capability consumed by gesture controllers.
///
/// Session discipline: one `progress_start` precedes any `progress_step`
/// or `progress_end`, and exactly one `progress_end` moves the session
/// into playback. Violations degrade to a logged no-op; this runs on the
/// input path where a panic would break the interaction model.
pub trait ProgressAnimation {
    /// Begin a progress session. `use_snap` repositions visual state
    /// directly with no easing while the drag is live; `initial_progress`
    /// seeds the session (1.0 when resuming from a presented card).
    fn progress_start(&self, use_snap: bool, initial_progress: f32);

    /// Reposition the session to `step` (expected domain [0, 1]; values
    /// beyond are the renderer's concern).
    fn progress_step(&self, step: f32);

    /// Play the session out toward `play_to` (0.0 or 1.0), starting from
    /// `time_offset` on the easing curve's playback timeline, over
    /// `duration_ms`.
    fn progress_end(&self, play_to: f32, time_offset: f32, duration_ms: f32);

    /// Register a one-shot callback fired when playback settles.
    fn on_finish(&self, callback: Box<dyn FnOnce()>);

    /// Select the easing curve for the upcoming `progress_end`.
    fn easing(&self, easing: Easing);
}

struct Playback {
    play_to: f32,
    from_time: f32,
    duration_ms: f32,
    elapsed_ms: f32,
}

struct Session {
    use_snap: bool,
    easing: Easing,
    playback: Option<Playback>,
    finish_callbacks: Vec<Box<dyn FnOnce()>>,
}

struct TimelineInner {
    session: Option<Session>,
    progress: f32,
}

/// Single-threaded [`ProgressAnimation`] implementation.
///
/// The host (or a test) advances playback by calling [`drive`] from its
/// frame loop; the timeline holds no clock of its own.
///
/// [`drive`]: ProgressTimeline::drive
#[derive(Clone)]
pub struct ProgressTimeline {
    inner: Rc<RefCell<TimelineInner>>,
}

impl ProgressTimeline {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimelineInner {
                session: None,
                progress: 0.0,
            })),
        }
    }

    /// Current visual progress, whether from a live drag or playback.
    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    /// Whether a session is open (including one still playing out).
    pub fn session_active(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Whether the open session repositions directly (snap mode) rather
    /// than easing each step. False when no session is open.
    pub fn snapping(&self) -> bool {
        self.inner
            .borrow()
            .session
            .as_ref()
            .map(|session| session.use_snap)
            .unwrap_or(false)
    }

    /// Advance a running playback by `delta_ms` of frame time.
    ///
    /// Fires finish callbacks exactly once when playback reaches its
    /// target; a no-op while no playback is running.
    pub fn drive(&self, delta_ms: f32) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            let (progress, done) = {
                let Some(session) = inner.session.as_mut() else {
                    return;
                };
                let Some(playback) = session.playback.as_mut() else {
                    return;
                };

                playback.elapsed_ms += delta_ms.max(0.0);
                let fraction = (playback.elapsed_ms / playback.duration_ms).clamp(0.0, 1.0);
                // Timeline position moves linearly from the resume offset
                // toward the target endpoint; easing shapes the output.
                let time =
                    playback.from_time + (playback.play_to - playback.from_time) * fraction;
                (session.easing.transform(time), fraction >= 1.0)
            };

            inner.progress = progress;
            if !done {
                return;
            }
            // The curve endpoints are pinned, so `progress` already equals
            // the playback target here.
            inner
                .session
                .take()
                .map(|session| session.finish_callbacks)
                .unwrap_or_default()
        };

        for callback in callbacks {
            callback();
        }
    }
}

impl Default for ProgressTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAnimation for ProgressTimeline {
    fn progress_start(&self, use_snap: bool, initial_progress: f32) {
        let mut inner = self.inner.borrow_mut();
        if inner.session.is_some() {
            // A drag landing on a card mid-playback takes the session
            // over; pending finish callbacks belong to the superseded
            // interaction and are dropped unfired.
            log::debug!("progress_start superseding an open session");
        }
        inner.session = Some(Session {
            use_snap,
            easing: Easing::default(),
            playback: None,
            finish_callbacks: Vec::new(),
        });
        inner.progress = initial_progress;
    }

    fn progress_step(&self, step: f32) {
        let mut inner = self.inner.borrow_mut();
        let accepted = match inner.session.as_ref() {
            None => {
                log::warn!("progress_step without an open session");
                false
            }
            Some(session) if session.playback.is_some() => {
                log::warn!("progress_step while playback is running");
                false
            }
            Some(_) => true,
        };
        if accepted {
            inner.progress = step;
        }
    }

    fn progress_end(&self, play_to: f32, time_offset: f32, duration_ms: f32) {
        let mut inner = self.inner.borrow_mut();
        match inner.session.as_mut() {
            None => log::warn!("progress_end without an open session"),
            Some(session) if session.playback.is_some() => {
                log::warn!("progress_end while playback is already running");
            }
            Some(session) => {
                session.playback = Some(Playback {
                    play_to,
                    from_time: time_offset.clamp(0.0, 1.0),
                    duration_ms: duration_ms.max(1.0),
                    elapsed_ms: 0.0,
                });
            }
        }
    }

    fn on_finish(&self, callback: Box<dyn FnOnce()>) {
        let mut inner = self.inner.borrow_mut();
        match inner.session.as_mut() {
            None => log::warn!("on_finish without an open session"),
            Some(session) => session.finish_callbacks.push(callback),
        }
    }

    fn easing(&self, easing: Easing) {
        let mut inner = self.inner.borrow_mut();
        match inner.session.as_mut() {
            None => log::warn!("easing set without an open session"),
            Some(session) => session.easing = easing,
        }
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
