use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Shared control flags for one dispatch session. The processor loop reads
/// them at every iteration and pause-poll wake; handlers flip them from other
/// tasks. An in-flight delivery is never interrupted.
#[derive(Default)]
pub struct DispatchControl {
    running: AtomicBool,
    paused: AtomicBool,
    aborted: AtomicBool,
    started_at_in_millis: AtomicI64,
}

impl DispatchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a single session: returns false when one is already running.
    /// Clears pause/abort leftovers and stamps a fresh `started_at`.
    pub fn try_begin(
        &self,
        now_in_millis: i64,
    ) -> bool {
        if self.running.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            return false;
        }

        self.paused.store(false, Ordering::SeqCst);
        self.aborted.store(false, Ordering::SeqCst);
        self.started_at_in_millis.store(now_in_millis, Ordering::SeqCst);

        true
    }

    pub fn finish(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn pause(&self) {
        if self.running.load(Ordering::SeqCst) {
            self.paused.store(true, Ordering::SeqCst);
        }
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Requests abort. The loop exits at its next check point; the cursor is
    /// left where it is so a later session resumes from it.
    pub fn stop(&self) {
        self.aborted.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    pub fn started_at_in_millis(&self) -> Option<i64> {
        let started_at = self.started_at_in_millis.load(Ordering::SeqCst);
        if started_at > 0 {
            Some(started_at)
        } else {
            None
        }
    }
}
