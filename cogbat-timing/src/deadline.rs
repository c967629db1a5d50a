/// A single cancellable scheduled point in time.
///
/// All trial pacing (presentation steps, the response window, the feedback
/// dwell) runs through one of these: arming replaces whatever was pending,
/// cancelling disarms it, and a cancelled deadline never fires.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    fire_at_ns: Option<u64>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule to fire `after_ms` from `now_ns`, replacing any pending one.
    pub fn arm(&mut self, now_ns: u64, after_ms: u64) {
        self.fire_at_ns = Some(now_ns + after_ms * 1_000_000);
    }

    pub fn cancel(&mut self) {
        self.fire_at_ns = None;
    }

    pub fn is_armed(&self) -> bool {
        self.fire_at_ns.is_some()
    }

    pub fn fired(&self, now_ns: u64) -> bool {
        self.fire_at_ns.map_or(false, |t| now_ns >= t)
    }

    /// One-shot check: reports whether the deadline has passed and disarms
    /// it if so, so a fire is observed at most once.
    pub fn take_fired(&mut self, now_ns: u64) -> bool {
        if self.fired(now_ns) {
            self.fire_at_ns = None;
            true
        } else {
            false
        }
    }
}
