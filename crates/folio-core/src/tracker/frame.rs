//! Single-slot coalescing gate for per-frame work.
//!
//! At most one unit of work is pending. Requests made while one is pending
//! are dropped; the pending work reads live state when it finally runs, so
//! nothing is lost by dropping them.

#[derive(Debug, Default, Clone)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call scheduled the frame, `false` if one was
    /// already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending slot. Returns whether there was work to run.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_requests_keeps_one_slot() {
        let mut gate = FrameGate::new();
        let scheduled = (0..50).filter(|_| gate.request()).count();

        assert_eq!(scheduled, 1);
        assert!(gate.take());
        assert!(!gate.take(), "slot must be empty after it ran");
    }

    #[test]
    fn slot_reopens_after_take() {
        let mut gate = FrameGate::new();
        assert!(gate.request());
        assert!(gate.take());
        assert!(gate.request());
    }

    #[test]
    fn cancel_drops_pending_work() {
        let mut gate = FrameGate::new();
        gate.request();
        gate.cancel();
        assert!(!gate.is_pending());
        assert!(!gate.take());
    }
}
