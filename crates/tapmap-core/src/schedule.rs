//! Rate limiting for pointer handling and repaints.
//!
//! Two independent mechanisms: pointer moves pass through a fixed
//! minimum-interval gate, and repaints are coalesced so that any burst
//! of state changes between two display refreshes produces one paint.

/// Minimum interval between handled pointer moves, in milliseconds
/// (roughly one display refresh at 60 Hz).
pub const POINTER_MOVE_INTERVAL_MS: f64 = 16.0;

/// Minimum-interval gate over caller-supplied timestamps.
#[derive(Debug, Clone, Default)]
pub struct PointerThrottle {
    last: Option<f64>,
}

impl PointerThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether an event at `now_ms` should be handled. The
    /// first event always passes; later ones only after
    /// [`POINTER_MOVE_INTERVAL_MS`] has elapsed.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < POINTER_MOVE_INTERVAL_MS => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

/// Collapses invalidation bursts into a single scheduled frame.
///
/// `H` is the host's frame handle (the request id for a scheduled
/// animation frame). On every invalidation the caller cancels whatever
/// [`Self::reschedule`] returns and installs the fresh handle, so at
/// most one frame is ever pending; [`Self::begin_frame`] consumes it
/// when the frame fires.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer<H> {
    pending: Option<H>,
}

impl<H> FrameCoalescer<H> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Installs the handle of a newly scheduled frame, returning the
    /// previously pending one for cancellation.
    pub fn reschedule(&mut self, handle: H) -> Option<H> {
        self.pending.replace(handle)
    }

    /// Marks the pending frame as fired and returns its handle.
    pub fn begin_frame(&mut self) -> Option<H> {
        self.pending.take()
    }

    /// Removes the pending frame without firing it, for cancellation
    /// on image swap, size change, or teardown.
    pub fn cancel(&mut self) -> Option<H> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_passes_first_event() {
        let mut throttle = PointerThrottle::new();
        assert!(throttle.allow(1000.0));
    }

    #[test]
    fn test_throttle_blocks_within_interval() {
        let mut throttle = PointerThrottle::new();
        assert!(throttle.allow(1000.0));
        assert!(!throttle.allow(1005.0));
        assert!(!throttle.allow(1015.9));
        assert!(throttle.allow(1016.0));
        assert!(!throttle.allow(1020.0));
    }

    #[test]
    fn test_ten_mutations_one_paint() {
        // Simulated host: each reschedule cancels the previous request,
        // so of 10 requests exactly one survives to paint.
        let mut coalescer = FrameCoalescer::new();
        let mut requested = 0u32;
        let mut cancelled = 0u32;

        for _ in 0..10 {
            requested += 1;
            if coalescer.reschedule(requested).is_some() {
                cancelled += 1;
            }
        }

        let mut paints = 0u32;
        if coalescer.begin_frame().is_some() {
            paints += 1;
        }
        // No further frame is pending.
        assert!(coalescer.begin_frame().is_none());

        assert_eq!(requested, 10);
        assert_eq!(cancelled, 9);
        assert_eq!(paints, 1);
    }

    #[test]
    fn test_cancel_clears_pending_frame() {
        let mut coalescer = FrameCoalescer::new();
        coalescer.reschedule(7);
        assert!(coalescer.is_pending());
        assert_eq!(coalescer.cancel(), Some(7));
        assert!(!coalescer.is_pending());
        assert!(coalescer.begin_frame().is_none());
    }
}
