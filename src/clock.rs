//! Frame clock fed by `performance.now()` timestamps.

/// Converts raw millisecond timestamps into non-negative frame deltas.
///
/// Timestamps that go backwards (or are not finite) contribute nothing, so
/// the accumulated elapsed time never decreases.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Latest timestamp seen, `None` before the first tick.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns seconds since the previous tick; the first tick returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let Some(last_ms) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return 0.0;
        };
        self.last_ms = Some(last_ms.max(now_ms));
        ((now_ms - last_ms).max(0.0) / 1000.0) as f32
    }
}
