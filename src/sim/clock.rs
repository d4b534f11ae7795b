//! Frame clock turning host timestamps into capped per-tick deltas.

/// Default ceiling on a single tick's elapsed time.
pub const DEFAULT_DT_CAP_MS: f64 = 32.0;

/// Turns monotonic clock readings into bounded per-tick elapsed times.
///
/// The cap bounds integration error after a stall (a backgrounded host, a debugger pause).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    cap_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_DT_CAP_MS)
    }
}

impl FrameClock {
    /// Clock with a custom dt ceiling.
    pub fn new(cap_ms: f64) -> Self {
        let cap_ms = if cap_ms.is_finite() && cap_ms > 0.0 {
            cap_ms
        } else {
            DEFAULT_DT_CAP_MS
        };
        Self {
            last_ms: None,
            cap_ms,
        }
    }

    /// Clock that treats `now_ms` as the previous reading.
    pub fn starting_at(now_ms: f64, cap_ms: f64) -> Self {
        let mut c = Self::new(cap_ms);
        c.last_ms = now_ms.is_finite().then_some(now_ms);
        c
    }

    /// Record `now_ms` and return the capped elapsed milliseconds since the previous reading.
    ///
    /// The first reading yields 0. A reading earlier than the previous one also yields 0 and
    /// does not move the clock backwards.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return 0.0;
        };
        if now_ms < last {
            return 0.0;
        }
        self.last_ms = Some(now_ms);
        (now_ms - last).min(self.cap_ms)
    }

    /// Most recent reading, if any.
    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }

    /// Configured dt ceiling.
    pub fn cap_ms(&self) -> f64 {
        self.cap_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/clock.rs"]
mod tests;
