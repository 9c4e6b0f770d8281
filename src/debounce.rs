/// Trailing-edge debouncer driven by explicit timestamps (ms).
///
/// Every [`observe`](Self::observe) replaces the pending value and pushes the
/// deadline out by the window; [`take_due`](Self::take_due) yields the last
/// observed value once the window has elapsed with no further observations.
#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer<T> {
    window_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            pending: None,
        }
    }

    pub fn observe(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms + self.window_ms));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn take_due(&mut self, now_ms: f64) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now_ms >= deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }
}
