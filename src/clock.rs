/// Converts animation-frame timestamps (ms) into the shader's time uniform (s).
///
/// The returned time never decreases, even if a timestamp arrives out of
/// order or is not finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    seconds: f64,
    last_tick_second: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        if timestamp_ms.is_finite() {
            self.seconds = self.seconds.max(timestamp_ms * 0.001);
        }
        self.seconds as f32
    }

    pub fn seconds(&self) -> f32 {
        self.seconds as f32
    }

    /// True on the first frame of every whole second; drives the "ticking" log.
    pub fn take_tick(&mut self) -> bool {
        let second = self.seconds.floor() as u64;
        if self.last_tick_second == Some(second) {
            return false;
        }
        self.last_tick_second = Some(second);
        true
    }
}
