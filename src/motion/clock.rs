/// Converts host timestamps into per-frame `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous tick. The first tick after construction or
    /// [`reset`](Self::reset) returns 0, as does a timestamp that went backwards.
    pub fn tick(&mut self, now_seconds: f64) -> f32 {
        if !now_seconds.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) if now_seconds > last => (now_seconds - last) as f32,
            _ => 0.0,
        };
        self.last = Some(now_seconds);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12.5), 0.0);
        assert_relative_eq!(clock.tick(12.75), 0.25);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(5.0);
        assert_eq!(clock.tick(4.0), 0.0);
        assert_relative_eq!(clock.tick(4.5), 0.5);
    }

    #[test]
    fn reset_restarts() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        clock.reset();
        assert_eq!(clock.tick(100.0), 0.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert_relative_eq!(clock.tick(101.0), 1.0);
    }
}
