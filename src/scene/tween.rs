/// Button press: scale down to `low` over `half`, then back up (one yoyo
/// repeat), linear in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressTween {
    pub low: f32,
    pub half: f32,
    elapsed: f32,
}

impl PressTween {
    pub const LOW: f32 = 0.7;
    pub const HALF_SECONDS: f32 = 0.2;

    pub fn new() -> Self {
        Self {
            low: Self::LOW,
            half: Self::HALF_SECONDS,
            elapsed: 0.0,
        }
    }

    /// Step by `dt` seconds and return the current uniform scale.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.half * 2.0);
        self.scale()
    }

    pub fn scale(&self) -> f32 {
        if self.half <= 0.0 {
            return 1.0;
        }
        let t = if self.elapsed <= self.half {
            self.elapsed / self.half
        } else {
            2.0 - self.elapsed / self.half
        };
        1.0 + (self.low - 1.0) * t.clamp(0.0, 1.0)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.half * 2.0
    }
}

impl Default for PressTween {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dips_to_low_then_returns() {
        let mut tween = PressTween::new();
        assert_eq!(tween.scale(), 1.0);
        assert!((tween.advance(0.1) - 0.85).abs() < 1e-5);
        assert!((tween.advance(0.1) - 0.7).abs() < 1e-5);
        assert!((tween.advance(0.1) - 0.85).abs() < 1e-5);
        assert!(!tween.finished());
        assert!((tween.advance(0.5) - 1.0).abs() < 1e-5);
        assert!(tween.finished());
    }
}
