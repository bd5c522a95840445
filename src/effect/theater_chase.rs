use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::{BLACK, Rgb, WHITE};

const DEFAULT_STEP_MS: u64 = 50;
/// Every n-th pixel is lit
pub const CHASE_SPACING: usize = 3;

/// Marquee-style chase: every third pixel lit, shifting one pixel per step
#[derive(Debug, Clone)]
pub struct TheaterChaseEffect {
    color: Rgb,
    step: Duration,
}

impl Default for TheaterChaseEffect {
    fn default() -> Self {
        Self {
            color: WHITE,
            step: Duration::from_millis(DEFAULT_STEP_MS),
        }
    }
}

impl TheaterChaseEffect {
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn phase(&self, now: Instant) -> usize {
        let step_ms = self.step.as_millis().max(1);
        ((now.as_millis() / step_ms) % CHASE_SPACING as u64) as usize
    }
}

impl Effect for TheaterChaseEffect {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let phase = self.phase(now);
        for (i, led) in leds.iter_mut().enumerate() {
            *led = if i % CHASE_SPACING == phase {
                self.color
            } else {
                BLACK
            };
        }
    }
}
