//! Strip animations
//!
//! Effects are stateless functions of time: each frame is derived from
//! `now`, so the control loop can render a single frame per poll without
//! ever blocking on an animation.

mod rainbow;
mod theater_chase;

use embassy_time::Instant;
pub use rainbow::RainbowCycleEffect;
pub use theater_chase::TheaterChaseEffect;

use crate::color::Rgb;

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);
}
