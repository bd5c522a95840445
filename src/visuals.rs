use embassy_time::Instant;

use crate::OutputDriver;
use crate::bounds::{StripLayout, bounded};
use crate::color::{BLACK, Rgb, WHITE, scale_color};
use crate::effect::{Effect, RainbowCycleEffect, TheaterChaseEffect};
use crate::error::{ConfigError, HardwareError};
use crate::hardware::{IdleScope, Visuals};

/// Default global brightness (0-255 = 0.0-1.0)
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// [`Visuals`] on one addressable strip
///
/// `MAX_LEDS` is the frame buffer size; the layout may use fewer pixels.
/// Indicator pixels are only touched by `set_indicator`,
/// `clear_indicators` and the full-strip idle animation.
pub struct StripVisuals<O: OutputDriver, const MAX_LEDS: usize> {
    output: O,
    layout: StripLayout,
    brightness: u8,

    frame: [Rgb; MAX_LEDS],
    scaled: [Rgb; MAX_LEDS],

    rainbow: RainbowCycleEffect,
    chase: TheaterChaseEffect,
}

impl<O: OutputDriver, const MAX_LEDS: usize> StripVisuals<O, MAX_LEDS> {
    pub fn new(output: O, layout: StripLayout) -> Result<Self, ConfigError> {
        if layout.total() > MAX_LEDS {
            return Err(ConfigError::LayoutTooLarge {
                required: layout.total(),
                capacity: MAX_LEDS,
            });
        }

        Ok(Self {
            output,
            layout,
            brightness: DEFAULT_BRIGHTNESS,
            frame: [BLACK; MAX_LEDS],
            scaled: [BLACK; MAX_LEDS],
            rainbow: RainbowCycleEffect::default(),
            chase: TheaterChaseEffect::default(),
        })
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub fn with_rainbow(mut self, rainbow: RainbowCycleEffect) -> Self {
        self.rainbow = rainbow;
        self
    }

    #[must_use]
    pub fn with_chase(mut self, chase: TheaterChaseEffect) -> Self {
        self.chase = chase;
        self
    }

    pub const fn layout(&self) -> StripLayout {
        self.layout
    }

    /// Unscaled colors of the pixels in use
    pub fn frame(&self) -> &[Rgb] {
        &self.frame[..self.layout.total()]
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Scale the frame by the global brightness and write it out
    fn push(&mut self) -> Result<(), HardwareError> {
        let count = self.layout.total();
        for (scaled, pixel) in self.scaled[..count].iter_mut().zip(&self.frame[..count]) {
            *scaled = scale_color(*pixel, self.brightness);
        }
        self.output.write(&self.scaled[..count])
    }
}

impl<O: OutputDriver, const MAX_LEDS: usize> Visuals for StripVisuals<O, MAX_LEDS> {
    fn render_idle_frame(&mut self, scope: IdleScope, now: Instant) -> Result<(), HardwareError> {
        let area = match scope {
            IdleScope::FullStrip => self.layout.full(),
            IdleScope::Strand => self.layout.strand,
        };
        self.rainbow.render(now, bounded(&mut self.frame, area));
        self.push()
    }

    fn render_highlight_flourish(&mut self, now: Instant) -> Result<(), HardwareError> {
        self.chase.render(now, bounded(&mut self.frame, self.layout.strand));
        self.push()
    }

    fn set_indicator(&mut self, index: usize, on: bool) -> Result<(), HardwareError> {
        let Some(pixel) = self.layout.indicator_pixel(index) else {
            return Err(HardwareError::NoSuchIndicator(index));
        };
        self.frame[pixel] = if on { WHITE } else { BLACK };
        self.push()
    }

    fn clear_indicators(&mut self) -> Result<(), HardwareError> {
        bounded(&mut self.frame, self.layout.indicators).fill(BLACK);
        self.push()
    }
}
