use crate::Rgb;

/// Bounds of a rendering area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: usize,
    pub end: usize,
}

impl RenderingBounds {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the number of LEDs in the rendering area
    pub const fn count(self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Split of one physical strip into question indicators and the strand
///
/// The indicators sit at the head of the strip, one pixel per question
/// plus a spare, and the decorative strand follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    pub indicators: RenderingBounds,
    pub strand: RenderingBounds,
}

impl StripLayout {
    /// 10 indicator pixels followed by a 100 pixel strand
    pub const DEFAULT: Self = Self {
        indicators: RenderingBounds::new(0, 10),
        strand: RenderingBounds::new(10, 110),
    };

    /// Number of pixels the layout addresses
    pub const fn total(self) -> usize {
        if self.strand.end > self.indicators.end {
            self.strand.end
        } else {
            self.indicators.end
        }
    }

    /// The whole strip as one area
    pub const fn full(self) -> RenderingBounds {
        RenderingBounds::new(0, self.total())
    }

    /// Pixel position of a question indicator
    pub const fn indicator_pixel(self, index: usize) -> Option<usize> {
        if index < self.indicators.count() {
            Some(self.indicators.start + index)
        } else {
            None
        }
    }
}

impl Default for StripLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Get a slice of the LEDs within the bounds
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> &mut [Rgb] {
    &mut leds[bounds.start..bounds.end]
}
