use smart_leds::RGB8;

use crate::math8::scale8;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Color wheel: green to red to blue and back to green over 0-255
pub const fn wheel(pos: u8) -> Rgb {
    if pos < 85 {
        Rgb::new(pos * 3, 255 - pos * 3, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb::new(255 - pos * 3, 0, pos * 3)
    } else {
        let pos = pos - 170;
        Rgb::new(0, pos * 3, 255 - pos * 3)
    }
}

/// Dim a color by a factor (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb::new(
        scale8(color.r, scale),
        scale8(color.g, scale),
        scale8(color.b, scale),
    )
}
