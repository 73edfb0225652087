//! Color palette and alpha blending.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! Palette values below are the 8-bit source colors scaled down to that
//! range (`r >> 3`, `g >> 2`, `b >> 3`).
//!
//! # Alpha
//!
//! Rgb565 carries no alpha channel. Translucent paints are blended against
//! the color the canvas was last filled with, using the same fixed-point
//! interpolation for every component.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Ambient background and drop shadows.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Ticks, hub, second hand and the digital-mode disc.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Green. Debug page headers and the log prompt.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Yellow. Debug page highlights.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Interactive background, RGB(30, 30, 30).
pub const DARK_GRAY: Rgb565 = Rgb565::new(3, 7, 3);

/// Hour/minute hands and text, RGB(204, 204, 204).
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(25, 51, 25);

/// Debug page dividers and section labels.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Debug page log text.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

// =============================================================================
// Blending
// =============================================================================

/// Composite `color` at `alpha` (0-255) over `background`.
///
/// `alpha == 255` returns `color` unchanged, `alpha == 0` returns
/// `background`. In between each 5/6/5-bit component is interpolated with
/// 8-bit fixed-point math.
pub fn blend(background: Rgb565, color: Rgb565, alpha: u8) -> Rgb565 {
    match alpha {
        0 => background,
        255 => color,
        _ => {
            let t = i32::from(alpha);
            let (br, bg, bb) = components(background);
            let (cr, cg, cb) = components(color);

            let mix = |from: i32, to: i32| from + ((to - from) * t) / 255;

            Rgb565::new(
                mix(br, cr).clamp(0, 31) as u8,
                mix(bg, cg).clamp(0, 63) as u8,
                mix(bb, cb).clamp(0, 31) as u8,
            )
        }
    }
}

/// Split a color into its raw 5/6/5 components.
fn components(color: Rgb565) -> (i32, i32, i32) {
    let raw = color.into_storage();
    (
        i32::from((raw >> 11) & 0x1F),
        i32::from((raw >> 5) & 0x3F),
        i32::from(raw & 0x1F),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_opaque_returns_color() {
        assert_eq!(blend(BLACK, LIGHT_GRAY, 255), LIGHT_GRAY);
    }

    #[test]
    fn test_blend_transparent_returns_background() {
        assert_eq!(blend(DARK_GRAY, WHITE, 0), DARK_GRAY);
    }

    #[test]
    fn test_blend_midpoint() {
        let (r, g, b) = components(blend(BLACK, WHITE, 128));
        assert!(r > 12 && r < 19, "Red should be near midpoint, got {r}");
        assert!(g > 26 && g < 37, "Green should be near midpoint, got {g}");
        assert!(b > 12 && b < 19, "Blue should be near midpoint, got {b}");
    }

    #[test]
    fn test_blend_same_color_is_stable() {
        for alpha in [1, 80, 100, 200, 254] {
            assert_eq!(blend(LIGHT_GRAY, LIGHT_GRAY, alpha), LIGHT_GRAY);
        }
    }

    #[test]
    fn test_dark_gray_matches_rgb30() {
        assert_eq!(components(DARK_GRAY), (30 >> 3, 30 >> 2, 30 >> 3));
    }
}
