//=========================================================================
// Greeting
//
// Paints the window's only content: a fixed greeting, drawn with an
// 8x8 bitmap font at a fixed offset from the top-left corner.
//
// Pixels are 32-bit 0RGB, row-major, `width` pixels per row. Glyphs that
// fall outside the buffer are clipped, so the result never depends on the
// window size beyond that clipping.
//
//=========================================================================

use font8x8::{UnicodeFonts, BASIC_FONTS};

//=== Constants ===========================================================

pub(crate) const GREETING: &str = "Hello, World!";

/// Top-left corner of the first glyph.
pub(crate) const GREETING_ORIGIN: (u32, u32) = (5, 5);

pub(crate) const BACKGROUND: u32 = 0x00FF_FFFF;
pub(crate) const INK: u32 = 0x0000_0000;

const GLYPH_SIZE: u32 = 8;

//=== Painting ============================================================

/// Clears `pixels` and draws the greeting.
pub(crate) fn paint_greeting(pixels: &mut [u32], width: u32, height: u32) {
    pixels.fill(BACKGROUND);
    draw_text(pixels, width, height, GREETING_ORIGIN, GREETING, INK);
}

fn draw_text(
    pixels: &mut [u32],
    width: u32,
    height: u32,
    (origin_x, origin_y): (u32, u32),
    text: &str,
    color: u32,
) {
    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let glyph_x = origin_x + index as u32 * GLYPH_SIZE;

        for (row, bits) in glyph.iter().enumerate() {
            let y = origin_y + row as u32;
            if y >= height {
                break;
            }

            // Bit 0 is the leftmost column.
            for col in 0..GLYPH_SIZE {
                let x = glyph_x + col;
                if x >= width {
                    break;
                }
                if bits & (1 << col) == 0 {
                    continue;
                }
                let offset = y as usize * width as usize + x as usize;
                if let Some(pixel) = pixels.get_mut(offset) {
                    *pixel = color;
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn render(width: u32, height: u32) -> Vec<u32> {
        let mut pixels = vec![0xDEAD_BEEF; (width * height) as usize];
        paint_greeting(&mut pixels, width, height);
        pixels
    }

    fn ink_positions(pixels: &[u32], width: u32) -> BTreeSet<(u32, u32)> {
        pixels
            .iter()
            .enumerate()
            .filter(|(_, &pixel)| pixel == INK)
            .map(|(i, _)| (i as u32 % width, i as u32 / width))
            .collect()
    }

    #[test]
    fn greeting_draws_something() {
        let pixels = render(800, 600);
        assert!(!ink_positions(&pixels, 800).is_empty());
    }

    #[test]
    fn greeting_is_independent_of_window_size() {
        let small = ink_positions(&render(800, 600), 800);
        let large = ink_positions(&render(1920, 1080), 1920);
        let odd = ink_positions(&render(333, 77), 333);

        assert_eq!(small, large);
        assert_eq!(small, odd);
    }

    #[test]
    fn greeting_stays_inside_its_box() {
        let (ox, oy) = GREETING_ORIGIN;
        let right = ox + GREETING.chars().count() as u32 * GLYPH_SIZE;
        let bottom = oy + GLYPH_SIZE;

        for (x, y) in ink_positions(&render(800, 600), 800) {
            assert!((ox..right).contains(&x), "x {} outside greeting box", x);
            assert!((oy..bottom).contains(&y), "y {} outside greeting box", y);
        }
    }

    #[test]
    fn background_is_cleared() {
        let pixels = render(64, 32);
        assert_eq!(pixels[0], BACKGROUND);
        assert_eq!(pixels[pixels.len() - 1], BACKGROUND);
        assert!(pixels.iter().all(|&p| p == BACKGROUND || p == INK));
    }

    #[test]
    fn tiny_buffer_clips_without_panicking() {
        let full = ink_positions(&render(800, 600), 800);
        let clipped = ink_positions(&render(10, 8), 10);

        assert!(clipped.is_subset(&full));
        assert!(clipped.len() < full.len());
    }

    #[test]
    fn short_buffer_does_not_panic() {
        let mut pixels = vec![0; 16];
        paint_greeting(&mut pixels, 800, 600);
        assert!(pixels.iter().all(|&p| p == BACKGROUND || p == INK));
    }
}
