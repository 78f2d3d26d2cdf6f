//! Integer drawing primitives and action indicators.

use crate::{Frame, Rgb};

/// Left/top inset of the action indicator column.
const INDICATOR_INSET: i32 = 10;
const INDICATOR_SEGMENT_WIDTH: i32 = 40;
const INDICATOR_HALF_WIDTH: i32 = 20;
const INDICATOR_SEGMENT_HEIGHT: i32 = 5;
const INDICATOR_SPACING: i32 = 3;

impl Frame {
    /// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints inclusive.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Rgb) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.put_pixel(x, y, colour);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rectangle outline with its top-left corner at `(x, y)`.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgb) {
        self.line(x, y, x + w, y, colour);
        self.line(x, y + h, x + w, y + h, colour);
        self.line(x, y, x, y + h, colour);
        self.line(x + w, y, x + w, y + h, colour);
    }

    /// Solid rectangle covering `[x, x + w) x [y, y + h)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgb) {
        for j in y..y + h {
            for i in x..x + w {
                self.put_pixel(i, j, colour);
            }
        }
    }

    /// Midpoint circle outline.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, colour: Rgb) {
        let (mut x, mut y, mut err) = (radius, 0, 0);
        while x >= y {
            self.put_pixel(cx + x, cy + y, colour);
            self.put_pixel(cx + y, cy + x, colour);
            self.put_pixel(cx - y, cy + x, colour);
            self.put_pixel(cx - x, cy + y, colour);
            self.put_pixel(cx - x, cy - y, colour);
            self.put_pixel(cx - y, cy - x, colour);
            self.put_pixel(cx + y, cy - x, colour);
            self.put_pixel(cx + x, cy - y, colour);
            if err <= 0 {
                y += 1;
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
    }

    /// One bar per discrete action in the top-left corner; the chosen
    /// index is green, the others red.
    pub fn argmax_indicator(&mut self, chosen: usize, count: usize) {
        let mut y = INDICATOR_INSET;
        for i in 0..count {
            let fill = if i == chosen { Rgb::GREEN } else { Rgb::RED };
            self.fill_rect(INDICATOR_INSET, y, INDICATOR_SEGMENT_WIDTH, INDICATOR_SEGMENT_HEIGHT, fill);
            self.rect(INDICATOR_INSET, y, INDICATOR_SEGMENT_WIDTH, INDICATOR_SEGMENT_HEIGHT, Rgb::BLACK);
            y += INDICATOR_SEGMENT_HEIGHT + INDICATOR_SPACING;
        }
    }

    /// One split bar per continuous action slot. Negative values fill the
    /// left half leftwards from the centre in red, positive values fill the
    /// right half in green; the filled width is the value's magnitude
    /// relative to the bound on that side.
    ///
    /// Slots beyond the shortest of the three slices are not drawn.
    #[allow(clippy::cast_possible_truncation)]
    pub fn continuous_indicator(&mut self, action: &[f32], mins: &[f32], maxs: &[f32]) {
        let centre = INDICATOR_INSET + INDICATOR_HALF_WIDTH;
        let mut y = INDICATOR_INSET;
        for ((&value, &min), &max) in action.iter().zip(mins).zip(maxs) {
            if value < 0.0 {
                let fraction = if min < 0.0 { (value / min).clamp(0.0, 1.0) } else { 0.0 };
                let width = (fraction * INDICATOR_HALF_WIDTH as f32) as i32;
                self.fill_rect(centre - width, y, width, INDICATOR_SEGMENT_HEIGHT, Rgb::RED);
            } else {
                let fraction = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
                let width = (fraction * INDICATOR_HALF_WIDTH as f32) as i32;
                self.fill_rect(centre, y, width, INDICATOR_SEGMENT_HEIGHT, Rgb::GREEN);
            }
            self.rect(INDICATOR_INSET, y, INDICATOR_HALF_WIDTH, INDICATOR_SEGMENT_HEIGHT, Rgb::BLACK);
            self.rect(centre, y, INDICATOR_HALF_WIDTH, INDICATOR_SEGMENT_HEIGHT, Rgb::BLACK);
            y += INDICATOR_SEGMENT_HEIGHT + INDICATOR_SPACING;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Frame, Rgb};

    fn white(w: usize, h: usize) -> Frame {
        let mut frame = Frame::new(w, h).unwrap();
        frame.clear(Rgb::WHITE);
        frame
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut frame = white(10, 10);
        frame.line(1, 1, 8, 5, Rgb::RED);
        assert_eq!(frame.pixel(1, 1), Some(Rgb::RED));
        assert_eq!(frame.pixel(8, 5), Some(Rgb::RED));
    }

    #[test]
    fn horizontal_line_is_contiguous() {
        let mut frame = white(10, 3);
        frame.line(0, 1, 9, 1, Rgb::BLACK);
        for x in 0..10 {
            assert_eq!(frame.pixel(x, 1), Some(Rgb::BLACK));
        }
        assert_eq!(frame.pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn line_partly_off_canvas_draws_visible_part() {
        let mut frame = white(10, 10);
        frame.line(-5, 5, 20, 5, Rgb::RED);
        assert_eq!(frame.pixel(0, 5), Some(Rgb::RED));
        assert_eq!(frame.pixel(9, 5), Some(Rgb::RED));
    }

    #[test]
    fn fill_rect_is_half_open() {
        let mut frame = white(10, 10);
        frame.fill_rect(2, 2, 3, 2, Rgb::GREEN);
        assert_eq!(frame.pixel(2, 2), Some(Rgb::GREEN));
        assert_eq!(frame.pixel(4, 3), Some(Rgb::GREEN));
        assert_eq!(frame.pixel(5, 3), Some(Rgb::WHITE));
        assert_eq!(frame.pixel(4, 4), Some(Rgb::WHITE));
    }

    #[test]
    fn circle_touches_cardinal_points() {
        let mut frame = white(21, 21);
        frame.circle(10, 10, 5, Rgb::BLACK);
        assert_eq!(frame.pixel(15, 10), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(5, 10), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(10, 15), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(10, 5), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(10, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn argmax_indicator_highlights_chosen_segment() {
        let mut frame = white(100, 100);
        frame.argmax_indicator(1, 3);
        // Interior pixels of each segment (outline is black).
        assert_eq!(frame.pixel(20, 12), Some(Rgb::RED));
        assert_eq!(frame.pixel(20, 20), Some(Rgb::GREEN));
        assert_eq!(frame.pixel(20, 28), Some(Rgb::RED));
        assert_eq!(frame.pixel(10, 10), Some(Rgb::BLACK));
    }

    #[test]
    fn continuous_indicator_encodes_sign() {
        let mut frame = white(100, 100);
        frame.continuous_indicator(&[-2.0], &[-2.0], &[2.0]);
        assert_eq!(frame.pixel(15, 12), Some(Rgb::RED));
        assert_eq!(frame.pixel(35, 12), Some(Rgb::WHITE));

        let mut frame = white(100, 100);
        frame.continuous_indicator(&[1.0], &[-2.0], &[2.0]);
        assert_eq!(frame.pixel(35, 12), Some(Rgb::GREEN));
        assert_eq!(frame.pixel(15, 12), Some(Rgb::WHITE));
    }
}
