//! Segment-style glyphs for legend tick labels.
//!
//! Tick labels only ever contain digits, a minus sign and a decimal point,
//! so a stroked seven-segment face is enough and needs no font file.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Segment endpoints in a unit cell: x in [-1, 1], y in [-1, 1], y down.
type Segment = ((f32, f32), (f32, f32));

const TOP: Segment = ((-1.0, -1.0), (1.0, -1.0));
const MIDDLE: Segment = ((-1.0, 0.0), (1.0, 0.0));
const BOTTOM: Segment = ((-1.0, 1.0), (1.0, 1.0));
const UPPER_LEFT: Segment = ((-1.0, -1.0), (-1.0, 0.0));
const UPPER_RIGHT: Segment = ((1.0, -1.0), (1.0, 0.0));
const LOWER_LEFT: Segment = ((-1.0, 0.0), (-1.0, 1.0));
const LOWER_RIGHT: Segment = ((1.0, 0.0), (1.0, 1.0));

fn segments(ch: char) -> &'static [Segment] {
    match ch {
        '0' => &[TOP, UPPER_RIGHT, LOWER_RIGHT, BOTTOM, LOWER_LEFT, UPPER_LEFT],
        '1' => &[UPPER_RIGHT, LOWER_RIGHT],
        '2' => &[TOP, UPPER_RIGHT, MIDDLE, LOWER_LEFT, BOTTOM],
        '3' => &[TOP, UPPER_RIGHT, MIDDLE, LOWER_RIGHT, BOTTOM],
        '4' => &[UPPER_LEFT, MIDDLE, UPPER_RIGHT, LOWER_RIGHT],
        '5' => &[TOP, UPPER_LEFT, MIDDLE, LOWER_RIGHT, BOTTOM],
        '6' => &[TOP, UPPER_LEFT, LOWER_LEFT, BOTTOM, LOWER_RIGHT, MIDDLE],
        '7' => &[TOP, UPPER_RIGHT, LOWER_RIGHT],
        '8' => &[TOP, UPPER_RIGHT, LOWER_RIGHT, BOTTOM, LOWER_LEFT, UPPER_LEFT, MIDDLE],
        '9' => &[TOP, UPPER_LEFT, UPPER_RIGHT, MIDDLE, LOWER_RIGHT, BOTTOM],
        '-' => &[MIDDLE],
        '.' => &[((0.0, 0.8), (0.0, 1.0))],
        _ => &[],
    }
}

/// Advance width of one character at `size` pixels tall.
fn advance(ch: char, size: f32) -> f32 {
    match ch {
        '.' => size * 0.35,
        _ => size * 0.75,
    }
}

/// Width in pixels of `text` drawn at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|c| advance(c, size)).sum()
}

/// Draw `text` with its left edge at `x` and vertical centre at `y`.
///
/// Unsupported characters leave a gap of one advance.
pub fn draw_text(pixmap: &mut Pixmap, text: &str, x: f32, y: f32, size: f32, color: [u8; 4]) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: (size * 0.12).max(1.0),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let half_w = size * 0.25;
    let half_h = size * 0.5;

    let mut pb = PathBuilder::new();
    let mut cursor = x;
    for ch in text.chars() {
        let step = advance(ch, size);
        let cx = cursor + step / 2.0;
        for &((x1, y1), (x2, y2)) in segments(ch) {
            pb.move_to(cx + x1 * half_w, y + y1 * half_h);
            pb.line_to(cx + x2 * half_w, y + y2 * half_h);
        }
        cursor += step;
    }

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
