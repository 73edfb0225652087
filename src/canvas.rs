//! Drawing surface abstraction and its `embedded-graphics` adapter.
//!
//! The face is drawn through the small [`Canvas`] trait: lines, circles,
//! pie arcs and text, a solid color fill, and a rotate/save/restore transform
//! stack. Coordinates are `f32` in surface pixels with the origin at the top
//! left, y pointing down.
//!
//! [`DisplayCanvas`] maps this onto any `DrawTarget<Color = Rgb565>`:
//!
//! - Coordinates go through the current affine transform and are rounded to
//!   the pixel grid.
//! - Alpha is blended against the last [`Canvas::draw_color`] fill. There is
//!   no read-back from the target, so overlapping translucent shapes blend
//!   with the background, not with each other.
//! - A paint with a shadow first draws a wider, half-strength stroke in the
//!   shadow color underneath the shape.
//! - Anti-aliased paints draw a halo one pixel wider at half alpha before the
//!   shape itself.
//! - Draw-target errors are discarded per primitive.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Sector};
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;

use crate::colors::{BLACK, blend};
use crate::paint::{Paint, PaintStyle};

/// Maximum nesting of [`Canvas::save`] calls.
pub const TRANSFORM_STACK_DEPTH: usize = 8;

/// Drawing surface the face renders onto.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the whole surface with `color`.
    fn draw_color(&mut self, color: Rgb565);

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint);

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);

    /// Pie slice starting at `start_deg` (clockwise from 3 o'clock) and
    /// sweeping `sweep_deg` clockwise, closed through the center.
    fn draw_arc(&mut self, cx: f32, cy: f32, radius: f32, start_deg: f32, sweep_deg: f32, paint: &Paint);

    /// Draw `text` with its left edge at `x` and its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);

    /// Advance width of `text` in the paint's font.
    fn measure_text(&self, text: &str, paint: &Paint) -> f32 {
        text_width(text, paint)
    }

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the last saved transform. No-op on an empty stack.
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` clockwise around (`px`, `py`).
    fn rotate(&mut self, degrees: f32, px: f32, py: f32);
}

/// Advance width of `text` in the paint's monospace font.
pub fn text_width(text: &str, paint: &Paint) -> f32 {
    let font = paint.font.mono_font();
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0.0;
    }
    (count * font.character_size.width + (count - 1) * font.character_spacing) as f32
}

// =============================================================================
// Transform
// =============================================================================

/// 2D affine transform, `(x, y) -> (a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
    /// Accumulated rotation, used to turn arc start angles.
    degrees: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
        degrees: 0.0,
    };

    /// This transform applied after a rotation around (`px`, `py`).
    #[must_use]
    pub fn then_rotate(&self, degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        // Rotation about the pivot as its own affine matrix
        let (ra, rb, rc, rd) = (cos, sin, -sin, cos);
        let rtx = px - px * cos + py * sin;
        let rty = py - px * sin - py * cos;

        Self {
            a: self.a * ra + self.c * rb,
            b: self.b * ra + self.d * rb,
            c: self.a * rc + self.c * rd,
            d: self.b * rc + self.d * rd,
            tx: self.a * rtx + self.c * rty + self.tx,
            ty: self.b * rtx + self.d * rty + self.ty,
            degrees: (self.degrees + degrees).rem_euclid(360.0),
        }
    }

    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.tx, self.b * x + self.d * y + self.ty)
    }

    #[inline]
    pub const fn degrees(&self) -> f32 {
        self.degrees
    }

    fn point(&self, x: f32, y: f32) -> Point {
        let (x, y) = self.apply(x, y);
        Point::new(x.round() as i32, y.round() as i32)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// Display Canvas
// =============================================================================

/// [`Canvas`] over an `embedded-graphics` draw target.
pub struct DisplayCanvas<'a, D> {
    target: &'a mut D,
    transform: Transform,
    stack: Vec<Transform, TRANSFORM_STACK_DEPTH>,
    background: Rgb565,
}

impl<'a, D> DisplayCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            background: BLACK,
        }
    }

    /// Color translucent paints are blended against.
    #[inline]
    pub const fn background(&self) -> Rgb565 {
        self.background
    }

    #[inline]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    fn paint_color(&self, paint: &Paint) -> Rgb565 {
        blend(self.background, paint.color, paint.alpha)
    }

    /// Layers drawn for a shape, bottom first: shadow, halo, body.
    /// Each entry is a color and the extra width added to the shape.
    fn layers(&self, paint: &Paint) -> [Option<(Rgb565, u32)>; 3] {
        let shadow = paint.shadow.map(|shadow| {
            let color = blend(self.background, shadow.color, paint.alpha / 2);
            (color, shadow.radius)
        });
        let halo = paint
            .anti_alias
            .then(|| (blend(self.background, paint.color, paint.alpha / 2), 1));
        [shadow, halo, Some((self.paint_color(paint), 0))]
    }
}

/// Primitive style for `paint` widened by `extra` pixels.
fn primitive_style(paint: &Paint, color: Rgb565, extra: u32) -> PrimitiveStyle<Rgb565> {
    match paint.style {
        PaintStyle::Fill if extra == 0 => PrimitiveStyle::with_fill(color),
        PaintStyle::Fill => PrimitiveStyleBuilder::new()
            .fill_color(color)
            .stroke_color(color)
            .stroke_width(extra)
            .build(),
        PaintStyle::Stroke => PrimitiveStyle::with_stroke(color, paint.stroke_width + extra),
    }
}

fn diameter(radius: f32) -> u32 {
    (radius * 2.0).round().max(0.0) as u32
}

impl<D> Canvas for DisplayCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn width(&self) -> u32 {
        self.target.size().width
    }

    fn height(&self) -> u32 {
        self.target.size().height
    }

    fn draw_color(&mut self, color: Rgb565) {
        self.background = color;
        self.target.clear(color).ok();
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let line = Line::new(self.transform.point(x0, y0), self.transform.point(x1, y1));
        for (color, extra) in self.layers(paint).into_iter().flatten() {
            line.into_styled(PrimitiveStyle::with_stroke(color, paint.stroke_width + extra))
                .draw(self.target)
                .ok();
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let circle = Circle::with_center(self.transform.point(cx, cy), diameter(radius));
        for (color, extra) in self.layers(paint).into_iter().flatten() {
            circle
                .into_styled(primitive_style(paint, color, extra))
                .draw(self.target)
                .ok();
        }
    }

    fn draw_arc(&mut self, cx: f32, cy: f32, radius: f32, start_deg: f32, sweep_deg: f32, paint: &Paint) {
        let start = start_deg + self.transform.degrees();
        let sector = Sector::with_center(
            self.transform.point(cx, cy),
            diameter(radius),
            start.deg(),
            sweep_deg.deg(),
        );
        for (color, extra) in self.layers(paint).into_iter().flatten() {
            sector
                .into_styled(primitive_style(paint, color, extra))
                .draw(self.target)
                .ok();
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        let style = MonoTextStyle::new(paint.font.mono_font(), self.paint_color(paint));
        Text::with_baseline(text, self.transform.point(x, y), style, Baseline::Alphabetic)
            .draw(self.target)
            .ok();
    }

    fn save(&mut self) {
        // Deeper nesting than the stack holds keeps the outermost states
        self.stack.push(self.transform).ok();
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.transform = self.transform.then_rotate(degrees, px, py);
    }
}

// =============================================================================
// Recording Canvas (tests)
// =============================================================================

/// Canvas that records every call, for checking what the face draws.
#[cfg(test)]
pub mod recording {
    use std::string::String;
    use std::vec::Vec;

    use super::{Canvas, Transform};
    use crate::paint::Paint;
    use embedded_graphics::pixelcolor::Rgb565;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Color(Rgb565),
        /// Line with the canvas rotation in effect when it was drawn.
        Line {
            from: (f32, f32),
            to: (f32, f32),
            rotation: f32,
            paint: Paint,
        },
        Circle {
            center: (f32, f32),
            radius: f32,
            paint: Paint,
        },
        Arc {
            center: (f32, f32),
            radius: f32,
            start: f32,
            sweep: f32,
            paint: Paint,
        },
        Text {
            text: String,
            x: f32,
            y: f32,
            paint: Paint,
        },
        Save,
        Restore,
        Rotate(f32),
    }

    pub struct RecordingCanvas {
        pub width: u32,
        pub height: u32,
        pub ops: Vec<Op>,
        transform: Transform,
        stack: Vec<Transform>,
    }

    impl RecordingCanvas {
        pub const fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
                transform: Transform::IDENTITY,
                stack: Vec::new(),
            }
        }

        pub fn lines(&self) -> impl Iterator<Item = &Op> {
            self.ops.iter().filter(|op| matches!(op, Op::Line { .. }))
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn text_op(&self, text: &str) -> Option<&Op> {
            self.ops
                .iter()
                .find(|op| matches!(op, Op::Text { text: t, .. } if t == text))
        }

        /// Save/restore balance at the end of the frame.
        pub const fn depth(&self) -> usize {
            self.stack.len()
        }
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn draw_color(&mut self, color: Rgb565) {
            self.ops.push(Op::Color(color));
        }

        fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
            self.ops.push(Op::Line {
                from: (x0, y0),
                to: (x1, y1),
                rotation: self.transform.degrees(),
                paint: *paint,
            });
        }

        fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
            self.ops.push(Op::Circle {
                center: (cx, cy),
                radius,
                paint: *paint,
            });
        }

        fn draw_arc(&mut self, cx: f32, cy: f32, radius: f32, start_deg: f32, sweep_deg: f32, paint: &Paint) {
            self.ops.push(Op::Arc {
                center: (cx, cy),
                radius,
                start: start_deg,
                sweep: sweep_deg,
                paint: *paint,
            });
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
            self.ops.push(Op::Text {
                text: text.into(),
                x,
                y,
                paint: *paint,
            });
        }

        fn save(&mut self) {
            self.stack.push(self.transform);
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            if let Some(transform) = self.stack.pop() {
                self.transform = transform;
            }
            self.ops.push(Op::Restore);
        }

        fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
            self.transform = self.transform.then_rotate(degrees, px, py);
            self.ops.push(Op::Rotate(degrees));
        }
    }
}
