//! Paint definitions and the ambient/active/mute style variants.
//!
//! A [`Paint`] bundles everything a canvas needs to draw one element:
//! color, alpha, stroke width, fill/stroke style, anti-aliasing, an optional
//! drop shadow and the font used when it draws text.
//!
//! # Variants
//!
//! | Mode | Anti-alias | Shadow |
//! |------|-----------|--------|
//! | Interactive | on | radius 4, black |
//! | Ambient | off | none |
//!
//! Colors are identical in both variants. Mute mode only touches the alpha
//! of the three hands and is orthogonal to the ambient variant. Leaving mute
//! makes every hand opaque, including the second hand, which starts out
//! translucent.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, LIGHT_GRAY, WHITE};
use crate::config::{
    ALPHA_OPAQUE,
    HOUR_STROKE_WIDTH,
    MINUTE_STROKE_WIDTH,
    MUTED_HAND_ALPHA,
    MUTED_SECOND_ALPHA,
    SECOND_HAND_ALPHA,
    SECOND_TICK_STROKE_WIDTH,
    SHADOW_RADIUS,
};

// =============================================================================
// Fonts
// =============================================================================

/// Small label font for paints that never draw text, and the debug page.
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Text size of a paint, resolved to a monospace font at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    /// 6x10 label font.
    Label,
    /// Notification count text (one size smaller than the date).
    Notification,
    /// Date and battery text.
    Date,
    /// Digital mode hour/minute digits.
    Digit,
}

impl FontSize {
    pub const fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Label => LABEL_FONT,
            Self::Notification => &PROFONT_14_POINT,
            Self::Date => &PROFONT_18_POINT,
            Self::Digit => &PROFONT_24_POINT,
        }
    }
}

// =============================================================================
// Paint
// =============================================================================

/// Whether shapes are filled or outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Drop shadow drawn underneath a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shadow {
    pub radius: u32,
    pub color: Rgb565,
}

/// Shadow used by every paint in interactive mode.
pub const HAND_SHADOW: Shadow = Shadow {
    radius: SHADOW_RADIUS,
    color: BLACK,
};

/// Style of a single drawn element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgb565,
    pub alpha: u8,
    pub stroke_width: u32,
    pub style: PaintStyle,
    pub anti_alias: bool,
    pub shadow: Option<Shadow>,
    pub font: FontSize,
}

impl Paint {
    /// Opaque, anti-aliased fill paint without shadow.
    pub const fn new(color: Rgb565) -> Self {
        Self {
            color,
            alpha: ALPHA_OPAQUE,
            stroke_width: 1,
            style: PaintStyle::Fill,
            anti_alias: true,
            shadow: None,
            font: FontSize::Label,
        }
    }

    pub const fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    pub const fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub const fn with_font(mut self, font: FontSize) -> Self {
        self.font = font;
        self
    }

    pub const fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Switch between the ambient and interactive variant of this paint.
    fn set_ambient(&mut self, ambient: bool) {
        self.anti_alias = !ambient;
        self.shadow = if ambient { None } else { Some(HAND_SHADOW) };
    }
}

// =============================================================================
// Face Paints
// =============================================================================

/// Every paint the face uses, switched together on mode changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePaints {
    /// Date and battery text.
    pub date: Paint,
    pub hour: Paint,
    /// Minute hand, also used for the notification line.
    pub minute: Paint,
    pub second: Paint,
    /// Tick marks and the center hub.
    pub tick_and_circle: Paint,
    /// Digital mode disc.
    pub background: Paint,
}

impl FacePaints {
    /// Paints in the interactive variant, not muted.
    pub const fn new() -> Self {
        Self {
            date: Paint::new(LIGHT_GRAY)
                .with_stroke_width(HOUR_STROKE_WIDTH)
                .with_font(FontSize::Date),
            hour: Paint::new(LIGHT_GRAY)
                .with_stroke_width(HOUR_STROKE_WIDTH)
                .with_style(PaintStyle::Stroke)
                .with_font(FontSize::Digit)
                .with_shadow(HAND_SHADOW),
            minute: Paint::new(LIGHT_GRAY)
                .with_stroke_width(MINUTE_STROKE_WIDTH)
                .with_style(PaintStyle::Stroke)
                .with_font(FontSize::Notification)
                .with_shadow(HAND_SHADOW),
            second: Paint::new(WHITE)
                .with_alpha(SECOND_HAND_ALPHA)
                .with_stroke_width(SECOND_TICK_STROKE_WIDTH)
                .with_style(PaintStyle::Stroke)
                .with_shadow(HAND_SHADOW),
            tick_and_circle: Paint::new(WHITE)
                .with_stroke_width(SECOND_TICK_STROKE_WIDTH)
                .with_style(PaintStyle::Stroke)
                .with_shadow(HAND_SHADOW),
            background: Paint::new(WHITE),
        }
    }

    /// Apply the ambient (aliased, flat) or interactive (anti-aliased,
    /// shadowed) variant to the hands and ticks.
    pub fn apply_ambient(&mut self, ambient: bool) {
        self.hour.set_ambient(ambient);
        self.minute.set_ambient(ambient);
        self.second.set_ambient(ambient);
        self.tick_and_circle.set_ambient(ambient);
    }

    /// Dim the hands in mute mode, make them opaque otherwise.
    pub fn apply_mute(&mut self, mute: bool) {
        let (hand, second) = if mute {
            (MUTED_HAND_ALPHA, MUTED_SECOND_ALPHA)
        } else {
            (ALPHA_OPAQUE, ALPHA_OPAQUE)
        };
        self.hour.alpha = hand;
        self.minute.alpha = hand;
        self.second.alpha = second;
    }

    /// Paints switched by [`FacePaints::apply_ambient`]: the three hands
    /// plus the tick and hub paint.
    pub const fn styled(&self) -> [&Paint; 4] {
        [&self.hour, &self.minute, &self.second, &self.tick_and_circle]
    }
}

impl Default for FacePaints {
    fn default() -> Self {
        Self::new()
    }
}
