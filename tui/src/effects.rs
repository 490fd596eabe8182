//! Reveal overlay animation.

use ratatui::layout::Rect;

use teamgen_engine::{RevealTimer, UiOptions};

/// Share of the reveal spent on the pop-in.
const POP_SHARE: f32 = 0.15;

/// Rectangle for the reveal overlay at the timer's current position.
///
/// The overlay pops in from 60% scale during the first part of the reveal and
/// then stays at full size. Reduced motion always yields `base`.
#[must_use]
pub fn reveal_rect(timer: &RevealTimer, base: Rect, options: UiOptions) -> Rect {
    if options.reduced_motion {
        return base;
    }
    let t = ease_out_cubic(timer.progress() / POP_SHARE);
    let scale = 0.6 + 0.4 * t;
    scale_rect(base, scale)
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
