//! Tick placement and label text

use core::fmt::Write;

use heapless::{String, Vec};
use libm::{fabsf, roundf};

/// Upper bound on ticks per axis
pub const MAX_TICKS: usize = 32;

/// Label text buffer
pub type Label = String<12>;

/// Pixel offsets of ticks along an axis of `len` pixels
///
/// With `max_ticks > 0` that many ticks (at least two, at most one per
/// pixel) are spread evenly from the first to the last pixel. Otherwise
/// ticks go every `spacing` pixels; a spacing of zero, or one that would
/// not fit a tick between the ends, falls back to the two end pixels.
pub fn tick_offsets(len: i32, max_ticks: u8, spacing: u8) -> Vec<i32, MAX_TICKS> {
    let mut offsets = Vec::new();
    if len <= 0 {
        return offsets;
    }
    if len == 1 {
        let _ = offsets.push(0);
        return offsets;
    }

    let last = len - 1;
    if max_ticks > 0 {
        let n = (max_ticks as i32).clamp(2, MAX_TICKS as i32).min(len);
        for k in 0..n {
            let _ = offsets.push((k * last + (n - 1) / 2) / (n - 1));
        }
        return offsets;
    }

    let step = spacing as i32;
    if step == 0 || step >= last {
        let _ = offsets.push(0);
        let _ = offsets.push(last);
        return offsets;
    }
    let mut offset = 0;
    while offset <= last && offsets.push(offset).is_ok() {
        offset += step;
    }
    offsets
}

/// Format a tick value: integer when within 1e-4 of one, else one decimal
///
/// Magnitudes of 1e9 and above use exponent form so the text always fits
/// in a [`Label`].
pub fn format_label(value: f32) -> Label {
    let mut text = Label::new();
    let rounded = roundf(value);
    let _ = if !value.is_finite() || fabsf(rounded) >= 1.0e9 {
        write!(text, "{:.1e}", value)
    } else if fabsf(value - rounded) < 1e-4 {
        write!(text, "{}", rounded as i32)
    } else {
        write!(text, "{:.1}", value)
    };
    text
}

/// Collision tracker for labels along one axis
///
/// Labels are offered in increasing position order; one is admitted only
/// if it starts past the end of the last admitted label.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelTrack {
    last_end: Option<i32>,
}

impl LabelTrack {
    /// Offer a label spanning `start..end` (pixels, end exclusive)
    pub fn admit(&mut self, start: i32, end: i32) -> bool {
        match self.last_end {
            Some(last_end) if start <= last_end => false,
            _ => {
                self.last_end = Some(end);
                true
            }
        }
    }
}
