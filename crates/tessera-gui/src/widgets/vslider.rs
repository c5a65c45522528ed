//! Vertical fill slider.
//!
//! Plugin-style fader:
//! - Body fills from the bottom up to the value
//! - Press or drag anywhere on the body to jump to that height
//! - Double-click to reset
//!
//! Colors come from the active style: the track is the idle widget fill and
//! the bar is the selection fill (see [`Theme`](crate::Theme)).

use std::ops::RangeInclusive;

use egui::{CornerRadius, Pos2, Rect, Response, Sense, Ui, Vec2, Widget, pos2, vec2};

/// Slider body size in logical pixels.
pub const SLIDER_SIZE: Vec2 = vec2(20.0, 105.0);

/// Vertical slider over a float.
pub struct VSlider<'a> {
    value: &'a mut f32,
    range: RangeInclusive<f32>,
    default: f32,
}

impl<'a> VSlider<'a> {
    /// Create a slider over `range`. The reset value starts at the range midpoint.
    pub fn new(value: &'a mut f32, range: RangeInclusive<f32>) -> Self {
        let default = (range.start() + range.end()) / 2.0;
        Self {
            value,
            range,
            default,
        }
    }

    /// Set the double-click reset value.
    pub fn default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }
}

/// Position of `value` within `min..=max` as `0.0..=1.0`.
///
/// Values outside the range clamp; an empty range maps everything to `0.0`.
pub fn normalized(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span.abs() <= f32::EPSILON || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Value under a pointer at height `y` over `frame`: bottom is `min`, top is `max`.
pub fn value_at(y: f32, frame: Rect, min: f32, max: f32) -> f32 {
    let height = frame.height();
    if height <= 0.0 {
        return min;
    }
    let t = ((frame.bottom() - y) / height).clamp(0.0, 1.0);
    min + t * (max - min)
}

/// The filled part of `frame` for a normalized position `t`.
pub fn fill_rect(frame: Rect, t: f32) -> Rect {
    let top = frame.bottom() - t.clamp(0.0, 1.0) * frame.height();
    Rect::from_min_max(pos2(frame.left(), top), frame.max)
}

impl Widget for VSlider<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (frame, mut response) = ui.allocate_exact_size(SLIDER_SIZE, Sense::click_and_drag());
        let (min, max) = (*self.range.start(), *self.range.end());
        let before = *self.value;

        if response.is_pointer_button_down_on() {
            if let Some(Pos2 { y, .. }) = response.interact_pointer_pos() {
                *self.value = value_at(y, frame, min, max);
            }
        }

        if response.double_clicked() {
            *self.value = self.default;
        }

        if ui.is_rect_visible(frame) {
            let visuals = ui.style().interact(&response);
            let painter = ui.painter();
            painter.rect_filled(frame, CornerRadius::ZERO, visuals.bg_fill);

            let t = normalized(*self.value, min, max);
            if t > 0.0 {
                painter.rect_filled(
                    fill_rect(frame, t),
                    CornerRadius::ZERO,
                    ui.visuals().selection.bg_fill,
                );
            }
        }

        if self.value.to_bits() != before.to_bits() {
            response.mark_changed();
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), SLIDER_SIZE)
    }

    #[test]
    fn normalized_clamps() {
        assert_eq!(normalized(0.5, 0.0, 1.0), 0.5);
        assert_eq!(normalized(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(normalized(2.0, 0.0, 1.0), 1.0);
        assert_eq!(normalized(5.0, 0.0, 10.0), 0.5);
    }

    #[test]
    fn normalized_degenerate_inputs() {
        assert_eq!(normalized(0.3, 1.0, 1.0), 0.0);
        assert_eq!(normalized(f32::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn pointer_height_maps_bottom_to_min() {
        let frame = frame();
        assert_eq!(value_at(frame.bottom(), frame, 0.0, 1.0), 0.0);
        assert_eq!(value_at(frame.top(), frame, 0.0, 1.0), 1.0);

        let quarter = frame.bottom() - frame.height() * 0.25;
        assert!((value_at(quarter, frame, 0.0, 1.0) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn pointer_outside_frame_clamps() {
        let frame = frame();
        assert_eq!(value_at(frame.top() - 50.0, frame, 0.0, 10.0), 10.0);
        assert_eq!(value_at(frame.bottom() + 50.0, frame, 0.0, 10.0), 0.0);
    }

    #[test]
    fn fill_grows_from_bottom() {
        let frame = frame();
        let empty = fill_rect(frame, 0.0);
        assert_eq!(empty.height(), 0.0);
        assert_eq!(empty.bottom(), frame.bottom());

        let half = fill_rect(frame, 0.5);
        assert!((half.height() - frame.height() / 2.0).abs() < 1e-4);
        assert_eq!(half.bottom(), frame.bottom());
        assert_eq!(half.width(), frame.width());

        assert_eq!(fill_rect(frame, 1.5), frame);
    }

    #[test]
    fn value_round_trips_through_geometry() {
        let frame = frame();
        for value in [0.0, 0.2, 0.6, 1.0] {
            let top = fill_rect(frame, normalized(value, 0.0, 1.0)).top();
            assert!((value_at(top, frame, 0.0, 1.0) - value).abs() < 1e-5);
        }
    }

    #[test]
    fn builder_sets_default() {
        let mut value = 0.1;
        let slider = VSlider::new(&mut value, 0.0..=1.0);
        assert_eq!(slider.default, 0.5);
        let slider = slider.default(0.7);
        assert_eq!(slider.default, 0.7);
    }
}
