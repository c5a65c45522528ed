//! Custom widgets for the editor panel.

mod vslider;
pub use vslider::{SLIDER_SIZE, VSlider, fill_rect, normalized, value_at};
