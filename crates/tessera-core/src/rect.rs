//! Editor bounding rectangle.

use core::fmt;

/// Integer bounding box an editor reports to its host before window creation.
///
/// Coordinates follow the plugin-editor convention: `top`/`left` are the
/// origin (normally `0`), `bottom`/`right` are exclusive extents. A rect with
/// `right < left` or `bottom < top` has zero width or height, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top edge.
    pub top: i32,
    /// Left edge.
    pub left: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
    /// Right edge (exclusive).
    pub right: i32,
}

impl Rect {
    /// Rect anchored at the origin with the given size in logical pixels.
    ///
    /// Sizes beyond `i32::MAX` saturate.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            top: 0,
            left: 0,
            bottom: i32::try_from(height).unwrap_or(i32::MAX),
            right: i32::try_from(width).unwrap_or(i32::MAX),
        }
    }

    /// Horizontal extent, clamped at zero.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left).max(0) as u32
    }

    /// Vertical extent, clamped at zero.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0) as u32
    }

    /// `true` if the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ ({}, {})",
            self.width(),
            self.height(),
            self.left,
            self.top
        )
    }
}
