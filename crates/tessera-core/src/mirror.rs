//! Editor-local cached copy of host parameter values.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::host::ParameterHost;

/// Maximum number of parameters an editor mirrors.
pub const MIRROR_CAPACITY: usize = 10;

/// Fixed-capacity parameter mirror shared by the host and render threads.
///
/// The host thread refreshes it from the [`ParameterHost`] on every idle
/// tick; the render thread reads it each frame and writes a slot while the
/// user drags the matching slider. Each slot is an independent atomic, so
/// readers never observe a torn value.
pub struct ParameterMirror {
    values: [AtomicU32; MIRROR_CAPACITY],
    len: usize,
}

impl ParameterMirror {
    /// Mirror of `len` slots (clamped to [`MIRROR_CAPACITY`]), all zero.
    pub fn new(len: usize) -> Self {
        Self {
            values: std::array::from_fn(|_| AtomicU32::new(0.0f32.to_bits())),
            len: len.min(MIRROR_CAPACITY),
        }
    }

    /// Mirror of the first `len` host parameters, filled from the host.
    ///
    /// `len` is clamped to both the host's parameter count and the capacity.
    pub fn from_host(host: &dyn ParameterHost, len: usize) -> Self {
        let mirror = Self::new(len.min(host.parameter_count()));
        mirror.refresh_from(host);
        mirror
    }

    /// Number of mirrored slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if nothing is mirrored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read a slot. Returns `None` past `len()`.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values[..self.len]
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a slot. Out-of-range indices are ignored.
    pub fn set(&self, index: usize, value: f32) {
        if let Some(slot) = self.values[..self.len].get(index) {
            slot.store(value.to_bits(), Ordering::Release);
        }
    }

    /// Re-read every mirrored slot from the host.
    pub fn refresh_from(&self, host: &dyn ParameterHost) {
        let count = self.len.min(host.parameter_count());
        for (index, slot) in self.values[..count].iter().enumerate() {
            slot.store(host.get_parameter(index).to_bits(), Ordering::Release);
        }
    }

    /// Copy of all mirrored values.
    pub fn snapshot(&self) -> Vec<f32> {
        self.values[..self.len]
            .iter()
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
            .collect()
    }
}
