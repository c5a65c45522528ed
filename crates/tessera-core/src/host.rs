//! Host-side parameter container standing in for a real audio processor.
//!
//! [`ParameterHost`] is the seam between an editor and whatever owns the
//! authoritative parameter values. [`HostStub`] is the demo implementation:
//! a fixed table of named, normalized floats.
//!
//! Values are stored as `f32` bit-cast into `AtomicU32`, so the host thread
//! (idle refresh) and the render thread (slider write-back) can touch the
//! same slot without a lock.

use std::sync::atomic::{AtomicU32, Ordering};

/// Number of parameters exposed by [`HostStub::new`].
pub const PARAMETER_COUNT: usize = 8;

/// Size of the label buffer filled by [`ParameterHost::get_parameter_name`].
///
/// Labels are NUL-padded; at most `LABEL_LEN - 1` bytes of the name are copied.
pub const LABEL_LEN: usize = 8;

/// Default parameter table: name and initial normalized value.
const DEFAULT_PARAMETERS: [(&str, f32); PARAMETER_COUNT] = [
    ("Cutoff", 0.6),
    ("Res", 0.3),
    ("Attack", 0.0),
    ("Decay", 0.2),
    ("Sustain", 0.7),
    ("Release", 0.2),
    ("Gain", 1.0),
    ("Pan", 0.5),
];

/// Authoritative parameter store an editor reads from and writes back to.
///
/// Indices are bounds-checked: an out-of-range index is a programming error
/// and panics.
pub trait ParameterHost: Send + Sync {
    /// Number of parameters.
    fn parameter_count(&self) -> usize;

    /// Current value of a parameter.
    fn get_parameter(&self, index: usize) -> f32;

    /// Store a value as if automated by the host, and report it.
    fn set_parameter_automated(&self, index: usize, value: f32);

    /// Copy the parameter's label into `text`, NUL-padded.
    fn get_parameter_name(&self, index: usize, text: &mut [u8; LABEL_LEN]);
}

/// One named parameter slot.
struct Parameter {
    name: Box<str>,
    value: AtomicU32,
}

impl Parameter {
    fn new(name: &str, value: f32) -> Self {
        Self {
            name: name.into(),
            value: AtomicU32::new(value.to_bits()),
        }
    }
}

/// Fixed-size parameter table with lock-free per-slot values.
///
/// The table size is fixed at construction. Every automated set emits a
/// `tracing` event, standing in for a real host's automation recording.
pub struct HostStub {
    parameters: Box<[Parameter]>,
}

impl HostStub {
    /// Stub with the default eight-parameter table.
    pub fn new() -> Self {
        Self::with_parameters(DEFAULT_PARAMETERS)
    }

    /// Stub with a custom table of `(name, initial value)` pairs.
    pub fn with_parameters<'a>(table: impl IntoIterator<Item = (&'a str, f32)>) -> Self {
        Self {
            parameters: table
                .into_iter()
                .map(|(name, value)| Parameter::new(name, value))
                .collect(),
        }
    }

    /// Full (untruncated) name of a parameter.
    pub fn parameter_name(&self, index: usize) -> &str {
        &self.slot(index).name
    }

    fn slot(&self, index: usize) -> &Parameter {
        assert!(
            index < self.parameters.len(),
            "parameter index {index} out of range (count {})",
            self.parameters.len()
        );
        &self.parameters[index]
    }
}

impl Default for HostStub {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterHost for HostStub {
    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    fn get_parameter(&self, index: usize) -> f32 {
        f32::from_bits(self.slot(index).value.load(Ordering::Acquire))
    }

    fn set_parameter_automated(&self, index: usize, value: f32) {
        let slot = self.slot(index);
        slot.value.store(value.to_bits(), Ordering::Release);
        tracing::info!(param = %slot.name, index, value, "parameter automated");
    }

    fn get_parameter_name(&self, index: usize, text: &mut [u8; LABEL_LEN]) {
        let name = &*self.slot(index).name;
        text.fill(0);

        // Keep a trailing NUL and never split a UTF-8 sequence.
        let mut len = name.len().min(LABEL_LEN - 1);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        text[..len].copy_from_slice(&name.as_bytes()[..len]);
    }
}

/// Decode a label buffer filled by [`ParameterHost::get_parameter_name`].
///
/// Stops at the first NUL. Invalid UTF-8 yields the longest valid prefix.
pub fn label_str(text: &[u8; LABEL_LEN]) -> &str {
    let end = text.iter().position(|&b| b == 0).unwrap_or(LABEL_LEN);
    match std::str::from_utf8(&text[..end]) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&text[..e.valid_up_to()]).unwrap_or_default(),
    }
}
