//! Detected silences.

use serde::{Deserialize, Serialize};

use crate::time_value::TimeValue;

/// A span of detected silence in the source audio.
///
/// `from <= until` is expected but not enforced; inverted silences yield
/// negative durations that flow through the arithmetic unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Silence {
    /// Where the silence starts.
    pub from: TimeValue,

    /// Where the silence ends.
    pub until: TimeValue,
}

impl Silence {
    /// Creates a silence from its bounds.
    pub const fn new(from: TimeValue, until: TimeValue) -> Self {
        Self { from, until }
    }

    /// Creates a silence from bounds given in milliseconds.
    pub const fn from_millis(from: i64, until: i64) -> Self {
        Self::new(TimeValue::from_millis(from), TimeValue::from_millis(until))
    }

    /// Length of the silence in milliseconds.
    pub fn duration(&self) -> i64 {
        self.until - self.from
    }
}

/// How a silence is treated by chapter generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilenceKind {
    /// Long enough to end a chapter.
    Transition,
    /// Splits a chapter into parts.
    Pause,
}

impl SilenceKind {
    /// Short label used in progress output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::Pause => "pause",
        }
    }
}
