//! Breakability and separability rules for chapters and their parts.

use crate::chapter::{Chapter, ChapterPart};
use crate::silence::Silence;

/// Decides whether a chapter may be split and where a cut is safe.
///
/// Both thresholds are in milliseconds. Without `max_segment` every chapter
/// stays whole. Without `min_silence`, or with a zero one, no part is ever
/// separable; a zero `min_silence` still counts as set when deciding whether
/// a chapter is breakable at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterAnalyzer {
    max_segment: Option<i64>,
    min_silence: Option<i64>,
}

impl ChapterAnalyzer {
    /// Creates an analyzer. A zero `max_segment` is treated as absent.
    pub fn new(max_segment: Option<i64>, min_silence: Option<i64>) -> Self {
        Self {
            max_segment: max_segment.filter(|&ms| ms != 0),
            min_silence,
        }
    }

    pub const fn max_segment(&self) -> Option<i64> {
        self.max_segment
    }

    pub const fn min_silence(&self) -> Option<i64> {
        self.min_silence
    }

    /// Whether the chapter must be emitted as a single segment.
    pub fn is_unbreakable(&self, chapter: &Chapter) -> bool {
        chapter.len() == 1
            || self
                .max_segment
                .is_none_or(|max| max >= chapter.duration())
            || (self.min_silence.is_some() && !self.has_separable_parts(chapter))
    }

    /// Whether any inner silence of the chapter is long enough to cut at.
    pub fn has_separable_parts(&self, chapter: &Chapter) -> bool {
        self.min_silence.is_some_and(|min| {
            chapter
                .inner_silences()
                .any(|silence| silence.duration() >= min)
        })
    }

    /// Whether both silences around the part are long enough to cut at.
    ///
    /// Edge parts lacking a silence on either side are never separable.
    pub fn is_part_separable(&self, part: &ChapterPart) -> bool {
        self.min_silence.filter(|&ms| ms != 0).is_some_and(|min| {
            let long_enough = |silence: Option<&Silence>| {
                silence.is_some_and(|s| s.duration() >= min)
            };
            long_enough(part.silence_after()) && long_enough(part.silence_before())
        })
    }

    /// Whether the part alone meets or exceeds the segment budget.
    pub fn is_long_part(&self, part: &ChapterPart) -> bool {
        self.max_segment.is_some_and(|max| max <= part.duration())
    }

    pub fn is_long_separable_part(&self, part: &ChapterPart) -> bool {
        self.is_long_part(part) && self.is_part_separable(part)
    }

    /// Whether adding the part and its left silence to `accumulated` reaches the budget.
    pub fn overloads(&self, accumulated: i64, part: &ChapterPart) -> bool {
        self.max_segment
            .is_some_and(|max| max <= accumulated + part.duration_with_left_silence())
    }

    pub fn is_segment_overloaded(&self, accumulated: i64, part: &ChapterPart) -> bool {
        self.overloads(accumulated, part) && self.is_part_separable(part)
    }
}
