//! Chapter generation from silences.
//!
//! Silences are classified by length:
//! 1. Transition (`duration >= min_transition`) - ends the current chapter
//! 2. Pause - splits the current chapter into another part
//!
//! The last part of the last chapter stays open with a zero duration because
//! nothing marks where the source ends.

use crate::chapter::{Chapter, ChapterCollection};
use crate::observer::Observer;
use crate::silence::{Silence, SilenceKind};
use crate::time_value::TimeValue;

/// Builds chapters out of an ordered list of silences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterGenerator {
    min_transition: i64,
}

/// Chapters closed so far plus the one being filled.
struct Generation {
    closed: Vec<Chapter>,
    current: Chapter,
}

impl Generation {
    fn new() -> Self {
        Self {
            closed: Vec::new(),
            current: Chapter::new(0),
        }
    }

    fn transition(mut self, silence: Silence) -> Self {
        self.current.finish_by_silence(silence);
        let next = Chapter::new(self.current.index() + 1);
        self.closed.push(std::mem::replace(&mut self.current, next));
        self.current.start_by_silence(silence);
        self
    }

    fn pause(mut self, silence: Silence) -> Self {
        self.current.split_by_silence(silence);
        self
    }

    fn finish(mut self) -> ChapterCollection {
        // Without any silence the whole source is one open part.
        if self.current.is_empty() {
            self.current.start(TimeValue::ZERO);
        }
        self.closed.push(self.current);
        ChapterCollection::new(self.closed)
    }
}

impl ChapterGenerator {
    /// Creates a generator. Silences of at least `min_transition`
    /// milliseconds end a chapter.
    pub const fn new(min_transition: i64) -> Self {
        Self { min_transition }
    }

    pub const fn min_transition(&self) -> i64 {
        self.min_transition
    }

    /// Classifies a silence. The threshold is inclusive.
    pub fn classify(&self, silence: &Silence) -> SilenceKind {
        if self.min_transition <= silence.duration() {
            SilenceKind::Transition
        } else {
            SilenceKind::Pause
        }
    }

    /// Groups the silences into chapters and parts.
    ///
    /// Silences must be ordered by `from` and must not overlap.
    pub fn generate(&self, silences: &[Silence], observer: &dyn Observer) -> ChapterCollection {
        silences
            .iter()
            .enumerate()
            .fold(Generation::new(), |generation, (index, silence)| {
                let kind = self.classify(silence);
                observer.silence_classified(index, silence, kind);
                match kind {
                    SilenceKind::Transition => generation.transition(*silence),
                    SilenceKind::Pause => generation.pause(*silence),
                }
            })
            .finish()
    }
}
