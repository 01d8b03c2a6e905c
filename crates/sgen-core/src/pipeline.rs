//! The silence to segment pipeline.
//!
//! 1. Group silences into chapters and parts
//! 2. Title every chapter "Chapter N"
//! 3. Emit one segment per unbreakable chapter, several per breakable one

use crate::analyzer::ChapterAnalyzer;
use crate::chapter::ChapterCollection;
use crate::generator::ChapterGenerator;
use crate::observer::{NullObserver, Observer};
use crate::segment::SegmentCollection;
use crate::segmentator::ChapterSegmentator;
use crate::silence::Silence;

/// Thresholds for one run, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// Silences at least this long separate chapters.
    pub transition_ms: i64,

    /// Minimum silence on both sides of a part before a cut is allowed there.
    /// `None` disables cutting inside chapters.
    pub min_silence_ms: Option<i64>,

    /// Chapters longer than this are cut into several segments where
    /// possible. `None` keeps every chapter whole.
    pub max_segment_ms: Option<i64>,
}

/// Chapters and segments produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationOutcome {
    /// Intermediate chapters, kept for diagnostics.
    pub chapters: ChapterCollection,

    /// The final segments.
    pub segments: SegmentCollection,
}

/// Runs chapter generation followed by chapter segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceSegmentator {
    generator: ChapterGenerator,
    segmentator: ChapterSegmentator,
}

impl SilenceSegmentator {
    pub const fn new(generator: ChapterGenerator, segmentator: ChapterSegmentator) -> Self {
        Self {
            generator,
            segmentator,
        }
    }

    pub fn from_config(config: &SegmentationConfig) -> Self {
        Self::new(
            ChapterGenerator::new(config.transition_ms),
            ChapterSegmentator::new(ChapterAnalyzer::new(
                config.max_segment_ms,
                config.min_silence_ms,
            )),
        )
    }

    /// Segments the silences without progress reporting.
    pub fn segment(&self, silences: &[Silence]) -> SegmentationOutcome {
        self.segment_with(silences, &NullObserver)
    }

    /// Segments the silences, reporting progress to `observer`.
    pub fn segment_with(&self, silences: &[Silence], observer: &dyn Observer) -> SegmentationOutcome {
        let mut chapters = self.generator.generate(silences, observer);
        chapters.fill_titles();
        let segments = self.segmentator.segment(&chapters, observer);
        observer.summary(&chapters, &segments);
        SegmentationOutcome { chapters, segments }
    }
}
