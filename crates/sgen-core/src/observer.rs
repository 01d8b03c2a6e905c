//! Progress reporting for the segmentation pipeline.
//!
//! Observers only watch. Swapping one for another never changes the
//! produced segments.

use crate::chapter::{Chapter, ChapterCollection, ChapterPart};
use crate::segment::SegmentCollection;
use crate::segmentator::PartDecision;
use crate::silence::{Silence, SilenceKind};

/// Receives progress events from the pipeline.
///
/// Every method defaults to doing nothing, so implementors pick the events
/// they care about.
pub trait Observer {
    /// A silence was classified as a transition or a pause.
    fn silence_classified(&self, _index: usize, _silence: &Silence, _kind: SilenceKind) {}

    /// A chapter will be emitted as one segment.
    fn full_chapter(&self, _chapter: &Chapter) {}

    /// A chapter will be split into several segments.
    fn multiple_chapter(&self, _chapter: &Chapter) {}

    /// A part of a split chapter was handled. `accumulated` is the running
    /// segment duration before the decision was applied.
    fn part_decided(
        &self,
        _chapter: &Chapter,
        _part: &ChapterPart,
        _decision: PartDecision,
        _accumulated: i64,
    ) {
    }

    /// The run finished.
    fn summary(&self, _chapters: &ChapterCollection, _segments: &SegmentCollection) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn silence_classified(&self, index: usize, silence: &Silence, kind: SilenceKind) {
        tracing::debug!(
            silence = index,
            duration_ms = silence.duration(),
            from = %silence.from,
            until = %silence.until,
            kind = kind.as_str(),
            "classified silence"
        );
    }

    fn full_chapter(&self, chapter: &Chapter) {
        tracing::debug!(
            chapter = chapter.index(),
            duration_ms = chapter.duration(),
            "full chapter"
        );
    }

    fn multiple_chapter(&self, chapter: &Chapter) {
        tracing::debug!(
            chapter = chapter.index(),
            duration_ms = chapter.duration(),
            parts = chapter.len(),
            "multiple chapter"
        );
    }

    fn part_decided(
        &self,
        chapter: &Chapter,
        part: &ChapterPart,
        decision: PartDecision,
        accumulated: i64,
    ) {
        tracing::debug!(
            chapter = chapter.index(),
            part = part.position(),
            duration_ms = part.duration(),
            accumulated_ms = accumulated,
            decision = decision.as_str(),
            "chapter part"
        );
    }

    fn summary(&self, chapters: &ChapterCollection, segments: &SegmentCollection) {
        tracing::info!(
            chapters = chapters.number_of_chapters(),
            parts = chapters.number_of_parts(),
            duration_ms = chapters.duration(),
            segments = segments.len(),
            "segmentation finished"
        );
    }
}
