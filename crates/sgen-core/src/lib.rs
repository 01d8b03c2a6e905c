//! Core logic for generating audiobook segments from detected silences.
//!
//! This crate contains:
//! - Time values: ISO 8601 durations with millisecond precision
//! - Chapter generation: classifying silences into transitions and pauses
//! - Chapter analysis: deciding which chapters may be split and where
//! - Segmentation: cutting chapters into titled playback segments

pub mod analyzer;
pub mod chapter;
pub mod generator;
pub mod observer;
pub mod pipeline;
pub mod segment;
pub mod segmentator;
pub mod silence;
pub mod time_value;

pub use analyzer::ChapterAnalyzer;
pub use chapter::{Chapter, ChapterCollection, ChapterPart};
pub use generator::ChapterGenerator;
pub use observer::{NullObserver, Observer, TracingObserver};
pub use pipeline::{SegmentationConfig, SegmentationOutcome, SilenceSegmentator};
pub use segment::{Segment, SegmentCollection, SegmentDocument};
pub use segmentator::{
    ChapterSegmentator, MultipleChapterSegmentator, PartDecision, SegmentTitleMaker, decide,
};
pub use silence::{Silence, SilenceKind};
pub use time_value::{ParseTimeValueError, TimeValue};
