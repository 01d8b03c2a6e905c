//! Turning chapters into segments.
//!
//! Unbreakable chapters become one segment each. Breakable chapters are cut
//! with a running accumulator over their parts:
//!
//! 1. A long separable part gets its own segment and resets the accumulator
//! 2. An empty accumulator starts a segment seeded with the part's duration
//! 3. A separable part that would overload the budget starts a segment and
//!    resets the accumulator to zero (the part itself is not counted)
//! 4. The open trailing part gets its own segment
//! 5. Anything else is added to the accumulator

use crate::analyzer::ChapterAnalyzer;
use crate::chapter::{Chapter, ChapterCollection, ChapterPart};
use crate::observer::Observer;
use crate::segment::SegmentCollection;

/// What happened to one part of a breakable chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartDecision {
    /// Long enough and cleanly separable: a segment of its own.
    Long,
    /// Starts a new run of parts.
    Start,
    /// Would overload the current run and can be cut: starts a new segment.
    Overloaded,
    /// The open trailing part of the source.
    LastEmpty,
    /// Joins the current run.
    Intermediate,
}

impl PartDecision {
    /// Whether a segment is emitted at the part's offset.
    pub const fn emits(self) -> bool {
        !matches!(self, Self::Intermediate)
    }

    /// Accumulated duration after applying the decision.
    pub fn next_accumulated(self, accumulated: i64, part: &ChapterPart) -> i64 {
        match self {
            Self::Long | Self::Overloaded => 0,
            Self::Start => part.duration_with_left_silence(),
            Self::LastEmpty => accumulated,
            Self::Intermediate => accumulated + part.duration_with_left_silence(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Start => "start",
            Self::Overloaded => "overloaded",
            Self::LastEmpty => "last-empty",
            Self::Intermediate => "intermediate",
        }
    }
}

/// Picks the branch for `part` given the running `accumulated` duration.
///
/// Branches are tried in priority order; the first match wins.
pub fn decide(analyzer: &ChapterAnalyzer, accumulated: i64, part: &ChapterPart) -> PartDecision {
    if analyzer.is_long_separable_part(part) {
        PartDecision::Long
    } else if accumulated == 0 {
        PartDecision::Start
    } else if analyzer.is_segment_overloaded(accumulated, part) {
        PartDecision::Overloaded
    } else if part.duration() == 0 {
        PartDecision::LastEmpty
    } else {
        PartDecision::Intermediate
    }
}

/// Renders segment titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentTitleMaker;

impl SegmentTitleMaker {
    /// Title of a whole-chapter segment: the chapter's own title.
    pub fn chapter_title(&self, chapter: &Chapter) -> Option<String> {
        chapter.title().map(str::to_string)
    }

    /// Title of the `number`th segment cut from the part's chapter.
    pub fn part_title(
        &self,
        chapters: &ChapterCollection,
        part: &ChapterPart,
        number: u32,
    ) -> String {
        match chapters.parent_of(part).and_then(Chapter::title) {
            Some(title) if !title.is_empty() => format!("{title}, part {number}"),
            _ => format!("Part {number}"),
        }
    }
}

/// Running state while cutting one chapter.
#[derive(Debug, Clone, Copy, Default)]
struct Run {
    part_number: u32,
    accumulated: i64,
}

/// Cuts a breakable chapter into several segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultipleChapterSegmentator {
    analyzer: ChapterAnalyzer,
    title_maker: SegmentTitleMaker,
}

impl MultipleChapterSegmentator {
    pub const fn new(analyzer: ChapterAnalyzer, title_maker: SegmentTitleMaker) -> Self {
        Self {
            analyzer,
            title_maker,
        }
    }

    /// Appends the segments of `chapter` to `target`.
    ///
    /// `chapters` is the collection that owns `chapter`; titles are resolved
    /// through it.
    pub fn segment(
        &self,
        chapters: &ChapterCollection,
        chapter: &Chapter,
        target: &mut SegmentCollection,
        observer: &dyn Observer,
    ) {
        observer.multiple_chapter(chapter);

        chapter.parts().iter().fold(Run::default(), |run, part| {
            let decision = decide(&self.analyzer, run.accumulated, part);
            observer.part_decided(chapter, part, decision, run.accumulated);

            let mut part_number = run.part_number;
            if decision.emits() {
                part_number += 1;
                let title = self.title_maker.part_title(chapters, part, part_number);
                target.add(part.offset(), Some(title));
            }

            Run {
                part_number,
                accumulated: decision.next_accumulated(run.accumulated, part),
            }
        });
    }
}

/// Routes every chapter to a single segment or to the multiple segmentator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterSegmentator {
    analyzer: ChapterAnalyzer,
    title_maker: SegmentTitleMaker,
    multiple: MultipleChapterSegmentator,
}

impl ChapterSegmentator {
    pub const fn new(analyzer: ChapterAnalyzer) -> Self {
        let title_maker = SegmentTitleMaker;
        Self {
            analyzer,
            title_maker,
            multiple: MultipleChapterSegmentator::new(analyzer, title_maker),
        }
    }

    pub const fn analyzer(&self) -> &ChapterAnalyzer {
        &self.analyzer
    }

    /// Segments every chapter in order.
    pub fn segment(&self, chapters: &ChapterCollection, observer: &dyn Observer) -> SegmentCollection {
        let mut segments = SegmentCollection::new();
        for chapter in chapters {
            if self.analyzer.is_unbreakable(chapter) {
                observer.full_chapter(chapter);
                segments.add(chapter.offset(), self.title_maker.chapter_title(chapter));
            } else {
                self.multiple
                    .segment(chapters, chapter, &mut segments, observer);
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::observer::NullObserver;
    use crate::{ChapterGenerator, Silence};

    #[derive(Default)]
    struct Decisions(RefCell<Vec<(usize, PartDecision, i64)>>);

    impl Observer for Decisions {
        fn part_decided(
            &self,
            _chapter: &Chapter,
            part: &ChapterPart,
            decision: PartDecision,
            accumulated: i64,
        ) {
            self.0
                .borrow_mut()
                .push((part.position(), decision, accumulated));
        }
    }

    fn chapters(silences: &[Silence]) -> ChapterCollection {
        let mut chapters = ChapterGenerator::new(2_000).generate(silences, &NullObserver);
        chapters.fill_titles();
        chapters
    }

    fn offsets_and_titles(segments: &SegmentCollection) -> Vec<(i64, String)> {
        segments
            .iter()
            .map(|s| (s.offset.as_millis(), s.title.clone().unwrap_or_default()))
            .collect()
    }

    /// One chapter: parts of 10s separated by 1s pauses, ending open.
    fn even_chapter() -> ChapterCollection {
        chapters(&[
            Silence::from_millis(10_000, 11_000),
            Silence::from_millis(21_000, 22_000),
            Silence::from_millis(32_000, 33_000),
            Silence::from_millis(43_000, 44_000),
        ])
    }

    #[test]
    fn decide_prefers_long_separable_part() {
        let chapters = even_chapter();
        let part = &chapters.chapters()[0].parts()[1];
        let analyzer = ChapterAnalyzer::new(Some(10_000), Some(1_000));
        assert_eq!(decide(&analyzer, 0, part), PartDecision::Long);
        assert_eq!(decide(&analyzer, 5_000, part), PartDecision::Long);
    }

    #[test]
    fn decide_starts_on_empty_accumulator() {
        let chapters = even_chapter();
        let part = &chapters.chapters()[0].parts()[1];
        let analyzer = ChapterAnalyzer::new(Some(25_000), Some(1_000));
        assert_eq!(decide(&analyzer, 0, part), PartDecision::Start);
    }

    #[test]
    fn decide_cuts_when_overloaded_and_separable() {
        let chapters = even_chapter();
        let part = &chapters.chapters()[0].parts()[1];
        let analyzer = ChapterAnalyzer::new(Some(25_000), Some(1_000));
        // 11s with the left silence: 14s + 11s reaches the budget.
        assert_eq!(decide(&analyzer, 14_000, part), PartDecision::Overloaded);
        assert_eq!(decide(&analyzer, 13_999, part), PartDecision::Intermediate);

        let loose = ChapterAnalyzer::new(Some(25_000), Some(1_001));
        assert_eq!(decide(&loose, 14_000, part), PartDecision::Intermediate);
    }

    #[test]
    fn decide_flags_open_trailing_part() {
        let chapters = even_chapter();
        let last = chapters.chapters()[0].last().unwrap();
        let analyzer = ChapterAnalyzer::new(Some(25_000), Some(1_000));
        assert_eq!(decide(&analyzer, 3_000, last), PartDecision::LastEmpty);
    }

    #[test]
    fn next_accumulated_per_decision() {
        let chapters = even_chapter();
        let part = &chapters.chapters()[0].parts()[1];
        assert_eq!(PartDecision::Long.next_accumulated(7, part), 0);
        assert_eq!(PartDecision::Overloaded.next_accumulated(7, part), 0);
        assert_eq!(PartDecision::Start.next_accumulated(0, part), 11_000);
        assert_eq!(PartDecision::LastEmpty.next_accumulated(7, part), 7);
        assert_eq!(PartDecision::Intermediate.next_accumulated(7, part), 11_007);
    }

    #[test]
    fn title_maker_uses_chapter_title() {
        let chapters = even_chapter();
        let part = &chapters.chapters()[0].parts()[2];
        assert_eq!(
            SegmentTitleMaker.part_title(&chapters, part, 2),
            "Chapter 1, part 2"
        );
        assert_eq!(
            SegmentTitleMaker.chapter_title(&chapters.chapters()[0]).as_deref(),
            Some("Chapter 1")
        );
    }

    #[test]
    fn title_maker_falls_back_without_chapter_title() {
        let untitled =
            ChapterGenerator::new(2_000).generate(&[Silence::from_millis(1_000, 1_500)], &NullObserver);
        let part = &untitled.chapters()[0].parts()[1];
        assert_eq!(SegmentTitleMaker.part_title(&untitled, part, 3), "Part 3");
        assert_eq!(SegmentTitleMaker.chapter_title(&untitled.chapters()[0]), None);
    }

    #[test]
    fn overload_cut_resets_without_seeding() {
        let chapters = even_chapter();
        let analyzer = ChapterAnalyzer::new(Some(25_000), Some(1_000));
        let decisions = Decisions::default();
        let mut segments = SegmentCollection::new();

        MultipleChapterSegmentator::new(analyzer, SegmentTitleMaker).segment(
            &chapters,
            &chapters.chapters()[0],
            &mut segments,
            &decisions,
        );
        assert_eq!(segments.len(), 4);

        assert_eq!(
            decisions.0.into_inner(),
            vec![
                (0, PartDecision::Start, 0),
                (1, PartDecision::Intermediate, 10_000),
                (2, PartDecision::Overloaded, 21_000),
                // The cutting part's 11s are not carried over.
                (3, PartDecision::Start, 0),
                (4, PartDecision::LastEmpty, 11_000),
            ]
        );
        assert_eq!(
            offsets_and_titles(&segments),
            vec![
                (0, "Chapter 1, part 1".to_string()),
                (22_000, "Chapter 1, part 2".to_string()),
                (33_000, "Chapter 1, part 3".to_string()),
                (44_000, "Chapter 1, part 4".to_string()),
            ]
        );
    }

    #[test]
    fn unbreakable_chapters_emit_one_segment_each() {
        let chapters = chapters(&[
            Silence::from_millis(5_000, 5_100),
            Silence::from_millis(10_000, 12_500),
        ]);
        let segments = ChapterSegmentator::new(ChapterAnalyzer::new(None, None))
            .segment(&chapters, &NullObserver);
        assert_eq!(
            offsets_and_titles(&segments),
            vec![
                (0, "Chapter 1".to_string()),
                (12_500, "Chapter 2".to_string()),
            ]
        );
    }

    #[test]
    fn breakable_chapter_is_cut_in_place() {
        let chapters = chapters(&[
            Silence::from_millis(5_000, 5_100),
            Silence::from_millis(10_000, 12_500),
            Silence::from_millis(15_000, 15_600),
            Silence::from_millis(20_000, 20_700),
            Silence::from_millis(90_000, 93_000),
        ]);
        let segments = ChapterSegmentator::new(ChapterAnalyzer::new(Some(60_000), Some(500)))
            .segment(&chapters, &NullObserver);
        assert_eq!(
            offsets_and_titles(&segments),
            vec![
                (0, "Chapter 1".to_string()),
                (12_500, "Chapter 2, part 1".to_string()),
                (20_700, "Chapter 2, part 2".to_string()),
                (93_000, "Chapter 3".to_string()),
            ]
        );
    }
}
