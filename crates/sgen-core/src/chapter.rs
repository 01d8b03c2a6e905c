//! Chapters and the parts they are made of.
//!
//! A [`ChapterCollection`] owns its chapters and every chapter owns its parts.
//! Parts refer back to their chapter by index, so looking up a part's chapter
//! goes through the collection instead of a stored reference.

use crate::silence::Silence;
use crate::time_value::TimeValue;

/// A contiguous span of audio inside a chapter, bounded by silences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPart {
    offset: TimeValue,
    duration: i64,
    silence_before: Option<Silence>,
    silence_after: Option<Silence>,
    chapter: usize,
    position: usize,
}

impl ChapterPart {
    const fn new(offset: TimeValue, chapter: usize, position: usize) -> Self {
        Self {
            offset,
            duration: 0,
            silence_before: None,
            silence_after: None,
            chapter,
            position,
        }
    }

    /// Where the part starts.
    pub const fn offset(&self) -> TimeValue {
        self.offset
    }

    /// Length of the part in milliseconds.
    ///
    /// Zero until the part is finished; the last part of the source is never
    /// finished because nothing follows it.
    pub const fn duration(&self) -> i64 {
        self.duration
    }

    /// The silence that precedes the part, if any.
    pub const fn silence_before(&self) -> Option<&Silence> {
        self.silence_before.as_ref()
    }

    /// The silence that follows the part, if any.
    pub const fn silence_after(&self) -> Option<&Silence> {
        self.silence_after.as_ref()
    }

    /// Index of the owning chapter within its collection.
    pub const fn chapter_index(&self) -> usize {
        self.chapter
    }

    /// Index of the part within its chapter.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether this is the first part of its chapter.
    pub const fn is_first(&self) -> bool {
        self.position == 0
    }

    /// Duration plus the silence before it, unless this is the first part.
    ///
    /// The silence before a chapter's first part is the transition that
    /// separates it from the previous chapter and does not count.
    pub fn duration_with_left_silence(&self) -> i64 {
        let left = if self.is_first() {
            0
        } else {
            self.silence_before.map_or(0, |s| s.duration())
        };
        self.duration + left
    }

    fn finish_at(&mut self, end: TimeValue) {
        self.duration = end - self.offset;
    }
}

/// A span of audio between two transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    index: usize,
    title: Option<String>,
    parts: Vec<ChapterPart>,
}

impl Chapter {
    /// Creates an empty chapter at the given collection index.
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            title: None,
            parts: Vec::new(),
        }
    }

    /// Index of the chapter within its collection.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn parts(&self) -> &[ChapterPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn first(&self) -> Option<&ChapterPart> {
        self.parts.first()
    }

    pub fn last(&self) -> Option<&ChapterPart> {
        self.parts.last()
    }

    /// Offset of the first part, or zero for an empty chapter.
    pub fn offset(&self) -> TimeValue {
        self.first().map_or(TimeValue::ZERO, ChapterPart::offset)
    }

    /// From the first part's offset to the end of the last finished part.
    pub fn duration(&self) -> i64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.offset() - first.offset()) + last.duration(),
            _ => 0,
        }
    }

    /// Silences after every part that is neither the first nor the last.
    pub fn inner_silences(&self) -> impl Iterator<Item = &Silence> {
        self.parts
            .iter()
            .skip(1)
            .take(self.parts.len().saturating_sub(2))
            .filter_map(ChapterPart::silence_after)
    }

    /// Opens a new part at `offset`.
    pub(crate) fn start(&mut self, offset: TimeValue) -> &mut ChapterPart {
        let part = ChapterPart::new(offset, self.index, self.parts.len());
        self.parts.push(part);
        let last = self.parts.len() - 1;
        &mut self.parts[last]
    }

    /// Opens a new part right after `silence`.
    pub(crate) fn start_by_silence(&mut self, silence: Silence) {
        self.start(silence.until).silence_before = Some(silence);
    }

    /// Finishes the open part where `silence` begins.
    ///
    /// A chapter without parts first gets one starting at zero.
    pub(crate) fn finish_by_silence(&mut self, silence: Silence) {
        if self.parts.is_empty() {
            self.start(TimeValue::ZERO);
        }
        let last = self.parts.len() - 1;
        let part = &mut self.parts[last];
        part.finish_at(silence.from);
        part.silence_after = Some(silence);
    }

    /// Finishes the open part at `silence` and opens the next one after it.
    pub(crate) fn split_by_silence(&mut self, silence: Silence) {
        self.finish_by_silence(silence);
        self.start_by_silence(silence);
    }
}

/// Ordered chapters of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterCollection {
    chapters: Vec<Chapter>,
}

impl ChapterCollection {
    pub const fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// The chapter that owns `part`.
    pub fn parent_of(&self, part: &ChapterPart) -> Option<&Chapter> {
        self.get(part.chapter_index())
    }

    pub fn number_of_chapters(&self) -> usize {
        self.chapters.len()
    }

    pub fn number_of_parts(&self) -> usize {
        self.chapters.iter().map(Chapter::len).sum()
    }

    /// Sum of chapter durations; transitions between chapters are excluded.
    pub fn duration(&self) -> i64 {
        self.chapters.iter().map(Chapter::duration).sum()
    }

    /// Titles every untitled chapter as "Chapter N", counting from one.
    pub fn fill_titles(&mut self) {
        for (index, chapter) in self.chapters.iter_mut().enumerate() {
            if chapter.title.is_none() {
                chapter.set_title(format!("Chapter {}", index + 1));
            }
        }
    }
}

impl<'a> IntoIterator for &'a ChapterCollection {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}
