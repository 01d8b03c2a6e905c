//! Output segments.

use serde::{Deserialize, Serialize};

use crate::time_value::TimeValue;

/// A playback segment: where it starts and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub offset: TimeValue,

    #[serde(default, skip_serializing_if = "title_is_blank")]
    pub title: Option<String>,
}

#[allow(clippy::ref_option)]
fn title_is_blank(title: &Option<String>) -> bool {
    title.as_deref().is_none_or(str::is_empty)
}

impl Segment {
    pub fn new(offset: TimeValue, title: Option<String>) -> Self {
        Self { offset, title }
    }
}

/// Ordered, append-only list of segments produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentCollection(Vec<Segment>);

impl SegmentCollection {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a segment and returns it.
    pub fn add(&mut self, offset: TimeValue, title: Option<String>) -> &Segment {
        self.0.push(Segment::new(offset, title));
        let last = self.0.len() - 1;
        &self.0[last]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wraps the segments under a `segments` key for delivery.
    pub const fn as_document(&self) -> SegmentDocument<'_> {
        SegmentDocument { segments: self }
    }
}

impl<'a> IntoIterator for &'a SegmentCollection {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The delivered document: `{"segments": [...]}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentDocument<'a> {
    pub segments: &'a SegmentCollection,
}
