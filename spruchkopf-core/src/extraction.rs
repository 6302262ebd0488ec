//! Extraction records and the per-pass extraction context

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Half-open character interval in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharInterval {
    /// First character
    pub start_pos: usize,
    /// One past the last character
    pub end_pos: usize,
}

impl CharInterval {
    /// Create an interval
    pub fn new(start_pos: usize, end_pos: usize) -> Self {
        Self { start_pos, end_pos }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    /// True when the interval covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two intervals share at least one character
    pub fn overlaps(&self, other: &CharInterval) -> bool {
        self.start_pos < other.end_pos && other.start_pos < self.end_pos
    }
}

/// One recognised entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Identifier, unique within one context
    pub id: usize,
    /// Entity class, e.g. `court` or `date`
    pub extraction_class: String,
    /// Matched source text
    pub extraction_text: String,
    /// Where the text was found
    pub char_interval: CharInterval,
    /// Captured and derived attributes
    pub attributes: BTreeMap<String, String>,
    /// Higher wins when extractions overlap
    pub priority: i32,
    /// Provenance: rule and tag
    pub annotation: String,
}

impl Extraction {
    /// Create an extraction; the context assigns the final id
    pub fn new(
        extraction_class: impl Into<String>,
        extraction_text: impl Into<String>,
        char_interval: CharInterval,
        priority: i32,
    ) -> Self {
        Self {
            id: 0,
            extraction_class: extraction_class.into(),
            extraction_text: extraction_text.into(),
            char_interval,
            attributes: BTreeMap::new(),
            priority,
            annotation: String::new(),
        }
    }

    /// Attach attributes
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a provenance note
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Attribute lookup
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Overlap ranking: `Less` means `self` is preferred over `other`
    ///
    /// Higher priority first, then earlier start, then longer span.
    pub fn precedence(&self, other: &Extraction) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then(self.char_interval.start_pos.cmp(&other.char_interval.start_pos))
            .then(other.char_interval.len().cmp(&self.char_interval.len()))
    }
}

/// Accumulates extractions for one processing pass
///
/// Extractions are kept sorted by start offset and never overlap each other.
#[derive(Debug, Default, Clone)]
pub struct ExtractionContext {
    extractions: Vec<Extraction>,
    next_id: usize,
    rejected: usize,
}

impl ExtractionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an extraction to the context
    ///
    /// It is accepted only if it takes precedence over every overlapping
    /// extraction already present; those are then evicted. Returns whether
    /// the extraction was accepted.
    pub fn add(&mut self, mut extraction: Extraction) -> bool {
        let beaten = self
            .extractions
            .iter()
            .filter(|e| e.char_interval.overlaps(&extraction.char_interval))
            .any(|e| extraction.precedence(e) != Ordering::Less);
        if beaten {
            self.rejected += 1;
            tracing::trace!(
                class = %extraction.extraction_class,
                text = %extraction.extraction_text,
                "dropped overlapping extraction"
            );
            return false;
        }

        let before = self.extractions.len();
        self.extractions
            .retain(|e| !e.char_interval.overlaps(&extraction.char_interval));
        self.rejected += before - self.extractions.len();

        self.next_id += 1;
        extraction.id = self.next_id;
        let pos = self
            .extractions
            .partition_point(|e| e.char_interval.start_pos <= extraction.char_interval.start_pos);
        self.extractions.insert(pos, extraction);
        true
    }

    /// Rank a batch by precedence and add the winners
    ///
    /// Equal-ranked candidates keep their original order.
    pub fn add_all(&mut self, mut candidates: Vec<Extraction>) -> usize {
        candidates.sort_by(|a, b| a.precedence(b));
        candidates
            .into_iter()
            .map(|candidate| self.add(candidate))
            .filter(|accepted| *accepted)
            .count()
    }

    /// Accepted extractions, ordered by start offset
    pub fn extractions(&self) -> &[Extraction] {
        &self.extractions
    }

    /// Extractions of one class
    pub fn by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Extraction> + 'a {
        self.extractions
            .iter()
            .filter(move |e| e.extraction_class == class)
    }

    /// First extraction of a class
    pub fn first(&self, class: &str) -> Option<&Extraction> {
        self.extractions
            .iter()
            .find(|e| e.extraction_class == class)
    }

    /// Number of accepted extractions
    pub fn len(&self) -> usize {
        self.extractions.len()
    }

    /// True when nothing was accepted
    pub fn is_empty(&self) -> bool {
        self.extractions.is_empty()
    }

    /// How many candidates were dropped or evicted by the overlap policy
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Hand the extractions to the caller
    pub fn into_extractions(self) -> Vec<Extraction> {
        self.extractions
    }
}
