//! Highlighter — projects validated suggestions back onto the resume text.
//!
//! Every case-insensitive occurrence of each suggestion's `current_phrase` is
//! collected, sorted by start (longest first on ties) and then selected
//! greedily left to right. A span overlapping an already accepted one is
//! dropped whole, so each annotated segment belongs to exactly one suggestion.
//! The emitted segments always concatenate back to the input text.

use serde::Serialize;
use tracing::debug;

use crate::tailor::models::Suggestion;

/// A contiguous slice of the source text, optionally tagged with the
/// suggestion whose phrase it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Segment<'a> {
    Plain {
        content: &'a str,
    },
    Annotated {
        content: &'a str,
        suggestion: &'a Suggestion,
    },
}

impl<'a> Segment<'a> {
    pub fn content(&self) -> &'a str {
        match self {
            Segment::Plain { content } | Segment::Annotated { content, .. } => *content,
        }
    }

    pub fn suggestion(&self) -> Option<&'a Suggestion> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Annotated { suggestion, .. } => Some(*suggestion),
        }
    }

    /// Hover text for an annotated segment: `"{requirement} — {reason}"`.
    pub fn tooltip(&self) -> Option<String> {
        self.suggestion()
            .map(|s| format!("{} — {}", s.requirement, s.reason))
    }
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy)]
struct MatchSpan<'a> {
    start: usize,
    end: usize,
    suggestion: &'a Suggestion,
}

/// Splits `text` into plain and annotated segments for display.
pub fn highlight<'a>(text: &'a str, suggestions: &'a [Suggestion]) -> Vec<Segment<'a>> {
    let mut spans = find_matches(text, suggestions);

    // Stable: equal spans keep suggestion input order.
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    let mut discarded = 0usize;

    for span in &spans {
        if span.start < cursor {
            discarded += 1;
            continue;
        }
        if cursor < span.start {
            segments.push(Segment::Plain {
                content: &text[cursor..span.start],
            });
        }
        segments.push(Segment::Annotated {
            content: &text[span.start..span.end],
            suggestion: span.suggestion,
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain {
            content: &text[cursor..],
        });
    }

    debug!(
        "Highlighted {} of {} matched spans ({} overlapping discarded)",
        spans.len() - discarded,
        spans.len(),
        discarded
    );

    segments
}

/// Every literal, case-insensitive occurrence of each suggestion's phrase, in
/// suggestion order then text order. Nothing is deduplicated here.
///
/// Text and phrases are case folded char by char, so a folded byte offset
/// always lands on a char boundary of the source text.
fn find_matches<'a>(text: &str, suggestions: &'a [Suggestion]) -> Vec<MatchSpan<'a>> {
    let folded = FoldedText::new(text);
    let mut spans = Vec::new();

    for suggestion in suggestions {
        let phrase = suggestion.current_phrase.as_str();
        if phrase.is_empty() {
            continue;
        }

        let needle: String = phrase.chars().map(fold_char).collect();
        spans.extend(folded.find_all(&needle).map(|(start, end)| MatchSpan {
            start,
            end,
            suggestion,
        }));
    }

    spans
}

/// Lower-cased copy of the source text plus a map from folded byte offsets
/// back to source byte offsets.
struct FoldedText {
    folded: String,
    /// One entry per folded byte (the start of its source char), plus the text length.
    source_offsets: Vec<usize>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut source_offsets = Vec::with_capacity(text.len() + 1);

        for (offset, c) in text.char_indices() {
            let f = fold_char(c);
            folded.push(f);
            source_offsets.extend(std::iter::repeat(offset).take(f.len_utf8()));
        }
        source_offsets.push(text.len());

        Self {
            folded,
            source_offsets,
        }
    }

    /// Non-overlapping occurrences of `needle`, left to right, as source byte ranges.
    fn find_all<'s>(&'s self, needle: &'s str) -> impl Iterator<Item = (usize, usize)> + 's {
        self.folded.match_indices(needle).map(move |(start, m)| {
            (
                self.source_offsets[start],
                self.source_offsets[start + m.len()],
            )
        })
    }
}

/// Single-char lower-case mapping. Chars whose lower case expands to several
/// chars (e.g. `İ`) are kept as they are so folding stays one char per char.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
