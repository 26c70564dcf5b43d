//! Emphasis annotation for rendered advisory text
//!
//! Returns byte ranges over the original strings instead of splicing markup
//! into them, so the parsed advisory stays untouched.

use crate::models::AdvisoryResult;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref CURRENCY: Regex = Regex::new(r"\$\d[\d,]*(?:\.\d{1,2})?").unwrap();
    static ref SAVINGS_WORD: Regex = Regex::new(r"(?i)saving|saved|save").unwrap();
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Currency,
    Savings,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasis: Option<HighlightKind>,
}

/// Spans for the summary and for each tip, index-aligned with `tips`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnnotatedAdvisory {
    pub summary: Vec<HighlightSpan>,
    pub tips: Vec<Vec<HighlightSpan>>,
}

/// Spans sorted by start offset. The two patterns cannot overlap: one
/// starts at `$`, the other only covers letters.
pub fn highlight(text: &str) -> Vec<HighlightSpan> {
    let currency = CURRENCY.find_iter(text).map(|m| HighlightSpan {
        start: m.start(),
        end: m.end(),
        kind: HighlightKind::Currency,
    });
    let savings = SAVINGS_WORD.find_iter(text).map(|m| HighlightSpan {
        start: m.start(),
        end: m.end(),
        kind: HighlightKind::Savings,
    });

    let mut spans: Vec<HighlightSpan> = currency.chain(savings).collect();
    spans.sort_by_key(|span| span.start);
    spans
}

/// Split `text` into alternating plain and emphasised pieces.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for span in highlight(text) {
        if span.start > cursor {
            out.push(Segment {
                text: &text[cursor..span.start],
                emphasis: None,
            });
        }
        out.push(Segment {
            text: &text[span.start..span.end],
            emphasis: Some(span.kind),
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        out.push(Segment {
            text: &text[cursor..],
            emphasis: None,
        });
    }

    out
}

pub fn annotate(result: &AdvisoryResult) -> AnnotatedAdvisory {
    AnnotatedAdvisory {
        summary: highlight(&result.summary),
        tips: result.tips.iter().map(|tip| highlight(tip)).collect(),
    }
}
