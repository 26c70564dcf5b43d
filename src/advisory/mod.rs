//! Advisory text contract
//!
//! The prompt asks the advisory service for three labelled sections and the
//! parser reads the same labels back. Both sides use the constants below;
//! the parser matches them case-insensitively.

pub mod highlight;
pub mod parser;
pub mod prompt;

pub use highlight::{
    annotate, highlight, segments, AnnotatedAdvisory, HighlightKind, HighlightSpan, Segment,
};
pub use parser::AdvisoryResponseParser;
pub use prompt::AdvisoryRequestBuilder;

pub const SUMMARY_HEADER: &str = "SUMMARY:";
pub const TIPS_HEADER: &str = "TIPS:";
pub const DISCLAIMER_HEADER: &str = "DISCLAIMER:";
