//! Advisory response parsing
//!
//! The advisory service is asked for SUMMARY / TIPS / DISCLAIMER sections,
//! but nothing enforces that on its side. Each section is scanned for
//! independently, and a reply without any of the markers is kept whole as
//! an unstructured summary. Parsing never fails.

use super::{DISCLAIMER_HEADER, SUMMARY_HEADER, TIPS_HEADER};
use crate::models::{AdvisoryResult, ResponseFormat};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref SUMMARY_SECTION: Regex = Regex::new(&format!(
        r"(?is){}(.*?)(?:{}|{}|\z)",
        regex::escape(SUMMARY_HEADER),
        regex::escape(TIPS_HEADER),
        regex::escape(DISCLAIMER_HEADER),
    ))
    .unwrap();
    static ref TIPS_SECTION: Regex = Regex::new(&format!(
        r"(?is){}(.*?)(?:{}|\z)",
        regex::escape(TIPS_HEADER),
        regex::escape(DISCLAIMER_HEADER),
    ))
    .unwrap();
    static ref DISCLAIMER_SECTION: Regex =
        Regex::new(&format!(r"(?is){}(.*)", regex::escape(DISCLAIMER_HEADER))).unwrap();
    /// `1. `, `2. ` ... at the start of the section or after whitespace
    static ref TIP_NUMBER: Regex = Regex::new(r"(?:^|\s)\d+\.\s+").unwrap();
}

pub struct AdvisoryResponseParser;

impl AdvisoryResponseParser {
    pub fn parse(raw: &str) -> AdvisoryResult {
        let summary = capture(&SUMMARY_SECTION, raw);
        let tips = capture(&TIPS_SECTION, raw);
        let disclaimer = capture(&DISCLAIMER_SECTION, raw);

        if summary.is_none() && tips.is_none() && disclaimer.is_none() {
            debug!(length = raw.len(), "Advisory reply has no section markers");
            return AdvisoryResult::unstructured(raw);
        }

        AdvisoryResult {
            summary: summary.map(clean).unwrap_or_default().to_string(),
            tips: tips.map(split_tips).unwrap_or_default(),
            disclaimer: disclaimer.map(clean).unwrap_or_default().to_string(),
            format: ResponseFormat::Structured,
        }
    }
}

fn capture<'a>(pattern: &Regex, raw: &'a str) -> Option<&'a str> {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trim whitespace and the bold markers a header leaves behind, as in
/// `**SUMMARY:** text\n**TIPS:**`. A `*` run only counts as a marker when
/// whitespace separates it from the text, so emphasis inside the content
/// survives.
fn clean(section: &str) -> &str {
    let mut text = section.trim();

    let rest = text.trim_start_matches('*');
    if rest.len() < text.len() && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        text = rest.trim_start();
    }

    let rest = text.trim_end_matches('*');
    if rest.len() < text.len() && (rest.is_empty() || rest.ends_with(char::is_whitespace)) {
        text = rest.trim_end();
    }

    text
}

fn split_tips(section: &str) -> Vec<String> {
    TIP_NUMBER
        .split(clean(section))
        .map(str::trim)
        .filter(|tip| !tip.is_empty())
        .map(str::to_string)
        .collect()
}
