//! Day-separator splitting.
//!
//! KakaoTalk prints a banner line before the first message of every day:
//!
//! ```text
//! --------------- Tuesday, March 5, 2024 ---------------
//! ```
//!
//! [`split_date_blocks`] cuts the transcript at those banners. Block `i`
//! runs from the end of banner `i` to the start of banner `i + 1`, the last
//! block runs to the end of the text. Anything before the first banner
//! (the channel header and save date) belongs to no block.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConvertError, Result};

/// Day separator banner. Group 1 is the `Month D, YYYY` label.
pub const DATE_SEPARATOR_PATTERN: &str =
    r"(?m)^-{15}\s[A-Z][a-z]+day,\s([A-Z][a-z]+\s\d{1,2},\s\d{4})\s-{15}";

/// Appended to every transcript so the last block always has a boundary.
pub const TRANSCRIPT_SENTINEL: &str = "\n\n";

fn date_separator_re() -> &'static Regex {
    static DATE_SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    DATE_SEPARATOR_RE.get_or_init(|| Regex::new(DATE_SEPARATOR_PATTERN).unwrap())
}

/// A contiguous slice of the transcript covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBlock<'a> {
    /// Date label as printed in the banner, e.g. `March 5, 2024`
    pub date: &'a str,
    /// Block content (everything after the banner)
    pub text: &'a str,
    /// Byte offset where the banner line starts
    pub separator_start: usize,
    /// Byte offset where the content starts
    pub start: usize,
    /// Byte offset where the content ends (exclusive)
    pub end: usize,
}

impl DateBlock<'_> {
    /// Byte range of banner plus content.
    pub fn span(&self) -> Range<usize> {
        self.separator_start..self.end
    }
}

/// Text before the first day separator, or the whole text if there is none.
pub fn preamble(text: &str) -> &str {
    date_separator_re()
        .find(text)
        .map_or(text, |banner| &text[..banner.start()])
}

/// Splits a transcript into date blocks in transcript order.
///
/// Fails with [`ConvertError::MalformedInput`] when the text has no day
/// separator at all.
///
/// # Example
///
/// ```
/// use kakaoslack::parsing::split_date_blocks;
///
/// let text = "--------------- Tuesday, March 5, 2024 ---------------\n\
///             [Alice] [3:05 PM] hello\n\n";
/// let blocks = split_date_blocks(text)?;
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].date, "March 5, 2024");
/// assert!(blocks[0].text.contains("hello"));
/// # Ok::<(), kakaoslack::ConvertError>(())
/// ```
pub fn split_date_blocks(text: &str) -> Result<Vec<DateBlock<'_>>> {
    let separators: Vec<(Range<usize>, &str)> = date_separator_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let date = caps.get(1)?;
            Some((whole.range(), date.as_str()))
        })
        .collect();

    if separators.is_empty() {
        return Err(ConvertError::malformed(
            "no day separator line found; is this a KakaoTalk transcript?",
            None,
        ));
    }

    let blocks = separators
        .iter()
        .enumerate()
        .map(|(i, (banner, date))| {
            let end = separators
                .get(i + 1)
                .map_or(text.len(), |(next, _)| next.start);
            DateBlock {
                date: *date,
                text: &text[banner.end..end],
                separator_start: banner.start,
                start: banner.end,
                end,
            }
        })
        .collect();

    Ok(blocks)
}
