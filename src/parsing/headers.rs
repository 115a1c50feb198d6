//! Header tokenizing and event extraction.
//!
//! Every line of a date block is classified as one of three headers or as
//! body text:
//!
//! | Kind | Example |
//! |------|---------|
//! | Normal | `[Alice] [3:05 PM] hello` |
//! | Join | `Alice님이 Bob님, Carol님을 초대하였습니다.` |
//! | Leave | `Bob님이 나갔습니다.` |
//!
//! A header closes the previous event's text span. Lines that match no
//! header (including banner types this dialect doesn't know about) are
//! body text of the current event.

use std::sync::OnceLock;

use regex::Regex;

use super::blocks::DateBlock;
use crate::event::{MessageEvent, Subtype};

/// `[author] [H:MM AM] `
pub const NORMAL_HEADER_PATTERN: &str = r"^\[(.+?)\]\s\[(\d{1,2}:\d{2}\s[AP]M)\]\s";

/// `inviter님이 a님, b님을 초대하였습니다.`
pub const JOIN_HEADER_PATTERN: &str = r"^(.+?)님이\s(.+)님을\s초대하였습니다\.";

/// `user님이 나갔습니다.`
pub const LEAVE_HEADER_PATTERN: &str = r"^(.+)님이\s나갔습니다\.";

/// Separates invited users inside a join banner.
pub const INVITED_DELIMITER: &str = "님, ";

struct HeaderPatterns {
    normal: Regex,
    join: Regex,
    leave: Regex,
}

fn header_patterns() -> &'static HeaderPatterns {
    static PATTERNS: OnceLock<HeaderPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| HeaderPatterns {
        normal: Regex::new(NORMAL_HEADER_PATTERN).unwrap(),
        join: Regex::new(JOIN_HEADER_PATTERN).unwrap(),
        leave: Regex::new(LEAVE_HEADER_PATTERN).unwrap(),
    })
}

/// What a single transcript line introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderKind<'a> {
    /// An authored message with its clock time
    Normal { author: &'a str, time: &'a str },
    /// One or more users invited by `inviter`, in banner order
    Join {
        inviter: &'a str,
        invited: Vec<&'a str>,
    },
    /// A user left
    Leave { user: &'a str },
    /// Not a header: body text of the current event
    Unrecognized,
}

impl HeaderKind<'_> {
    /// Returns `true` if the line starts a new event.
    pub fn is_header(&self) -> bool {
        !matches!(self, HeaderKind::Unrecognized)
    }
}

/// A recognized header with its byte range inside the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderToken<'a> {
    pub kind: HeaderKind<'a>,
    /// Offset of the line start
    pub start: usize,
    /// Offset just past the matched header
    pub end: usize,
}

/// Classifies one line (including its line terminator, if any).
///
/// Returns the kind and the length of the matched header prefix; the
/// length is `0` for [`HeaderKind::Unrecognized`].
///
/// # Example
///
/// ```
/// use kakaoslack::parsing::{HeaderKind, classify_line};
///
/// let (kind, len) = classify_line("[Alice] [3:05 PM] hello\n");
/// assert_eq!(kind, HeaderKind::Normal { author: "Alice", time: "3:05 PM" });
/// assert_eq!(len, "[Alice] [3:05 PM] ".len());
///
/// let (kind, _) = classify_line("just some text\n");
/// assert_eq!(kind, HeaderKind::Unrecognized);
/// ```
pub fn classify_line(line: &str) -> (HeaderKind<'_>, usize) {
    let patterns = header_patterns();

    if let Some(caps) = patterns.normal.captures(line) {
        if let (Some(whole), Some(author), Some(time)) = (caps.get(0), caps.get(1), caps.get(2)) {
            let kind = HeaderKind::Normal {
                author: author.as_str(),
                time: time.as_str(),
            };
            return (kind, whole.end());
        }
    }

    if let Some(caps) = patterns.join.captures(line) {
        if let (Some(whole), Some(inviter), Some(list)) = (caps.get(0), caps.get(1), caps.get(2)) {
            let kind = HeaderKind::Join {
                inviter: inviter.as_str(),
                invited: list.as_str().split(INVITED_DELIMITER).collect(),
            };
            return (kind, whole.end());
        }
    }

    if let Some(caps) = patterns.leave.captures(line) {
        if let (Some(whole), Some(user)) = (caps.get(0), caps.get(1)) {
            return (
                HeaderKind::Leave {
                    user: user.as_str(),
                },
                whole.end(),
            );
        }
    }

    (HeaderKind::Unrecognized, 0)
}

/// Finds every header in a block, in order.
pub fn scan_headers(text: &str) -> Vec<HeaderToken<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let (kind, len) = classify_line(line);
        if kind.is_header() {
            tokens.push(HeaderToken {
                kind,
                start: offset,
                end: offset + len,
            });
        }
        offset += line.len();
    }

    tokens
}

/// Extracts the events of one date block.
///
/// Each event's text is the trimmed span from the end of its header to the
/// start of the next header (or the end of the block). Text before the
/// first header is dropped. A join banner naming N users yields N events
/// sharing the inviter and the text span.
pub fn extract_events(block: &DateBlock<'_>) -> Vec<MessageEvent> {
    let headers = scan_headers(block.text);
    let mut events = Vec::with_capacity(headers.len());

    for (i, header) in headers.iter().enumerate() {
        let span_end = headers
            .get(i + 1)
            .map_or(block.text.len(), |next| next.start);
        let text = block.text[header.end..span_end].trim();

        match &header.kind {
            HeaderKind::Normal { author, time } => {
                events.push(
                    MessageEvent::new(*author, block.date)
                        .with_raw_time(*time)
                        .with_text(text),
                );
            }
            HeaderKind::Join { inviter, invited } => {
                events.extend(invited.iter().map(|user| {
                    MessageEvent::new(*user, block.date)
                        .with_inviter(*inviter)
                        .with_subtype(Subtype::ChannelJoin)
                        .with_text(text)
                }));
            }
            HeaderKind::Leave { user } => {
                events.push(
                    MessageEvent::new(*user, block.date)
                        .with_subtype(Subtype::ChannelLeave)
                        .with_text(text),
                );
            }
            HeaderKind::Unrecognized => {}
        }
    }

    tracing::trace!(date = block.date, events = events.len(), "extracted block");
    events
}
