//! Channel name and membership.
//!
//! The channel name comes from the header line before the first day
//! separator (`홍길동 님과 카카오톡 대화`), lower-cased and restricted to the characters
//! Slack accepts in channel names. Members are every user and inviter seen
//! in the event stream.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::blocks::preamble;
use crate::error::{ConvertError, Result};
use crate::event::MessageEvent;

/// `name 님과 카카오톡 대화`
pub const CHANNEL_HEADER_PATTERN: &str = r"(?m)^(.+)\s님과 카카오톡 대화";

fn channel_header_re() -> &'static Regex {
    static CHANNEL_HEADER_RE: OnceLock<Regex> = OnceLock::new();
    CHANNEL_HEADER_RE.get_or_init(|| Regex::new(CHANNEL_HEADER_PATTERN).unwrap())
}

/// Summary of one converted transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    /// Sanitized channel name
    pub name: String,
    /// Sorted user identifiers
    pub members: Vec<String>,
}

/// Returns the raw conversation name from the channel header.
///
/// Only the preamble is searched, so a message body quoting a header line
/// does not count.
pub fn find_channel_name(text: &str) -> Option<&str> {
    channel_header_re()
        .captures(preamble(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_allowed(c: char) -> bool {
    matches!(c,
        '0'..='9' | 'a'..='z' | '_' | '-'
        | 'ㄱ'..='ㅎ'
        | 'ㅏ'..='ㅣ'
        | '가'..='힣')
}

/// Lower-cases `raw` and replaces every disallowed character with `_`.
///
/// Allowed: ASCII digits and lowercase letters, `_`, `-`, Hangul jamo and
/// Hangul syllables. The result is cut to `max_len` characters.
///
/// # Example
///
/// ```
/// use kakaoslack::parsing::sanitize_channel_name;
///
/// assert_eq!(sanitize_channel_name("Team Chat!", 80), "team_chat_");
/// assert_eq!(sanitize_channel_name("홍길동", 80), "홍길동");
/// ```
pub fn sanitize_channel_name(raw: &str, max_len: usize) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .take(max_len)
        .collect()
}

/// Every user and inviter in the stream.
pub fn collect_members(events: &[MessageEvent]) -> BTreeSet<String> {
    events
        .iter()
        .flat_map(|e| std::iter::once(&e.user).chain(e.inviter.as_ref()))
        .cloned()
        .collect()
}

/// Builds the channel record for a transcript.
///
/// Fails with [`ConvertError::MalformedInput`] when the channel header is
/// missing.
pub fn build_metadata(
    text: &str,
    events: &[MessageEvent],
    max_len: usize,
) -> Result<ChannelMetadata> {
    let raw = find_channel_name(text).ok_or_else(|| {
        ConvertError::malformed("missing '... 님과 카카오톡 대화' channel header", None)
    })?;

    Ok(ChannelMetadata {
        name: sanitize_channel_name(raw, max_len),
        members: collect_members(events).into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Subtype;

    #[test]
    fn test_find_channel_name() {
        let text = "Project Team 님과 카카오톡 대화\n저장한 날짜 : 2024-03-05\n";
        assert_eq!(find_channel_name(text), Some("Project Team"));
    }

    #[test]
    fn test_find_channel_name_missing() {
        assert_eq!(find_channel_name("just text\n"), None);
    }

    #[test]
    fn test_find_channel_name_ignores_message_bodies() {
        let text = "--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [3:05 PM] hi\n\
Fake 님과 카카오톡 대화\n";
        assert_eq!(find_channel_name(text), None);
        assert!(build_metadata(text, &[], 80).unwrap_err().is_malformed());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_channel_name("Project Team", 80), "project_team");
        assert_eq!(sanitize_channel_name("a.b/c", 80), "a_b_c");
        assert_eq!(sanitize_channel_name("dev-ops_2", 80), "dev-ops_2");
        assert_eq!(sanitize_channel_name("ㅋㅋ 모임", 80), "ㅋㅋ_모임");
        assert_eq!(sanitize_channel_name("日本", 80), "__");
        assert_eq!(sanitize_channel_name("Ünïcode", 80), "_n_code");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_channel_name(&long, 80).chars().count(), 80);
        assert_eq!(sanitize_channel_name("가나다라", 2), "가나");
    }

    #[test]
    fn test_members_include_inviters() {
        let events = vec![
            MessageEvent::new("Carol", "d"),
            MessageEvent::new("Bob", "d")
                .with_subtype(Subtype::ChannelJoin)
                .with_inviter("Alice"),
            MessageEvent::new("Carol", "d"),
        ];
        let members: Vec<_> = collect_members(&events).into_iter().collect();
        assert_eq!(members, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_build_metadata() {
        let text = "Book Club 님과 카카오톡 대화\n";
        let events = vec![MessageEvent::new("Alice", "d")];
        let meta = build_metadata(text, &events, 80).unwrap();
        assert_eq!(meta.name, "book_club");
        assert_eq!(meta.members, vec!["Alice".to_string()]);
    }

    #[test]
    fn test_build_metadata_without_header() {
        let err = build_metadata("nope\n", &[], 80).unwrap_err();
        assert!(err.is_malformed());
    }
}
