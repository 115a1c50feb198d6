//! Attachment detection and join/leave display text.
//!
//! KakaoTalk exports media as single-line placeholders (`사진`, `사진 3장`,
//! `파일: report.pdf`, `이모티콘`, `톡게시판 ...`). [`classify`] tags those
//! as attachments so the archive can be split into text and attachment
//! trees. Classification never modifies an event.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::{MessageEvent, Subtype};

/// Whole-text attachment signatures.
pub const ATTACHMENT_PATTERN: &str =
    r"^(?:사진|사진\s\d{1,2}장|파일:\s.+|이모티콘|톡게시판\s.+)$";

fn attachment_re() -> &'static Regex {
    static ATTACHMENT_RE: OnceLock<Regex> = OnceLock::new();
    ATTACHMENT_RE.get_or_init(|| Regex::new(ATTACHMENT_PATTERN).unwrap())
}

/// Output class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventClass {
    /// Plain text, joins and leaves
    Text,
    /// Photo, file, sticker or bulletin-board placeholder
    Attachment,
}

impl EventClass {
    /// Directory name of this class in a split archive.
    pub fn dir_name(&self) -> &'static str {
        match self {
            EventClass::Text => "text",
            EventClass::Attachment => "attachment",
        }
    }

    /// Returns both classes in output order.
    pub fn all() -> &'static [EventClass] {
        &[EventClass::Text, EventClass::Attachment]
    }
}

impl std::fmt::Display for EventClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Formats a user mention in the archive's syntax.
pub fn mention(user: &str) -> String {
    format!("<@{user}>")
}

/// Display text of a join event.
pub fn join_text(user: &str) -> String {
    format!("{} 님이 채널에 참여함", mention(user))
}

/// Display text of a leave event.
pub fn leave_text(user: &str) -> String {
    format!("{} 님이 채널을 떠남", mention(user))
}

/// Returns `true` if `text` is an attachment placeholder.
///
/// # Example
///
/// ```
/// use kakaoslack::parsing::is_attachment;
///
/// assert!(is_attachment("사진 3장"));
/// assert!(is_attachment("파일: report.pdf"));
/// assert!(!is_attachment("안녕"));
/// ```
pub fn is_attachment(text: &str) -> bool {
    attachment_re().is_match(text)
}

/// Classifies an event by its text.
pub fn classify(event: &MessageEvent) -> EventClass {
    if is_attachment(&event.text) {
        EventClass::Attachment
    } else {
        EventClass::Text
    }
}

/// Replaces the text of join and leave events with their display template.
pub fn fill_membership_text(events: &mut [MessageEvent]) {
    for event in events.iter_mut() {
        match event.subtype {
            Subtype::ChannelJoin => event.text = join_text(&event.user),
            Subtype::ChannelLeave => event.text = leave_text(&event.user),
            Subtype::Normal => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_signatures() {
        assert!(is_attachment("사진"));
        assert!(is_attachment("사진 3장"));
        assert!(is_attachment("사진 30장"));
        assert!(is_attachment("파일: 회의록.docx"));
        assert!(is_attachment("이모티콘"));
        assert!(is_attachment("톡게시판 '공지': 내일 모임"));
    }

    #[test]
    fn test_text_is_not_attachment() {
        assert!(!is_attachment("안녕"));
        assert!(!is_attachment("사진 보여줘"));
        assert!(!is_attachment("사진 100장"));
        assert!(!is_attachment("파일:"));
        assert!(!is_attachment("이모티콘 귀엽다"));
        assert!(!is_attachment(""));
    }

    #[test]
    fn test_multiline_is_not_attachment() {
        assert!(!is_attachment("사진\n사진"));
        assert!(!is_attachment("파일: a.txt\nand more"));
    }

    #[test]
    fn test_classify_event() {
        let photo = MessageEvent::new("Alice", "2024-03-05").with_text("사진 3장");
        let hello = MessageEvent::new("Alice", "2024-03-05").with_text("안녕");
        assert_eq!(classify(&photo), EventClass::Attachment);
        assert_eq!(classify(&hello), EventClass::Text);
    }

    #[test]
    fn test_fill_membership_text() {
        let mut events = vec![
            MessageEvent::new("Alice", "d").with_text("hello"),
            MessageEvent::new("Bob", "d")
                .with_subtype(Subtype::ChannelJoin)
                .with_inviter("Alice"),
            MessageEvent::new("Bob", "d").with_subtype(Subtype::ChannelLeave),
        ];
        fill_membership_text(&mut events);
        assert_eq!(events[0].text, "hello");
        assert_eq!(events[1].text, "<@Bob> 님이 채널에 참여함");
        assert_eq!(events[2].text, "<@Bob> 님이 채널을 떠남");
    }

    #[test]
    fn test_class_dir_names() {
        assert_eq!(EventClass::Text.dir_name(), "text");
        assert_eq!(EventClass::Attachment.to_string(), "attachment");
        assert_eq!(EventClass::all().len(), 2);
    }
}
