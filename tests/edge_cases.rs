//! Edge case tests for kakaoslack
//!
//! These tests cover transcript quirks and boundary conditions that the
//! unit tests next to each stage don't reach.

use kakaoslack::config::ConvertConfig;
use kakaoslack::parser::KakaoTalkParser;
use kakaoslack::parsing::{EventClass, classify, is_attachment};
use kakaoslack::{MessageEvent, Subtype};

fn parser() -> KakaoTalkParser {
    KakaoTalkParser::with_config(ConvertConfig::new().with_utc_offset_hours(9))
}

fn parse(text: &str) -> Vec<MessageEvent> {
    parser().parse_str(text).unwrap().events
}

const HEADER: &str = "Edge 님과 카카오톡 대화\n";

// =========================================================================
// Encoding and line endings
// =========================================================================

#[test]
fn test_crlf_line_endings() {
    let text = "Edge 님과 카카오톡 대화\r\n\
--------------- Tuesday, March 5, 2024 ---------------\r\n\
[Alice] [3:05 PM] hello\r\n\
Alice님이 나갔습니다.\r\n";
    let events = parse(text);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].text, "hello");
    assert_eq!(events[1].subtype, Subtype::ChannelLeave);
}

#[test]
fn test_byte_order_mark() {
    let text = format!(
        "\u{feff}{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n[Alice] [3:05 PM] hi\n"
    );
    let parsed = parser().parse_str(&text).unwrap();
    assert_eq!(parsed.channel.name, "edge");
    assert_eq!(parsed.events.len(), 1);
}

#[test]
fn test_no_trailing_newline() {
    let text = format!("{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n[Alice] [3:05 PM] last");
    let events = parse(&text);
    assert_eq!(events[0].text, "last");
}

// =========================================================================
// Headers
// =========================================================================

#[test]
fn test_unknown_banners_become_body_text() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [3:05 PM] look\n\
Bob님이 메시지를 가렸습니다.\n\
[Alice] [3:06 PM] again\n"
    );
    let events = parse(&text);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].text, "look\nBob님이 메시지를 가렸습니다.");
}

#[test]
fn test_text_before_first_header_is_dropped() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
stray line\n\
[Alice] [3:05 PM] real\n"
    );
    let events = parse(&text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].user, "Alice");
}

#[test]
fn test_block_without_events() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
--------------- Wednesday, March 6, 2024 ---------------\n\
[Alice] [9:00 AM] morning\n"
    );
    let events = parse(&text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, "2024-03-06");
}

#[test]
fn test_bracketed_body_is_not_a_header() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [3:05 PM] first\n\
[공지] 오늘 모임\n"
    );
    let events = parse(&text);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "first\n[공지] 오늘 모임");
}

#[test]
fn test_author_with_brackets_and_spaces() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
[김 민준 (팀장)] [12:30 AM] 늦었네요\n"
    );
    let events = parse(&text);
    assert_eq!(events[0].user, "김 민준 (팀장)");
    assert_eq!(events[0].raw_time.as_deref(), Some("12:30 AM"));
}

// =========================================================================
// Time filling
// =========================================================================

#[test]
fn test_membership_only_transcript_uses_fallback_time() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
Alice님이 Bob님을 초대하였습니다.\n\
Bob님이 나갔습니다.\n"
    );
    let events = parse(&text);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.raw_time.as_deref() == Some("12:00 AM")));
    assert_eq!(events[1].timestamp.unwrap() - events[0].timestamp.unwrap(), 1);
}

#[test]
fn test_join_in_empty_block_borrows_previous_day_time() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [11:00 PM] late\n\
--------------- Wednesday, March 6, 2024 ---------------\n\
Alice님이 Bob님을 초대하였습니다.\n"
    );
    let events = parse(&text);
    assert_eq!(events[1].raw_time.as_deref(), Some("11:00 PM"));
    assert_eq!(events[1].date, "2024-03-06");
}

#[test]
fn test_overflow_is_reported() {
    let mut text = format!("{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n");
    for i in 0..61 {
        text.push_str(&format!("[Alice] [3:05 PM] {}\n", i));
    }
    let err = parser().parse_str(&text).unwrap_err();
    assert!(err.is_overflow());
    assert!(err.to_string().contains("61 events"));
}

#[test]
fn test_twelve_hour_edges() {
    let text = format!(
        "{HEADER}--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [12:00 AM] midnight\n\
[Alice] [12:00 PM] noon\n"
    );
    let events = parse(&text);
    assert_eq!(events[1].timestamp.unwrap() - events[0].timestamp.unwrap(), 12 * 3600);
}

// =========================================================================
// Classification
// =========================================================================

#[test]
fn test_attachment_signatures() {
    for text in ["사진", "사진 3장", "사진 12장", "파일: a.pdf", "이모티콘", "톡게시판 공지"] {
        assert!(is_attachment(text), "{text} should be an attachment");
    }
    for text in ["안녕", "사진 123장", "사진을 보냈어요", "파일:", "이모티콘 좋아요 사진"] {
        assert!(!is_attachment(text), "{text} should be text");
    }
}

#[test]
fn test_membership_events_are_text() {
    let event = MessageEvent::new("Alice", "2024-03-05")
        .with_subtype(Subtype::ChannelJoin)
        .with_text("<@Alice> 님이 채널에 참여함");
    assert_eq!(classify(&event), EventClass::Text);
}

// =========================================================================
// Channel names
// =========================================================================

#[test]
fn test_quoted_channel_header_is_not_a_header() {
    let text = "--------------- Tuesday, March 5, 2024 ---------------\n\
[Alice] [3:05 PM] 이거 봐\n\
Fake 님과 카카오톡 대화\n";
    let err = parser().parse_str(text).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_long_channel_name_is_truncated() {
    let name = "가".repeat(100);
    let text = format!(
        "{name} 님과 카카오톡 대화\n--------------- Tuesday, March 5, 2024 ---------------\n[A] [1:00 PM] x\n"
    );
    let parsed = parser().parse_str(&text).unwrap();
    assert_eq!(parsed.channel.name.chars().count(), 80);
}

#[test]
fn test_group_chat_name_with_punctuation() {
    let text = "Alice, Bob 님과 카카오톡 대화\n--------------- Tuesday, March 5, 2024 ---------------\n[Alice] [1:00 PM] x\n";
    let parsed = parser().parse_str(text).unwrap();
    assert_eq!(parsed.channel.name, "alice__bob");
}
