//! KakaoTalk transcript parser.
//!
//! [`KakaoTalkParser`] runs the whole parsing pipeline on one transcript
//! and returns a [`ParsedTranscript`]: the channel record plus every event,
//! timestamped and classified, in transcript order. Nothing is written to
//! disk here.
//!
//! # Example
//!
//! ```rust
//! use kakaoslack::config::ConvertConfig;
//! use kakaoslack::parser::KakaoTalkParser;
//!
//! let transcript = "Alice 님과 카카오톡 대화\n\
//! --------------- Tuesday, March 5, 2024 ---------------\n\
//! [Alice] [3:05 PM] hello\n\
//! Alice님이 나갔습니다.\n";
//!
//! let parser = KakaoTalkParser::with_config(ConvertConfig::new().with_utc_offset_hours(9));
//! let parsed = parser.parse_str(transcript)?;
//!
//! assert_eq!(parsed.channel.name, "alice");
//! assert_eq!(parsed.events.len(), 2);
//! assert_eq!(parsed.events[1].text, "<@Alice> 님이 채널을 떠남");
//! # Ok::<(), kakaoslack::ConvertError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::event::MessageEvent;
use crate::parsing::{
    ChannelMetadata, TRANSCRIPT_SENTINEL, build_metadata, disambiguate, extract_events,
    fill_membership_text, split_date_blocks,
};

/// Result of parsing one transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTranscript {
    /// Channel name and members
    pub channel: ChannelMetadata,
    /// Events in transcript order
    pub events: Vec<MessageEvent>,
}

/// Parser for KakaoTalk TXT exports.
#[derive(Debug, Clone, Default)]
pub struct KakaoTalkParser {
    config: ConvertConfig,
}

impl KakaoTalkParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// Malformed input errors carry the file path.
    pub fn parse(&self, path: &Path) -> Result<ParsedTranscript> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content).map_err(|e| e.with_path(path))
    }

    /// Parses transcript text.
    pub fn parse_str(&self, content: &str) -> Result<ParsedTranscript> {
        let mut data = String::with_capacity(content.len() + TRANSCRIPT_SENTINEL.len());
        data.push_str(content.strip_prefix('\u{feff}').unwrap_or(content));
        data.push_str(TRANSCRIPT_SENTINEL);

        let blocks = split_date_blocks(&data)?;
        let mut events: Vec<MessageEvent> = blocks.iter().flat_map(extract_events).collect();
        tracing::debug!(
            blocks = blocks.len(),
            events = events.len(),
            "extracted transcript events"
        );

        disambiguate(&mut events, self.config.utc_offset()?)?;
        fill_membership_text(&mut events);

        let channel = build_metadata(&data, &events, self.config.max_channel_name_len)?;
        tracing::debug!(
            channel = %channel.name,
            members = channel.members.len(),
            "built channel metadata"
        );

        Ok(ParsedTranscript { channel, events })
    }
}
