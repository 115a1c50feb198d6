//! Message events recovered from a transcript.
//!
//! This module provides [`MessageEvent`], the typed record every pipeline
//! stage reads and writes, and [`Subtype`], the event kind.
//!
//! # Lifecycle
//!
//! 1. Created by the header extractor with `user`, `raw_time`, `inviter`,
//!    `subtype`, `text` and the block's date label
//! 2. `raw_time` backfilled and `timestamp` assigned by the disambiguator,
//!    which also rewrites `date` to `YYYY-MM-DD`
//! 3. `text` replaced for join/leave events by the classifier
//!
//! Events are never dropped along the way.
//!
//! # Example
//!
//! ```
//! use kakaoslack::{MessageEvent, Subtype};
//!
//! let event = MessageEvent::new("Alice", "March 5, 2024")
//!     .with_raw_time("3:05 PM")
//!     .with_text("hello");
//!
//! assert_eq!(event.subtype, Subtype::Normal);
//! assert_eq!(event.raw_time.as_deref(), Some("3:05 PM"));
//! ```

use serde::{Deserialize, Serialize};

/// Kind of a message event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    /// A regular authored message
    #[default]
    Normal,

    /// A user was invited into the conversation
    ChannelJoin,

    /// A user left the conversation
    ChannelLeave,
}

impl Subtype {
    /// Returns the snake_case name of this subtype.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Normal => "normal",
            Subtype::ChannelJoin => "channel_join",
            Subtype::ChannelLeave => "channel_leave",
        }
    }

    /// Returns the subtype as written into the archive.
    ///
    /// Regular messages carry no subtype there, so `Normal` maps to `None`.
    pub fn archive_name(&self) -> Option<&'static str> {
        match self {
            Subtype::Normal => None,
            other => Some(other.as_str()),
        }
    }

    /// Returns `true` for join and leave events.
    pub fn is_membership(&self) -> bool {
        matches!(self, Subtype::ChannelJoin | Subtype::ChannelLeave)
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message, join or leave event parsed from a transcript.
///
/// | Field | Set by | Description |
/// |-------|--------|-------------|
/// | `user` | extractor | Author, invited user or departing user |
/// | `raw_time` | extractor, disambiguator | `H:MM AM/PM` clock time |
/// | `inviter` | extractor | Who sent the invitation (joins only) |
/// | `subtype` | extractor | Event kind |
/// | `text` | extractor, classifier | Trimmed body text |
/// | `date` | extractor, disambiguator | Block label, later `YYYY-MM-DD` |
/// | `timestamp` | disambiguator | Unique epoch seconds |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Identifier of the user the event is about.
    pub user: String,

    /// Minute-resolution clock time, absent on join/leave banners until filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub raw_time: Option<String>,

    /// Identifier of the inviting user for `channel_join` events.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub inviter: Option<String>,

    /// Event kind.
    #[serde(default)]
    pub subtype: Subtype,

    /// Event body.
    pub text: String,

    /// Calendar date.
    ///
    /// Holds the transcript's `Month D, YYYY` label until timestamps are
    /// resolved, then the `YYYY-MM-DD` date of `timestamp`.
    pub date: String,

    /// Absolute time in epoch seconds, unique within one transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl MessageEvent {
    /// Creates a normal event with empty text and no time information.
    pub fn new(user: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            raw_time: None,
            inviter: None,
            subtype: Subtype::Normal,
            text: String::new(),
            date: date.into(),
            timestamp: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the clock time.
    #[must_use]
    pub fn with_raw_time(mut self, raw_time: impl Into<String>) -> Self {
        self.raw_time = Some(raw_time.into());
        self
    }

    /// Sets the inviter.
    #[must_use]
    pub fn with_inviter(mut self, inviter: impl Into<String>) -> Self {
        self.inviter = Some(inviter.into());
        self
    }

    /// Sets the subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = subtype;
        self
    }

    /// Sets the text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the absolute timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns `true` once the disambiguator has assigned a timestamp.
    pub fn is_resolved(&self) -> bool {
        self.timestamp.is_some()
    }
}
