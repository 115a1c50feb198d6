//! Configuration types for conversion and anonymization.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ConvertConfig`] - transcript conversion settings
//! - [`AnonymizeConfig`] - archive anonymization settings
//!
//! # Example
//!
//! ```rust
//! use kakaoslack::config::ConvertConfig;
//!
//! let config = ConvertConfig::new()
//!     .with_split_attachments(true)
//!     .with_utc_offset_hours(9);
//!
//! assert!(config.split_attachments);
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Slack rejects channel names longer than this.
pub const DEFAULT_MAX_CHANNEL_NAME_LEN: usize = 80;

/// Configuration for converting KakaoTalk transcripts.
///
/// # Example
///
/// ```rust
/// use kakaoslack::config::ConvertConfig;
///
/// let config = ConvertConfig::new().with_utc_offset_hours(9);
/// let offset = config.utc_offset()?;
/// assert_eq!(offset.map(|o| o.local_minus_utc()), Some(9 * 3600));
/// # Ok::<(), kakaoslack::ConvertError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Write text and attachment events into separate trees (default: false)
    pub split_attachments: bool,

    /// Fixed UTC offset for timestamps and dates; system local time when `None`
    pub utc_offset_hours: Option<i32>,

    /// Maximum channel name length after sanitizing (default: 80)
    pub max_channel_name_len: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            split_attachments: false,
            utc_offset_hours: None,
            max_channel_name_len: DEFAULT_MAX_CHANNEL_NAME_LEN,
        }
    }
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the text/attachment split.
    #[must_use]
    pub fn with_split_attachments(mut self, enabled: bool) -> Self {
        self.split_attachments = enabled;
        self
    }

    /// Pins timestamps to a fixed UTC offset instead of system local time.
    #[must_use]
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = Some(hours);
        self
    }

    /// Sets the maximum channel name length.
    #[must_use]
    pub fn with_max_channel_name_len(mut self, len: usize) -> Self {
        self.max_channel_name_len = len;
        self
    }

    /// Returns the configured offset, or `None` for system local time.
    ///
    /// Fails with [`ConvertError::InvalidConfig`] for offsets outside
    /// ±23 hours.
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>> {
        let Some(hours) = self.utc_offset_hours else {
            return Ok(None);
        };
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Some)
            .ok_or_else(|| {
                ConvertError::invalid_config(format!(
                    "UTC offset of {hours} hours is out of range"
                ))
            })
    }
}

/// Configuration for anonymizing a produced archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeConfig {
    /// The archive was written with the text/attachment split (default: false)
    pub split_attachments: bool,
}

impl AnonymizeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the archive uses the text/attachment split layout.
    #[must_use]
    pub fn with_split_attachments(mut self, enabled: bool) -> Self {
        self.split_attachments = enabled;
        self
    }
}

impl From<&ConvertConfig> for AnonymizeConfig {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            split_attachments: config.split_attachments,
        }
    }
}
