//! # kakaoslack
//!
//! A Rust library for converting KakaoTalk chat exports into a Slack-style
//! archive, and for anonymizing that archive afterwards.
//!
//! ## Overview
//!
//! A KakaoTalk TXT export is one conversation: a `... 님과 카카오톡 대화`
//! header, then day separator banners, each followed by messages
//! (`[author] [3:05 PM] text`) and join/leave banners. Conversion turns
//! every transcript into a channel:
//!
//! - one JSON file per channel per date, with unique, ordered timestamps
//! - optionally split into `text/` and `attachment/` trees
//! - an entry in `channels.json` and every user in `users.json`
//!
//! Once each user in `users.json` has a replacement name, the anonymizer
//! rewrites identifiers across the whole archive.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kakaoslack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ConvertConfig::new().with_split_attachments(true);
//!     let report = convert_dir(Path::new("chats"), Path::new("archive"), &config)?;
//!     println!("{} transcripts, {} events", report.total(), report.total_events());
//!
//!     anonymize_archive(Path::new("archive"), &AnonymizeConfig::from(&config))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing Without Writing
//!
//! ```rust
//! use kakaoslack::prelude::*;
//!
//! let text = "Alice 님과 카카오톡 대화\n\
//! --------------- Tuesday, March 5, 2024 ---------------\n\
//! [Alice] [3:05 PM] hi\n";
//!
//! let parsed = KakaoTalkParser::with_config(ConvertConfig::new().with_utc_offset_hours(9))
//!     .parse_str(text)?;
//! assert_eq!(parsed.events[0].timestamp, Some(1709618700));
//! # Ok::<(), kakaoslack::ConvertError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`]: [`KakaoTalkParser`](parser::KakaoTalkParser), the whole parsing pipeline
//! - [`parsing`]: Individual pipeline stages (blocks, headers, timestamps, classification, channel)
//! - [`event`]: [`MessageEvent`] and [`Subtype`]
//! - [`core`]: Partitioning, archive output, stores, batch processing, anonymization
//! - [`config`]: [`ConvertConfig`](config::ConvertConfig), [`AnonymizeConfig`](config::AnonymizeConfig)
//! - [`error`]: Unified error types ([`ConvertError`], [`Result`])
//! - `cli`: CLI types (feature `cli`)
//! - [`prelude`]: Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ConvertError, Result};
pub use event::{MessageEvent, Subtype};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use kakaoslack::prelude::*;
/// ```
pub mod prelude {
    // Event types
    pub use crate::{MessageEvent, Subtype};

    // Error types
    pub use crate::error::{ConvertError, Result};

    // Configuration
    pub use crate::config::{AnonymizeConfig, ConvertConfig};

    // Parsing
    pub use crate::parser::{KakaoTalkParser, ParsedTranscript};
    pub use crate::parsing::{ChannelMetadata, EventClass};

    // Conversion and anonymization
    pub use crate::core::{
        AnonymizeStats, Anonymizer, BatchReport, ConversionReport, anonymize_archive,
        convert_dir, convert_transcript,
    };

    // Stores
    pub use crate::core::{ChannelStore, UserRegistry};
}
