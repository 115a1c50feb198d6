//! Core conversion logic for kakaoslack.
//!
//! This module contains:
//! - [`partition`] - Grouping events into per-date files
//! - [`output`] - Atomic writes and the JSON archive writer
//! - [`store`] - `channels.json` and `users.json`
//! - [`processor`] - Per-transcript conversion and batch runs
//! - [`anonymize`] - Rewriting identifiers in a finished archive
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kakaoslack::config::{AnonymizeConfig, ConvertConfig};
//! use kakaoslack::core::{anonymize_archive, convert_dir};
//!
//! let report = convert_dir(Path::new("chats"), Path::new("archive"), &ConvertConfig::new())?;
//! println!("{} events", report.total_events());
//!
//! // ...fill in archive/users.json, then:
//! anonymize_archive(Path::new("archive"), &AnonymizeConfig::new())?;
//! # Ok::<(), kakaoslack::ConvertError>(())
//! ```

pub mod anonymize;
pub mod output;
pub mod partition;
pub mod processor;
pub mod store;

pub use anonymize::{AnonymizeStats, Anonymizer, anonymize_archive};
pub use partition::{Partition, partition};
pub use processor::{
    BatchReport, ConversionReport, convert_dir, convert_dir_with, convert_transcript,
    find_transcripts,
};
pub use store::{CHANNELS_FILE, ChannelStore, USERS_FILE, UserRegistry};
