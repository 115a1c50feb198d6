//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Command`] - The `convert` and `anonymize` subcommands
//!
//! Subcommands convert into the library's configuration types, so the
//! binary stays a thin shell around [`crate::core`]:
//!
//! ```rust
//! use clap::Parser;
//! use kakaoslack::cli::{Args, Command};
//!
//! let args = Args::try_parse_from(["kakaoslack", "convert", "chats", "archive", "--split"]).unwrap();
//! if let Command::Convert { .. } = &args.command {
//!     assert!(args.command.convert_config().unwrap().split_attachments);
//! }
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{AnonymizeConfig, ConvertConfig};

/// Convert KakaoTalk chat exports into a Slack-style archive,
/// then anonymize the archive once every user has a replacement name.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaoslack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaoslack convert ./chats ./archive
    kakaoslack convert ./chats ./archive --split
    kakaoslack anonymize ./archive
    kakaoslack anonymize ./archive --split

LOGGING:
    RUST_LOG=debug kakaoslack convert ./chats ./archive")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert every *.txt transcript in SOURCE_DIR into DEST_DIR
    Convert {
        /// Directory containing KakaoTalk TXT exports
        #[arg(value_name = "SOURCE_DIR")]
        source: PathBuf,

        /// Archive directory (created if missing)
        #[arg(value_name = "DEST_DIR")]
        dest: PathBuf,

        /// Write text and attachment events into separate trees
        #[arg(long)]
        split: bool,
    },

    /// Replace user identifiers in DEST_DIR using DEST_DIR/users.json
    Anonymize {
        /// Archive directory produced by `convert`
        #[arg(value_name = "DEST_DIR")]
        dest: PathBuf,

        /// The archive was converted with --split
        #[arg(long)]
        split: bool,
    },
}

impl Command {
    /// Archive directory targeted by the command.
    pub fn dest(&self) -> &PathBuf {
        match self {
            Command::Convert { dest, .. } | Command::Anonymize { dest, .. } => dest,
        }
    }

    /// Conversion settings, for `convert`.
    pub fn convert_config(&self) -> Option<ConvertConfig> {
        match self {
            Command::Convert { split, .. } => {
                Some(ConvertConfig::new().with_split_attachments(*split))
            }
            Command::Anonymize { .. } => None,
        }
    }

    /// Anonymization settings, for `anonymize`.
    pub fn anonymize_config(&self) -> Option<AnonymizeConfig> {
        match self {
            Command::Anonymize { split, .. } => {
                Some(AnonymizeConfig::new().with_split_attachments(*split))
            }
            Command::Convert { .. } => None,
        }
    }
}
