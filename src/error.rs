//! Unified error types for kakaoslack.
//!
//! This module provides a single [`ConvertError`] enum that covers every
//! failure the converter and the anonymizer can report.
//!
//! # Error Handling Philosophy
//!
//! - Failures are scoped to **one transcript**: the batch processor reports
//!   them and moves on to the next file
//! - Unrecognized header lines are never errors, they become body text
//! - Anything that would silently drop or mis-order events is fatal

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for kakaoslack operations.
///
/// # Example
///
/// ```rust
/// use kakaoslack::error::Result;
/// use kakaoslack::MessageEvent;
///
/// fn my_function() -> Result<Vec<MessageEvent>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvertError>;

/// The error type for all kakaoslack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist or isn't readable
    /// - The destination directory cannot be created
    /// - An atomic replace could not be committed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing/serialization error.
    ///
    /// Occurs when a persisted store or an archive file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The transcript doesn't follow the KakaoTalk export grammar.
    ///
    /// This occurs when:
    /// - The transcript has no day separator line
    /// - The `... 님과 카카오톡 대화` channel header is missing
    #[error("Malformed transcript{}: {reason}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MalformedInput {
        /// Description of what's wrong
        reason: String,
        /// The transcript path, if available
        path: Option<PathBuf>,
    },

    /// Too many events share one date and clock minute to be ordered.
    ///
    /// The disambiguation ordinal is a seconds component, so at most
    /// `capacity` events can collide on the same minute.
    #[error(
        "{count} events share the minute '{date} {time}' (at most {capacity} can be ordered)"
    )]
    DisambiguationOverflow {
        /// Calendar date label of the colliding group
        date: String,
        /// Clock time of the colliding group
        time: String,
        /// Number of events in the group
        count: usize,
        /// Maximum group size the ordinal can represent
        capacity: usize,
    },

    /// A date/time pair could not be turned into an absolute timestamp.
    ///
    /// Covers unparsable date labels and local times skipped by a DST gap.
    #[error("Invalid timestamp '{input}'")]
    InvalidTimestamp {
        /// The date/time string that failed to resolve
        input: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected value
        reason: String,
    },

    /// Anonymization was requested while some identifiers are unmapped.
    #[error("User registry is incomplete: {} identifier(s) have no mapped value ({})", unassigned.len(), unassigned.join(", "))]
    IncompleteRegistry {
        /// Identifiers whose mapped value is still empty
        unassigned: Vec<String>,
    },

    /// A temporary file could not be moved over its destination.
    #[error("Failed to commit {}: {source}", path.display())]
    Persist {
        /// Destination path of the atomic replace
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvertError {
    /// Creates a malformed input error.
    pub fn malformed(reason: impl Into<String>, path: Option<PathBuf>) -> Self {
        ConvertError::MalformedInput {
            reason: reason.into(),
            path,
        }
    }

    /// Creates a disambiguation overflow error.
    pub fn overflow(
        date: impl Into<String>,
        time: impl Into<String>,
        count: usize,
        capacity: usize,
    ) -> Self {
        ConvertError::DisambiguationOverflow {
            date: date.into(),
            time: time.into(),
            count,
            capacity,
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        ConvertError::InvalidTimestamp {
            input: input.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ConvertError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an incomplete registry error.
    pub fn incomplete_registry(unassigned: Vec<String>) -> Self {
        ConvertError::IncompleteRegistry { unassigned }
    }

    /// Attaches a transcript path to a malformed input error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        match self {
            ConvertError::MalformedInput { reason, path: None } => ConvertError::MalformedInput {
                reason,
                path: Some(new_path.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvertError::Io(_) | ConvertError::Persist { .. })
    }

    /// Returns `true` if this is a malformed input error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ConvertError::MalformedInput { .. })
    }

    /// Returns `true` if this is a disambiguation overflow error.
    pub fn is_overflow(&self) -> bool {
        matches!(self, ConvertError::DisambiguationOverflow { .. })
    }

    /// Returns `true` if this is an invalid configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ConvertError::InvalidConfig { .. })
    }

    /// Returns `true` if this is an incomplete registry error.
    pub fn is_incomplete_registry(&self) -> bool {
        matches!(self, ConvertError::IncompleteRegistry { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
