//! Transcript conversion and batch processing.
//!
//! [`convert_transcript`] takes one transcript all the way to disk. It is
//! all-or-nothing: the transcript is parsed completely, every output file is
//! rendered in memory, and only then is anything written (date files first,
//! then `channels.json` and `users.json`). A transcript that fails to parse
//! leaves the archive untouched.
//!
//! [`convert_dir`] runs it over every transcript in a directory, one at a
//! time, so the read-modify-write stores only ever have one writer.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::output::{StagedWrite, commit_all, to_json};
use super::partition::partition;
use super::store::{ChannelStore, UserRegistry};
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::parser::KakaoTalkParser;

/// Transcript file extension.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Outcome of converting one transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// The transcript file
    pub source: PathBuf,
    /// Sanitized channel name
    pub channel: String,
    /// Events written
    pub events: usize,
    /// Per-date files written
    pub files: usize,
    /// Identifiers added to the user registry
    pub new_users: usize,
}

/// Converts one transcript into the archive at `dest`.
pub fn convert_transcript(
    path: &Path,
    dest: &Path,
    config: &ConvertConfig,
) -> Result<ConversionReport> {
    let parsed = KakaoTalkParser::with_config(config.clone()).parse(path)?;
    let channel = parsed.channel;

    let mut staged: Vec<StagedWrite> = Vec::new();
    for part in partition(&parsed.events, config.split_attachments) {
        let target = dest.join(part.relative_path(&channel.name));
        staged.push(StagedWrite::new(target, to_json(&part.events)?));
    }
    let files = staged.len();

    // Both stores are read before anything is written.
    let mut channels = ChannelStore::load(dest)?;
    let mut registry = UserRegistry::load(dest)?;
    let new_users = registry.merge_identifiers(&channel.members);
    let channel_name = channel.name.clone();
    channels.push(channel);
    staged.push(channels.stage()?);
    staged.push(registry.stage()?);

    commit_all(&staged)?;

    tracing::info!(
        source = %path.display(),
        channel = %channel_name,
        events = parsed.events.len(),
        files,
        new_users,
        "converted transcript"
    );

    Ok(ConversionReport {
        source: path.to_path_buf(),
        channel: channel_name,
        events: parsed.events.len(),
        files,
        new_users,
    })
}

/// Lists the `*.txt` files directly inside `source_dir`, sorted by name.
pub fn find_transcripts(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut transcripts = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
        {
            transcripts.push(path.to_path_buf());
        } else {
            tracing::warn!(file = %path.display(), "skipping non-transcript file");
        }
    }
    Ok(transcripts)
}

/// Result of converting a directory of transcripts.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Transcripts that were written to the archive
    pub converted: Vec<ConversionReport>,
    /// Transcripts that failed, with the reason
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// Total transcripts attempted.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Events written across all converted transcripts.
    pub fn total_events(&self) -> usize {
        self.converted.iter().map(|r| r.events).sum()
    }

    /// Returns `true` when no transcript failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts every transcript in `source_dir`, continuing past failures.
///
/// `on_result` is called after each transcript, in processing order.
pub fn convert_dir_with<F>(
    source_dir: &Path,
    dest: &Path,
    config: &ConvertConfig,
    mut on_result: F,
) -> Result<BatchReport>
where
    F: FnMut(&Path, &Result<ConversionReport>),
{
    // A bad offset would fail every transcript the same way.
    config.utc_offset()?;

    let mut report = BatchReport::default();
    for path in find_transcripts(source_dir)? {
        let result = convert_transcript(&path, dest, config);
        on_result(&path, &result);
        match result {
            Ok(converted) => report.converted.push(converted),
            Err(e) => {
                tracing::warn!(source = %path.display(), error = %e, "transcript failed");
                report.failed.push((path, e));
            }
        }
    }
    Ok(report)
}

/// Converts every transcript in `source_dir`, continuing past failures.
pub fn convert_dir(source_dir: &Path, dest: &Path, config: &ConvertConfig) -> Result<BatchReport> {
    convert_dir_with(source_dir, dest, config, |_, _| {})
}
