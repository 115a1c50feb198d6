//! Archive anonymization.
//!
//! Once every identifier in `users.json` has a replacement, the anonymizer
//! rewrites the archive in place:
//!
//! - a JSON string that equals a known identifier becomes its replacement
//! - otherwise each `<@id>` mention with a known `id` becomes `<@replacement>`
//!
//! Only string values are touched, never object keys. Each string is looked
//! up once, so a replacement that happens to be another identifier is not
//! replaced again.
//!
//! # Example
//!
//! ```rust
//! use kakaoslack::core::anonymize::Anonymizer;
//! use kakaoslack::core::store::UserRegistry;
//!
//! let registry = UserRegistry::from_entries([("Alice", "user_1")]);
//! let anonymizer = Anonymizer::new(&registry)?;
//!
//! assert_eq!(anonymizer.rewrite_str("Alice").as_deref(), Some("user_1"));
//! assert_eq!(
//!     anonymizer.rewrite_str("<@Alice> 님이 채널을 떠남").as_deref(),
//!     Some("<@user_1> 님이 채널을 떠남")
//! );
//! assert_eq!(anonymizer.rewrite_str("Alice said hi"), None);
//! # Ok::<(), kakaoslack::ConvertError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use serde_json::Value;
use walkdir::WalkDir;

use crate::config::AnonymizeConfig;
use crate::core::output::{StagedWrite, commit_all, render_value};
use crate::core::store::{CHANNELS_FILE, ChannelStore, UserRegistry};
use crate::error::{ConvertError, Result};
use crate::parsing::EventClass;

/// Rewrites identifiers using a complete user registry.
#[derive(Debug, Clone)]
pub struct Anonymizer {
    replacements: HashMap<String, String>,
    mentions: Option<Regex>,
}

/// Matches `<@id>` for every known `id`, longest identifier first.
///
/// Identifiers are matched literally, so names holding `<`, `>` or regex
/// metacharacters are still found.
fn mention_matcher<'a>(ids: impl Iterator<Item = &'a String>) -> Result<Option<Regex>> {
    let mut ids: Vec<&String> = ids.collect();
    if ids.is_empty() {
        return Ok(None);
    }
    ids.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = ids
        .iter()
        .map(|id| regex::escape(id))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("<@({alternation})>"))
        .map(Some)
        .map_err(|e| ConvertError::invalid_config(format!("cannot build mention matcher: {e}")))
}

impl Anonymizer {
    /// Creates an anonymizer from a registry.
    ///
    /// Fails with [`ConvertError::IncompleteRegistry`] when any identifier
    /// has no replacement yet.
    pub fn new(registry: &UserRegistry) -> Result<Self> {
        let unassigned = registry.unassigned();
        if !unassigned.is_empty() {
            return Err(ConvertError::incomplete_registry(unassigned));
        }

        for (id, value) in registry.ambiguous_entries() {
            tracing::warn!(id, value, "replacement is ambiguous with an identifier");
        }

        Ok(Self {
            replacements: registry
                .entries()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            mentions: mention_matcher(registry.entries().keys())?,
        })
    }

    /// Rewrites one string, returning `None` when nothing changed.
    pub fn rewrite_str(&self, s: &str) -> Option<String> {
        if let Some(value) = self.replacements.get(s) {
            return Some(value.clone());
        }

        let mentions = self.mentions.as_ref()?;
        let mut hits = 0usize;
        let rewritten = mentions.replace_all(s, |caps: &Captures<'_>| {
            match self.replacements.get(&caps[1]) {
                Some(value) => {
                    hits += 1;
                    format!("<@{value}>")
                }
                None => caps[0].to_string(),
            }
        });

        (hits > 0).then(|| rewritten.into_owned())
    }

    /// Rewrites every string leaf of a JSON tree in place.
    ///
    /// Returns the number of strings that changed.
    pub fn rewrite_value(&self, value: &mut Value) -> usize {
        match value {
            Value::String(s) => match self.rewrite_str(s) {
                Some(new) if new != *s => {
                    *s = new;
                    1
                }
                _ => 0,
            },
            Value::Array(items) => items.iter_mut().map(|v| self.rewrite_value(v)).sum(),
            Value::Object(map) => map.values_mut().map(|v| self.rewrite_value(v)).sum(),
            Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        }
    }

    /// Rewrites a JSON document.
    ///
    /// Returns the re-rendered document and the substitution count, or
    /// `None` when the document has nothing to replace.
    pub fn rewrite_json(&self, content: &str) -> Result<Option<(String, usize)>> {
        let mut value: Value = serde_json::from_str(content)?;
        let count = self.rewrite_value(&mut value);
        if count == 0 {
            return Ok(None);
        }
        Ok(Some((render_value(&value)?, count)))
    }
}

/// Outcome of an anonymization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymizeStats {
    /// JSON files inspected
    pub files_scanned: usize,
    /// Files that changed and were rewritten
    pub files_rewritten: usize,
    /// String values replaced across all files
    pub substitutions: usize,
}

/// Per-date archive files plus `channels.json`, in a stable order.
pub fn archive_files(dest: &Path, config: &AnonymizeConfig) -> Result<Vec<PathBuf>> {
    let roots: Vec<PathBuf> = if config.split_attachments {
        EventClass::all()
            .iter()
            .map(|class| dest.join(class.dir_name()))
            .collect()
    } else {
        vec![dest.to_path_buf()]
    };

    let mut files = Vec::new();
    for root in roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "archive root missing, skipping");
            continue;
        }
        for entry in WalkDir::new(&root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path.to_path_buf());
            }
        }
    }

    let channels = dest.join(CHANNELS_FILE);
    if channels.is_file() {
        files.push(channels);
    }
    Ok(files)
}

fn layout_name(split: bool) -> &'static str {
    if split { "split" } else { "unsplit" }
}

/// Checks that the archive was written with the layout `config` expects.
///
/// Fails with [`ConvertError::InvalidConfig`] when a channel listed in
/// `channels.json` has per-date files only under the other layout, since
/// those files would otherwise be skipped.
pub fn check_layout(dest: &Path, config: &AnonymizeConfig) -> Result<()> {
    let store = ChannelStore::load(dest)?;
    for channel in store.channels() {
        let flat = dest.join(&channel.name).is_dir();
        let split = EventClass::all()
            .iter()
            .any(|class| dest.join(class.dir_name()).join(&channel.name).is_dir());

        let (expected, other) = if config.split_attachments {
            (split, flat)
        } else {
            (flat, split)
        };
        if other && !expected {
            return Err(ConvertError::invalid_config(format!(
                "channel '{}' was written with the {} layout but {} was requested",
                channel.name,
                layout_name(!config.split_attachments),
                layout_name(config.split_attachments),
            )));
        }
    }
    Ok(())
}

/// Anonymizes a produced archive in place.
///
/// Every changed file is staged in memory before the first one is written,
/// so an unreadable or invalid file aborts the run without touching the
/// archive. A missing or incomplete registry is refused up front, as is a
/// `split_attachments` setting that does not match the archive on disk.
pub fn anonymize_archive(dest: &Path, config: &AnonymizeConfig) -> Result<AnonymizeStats> {
    let registry = UserRegistry::open(dest)?;
    let anonymizer = Anonymizer::new(&registry)?;
    check_layout(dest, config)?;

    let mut stats = AnonymizeStats::default();
    let mut staged = Vec::new();

    for path in archive_files(dest, config)? {
        stats.files_scanned += 1;
        let content = fs::read_to_string(&path)?;
        if let Some((rewritten, count)) = anonymizer.rewrite_json(&content)? {
            tracing::debug!(file = %path.display(), substitutions = count, "staged rewrite");
            stats.files_rewritten += 1;
            stats.substitutions += count;
            staged.push(StagedWrite::new(path, rewritten));
        }
    }

    commit_all(&staged)?;
    tracing::info!(
        scanned = stats.files_scanned,
        rewritten = stats.files_rewritten,
        substitutions = stats.substitutions,
        "anonymized archive"
    );
    Ok(stats)
}
