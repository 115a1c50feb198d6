//! Persistent archive-wide stores.
//!
//! Two files at the archive root accumulate across runs:
//!
//! - `channels.json` - one `{name, members}` record per converted
//!   transcript, append-only (re-converting a transcript appends a second
//!   record, nothing is deduplicated)
//! - `users.json` - every identifier ever seen, mapped to an anonymized
//!   replacement that a human fills in before running the anonymizer
//!
//! Both are read-modify-write files. Only one process may write to an
//! archive at a time; the batch processor converts transcripts one after
//! another for that reason.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::output::StagedWrite;
use crate::error::Result;
use crate::parsing::ChannelMetadata;

/// Channel metadata store file name.
pub const CHANNELS_FILE: &str = "channels.json";

/// User registry file name.
pub const USERS_FILE: &str = "users.json";

/// Reads a file, treating a missing one as absent.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Channel store
// ============================================================================

/// The `channels.json` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStore {
    path: PathBuf,
    channels: Vec<ChannelMetadata>,
}

impl ChannelStore {
    /// Loads the store from an archive root. A missing file is an empty store.
    pub fn load(dest: &Path) -> Result<Self> {
        let path = dest.join(CHANNELS_FILE);
        let channels = match read_optional(&path)? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };
        Ok(Self { path, channels })
    }

    /// Records loaded so far, in append order.
    pub fn channels(&self) -> &[ChannelMetadata] {
        &self.channels
    }

    /// Appends a record in memory.
    pub fn push(&mut self, channel: ChannelMetadata) {
        self.channels.push(channel);
    }

    /// Renders the current contents for an atomic write.
    pub fn stage(&self) -> Result<StagedWrite> {
        Ok(StagedWrite::new(
            &self.path,
            serde_json::to_string_pretty(&self.channels)?,
        ))
    }

    /// Loads, appends and writes back in one step.
    pub fn append(dest: &Path, channel: ChannelMetadata) -> Result<()> {
        let mut store = Self::load(dest)?;
        store.push(channel);
        store.stage()?.commit()
    }
}

// ============================================================================
// User registry
// ============================================================================

/// The `users.json` identifier-to-replacement map.
///
/// Keys are kept sorted. An empty value means no replacement has been
/// assigned yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl UserRegistry {
    /// Loads the registry from an archive root. A missing file is empty.
    pub fn load(dest: &Path) -> Result<Self> {
        let path = dest.join(USERS_FILE);
        let entries = match read_optional(&path)? {
            Some(content) => serde_json::from_str(&content)?,
            None => BTreeMap::new(),
        };
        Ok(Self { path, entries })
    }

    /// Loads the registry, failing when `users.json` does not exist.
    ///
    /// Used by the anonymizer, which has nothing to substitute without it.
    pub fn open(dest: &Path) -> Result<Self> {
        let path = dest.join(USERS_FILE);
        match read_optional(&path)? {
            Some(content) => Ok(Self {
                entries: serde_json::from_str(&content)?,
                path,
            }),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found; convert transcripts first", path.display()),
            )
            .into()),
        }
    }

    /// Builds an in-memory registry, mostly for tests and library callers.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: PathBuf::from(USERS_FILE),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Adds unseen identifiers with an empty value.
    ///
    /// Existing entries keep their assigned value. Returns how many
    /// identifiers were new.
    pub fn merge_identifiers<'a, I>(&mut self, identifiers: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut added = 0;
        for id in identifiers {
            if !self.entries.contains_key(id) {
                self.entries.insert(id.clone(), String::new());
                added += 1;
            }
        }
        added
    }

    /// Mapped value for an identifier.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// All entries, sorted by identifier.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers that still have an empty value.
    pub fn unassigned(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Returns `true` when every identifier has a replacement.
    pub fn is_complete(&self) -> bool {
        self.entries.values().all(|v| !v.is_empty())
    }

    /// Entries whose replacement could be confused with an identifier.
    ///
    /// Flags a value that contains its own identifier, or that equals some
    /// other identifier in the registry. Rewriting is still a single lookup
    /// per string, so these don't chain, but the archive becomes ambiguous
    /// to a human reader.
    pub fn ambiguous_entries(&self) -> Vec<(&str, &str)> {
        let ids: BTreeSet<&str> = self.entries.keys().map(String::as_str).collect();
        self.entries
            .iter()
            .filter(|(id, value)| {
                !value.is_empty()
                    && (value.contains(id.as_str())
                        || (value != id && ids.contains(value.as_str())))
            })
            .map(|(id, value)| (id.as_str(), value.as_str()))
            .collect()
    }

    /// Renders the registry for an atomic write.
    pub fn stage(&self) -> Result<StagedWrite> {
        Ok(StagedWrite::new(
            &self.path,
            serde_json::to_string_pretty(&self.entries)?,
        ))
    }

    /// Writes the registry back to disk.
    pub fn save(&self) -> Result<()> {
        self.stage()?.commit()
    }
}
