//! Grouping events into per-date output units.
//!
//! Each [`Partition`] becomes one archive file:
//!
//! | Split | Path |
//! |-------|------|
//! | off | `<channel>/<date>.json` |
//! | on | `text/<channel>/<date>.json`, `attachment/<channel>/<date>.json` |
//!
//! Events keep their transcript order inside a partition.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::event::MessageEvent;
use crate::parsing::{EventClass, classify};

/// Events of one channel for one date (and class, when splitting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Output class, `None` when the archive isn't split
    pub class: Option<EventClass>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Events in transcript order
    pub events: Vec<&'a MessageEvent>,
}

impl Partition<'_> {
    /// Path of this partition's file relative to the archive root.
    pub fn relative_path(&self, channel: &str) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(class) = self.class {
            path.push(class.dir_name());
        }
        path.push(channel);
        path.push(format!("{}.json", self.date));
        path
    }
}

/// Groups events by date, keeping transcript order within each date.
pub fn group_by_date<'a, I>(events: I) -> BTreeMap<String, Vec<&'a MessageEvent>>
where
    I: IntoIterator<Item = &'a MessageEvent>,
{
    let mut groups: BTreeMap<String, Vec<&MessageEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.date.clone()).or_default().push(event);
    }
    groups
}

/// Splits events into output partitions.
///
/// With `split` the events are first separated into text and attachment
/// classes, then grouped by date. Partitions are ordered by class, then
/// date.
pub fn partition(events: &[MessageEvent], split: bool) -> Vec<Partition<'_>> {
    if !split {
        return group_by_date(events)
            .into_iter()
            .map(|(date, events)| Partition {
                class: None,
                date,
                events,
            })
            .collect();
    }

    EventClass::all()
        .iter()
        .flat_map(|&class| {
            group_by_date(events.iter().filter(move |e| classify(e) == class))
                .into_iter()
                .map(move |(date, events)| Partition {
                    class: Some(class),
                    date,
                    events,
                })
        })
        .collect()
}
