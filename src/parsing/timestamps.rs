//! Timestamp resolution.
//!
//! Transcript clock times only have minute resolution and only normal
//! messages carry one. Resolution runs in two passes:
//!
//! 1. [`fill_raw_times`] gives every join/leave event the clock time of a
//!    neighbouring message
//! 2. [`resolve_timestamps`] appends a per-minute ordinal as the seconds
//!    component, so events sharing a minute get distinct, increasing
//!    timestamps in stream order
//!
//! The ordinal is a seconds value, so a single minute can order at most
//! [`DISAMBIGUATION_CAPACITY`] events. A larger group is a
//! [`ConvertError::DisambiguationOverflow`].

use std::collections::HashMap;

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};

use crate::error::{ConvertError, Result};
use crate::event::MessageEvent;

/// Maximum number of events that can share one date and clock minute.
pub const DISAMBIGUATION_CAPACITY: usize = 60;

/// Clock time used when a transcript has no timed message at all.
pub const FALLBACK_TIME: &str = "12:00 AM";

/// Format of the banner date label.
pub const DATE_LABEL_FORMAT: &str = "%B %d, %Y";

/// Format of a header clock time.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// Format of resolved archive dates.
pub const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Backfills missing clock times.
///
/// Preference order: previous timed event in the same date block, next
/// timed event in the same block, previous timed event anywhere, next
/// timed event anywhere, then [`FALLBACK_TIME`]. Blocks are runs of
/// consecutive events with the same date label.
pub fn fill_raw_times(events: &mut [MessageEvent]) {
    let mut start = 0;
    while start < events.len() {
        let label = events[start].date.clone();
        let len = events[start..]
            .iter()
            .position(|e| e.date != label)
            .unwrap_or(events.len() - start);
        fill_slice(&mut events[start..start + len]);
        start += len;
    }

    fill_slice(events);

    for event in events.iter_mut().filter(|e| e.raw_time.is_none()) {
        event.raw_time = Some(FALLBACK_TIME.to_string());
    }
}

/// Forward fill, then backward fill.
fn fill_slice(events: &mut [MessageEvent]) {
    let mut previous: Option<String> = None;
    for event in events.iter_mut() {
        if event.raw_time.is_some() {
            previous.clone_from(&event.raw_time);
        } else {
            event.raw_time.clone_from(&previous);
        }
    }

    let mut next: Option<String> = None;
    for event in events.iter_mut().rev() {
        if event.raw_time.is_some() {
            next.clone_from(&event.raw_time);
        } else {
            event.raw_time.clone_from(&next);
        }
    }
}

/// Assigns every event a unique timestamp and rewrites its date.
///
/// Events must have a clock time (see [`fill_raw_times`]). `zone` selects
/// the offset used to interpret clock times and to derive the resulting
/// calendar date; `None` means system local time.
///
/// Nothing is modified if any group overflows or any timestamp fails to
/// resolve.
pub fn resolve_timestamps(events: &mut [MessageEvent], zone: Option<FixedOffset>) -> Result<()> {
    let resolved = {
        let mut group_sizes: HashMap<(&str, &str), usize> = HashMap::new();
        for event in events.iter() {
            let time = event.raw_time.as_deref().unwrap_or(FALLBACK_TIME);
            *group_sizes.entry((event.date.as_str(), time)).or_default() += 1;
        }

        // Report the first overflowing group in stream order.
        for event in events.iter() {
            let time = event.raw_time.as_deref().unwrap_or(FALLBACK_TIME);
            let count = group_sizes[&(event.date.as_str(), time)];
            if count > DISAMBIGUATION_CAPACITY {
                return Err(ConvertError::overflow(
                    event.date.as_str(),
                    time,
                    count,
                    DISAMBIGUATION_CAPACITY,
                ));
            }
        }

        let mut ordinals: HashMap<(&str, &str), u32> = HashMap::new();
        let mut resolved = Vec::with_capacity(events.len());
        for event in events.iter() {
            let time = event.raw_time.as_deref().unwrap_or(FALLBACK_TIME);
            let ordinal = ordinals.entry((event.date.as_str(), time)).or_default();
            resolved.push(resolve_one(&event.date, time, *ordinal, zone)?);
            *ordinal += 1;
        }
        resolved
    };

    for (event, (timestamp, date)) in events.iter_mut().zip(resolved) {
        event.timestamp = Some(timestamp);
        event.date = date.format(ARCHIVE_DATE_FORMAT).to_string();
    }

    Ok(())
}

/// Resolves `label time` plus `ordinal` seconds to epoch seconds and the
/// calendar date of that instant.
fn resolve_one(
    label: &str,
    time: &str,
    ordinal: u32,
    zone: Option<FixedOffset>,
) -> Result<(i64, NaiveDate)> {
    let invalid = || ConvertError::invalid_timestamp(format!("{label} {time}"));

    let date = NaiveDate::parse_from_str(label, DATE_LABEL_FORMAT).map_err(|_| invalid())?;
    let clock = NaiveTime::parse_from_str(time, CLOCK_FORMAT).map_err(|_| invalid())?;
    let naive: NaiveDateTime = date.and_time(clock) + Duration::seconds(i64::from(ordinal));

    match zone {
        Some(offset) => {
            let instant: DateTime<FixedOffset> =
                offset.from_local_datetime(&naive).single().ok_or_else(invalid)?;
            Ok((instant.timestamp(), instant.date_naive()))
        }
        None => {
            // DST folds resolve to the earlier instant; gaps are errors.
            let instant: DateTime<Local> =
                Local.from_local_datetime(&naive).earliest().ok_or_else(invalid)?;
            Ok((instant.timestamp(), instant.date_naive()))
        }
    }
}

/// Fills clock times and resolves timestamps in one step.
pub fn disambiguate(events: &mut [MessageEvent], zone: Option<FixedOffset>) -> Result<()> {
    fill_raw_times(events);
    resolve_timestamps(events, zone)
}
