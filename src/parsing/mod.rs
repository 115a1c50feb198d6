//! Pure transcript-processing stages.
//!
//! Each stage is a plain function over borrowed text or a slice of events,
//! so it can be tested and benchmarked on its own. [`KakaoTalkParser`]
//! chains them:
//!
//! 1. [`split_date_blocks`] - day separator banners
//! 2. [`extract_events`] - headers and text spans per block
//! 3. [`disambiguate`] - clock-time fill and unique timestamps
//! 4. [`fill_membership_text`] - join/leave display text
//! 5. [`build_metadata`] - channel name and members
//!
//! [`KakaoTalkParser`]: crate::parser::KakaoTalkParser

pub mod blocks;
pub mod channel;
pub mod classify;
pub mod headers;
pub mod timestamps;

pub use blocks::{DateBlock, TRANSCRIPT_SENTINEL, preamble, split_date_blocks};
pub use channel::{
    ChannelMetadata, build_metadata, collect_members, find_channel_name, sanitize_channel_name,
};
pub use classify::{
    EventClass, classify, fill_membership_text, is_attachment, join_text, leave_text, mention,
};
pub use headers::{HeaderKind, HeaderToken, classify_line, extract_events, scan_headers};
pub use timestamps::{
    DISAMBIGUATION_CAPACITY, disambiguate, fill_raw_times, resolve_timestamps,
};
