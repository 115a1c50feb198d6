//! Archive file writers.
//!
//! - [`StagedWrite`] / [`write_atomic`] - temp file plus rename, so a
//!   crashed run never leaves a truncated file behind
//! - [`write_json`] / [`to_json`] - per-date JSON arrays of archive records
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> kakaoslack::Result<()> {
//! use std::path::Path;
//! use kakaoslack::core::output::{StagedWrite, to_json};
//! use kakaoslack::MessageEvent;
//!
//! let event = MessageEvent::new("Alice", "2024-03-05")
//!     .with_text("hello")
//!     .with_timestamp(1_709_618_700);
//!
//! let staged = StagedWrite::new(Path::new("out/team/2024-03-05.json"), to_json(&[&event])?);
//! staged.commit()?;
//! # Ok(())
//! # }
//! ```

mod atomic;
mod json_writer;

pub use atomic::{StagedWrite, commit_all, write_atomic};
pub use json_writer::{render_value, to_json, write_json};
