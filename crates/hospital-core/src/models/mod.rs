//! Domain models for the hospital administration store.
//!
//! Persisted field names follow the localized storage layout (`nama`,
//! `pasien_id`, ...) so collections written by earlier front-ends load
//! unchanged.

mod doctor;
mod medical_record;
mod patient;
mod registration;
mod session;
mod timestamp;
mod transaction;
mod user;

pub use doctor::*;
pub use medical_record::*;
pub use patient::*;
pub use registration::*;
pub use session::*;
pub use timestamp::parse_timestamp;
pub use transaction::*;
pub use user::*;

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Record identifier, unique within one collection.
pub type Id = u32;

/// Error returned when parsing an enum label fails.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown {kind} value: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Current local time truncated to whole seconds (the stored precision).
pub fn local_now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
