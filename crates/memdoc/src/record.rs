//! Core record type for memdoc.
//!
//! This module defines the `Memory` record stored inside the document and
//! the id-generation scheme used at insert time.

use chrono::{Local, NaiveDate};
use rand::Rng;

/// A single remembered fact, as stored inside the document.
///
/// The id is assigned once at insert time and never changes; the date is
/// stamped at insert and overwritten on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    /// Unique identifier, a fixed-width digit string.
    pub id: String,

    /// Calendar date of the last insert or update.
    pub date: NaiveDate,

    /// The remembered text, trimmed of surrounding whitespace.
    pub content: String,
}

impl Memory {
    /// Create a new memory with a freshly generated id and today's date.
    ///
    /// The content is trimmed of leading and trailing whitespace.
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            id: generate_id(),
            date: today(),
            content: content.trim().to_string(),
        }
    }

    /// Create a replacement memory that keeps an existing id.
    ///
    /// Used by update: the id stays stable while the date moves to today
    /// and the content is replaced.
    #[must_use]
    pub fn with_id(id: impl Into<String>, content: &str) -> Self {
        Self {
            id: id.into(),
            date: today(),
            content: content.trim().to_string(),
        }
    }

    /// The date formatted as it appears on the wire (`YYYY-MM-DD`).
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Get the length of the content in characters.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Check if the memory content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Generate a new memory id.
///
/// The id is the current Unix time in milliseconds followed by a zero-padded
/// 3-digit random suffix, giving a 16-digit string at present epochs. There
/// is no global uniqueness guarantee beyond practical non-collision; two ids
/// generated in the same millisecond still collide with probability 1/1000.
#[must_use]
pub fn generate_id() -> String {
    let millis = Local::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{millis}{suffix:03}")
}

/// Today's date in the local timezone.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
