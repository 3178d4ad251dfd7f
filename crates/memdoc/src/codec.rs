//! Token codec for embedded memory records.
//!
//! A memory is embedded in the document as a single-line JSON object with
//! exactly three keys in fixed order:
//!
//! ```text
//! {"date":"YYYY-MM-DD","memory_id":"<digits>","memory":"<escaped text>"}
//! ```
//!
//! This module serializes a [`Memory`] to that canonical form and scans
//! arbitrary text for embedded tokens. Scanning records each token's byte
//! span so callers can splice replacements by offset instead of matching
//! substrings against re-serialized text.

use std::ops::Range;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::record::Memory;

/// Pattern matching one embedded token.
///
/// Whitespace after the key colons is tolerated so hand-edited tokens still
/// parse; the `memory` value admits any JSON string escape sequence.
const TOKEN_PATTERN: &str =
    r#"\{"date":\s*"[^"]*",\s*"memory_id":\s*"\d+",\s*"memory":\s*"(?:[^"\\]|\\.)*"\}"#;

/// The wire form of one token. Field order is the canonical key order.
#[derive(Debug, Serialize, Deserialize)]
struct Token {
    date: String,
    memory_id: String,
    memory: String,
}

/// A memory recovered from document text, with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMemory {
    /// The parsed record.
    pub memory: Memory,

    /// The raw matched token text, exactly as it appears in the document.
    pub raw: String,

    /// Byte span of the token within the scanned text.
    pub span: Range<usize>,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Serialize a memory to its canonical single-line token.
///
/// The output is the exact inverse of the matching half of [`scan`] for any
/// record previously produced by `scan` or by `serialize` itself.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn serialize(memory: &Memory) -> Result<String> {
    let token = Token {
        date: memory.date_string(),
        memory_id: memory.id.clone(),
        memory: memory.content.clone(),
    };
    Ok(serde_json::to_string(&token)?)
}

/// Scan text for embedded memory tokens, in left-to-right order.
///
/// A candidate that matches the token shape but fails structured parsing
/// (invalid JSON escapes, a date that is not `YYYY-MM-DD`) is skipped with a
/// diagnostic; scanning continues. Spans are byte offsets into `text`.
#[must_use]
pub fn scan(text: &str) -> Vec<ScannedMemory> {
    let mut memories = Vec::new();

    for m in token_regex().find_iter(text) {
        let raw = m.as_str();
        match parse_token(raw) {
            Ok(memory) => memories.push(ScannedMemory {
                memory,
                raw: raw.to_string(),
                span: m.start()..m.end(),
            }),
            Err(reason) => {
                warn!(token = %raw, %reason, "skipping malformed memory token");
            }
        }
    }

    memories
}

/// Parse one raw token into a memory.
fn parse_token(raw: &str) -> std::result::Result<Memory, String> {
    let token: Token = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(&token.date, "%Y-%m-%d")
        .map_err(|e| format!("invalid date `{}`: {e}", token.date))?;
    Ok(Memory {
        id: token.memory_id,
        date,
        content: token.memory,
    })
}
