//! Memory store: CRUD orchestration over the embedded record region.
//!
//! This module ties the document file and the token codec together into the
//! four operations callers use: insert, update, delete, and list. Every
//! operation is stateless per call — the file is re-read each time — and
//! returns a serializable outcome struct whose field names match the wire
//! format of the tool protocol.

pub mod document;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::codec::{self, ScannedMemory};
use crate::error::{Error, Result};
use crate::record::Memory;

pub use document::DocumentFile;

/// Default number of characters shown in a list preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Marker appended to a truncated preview.
const ELLIPSIS: &str = "...";

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    /// Always `true`; failures are reported as error results instead.
    pub success: bool,
    /// The generated id of the new record.
    pub memory_id: String,
    /// The stamped date (`YYYY-MM-DD`).
    pub date: String,
    /// Human-readable confirmation.
    pub message: String,
    /// The stored (trimmed) content, echoed back.
    pub content: String,
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// Always `true`; failures are reported as error results instead.
    pub success: bool,
    /// The unchanged id of the updated record.
    pub memory_id: String,
    /// The new date (`YYYY-MM-DD`).
    pub date: String,
    /// Human-readable confirmation.
    pub message: String,
    /// Content the record held before the update.
    pub old_content: String,
    /// Content the record holds now.
    pub new_content: String,
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Always `true`; failures are reported as error results instead.
    pub success: bool,
    /// The id of the removed record.
    pub memory_id: String,
    /// Human-readable confirmation.
    pub message: String,
    /// Content the record held when it was removed.
    pub deleted_content: String,
}

/// One record in a list result, with its content previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorySummary {
    /// The record's date (`YYYY-MM-DD`).
    pub date: String,
    /// The record's id.
    pub memory_id: String,
    /// Content truncated to the preview threshold, `...` appended when cut.
    pub content: String,
    /// Character count of the untruncated content.
    pub length: usize,
}

/// Result of a list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListOutcome {
    /// Always `true`; failures are reported as error results instead.
    pub success: bool,
    /// Number of records in the document.
    pub total: usize,
    /// Summaries in document order.
    pub memories: Vec<MemorySummary>,
}

/// Store for memory records embedded in a markdown document.
///
/// Construct with [`MemoryStore::open`]; the path is injected so callers
/// (and tests) decide where the document lives.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    document: DocumentFile,
    preview_chars: usize,
}

impl MemoryStore {
    /// Open the store, initializing the document if needed.
    ///
    /// This is the only point where an I/O failure is allowed to be fatal
    /// to the caller: without an initialized document there is no usable
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or its directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let document = DocumentFile::new(path.as_ref().to_path_buf());
        document.ensure_initialized()?;
        info!("memory store ready at {}", document.path().display());
        Ok(Self {
            document,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    /// Set the preview threshold used by [`list`](MemoryStore::list).
    #[must_use]
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Get the path to the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.document.path()
    }

    /// Insert a new memory, splicing it in just before the end sentinel.
    ///
    /// Content is trimmed; empty content is rejected. All document bytes
    /// outside the insertion point are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMemory`] for blank content,
    /// [`Error::SectionMissing`] if the end sentinel was edited away, or an
    /// I/O error from the read/write cycle.
    pub fn insert(&self, content: &str) -> Result<InsertOutcome> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyMemory);
        }

        let memory = Memory::new(trimmed);
        let token = codec::serialize(&memory)?;

        self.document.with_document(|doc| {
            let at = self.document.insertion_point(doc)?;
            let mut next = String::with_capacity(doc.len() + token.len() + 1);
            next.push_str(&doc[..at]);
            next.push_str(&token);
            next.push('\n');
            next.push_str(&doc[at..]);
            Ok((next, ()))
        })?;

        debug!(id = %memory.id, "inserted memory");
        Ok(InsertOutcome {
            success: true,
            memory_id: memory.id.clone(),
            date: memory.date_string(),
            message: format!("Memory saved with ID: {}", memory.id),
            content: memory.content,
        })
    }

    /// Replace a memory's content in place, keeping its id and position.
    ///
    /// The record is located by scanning; the replacement is spliced at the
    /// byte span recorded during the scan. The span's bytes are re-checked
    /// against the scanned token first so external-edit drift surfaces as a
    /// distinct stale error instead of a silent miscorrection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemoryNotFound`] if no record has the id,
    /// [`Error::StaleMemory`] if the record's bytes drifted,
    /// [`Error::EmptyMemory`] for blank content, or an I/O error.
    pub fn update(&self, id: &str, content: &str) -> Result<UpdateOutcome> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyMemory);
        }

        let outcome = self.document.with_document(|doc| {
            let target = Self::find_by_id(doc, id)?;
            let updated = Memory::with_id(id, trimmed);
            let token = codec::serialize(&updated)?;

            let mut next =
                String::with_capacity(doc.len() - target.raw.len() + token.len());
            next.push_str(&doc[..target.span.start]);
            next.push_str(&token);
            next.push_str(&doc[target.span.end..]);

            let outcome = UpdateOutcome {
                success: true,
                memory_id: updated.id.clone(),
                date: updated.date_string(),
                message: format!("Memory {id} has been updated"),
                old_content: target.memory.content,
                new_content: updated.content,
            };
            Ok((next, outcome))
        })?;

        debug!(%id, "updated memory");
        Ok(outcome)
    }

    /// Remove a memory and its trailing line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemoryNotFound`] if no record has the id,
    /// [`Error::StaleMemory`] if the record's bytes drifted, or an I/O
    /// error.
    pub fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let outcome = self.document.with_document(|doc| {
            let target = Self::find_by_id(doc, id)?;

            let mut cut_end = target.span.end;
            if doc[cut_end..].starts_with("\r\n") {
                cut_end += 2;
            } else if doc[cut_end..].starts_with('\n') {
                cut_end += 1;
            }

            let mut next = String::with_capacity(doc.len() - (cut_end - target.span.start));
            next.push_str(&doc[..target.span.start]);
            next.push_str(&doc[cut_end..]);

            let outcome = DeleteOutcome {
                success: true,
                memory_id: id.to_string(),
                message: format!("Memory {id} has been deleted"),
                deleted_content: target.memory.content,
            };
            Ok((next, outcome))
        })?;

        debug!(%id, "deleted memory");
        Ok(outcome)
    }

    /// List all memories in document order, contents previewed.
    ///
    /// Content at or under the preview threshold is returned whole; longer
    /// content is cut to exactly the threshold with `...` appended. The
    /// reported `length` is always the untruncated character count.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub fn list(&self) -> Result<ListOutcome> {
        let doc = self.document.load()?;
        let memories: Vec<MemorySummary> = Self::scan_document(&doc)
            .into_iter()
            .map(|s| MemorySummary {
                date: s.memory.date_string(),
                memory_id: s.memory.id,
                content: preview(&s.memory.content, self.preview_chars),
                length: s.memory.content.chars().count(),
            })
            .collect();

        Ok(ListOutcome {
            success: true,
            total: memories.len(),
            memories,
        })
    }

    /// All records with full content, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub fn memories(&self) -> Result<Vec<Memory>> {
        let doc = self.document.load()?;
        Ok(Self::scan_document(&doc)
            .into_iter()
            .map(|s| s.memory)
            .collect())
    }

    /// Scan the record region of `document`, spans rebased to the whole
    /// document. Tokens outside the sentinels are not records.
    fn scan_document(document: &str) -> Vec<ScannedMemory> {
        let Some(region) = DocumentFile::record_region(document) else {
            return Vec::new();
        };
        let base = region.start;
        codec::scan(&document[region])
            .into_iter()
            .map(|mut s| {
                s.span = (base + s.span.start)..(base + s.span.end);
                s
            })
            .collect()
    }

    /// Locate a record by id and verify its span still holds the scanned
    /// bytes.
    fn find_by_id(document: &str, id: &str) -> Result<ScannedMemory> {
        let target = Self::scan_document(document)
            .into_iter()
            .find(|s| s.memory.id == id)
            .ok_or_else(|| Error::not_found(id))?;

        if &document[target.span.clone()] != target.raw.as_str() {
            return Err(Error::stale(id));
        }
        Ok(target)
    }
}

/// Truncate `content` to `limit` characters, appending `...` when cut.
fn preview(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(limit).collect();
    cut.push_str(ELLIPSIS);
    cut
}
