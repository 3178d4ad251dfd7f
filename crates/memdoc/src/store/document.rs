//! Document file lifecycle and whole-document I/O.
//!
//! The document is a single UTF-8 markdown file with a free-form prose
//! region and a machine-managed record region bounded by two sentinel
//! comments. This module guarantees the file and its record region exist
//! and performs the whole-document read/modify/write cycles every
//! operation goes through.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Heading introducing the record region.
pub const SECTION_HEADING: &str = "## MEMORIES";

/// Start sentinel; must appear verbatim in the document.
pub const SECTION_START: &str = "<!-- Memory section start -->";

/// End sentinel; the insertion anchor for new records.
pub const SECTION_END: &str = "<!-- Memory section end -->";

/// Content written when the document does not exist yet.
const BOOTSTRAP: &str = "Personal configuration and long-term memories.\n\n\
## MEMORIES\n\
<!-- Memory section start -->\n\
<!-- Memory section end -->\n";

/// Block appended to an existing document that lacks the record region.
const SECTION_BLOCK: &str = "\n\n## MEMORIES\n\
<!-- Memory section start -->\n\
<!-- Memory section end -->\n";

/// Handle to the on-disk document.
///
/// Holds only the path; every operation re-reads the file, so there is no
/// in-memory cache to go stale.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    /// Create a handle for the document at the given path.
    ///
    /// The path is injected rather than fixed so tests can point the store
    /// at scratch files. Nothing is touched until [`ensure_initialized`]
    /// or an operation runs.
    ///
    /// [`ensure_initialized`]: DocumentFile::ensure_initialized
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the document file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the document and its record region exist. Idempotent.
    ///
    /// Creates missing parent directories, creates a missing file with
    /// bootstrap prose plus an empty sentineled region, and appends the
    /// region to an existing file that lacks the sentinel pair. All
    /// existing content is preserved byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation, reading, or writing fails.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
                info!("created directory {}", parent.display());
            }
        }

        if !self.path.exists() {
            self.save(BOOTSTRAP)?;
            info!("created memory document at {}", self.path.display());
            return Ok(());
        }

        let content = self.load()?;
        if content.contains(SECTION_START) && content.contains(SECTION_END) {
            debug!("memory section already present in {}", self.path.display());
            return Ok(());
        }

        let mut updated = content;
        updated.push_str(SECTION_BLOCK);
        self.save(&updated)?;
        info!("appended memory section to {}", self.path.display());
        Ok(())
    }

    /// Read the entire document as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| Error::DocumentRead {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the entire document with `text`.
    ///
    /// Not transactional: a crash mid-write can corrupt the document. This
    /// is an accepted limitation of the whole-file rewrite design.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text).map_err(|source| Error::DocumentWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the document, apply `mutate`, and save the result.
    ///
    /// The on-disk file ends up reflecting exactly what `mutate` returned,
    /// or the prior content when `mutate` fails (the save is skipped). This
    /// is the only write path operations use. It provides no isolation
    /// against concurrent writers to the same path.
    ///
    /// # Errors
    ///
    /// Returns the error from `mutate`, or an I/O error from load/save.
    pub fn with_document<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&str) -> Result<(String, T)>,
    {
        let current = self.load()?;
        let (next, out) = mutate(&current)?;
        self.save(&next)?;
        Ok(out)
    }

    /// Byte range of the record region within `document`.
    ///
    /// The region starts on the line after the start sentinel and ends at
    /// the start of the end sentinel. Returns `None` when either sentinel
    /// is missing or they are out of order.
    #[must_use]
    pub fn record_region(document: &str) -> Option<Range<usize>> {
        let start = document.find(SECTION_START)?;
        let mut region_start = start + SECTION_START.len();
        if document[region_start..].starts_with('\n') {
            region_start += 1;
        }

        let end = document.find(SECTION_END)?;
        if end < region_start {
            return None;
        }

        Some(region_start..end)
    }

    /// Byte offset of the end sentinel: the insertion point for new records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionMissing`] when the end sentinel is absent
    /// (the document was externally edited after initialization).
    pub fn insertion_point(&self, document: &str) -> Result<usize> {
        document
            .find(SECTION_END)
            .ok_or_else(|| Error::SectionMissing {
                path: self.path.clone(),
            })
    }
}
