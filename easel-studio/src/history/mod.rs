//! Generation history for one authenticated session
//!
//! An append-only log of `(prompt, artifact)` pairs in insertion order,
//! browsed most recent first. Entries are never reordered or deleted by the
//! user; when a capacity is set, the oldest entry is evicted to make room.
//! The cache is owned by the session and dropped with it on logout.

mod export;

pub use export::{ExportError, encode_png, export_file_name, write_export};

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use easel_common::validators::{PromptError, validate_prompt};
use image::DynamicImage;

/// A generated image, exclusively owned by its history entry
#[derive(Clone, PartialEq)]
pub struct Artifact(DynamicImage);

impl Artifact {
    /// Wrap a decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self(image)
    }

    /// Borrow the image
    pub fn image(&self) -> &DynamicImage {
        &self.0
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.0.height()
    }
}

impl From<DynamicImage> for Artifact {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

// Manual Debug implementation to avoid dumping pixel data
impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// One successful generation
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    prompt: String,
    artifact: Artifact,
    created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Prompt as the user typed it
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The generated image
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// When the entry was appended
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Encode the artifact as PNG
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(&self.artifact)
    }
}

/// Bounded, append-only generation log
#[derive(Debug, Clone, Default)]
pub struct HistoryCache {
    /// Oldest first
    entries: VecDeque<HistoryEntry>,
    /// Maximum entries kept (None = unbounded)
    capacity: Option<NonZeroUsize>,
}

impl HistoryCache {
    /// Create an empty cache holding at most `capacity` entries
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Create an empty cache with no size limit
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Maximum number of entries kept, if bounded
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been appended (or all were evicted)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a generation outcome
    ///
    /// Rejects prompts with no visible content. When the cache is full the
    /// oldest entry is evicted first.
    pub fn append(
        &mut self,
        prompt: impl Into<String>,
        artifact: Artifact,
    ) -> Result<&HistoryEntry, PromptError> {
        let prompt = prompt.into();
        validate_prompt(&prompt)?;

        if let Some(capacity) = self.capacity
            && self.entries.len() >= capacity.get()
        {
            self.entries.pop_front();
            tracing::debug!(capacity = capacity.get(), "history full, evicted oldest entry");
        }

        let index = self.entries.len();
        self.entries.push_back(HistoryEntry {
            prompt,
            artifact,
            created_at: Utc::now(),
        });
        Ok(&self.entries[index])
    }

    /// Iterate entries newest first
    ///
    /// Each call starts a fresh pass over the cache as it is now.
    pub fn iter_most_recent_first(
        &self,
    ) -> impl ExactSizeIterator<Item = &HistoryEntry> + DoubleEndedIterator {
        self.entries.iter().rev()
    }

    /// Entry at a 1-based position in newest-first order
    pub fn get(&self, position: usize) -> Option<&HistoryEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.iter_most_recent_first().nth(index))
    }

    /// Serialize an entry's artifact as PNG bytes
    ///
    /// Deterministic for a given artifact; does not touch the cache.
    pub fn export_entry(&self, entry: &HistoryEntry) -> Result<Vec<u8>, ExportError> {
        entry.export_png()
    }
}
