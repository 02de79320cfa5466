//! Cumulative-length index over an ordered collection of audio files.
//!
//! The index is a prefix-sum array over per-file durations. Entry `i`
//! holds the total number of samples in files `0..=i`, so a global
//! sample position maps to a file via binary search. The array is built
//! once per dataset (re)initialization and is read-only afterwards,
//! which makes concurrent lookups from many workers safe.

use crate::errors::DatasetError;
use crate::types::FileId;

/// One retained audio file and its probed length.
///
/// Ordering is significant: the position of an entry in the dataset's
/// file list is the `file_index` every lookup reports, and must stay
/// fixed for the lifetime of a dataset instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Identifier used for extraction and metadata joining.
    pub file_id: FileId,
    /// File length in samples; strictly positive after duration filtering.
    pub duration_samples: u64,
}

impl FileEntry {
    /// Create an entry from an identifier and duration.
    pub fn new(file_id: impl Into<FileId>, duration_samples: u64) -> Self {
        Self {
            file_id: file_id.into(),
            duration_samples,
        }
    }
}

/// The half-open interval a located position falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Located {
    /// Index of the containing file in the entry list.
    pub file_index: usize,
    /// Global sample position where the file begins (inclusive).
    pub start: u64,
    /// Global sample position where the file ends (exclusive).
    pub end: u64,
}

/// Prefix-sum array over file durations, strictly increasing.
#[derive(Clone, Debug, Default)]
pub struct CumulativeLengthIndex {
    totals: Vec<u64>,
}

impl CumulativeLengthIndex {
    /// Build the index from an ordered entry list.
    ///
    /// Every duration must be strictly positive; zero-length files must
    /// already have been removed by duration filtering. Overflowing the
    /// running total is reported rather than wrapped.
    pub fn build(entries: &[FileEntry]) -> Result<Self, DatasetError> {
        let mut totals = Vec::with_capacity(entries.len());
        let mut running: u64 = 0;
        for (file_index, entry) in entries.iter().enumerate() {
            if entry.duration_samples == 0 {
                return Err(DatasetError::DataIntegrity {
                    file_index,
                    details: format!("file '{}' has zero duration", entry.file_id),
                });
            }
            running = running.checked_add(entry.duration_samples).ok_or_else(|| {
                DatasetError::DataIntegrity {
                    file_index,
                    details: "cumulative length overflowed u64".to_string(),
                }
            })?;
            totals.push(running);
        }
        Ok(Self { totals })
    }

    /// Total corpus length in samples (0 when the index is empty).
    pub fn total_samples(&self) -> u64 {
        self.totals.last().copied().unwrap_or(0)
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when no files are indexed.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Map a global sample position to its containing file.
    ///
    /// Returns the smallest `file_index` whose cumulative total exceeds
    /// `position`, together with the half-open interval
    /// `[start, end)` that file occupies on the global timeline.
    pub fn locate(&self, position: u64) -> Result<Located, DatasetError> {
        let total = self.total_samples();
        if position >= total {
            return Err(DatasetError::OutOfRange {
                value: position as i64,
                limit: total,
            });
        }
        let file_index = self.totals.partition_point(|&running| running <= position);
        let start = if file_index == 0 {
            0
        } else {
            self.totals[file_index - 1]
        };
        let end = self.totals[file_index];
        debug_assert!(start <= position && position < end);
        Ok(Located {
            file_index,
            start,
            end,
        })
    }
}
