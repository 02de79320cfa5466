//! Window placement over the global sample timeline.
//!
//! An item index names one nominal window of `sample_length` samples on
//! the concatenated timeline. Placement optionally jitters the window by
//! a bounded random shift, locates the containing file through the
//! cumulative-length index, and re-centers once when jitter pushed the
//! window over a file boundary. Because `|shift| <= sample_length / 2`,
//! a single correction is always enough; a window can never span two
//! files.

use rand::Rng;

use crate::errors::DatasetError;
use crate::index::CumulativeLengthIndex;

/// A placed window: which file, and where inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Index of the file the window was placed in.
    pub file_index: usize,
    /// Sample offset of the window start inside that file.
    ///
    /// Always satisfies `local_offset + sample_length <= duration`.
    pub local_offset: u64,
}

/// Maps item indices to in-file window offsets.
#[derive(Clone, Debug)]
pub struct WindowSampler {
    index: CumulativeLengthIndex,
    sample_length: u64,
    jitter: bool,
}

impl WindowSampler {
    /// Create a sampler over a built index.
    pub fn new(index: CumulativeLengthIndex, sample_length: u64, jitter: bool) -> Self {
        Self {
            index,
            sample_length,
            jitter,
        }
    }

    /// Number of addressable windows: `floor(total_samples / sample_length)`.
    pub fn num_windows(&self) -> u64 {
        self.index.total_samples() / self.sample_length
    }

    /// Shared read-only view of the underlying index.
    pub fn index(&self) -> &CumulativeLengthIndex {
        &self.index
    }

    /// Place the window for `item_index`, drawing jitter from `rng`.
    ///
    /// The random source is injected so callers control determinism: a
    /// seeded generator replays identical placements, and with jitter
    /// disabled the generator is never consulted.
    pub fn sample(&self, item_index: u64, rng: &mut impl Rng) -> Result<Window, DatasetError> {
        let num_windows = self.num_windows();
        if item_index >= num_windows {
            return Err(DatasetError::OutOfRange {
                value: item_index as i64,
                limit: num_windows,
            });
        }

        let sample_length = self.sample_length as i128;
        let half = sample_length / 2;
        let shift: i128 = if self.jitter && half > 0 {
            rng.random_range(-half..half)
        } else {
            0
        };
        let mut raw_offset = item_index as i128 * sample_length + shift;
        let midpoint = raw_offset + half;

        let total = self.index.total_samples();
        if midpoint < 0 || midpoint >= total as i128 {
            return Err(DatasetError::OutOfRange {
                value: midpoint as i64,
                limit: total,
            });
        }

        let located = self.index.locate(midpoint as u64)?;
        let start = located.start as i128;
        let end = located.end as i128;

        // Single-step re-centering: jitter can overshoot a boundary by at
        // most `half`, so one correction restores the window without
        // crossing into the neighboring file on the opposite side.
        if raw_offset > end - sample_length {
            raw_offset = (raw_offset - half).max(start);
        } else if raw_offset < start {
            raw_offset = (raw_offset + half).min(end - sample_length);
        }

        if raw_offset < start || raw_offset > end - sample_length {
            // A file shorter than the window survived duration filtering.
            return Err(DatasetError::DataIntegrity {
                file_index: located.file_index,
                details: format!(
                    "window of {} samples does not fit interval [{}, {})",
                    self.sample_length, located.start, located.end
                ),
            });
        }

        Ok(Window {
            file_index: located.file_index,
            local_offset: (raw_offset - start) as u64,
        })
    }
}
