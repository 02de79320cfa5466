//! Label vector encoding for sampled windows.

use crate::catalog::ClipRecord;
use crate::config::{LabelFormat, LabelingConfig};
use crate::constants::catalog::UNKNOWN_SUB_CATEGORY_ID;
use crate::types::LabelVector;

/// Converts categorical metadata plus window timing into a numeric vector.
pub trait LabelEncoder: Send + Sync {
    /// Encode a label vector for one sampled window.
    ///
    /// `duration_samples` is the full length of the source file and
    /// `local_offset` the window's start inside it.
    fn encode(&self, record: &ClipRecord, duration_samples: u64, local_offset: u64) -> LabelVector;
}

/// Fixed-width encoder carrying timing and the sub-category class id.
///
/// The vector is always `n_tokens` wide, padded with the sentinel id.
/// V3 places the class slots first and timing after; V2 is the legacy
/// timing-first layout.
pub struct TimingLabelEncoder {
    sample_length: u64,
    labeling: LabelingConfig,
}

impl TimingLabelEncoder {
    /// Create an encoder for a fixed window size.
    pub fn new(sample_length: u64, labeling: LabelingConfig) -> Self {
        Self {
            sample_length,
            labeling,
        }
    }

    fn class_slots(&self, record: &ClipRecord) -> Vec<i64> {
        let mut slots = vec![UNKNOWN_SUB_CATEGORY_ID; self.labeling.max_bow_genre_size.max(1)];
        slots[0] = record.sub_category_id;
        slots
    }
}

impl LabelEncoder for TimingLabelEncoder {
    fn encode(&self, record: &ClipRecord, duration_samples: u64, local_offset: u64) -> LabelVector {
        let timing = [
            duration_samples as i64,
            local_offset as i64,
            self.sample_length as i64,
        ];
        let mut vector: Vec<i64> = match self.labeling.format {
            LabelFormat::V3 => self
                .class_slots(record)
                .into_iter()
                .chain(timing)
                .collect(),
            LabelFormat::V2 => timing
                .into_iter()
                .chain(self.class_slots(record))
                .collect(),
        };
        vector.resize(self.labeling.n_tokens, UNKNOWN_SUB_CATEGORY_ID);
        vector.truncate(self.labeling.n_tokens);
        vector
    }
}
