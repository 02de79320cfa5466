use std::path::PathBuf;

use crate::errors::DatasetError;

/// Layout version for encoded label vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelFormat {
    /// Legacy layout: timing fields first, class id after.
    V2,
    /// Current layout: class id first, timing fields after.
    V3,
}

/// Labeling sub-configuration, required only when labels are enabled.
#[derive(Clone, Debug)]
pub struct LabelingConfig {
    /// Maximum number of bag-of-words class slots reserved in the vector.
    pub max_bow_genre_size: usize,
    /// Total width of the emitted label vector, padded with sentinels.
    pub n_tokens: usize,
    /// Label vector layout version.
    pub format: LabelFormat,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            max_bow_genre_size: 1,
            n_tokens: 8,
            format: LabelFormat::V3,
        }
    }
}

/// Top-level dataset configuration.
#[derive(Clone, Debug)]
pub struct DatasetConfig {
    /// Root directory containing the audio taxonomy.
    pub audio_root: PathBuf,
    /// Sample rate in Hz used to convert between seconds and samples.
    pub sample_rate: u32,
    /// Channel count every extracted chunk must carry.
    pub channels: usize,
    /// Fixed window size in samples for every example.
    pub sample_length: u64,
    /// Lower duration bound in seconds for retained files.
    ///
    /// Defaults to `ceil(sample_length / sample_rate)` when unset, which
    /// always satisfies the strict window-fits-file precondition.
    pub min_duration: Option<f64>,
    /// Upper duration bound in seconds for retained files (unbounded when unset).
    pub max_duration: Option<f64>,
    /// Enable bounded random jitter in window placement.
    pub aug_shift: bool,
    /// Attach label vectors to examples.
    pub labels: bool,
    /// Labeling parameters; must be present when `labels` is true.
    pub labeling: Option<LabelingConfig>,
}

impl DatasetConfig {
    /// Create a config with required fields and defaulted options.
    pub fn new(
        audio_root: impl Into<PathBuf>,
        sample_rate: u32,
        channels: usize,
        sample_length: u64,
    ) -> Self {
        Self {
            audio_root: audio_root.into(),
            sample_rate,
            channels,
            sample_length,
            min_duration: None,
            max_duration: None,
            aug_shift: false,
            labels: false,
            labeling: None,
        }
    }

    /// Override the minimum retained duration in seconds.
    pub fn with_min_duration(mut self, seconds: f64) -> Self {
        self.min_duration = Some(seconds);
        self
    }

    /// Override the maximum retained duration in seconds.
    pub fn with_max_duration(mut self, seconds: f64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    /// Enable or disable window jitter.
    pub fn with_aug_shift(mut self, aug_shift: bool) -> Self {
        self.aug_shift = aug_shift;
        self
    }

    /// Enable label vectors with the given labeling parameters.
    pub fn with_labeling(mut self, labeling: LabelingConfig) -> Self {
        self.labels = true;
        self.labeling = Some(labeling);
        self
    }

    /// Effective minimum duration in seconds, defaulted from the window size.
    pub fn min_duration_secs(&self) -> f64 {
        self.min_duration
            .unwrap_or_else(|| (self.sample_length as f64 / f64::from(self.sample_rate)).ceil())
    }

    /// Effective maximum duration in seconds.
    pub fn max_duration_secs(&self) -> f64 {
        self.max_duration.unwrap_or(f64::INFINITY)
    }

    /// Validate construction-time invariants.
    ///
    /// The window must be strictly shorter than the minimum retained
    /// duration; equality fails, otherwise a file exactly one window long
    /// could survive filtering and leave no room for jitter clamping.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.sample_rate == 0 {
            return Err(DatasetError::Configuration(
                "sample_rate must be positive".into(),
            ));
        }
        if self.channels == 0 {
            return Err(DatasetError::Configuration(
                "channel count must be positive".into(),
            ));
        }
        if self.sample_length == 0 {
            return Err(DatasetError::Configuration(
                "sample_length must be positive".into(),
            ));
        }
        let window_secs = self.sample_length as f64 / f64::from(self.sample_rate);
        let min_duration = self.min_duration_secs();
        if window_secs >= min_duration {
            return Err(DatasetError::Configuration(format!(
                "window of {} samples at {} Hz ({window_secs:.2}s) must be strictly \
                 shorter than min duration {min_duration:.2}s",
                self.sample_length, self.sample_rate
            )));
        }
        if min_duration >= self.max_duration_secs() {
            return Err(DatasetError::Configuration(format!(
                "min duration {min_duration:.2}s must be below max duration {:.2}s",
                self.max_duration_secs()
            )));
        }
        if self.labels && self.labeling.is_none() {
            return Err(DatasetError::Configuration(
                "labels enabled without labeling parameters".into(),
            ));
        }
        Ok(())
    }
}
