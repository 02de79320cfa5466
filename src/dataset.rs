//! Dataset façade wiring window sampling, extraction, and metadata.
//!
//! A `Dataset` owns the read-only index structures and the injected
//! collaborators. Every `get_example` call is stateless beyond reading
//! those shared structures, so concurrent calls from worker threads are
//! safe; jitter randomness comes from the caller-provided generator.

use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::MetadataLookup;
use crate::config::DatasetConfig;
use crate::errors::DatasetError;
use crate::extract::AudioExtractor;
use crate::index::{CumulativeLengthIndex, FileEntry};
use crate::labels::{LabelEncoder, TimingLabelEncoder};
use crate::probe::{cache_affinity, find_audio_files, DurationProbe};
use crate::types::{Category, ClipName, FileId, LabelVector, SubCategory, WorkerRank};
use crate::utils::forward_slashes;
use crate::window::WindowSampler;

/// One training example: a fixed-shape window plus its metadata.
#[derive(Clone, Debug)]
pub struct Example {
    /// Frame-major samples, `sample_length` rows of `channels` values.
    pub frames: Vec<Vec<f32>>,
    /// Label vector, present when labeling is enabled.
    pub label: Option<LabelVector>,
    /// Identifier of the source file.
    pub file_id: FileId,
    /// Top-level taxonomy label.
    pub category: Category,
    /// Second-level taxonomy label.
    pub sub_category: SubCategory,
    /// Terminal clip name.
    pub clip_name: ClipName,
    /// Dense sub-category id, −1 for uncataloged files.
    pub sub_category_id: i64,
}

/// Windowed sampling dataset over a collection of audio files.
pub struct Dataset {
    config: DatasetConfig,
    entries: Vec<FileEntry>,
    sampler: WindowSampler,
    metadata: MetadataLookup,
    extractor: Box<dyn AudioExtractor>,
    labeller: Option<Box<dyn LabelEncoder>>,
}

impl Dataset {
    /// Build a dataset from pre-probed file entries.
    ///
    /// Entries are filtered to the configured duration range; the order
    /// of the retained entries defines file indices for the lifetime of
    /// the instance. This constructor performs no filesystem access, so
    /// synthetic corpora can drive the core in tests.
    pub fn from_entries(
        config: DatasetConfig,
        entries: Vec<FileEntry>,
        metadata: MetadataLookup,
        extractor: Box<dyn AudioExtractor>,
        labeller: Option<Box<dyn LabelEncoder>>,
    ) -> Result<Self, DatasetError> {
        config.validate()?;

        let candidates = entries.len();
        let sample_rate = f64::from(config.sample_rate);
        let min_duration = config.min_duration_secs();
        let max_duration = config.max_duration_secs();
        let entries: Vec<FileEntry> = entries
            .into_iter()
            .filter(|entry| {
                let secs = entry.duration_samples as f64 / sample_rate;
                secs >= min_duration && secs < max_duration
            })
            .collect();
        debug!(
            kept = entries.len(),
            candidates,
            min_duration,
            max_duration,
            "duration filter applied"
        );
        if entries.is_empty() {
            warn!("no files within the duration range; dataset has zero windows");
        }

        let index = CumulativeLengthIndex::build(&entries)?;
        let sampler = WindowSampler::new(index, config.sample_length, config.aug_shift);

        let labeller = if config.labels {
            // Config validation guarantees labeling parameters exist.
            let labeling = config.labeling.clone().ok_or_else(|| {
                DatasetError::Configuration("labels enabled without labeling parameters".into())
            })?;
            Some(labeller.unwrap_or_else(|| {
                Box::new(TimingLabelEncoder::new(config.sample_length, labeling))
            }))
        } else {
            None
        };

        Ok(Self {
            config,
            entries,
            sampler,
            metadata,
            extractor,
            labeller,
        })
    }

    /// Build a dataset by enumerating and probing files under the audio root.
    ///
    /// `worker_rank` feeds the cache-affinity check: designated workers
    /// pass `use_cache = true` to the probe, the rest recompute.
    pub fn scan(
        config: DatasetConfig,
        probe: &dyn DurationProbe,
        metadata: MetadataLookup,
        extractor: Box<dyn AudioExtractor>,
        labeller: Option<Box<dyn LabelEncoder>>,
        worker_rank: WorkerRank,
    ) -> Result<Self, DatasetError> {
        config.validate()?;
        let files = find_audio_files(&config.audio_root)?;
        debug!(count = files.len(), "probing file durations");

        let use_cache = cache_affinity(worker_rank);
        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let secs = probe.duration_secs(&path, use_cache)?;
            let duration_samples = (secs * f64::from(config.sample_rate)) as u64;
            let relative = path
                .strip_prefix(&config.audio_root)
                .unwrap_or(&path)
                .to_path_buf();
            entries.push(FileEntry::new(forward_slashes(&relative), duration_samples));
        }
        Self::from_entries(config, entries, metadata, extractor, labeller)
    }

    /// Number of addressable windows: `floor(total_samples / sample_length)`.
    pub fn len(&self) -> u64 {
        self.sampler.num_windows()
    }

    /// True when the corpus holds no complete window.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retained file entries, in index order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Active configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Produce the example for `item_index`, drawing jitter from `rng`.
    ///
    /// Metadata misses degrade to sentinel fields; extraction failures
    /// and index invariant violations propagate.
    pub fn get_example(
        &self,
        item_index: u64,
        rng: &mut impl Rng,
    ) -> Result<Example, DatasetError> {
        let window = self.sampler.sample(item_index, rng)?;
        let entry = &self.entries[window.file_index];

        let chunk = self.extractor.extract(
            &entry.file_id,
            window.local_offset,
            self.config.sample_length,
        )?;
        chunk.check_shape(&entry.file_id, self.config.channels, self.config.sample_length)?;

        let record = self.metadata.resolve(&entry.file_id);
        let label = self
            .labeller
            .as_ref()
            .map(|encoder| encoder.encode(&record, entry.duration_samples, window.local_offset));

        Ok(Example {
            frames: chunk.into_frames(),
            label,
            file_id: entry.file_id.clone(),
            category: record.category,
            sub_category: record.sub_category,
            clip_name: record.clip_name,
            sub_category_id: record.sub_category_id,
        })
    }
}
