#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Taxonomy catalog building, persistence, and metadata joining.
pub mod catalog;
/// Dataset and labeling configuration types.
pub mod config;
/// Centralized constants used across catalog, probing, and enumeration.
pub mod constants;
/// Dataset façade orchestrating sampling, extraction, and metadata.
pub mod dataset;
/// Audio extraction interface and sample buffer shapes.
pub mod extract;
/// Cumulative-length indexing over ordered file collections.
pub mod index;
/// Label vector encoding.
pub mod labels;
/// Duration probing and audio file enumeration.
pub mod probe;
/// Shared type aliases.
pub mod types;
/// Ordering and path helpers.
pub mod utils;
/// Window placement over the global sample timeline.
pub mod window;

mod errors;

pub use catalog::{load_catalog, write_catalog, CatalogBuilder, ClipRecord, MetadataLookup};
pub use config::{DatasetConfig, LabelFormat, LabelingConfig};
pub use dataset::{Dataset, Example};
pub use errors::DatasetError;
pub use extract::{AudioExtractor, SampleChunk, SilenceExtractor};
pub use index::{CumulativeLengthIndex, FileEntry, Located};
pub use labels::{LabelEncoder, TimingLabelEncoder};
pub use probe::{cache_affinity, find_audio_files, DurationProbe};
pub use types::{Category, ClipName, FileId, LabelVector, SubCategory, WorkerRank};
pub use window::{Window, WindowSampler};
