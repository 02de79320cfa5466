//! Duration probing and audio file enumeration.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::constants::audio::AUDIO_EXTENSIONS;
use crate::constants::probe::CACHE_AFFINITY_MODULUS;
use crate::errors::DatasetError;
use crate::types::WorkerRank;

/// Probes the playable duration of a media file.
///
/// Implementations own decoding; the core never opens audio itself.
/// `use_cache` is an optimization hint from the cache-affinity check:
/// implementations are always free to recompute.
pub trait DurationProbe: Send + Sync {
    /// Duration of `path` in seconds.
    fn duration_secs(&self, path: &Path, use_cache: bool) -> Result<f64, DatasetError>;
}

/// Whether a worker is designated to reuse cached probe results.
///
/// One worker in every group of eight shares its filesystem cache; the
/// rest recompute so a stale cache cannot poison the whole pool.
pub fn cache_affinity(worker_rank: WorkerRank) -> bool {
    worker_rank % CACHE_AFFINITY_MODULUS == 0
}

/// Enumerate audio files under `root` in deterministic sorted order.
pub fn find_audio_files(root: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    if !root.is_dir() {
        return Err(DatasetError::Configuration(format!(
            "audio root '{}' does not exist",
            root.display()
        )));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| is_audio_file(path))
        .collect();
    files.sort();
    debug!(root = %root.display(), count = files.len(), "enumerated audio files");
    Ok(files)
}

/// True if the path carries a recognized audio extension (case-insensitive).
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
