//! Taxonomy catalog: building, persistence, and metadata joining.
//!
//! A corpus root is laid out as `category/sub_category/track/clip`. The
//! builder walks that tree deterministically (sorted directories at every
//! level, natural-ordered clips) and assigns each distinct sub-category a
//! dense integer id in first-seen order. Ids are stable only within one
//! build over one file set; callers that need ids to survive across
//! differing inputs must persist the mapping themselves.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::catalog::{UNKNOWN_LABEL, UNKNOWN_SUB_CATEGORY_ID};
use crate::errors::DatasetError;
use crate::types::{Category, ClipName, FileId, SubCategory};
use crate::utils::{forward_slashes, natural_cmp};

/// One cataloged clip with its taxonomy labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRecord {
    /// Top-level taxonomy label.
    #[serde(rename = "Category")]
    pub category: Category,
    /// Second-level taxonomy label.
    #[serde(rename = "SubCategory")]
    pub sub_category: SubCategory,
    /// Terminal clip file name.
    #[serde(rename = "Clip")]
    pub clip_name: ClipName,
    /// Forward-slash path of the clip relative to the catalog root.
    #[serde(rename = "RelativePath")]
    pub relative_path: FileId,
    /// Dense sub-category id assigned in first-seen order.
    #[serde(rename = "SubCategoryId")]
    pub sub_category_id: i64,
}

impl ClipRecord {
    /// Sentinel record returned for files absent from the catalog.
    pub fn unknown() -> Self {
        Self {
            category: UNKNOWN_LABEL.to_string(),
            sub_category: UNKNOWN_LABEL.to_string(),
            clip_name: UNKNOWN_LABEL.to_string(),
            relative_path: UNKNOWN_LABEL.to_string(),
            sub_category_id: UNKNOWN_SUB_CATEGORY_ID,
        }
    }
}

/// Walks a taxonomy root and emits ordered clip records.
pub struct CatalogBuilder {
    root: PathBuf,
}

impl CatalogBuilder {
    /// Create a builder rooted at the taxonomy directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build the ordered record list with a single deterministic traversal.
    pub fn build(&self) -> Result<Vec<ClipRecord>, DatasetError> {
        if !self.root.is_dir() {
            return Err(DatasetError::CatalogUnavailable {
                path: self.root.display().to_string(),
                reason: "root is not a directory".to_string(),
            });
        }

        let mut sub_category_ids: IndexMap<SubCategory, i64> = IndexMap::new();
        let mut records = Vec::new();

        for (category, category_path) in sorted_subdirs(&self.root)? {
            for (sub_category, sub_path) in sorted_subdirs(&category_path)? {
                let next_id = sub_category_ids.len() as i64;
                let sub_category_id = *sub_category_ids
                    .entry(sub_category.clone())
                    .or_insert(next_id);
                for (_track, track_path) in sorted_subdirs(&sub_path)? {
                    for (clip_name, clip_path) in natural_sorted_files(&track_path)? {
                        let relative = clip_path
                            .strip_prefix(&self.root)
                            .unwrap_or(&clip_path)
                            .to_path_buf();
                        records.push(ClipRecord {
                            category: category.clone(),
                            sub_category: sub_category.clone(),
                            clip_name,
                            relative_path: forward_slashes(&relative),
                            sub_category_id,
                        });
                    }
                }
            }
        }

        debug!(
            root = %self.root.display(),
            clips = records.len(),
            sub_categories = sub_category_ids.len(),
            "catalog built"
        );
        Ok(records)
    }
}

/// Persist records as a JSON array in insertion order.
pub fn write_catalog(records: &[ClipRecord], path: &Path) -> Result<(), DatasetError> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records).map_err(|err| DatasetError::CatalogUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Load records from a persisted catalog file, surfacing failures.
pub fn load_catalog(path: &Path) -> Result<Vec<ClipRecord>, DatasetError> {
    let contents = fs::read_to_string(path).map_err(|err| DatasetError::CatalogUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|err| DatasetError::CatalogUnavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Read-only file-id to clip-record mapping used during sampling.
#[derive(Clone, Debug, Default)]
pub struct MetadataLookup {
    records: HashMap<FileId, ClipRecord>,
}

impl MetadataLookup {
    /// Build a lookup keyed by relative path.
    pub fn from_records(records: Vec<ClipRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.relative_path.clone(), record))
            .collect();
        Self { records }
    }

    /// Load a lookup from a catalog file, degrading to empty on failure.
    ///
    /// A missing or malformed catalog never blocks sampling; every lookup
    /// then resolves to the sentinel record.
    pub fn from_catalog_path(path: impl AsRef<Path>) -> Self {
        match load_catalog(path.as_ref()) {
            Ok(records) => Self::from_records(records),
            Err(err) => {
                warn!(error = %err, "catalog unavailable, using sentinel metadata");
                Self::default()
            }
        }
    }

    /// Number of cataloged files.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no files are cataloged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve the record for a file id; sentinel fields on a miss.
    pub fn resolve(&self, file_id: &str) -> ClipRecord {
        self.records
            .get(file_id)
            .cloned()
            .unwrap_or_else(ClipRecord::unknown)
    }
}

fn sorted_subdirs(path: &Path) -> Result<Vec<(String, PathBuf)>, DatasetError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    dirs.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(dirs)
}

fn natural_sorted_files(path: &Path) -> Result<Vec<(String, PathBuf)>, DatasetError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    files.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sub_category: &str, relative_path: &str, sub_category_id: i64) -> ClipRecord {
        ClipRecord {
            category: "cat".to_string(),
            sub_category: sub_category.to_string(),
            clip_name: relative_path.rsplit('/').next().unwrap().to_string(),
            relative_path: relative_path.to_string(),
            sub_category_id,
        }
    }

    #[test]
    fn resolve_misses_return_the_sentinel_record() {
        let lookup = MetadataLookup::from_records(vec![record("raga", "cat/raga/t/a.wav", 0)]);
        let missing = lookup.resolve("cat/raga/t/not_there.wav");
        assert_eq!(missing.category, "unknown");
        assert_eq!(missing.sub_category, "unknown");
        assert_eq!(missing.clip_name, "unknown");
        assert_eq!(missing.sub_category_id, -1);
    }

    #[test]
    fn resolve_hits_return_the_cataloged_record() {
        let lookup = MetadataLookup::from_records(vec![record("raga", "cat/raga/t/a.wav", 3)]);
        let found = lookup.resolve("cat/raga/t/a.wav");
        assert_eq!(found.sub_category, "raga");
        assert_eq!(found.sub_category_id, 3);
    }

    #[test]
    fn missing_catalog_file_degrades_to_empty_lookup() {
        let lookup = MetadataLookup::from_catalog_path("/definitely/not/here.json");
        assert!(lookup.is_empty());
        assert_eq!(lookup.resolve("anything").sub_category_id, -1);
    }

    #[test]
    fn records_serialize_with_external_field_names() {
        let json = serde_json::to_value(record("raga", "cat/raga/t/a.wav", 2)).unwrap();
        assert_eq!(json["Category"], "cat");
        assert_eq!(json["SubCategory"], "raga");
        assert_eq!(json["Clip"], "a.wav");
        assert_eq!(json["RelativePath"], "cat/raga/t/a.wav");
        assert_eq!(json["SubCategoryId"], 2);
    }
}
