use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use clipwin::{
    cache_affinity, CatalogBuilder, Dataset, DatasetConfig, DatasetError, DurationProbe,
    LabelingConfig, MetadataLookup, SampleChunk, AudioExtractor, LabelFormat, SilenceExtractor,
};

/// Probe returning fixed durations keyed by file name, counting cache hints.
struct FixedProbe {
    durations: HashMap<String, f64>,
    cached_calls: AtomicUsize,
}

impl FixedProbe {
    fn new(durations: &[(&str, f64)]) -> Self {
        Self {
            durations: durations
                .iter()
                .map(|(name, secs)| (name.to_string(), *secs))
                .collect(),
            cached_calls: AtomicUsize::new(0),
        }
    }
}

impl DurationProbe for FixedProbe {
    fn duration_secs(&self, path: &Path, use_cache: bool) -> Result<f64, DatasetError> {
        if use_cache {
            self.cached_calls.fetch_add(1, Ordering::Relaxed);
        }
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.durations
            .get(&name)
            .copied()
            .ok_or_else(|| DatasetError::Extraction {
                file_id: name,
                reason: "no probed duration".to_string(),
            })
    }
}

/// Extractor whose samples encode the local offset, for placement checks.
struct RampExtractor {
    channels: usize,
}

impl AudioExtractor for RampExtractor {
    fn extract(
        &self,
        _file_id: &str,
        local_offset: u64,
        sample_length: u64,
    ) -> Result<SampleChunk, DatasetError> {
        let plane: Vec<f32> = (0..sample_length)
            .map(|i| (local_offset + i) as f32)
            .collect();
        SampleChunk::from_planes(vec![plane; self.channels])
    }
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

/// A taxonomy tree with two retained files and one too-short file.
fn fixture() -> (TempDir, FixedProbe) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(&root.join("bhairavi/bhairavi_raga/morning/long.wav"));
    touch(&root.join("bhairavi/malkauns/night/longer.wav"));
    touch(&root.join("kalyan/yaman/dusk/short.wav"));
    touch(&root.join("kalyan/yaman/dusk/notes.txt"));
    // At 10 Hz: 100, 200, and 20 samples respectively.
    let probe = FixedProbe::new(&[("long.wav", 10.0), ("longer.wav", 20.0), ("short.wav", 2.0)]);
    (dir, probe)
}

fn fixture_config(root: &Path) -> DatasetConfig {
    // Window of 8 samples at 10 Hz is 0.8s; keep files of 3s and up.
    DatasetConfig::new(root, 10, 2, 8).with_min_duration(3.0)
}

#[test]
fn scan_filters_probes_and_serves_examples_with_metadata() {
    let (dir, probe) = fixture();
    let records = CatalogBuilder::new(dir.path()).build().unwrap();
    let metadata = MetadataLookup::from_records(records);

    let dataset = Dataset::scan(
        fixture_config(dir.path()),
        &probe,
        metadata,
        Box::new(RampExtractor { channels: 2 }),
        None,
        1,
    )
    .unwrap();

    // short.wav (2s) dropped, notes.txt never enumerated.
    assert_eq!(dataset.entries().len(), 2);
    assert_eq!(dataset.len(), 300 / 8);

    let mut rng = StdRng::seed_from_u64(0);
    for item in 0..dataset.len() {
        let example = dataset.get_example(item, &mut rng).unwrap();
        assert_eq!(example.frames.len(), 8);
        assert_eq!(example.frames[0].len(), 2);
        assert_ne!(example.category, "unknown");
        assert!(example.sub_category_id >= 0);
        assert!(example.label.is_none());
        // Ramp samples start exactly at the local offset.
        let first = example.frames[0][0];
        let last = example.frames[7][0];
        assert_eq!(last - first, 7.0);
    }
}

#[test]
fn designated_worker_rank_passes_the_cache_hint() {
    let (dir, probe) = fixture();
    assert!(cache_affinity(0));
    let dataset = Dataset::scan(
        fixture_config(dir.path()),
        &probe,
        MetadataLookup::default(),
        Box::new(SilenceExtractor::new(2)),
        None,
        0,
    )
    .unwrap();
    assert!(!dataset.is_empty());
    // Every enumerated file was probed with the cache hint set.
    assert_eq!(probe.cached_calls.load(Ordering::Relaxed), 3);

    let (dir, probe) = fixture();
    assert!(!cache_affinity(5));
    Dataset::scan(
        fixture_config(dir.path()),
        &probe,
        MetadataLookup::default(),
        Box::new(SilenceExtractor::new(2)),
        None,
        5,
    )
    .unwrap();
    assert_eq!(probe.cached_calls.load(Ordering::Relaxed), 0);
}

#[test]
fn labeled_examples_carry_timing_and_class_vectors() {
    let (dir, probe) = fixture();
    let records = CatalogBuilder::new(dir.path()).build().unwrap();
    let metadata = MetadataLookup::from_records(records);

    let config = fixture_config(dir.path()).with_labeling(LabelingConfig {
        max_bow_genre_size: 1,
        n_tokens: 6,
        format: LabelFormat::V3,
    });
    let dataset = Dataset::scan(
        config,
        &probe,
        metadata,
        Box::new(SilenceExtractor::new(2)),
        None,
        0,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let example = dataset.get_example(0, &mut rng).unwrap();
    let label = example.label.expect("labeling enabled");
    assert_eq!(label.len(), 6);
    assert_eq!(label[0], example.sub_category_id);
    // Timing fields: duration, offset, window length.
    assert_eq!(label[3], 8);
    assert_eq!(label[4], -1);
}

#[test]
fn missing_audio_root_fails_construction() {
    let probe = FixedProbe::new(&[]);
    let result = Dataset::scan(
        fixture_config(Path::new("/definitely/not/here")),
        &probe,
        MetadataLookup::default(),
        Box::new(SilenceExtractor::new(2)),
        None,
        0,
    );
    assert!(matches!(result, Err(DatasetError::Configuration(_))));
}

#[test]
fn boundary_equality_between_window_and_min_duration_fails() {
    // 100 samples at 50 Hz is exactly the defaulted 2s minimum; strict
    // inequality is required.
    let (dir, probe) = fixture();
    let config = DatasetConfig::new(dir.path(), 50, 1, 100);
    let result = Dataset::scan(
        config,
        &probe,
        MetadataLookup::default(),
        Box::new(SilenceExtractor::new(1)),
        None,
        0,
    );
    assert!(matches!(result, Err(DatasetError::Configuration(_))));
}

/// Extractor that always fails, to verify unmodified propagation.
struct FailingExtractor;

impl AudioExtractor for FailingExtractor {
    fn extract(
        &self,
        file_id: &str,
        _local_offset: u64,
        _sample_length: u64,
    ) -> Result<SampleChunk, DatasetError> {
        Err(DatasetError::Extraction {
            file_id: file_id.to_string(),
            reason: "decoder exploded".to_string(),
        })
    }
}

#[test]
fn extraction_failures_propagate_unmodified() {
    let (dir, probe) = fixture();
    let dataset = Dataset::scan(
        fixture_config(dir.path()),
        &probe,
        MetadataLookup::default(),
        Box::new(FailingExtractor),
        None,
        0,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    match dataset.get_example(0, &mut rng) {
        Err(DatasetError::Extraction { reason, .. }) => {
            assert_eq!(reason, "decoder exploded");
        }
        other => panic!("expected extraction failure, got {other:?}"),
    }
}
