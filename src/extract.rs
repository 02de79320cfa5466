//! Audio extraction interface and sample buffer shapes.

use crate::errors::DatasetError;

/// Decoded audio for one window, stored channel-major.
///
/// Each plane holds one channel's samples; all planes have the same
/// length (the window's sample count).
#[derive(Clone, Debug, PartialEq)]
pub struct SampleChunk {
    planes: Vec<Vec<f32>>,
}

impl SampleChunk {
    /// Wrap channel planes, requiring at least one channel of equal lengths.
    pub fn from_planes(planes: Vec<Vec<f32>>) -> Result<Self, DatasetError> {
        let Some(first) = planes.first() else {
            return Err(DatasetError::Extraction {
                file_id: String::new(),
                reason: "chunk has no channels".to_string(),
            });
        };
        let frames = first.len();
        if planes.iter().any(|plane| plane.len() != frames) {
            return Err(DatasetError::Extraction {
                file_id: String::new(),
                reason: "channel planes have unequal lengths".to_string(),
            });
        }
        Ok(Self { planes })
    }

    /// Channel count.
    pub fn channel_count(&self) -> usize {
        self.planes.len()
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.planes.first().map(|plane| plane.len()).unwrap_or(0)
    }

    /// Check the chunk against the shape the dataset asked for.
    pub fn check_shape(
        &self,
        file_id: &str,
        channels: usize,
        sample_length: u64,
    ) -> Result<(), DatasetError> {
        if self.channel_count() != channels || self.frame_count() as u64 != sample_length {
            return Err(DatasetError::Extraction {
                file_id: file_id.to_string(),
                reason: format!(
                    "expected shape ({channels}, {sample_length}), got ({}, {})",
                    self.channel_count(),
                    self.frame_count()
                ),
            });
        }
        Ok(())
    }

    /// Transpose into frame-major rows: one `Vec<f32>` of channel values per frame.
    pub fn into_frames(self) -> Vec<Vec<f32>> {
        let frames = self.frame_count();
        let channels = self.channel_count();
        let mut rows = vec![vec![0.0f32; channels]; frames];
        for (channel, plane) in self.planes.into_iter().enumerate() {
            for (frame, value) in plane.into_iter().enumerate() {
                rows[frame][channel] = value;
            }
        }
        rows
    }
}

/// Decodes exactly `sample_length` samples from a file at a local offset.
///
/// Implementations own all decoding and I/O; failures propagate to the
/// caller unmodified, the core does not retry or mask them.
pub trait AudioExtractor: Send + Sync {
    /// Decode `sample_length` samples of `file_id` starting at `local_offset`.
    fn extract(
        &self,
        file_id: &str,
        local_offset: u64,
        sample_length: u64,
    ) -> Result<SampleChunk, DatasetError>;
}

/// Extractor returning silence, for tests and dry runs.
pub struct SilenceExtractor {
    channels: usize,
}

impl SilenceExtractor {
    /// Create a silence extractor with a fixed channel count.
    pub fn new(channels: usize) -> Self {
        Self { channels }
    }
}

impl AudioExtractor for SilenceExtractor {
    fn extract(
        &self,
        _file_id: &str,
        _local_offset: u64,
        sample_length: u64,
    ) -> Result<SampleChunk, DatasetError> {
        SampleChunk::from_planes(vec![vec![0.0; sample_length as usize]; self.channels])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_produces_frame_major_rows() {
        let chunk =
            SampleChunk::from_planes(vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]]).unwrap();
        assert_eq!(chunk.channel_count(), 2);
        assert_eq!(chunk.frame_count(), 3);
        let frames = chunk.into_frames();
        assert_eq!(frames, vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
        ]);
    }

    #[test]
    fn unequal_planes_are_rejected() {
        let result = SampleChunk::from_planes(vec![vec![1.0, 2.0], vec![1.0]]);
        assert!(matches!(result, Err(DatasetError::Extraction { .. })));
    }

    #[test]
    fn shape_check_flags_mismatches() {
        let chunk = SampleChunk::from_planes(vec![vec![0.0; 4]]).unwrap();
        assert!(chunk.check_shape("clip.wav", 1, 4).is_ok());
        assert!(chunk.check_shape("clip.wav", 2, 4).is_err());
        assert!(chunk.check_shape("clip.wav", 1, 8).is_err());
    }
}
