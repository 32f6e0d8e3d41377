//! Core audio data types
//!
//! Defines the decoded-sample representation used throughout the reversal
//! pipeline.

/// PcmBuffer holds decoded audio ready for reversal and re-encoding.
///
/// **Format:**
/// - Samples are f32 (floating point, nominally -1.0 to 1.0)
/// - Interleaved by frame: `[ch0, ch1, ..., ch0, ch1, ...]`
/// - Sample rate and channel count are carried from the source unchanged;
///   the pipeline never resamples or remixes
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    /// PCM audio samples, interleaved
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count (1 = mono, 2 = stereo, ...)
    pub channels: u16,
}

impl PcmBuffer {
    /// Create a new PcmBuffer from interleaved samples.
    ///
    /// # Panics
    /// Panics if `channels` is zero or `samples.len()` is not a multiple of
    /// the channel count. Both are decoder-adapter invariants; violating
    /// them here is a programming error, not a runtime condition.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        assert!(channels > 0, "PcmBuffer requires at least one channel");
        assert_eq!(
            samples.len() % channels as usize,
            0,
            "sample count must be a whole number of frames"
        );

        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Number of frames (one sample per channel per frame)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// True when the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.frame_count() as u64 * 1000) / self.sample_rate as u64
    }

    /// Get the frame at `frame_index` as a slice of per-channel samples
    pub fn frame(&self, frame_index: usize) -> Option<&[f32]> {
        let ch = self.channels as usize;
        let start = frame_index.checked_mul(ch)?;
        let end = start.checked_add(ch)?;
        self.samples.get(start..end)
    }
}
