//! Frame-order reversal
//!
//! The reversal operates on decoded frames, never on encoded bytes:
//! reversing a compressed stream byte-wise desynchronizes frame boundaries
//! and corrupts playback for any codec with variable-length frames or
//! cross-frame prediction. Here the input is already uniform PCM, so
//! reversal is a pure reordering.

use crate::audio::types::PcmBuffer;

/// Reverse the frame order of a decoded buffer.
///
/// Frame `i` of the output equals frame `N - 1 - i` of the input. Sample
/// values, channel ordering within each frame, sample rate, and channel
/// count are unchanged. An empty buffer reverses to an empty buffer.
pub fn reverse(buffer: &PcmBuffer) -> PcmBuffer {
    let channels = buffer.channels as usize;

    let mut samples = Vec::with_capacity(buffer.samples.len());
    for frame in buffer.samples.chunks_exact(channels).rev() {
        samples.extend_from_slice(frame);
    }

    PcmBuffer::new(samples, buffer.sample_rate, buffer.channels)
}
