//! WAV encoder using hound
//!
//! Serializes a [`PcmBuffer`] to 16-bit PCM WAV at the buffer's own sample
//! rate and channel count. WAV is the one output container the service
//! produces; every decoded input funnels through here on its way back out.

use crate::audio::types::PcmBuffer;
use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Content type of encoded output.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// File extension of encoded output.
pub const WAV_EXTENSION: &str = "wav";

/// WAV encoder over hound.
pub struct WavEncoder;

impl WavEncoder {
    /// Encode a PCM buffer to a 16-bit WAV file at `path`.
    ///
    /// The file is created (truncated if present) and fully finalized; on
    /// error no usable artifact is promised at `path`.
    pub fn encode_file(buffer: &PcmBuffer, path: &Path) -> Result<()> {
        debug!(
            "encoding {} frames to {}",
            buffer.frame_count(),
            path.display()
        );

        let mut writer = hound::WavWriter::create(path, Self::spec_for(buffer))
            .map_err(|e| Error::Encoding(format!("failed to create WAV writer: {}", e)))?;

        Self::write_samples(&mut writer, buffer)?;

        writer
            .finalize()
            .map_err(|e| Error::Encoding(format!("failed to finalize WAV: {}", e)))
    }

    /// Encode a PCM buffer to 16-bit WAV bytes in memory.
    pub fn encode_bytes(buffer: &PcmBuffer) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, Self::spec_for(buffer))
                .map_err(|e| Error::Encoding(format!("failed to create WAV writer: {}", e)))?;

            Self::write_samples(&mut writer, buffer)?;

            writer
                .finalize()
                .map_err(|e| Error::Encoding(format!("failed to finalize WAV: {}", e)))?;
        }
        Ok(cursor.into_inner())
    }

    fn spec_for(buffer: &PcmBuffer) -> hound::WavSpec {
        hound::WavSpec {
            channels: buffer.channels,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn write_samples<W>(writer: &mut hound::WavWriter<W>, buffer: &PcmBuffer) -> Result<()>
    where
        W: std::io::Write + std::io::Seek,
    {
        for &sample in &buffer.samples {
            // Clamp out-of-range floats rather than letting them wrap
            let clamped = sample.clamp(-1.0, 1.0);
            let quantized = (clamped * i16::MAX as f32).round() as i16;
            writer
                .write_sample(quantized)
                .map_err(|e| Error::Encoding(format!("failed to write sample: {}", e)))?;
        }
        Ok(())
    }
}
