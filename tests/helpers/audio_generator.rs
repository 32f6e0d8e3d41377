//! Audio test fixture generation
//!
//! Generates deterministic in-memory WAV uploads with known characteristics,
//! so tests can assert exact frame counts and frame values after a trip
//! through the reversal pipeline.
//!
//! Amplitudes at or below 0.49 survive the 16-bit decode/encode round trip
//! exactly (the quantization error stays under half a step), which is what
//! makes frame-for-frame equality assertions possible.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::io::Cursor;

/// Standard test sample rate (44.1 kHz)
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Generate a stereo 44.1 kHz sine-wave WAV as in-memory bytes.
///
/// # Arguments
/// * `duration_ms` - Duration in milliseconds
/// * `frequency_hz` - Sine frequency in Hz (e.g., 440.0 for A4)
/// * `amplitude` - Amplitude 0.0-1.0 (keep ≤ 0.49 for exact round trips)
pub fn sine_wav_bytes(duration_ms: u64, frequency_hz: f32, amplitude: f32) -> Vec<u8> {
    sine_wav_bytes_with_spec(duration_ms, frequency_hz, amplitude, TEST_SAMPLE_RATE, 2)
}

/// Generate a sine-wave WAV with explicit sample rate and channel count.
pub fn sine_wav_bytes_with_spec(
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
    sample_rate: u32,
    channels: u16,
) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("create WAV writer");

        let total_frames = (sample_rate as u64 * duration_ms) / 1000;
        let amplitude_i16 = (amplitude * i16::MAX as f32) as i16;

        for frame_idx in 0..total_frames {
            let t = frame_idx as f32 / sample_rate as f32;
            let sample_value = (2.0 * PI * frequency_hz * t).sin();
            let sample_i16 = (sample_value * amplitude_i16 as f32) as i16;

            // Same value on every channel
            for _ in 0..channels {
                writer.write_sample(sample_i16).expect("write sample");
            }
        }

        writer.finalize().expect("finalize WAV");
    }
    cursor.into_inner()
}

/// Calculate exact frame count for a duration at the standard test rate.
pub fn calculate_frame_count(duration_ms: u64) -> u64 {
    (TEST_SAMPLE_RATE as u64 * duration_ms) / 1000
}
