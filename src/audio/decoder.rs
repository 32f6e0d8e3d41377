//! Audio decoder using symphonia
//!
//! Decodes uploaded audio (MP3, FLAC, AAC/M4A, Vorbis, WAV/PCM) into a
//! uniform [`PcmBuffer`] of interleaved f32 samples.
//!
//! This is the only module that touches the codec library. All symphonia
//! error conditions are normalized here: an unrecognized byte stream is
//! `UnsupportedFormat`, a recognized container that cannot be fully decoded
//! is `CorruptInput`. The adapter is deliberately strict: a packet that
//! fails to decode, or a stream that ends short of the length the container
//! declares, aborts the whole decode. Best-effort partial output would let
//! a truncated upload round-trip into a silently shortened artifact.
//!
//! Channel layout and sample rate pass through untouched: no mono upmix,
//! no resampling. Whatever layout the source declares is what the reversal
//! engine and encoder see.

use crate::audio::types::PcmBuffer;
use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::debug;

/// Audio decoder adapter over symphonia.
pub struct AudioDecoder;

impl AudioDecoder {
    /// Decode an audio file to PCM samples.
    ///
    /// The file extension, when present, is passed to the format prober as
    /// a hint; probing still inspects the content, so a wrong extension on
    /// a valid file decodes fine and a right extension on garbage does not.
    pub fn decode_file(path: &Path) -> Result<PcmBuffer> {
        debug!("decoding file: {}", path.display());

        let file = std::fs::File::open(path)?;

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        Self::decode_stream(mss, hint)
    }

    /// Decode an in-memory audio byte stream to PCM samples.
    ///
    /// `extension_hint` is the container hint (a file extension such as
    /// `"mp3"`), if the caller has one.
    pub fn decode_bytes(data: Vec<u8>, extension_hint: Option<&str>) -> Result<PcmBuffer> {
        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());
        Self::decode_stream(mss, hint)
    }

    fn decode_stream(mss: MediaSourceStream, hint: Hint) -> Result<PcmBuffer> {
        // Probe the stream to identify the container format
        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::UnsupportedFormat(format!("not recognized as audio: {}", e)))?;

        let mut format = probed.format;

        // First track with a real codec
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::UnsupportedFormat("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| Error::CorruptInput("stream declares no sample rate".to_string()))?;

        let channels = codec_params
            .channels
            .map(|c| c.count())
            .ok_or_else(|| Error::CorruptInput("stream declares no channel layout".to_string()))?;

        if channels == 0 || channels > u16::MAX as usize {
            return Err(Error::CorruptInput(format!(
                "implausible channel count: {}",
                channels
            )));
        }

        if sample_rate == 0 {
            return Err(Error::CorruptInput(
                "implausible sample rate: 0 Hz".to_string(),
            ));
        }

        // Frame count the container claims, when it claims one (WAV, FLAC).
        // Used below to catch truncated streams that otherwise end cleanly.
        let declared_frames = codec_params.n_frames;

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| Error::UnsupportedFormat(format!("codec not supported: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                // Symphonia signals normal end of stream with this exact
                // I/O error; anything else mid-stream is damage.
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof
                        && e.to_string() == "end of stream" =>
                {
                    break;
                }
                Err(SymphoniaError::IoError(e)) => {
                    return Err(Error::CorruptInput(format!("stream read failed: {}", e)));
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    return Err(Error::CorruptInput(format!("malformed packet: {}", e)));
                }
                Err(SymphoniaError::ResetRequired) => {
                    return Err(Error::CorruptInput(
                        "unexpected mid-stream discontinuity".to_string(),
                    ));
                }
                Err(e) => {
                    return Err(Error::CorruptInput(format!("demux failed: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => Self::append_frames(&decoded, &mut samples),
                Err(e) => {
                    return Err(Error::CorruptInput(format!(
                        "packet failed to decode: {}",
                        e
                    )));
                }
            }
        }

        if samples.len() % channels != 0 {
            return Err(Error::CorruptInput(
                "channel layout changed mid-stream".to_string(),
            ));
        }

        let frame_count = (samples.len() / channels) as u64;
        if let Some(declared) = declared_frames {
            if frame_count < declared {
                return Err(Error::CorruptInput(format!(
                    "stream ended early: decoded {} of {} declared frames",
                    frame_count, declared
                )));
            }
        }

        debug!(
            "decoded {} frames, {} Hz, {} channel(s)",
            frame_count, sample_rate, channels
        );

        Ok(PcmBuffer::new(samples, sample_rate, channels as u16))
    }

    /// Append one decoded packet's frames to the output, interleaved,
    /// converted to f32.
    fn append_frames(decoded: &AudioBufferRef, samples: &mut Vec<f32>) {
        match decoded {
            AudioBufferRef::U8(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::U16(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::U24(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::U32(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::S8(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::S16(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::S24(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::S32(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::F32(buf) => Self::append_planar(buf, samples),
            AudioBufferRef::F64(buf) => Self::append_planar(buf, samples),
        }
    }

    /// Interleave one planar packet buffer into the sample vector,
    /// normalizing to f32 via symphonia's sample conversions.
    fn append_planar<S>(buf: &AudioBuffer<S>, samples: &mut Vec<f32>)
    where
        S: Sample,
        f32: FromSample<S>,
    {
        let channels = buf.spec().channels.count();
        let frames = buf.frames();

        samples.reserve(frames * channels);
        for frame_idx in 0..frames {
            for ch in 0..channels {
                samples.push(f32::from_sample(buf.chan(ch)[frame_idx]));
            }
        }
    }
}
