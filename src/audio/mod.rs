//! Audio processing: decode, reverse, encode
//!
//! The transformation core of the service. [`decoder`] turns any supported
//! upload into a [`types::PcmBuffer`], [`reverse`] flips its frame order,
//! and [`encoder`] serializes the result as 16-bit WAV. Everything here is
//! synchronous and CPU-bound; callers run it on a blocking thread.

pub mod decoder;
pub mod encoder;
pub mod reverse;
pub mod types;

pub use decoder::AudioDecoder;
pub use encoder::{WavEncoder, WAV_CONTENT_TYPE, WAV_EXTENSION};
pub use types::PcmBuffer;
