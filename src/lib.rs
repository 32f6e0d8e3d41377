//! # Retrograde
//!
//! HTTP service that reverses uploaded audio.
//!
//! **Purpose:** Accept an audio file over multipart upload, decode it,
//! invert the frame order, re-encode as WAV, and return the result as a
//! download under a unique generated filename.
//!
//! **Architecture:** Axum HTTP front, symphonia decode / hound encode in a
//! blocking-thread pipeline, per-request scratch directories, SQLite for
//! the status check-in records.

pub mod api;
pub mod audio;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod storage;

pub use error::{Error, Result};
