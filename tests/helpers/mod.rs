//! Test helper modules for retrograde integration tests

pub mod audio_generator;
