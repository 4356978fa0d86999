//! HTTP handlers for the audio relay service.

pub mod api;
pub mod streaming;

pub use api::{audio_info, liveness};
pub use streaming::stream_audio;
