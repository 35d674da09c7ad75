//! Transcription service outbound adapter.
//!
//! Thin HTTP implementation of the `TranscriptionSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_TRANSCRIPTION_TIMEOUT, TranscriptionHttpSource};
