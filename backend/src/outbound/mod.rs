//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed account store using Diesel
//! - **transcription**: HTTP client for the speech-to-text service
//!
//! Adapters translate between domain types and infrastructure
//! representations; they contain no business logic.

pub mod persistence;
pub mod transcription;
