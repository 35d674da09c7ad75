//! HTTP inbound adapter: form flows, page view models, and the
//! transcription demo.

pub mod auth;
pub mod dashboards;
pub mod error;
pub mod flash;
pub mod guard;
pub mod health;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transcribe;
