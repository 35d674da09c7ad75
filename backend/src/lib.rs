//! Patient/doctor portal backend.
//!
//! Hexagonal layout: [`domain`] holds types, use-cases, and ports;
//! [`inbound`] adapts HTTP requests onto them; [`outbound`] implements the
//! ports against SQLite and the transcription service; [`server`] wires the
//! pieces into an actix-web application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
