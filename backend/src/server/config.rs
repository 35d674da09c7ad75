//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use crate::inbound::http::session_config::SessionSettings;

/// Everything the listener and its middleware need besides handler state.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session: SessionSettings,
    pub(crate) session_ttl: Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, session: SessionSettings, session_ttl: Duration) -> Self {
        Self {
            bind_addr,
            session,
            session_ttl,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}
