//! Request correlation identifier held in task-local storage.
//!
//! The tracing middleware opens a scope per request; errors and log events
//! read the active identifier through [`TraceId::current`]. Task-locals are
//! not inherited by spawned tasks, so wrap any spawned work in
//! [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static ACTIVE: TraceId;
}

/// Header carrying the trace identifier on requests and responses.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// UUID correlating a single request across logs and error payloads.
///
/// # Examples
/// ```
/// use portal::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::adopt_or_generate(Some("00000000-0000-0000-0000-000000000001"));
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied identifier when it is a well-formed UUID,
    /// otherwise mint a new one.
    #[must_use]
    pub fn adopt_or_generate(candidate: Option<&str>) -> Self {
        candidate
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the enclosing request scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the active identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
