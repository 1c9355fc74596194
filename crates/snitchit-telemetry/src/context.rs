//! Span helpers for a single CLI invocation.

use tracing::{Span, span::EnteredSpan};

use crate::init::build_sha;

/// Keeps the per-command span entered until dropped.
pub struct CommandSpanGuard {
    _guard: EnteredSpan,
}

impl CommandSpanGuard {
    /// Enter a `command` span tagged with the action label and build SHA.
    #[must_use]
    pub fn enter(action: &str) -> Self {
        let span = tracing::info_span!(
            "command",
            action = %action,
            build_sha = %build_sha(),
            token = tracing::field::Empty,
        );
        Self {
            _guard: span.entered(),
        }
    }
}

/// Record the snitch token on the active command span.
///
/// No-op outside a [`CommandSpanGuard`].
pub fn record_token(token: &str) {
    Span::current().record("token", tracing::field::display(token));
}
