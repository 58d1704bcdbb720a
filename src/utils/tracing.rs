//! Span and audit helpers shared by the services.

use tracing::Span;

/// Log an audit event at INFO level
///
/// Used for data modifications: upserts, deletions and link changes.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}

/// Record a successful operation on the current span
pub fn record_success() {
    Span::current().record("otel.status_code", "OK");
}

/// Record a failed operation on the current span with an error message
pub fn record_error(message: &str) {
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_success() {
        // No span is active; recording must be a no-op.
        record_success();
    }

    #[test]
    fn test_record_error() {
        record_error("test error");
    }
}
