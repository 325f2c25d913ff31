//! Error types surfaced by the event registry.
//!
//! The registry treats most "nothing to do" situations as states rather than
//! errors: adding a duplicate listener, removing a listener that was never
//! registered, invoking a type with no channel, and pruning an expired owner
//! are all silent no-ops. The one thing that is reported is a listener
//! panicking while an event is being delivered — the panic is caught so the
//! remaining listeners still run, and the failures are aggregated into an
//! [`InvokeError`] returned to the publisher.
//!
//! [`InvokeError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics, matching the rest of the crate's diagnostics.

use std::any::Any;

use thiserror::Error;

/// # Errors produced while delivering an event.
///
/// Returned by [`EventRegistry::invoke`](crate::EventRegistry::invoke) when
/// one or more listeners panicked. Delivery itself still completed: every
/// listener that did not panic was called exactly once.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InvokeError {
    /// One or more listeners panicked while the event was being delivered.
    #[error("{failed} of {total} listeners for {event} panicked")]
    ListenerPanicked {
        /// Label of the payload type that was being delivered.
        event: &'static str,
        /// Number of listeners that panicked.
        failed: usize,
        /// Number of listeners that were invoked.
        total: usize,
        /// Rendered panic payloads, in invocation order.
        panics: Vec<String>,
    },
}

impl InvokeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::InvokeError;
    ///
    /// let err = InvokeError::ListenerPanicked {
    ///     event: "Tick",
    ///     failed: 1,
    ///     total: 3,
    ///     panics: vec!["boom".into()],
    /// };
    /// assert_eq!(err.as_label(), "invoke_listener_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            InvokeError::ListenerPanicked { .. } => "invoke_listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            InvokeError::ListenerPanicked {
                event,
                failed,
                total,
                panics,
            } => {
                format!("{failed}/{total} listeners for {event} panicked: {panics:?}")
            }
        }
    }
}

/// Renders a caught panic payload for logs and [`InvokeError`].
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_includes_counts_and_payloads() {
        let err = InvokeError::ListenerPanicked {
            event: "Damage",
            failed: 2,
            total: 5,
            panics: vec!["a".into(), "b".into()],
        };
        let msg = err.as_message();
        assert!(msg.contains("2/5"));
        assert!(msg.contains("Damage"));
        assert!(msg.contains('a') && msg.contains('b'));
    }

    #[test]
    fn test_panic_message_renders_common_payloads() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42_u32)), "non-string panic payload");
    }
}
