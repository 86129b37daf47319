//! Reporter that emits formatted conditions as `tracing` events
//!
//! Errors are emitted at [`Level::ERROR`](tracing::Level::ERROR) and warnings
//! at [`Level::WARN`](tracing::Level::WARN), on the `tattle` target. Without
//! an explicit [`Dispatch`] the events go to whatever subscriber is current
//! for the reporting thread, which is normally the global default.

use std::fmt;
use std::sync::Arc;

use tracing::Dispatch;

use crate::condition::{Condition, Severity};
use crate::format::Formatters;
use crate::reporter::Reporter;

/// A reporter that logs each condition through `tracing`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tattle::{root, LoggingReporter, Reporter, ReporterExt};
///
/// let logger: Arc<dyn Reporter> = Arc::new(LoggingReporter::new(root()));
/// logger.report_warning("cache miss rate is high");
/// ```
pub struct LoggingReporter {
    dispatch: Option<Dispatch>,
    formatters: Formatters,
    child: Arc<dyn Reporter>,
}

impl LoggingReporter {
    /// Create a logging reporter using the default subscriber and wrapping
    /// `child`.
    pub fn new(child: Arc<dyn Reporter>) -> Self {
        LoggingReporter {
            dispatch: None,
            formatters: Formatters::new(),
            child,
        }
    }

    /// Send events to `dispatch` instead of the default subscriber.
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Use `formatters` to render conditions.
    pub fn formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    fn emit(&self, severity: Severity, text: &str) {
        match &self.dispatch {
            Some(dispatch) => {
                tracing::dispatcher::with_default(dispatch, || log_event(severity, text))
            }
            None => log_event(severity, text),
        }
    }
}

fn log_event(severity: Severity, text: &str) {
    match severity {
        Severity::Error => tracing::error!(target: "tattle", severity = %severity, "{}", text),
        Severity::Warning => tracing::warn!(target: "tattle", severity = %severity, "{}", text),
    }
}

impl Reporter for LoggingReporter {
    fn report(&self, condition: &Condition) {
        self.emit(condition.severity(), &self.formatters.format(condition));

        self.child.report(condition);
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        vec![Arc::clone(&self.child)]
    }
}

impl fmt::Debug for LoggingReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingReporter")
            .field("dispatch", &self.dispatch.is_some())
            .field("formatters", &self.formatters)
            .field("child", &self.child)
            .finish()
    }
}
