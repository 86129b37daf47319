//! Reporter that writes formatted conditions to a byte stream

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::condition::Condition;
use crate::format::Formatters;
use crate::reporter::Reporter;

/// A reporter that writes one line per condition to an [`io::Write`](Write)
/// destination.
///
/// Each condition is rendered with [`Formatters`] (by default `ERROR: <text>`
/// or `WARNING: <text>`) and written with a trailing newline. Write failures
/// are ignored; the condition is forwarded to the child either way.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tattle::{root, Reporter, ReporterExt, WritingReporter};
///
/// let writer = Arc::new(WritingReporter::new(Vec::new(), root()));
/// writer.report_error(std::fmt::Error);
/// writer.report_warning("disk almost full");
///
/// let output = writer.with_destination(|out| String::from_utf8(out.clone()).unwrap());
/// assert_eq!(
///     output,
///     "ERROR: an error occurred when formatting an argument\nWARNING: disk almost full\n"
/// );
/// ```
pub struct WritingReporter<W> {
    out: Mutex<W>,
    formatters: Formatters,
    child: Arc<dyn Reporter>,
}

impl<W> WritingReporter<W>
where
    W: Write + Send + 'static,
{
    /// Create a writing reporter emitting to `out` and wrapping `child`.
    pub fn new(out: W, child: Arc<dyn Reporter>) -> Self {
        WritingReporter {
            out: Mutex::new(out),
            formatters: Formatters::new(),
            child,
        }
    }

    /// Use `formatters` to render conditions.
    pub fn formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    /// Run `f` with exclusive access to the destination.
    pub fn with_destination<T>(&self, f: impl FnOnce(&mut W) -> T) -> T {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut out)
    }

    /// Consume the reporter, returning the destination.
    pub fn into_destination(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, text: &str) {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(line.as_bytes()) {
            tracing::debug!(target: "tattle::writing", error = %err, "failed to write report");
        }
    }
}

impl<W> Reporter for WritingReporter<W>
where
    W: Write + Send + 'static,
{
    fn report(&self, condition: &Condition) {
        self.emit(&self.formatters.format(condition));

        self.child.report(condition);
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        vec![Arc::clone(&self.child)]
    }
}

impl<W> fmt::Debug for WritingReporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WritingReporter")
            .field("formatters", &self.formatters)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}
