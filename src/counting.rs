//! Reporter that counts errors and warnings

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::condition::Condition;
use crate::reporter::{all_same, Reporter};

/// A reporter that counts the errors and warnings passing through it.
///
/// Counts are kept in atomics, so any number of threads may report and read
/// concurrently without further locking.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tattle::{find, root, CountingReporter, Reporter, ReporterExt};
///
/// let outer: Arc<dyn Reporter> = Arc::new(CountingReporter::new(root()));
/// outer.report_error(std::fmt::Error);
/// outer.report_warning("low memory");
/// outer.report_warning("slow disk");
///
/// let counter = find::<CountingReporter>(&outer).unwrap();
/// assert_eq!(counter.errors(), 1);
/// assert_eq!(counter.warnings(), 2);
/// ```
#[derive(Debug)]
pub struct CountingReporter {
    errors: AtomicUsize,
    warnings: AtomicUsize,
    child: Arc<dyn Reporter>,
}

impl CountingReporter {
    /// Create a counting reporter wrapping `child`.
    pub fn new(child: Arc<dyn Reporter>) -> Self {
        CountingReporter {
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
            child,
        }
    }

    /// Number of errors reported so far.
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Number of warnings reported so far.
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }
}

impl Reporter for CountingReporter {
    fn report(&self, condition: &Condition) {
        if condition.is_warning() {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        } else {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        self.child.report(condition);
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        vec![Arc::clone(&self.child)]
    }

    fn same_as(&self, other: &dyn Reporter) -> bool {
        match other.as_any().downcast_ref::<CountingReporter>() {
            Some(other) => {
                self.errors() == other.errors()
                    && self.warnings() == other.warnings()
                    && all_same(&self.children(), &other.children())
            }
            None => false,
        }
    }
}
