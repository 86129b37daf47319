//! Reporter that retains reported conditions
//!
//! [`CapturingReporter`] keeps every condition it sees, optionally bounded by
//! [`max_captured`](CapturingReporter::max_captured). When the buffer is full
//! the overflow policy decides what is kept:
//!
//! | Policy           | Buffer before | Reported | Buffer after |
//! |------------------|---------------|----------|--------------|
//! | discard oldest   | `[a, b, c]`   | `d`      | `[b, c, d]`  |
//! | discard newest   | `[a, b, c]`   | `d`      | `[a, b, c]`  |
//!
//! Either way the new condition is still forwarded to the child.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::condition::Condition;
use crate::reporter::{all_same, Reporter};

/// What to drop when a bounded capture buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Drop the oldest captured condition to make room for the new one.
    DiscardOldest,
    /// Keep the buffer as it is and do not retain the new condition.
    DiscardNewest,
}

impl Overflow {
    fn from_discard_oldest(discard_oldest: bool) -> Self {
        if discard_oldest {
            Overflow::DiscardOldest
        } else {
            Overflow::DiscardNewest
        }
    }
}

/// A reporter that captures the conditions reported through it.
///
/// # Example
///
/// ```rust
/// use tattle::{root, CapturingReporter, Condition, Reporter};
///
/// let capture = CapturingReporter::new(root()).max_captured(2, true);
/// let (a, b, c) = (Condition::msg("a"), Condition::msg("b"), Condition::msg("c"));
/// for condition in [&a, &b, &c] {
///     capture.report(condition);
/// }
///
/// assert_eq!(capture.list(), vec![b, c]);
/// ```
#[derive(Debug)]
pub struct CapturingReporter {
    captured: Mutex<VecDeque<Condition>>,
    max: usize,
    overflow: Overflow,
    child: Arc<dyn Reporter>,
}

impl CapturingReporter {
    /// Create an unbounded capturing reporter wrapping `child`.
    pub fn new(child: Arc<dyn Reporter>) -> Self {
        CapturingReporter {
            captured: Mutex::new(VecDeque::new()),
            max: 0,
            overflow: Overflow::DiscardNewest,
            child,
        }
    }

    /// Retain at most `count` conditions.
    ///
    /// When full, `discard_oldest` drops the oldest condition to make room;
    /// otherwise new conditions are not retained. A `count` of zero means no
    /// limit.
    pub fn max_captured(mut self, count: usize, discard_oldest: bool) -> Self {
        self.max = count;
        self.overflow = Overflow::from_discard_oldest(discard_oldest);
        self
    }

    /// The configured capacity, or `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        (self.max > 0).then_some(self.max)
    }

    /// The configured overflow policy.
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// A snapshot of the captured conditions, oldest first.
    pub fn list(&self) -> Vec<Condition> {
        self.lock().iter().cloned().collect()
    }

    /// Number of conditions currently captured.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is captured.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Condition>> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn capture(&self, condition: &Condition) {
        let mut captured = self.lock();

        if self.max == 0 || captured.len() < self.max {
            captured.push_back(condition.clone());
            return;
        }

        if self.overflow == Overflow::DiscardOldest {
            while captured.len() >= self.max {
                captured.pop_front();
            }
            captured.push_back(condition.clone());
        }
    }
}

impl Reporter for CapturingReporter {
    fn report(&self, condition: &Condition) {
        self.capture(condition);

        self.child.report(condition);
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        vec![Arc::clone(&self.child)]
    }

    fn same_as(&self, other: &dyn Reporter) -> bool {
        match other.as_any().downcast_ref::<CapturingReporter>() {
            Some(other) if std::ptr::eq(self, other) => true,
            Some(other) => {
                self.max == other.max
                    && self.overflow == other.overflow
                    && self.list() == other.list()
                    && all_same(&self.children(), &other.children())
            }
            None => false,
        }
    }
}
