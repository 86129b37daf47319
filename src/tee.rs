//! Reporter that fans out to several children
//!
//! Membership can change at any time. A single lock guards the member list,
//! so a report in progress always sees the membership as it was when the
//! report began, and `add`/`remove` never interleave with a report.
//!
//! `remove` compares members outside the lock, so a tee that contains itself
//! can still be edited. Reporting through such a tee deadlocks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::condition::Condition;
use crate::reporter::{all_same, Reporter};

/// A reporter that forwards every condition to each of its children, in
/// order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tattle::{root, CapturingReporter, CountingReporter, Reporter, ReporterExt, TeeReporter};
///
/// let counter = Arc::new(CountingReporter::new(root()));
/// let capture = Arc::new(CapturingReporter::new(root()));
///
/// let tee = TeeReporter::new([counter.clone() as Arc<dyn Reporter>]);
/// tee.add([capture.clone() as Arc<dyn Reporter>]);
///
/// tee.report_error(std::fmt::Error);
/// assert_eq!(counter.errors(), 1);
/// assert_eq!(capture.len(), 1);
///
/// tee.remove([capture.clone() as Arc<dyn Reporter>]);
/// assert_eq!(tee.children().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TeeReporter {
    members: Mutex<Vec<Arc<dyn Reporter>>>,
}

impl TeeReporter {
    /// Create a tee with the given initial children.
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Reporter>>,
    {
        TeeReporter {
            members: Mutex::new(members.into_iter().collect()),
        }
    }

    /// Append reporters to the tee.
    pub fn add<I>(&self, reporters: I)
    where
        I: IntoIterator<Item = Arc<dyn Reporter>>,
    {
        self.lock().extend(reporters);
    }

    /// Remove every member equal (per [`Reporter::same_as`]) to any of
    /// `reporters`. The remaining members keep their order.
    pub fn remove<I>(&self, reporters: I)
    where
        I: IntoIterator<Item = Arc<dyn Reporter>>,
    {
        let doomed: Vec<Arc<dyn Reporter>> = reporters.into_iter().collect();
        if doomed.is_empty() {
            return;
        }

        // Compare against a snapshot; `same_as` may lock this tee again.
        let matched: HashSet<usize> = self
            .children()
            .iter()
            .filter(|member| doomed.iter().any(|reporter| member.same_as(&**reporter)))
            .map(address)
            .collect();
        if matched.is_empty() {
            return;
        }

        self.lock()
            .retain(|member| !matched.contains(&address(member)));
    }

    /// Number of current members.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the tee has no members.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Reporter>>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn address(reporter: &Arc<dyn Reporter>) -> usize {
    Arc::as_ptr(reporter) as *const () as usize
}

impl Reporter for TeeReporter {
    fn report(&self, condition: &Condition) {
        for member in self.lock().iter() {
            member.report(condition);
        }
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        self.lock().clone()
    }

    fn same_as(&self, other: &dyn Reporter) -> bool {
        match other.as_any().downcast_ref::<TeeReporter>() {
            Some(other) if std::ptr::eq(self, other) => true,
            Some(other) => all_same(&self.children(), &other.children()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::{is_root, root, RootReporter};
    use crate::testing::MockReporter;

    fn mocks(count: usize) -> Vec<Arc<MockReporter>> {
        (0..count).map(|_| Arc::new(MockReporter::new())).collect()
    }

    fn as_dyn(mocks: &[Arc<MockReporter>]) -> Vec<Arc<dyn Reporter>> {
        mocks
            .iter()
            .map(|mock| Arc::clone(mock) as Arc<dyn Reporter>)
            .collect()
    }

    #[test]
    fn new_keeps_members_in_order() {
        let members = as_dyn(&mocks(3));
        let tee = TeeReporter::new(members.clone());

        let children = tee.children();
        assert_eq!(children.len(), 3);
        for (child, member) in children.iter().zip(&members) {
            assert!(Arc::ptr_eq(child, member));
        }
    }

    #[test]
    fn report_reaches_every_member() {
        let members = mocks(3);
        let tee = TeeReporter::new(as_dyn(&members));
        let err = Condition::msg("boom");

        tee.report(&err);

        for member in &members {
            assert_eq!(member.reported(), vec![err.clone()]);
        }
    }

    #[test]
    fn empty_tee_report_is_noop() {
        let tee = TeeReporter::default();

        tee.report(&Condition::msg("nobody listens"));

        assert!(tee.is_empty());
    }

    #[test]
    fn add_then_report_reaches_new_member() {
        let tee = TeeReporter::new([root()]);
        let late = Arc::new(MockReporter::new());

        tee.add([late.clone() as Arc<dyn Reporter>]);
        tee.report(&Condition::msg("hello"));

        assert_eq!(tee.len(), 2);
        assert_eq!(late.reported().len(), 1);
    }

    #[test]
    fn remove_drops_structurally_equal_members() {
        let members = mocks(2);
        let tee = TeeReporter::new([
            Arc::clone(&members[0]) as Arc<dyn Reporter>,
            Arc::new(RootReporter) as Arc<dyn Reporter>,
            Arc::clone(&members[1]) as Arc<dyn Reporter>,
        ]);

        tee.remove([Arc::new(RootReporter) as Arc<dyn Reporter>]);

        let children = tee.children();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(&children[0], &(Arc::clone(&members[0]) as Arc<dyn Reporter>)));
        assert!(Arc::ptr_eq(&children[1], &(Arc::clone(&members[1]) as Arc<dyn Reporter>)));
    }

    #[test]
    fn remove_several_at_once() {
        let members = as_dyn(&mocks(4));
        let tee = TeeReporter::new(members.clone());

        tee.remove([members[0].clone(), members[2].clone()]);

        let children = tee.children();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(&children[0], &members[1]));
        assert!(Arc::ptr_eq(&children[1], &members[3]));
    }

    #[test]
    fn remove_after_add_leaves_nothing_equal() {
        let tee = TeeReporter::new([root()]);
        let extra = Arc::new(MockReporter::new()) as Arc<dyn Reporter>;

        tee.add([extra.clone(), extra.clone()]);
        tee.remove([extra.clone()]);

        assert!(tee.children().iter().all(|child| !child.same_as(&*extra)));
        assert_eq!(tee.len(), 1);
    }

    #[test]
    fn remove_from_self_containing_tee() {
        let tee = Arc::new(TeeReporter::new([root()]));
        let as_member = Arc::clone(&tee) as Arc<dyn Reporter>;
        tee.add([as_member.clone()]);

        // Comparing against another tee walks this tee's own children
        tee.remove([Arc::new(TeeReporter::new([root()])) as Arc<dyn Reporter>]);
        assert_eq!(tee.len(), 2);

        tee.remove([as_member]);
        assert_eq!(tee.len(), 1);
        assert!(is_root(&tee.children()[0]));
    }

    #[test]
    fn remove_with_nothing_is_noop() {
        let tee = TeeReporter::new([root()]);

        tee.remove(Vec::new());

        assert_eq!(tee.len(), 1);
    }

    #[test]
    fn structural_equality() {
        let a = TeeReporter::new([root()]);
        let b = TeeReporter::new([Arc::new(RootReporter) as Arc<dyn Reporter>]);
        assert!(a.same_as(&b));
        assert!(a.same_as(&a));

        b.add([root()]);
        assert!(!a.same_as(&b));
    }

    #[test]
    fn concurrent_membership_changes_and_reports() {
        let tee = Arc::new(TeeReporter::new([root()]));
        let mock = Arc::new(MockReporter::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tee = Arc::clone(&tee);
                let mock = Arc::clone(&mock) as Arc<dyn Reporter>;
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        tee.add([mock.clone()]);
                        tee.report(&Condition::msg("tick"));
                        tee.remove([mock.clone()]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tee.len(), 1);
        assert!(tee.children().iter().all(|child| !child.same_as(&*mock)));
    }
}
