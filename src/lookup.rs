//! Finding a particular reporter inside a chain
//!
//! Reporters only know their children, so a caller holding the outermost
//! reporter cannot directly reach, say, the [`CountingReporter`] it installed
//! further down. [`find`] searches the tree breadth-first and returns the
//! shallowest reporter of the requested type; among reporters at the same
//! depth the one reached first through [`Reporter::children`] order wins.
//!
//! The requested type is a type parameter, so asking for something that can
//! never be a reporter is rejected at compile time rather than at run time.
//!
//! [`CountingReporter`]: crate::CountingReporter
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tattle::{find, find_as, root, CapturingReporter, CountingReporter, Reporter, WritingReporter};
//!
//! let counting: Arc<dyn Reporter> = Arc::new(CountingReporter::new(root()));
//! let outer: Arc<dyn Reporter> = Arc::new(WritingReporter::new(std::io::sink(), counting.clone()));
//!
//! let found = find::<CountingReporter>(&outer).unwrap();
//! assert!(Arc::ptr_eq(&(found as Arc<dyn Reporter>), &counting));
//!
//! let mut slot: Option<Arc<CapturingReporter>> = None;
//! assert!(!find_as(&outer, &mut slot));
//! assert!(slot.is_none());
//! ```

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::reporter::Reporter;

/// Breadth-first iterator over a reporter tree.
///
/// Created by [`walk`]. A reporter reachable along several paths is yielded
/// once, at its shallowest position.
#[derive(Debug)]
pub struct Walk {
    queue: VecDeque<Arc<dyn Reporter>>,
    seen: HashSet<usize>,
}

impl Iterator for Walk {
    type Item = Arc<dyn Reporter>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(reporter) = self.queue.pop_front() {
            if !self.seen.insert(address(&reporter)) {
                continue;
            }

            self.queue.extend(reporter.children());
            return Some(reporter);
        }

        None
    }
}

fn address(reporter: &Arc<dyn Reporter>) -> usize {
    Arc::as_ptr(reporter) as *const () as usize
}

/// Iterate over `start` and every reporter beneath it, breadth-first.
///
/// ```
/// use std::sync::Arc;
/// use tattle::{root, walk, CountingReporter, Reporter, TeeReporter};
///
/// let left: Arc<dyn Reporter> = Arc::new(CountingReporter::new(root()));
/// let tee: Arc<dyn Reporter> = Arc::new(TeeReporter::new([left, root()]));
///
/// // tee, counting, root: the shared root is visited once
/// assert_eq!(walk(&tee).count(), 3);
/// ```
pub fn walk(start: &Arc<dyn Reporter>) -> Walk {
    Walk {
        queue: VecDeque::from([Arc::clone(start)]),
        seen: HashSet::new(),
    }
}

/// Find the shallowest reporter of type `R` in the tree rooted at `start`.
pub fn find<R: Reporter>(start: &Arc<dyn Reporter>) -> Option<Arc<R>> {
    walk(start).find_map(|reporter| reporter.into_any_arc().downcast::<R>().ok())
}

/// Find the shallowest reporter of type `R` and store it in `target`.
///
/// Returns true on success. On failure `target` is left untouched.
pub fn find_as<R: Reporter>(start: &Arc<dyn Reporter>, target: &mut Option<Arc<R>>) -> bool {
    match find::<R>(start) {
        Some(found) => {
            *target = Some(found);
            true
        }
        None => false,
    }
}

/// Find the shallowest reporter accepted by `predicate`.
///
/// Useful when the wanted shape is not a single concrete type, for instance
/// any of several generic instantiations of [`WritingReporter`].
///
/// [`WritingReporter`]: crate::WritingReporter
pub fn find_by<F>(start: &Arc<dyn Reporter>, mut predicate: F) -> Option<Arc<dyn Reporter>>
where
    F: FnMut(&dyn Reporter) -> bool,
{
    walk(start).find(|reporter| predicate(&**reporter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capturing::CapturingReporter;
    use crate::counting::CountingReporter;
    use crate::root::{root, RootReporter};
    use crate::tee::TeeReporter;
    use crate::testing::MockReporter;

    fn dyn_arc<R: Reporter>(reporter: R) -> Arc<dyn Reporter> {
        Arc::new(reporter)
    }

    #[test]
    fn finds_root_through_mock() {
        let parent = root();
        let mock = dyn_arc(MockReporter::new().with_children(vec![parent.clone()]));

        let mut target: Option<Arc<RootReporter>> = None;
        assert!(find_as(&mock, &mut target));

        let found = target.unwrap() as Arc<dyn Reporter>;
        assert!(Arc::ptr_eq(&found, &parent));
    }

    #[test]
    fn not_found_leaves_target_untouched() {
        let mock = dyn_arc(MockReporter::new());
        let original = Arc::new(CountingReporter::new(root()));

        let mut target = Some(Arc::clone(&original));
        assert!(!find_as(&mock, &mut target));
        assert!(Arc::ptr_eq(target.as_ref().unwrap(), &original));
    }

    #[test]
    fn start_itself_can_match() {
        let counting = Arc::new(CountingReporter::new(root()));
        let start = Arc::clone(&counting) as Arc<dyn Reporter>;

        let found = find::<CountingReporter>(&start).unwrap();
        assert!(Arc::ptr_eq(&found, &counting));
    }

    #[test]
    fn shallowest_match_wins() {
        let deep = Arc::new(CountingReporter::new(root()));
        let shallow = Arc::new(CountingReporter::new(dyn_arc(CapturingReporter::new(
            Arc::clone(&deep) as Arc<dyn Reporter>,
        ))));
        let outer = dyn_arc(CapturingReporter::new(Arc::clone(&shallow) as Arc<dyn Reporter>));

        let found = find::<CountingReporter>(&outer).unwrap();
        assert!(Arc::ptr_eq(&found, &shallow));
    }

    #[test]
    fn breadth_beats_child_order_depth() {
        // First branch hides a counter two levels down; second branch has one
        // directly beneath the tee.
        let deep = Arc::new(CountingReporter::new(root()));
        let near = Arc::new(CountingReporter::new(root()));
        let tee = dyn_arc(TeeReporter::new([
            dyn_arc(CapturingReporter::new(Arc::clone(&deep) as Arc<dyn Reporter>)),
            Arc::clone(&near) as Arc<dyn Reporter>,
        ]));

        let found = find::<CountingReporter>(&tee).unwrap();
        assert!(Arc::ptr_eq(&found, &near));
    }

    #[test]
    fn sibling_order_breaks_ties() {
        let first = Arc::new(CountingReporter::new(root()));
        let second = Arc::new(CountingReporter::new(root()));
        let tee = dyn_arc(TeeReporter::new([
            Arc::clone(&first) as Arc<dyn Reporter>,
            Arc::clone(&second) as Arc<dyn Reporter>,
        ]));

        let found = find::<CountingReporter>(&tee).unwrap();
        assert!(Arc::ptr_eq(&found, &first));
    }

    #[test]
    fn walk_is_breadth_first() {
        let a = dyn_arc(MockReporter::new().with_children(vec![root()]));
        let b = dyn_arc(MockReporter::new().with_children(vec![todo_root()]));
        let tee = dyn_arc(TeeReporter::new([a.clone(), b.clone()]));

        let order: Vec<Arc<dyn Reporter>> = walk(&tee).collect();
        assert_eq!(order.len(), 5);
        assert!(Arc::ptr_eq(&order[0], &tee));
        assert!(Arc::ptr_eq(&order[1], &a));
        assert!(Arc::ptr_eq(&order[2], &b));
        assert!(Arc::ptr_eq(&order[3], &root()));
        assert!(Arc::ptr_eq(&order[4], &todo_root()));
    }

    fn todo_root() -> Arc<dyn Reporter> {
        crate::root::todo()
    }

    #[test]
    fn cycles_terminate() {
        let tee = Arc::new(TeeReporter::default());
        let start = Arc::clone(&tee) as Arc<dyn Reporter>;
        tee.add([start.clone()]);

        assert!(find::<CountingReporter>(&start).is_none());
        assert_eq!(walk(&start).count(), 1);
    }

    #[test]
    fn find_by_predicate() {
        let capture = dyn_arc(CapturingReporter::new(root()));
        let outer = dyn_arc(CountingReporter::new(capture.clone()));

        let found = find_by(&outer, |reporter| reporter.children().is_empty()).unwrap();
        assert!(Arc::ptr_eq(&found, &root()));

        let any = find_by(&outer, |_| true).unwrap();
        assert!(Arc::ptr_eq(&any, &outer));
    }
}
