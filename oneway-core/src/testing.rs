//! Test utilities for oneway stores
//!
//! - [`NotifyRecorder`]: a listener that counts notifications and records the
//!   state the store exposed at each one
//! - [`replay`]: fold a reducer over a sequence of actions without a store,
//!   to compare against what a store ends up holding
//! - [`assert_state!`](crate::assert_state): pattern assertion on a store's state
//!
//! # Example
//!
//! ```ignore
//! use oneway::testing::{replay, NotifyRecorder};
//!
//! let store = Store::new(reducer);
//! let recorder = NotifyRecorder::attach(&store);
//!
//! let actions = vec![Action::Init, Action::Increase, Action::Increase];
//! for action in actions.clone() {
//!     store.dispatch(action)?;
//! }
//!
//! assert_eq!(recorder.count(), 3);
//! assert_eq!(store.get_state().as_deref(), replay(reducer, &actions)?.as_ref());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::Action;
use crate::store::{Reducer, Store, SubscriptionId};

/// Listener that records every notification it receives
///
/// Clones share the same record, so a recorder can be kept by the test while a
/// clone sits inside the store.
#[derive(Debug)]
pub struct NotifyRecorder<S> {
    observed: Rc<RefCell<Vec<Option<Rc<S>>>>>,
    id: Option<SubscriptionId>,
}

impl<S> Clone for NotifyRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            observed: Rc::clone(&self.observed),
            id: self.id,
        }
    }
}

impl<S: 'static> NotifyRecorder<S> {
    /// Subscribe a new recorder to `store`
    pub fn attach<A: Action, E: 'static>(store: &Store<S, A, E>) -> Self {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        let id = store.subscribe(move |store| sink.borrow_mut().push(store.get_state()));
        Self {
            observed,
            id: Some(id),
        }
    }

    /// Unsubscribe the recorder. Recorded notifications are kept.
    pub fn detach<A: Action, E>(&mut self, store: &Store<S, A, E>) -> bool {
        match self.id.take() {
            Some(id) => store.unsubscribe(id),
            None => false,
        }
    }

    /// Number of notifications received
    pub fn count(&self) -> usize {
        self.observed.borrow().len()
    }

    /// State read from the store at each notification, oldest first
    pub fn observed(&self) -> Vec<Option<Rc<S>>> {
        self.observed.borrow().clone()
    }

    /// State read at the most recent notification
    pub fn last(&self) -> Option<Rc<S>> {
        self.observed.borrow().last().cloned().flatten()
    }

    /// Forget recorded notifications
    pub fn clear(&self) {
        self.observed.borrow_mut().clear();
    }
}

/// Apply `reducer` to `actions` in order, starting from the absent state
///
/// Returns the final state, `None` for an empty sequence, or the first
/// reducer error.
pub fn replay<S, A, E>(reducer: Reducer<S, A, E>, actions: &[A]) -> Result<Option<S>, E> {
    let mut state: Option<S> = None;
    for action in actions {
        state = Some(reducer(state.as_ref(), action)?);
    }
    Ok(state)
}

/// Assert that a store's current state matches a pattern
///
/// # Example
///
/// ```ignore
/// use oneway::assert_state;
///
/// store.dispatch(Action::Increase)?;
/// assert_state!(store, Counter { count: 1 });
/// assert_state!(store, Counter { count } if *count > 0);
/// ```
#[macro_export]
macro_rules! assert_state {
    ($store:expr, $pattern:pat $(if $guard:expr)?) => {{
        let state = $store.get_state();
        assert!(
            matches!(state.as_deref(), ::core::option::Option::Some($pattern) $(if $guard)?),
            "Expected state matching `{}`, but got: {:?}",
            stringify!($pattern),
            state
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Total(i64);

    #[derive(Debug)]
    enum Op {
        Add(i64),
        Fail,
    }

    impl Action for Op {
        fn name(&self) -> &'static str {
            match self {
                Op::Add(_) => "ADD",
                Op::Fail => "FAIL",
            }
        }
    }

    fn reducer(state: Option<&Total>, action: &Op) -> Result<Total, String> {
        let Total(current) = state.cloned().unwrap_or(Total(0));
        match action {
            Op::Add(n) => Ok(Total(current + n)),
            Op::Fail => Err(format!("cannot apply to {current}")),
        }
    }

    #[test]
    fn test_replay_folds_in_order() {
        assert_eq!(replay(reducer, &[]), Ok(None));
        assert_eq!(
            replay(reducer, &[Op::Add(2), Op::Add(3), Op::Add(-1)]),
            Ok(Some(Total(4)))
        );
    }

    #[test]
    fn test_replay_stops_at_first_error() {
        assert_eq!(
            replay(reducer, &[Op::Add(5), Op::Fail, Op::Add(1)]),
            Err("cannot apply to 5".to_string())
        );
    }

    #[test]
    fn test_recorder_records_notifications() {
        let store = Store::new(reducer);
        let recorder = NotifyRecorder::attach(&store);

        store.dispatch(Op::Add(1)).unwrap();
        store.dispatch(Op::Add(2)).unwrap();
        assert!(store.dispatch(Op::Fail).is_err());

        assert_eq!(recorder.count(), 2);
        let observed: Vec<_> = recorder
            .observed()
            .into_iter()
            .map(|s| s.map(|t| t.0))
            .collect();
        assert_eq!(observed, vec![Some(1), Some(3)]);
        assert_eq!(recorder.last().as_deref(), Some(&Total(3)));
    }

    #[test]
    fn test_recorder_detach_and_clear() {
        let store = Store::new(reducer);
        let mut recorder = NotifyRecorder::attach(&store);
        let shared = recorder.clone();

        store.dispatch(Op::Add(1)).unwrap();
        assert!(recorder.detach(&store));
        assert!(!recorder.detach(&store));
        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(shared.count(), 1);
        shared.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_assert_state_macro() {
        let store = Store::new(reducer);
        store.dispatch(Op::Add(7)).unwrap();
        assert_state!(store, Total(7));
        assert_state!(store, Total(n) if *n > 5);
    }

    #[test]
    #[should_panic(expected = "Expected state matching")]
    fn test_assert_state_macro_fails_when_absent() {
        let store = Store::new(reducer);
        assert_state!(store, Total(_));
    }
}
