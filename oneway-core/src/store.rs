//! Single-slot state store with reducer pattern

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::action::{Action, InitAction};
use crate::config::StoreConfig;

/// A reducer computes the next state from the previous one and an action
///
/// The previous state is `None` until the first successful dispatch; the
/// reducer must return its default state in that case. Unrecognized actions
/// must return the previous state unchanged.
pub type Reducer<S, A, E = Infallible> = fn(Option<&S>, &A) -> Result<S, E>;

type Listener<S, A, E> = Rc<dyn Fn(&Store<S, A, E>)>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Whether a store has received its first successful dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No dispatch has succeeded yet; `get_state()` returns `None`
    Uninitialized,
    /// At least one dispatch succeeded
    Initialized,
}

/// Single-slot state container with a Redux-like reducer
///
/// The store owns the current state, the reducer it was built with and a
/// list of listeners. The only way to change the state is [`dispatch`],
/// which runs the reducer, replaces the state with its result, then calls
/// every listener. Listeners receive the store, not the new state, and
/// read it back with [`get_state`].
///
/// The store is `!Send` and `!Sync`. All dispatches happen on one thread,
/// and a dispatch issued from inside a listener runs to completion before
/// the outer dispatch resumes.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `E` - The reducer's error type
///
/// # Example
/// ```
/// use oneway_core::{Action, Store};
/// use std::convert::Infallible;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// #[derive(Debug)]
/// enum CounterAction {
///     Init,
///     Increase,
/// }
///
/// impl Action for CounterAction {
///     fn name(&self) -> &'static str {
///         match self {
///             CounterAction::Init => "@@INIT",
///             CounterAction::Increase => "INCREASE_COUNT",
///         }
///     }
/// }
///
/// fn reducer(state: Option<&Counter>, action: &CounterAction) -> Result<Counter, Infallible> {
///     let state = state.cloned().unwrap_or(Counter { count: 0 });
///     Ok(match action {
///         CounterAction::Increase => Counter { count: state.count + 1 },
///         CounterAction::Init => state,
///     })
/// }
///
/// let store = Store::new(reducer);
/// assert!(store.get_state().is_none());
///
/// store.dispatch(CounterAction::Init).unwrap();
/// store.dispatch(CounterAction::Increase).unwrap();
/// assert_eq!(store.get_state().unwrap().count, 1);
/// ```
///
/// [`dispatch`]: Store::dispatch
/// [`get_state`]: Store::get_state
pub struct Store<S, A: Action, E = Infallible> {
    state: RefCell<Option<Rc<S>>>,
    reducer: Reducer<S, A, E>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<S, A, E>)>>,
    next_subscription: Cell<u64>,
    dispatch_count: Cell<u64>,
    config: StoreConfig,
}

impl<S, A: Action, E> Store<S, A, E> {
    /// Create a store around a reducer. The state starts out unset.
    pub fn new(reducer: Reducer<S, A, E>) -> Self {
        Self::with_config(reducer, StoreConfig::default())
    }

    /// Create a store with an explicit logging configuration
    pub fn with_config(reducer: Reducer<S, A, E>, config: StoreConfig) -> Self {
        Self {
            state: RefCell::new(None),
            reducer,
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            dispatch_count: Cell::new(0),
            config,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Runs the reducer on the current state, replaces the state with the
    /// result and then notifies every listener once, in subscription order.
    /// Returns the action on success.
    ///
    /// If the reducer fails, its error is returned as-is: the state keeps its
    /// previous value and no listener is called.
    pub fn dispatch(&self, action: A) -> Result<A, E> {
        let name = action.name();
        let logged = self.config.log.should_log(name);
        if logged {
            debug!(store = %self.config.name, action = name, "Dispatching action");
        }

        let previous = self.get_state();
        let next = match (self.reducer)(previous.as_deref(), &action) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    store = %self.config.name,
                    action = name,
                    "Reducer failed, state left unchanged"
                );
                return Err(err);
            }
        };

        *self.state.borrow_mut() = Some(Rc::new(next));
        self.dispatch_count.set(self.dispatch_count.get() + 1);

        self.notify(name, logged);
        Ok(action)
    }

    /// Get the current state
    ///
    /// Returns `None` before the first successful dispatch. The returned
    /// handle is shared with the store, so repeated calls without a dispatch
    /// in between return the same allocation. Every successful dispatch
    /// installs a fresh allocation, even when the reducer hands back an
    /// equal value for an action it does not handle.
    pub fn get_state(&self) -> Option<Rc<S>> {
        self.state.borrow().clone()
    }

    /// Register a listener called after every successful dispatch
    ///
    /// A listener subscribed while a notification round is running is first
    /// called on the next dispatch.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Self) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        let listener: Listener<S, A, E> = Rc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    ///
    /// Removing a listener mid-round does not stop it from being called in
    /// that round.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    /// Current lifecycle status
    pub fn status(&self) -> StoreStatus {
        if self.state.borrow().is_some() {
            StoreStatus::Initialized
        } else {
            StoreStatus::Uninitialized
        }
    }

    /// Whether a dispatch has succeeded yet
    pub fn is_initialized(&self) -> bool {
        self.status() == StoreStatus::Initialized
    }

    /// Number of successful dispatches so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count.get()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn notify(&self, action: &'static str, logged: bool) {
        // Snapshot so listeners may subscribe, unsubscribe or dispatch
        let listeners: Vec<Listener<S, A, E>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        if logged {
            trace!(
                store = %self.config.name,
                action,
                listeners = listeners.len(),
                dispatch = self.dispatch_count.get(),
                "Notifying listeners"
            );
        }

        for listener in listeners {
            listener(self);
        }
    }
}

impl<S, A: InitAction, E> Store<S, A, E> {
    /// Dispatch the reserved bootstrap action
    ///
    /// The store never does this on its own. Call it once right after
    /// construction so the reducer establishes its default state.
    pub fn init(&self) -> Result<A, E> {
        self.dispatch(A::init())
    }
}

impl<S, A: Action, E> fmt::Debug for Store<S, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.config.name)
            .field("status", &self.status())
            .field("dispatch_count", &self.dispatch_count.get())
            .field("listeners_count", &self.listener_count())
            .finish()
    }
}
