//! Core traits and types for oneway
//!
//! This crate provides a minimal unidirectional state container: one state
//! slot, changed only by running a pure reducer on dispatched actions, with
//! listeners notified synchronously after every successful update.
//!
//! # Core Concepts
//!
//! - **Action**: Describes an intended state change, identified by `name()`
//! - **Reducer**: Pure function from previous state and action to next state
//! - **Store**: Owns the state, runs the reducer, notifies listeners
//!
//! # Basic Example
//!
//! ```ignore
//! use oneway::prelude::*;
//!
//! #[derive(Action, Debug)]
//! enum CounterAction {
//!     #[action(init)]
//!     Init,
//!     #[action(name = "INCREASE_COUNT")]
//!     Increase,
//! }
//!
//! #[derive(Debug, Clone)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! fn reducer(state: Option<&Counter>, action: &CounterAction) -> Result<Counter, Infallible> {
//!     let state = state.cloned().unwrap_or(Counter { count: 0 });
//!     Ok(match action {
//!         CounterAction::Increase => Counter { count: state.count + 1 },
//!         _ => state,
//!     })
//! }
//!
//! let store = Store::new(reducer);
//! store.subscribe(|store| render(store.get_state()));
//!
//! // Bootstrap: establish the reducer's default state
//! store.init()?;
//! store.dispatch(CounterAction::Increase)?;
//! ```
//!
//! # Bootstrap
//!
//! A new store holds no state, and `get_state()` returns `None` until the first
//! successful dispatch. The store never initializes itself: the host
//! dispatches the reserved `@@INIT` action (see [`INIT_ACTION_NAME`]) once,
//! right after construction, so the reducer's absent-state branch produces
//! the default.

pub mod action;
pub mod config;
pub mod store;
pub mod testing;

pub use action::{Action, InitAction, INIT_ACTION_NAME};
pub use config::{ActionLogFilter, ConfigError, StoreConfig};
pub use store::{Reducer, Store, StoreStatus, SubscriptionId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, InitAction, INIT_ACTION_NAME};
    pub use crate::config::{ActionLogFilter, StoreConfig};
    pub use crate::store::{Reducer, Store, StoreStatus, SubscriptionId};
    pub use std::convert::Infallible;
}
