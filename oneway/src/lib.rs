//! oneway: a minimal unidirectional state container
//!
//! One state slot, one reducer, listeners called after every update. State
//! only changes through `dispatch`, and listeners pull the new value with
//! `get_state`.
//!
//! # Example
//! ```ignore
//! use oneway::prelude::*;
//!
//! #[derive(Action, Debug)]
//! #[action(screaming_case)]
//! enum CounterAction {
//!     #[action(init)]
//!     Init,
//!     IncreaseCount,
//! }
//!
//! let store = Store::new(reducer);
//! store.subscribe(|store| println!("{:?}", store.get_state()));
//! store.init()?;
//! store.dispatch(CounterAction::IncreaseCount)?;
//! ```

// Re-export everything from core
pub use oneway_core::*;

// Re-export derive macros
pub use oneway_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use oneway_core::{Action, InitAction, INIT_ACTION_NAME};

    // Store
    pub use oneway_core::{Reducer, Store, StoreStatus, SubscriptionId};

    // Configuration
    pub use oneway_core::{ActionLogFilter, StoreConfig};

    // Derive macros
    pub use oneway_macros::Action;

    pub use std::convert::Infallible;
}
