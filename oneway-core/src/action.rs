//! Action traits for type-safe state transitions

use std::fmt::Debug;

/// Reserved discriminator for the bootstrap action.
///
/// Dispatching an action with this name only asks the reducer to produce its
/// default state; it never represents a real domain event.
pub const INIT_ACTION_NAME: &str = "@@INIT";

/// Trait for actions that can be dispatched to a [`Store`](crate::Store)
///
/// Actions describe an intended state change. The store never interprets
/// them beyond passing them to the reducer; `name()` is the discriminator
/// used for logging and filtering.
///
/// Use `#[derive(Action)]` from `oneway-macros` to auto-implement this trait.
pub trait Action: Debug + 'static {
    /// Get the action's discriminator
    fn name(&self) -> &'static str;

    /// Whether this is the reserved bootstrap action
    fn is_init(&self) -> bool {
        self.name() == INIT_ACTION_NAME
    }
}

/// Actions that carry a reserved bootstrap variant
///
/// `#[derive(Action)]` implements this for the variant marked
/// `#[action(init)]`, whose name becomes [`INIT_ACTION_NAME`].
pub trait InitAction: Action {
    /// Build the bootstrap action
    fn init() -> Self;
}
