//! Counter state, actions and reducer

use oneway::Action;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    pub count: u32,
}

#[derive(Action, Clone, Debug, PartialEq, Eq)]
#[action(screaming_case)]
pub enum CounterAction {
    #[action(init)]
    Init,
    IncreaseCount,
    DecreaseCount,
    ResetCount,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("count cannot go below zero")]
    BelowZero,
    #[error("count cannot go above {max}")]
    Overflow { max: u32 },
}

/// Pure transition function for the counter
///
/// An absent state becomes the default `{ count: 0 }`.
pub fn reducer(
    state: Option<&CounterState>,
    action: &CounterAction,
) -> Result<CounterState, CounterError> {
    let state = state.cloned().unwrap_or_default();
    match action {
        CounterAction::IncreaseCount => state
            .count
            .checked_add(1)
            .map(|count| CounterState { count })
            .ok_or(CounterError::Overflow { max: u32::MAX }),
        CounterAction::DecreaseCount => state
            .count
            .checked_sub(1)
            .map(|count| CounterState { count })
            .ok_or(CounterError::BelowZero),
        CounterAction::ResetCount => Ok(CounterState::default()),
        CounterAction::Init => Ok(state),
    }
}
