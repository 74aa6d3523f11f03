//! Tests for #[derive(Action)] macro

use oneway::{Action, InitAction, INIT_ACTION_NAME};

#[test]
fn test_variant_names_by_default() {
    #[derive(Action, Debug)]
    #[allow(dead_code)]
    enum Msg {
        Reset,
        Set(i64),
        Move { dx: i32, dy: i32 },
    }

    assert_eq!(Msg::Reset.name(), "Reset");
    assert_eq!(Msg::Set(4).name(), "Set");
    assert_eq!(Msg::Move { dx: 1, dy: 0 }.name(), "Move");
    assert!(!Msg::Reset.is_init());
}

#[test]
fn test_screaming_case() {
    #[derive(Action, Debug)]
    #[action(screaming_case)]
    enum CounterAction {
        IncreaseCount,
        Reset,
    }

    assert_eq!(CounterAction::IncreaseCount.name(), "INCREASE_COUNT");
    assert_eq!(CounterAction::Reset.name(), "RESET");
}

#[test]
fn test_explicit_name_overrides_case() {
    #[derive(Action, Debug)]
    #[action(screaming_case)]
    #[allow(dead_code)]
    enum CounterAction {
        #[action(name = "counter/set")]
        SetCount(i64),
        IncreaseCount,
    }

    assert_eq!(CounterAction::SetCount(1).name(), "counter/set");
    assert_eq!(CounterAction::IncreaseCount.name(), "INCREASE_COUNT");
}

#[test]
fn test_init_variant() {
    #[derive(Action, Debug, PartialEq)]
    #[action(screaming_case)]
    enum CounterAction {
        #[action(init)]
        Bootstrap,
        IncreaseCount,
    }

    assert_eq!(CounterAction::init(), CounterAction::Bootstrap);
    assert_eq!(CounterAction::Bootstrap.name(), INIT_ACTION_NAME);
    assert!(CounterAction::Bootstrap.is_init());
    assert!(!CounterAction::IncreaseCount.is_init());
}

#[test]
fn test_generic_action() {
    #[derive(Action, Debug)]
    #[allow(dead_code)]
    enum Load<T: std::fmt::Debug + 'static> {
        #[action(init)]
        Init,
        Loaded(T),
    }

    assert_eq!(Load::<String>::init().name(), "@@INIT");
    assert_eq!(Load::Loaded(3u8).name(), "Loaded");
}
