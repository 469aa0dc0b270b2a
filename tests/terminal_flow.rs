//! End-to-end behavior of the dispatcher against an in-memory store.

use portfolio_terminal::commands::{ConfirmAction, DispatchOutcome, Dispatcher, PendingAction};
use portfolio_terminal::session::{MemStore, KEY_THEME, KEY_USERNAME};
use portfolio_terminal::theme;
use portfolio_terminal::transcript::Transcript;

fn dispatcher() -> (tokio::runtime::Runtime, Dispatcher) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dispatcher = Dispatcher::new(Box::new(MemStore::default()), "dark", rt.handle().clone());
    (rt, dispatcher)
}

fn run(dispatcher: &mut Dispatcher, out: &mut Transcript, raw: &str) {
    match dispatcher.dispatch(raw, out) {
        DispatchOutcome::Done => {}
        DispatchOutcome::Pending(_) => panic!("unexpected asynchronous command: {raw}"),
    }
}

#[test]
fn set_username_round_trips() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set username neo_42");
    assert_eq!(out.last_output(), Some("Username updated to 'neo_42'"));
    assert_eq!(d.store().get(KEY_USERNAME).as_deref(), Some("neo_42"));

    run(&mut d, &mut out, "username");
    assert_eq!(out.last_output(), Some("neo_42"));
}

#[test]
fn invalid_usernames_leave_state_unchanged() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    for bad in ["ab", "way_too_long_for_a_username", "not-ok!", "two words"] {
        run(&mut d, &mut out, &format!("set username {bad}"));
        assert_eq!(d.session.username, "visitor", "accepted: {bad}");
        assert!(d.store().get(KEY_USERNAME).is_none());
    }
}

#[test]
fn each_username_failure_has_its_own_message() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set username ab");
    assert!(out.last_output().unwrap().contains("USERNAME_LENGTH_INVALID"));

    run(&mut d, &mut out, "set username b@d");
    assert!(out.last_output().unwrap().contains("INVALID_USERNAME"));
}

#[test]
fn setting_the_same_username_is_a_noop_with_a_message() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set username martin");
    run(&mut d, &mut out, "set username martin");
    assert!(out
        .last_output()
        .unwrap()
        .starts_with("Username is already set to 'martin'"));
}

#[test]
fn set_theme_persists_known_keys() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set theme Nord");
    assert_eq!(out.last_output(), Some("Theme changed to 'nord'"));
    assert_eq!(d.session.theme_id, "nord");
    assert_eq!(d.store().get(KEY_THEME).as_deref(), Some("nord"));
}

#[test]
fn unknown_theme_lists_all_valid_keys() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set theme vaporwave");
    assert_eq!(d.session.theme_id, "dark");
    assert!(d.store().get(KEY_THEME).is_none());

    let message = out.last_output().unwrap().to_string();
    assert!(message.contains("Available themes:"));
    for key in theme::THEME_KEYS {
        assert!(message.contains(key), "missing theme key: {key}");
    }
}

#[test]
fn history_excludes_its_own_invocation() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "help");
    run(&mut d, &mut out, "about");
    run(&mut d, &mut out, "history");
    assert_eq!(out.last_output(), Some("1: help\n2: about"));
}

#[test]
fn history_limit_takes_the_most_recent_entries() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "help");
    run(&mut d, &mut out, "about");
    run(&mut d, &mut out, "theme");
    run(&mut d, &mut out, "history 1");
    assert_eq!(out.last_output(), Some("1: theme"));
}

#[test]
fn non_numeric_history_limit_is_ignored() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "help");
    run(&mut d, &mut out, "about");
    run(&mut d, &mut out, "history lots");
    assert_eq!(out.last_output(), Some("1: help\n2: about"));
}

#[test]
fn clear_history_then_history_reports_nothing() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "help");
    run(&mut d, &mut out, "clear history");
    assert_eq!(out.last_output(), Some("Command history cleared."));

    run(&mut d, &mut out, "history");
    assert_eq!(out.last_output(), Some("No command history available."));
}

#[test]
fn clear_screen_keeps_the_hint_line_only() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "help");
    run(&mut d, &mut out, "clear");
    assert_eq!(out.len(), 1);
}

#[test]
fn clear_rejects_unknown_targets() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "clear everything");
    let message = out.last_output().unwrap();
    assert!(message.contains("Unknown clear target: 'everything'"));
    assert!(message.contains("clear [history|screen|all]"));
}

#[test]
fn reset_without_confirmation_changes_nothing() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set username martin");
    run(&mut d, &mut out, "reset all");
    assert_eq!(
        d.pending(),
        PendingAction::AwaitingConfirmation(ConfirmAction::ResetAll)
    );

    run(&mut d, &mut out, "no");
    assert_eq!(out.last_output(), Some("Cancelled the action."));
    assert_eq!(d.pending(), PendingAction::Idle);
    assert_eq!(d.session.username, "martin");
    assert_eq!(d.store().get(KEY_USERNAME).as_deref(), Some("martin"));
}

#[test]
fn reset_confirmed_restores_defaults_and_clears_the_store() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set username martin");
    run(&mut d, &mut out, "set theme gruvbox");
    run(&mut d, &mut out, "reset all");
    run(&mut d, &mut out, "y");

    assert_eq!(out.last_output(), Some("All terminal settings reset to default."));
    assert_eq!(d.session.username, "visitor");
    assert_eq!(d.session.theme_id, "dark");
    assert!(d.session.history.is_empty());
    assert!(d.store().get(KEY_USERNAME).is_none());
    assert!(d.store().get(KEY_THEME).is_none());
}

#[test]
fn pending_confirmation_swallows_would_be_commands() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "reset all");
    run(&mut d, &mut out, "help");
    assert_eq!(out.last_output(), Some("Cancelled the action."));
    // The swallowed response is not recorded as a command.
    assert_eq!(d.session.history, vec!["reset all".to_string()]);
}

#[test]
fn unknown_command_echoes_the_original_text() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "Frobnicate the Widget");
    assert_eq!(
        out.last_output(),
        Some("Command not found: Frobnicate the Widget")
    );
}

#[test]
fn empty_input_is_a_noop() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();
    let before = out.len();

    run(&mut d, &mut out, "");
    assert_eq!(out.len(), before);
    assert!(d.session.history.is_empty());
}

#[test]
fn command_lookup_is_case_insensitive() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "USERNAME");
    assert_eq!(out.last_output(), Some("visitor"));
}

#[test]
fn ascii_renders_block_art_and_rejects_missing_text() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "ascii");
    assert_eq!(out.last_output(), Some("Usage: ascii <text>"));

    run(&mut d, &mut out, "ascii ok");
    assert_eq!(out.last_output().unwrap().lines().count(), 5);

    run(&mut d, &mut out, "ascii héllo");
    assert_eq!(out.last_output(), Some("Error generating ASCII art."));
}

#[test]
fn unknown_social_platform_is_an_error() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "social myspace");
    assert_eq!(out.last_output(), Some("Unknown social platform: myspace"));
}

#[test]
fn unknown_set_target_prints_usage() {
    let (_rt, mut d) = dispatcher();
    let mut out = Transcript::new();

    run(&mut d, &mut out, "set volume 11");
    let message = out.last_output().unwrap();
    assert!(message.contains("Unknown setting: 'volume'"));
    assert!(message.contains("set theme <theme>"));
}
