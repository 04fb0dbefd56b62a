//! Launcher flow tests
//!
//! Drives the App with synthetic key events: typing, reveal, clipboard fill,
//! submission rules and screen-bound samplers.

mod common;

use std::time::Instant;

use common::{ctrl, key, shift, type_text, with_caps_lock, TestAppBuilder, TEST_POLL_INTERVAL};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pwfield::app::{Focus, Outcome, Screen};
use pwfield::field::MatchState;
use pwfield::startup::LaunchConfig;

#[test]
fn test_without_databases_asks_for_new_password() {
    let (app, _) = TestAppBuilder::new().build();

    assert_eq!(app.screen, Screen::NewPassword);
    let pair = app.new_password_pair().expect("pair screen has two fields");
    assert_eq!(app.form.field(pair.verify).unwrap().base(), Some(pair.base));
    assert!(app.form.is_shown(pair.base));
    assert!(app.form.is_shown(pair.verify));
    assert_eq!(app.focused_field(), Some(pair.base));
}

#[test]
fn test_new_password_accepted_only_on_match() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();
    let pair = app.new_password_pair().unwrap();

    type_text(&mut app, "Sword1", now);
    app.handle_key(key(KeyCode::Tab), now);
    assert_eq!(app.focus, Focus::Verify);
    type_text(&mut app, "sword1", now);

    app.handle_key(key(KeyCode::Enter), now);
    assert_eq!(app.screen, Screen::NewPassword);
    assert_eq!(app.status(), Some("Passwords do not match"));
    assert_eq!(app.form.match_state(pair.verify), Some(MatchState::Mismatch));

    app.handle_key(key(KeyCode::Home), now);
    app.handle_key(key(KeyCode::Delete), now);
    app.handle_key(shift('s'), now);
    assert_eq!(app.form.match_state(pair.verify), Some(MatchState::Match));
    assert_eq!(app.status(), None);

    app.handle_key(key(KeyCode::Enter), now);
    assert!(app.should_quit);
    assert_eq!(app.screen, Screen::Done);
    assert_eq!(
        app.outcomes(),
        &[Outcome::MasterPasswordSet { password_len: 6 }]
    );
    assert!(app.form.is_empty());
}

#[test]
fn test_empty_pair_is_not_accepted() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();

    app.handle_key(key(KeyCode::Enter), now);

    assert!(!app.should_quit);
    assert_eq!(app.status(), Some("Enter the password twice"));
    assert_eq!(app.focus, Focus::Base);
}

#[test]
fn test_stdin_password_prefills_unlock_prompt() {
    let (app, _) = TestAppBuilder::new()
        .with_database("vault.kdbx", Some("Sword1"))
        .build();

    assert_eq!(app.screen, Screen::Unlock);
    let prompt = app.current_prompt().unwrap();
    assert_eq!(app.form.text(prompt.field), Some("Sword1"));
    assert!(!app.form.is_password_visible(prompt.field));
}

#[test]
fn test_unlock_prompts_advance_and_only_front_is_shown() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new()
        .with_database("a.kdbx", Some("alpha"))
        .with_database("b.kdbx", None)
        .at(now)
        .build();

    assert_eq!(app.pending_prompts(), 2);
    assert_eq!(app.form.active_sampler_count(), 1);

    app.handle_key(key(KeyCode::Enter), now);
    assert_eq!(app.pending_prompts(), 1);
    assert_eq!(app.current_prompt().unwrap().path.to_str(), Some("b.kdbx"));
    assert_eq!(app.form.active_sampler_count(), 1);
    assert!(app.form.is_shown(app.focused_field().unwrap()));

    type_text(&mut app, "beta!", now);
    app.handle_key(key(KeyCode::Enter), now);

    assert!(app.should_quit);
    let lens: Vec<usize> = app
        .outcomes()
        .iter()
        .filter_map(|outcome| match outcome {
            Outcome::UnlockRequested { password_len, .. } => Some(*password_len),
            _ => None,
        })
        .collect();
    assert_eq!(lens, vec![5, 5]);
    assert_eq!(app.form.active_sampler_count(), 0);
}

#[test]
fn test_escape_cancels_everything_pending() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new()
        .with_database("a.kdbx", None)
        .with_database("b.kdbx", None)
        .at(now)
        .build();

    app.handle_key(key(KeyCode::Esc), now);

    assert!(app.should_quit);
    assert_eq!(app.outcomes().len(), 2);
    assert!(app
        .outcomes()
        .iter()
        .all(|outcome| matches!(outcome, Outcome::Cancelled { path: Some(_) })));
}

#[test]
fn test_ctrl_c_quits_pair_screen() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();

    app.handle_key(ctrl('c'), now);

    assert!(app.should_quit);
    assert_eq!(app.outcomes(), &[Outcome::Cancelled { path: None }]);
}

#[test]
fn test_ctrl_r_reveals_both_fields_of_pair() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();
    let pair = app.new_password_pair().unwrap();

    app.handle_key(ctrl('r'), now);

    assert!(app.form.is_password_visible(pair.base));
    assert!(app.form.is_password_visible(pair.verify));
    // The control chord must not type an 'r'
    assert_eq!(app.form.text(pair.base), Some(""));
}

#[test]
fn test_show_password_by_default() {
    let config = LaunchConfig::default().with_show_password_by_default(true);
    let (app, _) = TestAppBuilder::new()
        .with_database("vault.kdbx", None)
        .with_config(config)
        .build();

    assert!(app.form.is_password_visible(app.focused_field().unwrap()));
}

#[test]
fn test_clipboard_fill_goes_through_autocomplete() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new()
        .with_clipboard("X1y2Z3")
        .at(now)
        .build();
    let pair = app.new_password_pair().unwrap();

    app.handle_key(ctrl('y'), now);

    assert_eq!(app.form.text(pair.base), Some("X1y2Z3"));
    assert_eq!(app.form.text(pair.verify), Some("X1y2Z3"));
    assert_eq!(app.form.match_state(pair.verify), Some(MatchState::Match));
    assert_eq!(app.status(), Some("Password filled from clipboard"));
}

#[test]
fn test_clipboard_without_password() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();

    app.handle_key(ctrl('y'), now);

    assert_eq!(app.status(), Some("Clipboard holds no password"));
    assert_eq!(app.form.text(app.focused_field().unwrap()), Some(""));
}

#[test]
fn test_paste_strips_trailing_newline() {
    let (mut app, _) = TestAppBuilder::new()
        .with_database("vault.kdbx", None)
        .build();

    app.handle_paste("Sword1\r\n");

    assert_eq!(app.form.text(app.focused_field().unwrap()), Some("Sword1"));
}

#[test]
fn test_capslock_status_follows_tick_and_screen() {
    let t0 = Instant::now();
    let (mut app, probe) = TestAppBuilder::new()
        .with_database("a.kdbx", None)
        .with_database("b.kdbx", None)
        .at(t0)
        .build();

    app.tick(t0);
    assert!(!app.capslock_on());

    probe.set(true);
    app.tick(t0 + TEST_POLL_INTERVAL);
    assert!(app.capslock_on());

    // Next prompt: the warning is reset and re-announced by the new field
    app.handle_key(key(KeyCode::Enter), t0 + TEST_POLL_INTERVAL);
    assert!(!app.capslock_on());
    app.tick(t0 + TEST_POLL_INTERVAL * 2);
    assert!(app.capslock_on());

    probe.set(false);
    app.tick(t0 + TEST_POLL_INTERVAL * 3);
    assert!(!app.capslock_on());
}

#[test]
fn test_shift_and_caps_lock_type_the_shifted_character() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new()
        .with_database("vault.kdbx", None)
        .at(now)
        .build();
    let field = app.focused_field().unwrap();

    // Base key plus SHIFT, as sent without a shifted codepoint
    app.handle_key(shift('s'), now);
    app.handle_key(shift('1'), now);
    app.handle_key(with_caps_lock(key(KeyCode::Char('a'))), now);
    app.handle_key(with_caps_lock(shift('b')), now);
    // Shifted codepoint already substituted by the terminal
    app.handle_key(key(KeyCode::Char('Q')), now);
    app.handle_key(with_caps_lock(key(KeyCode::Char('7'))), now);

    assert_eq!(app.form.text(field), Some("S!AbQ7"));
}

#[test]
fn test_pair_typed_with_shift_matches_pasted_password() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new().at(now).build();
    let pair = app.new_password_pair().unwrap();

    app.handle_paste("Sword1!");
    app.handle_key(key(KeyCode::Tab), now);
    app.handle_key(shift('s'), now);
    type_text(&mut app, "word1", now);
    app.handle_key(shift('1'), now);

    assert_eq!(app.form.text(pair.verify), Some("Sword1!"));
    assert_eq!(app.form.match_state(pair.verify), Some(MatchState::Match));
}

#[test]
fn test_alt_chord_types_nothing() {
    let now = Instant::now();
    let (mut app, _) = TestAppBuilder::new()
        .with_database("vault.kdbx", None)
        .at(now)
        .build();

    app.handle_key(
        KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
        now,
    );

    assert_eq!(app.form.text(app.focused_field().unwrap()), Some(""));
}
