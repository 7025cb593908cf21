//! Bind-file load/save tests
//!
//! Covers directive execution from files, keysave round-tripping, and
//! cyclic-inclusion rejection.

use std::fs;
use std::path::Path;

use keybinds::{BindError, KeyBindings, Modifiers};

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// ========================================================================
// Loading
// ========================================================================

#[test]
fn test_load_executes_directives() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "uikeys.txt",
        "\n\
         // user bindings\n\
         bind Shift+a  attack\n\
         bind Ctrl+t   trackmode  // inline comment\n\
         fakemeta space\n",
    );

    let mut kb = KeyBindings::new();
    kb.load(&path).unwrap();

    assert_eq!(kb.hotkeys_for("attack"), &["Shift+a"]);
    assert_eq!(kb.hotkeys_for("trackmode"), &["Ctrl+t"]);
    assert_eq!(kb.fake_meta_key(), Some(32));
}

#[test]
fn test_load_continues_past_bad_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "uikeys.txt",
        "bind nosuchkey attack\n\
         frobnicate\n\
         bind b stop\n",
    );

    let mut kb = KeyBindings::new();
    kb.load(&path).unwrap();

    assert!(kb.hotkeys_for("attack").is_empty());
    assert_eq!(kb.hotkeys_for("stop"), &["b"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let mut kb = KeyBindings::new();
    assert!(matches!(
        kb.load("/nonexistent/uikeys.txt"),
        Err(BindError::Io(_))
    ));
}

#[test]
fn test_keyload_directive_includes_file() {
    let dir = tempfile::tempdir().unwrap();
    let inner = write_file(dir.path(), "inner.txt", "bind g guard\n");
    let outer = write_file(
        dir.path(),
        "outer.txt",
        &format!("bind a attack\nkeyload {}\n", inner),
    );

    let mut kb = KeyBindings::new();
    kb.load(&outer).unwrap();

    assert_eq!(kb.hotkeys_for("attack"), &["a"]);
    assert_eq!(kb.hotkeys_for("guard"), &["g"]);
}

// ========================================================================
// Cyclic inclusion
// ========================================================================

#[test]
fn test_self_keyload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loop.txt");
    fs::write(
        &path,
        format!(
            "bind a attack\nkeyload {}\nbind b stop\n",
            path.to_str().unwrap()
        ),
    )
    .unwrap();

    let mut kb = KeyBindings::new();
    // The load itself succeeds; the cyclic keyload inside is rejected and
    // the remaining lines still execute
    kb.load(path.to_str().unwrap()).unwrap();

    assert_eq!(kb.hotkeys_for("attack"), &["a"]);
    assert_eq!(kb.hotkeys_for("stop"), &["b"]);
}

#[test]
fn test_transitive_cycle_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a_path = dir.path().join("a.txt");
    let b_path = dir.path().join("b.txt");
    fs::write(
        &a_path,
        format!("bind a attack\nkeyload {}\n", b_path.to_str().unwrap()),
    )
    .unwrap();
    fs::write(
        &b_path,
        format!("keyload {}\nbind b stop\n", a_path.to_str().unwrap()),
    )
    .unwrap();

    let mut kb = KeyBindings::new();
    kb.load(a_path.to_str().unwrap()).unwrap();

    assert_eq!(kb.hotkeys_for("attack"), &["a"]);
    assert_eq!(kb.hotkeys_for("stop"), &["b"]);
}

#[test]
fn test_sequential_reload_is_not_cyclic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "a.txt", "bind a attack\n");

    let mut kb = KeyBindings::new();
    kb.load(&path).unwrap();
    // Re-loading the same file when it is not on the stack is fine
    kb.load(&path).unwrap();
    assert_eq!(kb.hotkeys_for("attack"), &["a"]);
}

// ========================================================================
// Round trip
// ========================================================================

#[test]
fn test_save_and_replay_reproduces_bindings() {
    let dir = tempfile::tempdir().unwrap();

    let mut kb = KeyBindings::new();
    kb.bind("Shift+a", "attack").unwrap();
    kb.bind("sc_q", "groupselect").unwrap();
    kb.bind("Any+t", "track").unwrap();
    kb.bind("Ctrl+b", "select AllMap+_Builder_Idle+_ClearSelection_SelectOne+")
        .unwrap();
    kb.add_key_symbol("panic", "esc").unwrap();
    kb.bind("Shift+panic", "quitmenu").unwrap();
    kb.set_fake_meta_key("space").unwrap();

    let before = kb.serialize();

    let saved = dir.path().join("saved.txt");
    kb.save(&saved).unwrap();

    // Replay into the same engine: the saved header clears everything
    // (including the clear-all fallback) before the bind lines
    kb.load(saved.to_str().unwrap()).unwrap();
    let after = kb.serialize();

    assert_eq!(before, after);
    assert_eq!(kb.fake_meta_key(), Some(32));
    assert_eq!(kb.resolve(27, -1, Modifiers::SHIFT).len(), 1);
}

#[test]
fn test_replay_preserves_relative_order_not_indices() {
    let dir = tempfile::tempdir().unwrap();

    let mut kb = KeyBindings::new();
    kb.load_defaults();
    kb.unbind_action("attack");
    kb.bind("a", "attack").unwrap();

    let before = kb.serialize();

    let saved = dir.path().join("saved.txt");
    kb.save(&saved).unwrap();

    let mut fresh = KeyBindings::new();
    fresh.load(saved.to_str().unwrap()).unwrap();

    assert_eq!(before, fresh.serialize());
}

// ========================================================================
// Reload
// ========================================================================

#[test]
fn test_keyreload_replaces_bindings_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "user.txt", "bind g guard\n");

    let mut kb = KeyBindings::new();
    kb.bind("a", "attack").unwrap();

    kb.execute_line(&format!("keyreload {}", path)).unwrap();

    assert!(kb.hotkeys_for("attack").is_empty());
    // keyreload with an explicit file skips the defaults and removes the
    // clear-all fallback before loading
    assert!(kb.hotkeys_for("chat").is_empty());
    assert_eq!(kb.hotkeys_for("guard"), &["g"]);
}
