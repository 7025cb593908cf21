//! Mutator and hotkey-index tests
//!
//! Covers bind idempotence, the unbind family, clear-all semantics and the
//! derived action → shortcut index.

use keybinds::{KeyBindings, KeyCombo, Modifiers};

const NO_KEY: i32 = -1;

fn combo(kb: &KeyBindings, text: &str) -> KeyCombo {
    KeyCombo::parse(text, kb.key_tables()).unwrap()
}

// ========================================================================
// Bind
// ========================================================================

#[test]
fn test_rebind_identical_is_noop() {
    let mut kb = KeyBindings::new();
    kb.bind("a", "attack").unwrap();
    kb.bind("a", "attack").unwrap();
    kb.bind("a", "attack").unwrap();

    let a = combo(&kb, "a");
    let list = kb.bindings_for(&a, false);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].index, 1);

    // The retries consumed no indices
    kb.bind("b", "stop").unwrap();
    let b = combo(&kb, "b");
    assert_eq!(kb.bindings_for(&b, false)[0].index, 2);
}

#[test]
fn test_rebind_same_command_different_extra_is_distinct() {
    let mut kb = KeyBindings::new();
    kb.bind("w", "wait").unwrap();
    kb.bind("w", "wait queued").unwrap();

    let w = combo(&kb, "w");
    assert_eq!(kb.bindings_for(&w, false).len(), 2);
}

#[test]
fn test_bind_failure_leaves_tables_untouched() {
    let mut kb = KeyBindings::new();
    assert!(kb.bind("a,nosuchkey", "attack").is_err());
    assert!(kb.bind("a", "   ").is_err());
    assert!(kb.serialize().is_empty());
}

// ========================================================================
// Unbind family
// ========================================================================

#[test]
fn test_unbind_removes_only_matching_command() {
    let mut kb = KeyBindings::new();
    kb.bind("q", "groupselect").unwrap();
    kb.bind("q", "groupadd").unwrap();

    assert!(kb.unbind("q", "groupselect").unwrap());

    let q = combo(&kb, "q");
    let list = kb.bindings_for(&q, false);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].action.command, "groupadd");
}

#[test]
fn test_unbind_keyset_removes_entry_only() {
    let mut kb = KeyBindings::new();
    kb.bind("a", "attack").unwrap();
    kb.bind("Shift+a", "attack").unwrap();

    assert!(kb.unbind_keyset("a").unwrap());

    assert!(kb.resolve('a' as i32, NO_KEY, Modifiers::NONE).is_empty());
    // The other combination is unaffected
    assert_eq!(kb.resolve('a' as i32, NO_KEY, Modifiers::SHIFT).len(), 1);
}

#[test]
fn test_unbind_action_spans_both_tables() {
    let mut kb = KeyBindings::new();
    kb.bind("a", "attack").unwrap();
    kb.bind("sc_a", "attack").unwrap();
    kb.bind("b", "stop").unwrap();

    assert!(kb.unbind_action("attack"));
    assert!(kb.resolve('a' as i32, 4, Modifiers::NONE).is_empty());
    assert_eq!(kb.resolve('b' as i32, NO_KEY, Modifiers::NONE).len(), 1);

    // Removing an unknown action reports no effect
    assert!(!kb.unbind_action("attack"));
}

#[test]
fn test_unbind_unknown_target_reports_no_effect() {
    let mut kb = KeyBindings::new();
    assert!(!kb.unbind("a", "attack").unwrap());
    assert!(!kb.unbind_keyset("a").unwrap());
    assert!(!kb.unbind_action("attack"));
}

// ========================================================================
// Clear-all
// ========================================================================

#[test]
fn test_clear_all_leaves_exactly_the_fallback() {
    let mut kb = KeyBindings::new();
    kb.load_defaults();
    kb.clear_all();

    let serialized = kb.serialize();
    assert_eq!(serialized.len(), 1);
    assert_eq!(serialized[0], ("enter".to_string(), "chat".to_string()));
}

#[test]
fn test_clear_all_next_bind_gets_index_one() {
    let mut kb = KeyBindings::new();
    kb.load_defaults();
    kb.clear_all();

    kb.bind("a", "attack").unwrap();
    let a = combo(&kb, "a");
    assert_eq!(kb.bindings_for(&a, false)[0].index, 1);
}

#[test]
fn test_clear_all_drops_user_symbols() {
    let mut kb = KeyBindings::new();
    kb.add_key_symbol("panic", "esc").unwrap();
    kb.clear_all();

    assert!(kb.bind("panic", "quitmessage").is_err());
}

// ========================================================================
// Hotkey index
// ========================================================================

#[test]
fn test_hotkeys_ordered_by_configuration() {
    let mut kb = KeyBindings::new();
    // Wildcard binding configured first must list first, even though it
    // loses trigger priority
    kb.bind("Any+a", "attack").unwrap();
    kb.bind("Shift+a", "attack").unwrap();
    kb.bind("sc_q", "attack").unwrap();

    assert_eq!(kb.hotkeys_for("attack"), &["Any+a", "Shift+a", "sc_q"]);
}

#[test]
fn test_hotkeys_rebuilt_after_each_mutation() {
    let mut kb = KeyBindings::new();
    kb.bind("a", "attack").unwrap();
    kb.unbind_action("attack");
    assert!(kb.hotkeys_for("attack").is_empty());

    kb.bind("b", "attack").unwrap();
    assert_eq!(kb.hotkeys_for("attack"), &["b"]);
}

#[test]
fn test_hotkeys_keyed_by_command_and_extra() {
    let mut kb = KeyBindings::new();
    kb.bind("Ctrl+Shift+d", "selfd queued").unwrap();
    kb.bind("Ctrl+d", "selfd").unwrap();

    assert_eq!(kb.hotkeys_for("selfd"), &["Ctrl+d"]);
    assert_eq!(kb.hotkeys_for("selfd queued"), &["Ctrl+Shift+d"]);
}
