//! Key-chain resolution engine for configurable input handling
//!
//! This crate resolves raw keyboard input — key codes, platform scan codes
//! and the active modifier mask — into the ordered list of user-configured
//! actions bound to it. It supports:
//! - Multi-key chains (press sequences), matched as right-aligned suffixes
//!   of the caller-supplied press history
//! - Wildcard modifiers ("Any"), matching regardless of held modifiers
//! - Dual key spaces: the same logical action may be bound through the
//!   layout-dependent key code and the physical scan code, with
//!   deterministic duplicate elimination and trigger-priority ordering
//! - A bind-file command language (bind/unbind/keyload/…) for runtime
//!   reconfiguration and keysave round-tripping
//!
//! # Architecture
//!
//! ```text
//! raw input → KeyChain (per key space) → lookup + chain filter (per table)
//!           → dual-list merge → ordered Vec<Action> → (host dispatcher)
//!
//! bind file → execute_line → mutators → BindingTable → hotkey index rebuild
//! ```
//!
//! # Resolving input
//!
//! ```
//! use keybinds::{KeyBindings, Modifiers};
//!
//! let mut bindings = KeyBindings::new();
//! bindings.bind("a", "attack").unwrap();
//! bindings.bind("Shift+a", "attack").unwrap();
//!
//! let actions = bindings.resolve('a' as i32, 4, Modifiers::SHIFT);
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].command, "attack");
//! ```

mod action;
mod binding;
mod chain;
mod combo;
mod config;
mod defaults;
mod engine;
mod error;
mod keys;
mod script;
mod table;

pub use action::{tokenize, Action};
pub use binding::Binding;
pub use chain::{parse_chain, KeyChain};
pub use combo::{KeyCombo, KeySource};
pub use config::EngineConfig;
pub use engine::KeyBindings;
pub use error::BindError;
pub use keys::{KeyNames, KeyTables, Modifiers};
pub use script::ActionAnnotator;
pub use table::{filter_by_chain, merge_by_trigger, BindingList, BindingTable};
