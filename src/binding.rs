//! Binding record: a key chain bound to an action

use std::cmp::Ordering;

use crate::action::Action;
use crate::chain::KeyChain;

/// One configured binding
///
/// `bound_with` keeps the literal text the user typed, for hotkey display
/// and keysave. `index` is a global, strictly-increasing insertion counter;
/// re-binding an identical (tail, rawline) pair does not consume a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub chain: KeyChain,
    pub action: Action,
    pub bound_with: String,
    pub index: u32,
}

impl Binding {
    /// Whether the trailing combination carries the wildcard-modifier bit
    pub fn any_mod_tail(&self) -> bool {
        self.chain.last().map(|c| c.any_mod()).unwrap_or(false)
    }

    /// Trigger-priority order: literal-modifier tails before wildcard tails,
    /// ties broken by ascending insertion index
    pub fn trigger_order(a: &Binding, b: &Binding) -> Ordering {
        match (a.any_mod_tail(), b.any_mod_tail()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => a.index.cmp(&b.index),
        }
    }

    /// Configuration order: ascending insertion index
    pub fn binding_order(a: &Binding, b: &Binding) -> Ordering {
        a.index.cmp(&b.index)
    }
}
