//! The binding engine: mutable state, mutators and the resolve façade
//!
//! One [`KeyBindings`] value owns the dual binding table, the derived hotkey
//! index and the key-name tables. There are no ambient singletons; input
//! dispatch and configuration loading hold a reference to the same state.
//! All operations are synchronous and run on the caller's thread — the
//! engine relies on the host never interleaving lookups with mutations.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::action::Action;
use crate::binding::Binding;
use crate::chain::{parse_chain, KeyChain};
use crate::combo::{KeyCombo, KeySource};
use crate::config::EngineConfig;
use crate::error::BindError;
use crate::keys::{KeyTables, Modifiers};
use crate::table::{filter_by_chain, merge_by_trigger, BindingList, BindingTable};

/// Continuous-input commands that must fire under any modifier mask
///
/// Binding one of these forces the chain's trailing combination into
/// wildcard-modifier form regardless of what the user typed.
const STATEFUL_COMMANDS: &[&str] = &[
    "drawinmap",
    "moveforward",
    "moveback",
    "moveright",
    "moveleft",
    "moveup",
    "movedown",
    "moveslow",
    "movefast",
    "movetilt",
    "movereset",
    "moverotate",
];

/// The mandatory fallback installed by clear-all so the host is never left
/// without a usable input
const FALLBACK_KEY: &str = "enter";
const FALLBACK_ACTION: &str = "chat";

/// Complete binding state: tables, derived hotkey index, key-name tables
/// and the configuration knobs the script layer drives
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub(crate) table: BindingTable,
    pub(crate) hotkeys: HashMap<String, Vec<String>>,
    pub(crate) tables: KeyTables,
    stateful_commands: HashSet<&'static str>,
    pub(crate) fake_meta_key: Option<i32>,
    chain_timeout_ms: u64,
    pub(crate) debug_enabled: bool,
    pub(crate) build_hotkeys: bool,
    pub(crate) load_stack: Vec<String>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            table: BindingTable::new(),
            hotkeys: HashMap::new(),
            tables: KeyTables::new(),
            stateful_commands: STATEFUL_COMMANDS.iter().copied().collect(),
            fake_meta_key: None,
            chain_timeout_ms: 750,
            debug_enabled: false,
            build_hotkeys: true,
            load_stack: Vec::new(),
        }
    }

    /// The key-name tables bindings are parsed against
    pub fn key_tables(&self) -> &KeyTables {
        &self.tables
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Bind a key chain to an action line
    ///
    /// Rejects empty actions and unparsable chains without mutating.
    /// Re-binding an identical (tail, rawline) pair is a no-op.
    pub fn bind(&mut self, keystr: &str, line: &str) -> Result<(), BindError> {
        let action = Action::new(line);
        if action.command.is_empty() {
            warn!("bind: empty action: {}", line);
            return Err(BindError::EmptyAction(line.to_string()));
        }

        let mut chain = match parse_chain(keystr, &self.tables) {
            Ok(chain) => chain,
            Err(err) => {
                warn!("bind: could not parse key: {}", keystr);
                return Err(err);
            }
        };

        if self.stateful_commands.contains(action.command.as_str()) {
            chain.force_any_tail();
        }

        if self.debug_enabled {
            debug!("bind: keystr={} line={}", keystr, line);
        }

        let changed = self.table.insert(Binding {
            chain,
            action,
            bound_with: keystr.to_string(),
            index: 0,
        });
        if changed {
            self.maybe_rebuild_hotkeys();
        }
        Ok(())
    }

    /// Remove every binding for `command` under one exact combination
    ///
    /// Chains are not accepted here, only a single trailing combination.
    /// `Ok(false)` means the target did not exist ("no effect").
    pub fn unbind(&mut self, keystr: &str, command: &str) -> Result<bool, BindError> {
        let combo = match KeyCombo::parse(keystr, &self.tables) {
            Ok(combo) => combo,
            Err(err) => {
                warn!("unbind: could not parse key: {}", keystr);
                return Err(err);
            }
        };

        if self.debug_enabled {
            debug!("unbind: keystr={} command={}", keystr, command);
        }

        let removed = self.table.remove_command(&combo, command);
        if removed {
            self.maybe_rebuild_hotkeys();
        }
        Ok(removed)
    }

    /// Remove a combination's entry wholesale
    pub fn unbind_keyset(&mut self, keystr: &str) -> Result<bool, BindError> {
        let combo = match KeyCombo::parse(keystr, &self.tables) {
            Ok(combo) => combo,
            Err(err) => {
                warn!("unbind_keyset: could not parse key: {}", keystr);
                return Err(err);
            }
        };

        if self.debug_enabled {
            debug!("unbind_keyset: keystr={}", keystr);
        }

        let removed = self.table.remove_entry(&combo);
        if removed {
            self.maybe_rebuild_hotkeys();
        }
        Ok(removed)
    }

    /// Remove every binding for `command` from both tables
    pub fn unbind_action(&mut self, command: &str) -> bool {
        if self.debug_enabled {
            debug!("unbind_action: command={}", command);
        }

        let removed = self.table.remove_action(command);
        if removed {
            self.maybe_rebuild_hotkeys();
        }
        removed
    }

    /// Empty both tables, reset the insertion counter and user key aliases,
    /// and reinstall the mandatory fallback binding
    ///
    /// The fallback holds index 0, outside the allocator, so the next bind
    /// still receives index 1.
    pub fn clear_all(&mut self) {
        self.table.clear();
        self.tables.reset();

        if let Ok(chain) = parse_chain(FALLBACK_KEY, &self.tables) {
            self.table.insert_preassigned(Binding {
                chain,
                action: Action::new(FALLBACK_ACTION),
                bound_with: FALLBACK_KEY.to_string(),
                index: 0,
            });
        }

        self.maybe_rebuild_hotkeys();
    }

    /// Designate a key code that the host treats as the meta modifier
    ///
    /// `"none"` clears the assignment. Scan codes are rejected.
    pub fn set_fake_meta_key(&mut self, keystr: &str) -> Result<(), BindError> {
        if keystr.eq_ignore_ascii_case("none") {
            self.fake_meta_key = None;
            return Ok(());
        }
        let combo = match KeyCombo::parse(keystr, &self.tables) {
            Ok(combo) => combo,
            Err(err) => {
                warn!("set_fake_meta_key: could not parse key: {}", keystr);
                return Err(err);
            }
        };
        if !combo.is_key_code() {
            warn!("set_fake_meta_key: cannot assign a scan code: {}", keystr);
            return Err(BindError::Parse(keystr.to_string()));
        }
        self.fake_meta_key = Some(combo.key);
        Ok(())
    }

    pub fn fake_meta_key(&self) -> Option<i32> {
        self.fake_meta_key
    }

    /// Register a user alias for a key, in the key space the target parses
    /// into
    pub fn add_key_symbol(&mut self, sym: &str, keystr: &str) -> Result<(), BindError> {
        let combo = match KeyCombo::parse(keystr, &self.tables) {
            Ok(combo) => combo,
            Err(err) => {
                warn!("add_key_symbol: could not parse key: {}", keystr);
                return Err(err);
            }
        };
        let table = match combo.source {
            KeySource::Code => &mut self.tables.codes,
            KeySource::Scan => &mut self.tables.scans,
        };
        if !table.add_symbol(sym, combo.key) {
            warn!("add_key_symbol: could not add: {}", sym);
            return Err(BindError::Parse(sym.to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hotkey reverse index
    // ------------------------------------------------------------------

    pub(crate) fn maybe_rebuild_hotkeys(&mut self) {
        if self.build_hotkeys {
            self.rebuild_hotkeys();
        }
    }

    /// Recompute the action → shortcut index from scratch
    ///
    /// Ordered by insertion index, not trigger priority: the index reflects
    /// the order the user configured things, for display purposes.
    pub fn rebuild_hotkeys(&mut self) {
        self.hotkeys.clear();
        for binding in self.table.all_by_binding_order() {
            self.hotkeys
                .entry(binding.action.identity())
                .or_default()
                .push(binding.bound_with);
        }
    }

    /// The shortcut display strings bound to an action identity
    pub fn hotkeys_for(&self, action: &str) -> &[String] {
        self.hotkeys
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ------------------------------------------------------------------
    // Lookup / resolve
    // ------------------------------------------------------------------

    /// The binding list registered under an exact combination
    ///
    /// `force_any` substitutes the wildcard-modifier form of the
    /// combination.
    pub fn bindings_for(&self, combo: &KeyCombo, force_any: bool) -> &[Binding] {
        self.table.list(combo, force_any)
    }

    /// Bindings whose stored chain fits a single pressed chain
    ///
    /// Literal-tail matches first, then (when the tail is not already
    /// wildcard) the wildcard-form matches.
    pub fn lookup_chain(&self, pressed: &KeyChain) -> BindingList {
        let mut out = BindingList::new();
        let Some(tail) = pressed.last() else {
            return out;
        };
        filter_by_chain(self.table.list(tail, false), pressed, &mut out);
        if !tail.any_mod() {
            filter_by_chain(self.table.list(tail, true), pressed, &mut out);
        }
        out
    }

    /// Resolve a single press seen through both key spaces
    pub fn resolve(&self, key_code: i32, scan_code: i32, mods: Modifiers) -> Vec<Action> {
        let code_chain = KeyChain::single(KeyCombo::new(key_code, mods, KeySource::Code));
        let scan_chain = KeyChain::single(KeyCombo::new(scan_code, mods, KeySource::Scan));
        self.resolve_chains(&code_chain, &scan_chain)
    }

    /// Resolve a multi-press history seen through both key spaces
    pub fn resolve_chains(&self, code_chain: &KeyChain, scan_chain: &KeyChain) -> Vec<Action> {
        self.resolve_bindings(code_chain, scan_chain)
            .into_iter()
            .map(|b| b.action)
            .collect()
    }

    /// Like [`Self::resolve_chains`] but returning the full binding records
    ///
    /// Two passes, each merged across the two key spaces: literal-modifier
    /// matches first, wildcard matches appended after.
    pub fn resolve_bindings(&self, code_chain: &KeyChain, scan_chain: &KeyChain) -> BindingList {
        let mut merged = BindingList::new();
        let code_tail = code_chain.last();
        let scan_tail = scan_chain.last();

        let mut code_hits = BindingList::new();
        let mut scan_hits = BindingList::new();

        // Literal pass. A tail already carrying the wildcard bit has no
        // separate literal form.
        if let Some(tail) = code_tail {
            if !tail.any_mod() {
                filter_by_chain(self.table.list(tail, false), code_chain, &mut code_hits);
            }
        }
        if let Some(tail) = scan_tail {
            if !tail.any_mod() {
                filter_by_chain(self.table.list(tail, false), scan_chain, &mut scan_hits);
            }
        }
        merge_by_trigger(&code_hits, &scan_hits, &mut merged);

        // Wildcard pass.
        code_hits.clear();
        scan_hits.clear();
        if let Some(tail) = code_tail {
            filter_by_chain(self.table.list(tail, true), code_chain, &mut code_hits);
        }
        if let Some(tail) = scan_tail {
            filter_by_chain(self.table.list(tail, true), scan_chain, &mut scan_hits);
        }
        merge_by_trigger(&code_hits, &scan_hits, &mut merged);

        if self.debug_enabled {
            debug!(
                "resolve: code_chain=\"{}\" scan_chain=\"{}\"",
                code_chain.display(&self.tables),
                scan_chain.display(&self.tables)
            );
            self.debug_binding_list(&merged);
        }

        merged
    }

    fn debug_binding_list(&self, list: &BindingList) {
        if list.is_empty() {
            debug!("  (no bindings)");
            return;
        }
        for (i, binding) in list.iter().enumerate() {
            debug!(
                "  {}. action=\"{}\" rawline=\"{}\" shortcut=\"{}\" index={}",
                i + 1,
                binding.action.command,
                binding.action.rawline,
                binding.bound_with,
                binding.index
            );
        }
    }

    // ------------------------------------------------------------------
    // Configuration knobs
    // ------------------------------------------------------------------

    /// Maximum time between chained keystrokes, enforced by the caller
    ///
    /// The engine stores the number; keystroke timing lives with the input
    /// dispatcher that assembles candidate chains.
    pub fn chain_timeout_ms(&self) -> u64 {
        self.chain_timeout_ms
    }

    pub fn set_chain_timeout_ms(&mut self, timeout: u64) {
        self.chain_timeout_ms = timeout;
    }

    /// Adopt persisted settings
    pub fn apply_config(&mut self, config: &EngineConfig) {
        self.chain_timeout_ms = config.chain_timeout_ms;
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}
