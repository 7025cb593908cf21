//! Dual-keyed binding table and the trigger-priority list merger
//!
//! Two independent maps — one per key space — each keyed by a binding's
//! trailing combination. Reconciliation of the two spaces happens entirely
//! in [`merge_by_trigger`]; the maps themselves never mix sources.

use std::collections::HashMap;

use crate::binding::Binding;
use crate::chain::KeyChain;
use crate::combo::{KeyCombo, KeySource};

pub type BindingList = Vec<Binding>;

/// The two binding maps plus the global insertion counter
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    code: HashMap<KeyCombo, BindingList>,
    scan: HashMap<KeyCombo, BindingList>,
    next_index: u32,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, source: KeySource) -> &HashMap<KeyCombo, BindingList> {
        match source {
            KeySource::Code => &self.code,
            KeySource::Scan => &self.scan,
        }
    }

    fn map_mut(&mut self, source: KeySource) -> &mut HashMap<KeyCombo, BindingList> {
        match source {
            KeySource::Code => &mut self.code,
            KeySource::Scan => &mut self.scan,
        }
    }

    /// Insert a binding under its trailing combination, allocating a fresh
    /// index
    ///
    /// Idempotent on rawline: if the tail's list already holds an identical
    /// rawline the call is a no-op that consumes no index. Returns whether
    /// the binding was actually added.
    pub fn insert(&mut self, mut binding: Binding) -> bool {
        let Some(&tail) = binding.chain.last() else {
            return false;
        };
        {
            let list = self.map_mut(tail.source).entry(tail).or_default();
            if list
                .iter()
                .any(|b| b.action.rawline == binding.action.rawline)
            {
                return false;
            }
        }
        self.next_index += 1;
        binding.index = self.next_index;
        self.map_mut(tail.source).entry(tail).or_default().push(binding);
        true
    }

    /// Insert a binding keeping its preassigned index, bypassing the counter
    ///
    /// Used for the mandatory fallback binding reinstalled by clear-all,
    /// which holds index 0 so the next regular bind still receives 1.
    pub(crate) fn insert_preassigned(&mut self, binding: Binding) {
        let Some(&tail) = binding.chain.last() else {
            return;
        };
        self.map_mut(tail.source)
            .entry(tail)
            .or_default()
            .push(binding);
    }

    /// Remove every binding for `command` under one combination
    ///
    /// Drops the table entry when its list empties. Returns whether anything
    /// was removed.
    pub fn remove_command(&mut self, combo: &KeyCombo, command: &str) -> bool {
        let map = self.map_mut(combo.source);
        let Some(list) = map.get_mut(combo) else {
            return false;
        };
        let before = list.len();
        list.retain(|b| b.action.command != command);
        let removed = list.len() != before;
        if list.is_empty() {
            map.remove(combo);
        }
        removed
    }

    /// Remove a combination's entry wholesale
    pub fn remove_entry(&mut self, combo: &KeyCombo) -> bool {
        self.map_mut(combo.source).remove(combo).is_some()
    }

    /// Remove every binding for `command` from both maps
    pub fn remove_action(&mut self, command: &str) -> bool {
        let mut removed = false;
        for map in [&mut self.code, &mut self.scan] {
            map.retain(|_, list| {
                let before = list.len();
                list.retain(|b| b.action.command != command);
                removed |= list.len() != before;
                !list.is_empty()
            });
        }
        removed
    }

    /// Empty both maps and reset the insertion counter
    pub fn clear(&mut self) {
        self.code.clear();
        self.scan.clear();
        self.next_index = 0;
    }

    /// The ordered binding list registered under a combination, or empty
    ///
    /// `force_any` looks up the wildcard-modifier form instead of the
    /// literal one. The map is selected by the combination's source kind.
    pub fn list(&self, combo: &KeyCombo, force_any: bool) -> &[Binding] {
        if combo.key < 0 {
            return &[];
        }
        let key = if force_any { combo.with_any() } else { *combo };
        self.map(combo.source)
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every binding from both maps, sorted by ascending insertion index
    pub fn all_by_binding_order(&self) -> BindingList {
        let mut merged: BindingList = self
            .code
            .values()
            .chain(self.scan.values())
            .flatten()
            .cloned()
            .collect();
        merged.sort_by(Binding::binding_order);
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.scan.is_empty()
    }
}

/// Append the bindings whose stored chain fits the pressed chain
pub fn filter_by_chain(list: &[Binding], pressed: &KeyChain, out: &mut BindingList) {
    for binding in list {
        if binding.chain.fits(pressed) {
            out.push(binding.clone());
        }
    }
}

/// Merge a key-code-path list and a scan-code-path list into `out`,
/// eliminating cross-table action duplicates and restoring trigger priority
///
/// Two bindings are duplicates iff their rawlines are identical; within one
/// list duplicates cannot exist (guaranteed by the insert path), so a
/// duplicate pair always spans the two lists. The entry with the lower
/// insertion index wins. Both inputs must already be sorted by index, and
/// both must come from the same lookup pass (literal or wildcard).
pub fn merge_by_trigger(code_list: &[Binding], scan_list: &[Binding], out: &mut BindingList) {
    if code_list.is_empty() {
        out.extend_from_slice(scan_list);
        return;
    }

    // The code list forms the window; scan candidates are screened against
    // it and appended past its end.
    let window_start = out.len();
    out.extend_from_slice(code_list);
    let mut window_end = out.len();

    if scan_list.is_empty() {
        return;
    }

    for candidate in scan_list {
        let mut keep = true;
        for i in window_start..window_end {
            if candidate.action.rawline == out[i].action.rawline {
                if candidate.index >= out[i].index {
                    // Duplicate with a higher index: the window entry stays.
                    keep = false;
                } else {
                    // Duplicate with a lower index: it replaces the window
                    // entry by joining the tail.
                    out.remove(i);
                    window_end -= 1;
                }
                break;
            }
        }
        if keep {
            out.push(candidate.clone());
        }
    }

    // Stable merge of window and tail by trigger priority; window entries
    // win ties.
    let tail = out.split_off(window_end);
    let window = out.split_off(window_start);
    let (mut i, mut j) = (0, 0);
    while i < window.len() && j < tail.len() {
        if Binding::trigger_order(&tail[j], &window[i]) == std::cmp::Ordering::Less {
            out.push(tail[j].clone());
            j += 1;
        } else {
            out.push(window[i].clone());
            i += 1;
        }
    }
    out.extend_from_slice(&window[i..]);
    out.extend_from_slice(&tail[j..]);
}
