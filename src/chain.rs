//! Key chains: ordered multi-press sequences and their suffix matcher
//!
//! A chain is read left-to-right as the presses required, oldest first. The
//! last element is the binding-table key; earlier elements are constraints
//! checked against the caller-supplied history of recent presses.

use crate::combo::KeyCombo;
use crate::error::BindError;
use crate::keys::KeyTables;

/// Non-empty ordered sequence of key combinations
///
/// Never mutated after insertion into the binding table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChain(Vec<KeyCombo>);

impl KeyChain {
    /// Chain of a single combination
    pub fn single(combo: KeyCombo) -> Self {
        Self(vec![combo])
    }

    pub fn push(&mut self, combo: KeyCombo) {
        self.0.push(combo);
    }

    /// Force the wildcard-modifier bit on the trailing combination
    ///
    /// Used for stateful commands which must fire under any modifier mask.
    pub fn force_any_tail(&mut self) {
        if let Some(tail) = self.0.last_mut() {
            *tail = tail.with_any();
        }
    }

    /// Right-aligned suffix match of this *stored* chain against the actual
    /// presses
    ///
    /// Fails when the stored chain is longer than the candidate; otherwise
    /// every element must match its counterpart counting backward from the
    /// tails, under the wildcard-modifier rule of [`KeyCombo::matches`].
    pub fn fits(&self, pressed: &KeyChain) -> bool {
        if self.0.len() > pressed.0.len() {
            return false;
        }
        self.0
            .iter()
            .rev()
            .zip(pressed.0.iter().rev())
            .all(|(stored, press)| stored.matches(press))
    }

    /// Reconstruct display text, elements joined by the separator
    pub fn display(&self, tables: &KeyTables) -> String {
        self.0
            .iter()
            .map(|combo| combo.display(tables))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::ops::Deref for KeyChain {
    type Target = [KeyCombo];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a KeyChain {
    type Item = &'a KeyCombo;
    type IntoIter = std::slice::Iter<'a, KeyCombo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse comma-separated combination text into a chain, all elements valid
fn parse_single_chain(text: &str, tables: &KeyTables) -> Option<KeyChain> {
    let mut chain = KeyChain::default();
    for part in text.split(',') {
        chain.push(KeyCombo::parse(part, tables).ok()?);
    }
    if chain.is_empty() {
        None
    } else {
        Some(chain)
    }
}

/// Parse chain text where the separator may also be typed as a literal key
///
/// The separator character itself can be a key name (e.g. a chain of comma
/// presses), so a straight split is ambiguous. On parse failure, comma
/// positions are retried from the end of the string: each candidate position
/// is either kept as a separator (exploring earlier positions first) or
/// substituted with the comma key's hex escape, and the transformed string is
/// re-parsed. The search is an explicit worklist rather than recursion.
pub fn parse_chain(text: &str, tables: &KeyTables) -> Result<KeyChain, BindError> {
    let comma_escape = match tables.codes.code(",") {
        Some(code) => format!("{:#x}", code),
        None => return Err(BindError::Parse(text.to_string())),
    };

    // Each state is a candidate string plus the exclusive upper bound for
    // the next separator position to consider.
    let mut pending = vec![(text.to_string(), text.len())];

    while let Some((candidate, bound)) = pending.pop() {
        if let Some(chain) = parse_single_chain(&candidate, tables) {
            return Ok(chain);
        }

        let Some(cpos) = candidate[..bound].rfind(',') else {
            continue;
        };

        // Substitution branch is pushed first so the keep-as-separator
        // branch (substituting an earlier comma) is explored before it.
        let mut substituted = candidate.clone();
        substituted.replace_range(cpos..cpos + 1, &comma_escape);
        pending.push((substituted, cpos));
        if cpos > 0 {
            pending.push((candidate, cpos));
        }
    }

    Err(BindError::Parse(text.to_string()))
}
