//! Key combination: one key plus modifiers, tagged with its key space
//!
//! Combos are the table keys of the binding engine. Equality and hashing are
//! exact (including the wildcard bit); the looser [`KeyCombo::matches`]
//! relation implements the wildcard-modifier rule used by the chain matcher.

use crate::error::BindError;
use crate::keys::{KeyTables, Modifiers};

/// Which key space a combination lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySource {
    /// Logical, keyboard-layout-dependent key code
    Code,
    /// Physical, layout-independent scan code
    Scan,
}

/// A single key press: key, modifier mask and source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: i32,
    pub mods: Modifiers,
    pub source: KeySource,
}

/// Modifier prefixes recognized while parsing combination text
const MOD_PREFIXES: &[(&str, Modifiers)] = &[
    ("any", Modifiers::ANY),
    ("alt", Modifiers::ALT),
    ("ctrl", Modifiers::CTRL),
    ("meta", Modifiers::META),
    ("shift", Modifiers::SHIFT),
];

impl KeyCombo {
    pub const fn new(key: i32, mods: Modifiers, source: KeySource) -> Self {
        Self { key, mods, source }
    }

    /// Check if the wildcard-modifier bit is set
    #[inline]
    pub fn any_mod(&self) -> bool {
        self.mods.any()
    }

    /// The canonical wildcard form of this combination
    ///
    /// Wildcard combinations carry the Any bit alone; concrete modifier bits
    /// are dropped so every mask shares one table key.
    #[inline]
    pub fn with_any(self) -> Self {
        Self {
            mods: Modifiers::ANY,
            ..self
        }
    }

    #[inline]
    pub fn is_key_code(&self) -> bool {
        self.source == KeySource::Code
    }

    /// Wildcard-aware match of this *stored* combination against a pressed one
    ///
    /// With the wildcard bit set only key and source need to agree; otherwise
    /// the modifier masks must be exactly equal.
    pub fn matches(&self, pressed: &KeyCombo) -> bool {
        self.key == pressed.key
            && self.source == pressed.source
            && (self.mods.any() || self.mods == pressed.mods)
    }

    /// Parse combination text like `Ctrl+Shift+esc`, `Any+pause`, `Alt++`,
    /// `sc_a` or `0x2c`
    ///
    /// Modifier names are stripped from the front case-insensitively; the
    /// remainder is the key name, resolved against the key-code table first
    /// and the scan-code table second (which also decides the source kind).
    pub fn parse(text: &str, tables: &KeyTables) -> Result<Self, BindError> {
        let mut rest = text.trim();
        let mut mods = Modifiers::NONE;

        'strip: loop {
            for (name, flag) in MOD_PREFIXES {
                let is_prefix = rest.as_bytes().get(name.len()) == Some(&b'+')
                    && rest
                        .get(..name.len())
                        .map(|head| head.eq_ignore_ascii_case(name))
                        .unwrap_or(false);
                if is_prefix {
                    mods = mods | *flag;
                    rest = &rest[name.len() + 1..];
                    continue 'strip;
                }
            }
            break;
        }

        // Any subsumes the concrete modifiers; keep the canonical form
        if mods.any() {
            mods = Modifiers::ANY;
        }

        let token = rest.to_lowercase();
        if token.is_empty() {
            return Err(BindError::Parse(text.to_string()));
        }

        if let Some(key) = tables.codes.code(&token) {
            Ok(Self::new(key, mods, KeySource::Code))
        } else if let Some(key) = tables.scans.code(&token) {
            Ok(Self::new(key, mods, KeySource::Scan))
        } else {
            Err(BindError::Parse(text.to_string()))
        }
    }

    /// Reconstruct display text, e.g. `Ctrl+Shift+esc`
    pub fn display(&self, tables: &KeyTables) -> String {
        let name = match self.source {
            KeySource::Code => tables.codes.name(self.key),
            KeySource::Scan => tables.scans.name(self.key),
        };
        if self.mods.is_empty() {
            name
        } else {
            format!("{}+{}", self.mods, name)
        }
    }
}
