//! Modifier bitmask and key-name tables for both key spaces
//!
//! Key codes are logical, layout-dependent identifiers (printable keys map
//! to their codepoint, named keys to fixed values above the ASCII range).
//! Scan codes are physical, layout-independent positions using `sc_`-prefixed
//! names with HID-style usage values.

use std::collections::HashMap;
use std::fmt;

/// Modifier keys as a bitfield, including the "Any" wildcard bit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0b0000_0001);
    pub const CTRL: Modifiers = Modifiers(0b0000_0010);
    pub const META: Modifiers = Modifiers(0b0000_0100);
    pub const SHIFT: Modifiers = Modifiers(0b0000_1000);
    /// Wildcard bit: match regardless of which modifiers are held
    pub const ANY: Modifiers = Modifiers(0b0001_0000);

    /// Create modifiers from individual flags
    pub const fn new(alt: bool, ctrl: bool, meta: bool, shift: bool) -> Self {
        let mut bits = 0u8;
        if alt {
            bits |= 0b0000_0001;
        }
        if ctrl {
            bits |= 0b0000_0010;
        }
        if meta {
            bits |= 0b0000_0100;
        }
        if shift {
            bits |= 0b0000_1000;
        }
        Modifiers(bits)
    }

    /// Check if alt is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0000_0001 != 0
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0000_0010 != 0
    }

    /// Check if meta is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b0000_0100 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0000_1000 != 0
    }

    /// Check if the wildcard bit is set
    #[inline]
    pub const fn any(self) -> bool {
        self.0 & 0b0001_0000 != 0
    }

    /// Check if no modifiers (and no wildcard) are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// This modifier set with the wildcard bit set
    #[inline]
    pub const fn with_any(self) -> Modifiers {
        self.union(Modifiers::ANY)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.any() {
            parts.push("Any");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.meta() {
            parts.push("Meta");
        }
        if self.shift() {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Named key codes (beyond printable characters, which map to their codepoint)
///
/// Canonical name first where a code has aliases; `name()` returns the first
/// entry for a code.
const KEY_CODE_NAMES: &[(&str, i32)] = &[
    ("backspace", 8),
    ("tab", 9),
    ("clear", 12),
    ("enter", 13),
    ("return", 13),
    ("pause", 19),
    ("esc", 27),
    ("escape", 27),
    ("space", 32),
    ("delete", 127),
    ("numpad0", 256),
    ("numpad1", 257),
    ("numpad2", 258),
    ("numpad3", 259),
    ("numpad4", 260),
    ("numpad5", 261),
    ("numpad6", 262),
    ("numpad7", 263),
    ("numpad8", 264),
    ("numpad9", 265),
    ("numpad.", 266),
    ("numpad/", 267),
    ("numpad*", 268),
    ("numpad-", 269),
    ("numpad+", 270),
    ("numpad_enter", 271),
    ("numpad=", 272),
    ("up", 273),
    ("down", 274),
    ("right", 275),
    ("left", 276),
    ("insert", 277),
    ("home", 278),
    ("end", 279),
    ("pageup", 280),
    ("pagedown", 281),
    ("f1", 282),
    ("f2", 283),
    ("f3", 284),
    ("f4", 285),
    ("f5", 286),
    ("f6", 287),
    ("f7", 288),
    ("f8", 289),
    ("f9", 290),
    ("f10", 291),
    ("f11", 292),
    ("f12", 293),
    ("shift", 304),
    ("ctrl", 306),
    ("alt", 308),
    ("meta", 310),
];

/// Physical key names with HID-style usage values
const SCAN_CODE_NAMES: &[(&str, i32)] = &[
    ("sc_a", 4),
    ("sc_b", 5),
    ("sc_c", 6),
    ("sc_d", 7),
    ("sc_e", 8),
    ("sc_f", 9),
    ("sc_g", 10),
    ("sc_h", 11),
    ("sc_i", 12),
    ("sc_j", 13),
    ("sc_k", 14),
    ("sc_l", 15),
    ("sc_m", 16),
    ("sc_n", 17),
    ("sc_o", 18),
    ("sc_p", 19),
    ("sc_q", 20),
    ("sc_r", 21),
    ("sc_s", 22),
    ("sc_t", 23),
    ("sc_u", 24),
    ("sc_v", 25),
    ("sc_w", 26),
    ("sc_x", 27),
    ("sc_y", 28),
    ("sc_z", 29),
    ("sc_1", 30),
    ("sc_2", 31),
    ("sc_3", 32),
    ("sc_4", 33),
    ("sc_5", 34),
    ("sc_6", 35),
    ("sc_7", 36),
    ("sc_8", 37),
    ("sc_9", 38),
    ("sc_0", 39),
    ("sc_enter", 40),
    ("sc_esc", 41),
    ("sc_backspace", 42),
    ("sc_tab", 43),
    ("sc_space", 44),
    ("sc_minus", 45),
    ("sc_equals", 46),
    ("sc_leftbracket", 47),
    ("sc_rightbracket", 48),
    ("sc_backslash", 49),
    ("sc_semicolon", 51),
    ("sc_apostrophe", 52),
    ("sc_grave", 53),
    ("sc_comma", 54),
    ("sc_period", 55),
    ("sc_slash", 56),
    ("sc_capslock", 57),
    ("sc_f1", 58),
    ("sc_f2", 59),
    ("sc_f3", 60),
    ("sc_f4", 61),
    ("sc_f5", 62),
    ("sc_f6", 63),
    ("sc_f7", 64),
    ("sc_f8", 65),
    ("sc_f9", 66),
    ("sc_f10", 67),
    ("sc_f11", 68),
    ("sc_f12", 69),
    ("sc_insert", 73),
    ("sc_home", 74),
    ("sc_pageup", 75),
    ("sc_delete", 76),
    ("sc_end", 77),
    ("sc_pagedown", 78),
    ("sc_right", 79),
    ("sc_left", 80),
    ("sc_down", 81),
    ("sc_up", 82),
];

/// Bidirectional name ↔ code table for one key space
///
/// Holds the built-in names plus user-defined aliases (`keysym` directive).
/// For the key-code space, single printable characters resolve to their
/// codepoint and `0x..` literals to their numeric value.
#[derive(Debug, Clone)]
pub struct KeyNames {
    defaults: &'static [(&'static str, i32)],
    lookup: HashMap<&'static str, i32>,
    user_syms: Vec<(String, i32)>,
    printable: bool,
}

impl KeyNames {
    /// Table for the logical key-code space
    pub fn key_codes() -> Self {
        Self::from_defaults(KEY_CODE_NAMES, true)
    }

    /// Table for the physical scan-code space
    pub fn scan_codes() -> Self {
        Self::from_defaults(SCAN_CODE_NAMES, false)
    }

    fn from_defaults(defaults: &'static [(&'static str, i32)], printable: bool) -> Self {
        Self {
            defaults,
            lookup: defaults.iter().copied().collect(),
            user_syms: Vec::new(),
            printable,
        }
    }

    /// Resolve a key name to its code
    ///
    /// Accepts built-in names, user aliases, `0x..` literals and (in the
    /// key-code space) single printable characters. Case-insensitive.
    pub fn code(&self, name: &str) -> Option<i32> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        if let Some(&code) = self.lookup.get(name.as_str()) {
            return Some(code);
        }
        if let Some((_, code)) = self.user_syms.iter().find(|(sym, _)| *sym == name) {
            return Some(*code);
        }
        if let Some(hex) = name.strip_prefix("0x") {
            return i32::from_str_radix(hex, 16).ok();
        }
        if self.printable {
            let mut chars = name.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Some(c as i32);
            }
        }
        None
    }

    /// Human-readable name for a code
    ///
    /// Falls back to the printable character or a hex literal for codes
    /// without a registered name.
    pub fn name(&self, code: i32) -> String {
        if let Some((name, _)) = self.defaults.iter().find(|(_, c)| *c == code) {
            return (*name).to_string();
        }
        if let Some((sym, _)) = self.user_syms.iter().find(|(_, c)| *c == code) {
            return sym.clone();
        }
        if self.printable && (33..=126).contains(&code) {
            if let Some(c) = char::from_u32(code as u32) {
                return c.to_string();
            }
        }
        format!("{:#x}", code)
    }

    /// Register a user alias for a code
    ///
    /// Fails when the symbol is malformed or already names a key.
    pub fn add_symbol(&mut self, sym: &str, code: i32) -> bool {
        let sym = sym.trim().to_lowercase();
        if !Self::is_valid_symbol(&sym) || self.code(&sym).is_some() {
            return false;
        }
        self.user_syms.push((sym, code));
        true
    }

    /// User aliases in registration order, for keysave
    pub fn user_symbols(&self) -> &[(String, i32)] {
        &self.user_syms
    }

    /// Drop all user aliases
    pub fn reset(&mut self) {
        self.user_syms.clear();
    }

    fn is_valid_symbol(sym: &str) -> bool {
        let mut chars = sym.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

/// The two name tables an engine parses against
#[derive(Debug, Clone)]
pub struct KeyTables {
    pub codes: KeyNames,
    pub scans: KeyNames,
}

impl KeyTables {
    pub fn new() -> Self {
        Self {
            codes: KeyNames::key_codes(),
            scans: KeyNames::scan_codes(),
        }
    }

    /// Drop user aliases from both tables
    pub fn reset(&mut self) {
        self.codes.reset();
        self.scans.reset();
    }
}

impl Default for KeyTables {
    fn default() -> Self {
        Self::new()
    }
}
