//! Bind-file scripting: directive execution, recursive load, keysave
//!
//! Every mutation of the engine can be driven through a small text command
//! language, one directive per line. The same language is what keysave
//! emits, so a saved file replayed through [`KeyBindings::execute_line`]
//! reproduces the binding set.
//!
//! Grammar per non-comment line: `directive arg1 [arg2 ...]`, whitespace
//! tokenized, the final argument greedy (may contain embedded whitespace).

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::action::{tokenize, Action};
use crate::engine::KeyBindings;
use crate::error::BindError;

/// Supplies the optional human comment keysave appends to a bind line when
/// the action names an entity the host knows about
pub trait ActionAnnotator {
    fn annotate(&self, action: &Action) -> Option<String>;
}

/// Strip a `//` comment and surrounding whitespace
fn clean_line(raw: &str) -> &str {
    match raw.find("//") {
        Some(pos) => raw[..pos].trim(),
        None => raw.trim(),
    }
}

impl KeyBindings {
    /// Filename used by keyload/keyreload when none is given
    pub const DEFAULT_FILENAME: &'static str = "uikeys.txt";

    /// Execute one bind-file directive
    ///
    /// Unknown directives (and known directives with missing arguments) are
    /// logged and ignored so a file with a typo still loads its other lines.
    pub fn execute_line(&mut self, line: &str) -> Result<(), BindError> {
        let words = tokenize(line, 3);
        let Some(first) = words.first() else {
            return Ok(());
        };
        let directive = first.to_lowercase();

        match directive.as_str() {
            "keydebug" => {
                let enabled = match words.get(1) {
                    Some(arg) => arg.parse::<i32>().unwrap_or(0) != 0,
                    None => !self.debug_enabled,
                };
                self.set_debug_enabled(enabled);
            }
            "keyload" => {
                let filename = words.get(1).map(String::as_str).unwrap_or(Self::DEFAULT_FILENAME);
                if self.debug_enabled {
                    debug!("keyload: {}", line);
                }
                if self.load_stack.is_empty() && words.len() == 1 {
                    self.load_defaults();
                }
                self.load(filename)?;
            }
            "keyreload" => {
                let filename = words.get(1).map(String::as_str).unwrap_or(Self::DEFAULT_FILENAME);
                if self.debug_enabled {
                    debug!("keyreload: {}", line);
                }
                self.execute_line("unbindall")?;
                self.execute_line("unbind enter chat")?;
                if self.load_stack.is_empty() && words.len() == 1 {
                    self.load_defaults();
                }
                self.load(filename)?;
            }
            "keydefaults" => {
                self.load_defaults();
            }
            "fakemeta" if words.len() > 1 => {
                self.set_fake_meta_key(&words[1])?;
            }
            "keysym" if words.len() > 2 => {
                self.add_key_symbol(&words[1], &words[2])?;
            }
            "bind" if words.len() > 2 => {
                self.bind(&words[1], &words[2])?;
            }
            "unbind" if words.len() > 2 => {
                self.unbind(&words[1], &words[2])?;
            }
            "unbindaction" if words.len() > 1 => {
                self.unbind_action(&words[1]);
            }
            "unbindkeyset" if words.len() > 1 => {
                self.unbind_keyset(&words[1])?;
            }
            "unbindall" => {
                self.clear_all();
            }
            _ => {
                warn!("unknown binding directive: {}", line);
            }
        }

        Ok(())
    }

    /// Load and execute a bind file line by line
    ///
    /// Cyclic inclusion (a file that directly or transitively keyloads
    /// itself) aborts that load with no further mutation; effects of lines
    /// already executed are retained. Per-line failures are logged and the
    /// load continues. The hotkey index is rebuilt once at the end.
    pub fn load(&mut self, filename: &str) -> Result<(), BindError> {
        if self.load_stack.iter().any(|entry| entry == filename) {
            warn!("cyclic bind-file inclusion: {}, load stack:", filename);
            for entry in self.load_stack.iter().rev() {
                warn!("  -> {}", entry);
            }
            return Err(BindError::CyclicLoad(filename.to_string()));
        }

        let content = std::fs::read_to_string(filename)
            .map_err(|e| BindError::Io(format!("{}: {}", filename, e)))?;

        if self.debug_enabled {
            debug!("load: filename={}", filename);
        }

        let prev_build = self.build_hotkeys;
        self.build_hotkeys = false;
        self.load_stack.push(filename.to_string());

        for raw in content.lines() {
            let line = clean_line(raw);
            if line.is_empty() {
                continue;
            }
            if let Err(err) = self.execute_line(line) {
                warn!("{}: {}", filename, err);
            }
        }

        self.load_stack.pop();
        self.build_hotkeys = prev_build;
        self.maybe_rebuild_hotkeys();

        Ok(())
    }

    /// Current bindings as (display text, rawline) pairs in insertion order
    ///
    /// This is the payload of keysave; replaying `unbindall` followed by a
    /// `bind` per pair reproduces an equivalent binding set.
    pub fn serialize(&self) -> Vec<(String, String)> {
        self.table
            .all_by_binding_order()
            .into_iter()
            .map(|binding| (binding.bound_with, binding.action.rawline))
            .collect()
    }

    /// Write the current bindings to a file in bind-file format
    pub fn save(&self, path: &Path) -> Result<(), BindError> {
        self.save_annotated(path, None)
    }

    /// Like [`Self::save`], with an annotator supplying per-action comments
    pub fn save_annotated(
        &self,
        path: &Path,
        annotator: Option<&dyn ActionAnnotator>,
    ) -> Result<(), BindError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, annotator)
            .map_err(|e| BindError::Io(format!("{}: {}", path.display(), e)))?;
        std::fs::write(path, buf).map_err(|e| BindError::Io(format!("{}: {}", path.display(), e)))
    }

    /// Write the bind-file text: a defaults-clearing header, user key
    /// symbols, the fake meta key when set, then one bind line per binding
    /// in insertion order
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        annotator: Option<&dyn ActionAnnotator>,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "unbindall          // clear the defaults")?;
        writeln!(out, "unbind enter chat  // clear the defaults")?;
        writeln!(out)?;

        let user_syms: Vec<(String, String)> = self
            .tables
            .codes
            .user_symbols()
            .iter()
            .map(|(sym, code)| (sym.clone(), self.tables.codes.name(*code)))
            .chain(
                self.tables
                    .scans
                    .user_symbols()
                    .iter()
                    .map(|(sym, code)| (sym.clone(), self.tables.scans.name(*code))),
            )
            .collect();
        if !user_syms.is_empty() {
            for (sym, name) in user_syms {
                writeln!(out, "keysym {:<12} {}", sym, name)?;
            }
            writeln!(out)?;
        }

        if let Some(meta) = self.fake_meta_key {
            writeln!(out, "fakemeta  {}", self.tables.codes.name(meta))?;
            writeln!(out)?;
        }

        for binding in self.table.all_by_binding_order() {
            let comment = annotator.and_then(|a| a.annotate(&binding.action));
            match comment {
                Some(comment) => writeln!(
                    out,
                    "bind {:>18}  {:<20}  // {}",
                    binding.bound_with, binding.action.rawline, comment
                )?,
                None => writeln!(
                    out,
                    "bind {:>18}  {}",
                    binding.bound_with, binding.action.rawline
                )?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> KeyBindings {
        KeyBindings::new()
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("bind a attack"), "bind a attack");
        assert_eq!(clean_line("  bind a attack  // comment"), "bind a attack");
        assert_eq!(clean_line("// whole line"), "");
    }

    #[test]
    fn test_execute_bind_and_unbind() {
        let mut kb = engine();
        kb.execute_line("bind Shift+a attack").unwrap();
        assert_eq!(kb.hotkeys_for("attack"), &["Shift+a"]);

        kb.execute_line("unbind Shift+a attack").unwrap();
        assert!(kb.hotkeys_for("attack").is_empty());
    }

    #[test]
    fn test_execute_bind_greedy_action() {
        let mut kb = engine();
        kb.execute_line("bind Ctrl+b select AllMap+_Builder_Idle+_ClearSelection_SelectOne+")
            .unwrap();
        let hotkeys = kb.hotkeys_for("select AllMap+_Builder_Idle+_ClearSelection_SelectOne+");
        assert_eq!(hotkeys, &["Ctrl+b"]);
    }

    #[test]
    fn test_execute_unbindall() {
        let mut kb = engine();
        kb.execute_line("bind a attack").unwrap();
        kb.execute_line("unbindall").unwrap();
        assert!(kb.hotkeys_for("attack").is_empty());
        assert_eq!(kb.hotkeys_for("chat"), &["enter"]);
    }

    #[test]
    fn test_execute_keydebug_toggles() {
        let mut kb = engine();
        assert!(!kb.debug_enabled());
        kb.execute_line("keydebug").unwrap();
        assert!(kb.debug_enabled());
        kb.execute_line("keydebug 0").unwrap();
        assert!(!kb.debug_enabled());
        kb.execute_line("keydebug 1").unwrap();
        assert!(kb.debug_enabled());
    }

    #[test]
    fn test_execute_unknown_directive_is_ignored() {
        let mut kb = engine();
        kb.execute_line("frobnicate a b").unwrap();
        // Known directive with missing arguments is ignored the same way
        kb.execute_line("bind a").unwrap();
        assert!(kb.serialize().is_empty());
    }

    #[test]
    fn test_execute_propagates_parse_failure() {
        let mut kb = engine();
        assert!(kb.execute_line("bind nosuchkey attack").is_err());
    }

    #[test]
    fn test_serialize_in_insertion_order() {
        let mut kb = engine();
        kb.bind("b", "stop").unwrap();
        kb.bind("a", "attack").unwrap();
        kb.bind("sc_q", "groupselect").unwrap();

        let lines = kb.serialize();
        let pairs: Vec<(&str, &str)> = lines
            .iter()
            .map(|(k, a)| (k.as_str(), a.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("b", "stop"), ("a", "attack"), ("sc_q", "groupselect")]
        );
    }

    #[test]
    fn test_write_to_emits_header_and_binds() {
        let mut kb = engine();
        kb.bind("a", "attack").unwrap();
        kb.set_fake_meta_key("space").unwrap();
        kb.add_key_symbol("panic", "esc").unwrap();

        let mut buf = Vec::new();
        kb.write_to(&mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("unbindall"));
        assert!(text.contains("unbind enter chat"));
        assert!(text.contains("keysym panic"));
        assert!(text.contains("fakemeta  space"));
        assert!(text.contains("attack"));
    }

    #[test]
    fn test_write_to_with_annotator() {
        struct Units;
        impl ActionAnnotator for Units {
            fn annotate(&self, action: &Action) -> Option<String> {
                action
                    .command
                    .strip_prefix("buildunit_")
                    .map(|unit| format!("{} - factory unit", unit))
            }
        }

        let mut kb = engine();
        kb.bind("Ctrl+z", "buildunit_armcom").unwrap();
        kb.bind("a", "attack").unwrap();

        let mut buf = Vec::new();
        kb.write_to(&mut buf, Some(&Units)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("// armcom - factory unit"));
        assert!(!text.contains("attack  //"));
    }
}
