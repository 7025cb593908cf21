//! Action type: a command identity parsed from a raw binding line

/// A command bound to a key combination
///
/// `command` is the lowercased first word of the line, `extra` the greedy
/// remainder, and `rawline` the original text used for display and for
/// keysave round-tripping. Bindings are deduplicated on `rawline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub command: String,
    pub extra: String,
    pub rawline: String,
}

impl Action {
    /// Parse a raw binding line into an action
    ///
    /// An empty or all-whitespace line produces an empty command, which the
    /// bind mutator rejects.
    pub fn new(line: &str) -> Self {
        let rawline = line.trim().to_string();
        let words = tokenize(&rawline, 2);
        Self {
            command: words.first().map(|w| w.to_lowercase()).unwrap_or_default(),
            extra: words.get(1).cloned().unwrap_or_default(),
            rawline,
        }
    }

    /// The identity used as the hotkey-index key: "command" or "command extra"
    pub fn identity(&self) -> String {
        if self.extra.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.extra)
        }
    }
}

/// Split a line into at most `max_fields` whitespace-separated fields,
/// the final field keeping its embedded whitespace (greedy last field).
///
/// `max_fields` of zero means unlimited.
pub fn tokenize(line: &str, max_fields: usize) -> Vec<String> {
    let mut words = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        if max_fields > 0 && words.len() + 1 == max_fields {
            words.push(rest.to_string());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(i) => {
                words.push(rest[..i].to_string());
                rest = rest[i..].trim_start();
            }
            None => {
                words.push(rest.to_string());
                break;
            }
        }
    }
    words
}
