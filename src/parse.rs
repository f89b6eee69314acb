//! Hotkey parsing: combination strings into structured [`Hotkey`] values

use std::fmt;

use crate::normalize::{is_modifier_token, normalize};
use crate::types::Modifiers;

pub const DEFAULT_SPLIT_KEY: char = '+';
pub const DEFAULT_SEQUENCE_SPLIT_KEY: char = '>';
pub const DEFAULT_DELIMITER: char = ',';

/// A parsed hotkey: modifier flags plus ordered canonical key tokens
///
/// Immutable once parsed. `keys` is empty for modifier-only hotkeys
/// (`"shift"`), holds one token for the common case, several for a
/// simultaneous chord (`"a+b+c"`), and the raw ordered split for sequences
/// (`"g>i>t"`). Structural equality over the whole value is what the
/// registry proxy uses for removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotkey {
    /// Canonical key tokens; excludes reserved modifier keywords unless
    /// this is a sequence (sequences keep the raw split tokens)
    pub keys: Vec<String>,
    /// Modifier flags derived from the reserved keywords in the source
    pub mods: Modifiers,
    /// Match against the produced character instead of the physical code
    pub use_key: bool,
    /// Whether `keys` is an ordered sequence rather than a simultaneous chord
    pub is_sequence: bool,
    /// The trimmed source string, kept for equality and introspection
    pub hotkey: String,
    /// Free-form description for cheat-sheet style UIs
    pub description: Option<String>,
    /// Opaque pass-through, no semantic weight to the matcher
    pub metadata: Option<serde_json::Value>,
}

impl Hotkey {
    /// Parse a combination string with the default split characters
    pub fn parse(hotkey: &str) -> Self {
        parse_hotkey(hotkey, DEFAULT_SPLIT_KEY, DEFAULT_SEQUENCE_SPLIT_KEY, false)
    }

    /// Attach a description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Attach opaque metadata (builder pattern)
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether any key slot is the `*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.keys.iter().any(|k| k == "*")
    }

    /// Canonical display string: modifiers first, then keys
    pub fn display_string(&self) -> String {
        let joiner = if self.is_sequence { ">" } else { "+" };
        let mut parts = Vec::new();
        if !self.mods.is_empty() && !self.is_sequence {
            parts.push(self.mods.to_string());
        }
        parts.extend(self.keys.iter().cloned());
        parts.join(joiner)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hotkey)
    }
}

/// Split a combined hotkey input (`"ctrl+a, shift+b"`) into individual
/// combination strings, lowercased and trimmed
pub fn parse_keys_input(keys: &str, delimiter: char) -> Vec<String> {
    keys.to_lowercase()
        .split(delimiter)
        .map(|part| part.trim().to_string())
        .collect()
}

/// Parse a single combination string into a [`Hotkey`]
///
/// A string containing `sequence_split_key` parses as an ordered sequence,
/// splitting on that character; everything else splits on `split_key`.
/// Every token runs through [`normalize`]. Callers are responsible for
/// rejecting strings that mix both characters before parsing; the parser
/// itself stays pure and total.
pub fn parse_hotkey(
    hotkey: &str,
    split_key: char,
    sequence_split_key: char,
    use_key: bool,
) -> Hotkey {
    // Inputs like "ctrl+a, shift+a" leave a leading space on the second combo.
    let trimmed = hotkey.trim();

    let is_sequence = trimmed.contains(sequence_split_key);
    let split = if is_sequence {
        sequence_split_key
    } else {
        split_key
    };

    let tokens: Vec<String> = trimmed
        .to_lowercase()
        .split(split)
        .map(normalize)
        .collect();

    let has = |token: &str| tokens.iter().any(|t| t == token);
    let mods = Modifiers::new(
        has("ctrl") || has("control"),
        has("shift"),
        has("alt"),
        has("meta"),
        has("mod"),
    );

    // Sequences keep the raw split tokens; combinations filter modifiers out.
    let keys = if is_sequence {
        tokens
    } else {
        tokens
            .into_iter()
            .filter(|t| !is_modifier_token(t))
            .collect()
    };

    Hotkey {
        keys,
        mods,
        use_key,
        is_sequence,
        hotkey: trimmed.to_string(),
        description: None,
        metadata: None,
    }
}
