//! Per-registration configuration
//!
//! One plain struct instead of positional option/dependency overloads: the
//! host builds a [`HotkeyOptions`] value once and hands it to the engine at
//! registration time. Re-arming on changed configuration is an explicit
//! host decision, not an implicit memoization concern.

use std::rc::Rc;
use std::time::Duration;

use crate::parse::{DEFAULT_DELIMITER, DEFAULT_SEQUENCE_SPLIT_KEY, DEFAULT_SPLIT_KEY};
use crate::types::KeyEvent;
use crate::Hotkey;

/// A boolean policy that can also be decided per event
///
/// Used for both the enabled gate and the default-action suppression
/// policy, mirroring how hosts want static flags for the common case and a
/// predicate for the rest.
#[derive(Clone)]
pub enum Trigger {
    Bool(bool),
    Fn(Rc<dyn Fn(&KeyEvent, &Hotkey) -> bool>),
}

impl Trigger {
    pub fn evaluate(&self, event: &KeyEvent, hotkey: &Hotkey) -> bool {
        match self {
            Trigger::Bool(value) => *value,
            Trigger::Fn(predicate) => predicate(event, hotkey),
        }
    }

    /// Whether this is the literal `false` (checked at arm time)
    pub fn is_static_false(&self) -> bool {
        matches!(self, Trigger::Bool(false))
    }
}

impl From<bool> for Trigger {
    fn from(value: bool) -> Self {
        Trigger::Bool(value)
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Bool(value) => write!(f, "Trigger::Bool({value})"),
            Trigger::Fn(_) => write!(f, "Trigger::Fn(..)"),
        }
    }
}

/// Whether hotkeys stay live when the event originates from a form field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormTagPolicy {
    /// Form fields swallow hotkeys (the default)
    #[default]
    Disabled,
    /// Hotkeys fire on any target
    All,
    /// Hotkeys fire only on the listed tags/roles (lowercased comparison)
    Only(Vec<String>),
}

impl FormTagPolicy {
    /// Build an `Only` policy from tag names
    pub fn only<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FormTagPolicy::Only(
            tags.into_iter()
                .map(|tag| tag.as_ref().to_lowercase())
                .collect(),
        )
    }
}

/// Configuration for a single registration
#[derive(Clone)]
pub struct HotkeyOptions {
    /// Whether the hotkey is live at all; a static `false` prevents arming,
    /// a predicate is re-evaluated per matched event
    pub enabled: Trigger,
    /// Form-field eligibility policy
    pub enable_on_form_tags: FormTagPolicy,
    /// Keep matching when the target is content-editable
    pub enable_on_content_editable: bool,
    /// Skip events matching this predicate
    pub ignore_event_when: Option<Rc<dyn Fn(&KeyEvent) -> bool>>,
    /// Character joining keys inside one combination
    pub split_key: char,
    /// Character separating distinct combinations in one input
    pub delimiter: char,
    /// Character joining the steps of an ordered sequence
    pub sequence_split_key: char,
    /// Scopes this registration belongs to; `None` means always live
    pub scopes: Option<Vec<String>>,
    /// Fire on keydown; `None` means "yes, unless only keyup was requested"
    pub keydown: Option<bool>,
    /// Fire on keyup
    pub keyup: bool,
    /// Default-action suppression policy
    pub prevent_default: Trigger,
    /// Description attached to every parsed hotkey of this registration
    pub description: Option<String>,
    /// Skip all modifier verification while matching
    pub ignore_modifiers: bool,
    /// Match against the produced character instead of the physical code
    pub use_key: bool,
    /// Sliding window for sequence detection
    pub sequence_timeout: Duration,
}

impl Default for HotkeyOptions {
    fn default() -> Self {
        Self {
            enabled: Trigger::Bool(true),
            enable_on_form_tags: FormTagPolicy::Disabled,
            enable_on_content_editable: false,
            ignore_event_when: None,
            split_key: DEFAULT_SPLIT_KEY,
            delimiter: DEFAULT_DELIMITER,
            sequence_split_key: DEFAULT_SEQUENCE_SPLIT_KEY,
            scopes: None,
            keydown: None,
            keyup: false,
            prevent_default: Trigger::Bool(false),
            description: None,
            ignore_modifiers: false,
            use_key: false,
            sequence_timeout: Duration::from_millis(1000),
        }
    }
}

impl std::fmt::Debug for HotkeyOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyOptions")
            .field("enabled", &self.enabled)
            .field("enable_on_form_tags", &self.enable_on_form_tags)
            .field("enable_on_content_editable", &self.enable_on_content_editable)
            .field("ignore_event_when", &self.ignore_event_when.as_ref().map(|_| ".."))
            .field("split_key", &self.split_key)
            .field("delimiter", &self.delimiter)
            .field("sequence_split_key", &self.sequence_split_key)
            .field("scopes", &self.scopes)
            .field("keydown", &self.keydown)
            .field("keyup", &self.keyup)
            .field("prevent_default", &self.prevent_default)
            .field("description", &self.description)
            .field("ignore_modifiers", &self.ignore_modifiers)
            .field("use_key", &self.use_key)
            .field("sequence_timeout", &self.sequence_timeout)
            .finish()
    }
}

impl HotkeyOptions {
    /// Whether combination hotkeys fire on keydown events
    pub fn fires_on_keydown(&self) -> bool {
        self.keydown.unwrap_or(!self.keyup)
    }

    /// Whether combination hotkeys fire on keyup events
    pub fn fires_on_keyup(&self) -> bool {
        self.keyup
    }
}
