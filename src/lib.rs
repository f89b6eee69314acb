//! Hotkey matching engine for browser-style keyboard input
//!
//! Turns hotkey strings such as `ctrl+s`, `a+b+c`, or `g>i>t` into live
//! registrations that fire callbacks when the matching keyboard events
//! arrive. The host delivers raw keydown/keyup events to a [`HotkeyEngine`]
//! and applies the returned [`EventOutcome`] (default prevention,
//! propagation stop) itself; the engine performs no I/O of its own.
//!
//! Combinations match a single event against held modifier flags, chords
//! additionally require every named key to be physically down, and
//! sequences match ordered key presses within a sliding timeout window.

pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod options;
pub mod parse;
pub mod pressed;
pub mod recorder;
pub mod registration;
pub mod scopes;
pub mod sequence;
pub mod types;


// Re-export commonly used types
pub use config::{load_bindings_file, parse_bindings_yaml, BindingConfig, HotkeyError};
pub use engine::{HotkeyEngine, RegistrationId};
pub use matcher::matches_event;
pub use normalize::normalize;
pub use options::{FormTagPolicy, HotkeyOptions, Trigger};
pub use parse::{parse_hotkey, parse_keys_input, Hotkey};
pub use pressed::PressedKeys;
pub use recorder::HotkeyRecorder;
pub use scopes::{InMemoryRegistry, RegistryProxy, ScopeRegistry};
pub use types::{
    ElementId, EventOutcome, FocusResolver, KeyEvent, KeyEventKind, Modifiers, TargetInfo,
};
