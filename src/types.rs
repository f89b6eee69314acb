//! Core types: Modifiers, KeyEvent, focus resolution, dispatch outcome

use std::fmt;
use std::time::Instant;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// The `MOD` bit is the platform-abstracting modifier: it matches meta on
/// Apple platforms and ctrl elsewhere. Live keyboard events never carry it;
/// it only appears on parsed hotkeys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0000_0001);
    pub const SHIFT: Modifiers = Modifiers(0b0000_0010);
    pub const ALT: Modifiers = Modifiers(0b0000_0100);
    pub const META: Modifiers = Modifiers(0b0000_1000); // Cmd on macOS, Win on Windows
    pub const MOD: Modifiers = Modifiers(0b0001_0000); // meta on Apple, ctrl elsewhere

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool, mod_key: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0000_0001;
        }
        if shift {
            bits |= 0b0000_0010;
        }
        if alt {
            bits |= 0b0000_0100;
        }
        if meta {
            bits |= 0b0000_1000;
        }
        if mod_key {
            bits |= 0b0001_0000;
        }
        Modifiers(bits)
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0000_0001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0000_0010 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0000_0100 != 0
    }

    /// Check if meta (cmd/win) is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b0000_1000 != 0
    }

    /// Check if the platform-abstracting "mod" flag is set
    #[inline]
    pub const fn mod_key(self) -> bool {
        self.0 & 0b0001_0000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
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
        if self.ctrl() {
            parts.push("ctrl");
        }
        if self.shift() {
            parts.push("shift");
        }
        if self.alt() {
            parts.push("alt");
        }
        if self.meta() {
            parts.push("meta");
        }
        if self.mod_key() {
            parts.push("mod");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Whether the event is a key press or a key release
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
}

/// Opaque identifier for a host UI element that hotkeys can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Host-supplied focus lookup for element-bound registrations
///
/// `focused_element` resolves the currently focused element within the root
/// that contains `root` (a shadow root counts), and `contains` answers
/// subtree containment. Both are read-only queries.
pub trait FocusResolver {
    fn focused_element(&self, root: ElementId) -> Option<ElementId>;
    fn contains(&self, root: ElementId, element: ElementId) -> bool;
}

/// What the event's target element looks like, for eligibility gating
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetInfo {
    /// Lowercased tag name or ARIA role of the target, if any
    pub form_tag: Option<String>,
    /// Whether the target is content-editable
    pub content_editable: bool,
}

/// A keyboard event as delivered by the host environment
///
/// `code` is the layout-independent physical identifier (`KeyA`), `key` the
/// character actually produced under the active layout (`!` for Shift+1 on a
/// US layout). A missing `code` marks a synthetic event (e.g. autofill) and
/// is ignored by dispatch.
#[derive(Clone, Debug)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub code: Option<String>,
    pub key: Option<String>,
    pub mods: Modifiers,
    pub target: TargetInfo,
    pub timestamp: Instant,
}

impl KeyEvent {
    /// Create a keydown event for a physical code
    pub fn key_down(code: &str) -> Self {
        Self::new(KeyEventKind::KeyDown, Some(code.to_string()))
    }

    /// Create a keyup event for a physical code
    pub fn key_up(code: &str) -> Self {
        Self::new(KeyEventKind::KeyUp, Some(code.to_string()))
    }

    /// Create a synthetic event with no physical code (browser noise)
    pub fn synthetic(kind: KeyEventKind) -> Self {
        Self::new(kind, None)
    }

    fn new(kind: KeyEventKind, code: Option<String>) -> Self {
        Self {
            kind,
            code,
            key: None,
            mods: Modifiers::NONE,
            target: TargetInfo::default(),
            timestamp: Instant::now(),
        }
    }

    /// Set the produced character
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Set the live modifier flags
    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    /// Mark the event as originating from a form-ish element (tag or role)
    pub fn with_form_tag(mut self, tag: &str) -> Self {
        self.target.form_tag = Some(tag.to_lowercase());
        self
    }

    /// Mark the event as originating from a content-editable element
    pub fn from_content_editable(mut self) -> Self {
        self.target.content_editable = true;
        self
    }

    /// Override the event timestamp (sequence timeout tests)
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether this is a key release
    pub fn is_key_up(&self) -> bool {
        self.kind == KeyEventKind::KeyUp
    }
}

/// Side effects requested while handling an event
///
/// The engine never touches the host event loop itself; it reports which
/// default-action/propagation suppressions the host should apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventOutcome {
    /// Suppress both the default action and further propagation
    pub fn stop(&mut self) {
        self.default_prevented = true;
        self.propagation_stopped = true;
    }

    /// Combine with another outcome
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        EventOutcome {
            default_prevented: self.default_prevented || other.default_prevented,
            propagation_stopped: self.propagation_stopped || other.propagation_stopped,
        }
    }
}
