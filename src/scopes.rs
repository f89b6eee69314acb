//! Scope activation state and the registered-hotkey introspection list
//!
//! Scopes are named activation groups; a registration that declares scopes
//! is only live while at least one of them is active, and `*` means every
//! scope is active. The registry side is a plain list of the fully-resolved
//! hotkeys the engine currently manages, for cheat-sheet style UIs.

use crate::matcher::is_scope_active;
use crate::parse::Hotkey;

/// Wildcard scope name meaning "all scopes active"
pub const WILDCARD_SCOPE: &str = "*";

/// Consumer of hotkey publications
///
/// The engine publishes every hotkey it arms and retracts it on teardown.
/// Removal is by full structural equality of the [`Hotkey`] value.
pub trait RegistryProxy {
    fn add_hotkey(&mut self, hotkey: Hotkey);
    fn remove_hotkey(&mut self, hotkey: &Hotkey);
}

/// Set of currently active scope names, `["*"]` initially
#[derive(Debug, Clone)]
pub struct ScopeRegistry {
    active: Vec<String>,
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self {
            active: vec![WILDCARD_SCOPE.to_string()],
        }
    }
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an explicit set of active scopes
    pub fn with_scopes<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            active: scopes.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Activate a scope
    ///
    /// Enabling a concrete scope while the wildcard is active narrows the
    /// active set to just that scope.
    pub fn enable_scope(&mut self, scope: &str) {
        if self.active.iter().any(|s| s == WILDCARD_SCOPE) {
            self.active = vec![scope.to_string()];
        } else if !self.active.iter().any(|s| s == scope) {
            self.active.push(scope.to_string());
        }
    }

    /// Deactivate a scope
    pub fn disable_scope(&mut self, scope: &str) {
        self.active.retain(|s| s != scope);
    }

    /// Flip a scope's activation
    pub fn toggle_scope(&mut self, scope: &str) {
        if self.active.iter().any(|s| s == scope) {
            self.disable_scope(scope);
        } else {
            self.enable_scope(scope);
        }
    }

    /// The currently active scope names
    pub fn active_scopes(&self) -> &[String] {
        &self.active
    }

    /// Whether a hotkey declaring `scopes` would currently be live
    pub fn is_active(&self, scopes: Option<&[String]>) -> bool {
        is_scope_active(&self.active, scopes)
    }
}

/// Registered-hotkey list with structural-equality removal
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    hotkeys: Vec<Hotkey>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every hotkey currently published, in registration order
    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }
}

impl RegistryProxy for InMemoryRegistry {
    fn add_hotkey(&mut self, hotkey: Hotkey) {
        self.hotkeys.push(hotkey);
    }

    fn remove_hotkey(&mut self, hotkey: &Hotkey) {
        if let Some(pos) = self.hotkeys.iter().position(|h| h == hotkey) {
            self.hotkeys.remove(pos);
        }
    }
}
