//! The engine: shared pressed-key state, scope registry, event routing
//!
//! One [`HotkeyEngine`] exists per running application. It owns the single
//! [`PressedKeys`] tracker every registration reads, the scope activation
//! state, and the registered-hotkey introspection list, and it routes each
//! host-delivered event through every armed registration in registration
//! order. The host wires its blur and contextmenu notifications to the
//! matching reset hooks at startup.

use tracing::debug;

use crate::normalize::normalize;
use crate::options::HotkeyOptions;
use crate::parse::Hotkey;
use crate::pressed::PressedKeys;
use crate::registration::Registration;
use crate::scopes::{InMemoryRegistry, RegistryProxy, ScopeRegistry};
use crate::types::{ElementId, EventOutcome, FocusResolver, KeyEvent, KeyEventKind};

/// Handle to a registration, for targeted teardown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

pub struct HotkeyEngine {
    pressed: PressedKeys,
    scopes: ScopeRegistry,
    registry: InMemoryRegistry,
    proxy: Option<Box<dyn RegistryProxy>>,
    focus: Option<Box<dyn FocusResolver>>,
    registrations: Vec<(RegistrationId, Registration)>,
    next_id: u64,
}

impl Default for HotkeyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeyEngine {
    pub fn new() -> Self {
        Self {
            pressed: PressedKeys::new(),
            scopes: ScopeRegistry::new(),
            registry: InMemoryRegistry::new(),
            proxy: None,
            focus: None,
            registrations: Vec::new(),
            next_id: 0,
        }
    }

    /// Start with an explicit set of initially active scopes
    pub fn with_scopes<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            scopes: ScopeRegistry::with_scopes(scopes),
            ..Self::new()
        }
    }

    /// Supply the host's focus lookup for element-bound registrations
    pub fn set_focus_resolver(&mut self, resolver: impl FocusResolver + 'static) {
        self.focus = Some(Box::new(resolver));
    }

    /// Mirror hotkey publications to an external registry
    pub fn set_registry_proxy(&mut self, proxy: impl RegistryProxy + 'static) {
        self.proxy = Some(Box::new(proxy));
    }

    /// Register a hotkey listening on the ambient document
    pub fn register(
        &mut self,
        keys: &str,
        options: HotkeyOptions,
        callback: impl FnMut(&KeyEvent, &Hotkey) + 'static,
    ) -> RegistrationId {
        self.insert(keys, options, Box::new(callback), None)
    }

    /// Register a hotkey scoped to a bound element's subtree
    pub fn register_bound(
        &mut self,
        keys: &str,
        target: ElementId,
        options: HotkeyOptions,
        callback: impl FnMut(&KeyEvent, &Hotkey) + 'static,
    ) -> RegistrationId {
        self.insert(keys, options, Box::new(callback), Some(target))
    }

    fn insert(
        &mut self,
        keys: &str,
        options: HotkeyOptions,
        callback: Box<dyn FnMut(&KeyEvent, &Hotkey)>,
        target: Option<ElementId>,
    ) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;

        let mut registration = Registration::new(keys, options, callback, target);
        if registration.arm(self.scopes.active_scopes()) {
            publish(
                &mut self.registry,
                self.proxy.as_deref_mut(),
                &registration,
            );
        }
        self.registrations.push((id, registration));
        id
    }

    /// Tear a registration down and forget it
    ///
    /// Idempotent: unregistering twice, or with a stale id, is a no-op.
    pub fn unregister(&mut self, id: RegistrationId) {
        let Some(pos) = self.registrations.iter().position(|(rid, _)| *rid == id) else {
            return;
        };
        let (_, mut registration) = self.registrations.remove(pos);
        if registration.is_armed() {
            retract(
                &mut self.registry,
                self.proxy.as_deref_mut(),
                &registration,
            );
        }
        registration.disarm();
        debug!(?id, "registration removed");
    }

    /// Route one keyboard event through every armed registration
    ///
    /// The pressed-key tracker is updated from the raw event before any
    /// matching, so chord verification sees the just-arrived key. Synthetic
    /// events without a physical code are browser noise and ignored. A
    /// registration that suppresses propagation stops the event from
    /// reaching registrations added after it.
    pub fn dispatch(&mut self, event: &KeyEvent) -> EventOutcome {
        let Some(code) = event.code.as_deref() else {
            return EventOutcome::default();
        };

        let token = normalize(code);
        match event.kind {
            KeyEventKind::KeyDown => self.pressed.press(&token),
            KeyEventKind::KeyUp => self.pressed.release(&token),
        }

        let mut outcome = EventOutcome::default();
        for (_, registration) in &mut self.registrations {
            outcome = outcome.merge(registration.handle_event(
                event,
                &self.pressed,
                self.focus.as_deref(),
            ));
            if outcome.propagation_stopped {
                break;
            }
        }
        outcome
    }

    /// The window lost focus: any number of keyups may have been dropped
    pub fn handle_blur(&mut self) {
        self.pressed.clear();
    }

    /// A context menu opened: keyups stop arriving until it closes
    pub fn handle_context_menu(&mut self) {
        self.pressed.clear();
    }

    /// Whether every key in the query is currently physically down
    pub fn is_pressed(&self, query: &str) -> bool {
        self.pressed.is_pressed(query)
    }

    /// Every hotkey currently armed, in registration order
    pub fn registered_hotkeys(&self) -> &[Hotkey] {
        self.registry.hotkeys()
    }

    pub fn active_scopes(&self) -> &[String] {
        self.scopes.active_scopes()
    }

    pub fn enable_scope(&mut self, scope: &str) {
        self.scopes.enable_scope(scope);
        self.rearm_all();
    }

    pub fn disable_scope(&mut self, scope: &str) {
        self.scopes.disable_scope(scope);
        self.rearm_all();
    }

    pub fn toggle_scope(&mut self, scope: &str) {
        self.scopes.toggle_scope(scope);
        self.rearm_all();
    }

    /// Re-evaluate gating for every registration after a scope change
    fn rearm_all(&mut self) {
        for (_, registration) in &mut self.registrations {
            if registration.is_armed() {
                retract(&mut self.registry, self.proxy.as_deref_mut(), registration);
            }
            if registration.arm(self.scopes.active_scopes()) {
                publish(&mut self.registry, self.proxy.as_deref_mut(), registration);
            }
        }
    }
}

fn publish(
    registry: &mut InMemoryRegistry,
    proxy: Option<&mut (dyn RegistryProxy + 'static)>,
    registration: &Registration,
) {
    let hotkeys = registration.hotkeys();
    for hotkey in &hotkeys {
        registry.add_hotkey(hotkey.clone());
    }
    if let Some(proxy) = proxy {
        for hotkey in hotkeys {
            proxy.add_hotkey(hotkey);
        }
    }
}

fn retract(
    registry: &mut InMemoryRegistry,
    proxy: Option<&mut (dyn RegistryProxy + 'static)>,
    registration: &Registration,
) {
    let hotkeys = registration.hotkeys();
    for hotkey in &hotkeys {
        registry.remove_hotkey(hotkey);
    }
    if let Some(proxy) = proxy {
        for hotkey in &hotkeys {
            proxy.remove_hotkey(hotkey);
        }
    }
}
