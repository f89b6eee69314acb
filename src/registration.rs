//! Per-registration lifecycle and event handling
//!
//! A [`Registration`] is one hook call's worth of state: the raw key input,
//! its options, the parsed combination and sequence hotkeys, the keyup
//! suppression latch, and the user callback. It moves between Idle and
//! Armed; arming parses and gates, teardown is idempotent.

use tracing::{debug, warn};

use crate::matcher::{
    is_enabled_on_tag, is_from_form_field, is_hotkey_enabled, is_scope_active, matches_event,
    should_prevent_default,
};
use crate::normalize::{is_modifier_token, normalize};
use crate::options::HotkeyOptions;
use crate::parse::{parse_hotkey, parse_keys_input, Hotkey};
use crate::pressed::PressedKeys;
use crate::sequence::SequenceState;
use crate::types::{ElementId, EventOutcome, FocusResolver, KeyEvent};

/// Callback invoked with the triggering event and the matched hotkey
pub type HotkeyCallback = Box<dyn FnMut(&KeyEvent, &Hotkey)>;

pub struct Registration {
    /// Raw key input as supplied at registration time
    keys: String,
    options: HotkeyOptions,
    callback: HotkeyCallback,
    /// Element this registration is scoped to, if any
    target: Option<ElementId>,
    combos: Vec<Hotkey>,
    sequences: Vec<(Hotkey, SequenceState)>,
    /// Set when a keydown fired, suppresses the matching keyup
    has_fired: bool,
    armed: bool,
}

impl Registration {
    pub(crate) fn new(
        keys: &str,
        options: HotkeyOptions,
        callback: HotkeyCallback,
        target: Option<ElementId>,
    ) -> Self {
        Self {
            keys: keys.to_string(),
            options,
            callback,
            target,
            combos: Vec::new(),
            sequences: Vec::new(),
            has_fired: false,
            armed: false,
        }
    }

    /// Parse the key input and arm, unless gating says otherwise
    ///
    /// Gating failures (statically disabled, or no declared scope active)
    /// leave the registration idle: no hotkeys are parsed or published.
    /// Combination strings mixing the split and sequence characters are a
    /// caller configuration error; they are warned about and skipped.
    pub(crate) fn arm(&mut self, active_scopes: &[String]) -> bool {
        self.disarm();

        if self.options.enabled.is_static_false() {
            return false;
        }

        let scopes = self.options.scopes.as_deref();
        if !is_scope_active(active_scopes, scopes) {
            if scopes.is_some() && active_scopes.is_empty() {
                warn!(
                    keys = %self.keys,
                    "hotkey declares scopes but no scope is active; staying idle"
                );
            }
            return false;
        }

        for combo in parse_keys_input(&self.keys, self.options.delimiter) {
            if combo.contains(self.options.split_key)
                && combo.contains(self.options.sequence_split_key)
            {
                warn!(
                    hotkey = %combo,
                    "combination mixes the split and sequence characters; skipping"
                );
                continue;
            }

            let mut hotkey = parse_hotkey(
                &combo,
                self.options.split_key,
                self.options.sequence_split_key,
                self.options.use_key,
            );
            hotkey.description = self.options.description.clone();

            if hotkey.is_sequence {
                self.sequences.push((hotkey, SequenceState::new()));
            } else {
                self.combos.push(hotkey);
            }
        }

        debug!(
            keys = %self.keys,
            combos = self.combos.len(),
            sequences = self.sequences.len(),
            "registration armed"
        );
        self.armed = true;
        true
    }

    /// Tear down: drop parsed hotkeys, sequence buffers, and the latch
    ///
    /// Safe to call any number of times, in any state.
    pub(crate) fn disarm(&mut self) {
        for (_, state) in &mut self.sequences {
            state.reset();
        }
        self.combos.clear();
        self.sequences.clear();
        self.has_fired = false;
        self.armed = false;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }

    /// Every hotkey this registration currently manages (for publication)
    pub(crate) fn hotkeys(&self) -> Vec<Hotkey> {
        self.combos
            .iter()
            .cloned()
            .chain(self.sequences.iter().map(|(hotkey, _)| hotkey.clone()))
            .collect()
    }

    /// Route one event through this registration
    ///
    /// The caller has already applied the synthetic-event guard and updated
    /// the pressed-key tracker.
    pub(crate) fn handle_event(
        &mut self,
        event: &KeyEvent,
        pressed: &PressedKeys,
        focus: Option<&dyn FocusResolver>,
    ) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        if !self.armed {
            return outcome;
        }

        let is_key_up = event.is_key_up();
        let listener_runs = if is_key_up {
            self.options.fires_on_keyup()
        } else {
            self.options.fires_on_keydown()
        };

        if listener_runs {
            outcome = self.run_listener(event, pressed, focus, is_key_up);
        }

        // The latch lives exactly from a fired keydown to the next keyup.
        if is_key_up {
            self.has_fired = false;
        }

        outcome
    }

    fn run_listener(
        &mut self,
        event: &KeyEvent,
        pressed: &PressedKeys,
        focus: Option<&dyn FocusResolver>,
        is_key_up: bool,
    ) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        if is_from_form_field(event) && !is_enabled_on_tag(event, &self.options.enable_on_form_tags)
        {
            return outcome;
        }

        if let Some(target) = self.target {
            if !self.focus_is_within_target(target, focus) {
                // The hotkey is scoped to the bound subtree; keep the event
                // from reaching outer listeners.
                outcome.stop();
                return outcome;
            }
        }

        if event.target.content_editable && !self.options.enable_on_content_editable {
            return outcome;
        }

        for hotkey in &self.combos {
            let matched = hotkey.is_wildcard()
                || matches_event(event, hotkey, pressed, self.options.ignore_modifiers);
            if !matched {
                continue;
            }

            if let Some(ignore) = &self.options.ignore_event_when {
                if ignore(event) {
                    continue;
                }
            }

            if is_key_up && self.has_fired {
                continue;
            }

            if should_prevent_default(event, hotkey, &self.options.prevent_default) {
                outcome.default_prevented = true;
            }

            if !is_hotkey_enabled(event, hotkey, &self.options.enabled) {
                outcome.stop();
                continue;
            }

            debug!(hotkey = %hotkey.hotkey, "hotkey matched");
            (self.callback)(event, hotkey);

            if !is_key_up {
                self.has_fired = true;
            }
        }

        if !is_key_up {
            self.feed_sequences(event);
        }

        outcome
    }

    /// Feed a keydown into every sequence buffer
    ///
    /// Modifier keydowns do not qualify; they neither extend the buffer nor
    /// touch the sliding window.
    fn feed_sequences(&mut self, event: &KeyEvent) {
        let timeout = self.options.sequence_timeout;

        for (hotkey, state) in &mut self.sequences {
            let current = if hotkey.use_key {
                event
                    .key
                    .as_deref()
                    .map(str::to_lowercase)
                    .unwrap_or_default()
            } else {
                normalize(event.code.as_deref().unwrap_or(""))
            };

            if current.is_empty() || is_modifier_token(&current) {
                continue;
            }

            if state.feed(&current, event.timestamp, timeout, &hotkey.keys) {
                debug!(hotkey = %hotkey.hotkey, "sequence completed");
                (self.callback)(event, hotkey);
            }
        }
    }

    fn focus_is_within_target(
        &self,
        target: ElementId,
        focus: Option<&dyn FocusResolver>,
    ) -> bool {
        let Some(focus) = focus else {
            // Bound registration without a focus resolver cannot verify
            // containment; treat focus as outside.
            warn!("element-bound registration has no focus resolver; suppressing");
            return false;
        };

        match focus.focused_element(target) {
            Some(element) => element == target || focus.contains(target, element),
            None => false,
        }
    }
}
