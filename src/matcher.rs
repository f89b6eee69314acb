//! Event matching and eligibility predicates
//!
//! [`matches_event`] decides whether a live keyboard event satisfies a
//! parsed [`Hotkey`]; the remaining predicates gate scope activation,
//! form-field targets, and the enabled / prevent-default triggers.

use crate::normalize::normalize;
use crate::options::{FormTagPolicy, Trigger};
use crate::parse::Hotkey;
use crate::pressed::PressedKeys;
use crate::types::KeyEvent;

/// Codes that identify a bare modifier keydown/keyup
///
/// These must pass the fast-reject stage so modifier-only hotkeys and the
/// keyup self-exemption below both work.
const BARE_MODIFIER_CODES: [&str; 7] =
    ["ctrl", "control", "unknown", "meta", "alt", "shift", "os"];

/// Tags and ARIA roles treated as form fields
const FORM_TAGS_AND_ROLES: [&str; 12] = [
    "input",
    "textarea",
    "select",
    "searchbox",
    "slider",
    "spinbutton",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "radio",
    "textbox",
];

/// Decide whether `event` satisfies `hotkey`
///
/// `pressed` is consulted only for multi-key chords, where every key of the
/// chord must currently be down; the caller must have updated it with this
/// event before matching. Wildcard hotkeys are the caller's business and
/// never reach this function's key resolution.
pub fn matches_event(
    event: &KeyEvent,
    hotkey: &Hotkey,
    pressed: &PressedKeys,
    ignore_modifiers: bool,
) -> bool {
    let code_token = normalize(event.code.as_deref().unwrap_or(""));
    let produced = event
        .key
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    if hotkey.use_key {
        if hotkey.keys.len() == 1 && hotkey.keys[0] == produced {
            return ignore_modifiers || modifiers_match_exact(event, hotkey);
        }
        return false;
    }

    let key_present = hotkey
        .keys
        .iter()
        .any(|k| *k == code_token || (!produced.is_empty() && *k == produced));

    if !key_present && !BARE_MODIFIER_CODES.contains(&code_token.as_str()) {
        return false;
    }

    if !ignore_modifiers && !modifiers_match(event, hotkey, &code_token) {
        return false;
    }

    // All modifiers are correct; resolve the key itself.
    if hotkey.keys.is_empty() {
        // Modifier-only hotkey like "shift"; the modifier checks are the match.
        return true;
    }

    if hotkey.keys.len() == 1 {
        return hotkey.keys[0] == code_token || (!produced.is_empty() && hotkey.keys[0] == produced);
    }

    // Simultaneous chord: the arriving key must be part of it, and every key
    // of the chord must be physically down right now.
    key_present && pressed.all_pressed(&hotkey.keys)
}

/// Exact modifier equality, used for the produced-character path
fn modifiers_match_exact(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    let expected = hotkey.mods;
    let live = event.mods;

    if expected.alt() != live.alt() {
        return false;
    }
    if expected.shift() != live.shift() {
        return false;
    }
    if expected.mod_key() {
        live.meta() || live.ctrl()
    } else {
        expected.meta() == live.meta() && expected.ctrl() == live.ctrl()
    }
}

/// Modifier equality with a self-exemption for the key being evaluated
///
/// Keyup events arrive with the released modifier's flag already cleared,
/// so releasing `shift` must still satisfy a `shift` hotkey. The check is
/// skipped for whichever modifier the current code identifies.
fn modifiers_match(event: &KeyEvent, hotkey: &Hotkey, code_token: &str) -> bool {
    let expected = hotkey.mods;
    let live = event.mods;

    if expected.alt() != live.alt() && code_token != "alt" {
        return false;
    }
    if expected.shift() != live.shift() && code_token != "shift" {
        return false;
    }

    if expected.mod_key() {
        // "mod" means meta on Apple platforms and ctrl elsewhere; either
        // satisfies it, since the engine cannot know which platform the
        // combination string was written for.
        live.meta() || live.ctrl()
    } else {
        if expected.meta() != live.meta() && code_token != "meta" && code_token != "os" {
            return false;
        }
        if expected.ctrl() != live.ctrl() && code_token != "ctrl" && code_token != "control" {
            return false;
        }
        true
    }
}

/// Whether at least one of the hotkey's scopes is currently active
///
/// `*` in the active set means everything is active. A hotkey that declares
/// scopes while nothing is active never matches.
pub fn is_scope_active(active_scopes: &[String], scopes: Option<&[String]>) -> bool {
    let Some(scopes) = scopes else {
        return true;
    };

    if active_scopes.is_empty() {
        return false;
    }

    active_scopes
        .iter()
        .any(|scope| scope == "*" || scopes.iter().any(|s| s == scope))
}

/// Whether the event originated from a form field (tag or ARIA role)
pub fn is_from_form_field(event: &KeyEvent) -> bool {
    match event.target.form_tag.as_deref() {
        Some(tag) => FORM_TAGS_AND_ROLES.contains(&tag),
        None => false,
    }
}

/// Whether the registration explicitly stays live on this event's target
pub fn is_enabled_on_tag(event: &KeyEvent, policy: &FormTagPolicy) -> bool {
    match policy {
        FormTagPolicy::Disabled => false,
        FormTagPolicy::All => true,
        FormTagPolicy::Only(tags) => match event.target.form_tag.as_deref() {
            Some(tag) => tags.iter().any(|t| t == tag),
            None => false,
        },
    }
}

/// Evaluate the enabled trigger for a matched hotkey
pub fn is_hotkey_enabled(event: &KeyEvent, hotkey: &Hotkey, enabled: &Trigger) -> bool {
    enabled.evaluate(event, hotkey)
}

/// Evaluate the default-action suppression policy for a matched hotkey
pub fn should_prevent_default(event: &KeyEvent, hotkey: &Hotkey, policy: &Trigger) -> bool {
    policy.evaluate(event, hotkey)
}
