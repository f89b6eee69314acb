//! End-to-end engine tests
//!
//! Full event streams through a `HotkeyEngine`: modifier combinations,
//! produced-character matching, independent registrations, element-bound
//! registrations, sequences, and the macOS meta quirk.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chord::{
    ElementId, EventOutcome, FocusResolver, Hotkey, HotkeyEngine, HotkeyOptions, KeyEvent,
    Modifiers, Trigger,
};

mod common;

fn counter() -> (Rc<RefCell<usize>>, impl FnMut(&KeyEvent, &Hotkey)) {
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    (count, move |_: &KeyEvent, _: &Hotkey| {
        *sink.borrow_mut() += 1;
    })
}

const META: Modifiers = Modifiers::META;
const SHIFT: Modifiers = Modifiers::SHIFT;

// ========================================================================
// Modifier combinations
// ========================================================================

#[test]
fn test_meta_combination_stops_after_meta_release() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register("meta+a", HotkeyOptions::default(), callback);

    engine.dispatch(&KeyEvent::key_down("MetaLeft").with_mods(META));
    engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a").with_mods(META));
    assert_eq!(*count.borrow(), 1);

    engine.dispatch(&KeyEvent::key_up("MetaLeft"));
    engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a"));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_meta_press_purges_stale_keys() {
    common::init_tracing();
    // macOS drops the keyup for non-modifier keys while meta is held; the
    // next meta press must not see a phantom "a" still down.
    let mut engine = HotkeyEngine::new();

    engine.dispatch(&KeyEvent::key_down("MetaLeft").with_mods(META));
    engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a").with_mods(META));
    // The "a" keyup never arrives.
    engine.dispatch(&KeyEvent::key_up("MetaLeft"));
    assert!(!engine.is_pressed("a"));

    engine.dispatch(&KeyEvent::key_down("MetaLeft").with_mods(META));
    assert!(!engine.is_pressed("a"));
    assert!(engine.is_pressed("meta"));
}

// ========================================================================
// Physical code vs produced character
// ========================================================================

#[test]
fn test_shifted_digit_matches_physical_code() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (shift_one, callback_code) = counter();
    let (bang_plain, callback_plain) = counter();
    engine.register("shift+1", HotkeyOptions::default(), callback_code);
    engine.register("!", HotkeyOptions::default(), callback_plain);

    engine.dispatch(&KeyEvent::key_down("ShiftLeft").with_mods(SHIFT));
    engine.dispatch(&KeyEvent::key_down("Digit1").with_key("!").with_mods(SHIFT));

    assert_eq!(*shift_one.borrow(), 1);
    assert_eq!(*bang_plain.borrow(), 0);
}

#[test]
fn test_produced_character_with_use_key() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register(
        "shift+!",
        HotkeyOptions {
            use_key: true,
            ..Default::default()
        },
        callback,
    );

    engine.dispatch(&KeyEvent::key_down("ShiftLeft").with_mods(SHIFT));
    engine.dispatch(&KeyEvent::key_down("Digit1").with_key("!").with_mods(SHIFT));
    assert_eq!(*count.borrow(), 1);

    // The physical code alone never satisfies a produced-character hotkey.
    engine.dispatch(&KeyEvent::key_down("Digit1").with_key("1"));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_use_key_without_modifier_flags() {
    common::init_tracing();
    // Layouts where "!" is an unshifted key: the produced character matches
    // with no modifier flags set.
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register(
        "!",
        HotkeyOptions {
            use_key: true,
            ..Default::default()
        },
        callback,
    );

    engine.dispatch(&KeyEvent::key_down("Slash").with_key("!"));
    assert_eq!(*count.borrow(), 1);
}

// ========================================================================
// Independent registrations
// ========================================================================

#[test]
fn test_held_key_does_not_leak_into_other_registration() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count_a, callback_a) = counter();
    let (count_b, callback_b) = counter();
    engine.register("a", HotkeyOptions::default(), callback_a);
    engine.register("b", HotkeyOptions::default(), callback_b);

    engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a"));
    assert_eq!(*count_a.borrow(), 1);

    // "a" still held.
    engine.dispatch(&KeyEvent::key_down("KeyB").with_key("b"));
    assert_eq!(*count_a.borrow(), 1);
    assert_eq!(*count_b.borrow(), 1);

    engine.dispatch(&KeyEvent::key_up("KeyA").with_key("a"));
    assert_eq!(*count_a.borrow(), 1);
    assert_eq!(*count_b.borrow(), 1);
}

// ========================================================================
// Element-bound registrations
// ========================================================================

struct FixedFocus {
    focused: Option<ElementId>,
    contained_by: Vec<(ElementId, ElementId)>,
}

impl FocusResolver for FixedFocus {
    fn focused_element(&self, _root: ElementId) -> Option<ElementId> {
        self.focused
    }

    fn contains(&self, root: ElementId, element: ElementId) -> bool {
        self.contained_by.iter().any(|&(r, e)| r == root && e == element)
    }
}

#[test]
fn test_bound_registration_requires_focus_within_target() {
    common::init_tracing();
    let target = ElementId(1);
    let inside = ElementId(2);
    let outside = ElementId(9);

    let mut engine = HotkeyEngine::new();
    engine.set_focus_resolver(FixedFocus {
        focused: Some(outside),
        contained_by: vec![(target, inside)],
    });

    let (count, callback) = counter();
    engine.register_bound("a", target, HotkeyOptions::default(), callback);

    // Focus outside the target: no callback, and propagation suppressed.
    let outcome = engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a"));
    assert_eq!(*count.borrow(), 0);
    assert!(outcome.propagation_stopped);
}

#[test]
fn test_bound_registration_fires_for_contained_focus() {
    common::init_tracing();
    let target = ElementId(1);
    let inside = ElementId(2);

    let mut engine = HotkeyEngine::new();
    engine.set_focus_resolver(FixedFocus {
        focused: Some(inside),
        contained_by: vec![(target, inside)],
    });

    let (count, callback) = counter();
    engine.register_bound("a", target, HotkeyOptions::default(), callback);

    let outcome = engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a"));
    assert_eq!(*count.borrow(), 1);
    assert!(!outcome.propagation_stopped);
}

// ========================================================================
// Sequences
// ========================================================================

#[test]
fn test_sequence_through_engine() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register("g>i>t", HotkeyOptions::default(), callback);

    for code in ["KeyG", "KeyI", "KeyT"] {
        engine.dispatch(&KeyEvent::key_down(code));
    }
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_sequence_times_out() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register(
        "g>i",
        HotkeyOptions {
            sequence_timeout: Duration::from_millis(100),
            ..Default::default()
        },
        callback,
    );

    let start = std::time::Instant::now();
    engine.dispatch(&KeyEvent::key_down("KeyG").at(start));
    engine.dispatch(&KeyEvent::key_down("KeyI").at(start + Duration::from_millis(500)));
    assert_eq!(*count.borrow(), 0);

    engine.dispatch(&KeyEvent::key_down("KeyG").at(start + Duration::from_secs(1)));
    engine.dispatch(&KeyEvent::key_down("KeyI").at(start + Duration::from_millis(1050)));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_modifier_presses_do_not_feed_sequences() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register("g>i", HotkeyOptions::default(), callback);

    engine.dispatch(&KeyEvent::key_down("KeyG"));
    engine.dispatch(&KeyEvent::key_down("ShiftLeft").with_mods(SHIFT));
    engine.dispatch(&KeyEvent::key_up("ShiftLeft"));
    engine.dispatch(&KeyEvent::key_down("KeyI").with_mods(Modifiers::NONE));
    assert_eq!(*count.borrow(), 1);
}

// ========================================================================
// Outcomes
// ========================================================================

#[test]
fn test_prevent_default_reported() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (_, callback) = counter();
    engine.register(
        "ctrl+s",
        HotkeyOptions {
            prevent_default: Trigger::Bool(true),
            ..Default::default()
        },
        callback,
    );

    let outcome = engine.dispatch(
        &KeyEvent::key_down("KeyS")
            .with_key("s")
            .with_mods(Modifiers::CTRL),
    );
    assert!(outcome.default_prevented);
    assert!(!outcome.propagation_stopped);

    let miss = engine.dispatch(&KeyEvent::key_down("KeyX").with_key("x"));
    assert_eq!(miss, EventOutcome::default());
}

#[test]
fn test_keyup_registration_fires_on_release_only() {
    common::init_tracing();
    let mut engine = HotkeyEngine::new();
    let (count, callback) = counter();
    engine.register(
        "a",
        HotkeyOptions {
            keyup: true,
            ..Default::default()
        },
        callback,
    );

    engine.dispatch(&KeyEvent::key_down("KeyA").with_key("a"));
    assert_eq!(*count.borrow(), 0);

    engine.dispatch(&KeyEvent::key_up("KeyA").with_key("a"));
    assert_eq!(*count.borrow(), 1);
}
