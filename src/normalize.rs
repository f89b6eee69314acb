//! Key token normalization
//!
//! Maps raw platform key identifiers (physical codes like `ShiftLeft`,
//! produced characters like `!`, named keys like `Escape`) into one
//! canonical lowercase vocabulary. This is the single point of
//! platform-quirk absorption; every other module goes through
//! [`normalize`] instead of re-deriving mappings.

/// Keywords that denote modifiers in a combination string
///
/// `capslock` is reserved (it never lands in a non-sequence key list) but
/// derives no modifier flag.
pub const RESERVED_MODIFIERS: [&str; 7] =
    ["shift", "alt", "meta", "mod", "ctrl", "control", "capslock"];

/// Normalize a raw key identifier into its canonical token
///
/// Applies the fixed alias table, lowercases and trims, then strips the
/// first occurrence of the generic prefixes physical codes carry (`KeyA` →
/// `a`, `Digit1` → `1`, `Numpad4` → `4`). Arrow keys normalize to the
/// `arrowup` family; short names (`up`) alias into it. Pure, total, and
/// idempotent: unknown tokens pass through lowercased and trimmed.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mapped = alias(trimmed).unwrap_or(trimmed);
    let lowered = mapped.to_lowercase();
    // Mixed-case spellings of the lowercase aliases ("Control", "Esc") miss
    // the first lookup; a second one after lowercasing keeps the result
    // canonical for every casing.
    let canonical = alias(&lowered).map(str::to_string).unwrap_or(lowered);
    strip_code_noise(&canonical)
}

/// Whether a canonical token is a reserved modifier keyword
pub fn is_modifier_token(token: &str) -> bool {
    RESERVED_MODIFIERS.contains(&token)
}

/// Fixed alias table, applied before lowercasing
///
/// Left/right physical variants collapse into one logical modifier; legacy
/// `OSLeft`/`OSRight` codes map to meta.
fn alias(key: &str) -> Option<&'static str> {
    match key {
        "esc" => Some("escape"),
        "return" => Some("enter"),
        "ctl" | "control" => Some("ctrl"),
        "caps" => Some("capslock"),
        "left" => Some("arrowleft"),
        "right" => Some("arrowright"),
        "up" => Some("arrowup"),
        "down" => Some("arrowdown"),
        "ShiftLeft" | "ShiftRight" => Some("shift"),
        "AltLeft" | "AltRight" => Some("alt"),
        "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => Some("meta"),
        "ControlLeft" | "ControlRight" => Some("ctrl"),
        _ => None,
    }
}

/// Strip the first occurrence of `key`, `digit`, or `numpad`
///
/// Earliest position wins; at equal positions `key` beats `digit` beats
/// `numpad`. Only one occurrence is removed, so `keya` → `a` but a second
/// prefix in the same token survives.
fn strip_code_noise(token: &str) -> String {
    const NOISE: [&str; 3] = ["key", "digit", "numpad"];

    let mut best: Option<(usize, usize)> = None; // (position, length)
    for pattern in NOISE {
        if let Some(pos) = token.find(pattern) {
            if best.map_or(true, |(p, _)| pos < p) {
                best = Some((pos, pattern.len()));
            }
        }
    }

    match best {
        Some((pos, len)) => {
            let mut out = String::with_capacity(token.len() - len);
            out.push_str(&token[..pos]);
            out.push_str(&token[pos + len..]);
            out
        }
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_codes() {
        assert_eq!(normalize("KeyA"), "a");
        assert_eq!(normalize("Digit1"), "1");
        assert_eq!(normalize("Numpad4"), "4");
        assert_eq!(normalize("Comma"), "comma");
        assert_eq!(normalize("Escape"), "escape");
    }

    #[test]
    fn test_modifier_variants_collapse() {
        assert_eq!(normalize("ShiftLeft"), "shift");
        assert_eq!(normalize("ShiftRight"), "shift");
        assert_eq!(normalize("ControlLeft"), "ctrl");
        assert_eq!(normalize("OSLeft"), "meta");
        assert_eq!(normalize("OSRight"), "meta");
        assert_eq!(normalize("MetaRight"), "meta");
        assert_eq!(normalize("AltLeft"), "alt");
    }

    #[test]
    fn test_aliases() {
        assert_eq!(normalize("esc"), "escape");
        assert_eq!(normalize("return"), "enter");
        assert_eq!(normalize("control"), "ctrl");
        assert_eq!(normalize("ctl"), "ctrl");
        assert_eq!(normalize("caps"), "capslock");
    }

    #[test]
    fn test_arrows_normalize_to_long_form() {
        assert_eq!(normalize("up"), "arrowup");
        assert_eq!(normalize("down"), "arrowdown");
        assert_eq!(normalize("left"), "arrowleft");
        assert_eq!(normalize("right"), "arrowright");
        assert_eq!(normalize("ArrowUp"), "arrowup");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(normalize("  F5 "), "f5");
        assert_eq!(normalize("!"), "!");
        assert_eq!(normalize("space"), "space");
    }

    #[test]
    fn test_mixed_case_aliases() {
        assert_eq!(normalize("Control"), "ctrl");
        assert_eq!(normalize("Esc"), "escape");
        assert_eq!(normalize("Up"), "arrowup");
        assert_eq!(normalize("Return"), "enter");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "KeyA", "ShiftLeft", "up", "esc", "Numpad7", "!", "F12", "Control", "Esc",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "normalize({raw:?}) not idempotent");
        }
    }

    #[test]
    fn test_strip_removes_single_earliest_occurrence() {
        // Earliest match wins even when another pattern appears later.
        assert_eq!(strip_code_noise("numpadkey"), "key");
        assert_eq!(strip_code_noise("keynumpad"), "numpad");
    }

    #[test]
    fn test_reserved_modifiers() {
        assert!(is_modifier_token("shift"));
        assert!(is_modifier_token("mod"));
        assert!(is_modifier_token("capslock"));
        assert!(!is_modifier_token("a"));
        assert!(!is_modifier_token("escape"));
    }
}
