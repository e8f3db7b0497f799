//! Mode routing from path text.
//!
//! Markers are plain substrings of the lowercase space-joined path; the
//! upstream document is hand-authored and not schema-enforced, so these are
//! deliberately substring heuristics, not parsed annotations.

use duotone_model::ModeSet;

const LIGHT_MARKER: &str = "light mode";
const DARK_MARKER: &str = "dark mode";

/// Routing for primitive tokens. A token without an explicit marker belongs
/// to both tables. Gray palettes carry the marker inside the shade name and
/// are handled as their own branch, with the same ambiguous-defaults-to-both
/// outcome.
pub fn classify_primitive(path_text: &str) -> ModeSet {
    if path_text.contains("gray") {
        if path_text.contains(LIGHT_MARKER) {
            ModeSet::Light
        } else if path_text.contains(DARK_MARKER) {
            ModeSet::Dark
        } else {
            ModeSet::Both
        }
    } else {
        match (
            path_text.contains(LIGHT_MARKER),
            path_text.contains(DARK_MARKER),
        ) {
            (true, false) => ModeSet::Light,
            (false, true) => ModeSet::Dark,
            _ => ModeSet::Both,
        }
    }
}

/// Routing for semantic tokens: stricter than the primitive rule. A semantic
/// token without an explicit marker belongs to neither table and is skipped.
pub fn classify_semantic(path_text: &str) -> ModeSet {
    if path_text.contains(LIGHT_MARKER) {
        ModeSet::Light
    } else if path_text.contains(DARK_MARKER) {
        ModeSet::Dark
    } else {
        ModeSet::Neither
    }
}
