//! Reference resolution.
//!
//! Reference strings are hand-authored and inconsistent (`brand.600`,
//! `blue dark.600`, `base.white`, with or without braces and mode
//! annotations), so resolution is a ladder of tolerant fallbacks against the
//! merged primitive map rather than strict parsing.

use duotone_model::Mode;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

fn mode_annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*\((?:light|dark) mode\)").unwrap())
}

const BASE_COLOR_NAMES: [&str; 3] = ["white", "black", "transparent"];

/// Primitive color tables, one per mode, plus a merged view used for
/// reference lookups. Dark entries overwrite light ones in the merged view.
#[derive(Debug, Default)]
pub struct PrimitiveMaps {
    light: BTreeMap<String, String>,
    dark: BTreeMap<String, String>,
    merged: HashMap<String, String>,
}

impl PrimitiveMaps {
    pub fn new(light: BTreeMap<String, String>, dark: BTreeMap<String, String>) -> Self {
        let mut merged = HashMap::new();
        merged.extend(light.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.extend(dark.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { light, dark, merged }
    }

    pub fn for_mode(&self, mode: Mode) -> &BTreeMap<String, String> {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn merged(&self) -> &HashMap<String, String> {
        &self.merged
    }

    pub fn into_tables(self) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
        (self.light, self.dark)
    }
}

/// Outcome of resolving a reference string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// Already a literal value; handled upstream
    Literal,
    /// Points back into the semantic layer; the caller must follow that
    /// subtree to the concrete leaf value and resolve again
    SemanticRedirect,
    /// A primitive table entry, with the mode tag carried by the reference
    /// text itself (if any)
    Primitive { name: String, mode: Option<Mode> },
    /// Every fallback failed
    Unresolved,
}

pub fn strip_braces(reference: &str) -> &str {
    if reference.len() >= 2 && reference.starts_with('{') && reference.ends_with('}') {
        &reference[1..reference.len() - 1]
    } else {
        reference
    }
}

/// Mode tag carried literally in the reference text, independent of any
/// cleanup applied to the path segments
pub fn reference_mode(reference: &str) -> Option<Mode> {
    let lower = reference.to_lowercase();
    if lower.contains("(light mode)") {
        Some(Mode::Light)
    } else if lower.contains("(dark mode)") {
        Some(Mode::Dark)
    } else {
        None
    }
}

/// Resolve a reference against the merged primitive map.
///
/// `semantic_label` is the document's color-modes namespace label, used to
/// detect references that point back into the semantic layer instead of the
/// primitive space. Note that `base` is kept as a path segment here (a base
/// color is addressed as `base.<name>`), unlike canonical-name derivation
/// which strips it as a structural prefix.
pub fn resolve_reference(
    reference: &str,
    semantic_label: Option<&str>,
    primitives: &PrimitiveMaps,
) -> RefTarget {
    let reference = strip_braces(reference);

    if reference.starts_with('#') {
        return RefTarget::Literal;
    }
    if let Some(label) = semantic_label {
        if reference.starts_with(label) {
            return RefTarget::SemanticRedirect;
        }
    }

    let mode = reference_mode(reference);
    let cleaned = mode_annotation_re().replace_all(reference, "");
    let parts: Vec<String> = cleaned
        .split('.')
        .filter(|part| *part != "primitives" && *part != "colors")
        .map(|part| part.trim().replace(' ', "_"))
        .filter(|part| !part.is_empty())
        .collect();

    let hit = |name: String| -> Option<RefTarget> {
        if primitives.merged().contains_key(&name) {
            Some(RefTarget::Primitive { name, mode })
        } else {
            None
        }
    };

    if parts.len() == 2 && parts[0] == "base" {
        if let Some(target) = hit(parts[1].clone()) {
            return target;
        }
    }

    if let Some(last) = parts.last() {
        if BASE_COLOR_NAMES.contains(&last.as_str()) {
            if let Some(target) = hit(last.clone()) {
                return target;
            }
        }
    }

    if parts.len() == 1 {
        if let Some(target) = hit(parts[0].clone()) {
            return target;
        }
    }

    if parts.len() >= 2 {
        let folded = format!("{}_{}", parts[parts.len() - 2], parts[parts.len() - 1]);
        if let Some(target) = hit(folded) {
            return target;
        }
        if parts.len() >= 3 {
            let folded = format!(
                "{}_{}_{}",
                parts[parts.len() - 3],
                parts[parts.len() - 2],
                parts[parts.len() - 1]
            );
            if let Some(target) = hit(folded) {
                return target;
            }
        }
    }

    // last resort: any numeric segment with a named predecessor
    for i in 1..parts.len() {
        if !parts[i].is_empty() && parts[i].chars().all(|c| c.is_ascii_digit()) {
            if let Some(target) = hit(format!("{}_{}", parts[i - 1], parts[i])) {
                return target;
            }
        }
    }

    RefTarget::Unresolved
}

/// A resolved semantic color table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SemanticValue {
    /// Symbolic reference to a primitive table entry
    Reference(String),
    /// Concrete value snapshot, optionally recording the cross-mode
    /// primitive it was taken from
    Literal {
        value: String,
        origin: Option<CrossModeOrigin>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossModeOrigin {
    pub primitive: String,
    pub mode: Mode,
}

/// Decide how a semantic token in `token_mode` records its resolved
/// primitive. A reference whose own mode tag names the opposite universe is
/// snapshotted as a literal from that universe's table, so the entry can
/// never drift if the wrong mode's primitives change later. Returns `None`
/// when the primitive is absent from that mode's table; the merged map must
/// not be consulted here, as it could supply the wrong mode's value.
pub fn materialize(
    token_mode: Mode,
    primitive: &str,
    ref_mode: Option<Mode>,
    primitives: &PrimitiveMaps,
) -> Option<SemanticValue> {
    match ref_mode {
        Some(mode) if mode != token_mode => {
            primitives
                .for_mode(mode)
                .get(primitive)
                .map(|value| SemanticValue::Literal {
                    value: value.clone(),
                    origin: Some(CrossModeOrigin {
                        primitive: primitive.to_string(),
                        mode,
                    }),
                })
        }
        _ => Some(SemanticValue::Reference(primitive.to_string())),
    }
}
