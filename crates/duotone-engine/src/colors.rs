//! Primitive and semantic color extraction.

use crate::classify::{classify_primitive, classify_semantic};
use crate::naming::{base_name, canonical_name, NameTally};
use crate::resolve::{
    materialize, resolve_reference, strip_braces, PrimitiveMaps, RefTarget, SemanticValue,
};
use crate::walker::walk_leaves;
use duotone_common::{DiagnosticKind, Diagnostics};
use duotone_model::{LeafKind, Mode, ModeSet, TokenDocument, TokenLeaf, TokenPath};
use std::collections::BTreeMap;
use tracing::info;

/// Strip the alpha byte from a 9-character `#RRGGBBAA` value
pub fn normalize_color_value(value: &str) -> String {
    if value.chars().count() == 9 {
        value.chars().take(7).collect()
    } else {
        value.to_string()
    }
}

/// Build the per-mode primitive color tables from the `primitives`
/// namespace. Naming is two-pass: tally base names per mode, then assign
/// canonical names against the resulting conflict sets.
pub fn extract_primitive_colors(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut light = BTreeMap::new();
    let mut dark = BTreeMap::new();

    let group = match doc.namespace_exact("primitives") {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'primitives' namespace not found in the token document",
            );
            return (light, dark);
        }
    };

    let root = TokenPath::new();

    let mut tally = NameTally::new();
    walk_leaves(group, &root, &mut |path, leaf| {
        if leaf.kind != LeafKind::Color {
            return;
        }
        let modes = classify_primitive(&path.joined_lower());
        tally.record(modes, &base_name(path));
    });
    let conflicts = tally.into_conflicts();

    walk_leaves(group, &root, &mut |path, leaf| {
        if leaf.kind != LeafKind::Color {
            return;
        }
        let raw = match leaf.text() {
            Some(raw) => raw,
            None => return,
        };
        if base_name(path).is_empty() {
            diagnostics.record(
                DiagnosticKind::SkippedNode,
                format!("color token at '{}' reduced to an empty name", path),
            );
            return;
        }
        let value = normalize_color_value(raw);
        let modes = classify_primitive(&path.joined_lower());
        for mode in Mode::ALL {
            if !modes.includes(mode) {
                continue;
            }
            let name = canonical_name(path, conflicts.for_mode(mode));
            let table = match mode {
                Mode::Light => &mut light,
                Mode::Dark => &mut dark,
            };
            table.insert(name, value.clone());
        }
    });

    info!(
        "extracted {} light / {} dark primitive colors",
        light.len(),
        dark.len()
    );
    (light, dark)
}

fn reference_text(leaf: &TokenLeaf) -> Option<&str> {
    match leaf.kind {
        LeafKind::Color | LeafKind::Alias => leaf.text(),
        _ => None,
    }
}

/// Build the per-mode semantic color tables from the color-modes namespace.
///
/// Each token's reference is first redirected through the semantic layer
/// itself if it points there, then resolved against the merged primitive
/// map; cross-mode references are snapshotted as literals.
pub fn extract_semantic_colors(
    doc: &TokenDocument,
    primitives: &PrimitiveMaps,
    diagnostics: &mut Diagnostics,
) -> (
    BTreeMap<String, SemanticValue>,
    BTreeMap<String, SemanticValue>,
) {
    let mut light = BTreeMap::new();
    let mut dark = BTreeMap::new();

    let (label, group) = match doc.namespace_containing("color modes") {
        Some(found) => found,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "no 'color modes' namespace found in the token document",
            );
            return (light, dark);
        }
    };

    let root = TokenPath::new();

    let mut tally = NameTally::new();
    walk_leaves(group, &root, &mut |path, leaf| {
        if reference_text(leaf).is_none() {
            return;
        }
        let modes = classify_semantic(&path.joined_lower());
        if modes == ModeSet::Neither {
            return;
        }
        tally.record(modes, &base_name(path));
    });
    let conflicts = tally.into_conflicts();

    walk_leaves(group, &root, &mut |path, leaf| {
        let raw = match reference_text(leaf) {
            Some(raw) => raw,
            None => return,
        };
        let mode = match classify_semantic(&path.joined_lower()) {
            ModeSet::Light => Mode::Light,
            ModeSet::Dark => Mode::Dark,
            _ => return,
        };

        // a reference into the semantic layer itself is followed to the
        // concrete leaf value before resolving
        let mut reference = raw.to_string();
        if strip_braces(&reference).starts_with(label) {
            let dotted = strip_braces(&reference).to_string();
            match doc.leaf_text_at(label, &dotted) {
                Some(target) => reference = target.to_string(),
                None => {
                    diagnostics.record(
                        DiagnosticKind::UnresolvedReference,
                        format!("reference '{}' points at a missing semantic token", raw),
                    );
                    return;
                }
            }
        }

        let resolved = match resolve_reference(&reference, Some(label), primitives) {
            RefTarget::Literal => Some(SemanticValue::Literal {
                value: normalize_color_value(strip_braces(&reference)),
                origin: None,
            }),
            RefTarget::Primitive {
                name,
                mode: ref_mode,
            } => {
                let materialized = materialize(mode, &name, ref_mode, primitives);
                if materialized.is_none() {
                    diagnostics.record(
                        DiagnosticKind::CrossModeMiss,
                        format!(
                            "primitive '{}' is missing from the {} table (referenced by '{}')",
                            name,
                            ref_mode.map(|m| m.to_string()).unwrap_or_default(),
                            raw
                        ),
                    );
                }
                materialized
            }
            RefTarget::SemanticRedirect => {
                diagnostics.record(
                    DiagnosticKind::UnresolvedReference,
                    format!(
                        "reference '{}' still points at the semantic layer after one redirect",
                        raw
                    ),
                );
                None
            }
            RefTarget::Unresolved => {
                diagnostics.record(
                    DiagnosticKind::UnresolvedReference,
                    format!("could not resolve reference '{}'", raw),
                );
                None
            }
        };
        let resolved = match resolved {
            Some(resolved) => resolved,
            None => return,
        };

        let name = canonical_name(path, conflicts.for_mode(mode));
        if name.is_empty() {
            diagnostics.record(
                DiagnosticKind::SkippedNode,
                format!("semantic token at '{}' reduced to an empty name", path),
            );
            return;
        }
        let table = match mode {
            Mode::Light => &mut light,
            Mode::Dark => &mut dark,
        };
        table.insert(name, resolved);
    });

    info!(
        "extracted {} light / {} dark semantic colors",
        light.len(),
        dark.len()
    );
    (light, dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::CrossModeOrigin;

    fn document(json: &str) -> TokenDocument {
        TokenDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn test_primitive_extraction_end_to_end() {
        let doc = document(
            r##"{"primitives": {"brand": {"600": {"type": "color", "value": "#1A2B3CFF"}}}}"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_primitive_colors(&doc, &mut diagnostics);

        assert_eq!(light.get("brand_600").unwrap(), "#1A2B3C");
        assert_eq!(dark.get("brand_600").unwrap(), "#1A2B3C");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_primitive_mode_routing() {
        let doc = document(
            r##"{
                "primitives": {
                    "buttons (light mode)": {"primary": {"type": "color", "value": "#111111"}},
                    "buttons (dark mode)": {"primary": {"type": "color", "value": "#222222"}},
                    "gray": {"100": {"type": "color", "value": "#333333"}}
                }
            }"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_primitive_colors(&doc, &mut diagnostics);

        assert_eq!(light.get("primary").unwrap(), "#111111");
        assert_eq!(dark.get("primary").unwrap(), "#222222");
        assert_eq!(light.get("gray_100").unwrap(), "#333333");
        assert_eq!(dark.get("gray_100").unwrap(), "#333333");
    }

    #[test]
    fn test_primitive_collision_disambiguation() {
        let doc = document(
            r##"{
                "primitives": {
                    "buttons": {"accent": {"type": "color", "value": "#111111"}},
                    "links": {"accent (2)": {"type": "color", "value": "#222222"}}
                }
            }"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light, _dark) = extract_primitive_colors(&doc, &mut diagnostics);

        assert_eq!(light.get("accent").unwrap(), "#111111");
        assert_eq!(light.get("accent_2").unwrap(), "#222222");
    }

    #[test]
    fn test_collision_confined_to_one_mode_suffixes_only_there() {
        let doc = document(
            r##"{
                "primitives": {
                    "buttons (light mode)": {"accent": {"type": "color", "value": "#111111"}},
                    "links": {"accent (2)": {"type": "color", "value": "#222222"}}
                }
            }"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_primitive_colors(&doc, &mut diagnostics);

        // both nodes land in the light table, so only there does the
        // parenthetical become a suffix
        assert_eq!(light.get("accent").unwrap(), "#111111");
        assert_eq!(light.get("accent_2").unwrap(), "#222222");
        assert_eq!(dark.get("accent").unwrap(), "#222222");
        assert!(dark.get("accent_2").is_none());
    }

    #[test]
    fn test_missing_primitives_namespace_is_non_fatal() {
        let doc = document(r##"{"other": {}}"##);
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_primitive_colors(&doc, &mut diagnostics);

        assert!(light.is_empty());
        assert!(dark.is_empty());
        assert_eq!(diagnostics.count_of(DiagnosticKind::MissingNamespace), 1);
    }

    fn semantic_fixture() -> (TokenDocument, PrimitiveMaps) {
        let doc = document(
            r##"{
                "primitives": {
                    "base": {"white": {"type": "color", "value": "#FFFFFF"}},
                    "blue (dark mode)": {"600": {"type": "color", "value": "#112233"}}
                },
                "1. color modes": {
                    "alpha": {"white": {"value": "{primitives.base.white}"}},
                    "buttons (light mode)": {
                        "bg-primary": {"type": "color", "value": "{primitives.base.white}"},
                        "bg-inverse": {"type": "color", "value": "{primitives.blue.600 (dark mode)}"},
                        "bg-alias": {"type": "color", "value": "{1. color modes.alpha.white}"},
                        "bg-literal": {"type": "color", "value": "#FF0000FF"},
                        "bg-broken": {"type": "color", "value": "{primitives.missing.42}"}
                    },
                    "buttons (dark mode)": {
                        "bg-primary": {"type": "color", "value": "{primitives.blue.600 (dark mode)}"}
                    }
                }
            }"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_primitive_colors(&doc, &mut diagnostics);
        (doc, PrimitiveMaps::new(light, dark))
    }

    #[test]
    fn test_semantic_reference_and_literal_entries() {
        let (doc, primitives) = semantic_fixture();
        let mut diagnostics = Diagnostics::new();
        let (light, _dark) = extract_semantic_colors(&doc, &primitives, &mut diagnostics);

        assert_eq!(
            light.get("bg_primary").unwrap(),
            &SemanticValue::Reference("white".to_string())
        );
        assert_eq!(
            light.get("bg_literal").unwrap(),
            &SemanticValue::Literal {
                value: "#FF0000".to_string(),
                origin: None,
            }
        );
    }

    #[test]
    fn test_semantic_cross_mode_materialization() {
        let (doc, primitives) = semantic_fixture();
        let mut diagnostics = Diagnostics::new();
        let (light, dark) = extract_semantic_colors(&doc, &primitives, &mut diagnostics);

        // a light token referencing a dark primitive gets the literal snapshot
        assert_eq!(
            light.get("bg_inverse").unwrap(),
            &SemanticValue::Literal {
                value: "#112233".to_string(),
                origin: Some(CrossModeOrigin {
                    primitive: "blue_600".to_string(),
                    mode: Mode::Dark,
                }),
            }
        );
        // the same reference from a dark token stays symbolic
        assert_eq!(
            dark.get("bg_primary").unwrap(),
            &SemanticValue::Reference("blue_600".to_string())
        );
    }

    #[test]
    fn test_semantic_alias_redirect() {
        let (doc, primitives) = semantic_fixture();
        let mut diagnostics = Diagnostics::new();
        let (light, _dark) = extract_semantic_colors(&doc, &primitives, &mut diagnostics);

        assert_eq!(
            light.get("bg_alias").unwrap(),
            &SemanticValue::Reference("white".to_string())
        );
    }

    #[test]
    fn test_semantic_unresolved_is_dropped_with_diagnostic() {
        let (doc, primitives) = semantic_fixture();
        let mut diagnostics = Diagnostics::new();
        let (light, _dark) = extract_semantic_colors(&doc, &primitives, &mut diagnostics);

        assert!(light.get("bg_broken").is_none());
        assert_eq!(diagnostics.count_of(DiagnosticKind::UnresolvedReference), 1);
    }

    #[test]
    fn test_semantic_token_without_marker_is_skipped() {
        let doc = document(
            r##"{
                "primitives": {"base": {"white": {"type": "color", "value": "#FFFFFF"}}},
                "1. color modes": {
                    "alpha": {"white": {"value": "{primitives.base.white}"}}
                }
            }"##,
        );
        let mut diagnostics = Diagnostics::new();
        let (light_primitives, dark_primitives) =
            extract_primitive_colors(&doc, &mut diagnostics);
        let primitives = PrimitiveMaps::new(light_primitives, dark_primitives);
        let (light, dark) = extract_semantic_colors(&doc, &primitives, &mut diagnostics);

        assert!(light.is_empty());
        assert!(dark.is_empty());
    }
}
