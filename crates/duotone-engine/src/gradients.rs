//! Gradient extraction: two-stop linear gradient descriptors.

use crate::colors::normalize_color_value;
use crate::walker::walk_leaves;
use duotone_common::{DiagnosticKind, Diagnostics};
use duotone_model::{LeafValue, TokenDocument, TokenPath};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A resolved two-stop linear gradient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientSpec {
    pub rotation: f64,
    pub start_color: String,
    pub end_color: String,
}

fn alnum_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Gradient names fold the `600 -> 500 (90deg)` convention into
/// `{parent}_600_500`; anything else is a sanitized parent/node join
fn gradient_name(parent: &str, node: &str) -> String {
    if node.contains(" -> ") && node.contains('(') {
        let mut parts = node.splitn(2, " -> ");
        if let (Some(start), Some(rest)) = (parts.next(), parts.next()) {
            let end = rest.split('(').next().unwrap_or("").trim();
            return format!("{}_{}_{}", parent, start.trim(), end);
        }
    }
    format!("{}_{}", alnum_fragment(parent), alnum_fragment(node))
}

fn normalize_stop_color(color: &str) -> String {
    let prefixed = if color.starts_with('#') {
        color.to_string()
    } else {
        format!("#{}", color)
    };
    normalize_color_value(&prefixed)
}

/// Gradient descriptors from the `gradient` namespace, keyed by the folded
/// parent/node name. A gradient needs at least two stops; the first two are
/// taken as start and end.
pub fn extract_gradients(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, GradientSpec> {
    let mut gradients = BTreeMap::new();

    let group = match doc.namespace_exact("gradient") {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'gradient' namespace not found in the token document",
            );
            return gradients;
        }
    };

    walk_leaves(group, &TokenPath::new(), &mut |path, leaf| {
        let value = match &leaf.value {
            LeafValue::Gradient(value) => value,
            _ => return,
        };
        if value.stops.len() < 2 {
            diagnostics.record(
                DiagnosticKind::SkippedNode,
                format!("gradient at '{}' has fewer than two stops", path),
            );
            return;
        }
        let segments = path.segments();
        let name = match segments.len() {
            0 => return,
            1 => gradient_name("gradient", &segments[0]),
            n => gradient_name(&segments[n - 2], &segments[n - 1]),
        };
        let spec = GradientSpec {
            rotation: value.rotation,
            start_color: normalize_stop_color(&value.stops[0].color),
            end_color: normalize_stop_color(&value.stops[1].color),
        };
        debug!(
            "found gradient {}: {} -> {} ({}°)",
            name, spec.start_color, spec.end_color, spec.rotation
        );
        gradients.insert(name, spec);
    });

    info!("extracted {} gradients", gradients.len());
    gradients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_name_folding() {
        assert_eq!(gradient_name("brand", "600 -> 500 (90deg)"), "brand_600_500");
        assert_eq!(gradient_name("Warm Tones", "sunset glow"), "Warm_Tones_sunset_glow");
    }

    #[test]
    fn test_gradient_extraction() {
        let doc = TokenDocument::from_json_str(
            r##"{
                "gradient": {
                    "brand": {
                        "600 -> 500 (90deg)": {
                            "type": "custom-gradient",
                            "value": {
                                "rotation": 90,
                                "stops": [
                                    {"color": "112233FF", "position": 0},
                                    {"color": "#445566", "position": 1}
                                ]
                            }
                        }
                    }
                }
            }"##,
        )
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let gradients = extract_gradients(&doc, &mut diagnostics);

        let spec = gradients.get("brand_600_500").unwrap();
        assert_eq!(spec.rotation, 90.0);
        assert_eq!(spec.start_color, "#112233");
        assert_eq!(spec.end_color, "#445566");
    }

    #[test]
    fn test_gradient_with_one_stop_is_skipped() {
        let doc = TokenDocument::from_json_str(
            r##"{
                "gradient": {
                    "broken": {
                        "type": "custom-gradient",
                        "value": {"rotation": 0, "stops": [{"color": "#112233"}]}
                    }
                }
            }"##,
        )
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let gradients = extract_gradients(&doc, &mut diagnostics);

        assert!(gradients.is_empty());
        assert_eq!(diagnostics.count_of(DiagnosticKind::SkippedNode), 1);
    }
}
