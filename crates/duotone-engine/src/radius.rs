//! Corner radius extraction from the ordinal `radius` namespace.

use crate::naming::base_name;
use crate::walker::walk_leaves;
use duotone_common::{DiagnosticKind, Diagnostics};
use duotone_model::{LeafKind, LeafValue, TokenDocument, TokenPath};
use std::collections::BTreeMap;
use tracing::info;

/// Radius values keyed by the canonical form of the leaf segment alone
/// (radii are flat in practice; nesting only groups them)
pub fn extract_radius(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, f64> {
    let mut radii = BTreeMap::new();

    let (_, group) = match doc.ordinal_namespace("radius") {
        Some(found) => found,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "no ordinal 'radius' namespace found in the token document",
            );
            return radii;
        }
    };

    walk_leaves(group, &TokenPath::new(), &mut |path, leaf| {
        if leaf.kind != LeafKind::Dimension {
            return;
        }
        let value = match leaf.value {
            LeafValue::Number(value) => value,
            _ => return,
        };
        let last = match path.last() {
            Some(last) => last,
            None => return,
        };
        let name = base_name(&TokenPath::from_segments(&[last]));
        if name.is_empty() {
            diagnostics.record(
                DiagnosticKind::SkippedNode,
                format!("radius token at '{}' reduced to an empty name", path),
            );
            return;
        }
        radii.insert(name, value);
    });

    info!("extracted {} radius values", radii.len());
    radii
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_extraction_names_from_leaf_segment() {
        let doc = TokenDocument::from_json_str(
            r#"{
                "2. radius": {
                    "grouped": {
                        "radius-md (8px)": {"type": "dimension", "value": 8}
                    },
                    "radius-sm": {"type": "dimension", "value": 4}
                }
            }"#,
        )
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let radii = extract_radius(&doc, &mut diagnostics);

        assert_eq!(radii.get("radius_md"), Some(&8.0));
        assert_eq!(radii.get("radius_sm"), Some(&4.0));
        assert!(radii.get("grouped").is_none());
    }

    #[test]
    fn test_missing_radius_namespace() {
        let doc = TokenDocument::from_json_str(r#"{"radius": {}}"#).unwrap();
        let mut diagnostics = Diagnostics::new();

        assert!(extract_radius(&doc, &mut diagnostics).is_empty());
        assert_eq!(diagnostics.count_of(DiagnosticKind::MissingNamespace), 1);
    }
}
