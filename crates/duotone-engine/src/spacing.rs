//! Spacing extraction: primitive spacing dimensions (ordered) and the
//! semantic spacing references layered over them.

use crate::walker::walk_leaves;
use duotone_common::{DiagnosticKind, Diagnostics};
use duotone_model::{LeafKind, LeafValue, TokenDocument, TokenNode, TokenPath};
use tracing::info;

fn alnum_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Name for a spacing leaf: the cleaned parent segment joined with the leaf
/// name's text before its first space (`spacing` / `0 (0px)` → `spacing_0`)
fn spacing_name(path: &TokenPath) -> String {
    let last = match path.last() {
        Some(last) => last,
        None => return "unknown".to_string(),
    };
    let node = alnum_only(last.split(' ').next().unwrap_or(last));
    match path.parent_segment() {
        Some(parent) => format!("{}_{}", alnum_only(parent), node),
        None => node,
    }
}

/// Ordered primitive spacing dimensions from `primitives.spacing`.
/// Traversal order is preserved verbatim; the emitted file relies on it.
pub fn extract_spacing(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> Vec<(String, f64)> {
    let mut dimensions = Vec::new();

    let primitives = match doc.namespace_exact("primitives") {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'primitives' namespace not found while extracting spacing",
            );
            return dimensions;
        }
    };
    let spacing = match primitives.get("spacing").and_then(TokenNode::as_group) {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'spacing' group not found under 'primitives'",
            );
            return dimensions;
        }
    };

    let root = TokenPath::new().child("spacing");
    walk_leaves(spacing, &root, &mut |path, leaf| {
        if leaf.kind != LeafKind::Dimension {
            return;
        }
        let value = match leaf.value {
            LeafValue::Number(value) => value,
            _ => return,
        };
        dimensions.push((spacing_name(path), value));
    });

    info!("extracted {} spacing dimensions", dimensions.len());
    dimensions
}

/// Recover the dimension target name from a spacing reference such as
/// `primitives.mode 1.spacing.0 (0px)` → `spacing_0`: the content between
/// the dot before `spacing` and the last `(`, with the first dot after
/// `spacing` turned into an underscore and later dots dropped.
pub(crate) fn spacing_reference_name(reference: &str) -> Option<String> {
    let open = reference.rfind('(')?;
    let spacing_pos = reference.find("spacing")?;
    let dot = reference[..spacing_pos].rfind('.')?;
    let content = reference[dot + 1..open].trim();

    let name = match content.find("spacing") {
        Some(idx) => {
            let after = &content[idx + "spacing".len()..];
            if after.is_empty() {
                content.to_string()
            } else if let Some(first_dot) = after.find('.') {
                format!(
                    "spacing{}_{}",
                    &after[..first_dot],
                    after[first_dot + 1..].replace('.', "")
                )
            } else {
                format!("spacing{}", after)
            }
        }
        None => content.to_string(),
    };
    Some(name)
}

/// Ordered semantic spacing references from the ordinal `spacing` namespace.
/// Each entry maps the token name (dashes to underscores) to the primitive
/// dimension name its reference points at.
pub fn extract_semantic_spacing(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> Vec<(String, String)> {
    let mut references = Vec::new();

    let (_, group) = match doc.ordinal_namespace("spacing") {
        Some(found) => found,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "no ordinal 'spacing' namespace found in the token document",
            );
            return references;
        }
    };

    for (name, node) in group.iter() {
        let text = match node.as_leaf().and_then(|leaf| leaf.text()) {
            Some(text) => text,
            None => continue,
        };
        let inner = crate::resolve::strip_braces(text);
        match spacing_reference_name(inner) {
            Some(target) if !target.is_empty() => {
                references.push((name.replace('-', "_"), target));
            }
            _ => diagnostics.record(
                DiagnosticKind::SkippedNode,
                format!("spacing token '{}' has an unusable reference '{}'", name, text),
            ),
        }
    }

    info!("extracted {} semantic spacing references", references.len());
    references
}
