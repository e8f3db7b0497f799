//! Typography extraction: style definitions from the `typography` namespace
//! and the standalone font-size table from the ordinal typography namespace.

use duotone_common::{DiagnosticKind, Diagnostics};
use duotone_model::{LeafKind, LeafValue, MetricSpec, TokenDocument, WeightSpec};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, info};

fn paren_group_re() -> &'static Regex {
    // style names carry their size in ASCII or fullwidth parentheses
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*(?:\([^)]*\)|（[^）]*）)").unwrap())
}

fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[（(](\d+)[）)]").unwrap())
}

/// A resolved text style; every property is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextStyle {
    /// Size in sp, recovered from the parenthetical in the style's name
    pub size: Option<u32>,
    pub weight: Option<u32>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<LetterSpacing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LineHeight {
    /// Absolute value in sp
    Absolute(f64),
    /// Multiplier of the text size
    Multiplier(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LetterSpacing {
    /// Absolute value in sp
    Absolute(f64),
    /// Free-form text kept verbatim
    Raw(String),
}

/// `display 2xl (72)` → `display_2xl`
fn style_name(raw: &str) -> String {
    let stripped = paren_group_re().replace_all(raw, "");
    let mut out = String::with_capacity(stripped.len());
    let mut pending_separator = false;
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

fn name_size(raw: &str) -> Option<u32> {
    size_re()
        .captures(raw)
        .and_then(|caps| caps[1].parse().ok())
}

fn weight_value(spec: &WeightSpec) -> u32 {
    match spec {
        WeightSpec::Numeric(n) => *n as u32,
        WeightSpec::Named(name) => match name.to_lowercase().as_str() {
            "thin" => 100,
            "extralight" => 200,
            "light" => 300,
            "regular" => 400,
            "medium" => 500,
            "semibold" => 600,
            "bold" => 700,
            "extrabold" => 800,
            "black" => 900,
            _ => 400,
        },
    }
}

fn line_height_value(spec: &MetricSpec) -> Option<LineHeight> {
    match spec {
        MetricSpec::Percent(percent) => Some(LineHeight::Multiplier(percent / 100.0)),
        MetricSpec::Absolute(value) => Some(LineHeight::Absolute(*value)),
        MetricSpec::Raw(_) => None,
    }
}

fn letter_spacing_value(spec: &MetricSpec) -> Option<LetterSpacing> {
    match spec {
        MetricSpec::Absolute(value) => Some(LetterSpacing::Absolute(*value)),
        MetricSpec::Percent(percent) => Some(LetterSpacing::Raw(format!("{}%", percent))),
        MetricSpec::Raw(text) => Some(LetterSpacing::Raw(text.clone())),
    }
}

/// Text styles from the direct children of the `typography` namespace
pub fn extract_typography(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, TextStyle> {
    let mut styles = BTreeMap::new();

    let group = match doc.namespace_exact("typography") {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'typography' namespace not found in the token document",
            );
            return styles;
        }
    };

    for (name, node) in group.iter() {
        let value = match node.as_leaf() {
            Some(leaf) => match &leaf.value {
                LeafValue::Typography(value) => value,
                _ => continue,
            },
            None => continue,
        };
        let style = TextStyle {
            size: name_size(name),
            weight: value.font_weight.as_ref().map(weight_value),
            line_height: value.line_height.as_ref().and_then(line_height_value),
            letter_spacing: value.letter_spacing.as_ref().and_then(letter_spacing_value),
        };
        if style == TextStyle::default() {
            continue;
        }
        debug!("found typography style {}", style_name(name));
        styles.insert(style_name(name), style);
    }

    info!("extracted {} typography styles", styles.len());
    styles
}

/// Standalone font sizes from `6. typography` → `font size`. Names drop a
/// `text-` prefix and map dashes to underscores.
pub fn extract_font_sizes(
    doc: &TokenDocument,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, f64> {
    let mut sizes = BTreeMap::new();

    let group = match doc.namespace_exact("6. typography") {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'6. typography' namespace not found in the token document",
            );
            return sizes;
        }
    };
    let font_sizes = match group.get("font size").and_then(|node| node.as_group()) {
        Some(group) => group,
        None => {
            diagnostics.record(
                DiagnosticKind::MissingNamespace,
                "'font size' group not found under '6. typography'",
            );
            return sizes;
        }
    };

    for (name, node) in font_sizes.iter() {
        let leaf = match node.as_leaf() {
            Some(leaf) if leaf.kind == LeafKind::Dimension => leaf,
            _ => continue,
        };
        let value = match leaf.value {
            LeafValue::Number(value) => value,
            _ => continue,
        };
        let cleaned = name
            .strip_prefix("text-")
            .unwrap_or(name)
            .replace('-', "_");
        sizes.insert(cleaned, value);
    }

    info!("extracted {} font sizes", sizes.len());
    sizes
}
