//! Android-style resource file rendering and writing.

use anyhow::{Context, Result};
use duotone_engine::{
    GradientSpec, LetterSpacing, LineHeight, ResolvedTokens, SemanticValue, TextStyle,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

pub(crate) fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Plain color table; entries iterate sorted by name
pub fn render_colors(colors: &BTreeMap<String, String>) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, value) in colors {
        let _ = writeln!(out, "    <color name=\"{}\">{}</color>", name, value);
    }
    out.push_str("</resources>");
    out
}

/// Semantic color table: reference entries, literal entries, and cross-mode
/// literals carrying their origin as a trailing inline comment
pub fn render_semantic_colors(colors: &BTreeMap<String, SemanticValue>) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, value) in colors {
        match value {
            SemanticValue::Reference(target) => {
                let _ = writeln!(out, "    <color name=\"{}\">@color/{}</color>", name, target);
            }
            SemanticValue::Literal {
                value,
                origin: None,
            } => {
                let _ = writeln!(out, "    <color name=\"{}\">{}</color>", name, value);
            }
            SemanticValue::Literal {
                value,
                origin: Some(origin),
            } => {
                let _ = writeln!(
                    out,
                    "    <color name=\"{}\">{}</color> <!-- {} ({}) -->",
                    name, value, origin.primitive, origin.mode
                );
            }
        }
    }
    out.push_str("</resources>");
    out
}

/// Dimension table in the given order; the caller decides ordered vs sorted
pub fn render_ordered_dimens(entries: &[(String, f64)], unit: &str) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, value) in entries {
        let _ = writeln!(
            out,
            "    <dimen name=\"{}\">{}{}</dimen>",
            name,
            fmt_number(*value),
            unit
        );
    }
    out.push_str("</resources>");
    out
}

/// Sorted dimension table
pub fn render_sorted_dimens(entries: &BTreeMap<String, f64>, unit: &str) -> String {
    let ordered: Vec<(String, f64)> = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
    render_ordered_dimens(&ordered, unit)
}

/// Dimension table whose values are references to other dimensions,
/// preserving the given order
pub fn render_reference_dimens(entries: &[(String, String)]) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, target) in entries {
        let _ = writeln!(out, "    <dimen name=\"{}\">@dimen/{}</dimen>", name, target);
    }
    out.push_str("</resources>");
    out
}

/// One shape drawable per gradient: linear, integer angle, two stops
pub fn render_gradient(spec: &GradientSpec) -> String {
    format!(
        "{}<shape xmlns:android=\"http://schemas.android.com/apk/res/android\"\n    \
         android:shape=\"rectangle\">\n    <gradient\n        android:type=\"linear\"\n        \
         android:angle=\"{}\"\n        android:startColor=\"{}\"\n        \
         android:endColor=\"{}\" />\n</shape>",
        XML_HEADER, spec.rotation as i64, spec.start_color, spec.end_color
    )
}

/// Style definitions with up to five optional typography properties
pub fn render_text_styles(styles: &BTreeMap<String, TextStyle>) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, style) in styles {
        let _ = writeln!(out, "    <style name=\"{}\">", name);
        if let Some(size) = style.size {
            let _ = writeln!(out, "        <item name=\"android:textSize\">{}sp</item>", size);
        }
        if let Some(weight) = style.weight {
            let _ = writeln!(out, "        <item name=\"android:textStyle\">{}</item>", weight);
        }
        match style.line_height {
            Some(LineHeight::Absolute(value)) => {
                let _ = writeln!(
                    out,
                    "        <item name=\"android:lineHeight\">{}sp</item>",
                    fmt_number(value)
                );
            }
            Some(LineHeight::Multiplier(value)) => {
                let _ = writeln!(
                    out,
                    "        <item name=\"android:lineHeightMultiplier\">{:.2}</item>",
                    value
                );
            }
            None => {}
        }
        match &style.letter_spacing {
            Some(LetterSpacing::Absolute(value)) => {
                let _ = writeln!(
                    out,
                    "        <item name=\"android:letterSpacing\">{}sp</item>",
                    fmt_number(*value)
                );
            }
            Some(LetterSpacing::Raw(text)) => {
                let _ = writeln!(out, "        <item name=\"android:letterSpacing\">{}</item>", text);
            }
            None => {}
        }
        out.push_str("    </style>\n");
    }
    out.push_str("</resources>");
    out
}

/// Sorted text-size table from the styles that carry a size
pub fn render_text_sizes(styles: &BTreeMap<String, TextStyle>) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    for (name, style) in styles {
        if let Some(size) = style.size {
            let _ = writeln!(out, "    <dimen name=\"{}\">{}sp</dimen>", name, size);
        }
    }
    out.push_str("</resources>");
    out
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!("generated {}", path.display());
    Ok(())
}

/// Write every resource file under `out_dir` (`values/`, `values-night/`,
/// `gradients/`); returns the written paths
pub fn write_resources(tokens: &ResolvedTokens, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let values = out_dir.join("values");
    let night = out_dir.join("values-night");
    let gradients = out_dir.join("gradients");

    let mut written = Vec::new();
    let mut emit = |path: PathBuf, content: String| -> Result<()> {
        write_file(&path, &content)?;
        written.push(path);
        Ok(())
    };

    emit(
        values.join("primitive_color.xml"),
        render_colors(&tokens.light_primitives),
    )?;
    emit(
        night.join("primitive_color.xml"),
        render_colors(&tokens.dark_primitives),
    )?;
    emit(
        values.join("semantic_color.xml"),
        render_semantic_colors(&tokens.light_semantic),
    )?;
    emit(
        night.join("semantic_color.xml"),
        render_semantic_colors(&tokens.dark_semantic),
    )?;
    emit(
        values.join("dimens.xml"),
        render_ordered_dimens(&tokens.spacing, "dp"),
    )?;
    emit(
        values.join("semantic_dimens.xml"),
        render_reference_dimens(&tokens.semantic_spacing),
    )?;
    emit(
        values.join("radius_dimens.xml"),
        render_sorted_dimens(&tokens.radius, "dp"),
    )?;
    emit(
        values.join("text_styles.xml"),
        render_text_styles(&tokens.typography),
    )?;
    emit(
        values.join("text_sizes.xml"),
        render_text_sizes(&tokens.typography),
    )?;
    emit(
        values.join("text_dimens.xml"),
        render_sorted_dimens(&tokens.font_sizes, "sp"),
    )?;
    for (name, spec) in &tokens.gradients {
        emit(gradients.join(format!("{}.xml", name)), render_gradient(spec))?;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duotone_engine::CrossModeOrigin;
    use duotone_model::Mode;

    #[test]
    fn test_render_colors_is_sorted() {
        let mut colors = BTreeMap::new();
        colors.insert("white".to_string(), "#FFFFFF".to_string());
        colors.insert("brand_600".to_string(), "#1A2B3C".to_string());

        let xml = render_colors(&colors);
        let brand = xml.find("brand_600").unwrap();
        let white = xml.find("white").unwrap();
        assert!(brand < white);
        assert!(xml.contains("<color name=\"brand_600\">#1A2B3C</color>"));
    }

    #[test]
    fn test_render_semantic_colors_variants() {
        let mut colors = BTreeMap::new();
        colors.insert(
            "bg_primary".to_string(),
            SemanticValue::Reference("white".to_string()),
        );
        colors.insert(
            "bg_inverse".to_string(),
            SemanticValue::Literal {
                value: "#112233".to_string(),
                origin: Some(CrossModeOrigin {
                    primitive: "blue_600".to_string(),
                    mode: Mode::Dark,
                }),
            },
        );
        colors.insert(
            "bg_flat".to_string(),
            SemanticValue::Literal {
                value: "#FF0000".to_string(),
                origin: None,
            },
        );

        let xml = render_semantic_colors(&colors);
        assert!(xml.contains("<color name=\"bg_primary\">@color/white</color>"));
        assert!(xml.contains("<color name=\"bg_flat\">#FF0000</color>"));
        assert!(xml
            .contains("<color name=\"bg_inverse\">#112233</color> <!-- blue_600 (dark mode) -->"));
    }

    #[test]
    fn test_render_ordered_dimens_keeps_order() {
        let entries = vec![
            ("spacing_large".to_string(), 24.0),
            ("spacing_small".to_string(), 4.0),
            ("spacing_medium".to_string(), 12.0),
        ];
        let xml = render_ordered_dimens(&entries, "dp");

        let large = xml.find("spacing_large").unwrap();
        let small = xml.find("spacing_small").unwrap();
        let medium = xml.find("spacing_medium").unwrap();
        assert!(large < small && small < medium);
        assert!(xml.contains("<dimen name=\"spacing_large\">24dp</dimen>"));
    }

    #[test]
    fn test_render_reference_dimens() {
        let entries = vec![("padding_sm".to_string(), "spacing_small".to_string())];
        let xml = render_reference_dimens(&entries);
        assert!(xml.contains("<dimen name=\"padding_sm\">@dimen/spacing_small</dimen>"));
    }

    #[test]
    fn test_render_gradient() {
        let spec = GradientSpec {
            rotation: 90.0,
            start_color: "#112233".to_string(),
            end_color: "#445566".to_string(),
        };
        let xml = render_gradient(&spec);
        assert!(xml.contains("android:angle=\"90\""));
        assert!(xml.contains("android:startColor=\"#112233\""));
        assert!(xml.contains("android:endColor=\"#445566\""));
    }

    #[test]
    fn test_render_text_styles() {
        let mut styles = BTreeMap::new();
        styles.insert(
            "display_2xl".to_string(),
            TextStyle {
                size: Some(72),
                weight: Some(700),
                line_height: Some(LineHeight::Multiplier(1.5)),
                letter_spacing: Some(LetterSpacing::Absolute(-1.0)),
            },
        );

        let xml = render_text_styles(&styles);
        assert!(xml.contains("<style name=\"display_2xl\">"));
        assert!(xml.contains("<item name=\"android:textSize\">72sp</item>"));
        assert!(xml.contains("<item name=\"android:textStyle\">700</item>"));
        assert!(xml.contains("<item name=\"android:lineHeightMultiplier\">1.50</item>"));
        assert!(xml.contains("<item name=\"android:letterSpacing\">-1sp</item>"));
    }

    #[test]
    fn test_render_text_sizes_skips_styles_without_size() {
        let mut styles = BTreeMap::new();
        styles.insert(
            "display_2xl".to_string(),
            TextStyle {
                size: Some(72),
                ..TextStyle::default()
            },
        );
        styles.insert("plain".to_string(), TextStyle::default());

        let xml = render_text_sizes(&styles);
        assert!(xml.contains("<dimen name=\"display_2xl\">72sp</dimen>"));
        assert!(!xml.contains("plain"));
    }
}
