//! Theme layer: attribute declarations plus a combined light/dark theme file
//! built from the resolved semantic tables.
//!
//! A theme item stays a symbolic `@color/` reference only when the fully
//! resolved light and dark values agree; otherwise the mode's concrete value
//! is inlined so the two themes actually diverge at runtime.

use crate::xml::{write_file, XML_HEADER};
use anyhow::Result;
use duotone_engine::{ResolvedTokens, SemanticValue};
use duotone_model::Mode;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Theme naming; overridable from the CLI
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub light_theme: String,
    pub dark_theme: String,
    pub parent_theme: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light_theme: "AppLightTheme".to_string(),
            dark_theme: "AppDarkTheme".to_string(),
            parent_theme: "Theme.MaterialComponents.DayNight.NoActionBar.Bridge".to_string(),
        }
    }
}

/// `border_primary` → `borderPrimary`
pub fn to_camel_case(snake: &str) -> String {
    let mut parts = snake.split('_');
    let mut out = String::with_capacity(snake.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// One `color`-typed attribute declaration per semantic name
pub fn render_attrs(semantic: &BTreeMap<String, SemanticValue>) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n");
    out.push_str("    <!-- Semantic Color Attributes -->\n");
    for name in semantic.keys() {
        let _ = writeln!(
            out,
            "    <attr name=\"{}\" format=\"color\" />",
            to_camel_case(name)
        );
    }
    out.push_str("</resources>");
    out
}

/// Concrete value a semantic entry resolves to within one mode's tables
fn concrete_value(
    value: Option<&SemanticValue>,
    primitives: &BTreeMap<String, String>,
) -> Option<String> {
    match value? {
        SemanticValue::Literal { value, .. } => Some(value.clone()),
        SemanticValue::Reference(target) => primitives.get(target).cloned(),
    }
}

fn theme_item_value(
    tokens: &ResolvedTokens,
    mode: Mode,
    name: &str,
    value: &SemanticValue,
) -> String {
    match value {
        SemanticValue::Literal { value, .. } => value.clone(),
        SemanticValue::Reference(target) => {
            let light = concrete_value(tokens.light_semantic.get(name), &tokens.light_primitives);
            let dark = concrete_value(tokens.dark_semantic.get(name), &tokens.dark_primitives);
            match (light, dark) {
                (Some(light), Some(dark)) if light == dark => format!("@color/{}", target),
                _ => {
                    let own = match mode {
                        Mode::Light => &tokens.light_primitives,
                        Mode::Dark => &tokens.dark_primitives,
                    };
                    own.get(target)
                        .cloned()
                        .unwrap_or_else(|| format!("@color/{}", target))
                }
            }
        }
    }
}

fn render_theme_block(
    tokens: &ResolvedTokens,
    mode: Mode,
    theme_name: &str,
    parent: &str,
) -> String {
    let entries = match mode {
        Mode::Light => &tokens.light_semantic,
        Mode::Dark => &tokens.dark_semantic,
    };
    let mut out = String::new();
    let _ = writeln!(out, "    <!-- {} - semantic color theme -->", theme_name);
    let _ = writeln!(out, "    <style name=\"{}\" parent=\"{}\">", theme_name, parent);
    for (name, value) in entries {
        let _ = writeln!(
            out,
            "        <item name=\"{}\">{}</item>",
            to_camel_case(name),
            theme_item_value(tokens, mode, name, value)
        );
    }
    out.push_str("    </style>\n");
    out
}

/// Combined theme file: one light and one dark theme over the same
/// attribute set
pub fn render_themes(tokens: &ResolvedTokens, config: &ThemeConfig) -> String {
    let missing: Vec<&String> = tokens
        .light_semantic
        .keys()
        .filter(|name| !tokens.dark_semantic.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        warn!(
            "{} semantic colors missing from the dark table: {:?}",
            missing.len(),
            missing
        );
    }

    let mut out = String::from(XML_HEADER);
    out.push_str("<resources>\n\n");
    out.push_str(&render_theme_block(
        tokens,
        Mode::Light,
        &config.light_theme,
        &config.parent_theme,
    ));
    out.push('\n');
    out.push_str(&render_theme_block(
        tokens,
        Mode::Dark,
        &config.dark_theme,
        &config.parent_theme,
    ));
    out.push_str("</resources>");
    out
}

/// Write the attribute declarations and the combined theme file under
/// `out_dir/values/`
pub fn write_theme_files(
    tokens: &ResolvedTokens,
    config: &ThemeConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let values = out_dir.join("values");
    let attrs_path = values.join("semantic_color_attrs.xml");
    let themes_path = values.join("themes.xml");

    write_file(&attrs_path, &render_attrs(&tokens.light_semantic))?;
    write_file(&themes_path, &render_themes(tokens, config))?;

    Ok(vec![attrs_path, themes_path])
}
