//! Human-readable reference documentation for the generated typography
//! styles.

use crate::xml::write_file;
use anyhow::Result;
use duotone_engine::{LetterSpacing, LineHeight, TextStyle};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Markdown document listing every style and its properties
pub fn render_typography_reference(styles: &BTreeMap<String, TextStyle>) -> String {
    let mut out = String::from(
        "# Typography Styles\n\n\
         Generated from the design-token document. Apply a style by name:\n\n\
         ```xml\n\
         <TextView\n    style=\"@style/display_2xl\"\n    android:text=\"Sample Text\" />\n\
         ```\n\n\
         ## Available Styles\n\n",
    );

    for (name, style) in styles {
        let _ = writeln!(out, "### {}\n", name);
        out.push_str("**Properties:**\n");
        if let Some(size) = style.size {
            let _ = writeln!(out, "- Text Size: {}sp", size);
        }
        if let Some(weight) = style.weight {
            let _ = writeln!(out, "- Font Weight: {}", weight);
        }
        match style.line_height {
            Some(LineHeight::Absolute(value)) => {
                let _ = writeln!(out, "- Line Height: {}sp", crate::xml::fmt_number(value));
            }
            Some(LineHeight::Multiplier(value)) => {
                let _ = writeln!(out, "- Line Height Multiplier: {:.2}", value);
            }
            None => {}
        }
        match &style.letter_spacing {
            Some(LetterSpacing::Absolute(value)) => {
                let _ = writeln!(out, "- Letter Spacing: {}sp", crate::xml::fmt_number(*value));
            }
            Some(LetterSpacing::Raw(text)) => {
                let _ = writeln!(out, "- Letter Spacing: {}", text);
            }
            None => {}
        }
        out.push('\n');
    }

    out
}

/// Write the typography reference under `out_dir`; skipped (returning
/// `None`) when there are no styles
pub fn write_typography_reference(
    styles: &BTreeMap<String, TextStyle>,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    if styles.is_empty() {
        return Ok(None);
    }
    let path = out_dir.join("typography_reference.md");
    write_file(&path, &render_typography_reference(styles))?;
    Ok(Some(path))
}
