//! Emitters: thin formatting and I/O wrappers over the engine's resolved
//! tables. Rendering is split from writing so the formats are testable
//! without a filesystem.

pub mod docs;
pub mod theme;
pub mod xml;

pub use docs::{render_typography_reference, write_typography_reference};
pub use theme::{render_attrs, render_themes, to_camel_case, write_theme_files, ThemeConfig};
pub use xml::write_resources;
