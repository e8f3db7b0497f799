//! Token resolution engine: walks a parsed design-token document and builds
//! every output table in one synchronous pass (two passes for names, since
//! collisions are only knowable after seeing all nodes).

pub mod classify;
pub mod colors;
pub mod gradients;
pub mod naming;
pub mod radius;
pub mod resolve;
pub mod spacing;
pub mod typography;
pub mod walker;

pub use gradients::GradientSpec;
pub use resolve::{CrossModeOrigin, PrimitiveMaps, RefTarget, SemanticValue};
pub use typography::{LetterSpacing, LineHeight, TextStyle};

use duotone_common::Diagnostics;
use duotone_model::TokenDocument;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Every table produced by one run. Sorted maps iterate lexicographically;
/// the spacing lists keep document traversal order.
#[derive(Debug, Default)]
pub struct ResolvedTokens {
    pub light_primitives: BTreeMap<String, String>,
    pub dark_primitives: BTreeMap<String, String>,
    pub light_semantic: BTreeMap<String, SemanticValue>,
    pub dark_semantic: BTreeMap<String, SemanticValue>,
    pub spacing: Vec<(String, f64)>,
    pub semantic_spacing: Vec<(String, String)>,
    pub radius: BTreeMap<String, f64>,
    pub gradients: BTreeMap<String, GradientSpec>,
    pub typography: BTreeMap<String, TextStyle>,
    pub font_sizes: BTreeMap<String, f64>,
}

/// Per-table counts, reported at the end of a run so omissions are
/// discoverable without reading the diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub light_primitives: usize,
    pub dark_primitives: usize,
    pub light_semantic: usize,
    pub dark_semantic: usize,
    pub spacing: usize,
    pub semantic_spacing: usize,
    pub radius: usize,
    pub gradients: usize,
    pub typography: usize,
    pub font_sizes: usize,
}

impl ResolvedTokens {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            light_primitives: self.light_primitives.len(),
            dark_primitives: self.dark_primitives.len(),
            light_semantic: self.light_semantic.len(),
            dark_semantic: self.dark_semantic.len(),
            spacing: self.spacing.len(),
            semantic_spacing: self.semantic_spacing.len(),
            radius: self.radius.len(),
            gradients: self.gradients.len(),
            typography: self.typography.len(),
            font_sizes: self.font_sizes.len(),
        }
    }
}

/// Run the whole engine over a parsed document. Non-fatal conditions land in
/// the returned diagnostics; the tables hold whatever resolved.
pub fn resolve_document(doc: &TokenDocument) -> (ResolvedTokens, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    let (light_primitives, dark_primitives) =
        colors::extract_primitive_colors(doc, &mut diagnostics);
    let primitives = PrimitiveMaps::new(light_primitives, dark_primitives);

    let (light_semantic, dark_semantic) =
        colors::extract_semantic_colors(doc, &primitives, &mut diagnostics);

    let spacing = spacing::extract_spacing(doc, &mut diagnostics);
    let semantic_spacing = spacing::extract_semantic_spacing(doc, &mut diagnostics);
    let gradients = gradients::extract_gradients(doc, &mut diagnostics);
    let radius = radius::extract_radius(doc, &mut diagnostics);
    let typography = typography::extract_typography(doc, &mut diagnostics);
    let font_sizes = typography::extract_font_sizes(doc, &mut diagnostics);

    let (light_primitives, dark_primitives) = primitives.into_tables();
    let tokens = ResolvedTokens {
        light_primitives,
        dark_primitives,
        light_semantic,
        dark_semantic,
        spacing,
        semantic_spacing,
        radius,
        gradients,
        typography,
        font_sizes,
    };

    info!(
        "resolution finished with {} diagnostics",
        diagnostics.len()
    );
    (tokens, diagnostics)
}
