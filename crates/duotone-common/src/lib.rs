use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fatal error types shared across the workspace
#[derive(thiserror::Error, Debug)]
pub enum DuotoneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DuotoneError>;

/// Category of a non-fatal condition encountered during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An expected top-level namespace is absent; its table stays empty
    MissingNamespace,
    /// Every lookup fallback for a reference failed; the token is dropped
    UnresolvedReference,
    /// A cross-mode reference names a primitive missing from that mode's table
    CrossModeMiss,
    /// A node was skipped (empty identifier, degenerate value)
    SkippedNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Accumulates non-fatal conditions. The run always completes with whatever
/// tables could be built; fatal conditions use [`DuotoneError`] instead.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.items.push(Diagnostic { kind, message });
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }
}
