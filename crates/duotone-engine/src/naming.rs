//! Canonical identifier derivation.
//!
//! Free-form design-tool path names are not valid resource identifiers and
//! frequently collide once cleaned, so naming is a two-pass affair: a
//! pre-pass tallies the base form of every name per mode, and the real pass
//! appends a numeric disambiguator (recovered from a parenthetical in the
//! raw segment) only to names known to collide.

use duotone_model::{Mode, ModeSet, TokenPath};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\(([^)]*)\)").unwrap())
}

struct CleanSegment {
    text: String,
    disambiguator: Option<String>,
}

/// Strip parenthetical groups (remembering purely numeric content), then
/// reduce to lowercase `[a-z0-9_]` with collapsed separators
fn clean_segment(raw: &str) -> CleanSegment {
    let mut disambiguator = None;
    let stripped = paren_re().replace_all(raw, |caps: &regex::Captures<'_>| {
        let inner = caps[1].trim();
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
            disambiguator = Some(inner.to_string());
        }
        String::new()
    });
    CleanSegment {
        text: sanitize(&stripped),
        disambiguator,
    }
}

fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
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

fn strip_structural_prefixes(parts: &mut Vec<String>) {
    if parts.first().map(String::as_str) == Some("colors") {
        parts.remove(0);
    }
    if parts.first().map(String::as_str) == Some("base") {
        parts.remove(0);
    }
    if parts.first().map(String::as_str) == Some("component") {
        parts.remove(0);
    }
    if parts.len() > 1 && parts.first().map(String::as_str) == Some("colors") {
        parts.remove(0);
    }
}

/// Derive the canonical identifier for a token path.
///
/// `taken` holds the base identifiers known to collide within the target
/// mode; the disambiguator is appended only when the derived name is in that
/// set. An all-stripped path yields an empty string, which the caller must
/// detect and skip.
pub fn canonical_name(path: &TokenPath, taken: &HashSet<String>) -> String {
    let mut disambiguator = None;
    let mut parts: Vec<String> = Vec::new();
    for raw in path.segments() {
        let cleaned = clean_segment(raw);
        if cleaned.disambiguator.is_some() {
            disambiguator = cleaned.disambiguator;
        }
        if !cleaned.text.is_empty() {
            parts.push(cleaned.text);
        }
    }

    strip_structural_prefixes(&mut parts);

    let last_is_numeric = parts
        .last()
        .map_or(false, |p| p.chars().all(|c| c.is_ascii_digit()));
    if parts.len() > 1 && last_is_numeric {
        // numeric leaf keeps its named parent (a palette shade); this branch
        // never disambiguates
        return format!("{}_{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    }

    let name = if parts.len() > 1 {
        parts.last().cloned().unwrap_or_default()
    } else {
        parts.join("_")
    };

    match disambiguator {
        Some(d) if taken.contains(&name) => format!("{}_{}", name, d),
        _ => name,
    }
}

/// The base (undisambiguated) form of a canonical identifier
pub fn base_name(path: &TokenPath) -> String {
    canonical_name(path, &HashSet::new())
}

/// Base identifiers that occur more than once within a mode
#[derive(Debug, Default)]
pub struct ConflictSet {
    light: HashSet<String>,
    dark: HashSet<String>,
}

impl ConflictSet {
    pub fn for_mode(&self, mode: Mode) -> &HashSet<String> {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

/// Tallies base-name occurrences per mode during the pre-pass. Collision is
/// only knowable after seeing all nodes, so this runs over the whole subtree
/// before any name is assigned.
#[derive(Debug, Default)]
pub struct NameTally {
    counts: HashMap<(Mode, String), usize>,
}

impl NameTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, modes: ModeSet, base: &str) {
        for mode in Mode::ALL {
            if modes.includes(mode) {
                *self
                    .counts
                    .entry((mode, base.to_string()))
                    .or_insert(0) += 1;
            }
        }
    }

    pub fn into_conflicts(self) -> ConflictSet {
        let mut conflicts = ConflictSet::default();
        for ((mode, name), count) in self.counts {
            if count > 1 {
                match mode {
                    Mode::Light => conflicts.light.insert(name),
                    Mode::Dark => conflicts.dark.insert(name),
                };
            }
        }
        conflicts
    }
}
