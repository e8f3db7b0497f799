use crate::node::{LeafValue, TokenGroup, TokenNode};
use duotone_common::{DuotoneError, Result};
use serde_json::Value;

/// A parsed token document: the immutable input of one run.
///
/// Top-level keys are human-chosen namespace labels (`primitives`,
/// `1. color modes`, `2. radius`, ...); everything below them is a token
/// tree. Parsing is a single pass, so traversal never has to probe shapes.
#[derive(Debug, Clone)]
pub struct TokenDocument {
    root: TokenGroup,
}

impl TokenDocument {
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        let map = value.as_object().ok_or_else(|| {
            DuotoneError::Document("top level of the token document must be an object".to_string())
        })?;
        let children = map
            .iter()
            .filter_map(|(name, child)| {
                TokenNode::from_value(child).map(|node| (name.clone(), node))
            })
            .collect();
        Ok(Self {
            root: TokenGroup::from_children(children),
        })
    }

    pub fn root(&self) -> &TokenGroup {
        &self.root
    }

    /// Top-level group with this exact label
    pub fn namespace_exact(&self, label: &str) -> Option<&TokenGroup> {
        self.root.get(label).and_then(TokenNode::as_group)
    }

    /// First top-level group whose label contains `needle` (case-insensitive)
    pub fn namespace_containing(&self, needle: &str) -> Option<(&str, &TokenGroup)> {
        let needle = needle.to_lowercase();
        self.root.iter().find_map(|(label, node)| {
            if label.to_lowercase().contains(&needle) {
                node.as_group().map(|group| (label, group))
            } else {
                None
            }
        })
    }

    /// First top-level group whose label starts with a numeric ordinal
    /// (`"2."`, `"3."`, ...) and contains `needle` (case-insensitive)
    pub fn ordinal_namespace(&self, needle: &str) -> Option<(&str, &TokenGroup)> {
        let needle = needle.to_lowercase();
        self.root.iter().find_map(|(label, node)| {
            if has_ordinal_prefix(label) && label.to_lowercase().contains(&needle) {
                node.as_group().map(|group| (label, group))
            } else {
                None
            }
        })
    }

    /// Follow a dotted reference that starts with a top-level label and read
    /// the string value of the leaf it points at. `dotted` is the reference
    /// with braces already stripped, e.g. `1. color modes.alpha.white`.
    pub fn leaf_text_at(&self, label: &str, dotted: &str) -> Option<&str> {
        let rest = dotted.strip_prefix(label)?.strip_prefix('.')?;
        let mut node = self.root.get(label)?;
        for segment in rest.split('.') {
            node = node.as_group()?.get(segment)?;
        }
        match node {
            TokenNode::Leaf(leaf) => match &leaf.value {
                LeafValue::Text(text) => Some(text),
                _ => None,
            },
            TokenNode::Container(_) => None,
        }
    }
}

fn has_ordinal_prefix(label: &str) -> bool {
    let mut saw_digit = false;
    for c in label.chars() {
        if c.is_ascii_digit() {
            saw_digit = true;
            continue;
        }
        return saw_digit && c == '.';
    }
    false
}
