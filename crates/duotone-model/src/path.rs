use std::fmt;

/// Ordered raw key segments from the tree root to a node. Captured once per
/// descent and never mutated; each level appends one segment to a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent_segment(&self) -> Option<&str> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(&self.segments[self.segments.len() - 2])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Lowercase space-joined form used for mode classification
    pub fn joined_lower(&self) -> String {
        self.segments.join(" ").to_lowercase()
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
