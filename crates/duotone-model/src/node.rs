use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a recognized leaf token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafKind {
    Color,
    Dimension,
    Gradient,
    Typography,
    /// String-valued node without a recognized `type`. The semantic layer of
    /// real documents contains reference nodes shaped like this.
    Alias,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafValue {
    Text(String),
    Number(f64),
    Gradient(GradientValue),
    Typography(TypographyValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    pub position: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientValue {
    pub rotation: f64,
    pub stops: Vec<GradientStop>,
}

/// Raw typography properties as authored; interpretation (weight names,
/// percentages) happens in the typography extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyValue {
    pub font_weight: Option<WeightSpec>,
    pub line_height: Option<MetricSpec>,
    pub letter_spacing: Option<MetricSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeightSpec {
    Named(String),
    Numeric(f64),
}

/// A metric that may be absolute, a percentage, or free-form text. Authored
/// either directly or wrapped in a `{ "value": ... }` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricSpec {
    Absolute(f64),
    Percent(f64),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLeaf {
    pub kind: LeafKind,
    pub value: LeafValue,
}

/// Container node: ordered children keyed by the authored names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenGroup {
    children: Vec<(String, TokenNode)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Container(TokenGroup),
}

impl WeightSpec {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(WeightSpec::Named(s.clone())),
            Value::Number(n) => n.as_f64().map(WeightSpec::Numeric),
            _ => None,
        }
    }
}

impl MetricSpec {
    fn from_value(value: &Value) -> Option<Self> {
        let inner = match value {
            Value::Object(map) => map.get("value")?,
            other => other,
        };
        match inner {
            Value::Number(n) => n.as_f64().map(MetricSpec::Absolute),
            Value::String(s) => {
                if let Some(stripped) = s.strip_suffix('%') {
                    stripped.trim().parse::<f64>().ok().map(MetricSpec::Percent)
                } else if let Ok(n) = s.trim().parse::<f64>() {
                    Some(MetricSpec::Absolute(n))
                } else {
                    Some(MetricSpec::Raw(s.clone()))
                }
            }
            _ => None,
        }
    }
}

impl GradientStop {
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let color = map.get("color")?.as_str()?.to_string();
        let position = map.get("position").and_then(Value::as_f64);
        Some(GradientStop { color, position })
    }
}

impl GradientValue {
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let rotation = map.get("rotation").and_then(Value::as_f64).unwrap_or(0.0);
        let stops = map
            .get("stops")
            .and_then(Value::as_array)
            .map(|stops| stops.iter().filter_map(GradientStop::from_value).collect())
            .unwrap_or_default();
        Some(GradientValue { rotation, stops })
    }
}

impl TypographyValue {
    fn from_value(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(map) => map,
            None => return TypographyValue::default(),
        };
        TypographyValue {
            font_weight: map.get("fontWeight").and_then(WeightSpec::from_value),
            line_height: map.get("lineHeight").and_then(MetricSpec::from_value),
            letter_spacing: map.get("letterSpacing").and_then(MetricSpec::from_value),
        }
    }
}

impl TokenLeaf {
    /// Leaf predicate: a mapping is a leaf iff its `type` and `value` match a
    /// recognized shape, or it carries a string `value` with no recognized
    /// `type` (an alias)
    fn from_object(map: &serde_json::Map<String, Value>) -> Option<Self> {
        let value = map.get("value")?;
        match map.get("type").and_then(Value::as_str) {
            Some("color") => value.as_str().map(|s| TokenLeaf {
                kind: LeafKind::Color,
                value: LeafValue::Text(s.to_string()),
            }),
            Some("dimension") => match value {
                Value::Number(n) => n.as_f64().map(|n| TokenLeaf {
                    kind: LeafKind::Dimension,
                    value: LeafValue::Number(n),
                }),
                Value::String(s) => Some(TokenLeaf {
                    kind: LeafKind::Dimension,
                    value: LeafValue::Text(s.clone()),
                }),
                _ => None,
            },
            Some("custom-gradient") => GradientValue::from_value(value).map(|g| TokenLeaf {
                kind: LeafKind::Gradient,
                value: LeafValue::Gradient(g),
            }),
            Some("custom-typography") => Some(TokenLeaf {
                kind: LeafKind::Typography,
                value: LeafValue::Typography(TypographyValue::from_value(value)),
            }),
            _ => value.as_str().map(|s| TokenLeaf {
                kind: LeafKind::Alias,
                value: LeafValue::Text(s.to_string()),
            }),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.value {
            LeafValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl TokenGroup {
    pub fn from_children(children: Vec<(String, TokenNode)>) -> Self {
        Self { children }
    }

    pub fn get(&self, name: &str) -> Option<&TokenNode> {
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl TokenNode {
    /// Build a node from raw JSON. Non-mapping values are not tokens and
    /// yield `None`; the caller drops them silently.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        if let Some(leaf) = TokenLeaf::from_object(map) {
            return Some(TokenNode::Leaf(leaf));
        }
        let children = map
            .iter()
            .filter_map(|(name, child)| {
                TokenNode::from_value(child).map(|node| (name.clone(), node))
            })
            .collect();
        Some(TokenNode::Container(TokenGroup { children }))
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Container(group) => Some(group),
            TokenNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenLeaf> {
        match self {
            TokenNode::Leaf(leaf) => Some(leaf),
            TokenNode::Container(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> TokenNode {
        let value: Value = serde_json::from_str(json).unwrap();
        TokenNode::from_value(&value).unwrap()
    }

    #[test]
    fn test_color_leaf() {
        let node = node(r##"{"type": "color", "value": "#1A2B3CFF"}"##);
        let leaf = node.as_leaf().unwrap();
        assert_eq!(leaf.kind, LeafKind::Color);
        assert_eq!(leaf.text(), Some("#1A2B3CFF"));
    }

    #[test]
    fn test_dimension_leaf_number_and_reference() {
        let numeric = node(r#"{"type": "dimension", "value": 24}"#);
        assert_eq!(
            numeric.as_leaf().unwrap().value,
            LeafValue::Number(24.0)
        );

        let reference = node(r#"{"type": "dimension", "value": "{primitives.mode 1.spacing.lg (24px)}"}"#);
        assert_eq!(reference.as_leaf().unwrap().kind, LeafKind::Dimension);
    }

    #[test]
    fn test_alias_leaf_without_type() {
        let node = node(r#"{"value": "{primitives.brand.600}"}"#);
        let leaf = node.as_leaf().unwrap();
        assert_eq!(leaf.kind, LeafKind::Alias);
    }

    #[test]
    fn test_container_preserves_order() {
        let node = node(
            r#"{
                "large": {"type": "dimension", "value": 24},
                "small": {"type": "dimension", "value": 4},
                "medium": {"type": "dimension", "value": 12}
            }"#,
        );
        let names: Vec<&str> = node.as_group().unwrap().iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["large", "small", "medium"]);
    }

    #[test]
    fn test_gradient_leaf() {
        let node = node(
            r##"{
                "type": "custom-gradient",
                "value": {
                    "rotation": 90,
                    "stops": [
                        {"color": "#112233", "position": 0},
                        {"color": "#445566", "position": 1}
                    ]
                }
            }"##,
        );
        match &node.as_leaf().unwrap().value {
            LeafValue::Gradient(gradient) => {
                assert_eq!(gradient.rotation, 90.0);
                assert_eq!(gradient.stops.len(), 2);
                assert_eq!(gradient.stops[0].color, "#112233");
            }
            other => panic!("expected gradient value, got {:?}", other),
        }
    }

    #[test]
    fn test_typography_leaf() {
        let node = node(
            r#"{
                "type": "custom-typography",
                "value": {
                    "fontWeight": "semibold",
                    "lineHeight": {"value": "150%"},
                    "letterSpacing": {"value": -1}
                }
            }"#,
        );
        match &node.as_leaf().unwrap().value {
            LeafValue::Typography(typography) => {
                assert_eq!(
                    typography.font_weight,
                    Some(WeightSpec::Named("semibold".to_string()))
                );
                assert_eq!(typography.line_height, Some(MetricSpec::Percent(150.0)));
                assert_eq!(typography.letter_spacing, Some(MetricSpec::Absolute(-1.0)));
            }
            other => panic!("expected typography value, got {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_children_are_dropped() {
        let node = node(r##"{"description": "hello", "nested": {"type": "color", "value": "#FFFFFF"}}"##);
        let group = node.as_group().unwrap();
        assert_eq!(group.len(), 1);
        assert!(group.get("nested").is_some());
    }
}
