pub mod document;
pub mod mode;
pub mod node;
pub mod path;

pub use document::TokenDocument;
pub use mode::{Mode, ModeSet};
pub use node::{
    GradientStop, GradientValue, LeafKind, LeafValue, MetricSpec, TokenGroup, TokenLeaf,
    TokenNode, TypographyValue, WeightSpec,
};
pub use path::TokenPath;
