use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vizspec_common::escape::unescape_field;

/// Collapse several fields into key/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldTransformDef {
    pub fold: Vec<String>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<[String; 2]>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoldTransformDef {
    pub fn new(fold: Vec<String>) -> Self {
        Self {
            fold,
            as_: None,
            extra: Default::default(),
        }
    }

    /// Output key and value field names, with the renderer's defaults
    pub fn as_(&self) -> [String; 2] {
        self.as_
            .clone()
            .unwrap_or_else(|| ["key".to_string(), "value".to_string()])
    }
}

impl TransformDefTrait for FoldTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.fold.iter().map(|f| unescape_field(f)).collect()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_().to_vec()
    }
}
