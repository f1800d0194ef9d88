use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Expand array-valued fields into one row per element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenTransformDef {
    pub flatten: Vec<String>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for FlattenTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.flatten.clone()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_.clone().unwrap_or_else(|| self.flatten.clone())
    }
}
