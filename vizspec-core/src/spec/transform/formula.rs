use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Derive a new field from an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateTransformDef {
    pub calculate: String,

    #[serde(rename = "as")]
    pub as_: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalculateTransformDef {
    pub fn new<E: Into<String>, S: Into<String>>(calculate: E, as_: S) -> Self {
        Self {
            calculate: calculate.into(),
            as_: as_.into(),
            extra: Default::default(),
        }
    }
}

impl TransformDefTrait for CalculateTransformDef {
    // Fields referenced inside the expression are not tracked
    fn produced_fields(&self) -> Vec<String> {
        vec![self.as_.clone()]
    }
}
