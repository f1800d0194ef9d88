use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Compute the `[min, max]` of a field and store it in a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtentTransformDef {
    pub extent: String,

    pub param: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for ExtentTransformDef {
    fn input_fields(&self) -> Vec<String> {
        vec![self.extent.clone()]
    }

    fn output_params(&self) -> Vec<String> {
        vec![self.param.clone()]
    }
}
