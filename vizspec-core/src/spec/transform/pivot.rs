use crate::spec::transform::aggregate::AggregateOp;
use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTransformDef {
    pub pivot: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupby: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<AggregateOp>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for PivotTransformDef {
    fn input_fields(&self) -> Vec<String> {
        let mut fields = vec![self.pivot.clone(), self.value.clone()];
        fields.extend(self.groupby.iter().cloned());
        fields
    }
    // Output columns depend on data values and are not known up front
}
