use crate::spec::transform::TransformDefTrait;
use crate::spec::values::DatumValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputeTransformDef {
    pub impute: String,

    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvals: Option<Vec<DatumValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<[Option<i64>; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ImputeMethod>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupby: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<DatumValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeMethod {
    Value,
    Mean,
    Median,
    Max,
    Min,
}

impl TransformDefTrait for ImputeTransformDef {
    fn input_fields(&self) -> Vec<String> {
        let mut fields = vec![self.impute.clone(), self.key.clone()];
        fields.extend(self.groupby.iter().cloned());
        fields
    }
}
