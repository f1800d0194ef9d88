use crate::spec::channel::SortOrder;
use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackTransformDef {
    pub stack: String,

    pub groupby: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<StackOffset>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,

    #[serde(rename = "as")]
    pub as_: [String; 2],

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOffset {
    Zero,
    Center,
    Normalize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl TransformDefTrait for StackTransformDef {
    fn input_fields(&self) -> Vec<String> {
        let mut fields = vec![self.stack.clone()];
        fields.extend(self.groupby.iter().cloned());
        fields.extend(self.sort.iter().map(|s| s.field.clone()));
        fields
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_.to_vec()
    }
}
