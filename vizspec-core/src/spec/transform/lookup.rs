use crate::spec::data::DataDef;
use crate::spec::transform::TransformDefTrait;
use crate::spec::values::DatumValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTransformDef {
    pub lookup: String,

    pub from: LookupFrom,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<LookupAs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DatumValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Secondary source to join against: an inline data source or a
/// selection parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupFrom {
    Data {
        data: DataDef,
        key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
    },
    Param {
        param: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupAs {
    Single(String),
    Many(Vec<String>),
}

impl TransformDefTrait for LookupTransformDef {
    fn input_fields(&self) -> Vec<String> {
        vec![self.lookup.clone()]
    }

    fn produced_fields(&self) -> Vec<String> {
        match (&self.as_, &self.from) {
            (Some(LookupAs::Single(name)), _) => vec![name.clone()],
            (Some(LookupAs::Many(names)), _) => names.clone(),
            (None, LookupFrom::Data { fields, .. }) => fields.clone().unwrap_or_default(),
            (None, LookupFrom::Param { param }) => vec![param.clone()],
        }
    }
}
