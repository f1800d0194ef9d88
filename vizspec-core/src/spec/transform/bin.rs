use crate::spec::transform::TransformDefTrait;
use crate::spec::values::ExprRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bin configuration parameters, shared by the bin transform and the `bin`
/// modifier of a channel definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub binned: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub divide: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<BinExtent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxbins: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minstep: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<f64>>,
}

impl BinParams {
    pub fn maxbins(maxbins: f64) -> Self {
        Self {
            maxbins: Some(maxbins),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinExtent {
    Value([f64; 2]),
    Param { param: String },
    Expr(ExprRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinnedKeyword {
    Binned,
}

/// `true`, `"binned"` for pre-binned data, or explicit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinDef {
    Flag(bool),
    Binned(BinnedKeyword),
    Params(BinParams),
}

impl From<bool> for BinDef {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<BinParams> for BinDef {
    fn from(v: BinParams) -> Self {
        Self::Params(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinAs {
    Start(String),
    Range([String; 2]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinTransformDef {
    pub bin: BinDef,

    pub field: String,

    #[serde(rename = "as")]
    pub as_: BinAs,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for BinTransformDef {
    fn input_fields(&self) -> Vec<String> {
        vec![self.field.clone()]
    }

    fn produced_fields(&self) -> Vec<String> {
        match &self.as_ {
            BinAs::Start(start) => vec![start.clone(), format!("{start}_end")],
            BinAs::Range(range) => range.to_vec(),
        }
    }
}
