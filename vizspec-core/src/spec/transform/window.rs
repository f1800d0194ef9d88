use crate::spec::transform::aggregate::AggregateOp;
use crate::spec::transform::stack::SortField;
use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTransformDef {
    pub window: Vec<WindowFieldDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<[Option<i64>; 2]>,

    #[serde(rename = "ignorePeers", skip_serializing_if = "Option::is_none")]
    pub ignore_peers: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupby: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFieldDef {
    pub op: WindowTransformOp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<f64>,

    #[serde(rename = "as")]
    pub as_: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOp {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    CumeDist,
    Ntile,
    Lag,
    Lead,
    FirstValue,
    LastValue,
    NthValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowTransformOp {
    Aggregate(AggregateOp),
    Window(WindowOp),
}

impl From<AggregateOp> for WindowTransformOp {
    fn from(v: AggregateOp) -> Self {
        Self::Aggregate(v)
    }
}

impl From<WindowOp> for WindowTransformOp {
    fn from(v: WindowOp) -> Self {
        Self::Window(v)
    }
}

impl TransformDefTrait for WindowTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.groupby
            .iter()
            .cloned()
            .chain(self.sort.iter().map(|s| s.field.clone()))
            .chain(self.window.iter().filter_map(|w| w.field.clone()))
            .collect()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.window.iter().map(|w| w.as_.clone()).collect()
    }
}
