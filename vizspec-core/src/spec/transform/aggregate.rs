use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTransformDef {
    pub aggregate: Vec<AggregatedFieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupby: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedFieldDef {
    pub op: AggregateOp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(rename = "as")]
    pub as_: String,
}

impl AggregatedFieldDef {
    pub fn new<S: Into<String>>(op: AggregateOp, field: Option<&str>, as_: S) -> Self {
        Self {
            op,
            field: field.map(String::from),
            as_: as_.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Valid,
    Values,
    Missing,
    Distinct,
    Sum,
    Product,
    Mean,
    Average,
    Variance,
    Variancep,
    Stdev,
    Stdevp,
    Stderr,
    Median,
    Q1,
    Q3,
    Ci0,
    Ci1,
    Min,
    Max,
    Argmin,
    Argmax,
}

impl AggregateOp {
    pub fn name(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default()
    }
}

impl AggregateTransformDef {
    pub fn new(aggregate: Vec<AggregatedFieldDef>, groupby: Vec<String>) -> Self {
        Self {
            aggregate,
            groupby,
            extra: Default::default(),
        }
    }
}

impl TransformDefTrait for AggregateTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.groupby
            .iter()
            .cloned()
            .chain(self.aggregate.iter().filter_map(|agg| agg.field.clone()))
            .collect()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.aggregate.iter().map(|agg| agg.as_.clone()).collect()
    }
}
