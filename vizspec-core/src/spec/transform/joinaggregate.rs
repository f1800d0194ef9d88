use crate::spec::transform::aggregate::AggregatedFieldDef;
use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aggregate within groups and join the results back onto every row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinAggregateTransformDef {
    pub joinaggregate: Vec<AggregatedFieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groupby: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for JoinAggregateTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.groupby
            .iter()
            .cloned()
            .chain(self.joinaggregate.iter().filter_map(|agg| agg.field.clone()))
            .collect()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.joinaggregate
            .iter()
            .map(|agg| agg.as_.clone())
            .collect()
    }
}
