use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keep a random subset of at most `sample` rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleTransformDef {
    pub sample: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for SampleTransformDef {}
