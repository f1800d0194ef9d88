use crate::spec::update::UpdateField;
use crate::spec::values::{DatumValue, ExprRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleType {
    Linear,
    Log,
    Pow,
    Sqrt,
    Symlog,
    Time,
    Utc,
    Ordinal,
    Band,
    Point,
    Quantile,
    Quantize,
    Threshold,
    BinOrdinal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleDef {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ScaleType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ScaleDomain>,

    #[serde(rename = "domainMid", skip_serializing_if = "Option::is_none")]
    pub domain_mid: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ScaleRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<ScaleScheme>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,

    #[serde(rename = "paddingInner", skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,

    #[serde(rename = "paddingOuter", skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScaleDef {
    pub fn of_type(type_: ScaleType) -> Self {
        Self {
            type_: Some(type_),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKeyword {
    Unaggregated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDomain {
    pub param: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDomain {
    Keyword(DomainKeyword),
    Values(Vec<DatumValue>),
    Param(ParamDomain),
    Expr(ExprRef),
}

impl From<Vec<DatumValue>> for ScaleDomain {
    fn from(v: Vec<DatumValue>) -> Self {
        Self::Values(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKeyword {
    Width,
    Height,
    Symbol,
    Category,
    Ordinal,
    Ramp,
    Diverging,
    Heatmap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleRange {
    Keyword(RangeKeyword),
    Values(Vec<DatumValue>),
    Expr(ExprRef),
    Field { field: String },
}

impl From<Vec<DatumValue>> for ScaleRange {
    fn from(v: Vec<DatumValue>) -> Self {
        Self::Values(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeParams {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleScheme {
    Name(String),
    Params(SchemeParams),
    Expr(ExprRef),
}

impl From<&str> for ScaleScheme {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl UpdateField for ScaleDef {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scale_keys() {
        let scale = ScaleDef {
            type_: Some(ScaleType::BinOrdinal),
            domain: Some(ScaleDomain::Values(vec![0.into(), 100.into()])),
            padding_inner: Some(0.1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({"type": "bin-ordinal", "domain": [0.0, 100.0], "paddingInner": 0.1})
        );
    }

    #[test]
    fn test_domain_variants() {
        let domain: ScaleDomain = serde_json::from_value(json!("unaggregated")).unwrap();
        assert_eq!(domain, ScaleDomain::Keyword(DomainKeyword::Unaggregated));

        let domain: ScaleDomain = serde_json::from_value(json!({"param": "brush"})).unwrap();
        assert!(matches!(
            domain,
            ScaleDomain::Param(ParamDomain { ref param, .. }) if param == "brush"
        ));
    }
}
