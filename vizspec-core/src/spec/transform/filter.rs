use crate::spec::transform::timeunit::TimeUnit;
use crate::spec::transform::TransformDefTrait;
use crate::spec::values::DatumValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vizspec_common::escape::unescape_field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTransformDef {
    pub filter: FilterPredicate,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterTransformDef {
    pub fn new<P: Into<FilterPredicate>>(filter: P) -> Self {
        Self {
            filter: filter.into(),
            extra: Default::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterPredicate {
    Expression(String),
    Param(ParamPredicate),
    Field(FieldPredicate),
    Not { not: Box<FilterPredicate> },
    And { and: Vec<FilterPredicate> },
    Or { or: Vec<FilterPredicate> },
}

impl From<&str> for FilterPredicate {
    fn from(v: &str) -> Self {
        Self::Expression(v.to_string())
    }
}

impl From<FieldPredicate> for FilterPredicate {
    fn from(v: FieldPredicate) -> Self {
        Self::Field(v)
    }
}

impl From<ParamPredicate> for FilterPredicate {
    fn from(v: ParamPredicate) -> Self {
        Self::Param(v)
    }
}

impl FilterPredicate {
    fn collect_fields(&self, fields: &mut Vec<String>) {
        match self {
            FilterPredicate::Field(pred) => fields.push(unescape_field(&pred.field)),
            FilterPredicate::Not { not } => not.collect_fields(fields),
            FilterPredicate::And { and: preds } | FilterPredicate::Or { or: preds } => {
                for pred in preds {
                    pred.collect_fields(fields)
                }
            }
            FilterPredicate::Expression(_) | FilterPredicate::Param(_) => {}
        }
    }
}

/// Keep rows selected by a named selection parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamPredicate {
    pub param: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    pub field: String,

    #[serde(rename = "timeUnit", skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal: Option<DatumValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<DatumValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<DatumValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<DatumValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<DatumValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[DatumValue; 2]>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<DatumValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl FieldPredicate {
    pub fn equal<S: Into<String>, V: Into<DatumValue>>(field: S, value: V) -> Self {
        Self {
            field: field.into(),
            equal: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn one_of<S: Into<String>>(field: S, values: Vec<DatumValue>) -> Self {
        Self {
            field: field.into(),
            one_of: Some(values),
            ..Default::default()
        }
    }

    pub fn range<S: Into<String>>(field: S, min: f64, max: f64) -> Self {
        Self {
            field: field.into(),
            range: Some([min.into(), max.into()]),
            ..Default::default()
        }
    }
}

impl TransformDefTrait for FilterTransformDef {
    fn input_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        self.filter.collect_fields(&mut fields);
        fields
    }
}
