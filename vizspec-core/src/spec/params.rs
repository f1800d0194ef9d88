use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named variable or selection, referenced by name from expressions,
/// filters and scale domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<SelectDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Point,
    Interval,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectDef {
    Type(SelectionType),
    Params(SelectParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectParams {
    #[serde(rename = "type")]
    pub type_: SelectionType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encodings: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParamDef {
    fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            value: None,
            expr: None,
            select: None,
            bind: None,
            extra: Default::default(),
        }
    }

    pub fn variable<S: Into<String>>(name: S, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::named(name)
        }
    }

    pub fn expression<S: Into<String>, E: Into<String>>(name: S, expr: E) -> Self {
        Self {
            expr: Some(expr.into()),
            ..Self::named(name)
        }
    }

    pub fn selection<S: Into<String>>(name: S, type_: SelectionType) -> Self {
        Self {
            select: Some(SelectDef::Type(type_)),
            ..Self::named(name)
        }
    }

    pub fn with_bind(mut self, bind: Value) -> Self {
        self.bind = Some(bind);
        self
    }

    pub fn is_selection(&self) -> bool {
        self.select.is_some()
    }
}
