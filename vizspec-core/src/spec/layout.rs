use crate::spec::update::UpdateField;
use crate::spec::values::ExprRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKeyword {
    Container,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSize {
    pub step: f64,
}

/// Width or height of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeDef {
    Number(f64),
    Container(ContainerKeyword),
    Step(StepSize),
}

impl From<f64> for SizeDef {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for SizeDef {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl SizeDef {
    pub fn container() -> Self {
        Self::Container(ContainerKeyword::Container)
    }

    pub fn step(step: f64) -> Self {
        Self::Step(StepSize { step })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutosizeType {
    Pad,
    Fit,
    FitX,
    FitY,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutosizeContains {
    Content,
    Padding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosizeParams {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<AutosizeType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<AutosizeContains>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutosizeDef {
    Type(AutosizeType),
    Params(AutosizeParams),
}

impl From<AutosizeType> for AutosizeDef {
    fn from(v: AutosizeType) -> Self {
        Self::Type(v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingDef {
    Uniform(f64),
    Sides(Sides),
    Expr(ExprRef),
}

impl From<f64> for PaddingDef {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bounds {
    Full,
    Flush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlign {
    All,
    Each,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCol<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlignDef {
    Uniform(LayoutAlign),
    RowCol(RowCol<LayoutAlign>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterDef {
    Uniform(bool),
    RowCol(RowCol<bool>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpacingDef {
    Uniform(f64),
    RowCol(RowCol<f64>),
}

impl From<f64> for SpacingDef {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

/// Styling of the view rectangle behind a single view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewBackground {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    #[serde(rename = "strokeWidth", skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,

    #[serde(rename = "cornerRadius", skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpdateField for ViewBackground {}

impl UpdateField for AutosizeParams {}
