use crate::spec::update::UpdateField;
use crate::spec::values::DatumValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    Number,
    Time,
    Utc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<AxisOrient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "formatType", skip_serializing_if = "Option::is_none")]
    pub format_type: Option<FormatType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<bool>,

    #[serde(rename = "tickCount", skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,

    #[serde(rename = "labelAngle", skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<f64>,

    #[serde(rename = "labelExpr", skip_serializing_if = "Option::is_none")]
    pub label_expr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<DatumValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zindex: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AxisDef {
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendOrient {
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendType {
    Symbol,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendDef {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<LegendType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<LegendOrient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "formatType", skip_serializing_if = "Option::is_none")]
    pub format_type: Option<FormatType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,

    #[serde(rename = "labelExpr", skip_serializing_if = "Option::is_none")]
    pub label_expr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<DatumValue>>,

    #[serde(rename = "symbolType", skip_serializing_if = "Option::is_none")]
    pub symbol_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegendDef {
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderOrient {
    Top,
    Bottom,
    Left,
    Right,
}

/// Guide for facet channels (row, column, facet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "formatType", skip_serializing_if = "Option::is_none")]
    pub format_type: Option<FormatType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,

    #[serde(rename = "labelAngle", skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<f64>,

    #[serde(rename = "labelOrient", skip_serializing_if = "Option::is_none")]
    pub label_orient: Option<HeaderOrient>,

    #[serde(rename = "labelExpr", skip_serializing_if = "Option::is_none")]
    pub label_expr: Option<String>,

    #[serde(rename = "titleOrient", skip_serializing_if = "Option::is_none")]
    pub title_orient: Option<HeaderOrient>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HeaderDef {
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

impl UpdateField for AxisDef {}

impl UpdateField for LegendDef {}

impl UpdateField for HeaderDef {}
