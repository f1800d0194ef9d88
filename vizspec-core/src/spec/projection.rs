use crate::spec::update::UpdateField;
use crate::spec::values::ExprRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionType {
    Albers,
    AlbersUsa,
    AzimuthalEqualArea,
    AzimuthalEquidistant,
    ConicConformal,
    ConicEqualArea,
    ConicEquidistant,
    EqualEarth,
    Equirectangular,
    Gnomonic,
    Identity,
    Mercator,
    NaturalEarth1,
    Orthographic,
    Stereographic,
    TransverseMercator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDef {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ProjectionType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<[f64; 2]>,

    #[serde(rename = "clipAngle", skip_serializing_if = "Option::is_none")]
    pub clip_angle: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    #[serde(rename = "reflectX", skip_serializing_if = "Option::is_none")]
    pub reflect_x: Option<ExprOrBool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExprOrBool {
    Bool(bool),
    Expr(ExprRef),
}

impl ProjectionDef {
    pub fn of_type(type_: ProjectionType) -> Self {
        Self {
            type_: Some(type_),
            ..Default::default()
        }
    }
}

impl UpdateField for ProjectionDef {}
