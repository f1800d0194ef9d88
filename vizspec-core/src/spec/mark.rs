use crate::spec::update::UpdateField;
use crate::spec::values::{PaintValue, ShapeValue, TextValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Arc,
    Area,
    Bar,
    Image,
    Line,
    Point,
    Rect,
    Rule,
    Text,
    Tick,
    Trail,
    Circle,
    Square,
    Geoshape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeMarkType {
    Boxplot,
    Errorbar,
    Errorband,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
    Alphabetic,
    LineTop,
    LineBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolate {
    Linear,
    LinearClosed,
    Step,
    StepBefore,
    StepAfter,
    Basis,
    BasisOpen,
    BasisClosed,
    Cardinal,
    CardinalOpen,
    CardinalClosed,
    Bundle,
    Monotone,
}

/// A primitive mark with explicit properties.
///
/// Properties left as `None` take the renderer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub type_: MarkType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<Orientation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<TextBaseline>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dx: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dy: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(rename = "innerRadius", skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,

    #[serde(rename = "outerRadius", skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,

    #[serde(rename = "padAngle", skip_serializing_if = "Option::is_none")]
    pub pad_angle: Option<f64>,

    #[serde(rename = "cornerRadius", skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PaintValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<PaintValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<PaintValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(rename = "fillOpacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,

    #[serde(rename = "strokeOpacity", skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,

    #[serde(rename = "strokeWidth", skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,

    #[serde(rename = "strokeDash", skip_serializing_if = "Option::is_none")]
    pub stroke_dash: Option<Vec<f64>>,

    #[serde(rename = "strokeCap", skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<StrokeCap>,

    #[serde(rename = "strokeJoin", skip_serializing_if = "Option::is_none")]
    pub stroke_join: Option<StrokeJoin>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<Interpolate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<bool>,

    #[serde(rename = "binSpacing", skip_serializing_if = "Option::is_none")]
    pub bin_spacing: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(rename = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(rename = "fontStyle", skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,

    #[serde(rename = "fontWeight", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarkDef {
    /// The default record for `type_`: every property unset
    pub fn new(type_: MarkType) -> Self {
        Self {
            type_,
            aria: None,
            description: None,
            style: None,
            clip: None,
            tooltip: None,
            orient: None,
            align: None,
            baseline: None,
            dx: None,
            dy: None,
            angle: None,
            radius: None,
            inner_radius: None,
            outer_radius: None,
            pad_angle: None,
            corner_radius: None,
            size: None,
            shape: None,
            filled: None,
            color: None,
            fill: None,
            stroke: None,
            opacity: None,
            fill_opacity: None,
            stroke_opacity: None,
            stroke_width: None,
            stroke_dash: None,
            stroke_cap: None,
            stroke_join: None,
            interpolate: None,
            tension: None,
            point: None,
            line: None,
            bin_spacing: None,
            thickness: None,
            width: None,
            height: None,
            text: None,
            font: None,
            font_size: None,
            font_style: None,
            font_weight: None,
            limit: None,
            href: None,
            cursor: None,
            extra: Default::default(),
        }
    }
}

impl UpdateField for MarkDef {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeExtent {
    MinMax,
    Ci,
    Stderr,
    Stdev,
    Iqr,
}

/// Extent of a composite mark: a keyword, or for box plots the whisker
/// length as a multiple of the interquartile range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompositeExtentDef {
    Keyword(CompositeExtent),
    Iqr(f64),
}

/// Styling for one part of a composite mark (`box`, `rule`, `ticks`, ...):
/// `false` hides it, an object restyles it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompositePart {
    Flag(bool),
    Props(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeMarkDef {
    #[serde(rename = "type")]
    pub type_: CompositeMarkType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<Orientation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<CompositeExtentDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PaintValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolate: Option<Interpolate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,

    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    pub box_: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<CompositePart>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<CompositePart>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompositeMarkDef {
    pub fn new(type_: CompositeMarkType) -> Self {
        Self {
            type_,
            orient: None,
            extent: None,
            color: None,
            opacity: None,
            size: None,
            clip: None,
            interpolate: None,
            tension: None,
            thickness: None,
            box_: None,
            median: None,
            outliers: None,
            rule: None,
            ticks: None,
            band: None,
            borders: None,
            extra: Default::default(),
        }
    }
}

impl UpdateField for CompositeMarkDef {}

/// The type of a mark, without its properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Primitive(MarkType),
    Composite(CompositeMarkType),
}

/// The `mark` property of a single-view spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyMark {
    Primitive(MarkType),
    Composite(CompositeMarkType),
    PrimitiveDef(MarkDef),
    CompositeDef(CompositeMarkDef),
}

impl AnyMark {
    pub fn kind(&self) -> MarkKind {
        match self {
            AnyMark::Primitive(t) => MarkKind::Primitive(*t),
            AnyMark::PrimitiveDef(def) => MarkKind::Primitive(def.type_),
            AnyMark::Composite(t) => MarkKind::Composite(*t),
            AnyMark::CompositeDef(def) => MarkKind::Composite(def.type_),
        }
    }

    /// Replace a record equal to its type's default record with the bare
    /// type. Idempotent and lossless.
    pub fn compact(self) -> Self {
        match self {
            AnyMark::PrimitiveDef(def) if def == MarkDef::new(def.type_) => {
                AnyMark::Primitive(def.type_)
            }
            AnyMark::CompositeDef(def) if def == CompositeMarkDef::new(def.type_) => {
                AnyMark::Composite(def.type_)
            }
            other => other,
        }
    }

    /// Record form of the mark, with a bare type expanded to its default
    /// record. Two marks are equivalent when their expansions are equal.
    pub fn expand(self) -> Self {
        match self {
            AnyMark::Primitive(t) => AnyMark::PrimitiveDef(MarkDef::new(t)),
            AnyMark::Composite(t) => AnyMark::CompositeDef(CompositeMarkDef::new(t)),
            record => record,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind(), MarkKind::Composite(_))
    }
}

impl From<MarkType> for AnyMark {
    fn from(v: MarkType) -> Self {
        Self::Primitive(v)
    }
}

impl From<CompositeMarkType> for AnyMark {
    fn from(v: CompositeMarkType) -> Self {
        Self::Composite(v)
    }
}

impl From<MarkDef> for AnyMark {
    fn from(v: MarkDef) -> Self {
        Self::PrimitiveDef(v)
    }
}

impl From<CompositeMarkDef> for AnyMark {
    fn from(v: CompositeMarkDef) -> Self {
        Self::CompositeDef(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(MarkDef::new(MarkType::Bar).into(), AnyMark::Primitive(MarkType::Bar))]
    #[case(
        CompositeMarkDef::new(CompositeMarkType::Errorband).into(),
        AnyMark::Composite(CompositeMarkType::Errorband)
    )]
    #[case(AnyMark::Primitive(MarkType::Line), AnyMark::Primitive(MarkType::Line))]
    #[case(
        MarkDef::new(MarkType::Point).update(|m| &mut m.filled, true).into(),
        MarkDef::new(MarkType::Point).update(|m| &mut m.filled, true).into()
    )]
    #[case(
        CompositeMarkDef::new(CompositeMarkType::Boxplot)
            .update(|m| &mut m.extent, CompositeExtentDef::Iqr(1.5))
            .into(),
        CompositeMarkDef::new(CompositeMarkType::Boxplot)
            .update(|m| &mut m.extent, CompositeExtentDef::Iqr(1.5))
            .into()
    )]
    fn test_compact(#[case] mark: AnyMark, #[case] expected: AnyMark) {
        let compacted = mark.clone().compact();
        assert_eq!(compacted, expected);
        assert_eq!(compacted.clone().compact(), compacted);
        assert_eq!(compacted.expand(), mark.expand());
    }

    #[test]
    fn test_record_with_extra_property_is_kept() {
        let mut def = MarkDef::new(MarkType::Bar);
        def.extra.insert("invalid".to_string(), json!("filter"));
        let mark = AnyMark::from(def).compact();
        assert!(matches!(mark, AnyMark::PrimitiveDef(_)));
    }

    #[test]
    fn test_mark_serialization() {
        assert_eq!(
            serde_json::to_value(AnyMark::Primitive(MarkType::Geoshape)).unwrap(),
            json!("geoshape")
        );
        let mark: AnyMark =
            serde_json::from_value(json!({"type": "boxplot", "extent": "min-max"})).unwrap();
        assert_eq!(mark.kind(), MarkKind::Composite(CompositeMarkType::Boxplot));

        let mark: AnyMark =
            serde_json::from_value(json!({"type": "bar", "cornerRadius": 4})).unwrap();
        match mark {
            AnyMark::PrimitiveDef(def) => assert_eq!(def.corner_radius, Some(4.0)),
            other => panic!("expected a bar record, got {other:?}"),
        }
    }
}
