use crate::spec::attachments::{
    resolve_children, Attachments, AxisAttachments, ChannelChild, HeaderAttachments,
    LegendAttachments, NoAttachments, ScaleAttachment,
};
use crate::spec::transform::aggregate::AggregateOp;
use crate::spec::transform::bin::BinDef;
use crate::spec::transform::stack::StackOffset;
use crate::spec::transform::timeunit::TimeUnit;
use crate::spec::update::UpdateField;
use crate::spec::values::{
    DataType, DatumValue, ExprRef, NoValue, PaintValue, RepeatDimension, RepeatRef, ShapeValue,
    SizeValue, TextValue, TooltipValue, ValueSource,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use vizspec_common::escape::field_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortFieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<AggregateOp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

/// Sort order of a discrete domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortDef {
    Order(SortOrder),
    /// Sort by another channel, e.g. `"-y"`
    Encoding(String),
    Values(Vec<DatumValue>),
    Field(SortFieldDef),
}

impl From<SortOrder> for SortDef {
    fn from(v: SortOrder) -> Self {
        Self::Order(v)
    }
}

impl From<&str> for SortDef {
    fn from(v: &str) -> Self {
        Self::Encoding(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackDef {
    Offset(StackOffset),
    Flag(bool),
}

impl From<StackOffset> for StackDef {
    fn from(v: StackOffset) -> Self {
        Self::Offset(v)
    }
}

impl From<bool> for StackDef {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

/// Modifiers applied to the value of a field-backed channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldModifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateOp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<BinDef>,

    #[serde(rename = "timeUnit", skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl UpdateField for FieldModifiers {}

/// Category of encoding channel.
///
/// Fixes the literal type a channel accepts and which guide and scale
/// slots it carries.
pub trait ChannelKind: Debug + Clone + Copy + PartialEq + Default + 'static {
    type Value: Debug + Clone + PartialEq + Serialize + DeserializeOwned;
    type Attachments: Attachments;
}

/// Channel kinds that may hold a constant or an expression value
pub trait AcceptsValue: ChannelKind {}

/// Channel kinds that may hold a datum
pub trait AcceptsDatum: ChannelKind {}

macro_rules! channel_kind {
    ( $(#[$meta:meta])* $kind:ident: $value:ty, $attachments:ty $(, $marker:ident)* ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $kind;

        impl ChannelKind for $kind {
            type Value = $value;
            type Attachments = $attachments;
        }

        $( impl $marker for $kind {} )*
    };
}

channel_kind!(
    /// x, y
    PositionKind: f64, AxisAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// x2, y2 and the error-bar bounds
    SecondaryKind: f64, NoAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// xOffset, yOffset
    OffsetKind: f64, ScaleAttachment, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// theta, radius
    PolarKind: SizeValue, ScaleAttachment, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// theta2, radius2
    PolarSecondaryKind: SizeValue, NoAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// latitude, longitude and their secondaries
    GeoKind: f64, NoAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// color, fill, stroke
    PaintKind: PaintValue, LegendAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(
    /// size, opacity, angle and the other numeric mark properties
    NumericKind: f64, LegendAttachments, AcceptsValue, AcceptsDatum
);
channel_kind!(DashKind: Vec<f64>, LegendAttachments, AcceptsValue, AcceptsDatum);
channel_kind!(ShapeKind: ShapeValue, LegendAttachments, AcceptsValue, AcceptsDatum);
channel_kind!(TextKind: TextValue, NoAttachments, AcceptsValue, AcceptsDatum);
channel_kind!(
    /// href, url, description
    StringKind: String, NoAttachments, AcceptsValue
);
channel_kind!(TooltipKind: TooltipValue, NoAttachments, AcceptsValue);
channel_kind!(
    /// row, column, facet
    FacetKind: NoValue, HeaderAttachments
);
channel_kind!(
    /// detail, key and the fields of order
    FieldOnlyKind: NoValue, NoAttachments
);

/// Definition of one encoding channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", from = "RawChannelDef<K>")]
pub struct ChannelDef<K: ChannelKind> {
    #[serde(flatten)]
    pub source: ValueSource<K::Value>,

    #[serde(flatten)]
    pub modifiers: FieldModifiers,

    #[serde(flatten)]
    pub attachments: K::Attachments,

    /// Properties without a typed slot, such as `condition`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Modifiers and attachments claim their keys while the source only reads
// them, so the source keys also reach `extra` and are removed here.
#[derive(Deserialize)]
#[serde(bound = "")]
struct RawChannelDef<K: ChannelKind> {
    #[serde(flatten)]
    source: ValueSource<K::Value>,

    #[serde(flatten)]
    modifiers: FieldModifiers,

    #[serde(flatten)]
    attachments: K::Attachments,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<K: ChannelKind> From<RawChannelDef<K>> for ChannelDef<K> {
    fn from(raw: RawChannelDef<K>) -> Self {
        let mut extra = raw.extra;
        for key in raw.source.keys() {
            extra.remove(*key);
        }
        Self {
            source: raw.source,
            modifiers: raw.modifiers,
            attachments: raw.attachments,
            extra,
        }
    }
}

pub type PositionDef = ChannelDef<PositionKind>;
pub type SecondaryDef = ChannelDef<SecondaryKind>;
pub type OffsetDef = ChannelDef<OffsetKind>;
pub type PolarDef = ChannelDef<PolarKind>;
pub type PolarSecondaryDef = ChannelDef<PolarSecondaryKind>;
pub type GeoDef = ChannelDef<GeoKind>;
pub type PaintDef = ChannelDef<PaintKind>;
pub type NumericDef = ChannelDef<NumericKind>;
pub type DashDef = ChannelDef<DashKind>;
pub type ShapeDef = ChannelDef<ShapeKind>;
pub type TextDef = ChannelDef<TextKind>;
pub type StringDef = ChannelDef<StringKind>;
pub type TooltipDef = ChannelDef<TooltipKind>;
pub type FacetDef = ChannelDef<FacetKind>;
pub type FieldDef = ChannelDef<FieldOnlyKind>;

impl<K: ChannelKind> Default for ChannelDef<K> {
    fn default() -> Self {
        Self::new(ValueSource::default())
    }
}

impl<K: ChannelKind> ChannelDef<K> {
    pub fn new(source: ValueSource<K::Value>) -> Self {
        Self {
            source,
            modifiers: Default::default(),
            attachments: Default::default(),
            extra: Map::new(),
        }
    }

    /// No value source, e.g. for a bare `count` aggregate
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn field<S: Into<String>>(field: S) -> Self {
        Self::new(ValueSource::Field {
            field: field.into(),
            type_: None,
        })
    }

    pub fn repeat(dimension: RepeatDimension) -> Self {
        Self::new(ValueSource::Repeat {
            field: RepeatRef { repeat: dimension },
            type_: None,
        })
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.source.set_data_type(data_type);
        self
    }

    /// Fold guide and scale fragments into this definition
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = ChannelChild>,
    {
        resolve_children(&mut self.attachments, children);
        self
    }

    pub fn child<C: Into<ChannelChild>>(self, child: C) -> Self {
        self.with_children(Some(child.into()))
    }

    pub fn aggregate(mut self, op: AggregateOp) -> Self {
        self.modifiers.set(|m| &mut m.aggregate, op);
        self
    }

    pub fn bin<B: Into<BinDef>>(mut self, bin: B) -> Self {
        self.modifiers.set(|m| &mut m.bin, bin);
        self
    }

    pub fn time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.modifiers.set(|m| &mut m.time_unit, time_unit);
        self
    }

    pub fn sort<S: Into<SortDef>>(mut self, sort: S) -> Self {
        self.modifiers.set(|m| &mut m.sort, sort);
        self
    }

    pub fn stack<S: Into<StackDef>>(mut self, stack: S) -> Self {
        self.modifiers.set(|m| &mut m.stack, stack);
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.modifiers.set(|m| &mut m.title, title);
        self
    }

    pub fn format<S: Into<String>>(mut self, format: S) -> Self {
        self.modifiers.set(|m| &mut m.format, format);
        self
    }

    /// Set a property without a typed slot, e.g. `condition`
    pub fn extra<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// True for a definition with nothing in it, which would serialize as `{}`
    pub fn is_blank(&self) -> bool {
        matches!(self.source, ValueSource::Empty { type_: None })
            && self.modifiers == FieldModifiers::default()
            && self.attachments == K::Attachments::default()
            && self.extra.is_empty()
    }

    pub fn field_name(&self) -> Option<&str> {
        self.source.field_name()
    }

    /// Data column this definition reads. A nested access such as `a.b`
    /// reads column `a`, and escapes are removed.
    pub fn referenced_field(&self) -> Option<String> {
        self.field_name()
            .and_then(|name| field_path(name).into_iter().next())
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.source.data_type()
    }
}

impl<K: AcceptsDatum> ChannelDef<K> {
    pub fn datum<D: Into<DatumValue>>(datum: D) -> Self {
        Self::new(ValueSource::Datum {
            datum: datum.into(),
            type_: None,
        })
    }

    pub fn datum_expr<S: Into<String>>(expr: S) -> Self {
        Self::datum(ExprRef::new(expr))
    }
}

impl<K: AcceptsValue> ChannelDef<K> {
    pub fn value<V: Into<K::Value>>(value: V) -> Self {
        Self::new(ValueSource::Constant {
            value: value.into(),
        })
    }

    pub fn value_expr<S: Into<String>>(expr: S) -> Self {
        Self::new(ValueSource::Expression {
            value: ExprRef::new(expr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::attachments::Slot;
    use crate::spec::guide::{AxisDef, HeaderDef, LegendDef};
    use crate::spec::scale::{ScaleDef, ScaleType};
    use crate::spec::transform::bin::BinParams;
    use crate::spec::values::SizeKeyword;
    use serde_json::json;

    #[test]
    fn test_position_field_with_axis_and_scale() {
        let x = PositionDef::field("date")
            .with_type(DataType::Temporal)
            .time_unit(TimeUnit::YearMonth)
            .title("Month")
            .with_children(vec![
                AxisDef::titled("ignored").into(),
                ScaleDef::of_type(ScaleType::Utc).into(),
                LegendDef::titled("no legend slot on x").into(),
                AxisDef::titled("Date").into(),
            ]);

        assert_eq!(
            serde_json::to_value(&x).unwrap(),
            json!({
                "field": "date",
                "type": "temporal",
                "timeUnit": "yearmonth",
                "title": "Month",
                "scale": {"type": "utc"},
                "axis": {"title": "Date"}
            })
        );
    }

    #[test]
    fn test_count_aggregate_without_field() {
        let y = PositionDef::empty()
            .aggregate(AggregateOp::Count)
            .with_type(DataType::Quantitative);
        assert_eq!(
            serde_json::to_value(&y).unwrap(),
            json!({"type": "quantitative", "aggregate": "count"})
        );
    }

    #[test]
    fn test_value_and_datum_constructors() {
        assert_eq!(
            serde_json::to_value(PaintDef::value("steelblue")).unwrap(),
            json!({"value": "steelblue"})
        );
        assert_eq!(
            serde_json::to_value(PaintDef::value_expr("datum.c")).unwrap(),
            json!({"value": {"expr": "datum.c"}})
        );
        assert_eq!(
            serde_json::to_value(PositionDef::datum(10)).unwrap(),
            json!({"datum": 10.0})
        );
        assert_eq!(
            serde_json::to_value(PolarDef::value(SizeKeyword::Width)).unwrap(),
            json!({"value": "width"})
        );
        assert_eq!(
            serde_json::to_value(DashDef::value(vec![4.0, 2.0])).unwrap(),
            json!({"value": [4.0, 2.0]})
        );
        assert_eq!(
            serde_json::to_value(TextDef::datum_expr("now()")).unwrap(),
            json!({"datum": {"expr": "now()"}})
        );
    }

    #[test]
    fn test_repeat_field() {
        let x = PositionDef::repeat(RepeatDimension::Column)
            .with_type(DataType::Quantitative)
            .bin(BinParams::maxbins(20.0));
        assert_eq!(
            serde_json::to_value(&x).unwrap(),
            json!({
                "field": {"repeat": "column"},
                "type": "quantitative",
                "bin": {"maxbins": 20.0}
            })
        );
    }

    #[test]
    fn test_facet_header() {
        let row = FacetDef::field("site")
            .with_type(DataType::Nominal)
            .child(HeaderDef::titled("Site"))
            .child(ScaleDef::default());
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"field": "site", "type": "nominal", "header": {"title": "Site"}})
        );
    }

    #[test]
    fn test_deserialize_channel_def() {
        let color: PaintDef = serde_json::from_value(json!({
            "field": "origin",
            "type": "nominal",
            "legend": {"orient": "bottom"},
            "scale": {"scheme": "category10"},
            "sort": "-y"
        }))
        .unwrap();
        assert_eq!(color.field_name(), Some("origin"));
        assert_eq!(color.data_type(), Some(DataType::Nominal));
        assert_eq!(color.modifiers.sort, Some(SortDef::Encoding("-y".to_string())));
        assert!(color.attachments.legend.is_set());
        assert!(color.attachments.scale.is_set());
        assert!(color.extra.is_empty());

        let constant: PaintDef = serde_json::from_value(json!({"value": "red"})).unwrap();
        assert_eq!(constant, PaintDef::value("red"));
    }

    #[test]
    fn test_unmodeled_and_null_properties_survive() {
        let color = json!({
            "field": "a",
            "type": "nominal",
            "legend": null,
            "condition": {"param": "brush", "value": "red"}
        });
        let def: PaintDef = serde_json::from_value(color.clone()).unwrap();
        assert_eq!(def.attachments.legend, Slot::Disabled);
        assert_eq!(def.extra.keys().collect::<Vec<_>>(), vec!["condition"]);
        assert_eq!(serde_json::to_value(&def).unwrap(), color);

        let x = json!({"field": "b", "axis": null, "scale": {"zero": false}});
        let def: PositionDef = serde_json::from_value(x.clone()).unwrap();
        assert_eq!(def.attachments.axis, Slot::Disabled);
        assert_eq!(serde_json::to_value(&def).unwrap(), x);

        let typed_value = json!({"value": 3.5, "type": "quantitative"});
        let def: NumericDef = serde_json::from_value(typed_value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&def).unwrap(), typed_value);
    }

    #[test]
    fn test_blank_definition() {
        assert!(PositionDef::empty().is_blank());
        assert!(!PositionDef::empty().aggregate(AggregateOp::Count).is_blank());
        assert!(!PositionDef::empty().with_type(DataType::Nominal).is_blank());
        assert!(!PaintDef::empty()
            .extra("condition", json!({"test": "datum.x", "value": "red"}))
            .is_blank());
    }

    #[test]
    fn test_referenced_field_is_unescaped() {
        let x = PositionDef::field(r"a\.b");
        assert_eq!(x.referenced_field(), Some("a.b".to_string()));
        let nested = PositionDef::field("geo.lat");
        assert_eq!(nested.referenced_field(), Some("geo".to_string()));
        assert_eq!(PositionDef::datum(1).referenced_field(), None);
    }
}
