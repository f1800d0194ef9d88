use crate::diagnostics::Diagnostics;
use crate::spec::channel::{
    ChannelDef, ChannelKind, DashDef, FacetDef, FieldDef, GeoDef, NumericDef, OffsetDef, PaintDef,
    PolarDef, PolarSecondaryDef, PositionDef, SecondaryDef, ShapeDef, StringDef, TextDef,
    TooltipDef,
};
use crate::spec::values::Multiplexed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use vizspec_common::error::{Result, VizSpecError};

/// Encoding channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    X,
    Y,
    X2,
    Y2,
    XError,
    XError2,
    YError,
    YError2,
    XOffset,
    YOffset,
    Theta,
    Theta2,
    Radius,
    Radius2,
    Longitude,
    Latitude,
    Longitude2,
    Latitude2,
    Color,
    Fill,
    Stroke,
    Opacity,
    FillOpacity,
    StrokeOpacity,
    StrokeWidth,
    StrokeDash,
    Size,
    Angle,
    Shape,
    Text,
    Tooltip,
    Href,
    Url,
    Description,
    Detail,
    Key,
    Order,
    Row,
    Column,
    Facet,
}

impl Channel {
    /// All channels, in the order they appear in a serialized encoding
    pub const ALL: [Channel; 40] = [
        Channel::X,
        Channel::Y,
        Channel::X2,
        Channel::Y2,
        Channel::XError,
        Channel::XError2,
        Channel::YError,
        Channel::YError2,
        Channel::XOffset,
        Channel::YOffset,
        Channel::Theta,
        Channel::Theta2,
        Channel::Radius,
        Channel::Radius2,
        Channel::Longitude,
        Channel::Latitude,
        Channel::Longitude2,
        Channel::Latitude2,
        Channel::Color,
        Channel::Fill,
        Channel::Stroke,
        Channel::Opacity,
        Channel::FillOpacity,
        Channel::StrokeOpacity,
        Channel::StrokeWidth,
        Channel::StrokeDash,
        Channel::Size,
        Channel::Angle,
        Channel::Shape,
        Channel::Text,
        Channel::Tooltip,
        Channel::Href,
        Channel::Url,
        Channel::Description,
        Channel::Detail,
        Channel::Key,
        Channel::Order,
        Channel::Row,
        Channel::Column,
        Channel::Facet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::X2 => "x2",
            Channel::Y2 => "y2",
            Channel::XError => "xError",
            Channel::XError2 => "xError2",
            Channel::YError => "yError",
            Channel::YError2 => "yError2",
            Channel::XOffset => "xOffset",
            Channel::YOffset => "yOffset",
            Channel::Theta => "theta",
            Channel::Theta2 => "theta2",
            Channel::Radius => "radius",
            Channel::Radius2 => "radius2",
            Channel::Longitude => "longitude",
            Channel::Latitude => "latitude",
            Channel::Longitude2 => "longitude2",
            Channel::Latitude2 => "latitude2",
            Channel::Color => "color",
            Channel::Fill => "fill",
            Channel::Stroke => "stroke",
            Channel::Opacity => "opacity",
            Channel::FillOpacity => "fillOpacity",
            Channel::StrokeOpacity => "strokeOpacity",
            Channel::StrokeWidth => "strokeWidth",
            Channel::StrokeDash => "strokeDash",
            Channel::Size => "size",
            Channel::Angle => "angle",
            Channel::Shape => "shape",
            Channel::Text => "text",
            Channel::Tooltip => "tooltip",
            Channel::Href => "href",
            Channel::Url => "url",
            Channel::Description => "description",
            Channel::Detail => "detail",
            Channel::Key => "key",
            Channel::Order => "order",
            Channel::Row => "row",
            Channel::Column => "column",
            Channel::Facet => "facet",
        }
    }

    /// Channels that accumulate field lists instead of being replaced
    pub fn is_multiplex(&self) -> bool {
        matches!(self, Channel::Detail | Channel::Order | Channel::Tooltip)
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    static ref CHANNELS_BY_NAME: HashMap<&'static str, Channel> =
        Channel::ALL.iter().map(|c| (c.as_str(), *c)).collect();
}

impl FromStr for Channel {
    type Err = VizSpecError;

    fn from_str(s: &str) -> Result<Self> {
        CHANNELS_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| VizSpecError::specification(format!("Unknown encoding channel: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderValue {
    pub value: f64,
}

/// The `order` channel: either a constant sort value or one or more fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderDef {
    Value(OrderValue),
    Fields(Multiplexed<FieldDef>),
}

impl OrderDef {
    pub fn value(value: f64) -> Self {
        Self::Value(OrderValue { value })
    }
}

impl From<FieldDef> for OrderDef {
    fn from(v: FieldDef) -> Self {
        Self::Fields(Multiplexed::Single(v))
    }
}

impl From<Vec<FieldDef>> for OrderDef {
    fn from(v: Vec<FieldDef>) -> Self {
        Self::Fields(Multiplexed::List(v))
    }
}

/// A channel identifier paired with a definition of the matching type
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingChannel {
    X(PositionDef),
    Y(PositionDef),
    X2(SecondaryDef),
    Y2(SecondaryDef),
    XError(SecondaryDef),
    XError2(SecondaryDef),
    YError(SecondaryDef),
    YError2(SecondaryDef),
    XOffset(OffsetDef),
    YOffset(OffsetDef),
    Theta(PolarDef),
    Theta2(PolarSecondaryDef),
    Radius(PolarDef),
    Radius2(PolarSecondaryDef),
    Longitude(GeoDef),
    Latitude(GeoDef),
    Longitude2(GeoDef),
    Latitude2(GeoDef),
    Color(PaintDef),
    Fill(PaintDef),
    Stroke(PaintDef),
    Opacity(NumericDef),
    FillOpacity(NumericDef),
    StrokeOpacity(NumericDef),
    StrokeWidth(NumericDef),
    StrokeDash(DashDef),
    Size(NumericDef),
    Angle(NumericDef),
    Shape(ShapeDef),
    Text(TextDef),
    Tooltip(Multiplexed<TooltipDef>),
    Href(StringDef),
    Url(StringDef),
    Description(StringDef),
    Detail(Multiplexed<FieldDef>),
    Key(FieldDef),
    Order(OrderDef),
    Row(FacetDef),
    Column(FacetDef),
    Facet(FacetDef),
}

impl EncodingChannel {
    pub fn channel(&self) -> Channel {
        match self {
            EncodingChannel::X(_) => Channel::X,
            EncodingChannel::Y(_) => Channel::Y,
            EncodingChannel::X2(_) => Channel::X2,
            EncodingChannel::Y2(_) => Channel::Y2,
            EncodingChannel::XError(_) => Channel::XError,
            EncodingChannel::XError2(_) => Channel::XError2,
            EncodingChannel::YError(_) => Channel::YError,
            EncodingChannel::YError2(_) => Channel::YError2,
            EncodingChannel::XOffset(_) => Channel::XOffset,
            EncodingChannel::YOffset(_) => Channel::YOffset,
            EncodingChannel::Theta(_) => Channel::Theta,
            EncodingChannel::Theta2(_) => Channel::Theta2,
            EncodingChannel::Radius(_) => Channel::Radius,
            EncodingChannel::Radius2(_) => Channel::Radius2,
            EncodingChannel::Longitude(_) => Channel::Longitude,
            EncodingChannel::Latitude(_) => Channel::Latitude,
            EncodingChannel::Longitude2(_) => Channel::Longitude2,
            EncodingChannel::Latitude2(_) => Channel::Latitude2,
            EncodingChannel::Color(_) => Channel::Color,
            EncodingChannel::Fill(_) => Channel::Fill,
            EncodingChannel::Stroke(_) => Channel::Stroke,
            EncodingChannel::Opacity(_) => Channel::Opacity,
            EncodingChannel::FillOpacity(_) => Channel::FillOpacity,
            EncodingChannel::StrokeOpacity(_) => Channel::StrokeOpacity,
            EncodingChannel::StrokeWidth(_) => Channel::StrokeWidth,
            EncodingChannel::StrokeDash(_) => Channel::StrokeDash,
            EncodingChannel::Size(_) => Channel::Size,
            EncodingChannel::Angle(_) => Channel::Angle,
            EncodingChannel::Shape(_) => Channel::Shape,
            EncodingChannel::Text(_) => Channel::Text,
            EncodingChannel::Tooltip(_) => Channel::Tooltip,
            EncodingChannel::Href(_) => Channel::Href,
            EncodingChannel::Url(_) => Channel::Url,
            EncodingChannel::Description(_) => Channel::Description,
            EncodingChannel::Detail(_) => Channel::Detail,
            EncodingChannel::Key(_) => Channel::Key,
            EncodingChannel::Order(_) => Channel::Order,
            EncodingChannel::Row(_) => Channel::Row,
            EncodingChannel::Column(_) => Channel::Column,
            EncodingChannel::Facet(_) => Channel::Facet,
        }
    }
}

/// Mapping from channel to definition. Fields are declared in the order
/// the renderer's grammar lists them, which is also the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_error: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_error2: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_error: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_error2: Option<SecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<OffsetDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<OffsetDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<PolarDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta2: Option<PolarSecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<PolarDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius2: Option<PolarSecondaryDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<GeoDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<GeoDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude2: Option<GeoDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude2: Option<GeoDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PaintDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<PaintDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<PaintDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dash: Option<DashDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<NumericDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Multiplexed<TooltipDef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<StringDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<StringDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StringDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Multiplexed<FieldDef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<FieldDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<FacetDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<FacetDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<FacetDef>,
}

/// Store `def` in `slot`, noting the overwrite if the slot was occupied
/// Definitions that carry nothing and would serialize as `{}`
trait Blank {
    fn is_blank(&self) -> bool;
}

impl<K: ChannelKind> Blank for ChannelDef<K> {
    fn is_blank(&self) -> bool {
        ChannelDef::is_blank(self)
    }
}

impl<D: Blank> Blank for Multiplexed<D> {
    fn is_blank(&self) -> bool {
        self.as_slice().iter().all(Blank::is_blank)
    }
}

impl Blank for OrderDef {
    fn is_blank(&self) -> bool {
        match self {
            OrderDef::Value(_) => false,
            OrderDef::Fields(defs) => defs.is_blank(),
        }
    }
}

fn replace<D: Blank>(
    slot: &mut Option<D>,
    def: D,
    channel: Channel,
    diagnostics: &mut Diagnostics,
) {
    if def.is_blank() {
        debug!("Ignoring blank definition for channel `{channel}`");
        return;
    }
    if slot.replace(def).is_some() {
        diagnostics.replaced_encoding(channel);
    }
}

/// A single definition replaces, a list extends whatever is already there
fn merge_multiplexed<D: Blank>(
    slot: &mut Option<Multiplexed<D>>,
    incoming: Multiplexed<D>,
    channel: Channel,
    diagnostics: &mut Diagnostics,
) {
    match incoming {
        Multiplexed::Single(def) => replace(slot, Multiplexed::Single(def), channel, diagnostics),
        Multiplexed::List(defs) => {
            let mut merged = slot.take().map(Multiplexed::into_vec).unwrap_or_default();
            merged.extend(defs.into_iter().filter(|def| !def.is_blank()));
            *slot = Multiplexed::canonical(merged);
        }
    }
}

fn merge_order(slot: &mut Option<OrderDef>, incoming: OrderDef, diagnostics: &mut Diagnostics) {
    match incoming {
        OrderDef::Fields(Multiplexed::List(defs)) if !defs.iter().all(Blank::is_blank) => {
            let mut merged = match slot.take() {
                Some(OrderDef::Fields(existing)) => existing.into_vec(),
                Some(OrderDef::Value(_)) => {
                    diagnostics.replaced_encoding(Channel::Order);
                    Vec::new()
                }
                None => Vec::new(),
            };
            merged.extend(defs.into_iter().filter(|def| !def.is_blank()));
            *slot = Multiplexed::canonical(merged).map(OrderDef::Fields);
        }
        other => replace(slot, other, Channel::Order, diagnostics),
    }
}

macro_rules! encoding_slot {
    ($self:ident, $channel:expr) => {
        match $channel {
            Channel::X => $self.x.is_some(),
            Channel::Y => $self.y.is_some(),
            Channel::X2 => $self.x2.is_some(),
            Channel::Y2 => $self.y2.is_some(),
            Channel::XError => $self.x_error.is_some(),
            Channel::XError2 => $self.x_error2.is_some(),
            Channel::YError => $self.y_error.is_some(),
            Channel::YError2 => $self.y_error2.is_some(),
            Channel::XOffset => $self.x_offset.is_some(),
            Channel::YOffset => $self.y_offset.is_some(),
            Channel::Theta => $self.theta.is_some(),
            Channel::Theta2 => $self.theta2.is_some(),
            Channel::Radius => $self.radius.is_some(),
            Channel::Radius2 => $self.radius2.is_some(),
            Channel::Longitude => $self.longitude.is_some(),
            Channel::Latitude => $self.latitude.is_some(),
            Channel::Longitude2 => $self.longitude2.is_some(),
            Channel::Latitude2 => $self.latitude2.is_some(),
            Channel::Color => $self.color.is_some(),
            Channel::Fill => $self.fill.is_some(),
            Channel::Stroke => $self.stroke.is_some(),
            Channel::Opacity => $self.opacity.is_some(),
            Channel::FillOpacity => $self.fill_opacity.is_some(),
            Channel::StrokeOpacity => $self.stroke_opacity.is_some(),
            Channel::StrokeWidth => $self.stroke_width.is_some(),
            Channel::StrokeDash => $self.stroke_dash.is_some(),
            Channel::Size => $self.size.is_some(),
            Channel::Angle => $self.angle.is_some(),
            Channel::Shape => $self.shape.is_some(),
            Channel::Text => $self.text.is_some(),
            Channel::Tooltip => $self.tooltip.is_some(),
            Channel::Href => $self.href.is_some(),
            Channel::Url => $self.url.is_some(),
            Channel::Description => $self.description.is_some(),
            Channel::Detail => $self.detail.is_some(),
            Channel::Key => $self.key.is_some(),
            Channel::Order => $self.order.is_some(),
            Channel::Row => $self.row.is_some(),
            Channel::Column => $self.column.is_some(),
            Channel::Facet => $self.facet.is_some(),
        }
    };
}

impl EncodingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel definition.
    ///
    /// Single-valued channels are replaced. `detail`, `tooltip` and `order`
    /// concatenate field lists onto the existing entry, while a single
    /// definition (or an order value) replaces it. Every replacement of an
    /// occupied channel is reported to `diagnostics`.
    pub fn attach(&mut self, encoding: EncodingChannel, diagnostics: &mut Diagnostics) {
        let channel = encoding.channel();
        match encoding {
            EncodingChannel::X(def) => replace(&mut self.x, def, channel, diagnostics),
            EncodingChannel::Y(def) => replace(&mut self.y, def, channel, diagnostics),
            EncodingChannel::X2(def) => replace(&mut self.x2, def, channel, diagnostics),
            EncodingChannel::Y2(def) => replace(&mut self.y2, def, channel, diagnostics),
            EncodingChannel::XError(def) => replace(&mut self.x_error, def, channel, diagnostics),
            EncodingChannel::XError2(def) => {
                replace(&mut self.x_error2, def, channel, diagnostics)
            }
            EncodingChannel::YError(def) => replace(&mut self.y_error, def, channel, diagnostics),
            EncodingChannel::YError2(def) => {
                replace(&mut self.y_error2, def, channel, diagnostics)
            }
            EncodingChannel::XOffset(def) => {
                replace(&mut self.x_offset, def, channel, diagnostics)
            }
            EncodingChannel::YOffset(def) => {
                replace(&mut self.y_offset, def, channel, diagnostics)
            }
            EncodingChannel::Theta(def) => replace(&mut self.theta, def, channel, diagnostics),
            EncodingChannel::Theta2(def) => replace(&mut self.theta2, def, channel, diagnostics),
            EncodingChannel::Radius(def) => replace(&mut self.radius, def, channel, diagnostics),
            EncodingChannel::Radius2(def) => {
                replace(&mut self.radius2, def, channel, diagnostics)
            }
            EncodingChannel::Longitude(def) => {
                replace(&mut self.longitude, def, channel, diagnostics)
            }
            EncodingChannel::Latitude(def) => {
                replace(&mut self.latitude, def, channel, diagnostics)
            }
            EncodingChannel::Longitude2(def) => {
                replace(&mut self.longitude2, def, channel, diagnostics)
            }
            EncodingChannel::Latitude2(def) => {
                replace(&mut self.latitude2, def, channel, diagnostics)
            }
            EncodingChannel::Color(def) => replace(&mut self.color, def, channel, diagnostics),
            EncodingChannel::Fill(def) => replace(&mut self.fill, def, channel, diagnostics),
            EncodingChannel::Stroke(def) => replace(&mut self.stroke, def, channel, diagnostics),
            EncodingChannel::Opacity(def) => {
                replace(&mut self.opacity, def, channel, diagnostics)
            }
            EncodingChannel::FillOpacity(def) => {
                replace(&mut self.fill_opacity, def, channel, diagnostics)
            }
            EncodingChannel::StrokeOpacity(def) => {
                replace(&mut self.stroke_opacity, def, channel, diagnostics)
            }
            EncodingChannel::StrokeWidth(def) => {
                replace(&mut self.stroke_width, def, channel, diagnostics)
            }
            EncodingChannel::StrokeDash(def) => {
                replace(&mut self.stroke_dash, def, channel, diagnostics)
            }
            EncodingChannel::Size(def) => replace(&mut self.size, def, channel, diagnostics),
            EncodingChannel::Angle(def) => replace(&mut self.angle, def, channel, diagnostics),
            EncodingChannel::Shape(def) => replace(&mut self.shape, def, channel, diagnostics),
            EncodingChannel::Text(def) => replace(&mut self.text, def, channel, diagnostics),
            EncodingChannel::Tooltip(def) => {
                merge_multiplexed(&mut self.tooltip, def, channel, diagnostics)
            }
            EncodingChannel::Href(def) => replace(&mut self.href, def, channel, diagnostics),
            EncodingChannel::Url(def) => replace(&mut self.url, def, channel, diagnostics),
            EncodingChannel::Description(def) => {
                replace(&mut self.description, def, channel, diagnostics)
            }
            EncodingChannel::Detail(def) => {
                merge_multiplexed(&mut self.detail, def, channel, diagnostics)
            }
            EncodingChannel::Key(def) => replace(&mut self.key, def, channel, diagnostics),
            EncodingChannel::Order(def) => merge_order(&mut self.order, def, diagnostics),
            EncodingChannel::Row(def) => replace(&mut self.row, def, channel, diagnostics),
            EncodingChannel::Column(def) => replace(&mut self.column, def, channel, diagnostics),
            EncodingChannel::Facet(def) => replace(&mut self.facet, def, channel, diagnostics),
        }
    }

    pub fn contains(&self, channel: Channel) -> bool {
        encoding_slot!(self, channel)
    }

    /// Occupied channels, in serialization order
    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .iter()
            .copied()
            .filter(|c| self.contains(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.channels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data fields referenced by any channel, in channel order
    pub fn referenced_fields(&self) -> Vec<String> {
        macro_rules! collect_fields {
            ( $self:ident, $fields:ident; single: $( $single:ident ),*; multi: $( $multi:ident ),* ) => {
                $(
                if let Some(def) = &$self.$single {
                    $fields.extend(def.referenced_field());
                }
                )*
                $(
                if let Some(defs) = &$self.$multi {
                    $fields.extend(defs.as_slice().iter().filter_map(|d| d.referenced_field()));
                }
                )*
            };
        }

        let mut fields = Vec::new();
        collect_fields!(
            self, fields;
            single: x, y, x2, y2, x_error, x_error2, y_error, y_error2, x_offset, y_offset,
                theta, theta2, radius, radius2, longitude, latitude, longitude2, latitude2,
                color, fill, stroke, opacity, fill_opacity, stroke_opacity, stroke_width,
                stroke_dash, size, angle, shape, text;
            multi: tooltip
        );
        collect_fields!(
            self, fields;
            single: href, url, description;
            multi: detail
        );
        collect_fields!(self, fields; single: key; multi: );
        if let Some(OrderDef::Fields(defs)) = &self.order {
            fields.extend(defs.as_slice().iter().filter_map(|d| d.referenced_field()));
        }
        collect_fields!(self, fields; single: row, column, facet; multi: );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::spec::channel::PaintDef;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<FieldDef> {
        names.iter().map(|n| FieldDef::field(*n)).collect()
    }

    #[test]
    fn test_channel_names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_str(channel.as_str()).unwrap(), channel);
            assert_eq!(
                serde_json::to_value(channel).unwrap(),
                json!(channel.as_str())
            );
        }
        assert!(Channel::from_str("colour").is_err());
    }

    #[test]
    fn test_single_valued_replacement_warns() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Color(PaintDef::value("red")),
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
        encoding.attach(
            EncodingChannel::Color(PaintDef::field("origin")),
            &mut diagnostics,
        );
        assert_eq!(encoding.color, Some(PaintDef::field("origin")));
        assert_eq!(
            diagnostics.kinds(),
            vec![DiagnosticKind::ReplacedEncoding {
                channel: Channel::Color
            }]
        );
    }

    #[test]
    fn test_detail_list_merge_and_collapse() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Detail(fields(&["a"]).into()),
            &mut diagnostics,
        );
        assert_eq!(
            encoding.detail,
            Some(Multiplexed::Single(FieldDef::field("a")))
        );
        encoding.attach(
            EncodingChannel::Detail(fields(&["b"]).into()),
            &mut diagnostics,
        );
        assert_eq!(encoding.detail, Some(Multiplexed::List(fields(&["a", "b"]))));
        assert!(diagnostics.is_empty());

        encoding.attach(
            EncodingChannel::Detail(FieldDef::field("c").into()),
            &mut diagnostics,
        );
        assert_eq!(
            encoding.detail,
            Some(Multiplexed::Single(FieldDef::field("c")))
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_list_leaves_channel_unset() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Detail(Multiplexed::List(vec![])),
            &mut diagnostics,
        );
        assert!(!encoding.contains(Channel::Detail));
        assert!(encoding.is_empty());
    }

    #[test]
    fn test_order_value_always_replaces() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Order(fields(&["a", "b"]).into()),
            &mut diagnostics,
        );
        encoding.attach(
            EncodingChannel::Order(OrderDef::value(1.0)),
            &mut diagnostics,
        );
        assert_eq!(encoding.order, Some(OrderDef::value(1.0)));
        assert_eq!(diagnostics.len(), 1);

        // A field list replaces a sort value rather than merging with it
        encoding.attach(
            EncodingChannel::Order(fields(&["c"]).into()),
            &mut diagnostics,
        );
        assert_eq!(encoding.order, Some(FieldDef::field("c").into()));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_serialized_key_order() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Tooltip(TooltipDef::field("t").into()),
            &mut diagnostics,
        );
        encoding.attach(
            EncodingChannel::Color(PaintDef::field("c")),
            &mut diagnostics,
        );
        encoding.attach(
            EncodingChannel::Y(PositionDef::field("b")),
            &mut diagnostics,
        );
        encoding.attach(
            EncodingChannel::X(PositionDef::field("a")),
            &mut diagnostics,
        );
        let serialized = serde_json::to_string(&encoding).unwrap();
        assert_eq!(
            serialized,
            r#"{"x":{"field":"a"},"y":{"field":"b"},"color":{"field":"c"},"tooltip":{"field":"t"}}"#
        );
        assert_eq!(
            encoding.channels(),
            vec![Channel::X, Channel::Y, Channel::Color, Channel::Tooltip]
        );
        assert_eq!(encoding.referenced_fields(), vec!["a", "b", "c", "t"]);
    }

    #[test]
    fn test_blank_definitions_are_ignored() {
        let mut diagnostics = Diagnostics::default();
        let mut encoding = EncodingMap::new();
        encoding.attach(EncodingChannel::Color(PaintDef::empty()), &mut diagnostics);
        assert!(encoding.is_empty());

        encoding.attach(
            EncodingChannel::Color(PaintDef::field("origin")),
            &mut diagnostics,
        );
        encoding.attach(EncodingChannel::Color(PaintDef::empty()), &mut diagnostics);
        encoding.attach(
            EncodingChannel::Detail(vec![FieldDef::empty(), FieldDef::field("a")].into()),
            &mut diagnostics,
        );
        encoding.attach(
            EncodingChannel::Order(vec![FieldDef::empty()].into()),
            &mut diagnostics,
        );

        assert_eq!(encoding.color, Some(PaintDef::field("origin")));
        assert_eq!(
            encoding.detail,
            Some(Multiplexed::Single(FieldDef::field("a")))
        );
        assert_eq!(encoding.order, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_deserialize_encoding() {
        let encoding: EncodingMap = serde_json::from_value(json!({
            "x": {"field": "a", "type": "quantitative"},
            "xOffset": {"field": "g"},
            "tooltip": [{"field": "a"}, {"field": "b"}],
            "order": {"value": 0}
        }))
        .unwrap();
        assert_eq!(encoding.len(), 4);
        assert_eq!(encoding.tooltip.as_ref().map(|t| t.len()), Some(2));
        assert_eq!(encoding.order, Some(OrderDef::value(0.0)));
    }
}
