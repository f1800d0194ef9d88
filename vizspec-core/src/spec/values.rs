use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Data type of a field, as used by the renderer to pick scales and guides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Quantitative,
    Ordinal,
    Nominal,
    Temporal,
    Geojson,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprRef {
    pub expr: String,
}

impl ExprRef {
    pub fn new<S: Into<String>>(expr: S) -> Self {
        Self { expr: expr.into() }
    }
}

/// Axis along which a repeated spec is instantiated. Also names the
/// placeholder a field reference uses to pick up the current repeated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatDimension {
    Row,
    Column,
    Layer,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepeatRef {
    pub repeat: RepeatDimension,
}

/// A value resolved against scale domains rather than against data rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatumValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Expr(ExprRef),
    /// A date-time object such as `{"year": 2000, "month": 1}`
    DateTime(Map<String, Value>),
}

impl From<bool> for DatumValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for DatumValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for DatumValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for DatumValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DatumValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<ExprRef> for DatumValue {
    fn from(v: ExprRef) -> Self {
        Self::Expr(v)
    }
}

/// How a channel obtains its value.
///
/// Exactly one source is present per channel definition. The literal type
/// `V` is fixed by the channel, so a channel that takes no constants uses
/// [`NoValue`] and its `Constant` variant cannot be built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueSource<V> {
    Expression {
        value: ExprRef,
    },
    Constant {
        value: V,
    },
    Repeat {
        field: RepeatRef,

        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_: Option<DataType>,
    },
    Field {
        field: String,

        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_: Option<DataType>,
    },
    Datum {
        datum: DatumValue,

        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_: Option<DataType>,
    },
    /// No value source, e.g. a bare `count` aggregate
    Empty {
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        type_: Option<DataType>,
    },
}

// The source is picked by key rather than by trying each shape in turn, so a
// `value`, `field` or `datum` that does not fit the channel is an error
// instead of a silently empty definition.
impl<'de, V: DeserializeOwned> Deserialize<'de> for ValueSource<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = Map::<String, Value>::deserialize(deserializer)?;

        if let Some(value) = entries.remove("value") {
            if let Ok(expr) = serde_json::from_value::<ExprRef>(value.clone()) {
                return Ok(ValueSource::Expression { value: expr });
            }
            return serde_json::from_value(value.clone())
                .map(|value| ValueSource::Constant { value })
                .map_err(|err| D::Error::custom(format!("invalid channel value {value}: {err}")));
        }

        let type_ = entries
            .remove("type")
            .map(serde_json::from_value::<DataType>)
            .transpose()
            .map_err(D::Error::custom)?;

        if let Some(field) = entries.remove("field") {
            return match field {
                Value::String(field) => Ok(ValueSource::Field { field, type_ }),
                other => serde_json::from_value(other.clone())
                    .map(|field| ValueSource::Repeat { field, type_ })
                    .map_err(|err| D::Error::custom(format!("invalid field {other}: {err}"))),
            };
        }

        if let Some(datum) = entries.remove("datum") {
            return serde_json::from_value(datum.clone())
                .map(|datum| ValueSource::Datum { datum, type_ })
                .map_err(|err| D::Error::custom(format!("invalid datum {datum}: {err}")));
        }

        Ok(ValueSource::Empty { type_ })
    }
}

impl<V> Default for ValueSource<V> {
    fn default() -> Self {
        Self::Empty { type_: None }
    }
}

impl<V> ValueSource<V> {
    pub fn field_name(&self) -> Option<&str> {
        match self {
            ValueSource::Field { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            ValueSource::Repeat { type_, .. }
            | ValueSource::Field { type_, .. }
            | ValueSource::Datum { type_, .. }
            | ValueSource::Empty { type_ } => *type_,
            ValueSource::Expression { .. } | ValueSource::Constant { .. } => None,
        }
    }

    /// Set the data type. Constants and expressions carry no type, so this
    /// is a no-op for them.
    pub fn set_data_type(&mut self, data_type: DataType) {
        match self {
            ValueSource::Repeat { type_, .. }
            | ValueSource::Field { type_, .. }
            | ValueSource::Datum { type_, .. }
            | ValueSource::Empty { type_ } => *type_ = Some(data_type),
            ValueSource::Expression { .. } | ValueSource::Constant { .. } => {}
        }
    }

    /// Document keys this source serializes to
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            ValueSource::Expression { .. } | ValueSource::Constant { .. } => &["value"],
            ValueSource::Repeat { .. } | ValueSource::Field { .. } => &["field", "type"],
            ValueSource::Datum { .. } => &["datum", "type"],
            ValueSource::Empty { .. } => &["type"],
        }
    }

    pub fn is_field_like(&self) -> bool {
        matches!(
            self,
            ValueSource::Field { .. } | ValueSource::Repeat { .. } | ValueSource::Empty { .. }
        )
    }
}

/// Literal type of channels that never accept a constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoValue {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKeyword {
    Width,
    Height,
}

/// Literal for polar channels, which may also be sized relative to the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Keyword(SizeKeyword),
    Number(f64),
}

impl From<f64> for SizeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<SizeKeyword> for SizeValue {
    fn from(v: SizeKeyword) -> Self {
        Self::Keyword(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaintValue {
    Color(String),
    Null,
    /// Linear or radial gradient object
    Gradient(Map<String, Value>),
}

impl From<&str> for PaintValue {
    fn from(v: &str) -> Self {
        Self::Color(v.to_string())
    }
}

impl From<String> for PaintValue {
    fn from(v: String) -> Self {
        Self::Color(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolShape {
    Circle,
    Square,
    Cross,
    Diamond,
    TriangleUp,
    TriangleDown,
    TriangleRight,
    TriangleLeft,
    Triangle,
    Stroke,
    Arrow,
    Wedge,
}

/// A named symbol, or an SVG path string for a custom shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeValue {
    Symbol(SymbolShape),
    Path(String),
}

impl From<SymbolShape> for ShapeValue {
    fn from(v: SymbolShape) -> Self {
        Self::Symbol(v)
    }
}

impl From<&str> for ShapeValue {
    fn from(v: &str) -> Self {
        Self::Path(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Lines(Vec<String>),
}

impl From<&str> for TextValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for TextValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for TextValue {
    fn from(v: Vec<String>) -> Self {
        Self::Lines(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TooltipValue {
    Text(String),
    Null,
}

impl From<&str> for TooltipValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for TooltipValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Definition of a channel that may hold one definition or several
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Multiplexed<D> {
    List(Vec<D>),
    Single(D),
}

impl<D> Multiplexed<D> {
    /// Canonical representation of a list of definitions: nothing for an
    /// empty list, the bare definition for a single one.
    pub fn canonical(mut defs: Vec<D>) -> Option<Self> {
        match defs.len() {
            0 => None,
            1 => defs.pop().map(Multiplexed::Single),
            _ => Some(Multiplexed::List(defs)),
        }
    }

    pub fn into_vec(self) -> Vec<D> {
        match self {
            Multiplexed::List(defs) => defs,
            Multiplexed::Single(def) => vec![def],
        }
    }

    pub fn as_slice(&self) -> &[D] {
        match self {
            Multiplexed::List(defs) => defs.as_slice(),
            Multiplexed::Single(def) => std::slice::from_ref(def),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Multiplexed::List(_))
    }
}

impl<D> From<D> for Multiplexed<D> {
    fn from(def: D) -> Self {
        Multiplexed::Single(def)
    }
}

impl<D> From<Vec<D>> for Multiplexed<D> {
    fn from(defs: Vec<D>) -> Self {
        Multiplexed::List(defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_source_serialization() {
        let field: ValueSource<f64> = ValueSource::Field {
            field: "price".to_string(),
            type_: Some(DataType::Quantitative),
        };
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({"field": "price", "type": "quantitative"})
        );

        let repeat: ValueSource<f64> = ValueSource::Repeat {
            field: RepeatRef {
                repeat: RepeatDimension::Column,
            },
            type_: None,
        };
        assert_eq!(
            serde_json::to_value(&repeat).unwrap(),
            json!({"field": {"repeat": "column"}})
        );

        let expr: ValueSource<f64> = ValueSource::Expression {
            value: ExprRef::new("width / 2"),
        };
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({"value": {"expr": "width / 2"}})
        );
    }

    #[test]
    fn test_value_source_deserialization_picks_variant() {
        let src: ValueSource<PaintValue> =
            serde_json::from_value(json!({"value": {"expr": "c"}})).unwrap();
        assert!(matches!(src, ValueSource::Expression { .. }));

        let src: ValueSource<PaintValue> = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(
            src,
            ValueSource::Constant {
                value: PaintValue::Null
            }
        );

        let src: ValueSource<f64> = serde_json::from_value(json!({"datum": 3})).unwrap();
        assert_eq!(
            src,
            ValueSource::Datum {
                datum: DatumValue::Number(3.0),
                type_: None
            }
        );

        let src: ValueSource<NoValue> =
            serde_json::from_value(json!({"type": "quantitative"})).unwrap();
        assert_eq!(
            src,
            ValueSource::Empty {
                type_: Some(DataType::Quantitative)
            }
        );
    }

    #[test]
    fn test_mismatched_source_is_rejected() {
        let gradient = json!({"gradient": "linear", "stops": [{"offset": 0, "color": "red"}]});
        let src: ValueSource<PaintValue> =
            serde_json::from_value(json!({"value": gradient.clone()})).unwrap();
        assert_eq!(
            serde_json::to_value(&src).unwrap(),
            json!({"value": gradient})
        );

        assert!(serde_json::from_value::<ValueSource<f64>>(json!({"value": "wide"})).is_err());
        assert!(serde_json::from_value::<ValueSource<NoValue>>(json!({"value": 1})).is_err());
        assert!(serde_json::from_value::<ValueSource<f64>>(json!({"field": 3})).is_err());
        assert!(
            serde_json::from_value::<ValueSource<f64>>(json!({"datum": [1, 2]})).is_err()
        );

        let src: ValueSource<f64> =
            serde_json::from_value(json!({"datum": {"year": 2000}})).unwrap();
        assert_eq!(src.keys(), &["datum", "type"]);
    }

    #[test]
    fn test_set_data_type_ignores_constants() {
        let mut src: ValueSource<f64> = ValueSource::Constant { value: 1.0 };
        src.set_data_type(DataType::Nominal);
        assert_eq!(src.data_type(), None);

        let mut src: ValueSource<f64> = ValueSource::Field {
            field: "a".to_string(),
            type_: None,
        };
        src.set_data_type(DataType::Nominal);
        assert_eq!(src.data_type(), Some(DataType::Nominal));
    }

    #[test]
    fn test_multiplexed_canonical() {
        assert_eq!(Multiplexed::<u8>::canonical(vec![]), None);
        assert_eq!(
            Multiplexed::canonical(vec![1u8]),
            Some(Multiplexed::Single(1))
        );
        assert_eq!(
            Multiplexed::canonical(vec![1u8, 2]),
            Some(Multiplexed::List(vec![1, 2]))
        );
    }

    #[test]
    fn test_symbol_shape_names() {
        assert_eq!(
            serde_json::to_value(SymbolShape::TriangleUp).unwrap(),
            json!("triangle-up")
        );
        let shape: ShapeValue = serde_json::from_value(json!("M0,0L1,1")).unwrap();
        assert_eq!(shape, ShapeValue::Path("M0,0L1,1".to_string()));
    }
}
