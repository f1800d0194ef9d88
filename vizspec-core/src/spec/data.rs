use crate::spec::update::UpdateField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data source of a node. Exactly one of `values`, `url`, `name` or
/// `sequence` is normally set; the constructors enforce that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceParams>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataDef {
    /// Inline rows. A JSON array of objects in the common case.
    pub fn values(values: Value) -> Self {
        Self {
            values: Some(values),
            ..Default::default()
        }
    }

    pub fn url<S: Into<String>>(url: S) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Reference to a dataset registered at the root, or supplied at runtime
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn sequence(start: f64, stop: f64, step: Option<f64>) -> Self {
        Self {
            sequence: Some(SequenceParams {
                start,
                stop,
                step,
                as_: None,
            }),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceParams {
    pub start: f64,
    pub stop: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<String>,
}

impl SequenceParams {
    pub fn as_(&self) -> String {
        self.as_.clone().unwrap_or_else(|| "data".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormatType {
    Json,
    Csv,
    Tsv,
    Dsv,
    Topojson,
}

/// Parsing options for url data. `parse` maps field names to directives
/// such as `"number"` or `"date:'%Y'"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFormat {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<DataFormatType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataFormat {
    pub fn of_type(type_: DataFormatType) -> Self {
        Self {
            type_: Some(type_),
            ..Default::default()
        }
    }
}

impl UpdateField for DataFormat {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_constructors() {
        assert_eq!(
            serde_json::to_value(DataDef::url("data/cars.json")).unwrap(),
            json!({"url": "data/cars.json"})
        );
        assert_eq!(
            serde_json::to_value(DataDef::sequence(0.0, 10.0, Some(0.5))).unwrap(),
            json!({"sequence": {"start": 0.0, "stop": 10.0, "step": 0.5}})
        );
        let csv = DataDef::url("a.csv").with_format(DataFormat::of_type(DataFormatType::Csv));
        assert_eq!(
            serde_json::to_value(csv).unwrap(),
            json!({"url": "a.csv", "format": {"type": "csv"}})
        );
    }

    #[test]
    fn test_parse_directives() {
        let format: DataFormat =
            serde_json::from_value(json!({"parse": {"date": "date", "v": "number"}})).unwrap();
        let parse = format.parse.unwrap();
        assert_eq!(parse.keys().collect::<Vec<_>>(), vec!["date", "v"]);
    }
}
