use crate::spec::update::UpdateField;
use crate::spec::values::TextValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleDef {
    Text(TextValue),
    Params(TitleParams),
}

impl From<&str> for TitleDef {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for TitleDef {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

impl From<TitleParams> for TitleDef {
    fn from(v: TitleParams) -> Self {
        Self::Params(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleParams {
    pub text: TextValue,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<TextValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<TitleAnchor>,

    #[serde(rename = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TitleParams {
    pub fn new<T: Into<TextValue>>(text: T) -> Self {
        Self {
            text: text.into(),
            subtitle: None,
            anchor: None,
            font_size: None,
            extra: Default::default(),
        }
    }

    pub fn with_subtitle<T: Into<TextValue>>(mut self, subtitle: T) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

impl UpdateField for TitleParams {}
