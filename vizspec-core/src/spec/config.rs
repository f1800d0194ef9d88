use crate::spec::guide::{AxisDef, HeaderDef, LegendDef};
use crate::spec::layout::{AutosizeDef, PaddingDef, ViewBackground};
use crate::spec::update::UpdateField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Theme defaults applied by the renderer to the whole chart.
///
/// Only valid on the root node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<AutosizeDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewBackground>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDef {
    /// Overlay `other` on `self`. Properties set in `other` win, and
    /// open-ended entries are merged key by key.
    pub fn merge(&mut self, other: ConfigDef) {
        macro_rules! take_some {
            ( $( $field:ident ),* ) => {
                $(
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
                )*
            };
        }
        take_some!(background, padding, autosize, font, view, axis, legend, header);

        match (&mut self.mark, other.mark) {
            (Some(mark), Some(other_mark)) => mark.extend(other_mark),
            (mark, other_mark @ Some(_)) => *mark = other_mark,
            _ => {}
        }
        self.extra.extend(other.extra);
    }
}

impl UpdateField for ConfigDef {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_config() {
        let mut base: ConfigDef = serde_json::from_value(json!({
            "background": "white",
            "font": "Helvetica",
            "mark": {"color": "steelblue", "opacity": 0.8},
            "range": {"category": ["#111", "#222"]}
        }))
        .unwrap();
        let theme: ConfigDef = serde_json::from_value(json!({
            "background": "#333",
            "mark": {"color": "orange"},
            "title": {"color": "white"}
        }))
        .unwrap();
        base.merge(theme);
        assert_eq!(
            serde_json::to_value(&base).unwrap(),
            json!({
                "background": "#333",
                "font": "Helvetica",
                "mark": {"color": "orange", "opacity": 0.8},
                "range": {"category": ["#111", "#222"]},
                "title": {"color": "white"}
            })
        );
    }
}
