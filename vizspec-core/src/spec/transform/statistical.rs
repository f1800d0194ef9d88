use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! statistical_transforms {
    ( $( $name:ident => $key:ident ),* ) => {
        $(
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub $key: String,

            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub groupby: Vec<String>,

            #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
            pub as_: Option<Vec<String>>,

            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }

        impl $name {
            pub fn new<S: Into<String>>($key: S) -> Self {
                Self {
                    $key: $key.into(),
                    groupby: Vec::new(),
                    as_: None,
                    extra: Default::default(),
                }
            }

            fn on_field(&self) -> Option<String> {
                self.extra.get("on").and_then(|v| v.as_str()).map(String::from)
            }

            fn fields_with_groupby(&self) -> Vec<String> {
                let mut fields = vec![self.$key.clone()];
                fields.extend(self.on_field());
                fields.extend(self.groupby.iter().cloned());
                fields
            }
        }
        )*
    };
}

statistical_transforms!(
    DensityTransformDef => density,
    LoessTransformDef => loess,
    QuantileTransformDef => quantile,
    RegressionTransformDef => regression
);

impl TransformDefTrait for DensityTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.fields_with_groupby()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_
            .clone()
            .unwrap_or_else(|| vec!["value".to_string(), "density".to_string()])
    }
}

impl TransformDefTrait for QuantileTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.fields_with_groupby()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_
            .clone()
            .unwrap_or_else(|| vec!["prob".to_string(), "value".to_string()])
    }
}

impl TransformDefTrait for LoessTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.fields_with_groupby()
    }

    // Smoothed output reuses the `on` and `loess` field names
    fn produced_fields(&self) -> Vec<String> {
        self.as_.clone().unwrap_or_else(|| {
            self.on_field()
                .into_iter()
                .chain(Some(self.loess.clone()))
                .collect()
        })
    }
}

impl TransformDefTrait for RegressionTransformDef {
    fn input_fields(&self) -> Vec<String> {
        self.fields_with_groupby()
    }

    fn produced_fields(&self) -> Vec<String> {
        self.as_.clone().unwrap_or_else(|| {
            self.on_field()
                .into_iter()
                .chain(Some(self.regression.clone()))
                .collect()
        })
    }
}
