pub mod aggregate;
pub mod bin;
pub mod extent;
pub mod filter;
pub mod flatten;
pub mod fold;
pub mod formula;
pub mod impute;
pub mod joinaggregate;
pub mod lookup;
pub mod pivot;
pub mod sample;
pub mod stack;
pub mod statistical;
pub mod timeunit;
pub mod window;

use crate::spec::transform::aggregate::AggregateTransformDef;
use crate::spec::transform::bin::BinTransformDef;
use crate::spec::transform::extent::ExtentTransformDef;
use crate::spec::transform::filter::FilterTransformDef;
use crate::spec::transform::flatten::FlattenTransformDef;
use crate::spec::transform::fold::FoldTransformDef;
use crate::spec::transform::formula::CalculateTransformDef;
use crate::spec::transform::impute::ImputeTransformDef;
use crate::spec::transform::joinaggregate::JoinAggregateTransformDef;
use crate::spec::transform::lookup::LookupTransformDef;
use crate::spec::transform::pivot::PivotTransformDef;
use crate::spec::transform::sample::SampleTransformDef;
use crate::spec::transform::stack::StackTransformDef;
use crate::spec::transform::statistical::*;
use crate::spec::transform::timeunit::TimeUnitTransformDef;
use crate::spec::transform::window::WindowTransformDef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

/// One entry of a node's `transform` list. Transforms are identified by
/// their distinguishing key (`"aggregate"`, `"calculate"`, ...) rather than
/// by a type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformDef {
    Aggregate(AggregateTransformDef),
    Bin(Box<BinTransformDef>), // Box since transform is much larger than others
    Calculate(CalculateTransformDef),
    Density(DensityTransformDef),
    Extent(ExtentTransformDef),
    Filter(FilterTransformDef),
    Flatten(FlattenTransformDef),
    Fold(FoldTransformDef),
    Impute(ImputeTransformDef),
    JoinAggregate(JoinAggregateTransformDef),
    Loess(LoessTransformDef),
    Lookup(LookupTransformDef),
    Pivot(PivotTransformDef),
    Quantile(QuantileTransformDef),
    Regression(RegressionTransformDef),
    Sample(SampleTransformDef),
    Stack(StackTransformDef),
    TimeUnit(TimeUnitTransformDef),
    Window(WindowTransformDef),

    // Anything not modeled above is carried through untouched
    Other(OtherTransformDef),
}

impl Deref for TransformDef {
    type Target = dyn TransformDefTrait;

    fn deref(&self) -> &Self::Target {
        match self {
            TransformDef::Aggregate(t) => t,
            TransformDef::Bin(t) => t.as_ref(),
            TransformDef::Calculate(t) => t,
            TransformDef::Density(t) => t,
            TransformDef::Extent(t) => t,
            TransformDef::Filter(t) => t,
            TransformDef::Flatten(t) => t,
            TransformDef::Fold(t) => t,
            TransformDef::Impute(t) => t,
            TransformDef::JoinAggregate(t) => t,
            TransformDef::Loess(t) => t,
            TransformDef::Lookup(t) => t,
            TransformDef::Pivot(t) => t,
            TransformDef::Quantile(t) => t,
            TransformDef::Regression(t) => t,
            TransformDef::Sample(t) => t,
            TransformDef::Stack(t) => t,
            TransformDef::TimeUnit(t) => t,
            TransformDef::Window(t) => t,
            TransformDef::Other(t) => t,
        }
    }
}

impl TransformDef {
    pub fn kind(&self) -> &'static str {
        match self {
            TransformDef::Aggregate(_) => "aggregate",
            TransformDef::Bin(_) => "bin",
            TransformDef::Calculate(_) => "calculate",
            TransformDef::Density(_) => "density",
            TransformDef::Extent(_) => "extent",
            TransformDef::Filter(_) => "filter",
            TransformDef::Flatten(_) => "flatten",
            TransformDef::Fold(_) => "fold",
            TransformDef::Impute(_) => "impute",
            TransformDef::JoinAggregate(_) => "joinaggregate",
            TransformDef::Loess(_) => "loess",
            TransformDef::Lookup(_) => "lookup",
            TransformDef::Pivot(_) => "pivot",
            TransformDef::Quantile(_) => "quantile",
            TransformDef::Regression(_) => "regression",
            TransformDef::Sample(_) => "sample",
            TransformDef::Stack(_) => "stack",
            TransformDef::TimeUnit(_) => "timeUnit",
            TransformDef::Window(_) => "window",
            TransformDef::Other(_) => "other",
        }
    }
}

pub trait TransformDefTrait {
    /// Data fields read by the transform
    fn input_fields(&self) -> Vec<String> {
        Default::default()
    }

    /// Data fields added to each output row
    fn produced_fields(&self) -> Vec<String> {
        Default::default()
    }

    /// Parameters written by the transform
    fn output_params(&self) -> Vec<String> {
        Default::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherTransformDef {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformDefTrait for OtherTransformDef {}

macro_rules! impl_from_transform {
    ( $( $variant:ident($def:ty) ),* ) => {
        $(
        impl From<$def> for TransformDef {
            fn from(v: $def) -> Self {
                TransformDef::$variant(v.into())
            }
        }
        )*
    };
}

impl_from_transform!(
    Aggregate(AggregateTransformDef),
    Bin(BinTransformDef),
    Calculate(CalculateTransformDef),
    Density(DensityTransformDef),
    Extent(ExtentTransformDef),
    Filter(FilterTransformDef),
    Flatten(FlattenTransformDef),
    Fold(FoldTransformDef),
    Impute(ImputeTransformDef),
    JoinAggregate(JoinAggregateTransformDef),
    Loess(LoessTransformDef),
    Lookup(LookupTransformDef),
    Pivot(PivotTransformDef),
    Quantile(QuantileTransformDef),
    Regression(RegressionTransformDef),
    Sample(SampleTransformDef),
    Stack(StackTransformDef),
    TimeUnit(TimeUnitTransformDef),
    Window(WindowTransformDef),
    Other(OtherTransformDef)
);
