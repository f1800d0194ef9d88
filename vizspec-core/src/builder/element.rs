use crate::spec::chart::{Arrangement, LayerArrangement};
use crate::spec::config::ConfigDef;
use crate::spec::data::DataDef;
use crate::spec::encoding::EncodingChannel;
use crate::spec::layout::{AutosizeDef, PaddingDef, SizeDef, SpacingDef, ViewBackground};
use crate::spec::mark::AnyMark;
use crate::spec::params::ParamDef;
use crate::spec::projection::ProjectionDef;
use crate::spec::resolve::ResolveDef;
use crate::spec::title::TitleDef;
use crate::spec::transform::TransformDef;
use serde_json::{Map, Value};

/// One declarative building block of a spec.
///
/// `Mark`, `Layer` and `Repeat` create a child node. Every other element
/// modifies the node it is applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum VizElement {
    Mark(VizMark),
    Layer(VizLayer),
    Repeat(VizRepeat),
    Encode(EncodingChannel),
    Transform(TransformDef),
    Data(DataDef),
    Projection(ProjectionDef),
    Title(TitleDef),
    Resolve(ResolveDef),
    Param(ParamDef),
    Width(SizeDef),
    Height(SizeDef),
    Padding(PaddingDef),
    Autosize(AutosizeDef),
    Spacing(SpacingDef),
    Columns(u32),
    View(ViewBackground),
    Background(String),
    Name(String),
    Description(String),
    Config(ConfigDef),
    Usermeta(Map<String, Value>),
    Datasets(Map<String, Value>),
}

impl VizElement {
    pub fn encode<E: Into<EncodingChannel>>(encoding: E) -> Self {
        Self::Encode(encoding.into())
    }

    pub fn transform<T: Into<TransformDef>>(transform: T) -> Self {
        Self::Transform(transform.into())
    }

    pub fn title<T: Into<TitleDef>>(title: T) -> Self {
        Self::Title(title.into())
    }

    pub fn width<S: Into<SizeDef>>(width: S) -> Self {
        Self::Width(width.into())
    }

    pub fn height<S: Into<SizeDef>>(height: S) -> Self {
        Self::Height(height.into())
    }

    pub fn name<S: Into<String>>(name: S) -> Self {
        Self::Name(name.into())
    }

    pub fn description<S: Into<String>>(description: S) -> Self {
        Self::Description(description.into())
    }

    pub fn background<S: Into<String>>(background: S) -> Self {
        Self::Background(background.into())
    }

    /// Creates a child node
    pub fn is_child(&self) -> bool {
        matches!(
            self,
            VizElement::Mark(_) | VizElement::Layer(_) | VizElement::Repeat(_)
        )
    }
}

/// A single view: a mark plus the elements applied to its node
#[derive(Debug, Clone, PartialEq)]
pub struct VizMark {
    pub mark: AnyMark,
    pub elements: Vec<VizElement>,
}

impl VizMark {
    pub fn new<M: Into<AnyMark>>(mark: M) -> Self {
        Self {
            mark: mark.into(),
            elements: Vec::new(),
        }
    }

    pub fn with<E: Into<VizElement>>(mut self, element: E) -> Self {
        self.elements.push(element.into());
        self
    }
}

/// A composite node arranging its child elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VizLayer {
    pub arrangement: LayerArrangement,
    pub elements: Vec<VizElement>,
}

impl VizLayer {
    pub fn new(arrangement: LayerArrangement) -> Self {
        Self {
            arrangement,
            elements: Vec::new(),
        }
    }

    pub fn with<E: Into<VizElement>>(mut self, element: E) -> Self {
        self.elements.push(element.into());
        self
    }
}

/// A node repeating its child over `fields`. `arrangement` picks the repeat
/// axis: overlay repeats layers, horizontal columns, vertical rows and wrap
/// a flowing grid with `columns` per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VizRepeat {
    pub arrangement: Arrangement,
    pub fields: Vec<String>,
    pub columns: Option<u32>,
    pub elements: Vec<VizElement>,
}

impl VizRepeat {
    pub fn new<I, S>(arrangement: Arrangement, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arrangement,
            fields: fields.into_iter().map(Into::into).collect(),
            columns: None,
            elements: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with<E: Into<VizElement>>(mut self, element: E) -> Self {
        self.elements.push(element.into());
        self
    }
}

macro_rules! impl_from_element {
    ( $( $variant:ident($def:ty) ),* $(,)? ) => {
        $(
        impl From<$def> for VizElement {
            fn from(v: $def) -> Self {
                Self::$variant(v)
            }
        }
        )*
    };
}

impl_from_element!(
    Mark(VizMark),
    Layer(VizLayer),
    Repeat(VizRepeat),
    Encode(EncodingChannel),
    Transform(TransformDef),
    Data(DataDef),
    Projection(ProjectionDef),
    Title(TitleDef),
    Resolve(ResolveDef),
    Param(ParamDef),
    Padding(PaddingDef),
    Autosize(AutosizeDef),
    Spacing(SpacingDef),
    View(ViewBackground),
    Config(ConfigDef),
);
