use crate::spec::config::ConfigDef;
use crate::spec::data::DataDef;
use crate::spec::encoding::EncodingMap;
use crate::spec::layout::{
    AlignDef, AutosizeDef, Bounds, CenterDef, PaddingDef, SizeDef, SpacingDef, ViewBackground,
};
use crate::spec::mark::{AnyMark, MarkKind};
use crate::spec::params::ParamDef;
use crate::spec::projection::ProjectionDef;
use crate::spec::resolve::ResolveDef;
use crate::spec::title::TitleDef;
use crate::spec::transform::TransformDef;
use crate::spec::values::RepeatDimension;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vizspec_common::error::{Result, ResultWithContext, VizSpecError};

/// A node of the visualization document. The root carries the top-level
/// only properties (`$schema`, `config`, `usermeta`, `datasets`).
/// Arrangements a layer element may use. Repeat nodes carry a field list
/// and are only built from repeat elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayerArrangement {
    #[default]
    Overlay,
    Horizontal,
    Vertical,
    Wrap,
}

impl From<LayerArrangement> for Arrangement {
    fn from(v: LayerArrangement) -> Self {
        match v {
            LayerArrangement::Overlay => Arrangement::Overlay,
            LayerArrangement::Horizontal => Arrangement::Horizontal,
            LayerArrangement::Vertical => Arrangement::Vertical,
            LayerArrangement::Wrap => Arrangement::Wrap,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VizSpec {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<AnyMark>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<SizeDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<SizeDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<AutosizeDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<AlignDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<CenterDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewBackground>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<TransformDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveDef>,

    #[serde(default, skip_serializing_if = "EncodingMap::is_empty")]
    pub encoding: EncodingMap,

    // At most one arrangement slot exists at a time. Only reachable through
    // the arrangement methods below.
    #[serde(flatten)]
    composition: Option<Composition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usermeta: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Map<String, Value>>,
}

pub fn default_schema() -> String {
    String::from("https://vega.github.io/schema/vega-lite/v5.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Composition {
    Concat {
        concat: Vec<VizSpec>,
    },
    Layer {
        layer: Vec<VizSpec>,
    },
    Repeat {
        repeat: RepeatDef,
        #[serde(skip_serializing_if = "Option::is_none")]
        spec: Option<Box<VizSpec>>,
    },
    HConcat {
        hconcat: Vec<VizSpec>,
    },
    VConcat {
        vconcat: Vec<VizSpec>,
    },
}

impl Composition {
    fn arrangement(&self) -> Arrangement {
        match self {
            Composition::Layer { .. } => Arrangement::Overlay,
            Composition::HConcat { .. } => Arrangement::Horizontal,
            Composition::VConcat { .. } => Arrangement::Vertical,
            Composition::Concat { .. } => Arrangement::Wrap,
            Composition::Repeat { .. } => Arrangement::Repeat,
        }
    }

    fn into_children(self) -> Vec<VizSpec> {
        match self {
            Composition::Layer { layer: children }
            | Composition::HConcat { hconcat: children }
            | Composition::VConcat { vconcat: children }
            | Composition::Concat { concat: children } => children,
            Composition::Repeat { spec, .. } => spec.map(|s| vec![*s]).unwrap_or_default(),
        }
    }
}

/// How the children of a node are composed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Arrangement {
    #[default]
    Overlay,
    Horizontal,
    Vertical,
    Wrap,
    Repeat,
}

impl Arrangement {
    /// Repeat axis a node with this arrangement maps to when placed under
    /// a repeat
    pub fn repeat_dimension(&self) -> RepeatDimension {
        match self {
            Arrangement::Overlay => RepeatDimension::Layer,
            Arrangement::Horizontal => RepeatDimension::Column,
            Arrangement::Vertical => RepeatDimension::Row,
            Arrangement::Wrap | Arrangement::Repeat => RepeatDimension::Repeat,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepeatMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Vec<String>>,
}

/// Fields a repeat iterates over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepeatDef {
    Fields(Vec<String>),
    Mapping(RepeatMapping),
}

impl Default for RepeatDef {
    fn default() -> Self {
        Self::Fields(Vec::new())
    }
}

impl RepeatDef {
    /// Repeat over `fields` along the axis implied by `arrangement`
    pub fn for_arrangement(arrangement: Arrangement, fields: Vec<String>) -> Self {
        match arrangement.repeat_dimension() {
            RepeatDimension::Layer => Self::Mapping(RepeatMapping {
                layer: Some(fields),
                ..Default::default()
            }),
            RepeatDimension::Column => Self::Mapping(RepeatMapping {
                column: Some(fields),
                ..Default::default()
            }),
            RepeatDimension::Row => Self::Mapping(RepeatMapping {
                row: Some(fields),
                ..Default::default()
            }),
            RepeatDimension::Repeat => Self::Fields(fields),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Empty,
    SingleView,
    Composite,
}

pub trait SpecVisitor {
    fn visit_spec(&mut self, spec: &VizSpec, path: &[u32]) -> Result<()>;
}

pub trait MutSpecVisitor {
    fn visit_spec(&mut self, spec: &mut VizSpec, path: &[u32]) -> Result<()>;
}

impl VizSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single view showing `mark`
    pub fn with_mark<M: Into<AnyMark>>(mark: M) -> Self {
        let mut spec = Self::new();
        spec.mark = Some(mark.into());
        spec
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            VizSpecError::specification(format!("Failed to parse visualization spec: {err}"))
        })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|err| {
            VizSpecError::specification(format!("Failed to parse visualization spec: {err}"))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Arrangement derived from the populated slot, overlay when there is none
    pub fn arrangement(&self) -> Arrangement {
        self.composition
            .as_ref()
            .map(|c| c.arrangement())
            .unwrap_or_default()
    }

    pub fn has_composition(&self) -> bool {
        self.composition.is_some()
    }

    /// Move existing children into the slot for `arrangement`, clearing every
    /// other slot. Switching to `Repeat` keeps only the first child; the
    /// discarded children are returned.
    pub fn set_arrangement(&mut self, arrangement: Arrangement) -> Vec<VizSpec> {
        let previous = self.composition.take();
        let repeat = match &previous {
            Some(Composition::Repeat { repeat, .. }) => repeat.clone(),
            _ => RepeatDef::default(),
        };
        let mut children = previous.map(|c| c.into_children()).unwrap_or_default();

        let (composition, dropped) = match arrangement {
            Arrangement::Overlay => (Composition::Layer { layer: children }, Vec::new()),
            Arrangement::Horizontal => (Composition::HConcat { hconcat: children }, Vec::new()),
            Arrangement::Vertical => (Composition::VConcat { vconcat: children }, Vec::new()),
            Arrangement::Wrap => (Composition::Concat { concat: children }, Vec::new()),
            Arrangement::Repeat => {
                let dropped = if children.len() > 1 {
                    children.split_off(1)
                } else {
                    Vec::new()
                };
                let spec = children.pop().map(Box::new);
                (Composition::Repeat { repeat, spec }, dropped)
            }
        };
        self.composition = Some(composition);
        dropped
    }

    /// Append a child to the current arrangement, starting an overlay if the
    /// node has none. A repeat already holding its spec hands the child back.
    pub fn push_child(&mut self, child: VizSpec) -> Option<VizSpec> {
        match self.composition.get_or_insert_with(|| Composition::Layer {
            layer: Vec::new(),
        }) {
            Composition::Layer { layer: children }
            | Composition::HConcat { hconcat: children }
            | Composition::VConcat { vconcat: children }
            | Composition::Concat { concat: children } => {
                children.push(child);
                None
            }
            Composition::Repeat { spec, .. } => {
                if spec.is_some() {
                    Some(child)
                } else {
                    *spec = Some(Box::new(child));
                    None
                }
            }
        }
    }

    /// Record the fields a repeat node iterates over. Switches the node to
    /// the repeat arrangement if needed and returns any children this drops.
    pub fn set_repeat(&mut self, repeat_def: RepeatDef) -> Vec<VizSpec> {
        let dropped = if self.arrangement() == Arrangement::Repeat {
            Vec::new()
        } else {
            self.set_arrangement(Arrangement::Repeat)
        };
        if let Some(Composition::Repeat { repeat, .. }) = &mut self.composition {
            *repeat = repeat_def;
        }
        dropped
    }

    pub fn children(&self) -> &[VizSpec] {
        match &self.composition {
            None => &[],
            Some(Composition::Layer { layer: children })
            | Some(Composition::HConcat { hconcat: children })
            | Some(Composition::VConcat { vconcat: children })
            | Some(Composition::Concat { concat: children }) => children,
            Some(Composition::Repeat { spec, .. }) => match spec {
                Some(spec) => std::slice::from_ref(spec.as_ref()),
                None => &[],
            },
        }
    }

    pub fn children_mut(&mut self) -> &mut [VizSpec] {
        match &mut self.composition {
            None => &mut [],
            Some(Composition::Layer { layer: children })
            | Some(Composition::HConcat { hconcat: children })
            | Some(Composition::VConcat { vconcat: children })
            | Some(Composition::Concat { concat: children }) => children,
            Some(Composition::Repeat { spec, .. }) => match spec {
                Some(spec) => std::slice::from_mut(spec.as_mut()),
                None => &mut [],
            },
        }
    }

    pub fn layer(&self) -> Option<&[VizSpec]> {
        match &self.composition {
            Some(Composition::Layer { layer }) => Some(layer),
            _ => None,
        }
    }

    pub fn hconcat(&self) -> Option<&[VizSpec]> {
        match &self.composition {
            Some(Composition::HConcat { hconcat }) => Some(hconcat),
            _ => None,
        }
    }

    pub fn vconcat(&self) -> Option<&[VizSpec]> {
        match &self.composition {
            Some(Composition::VConcat { vconcat }) => Some(vconcat),
            _ => None,
        }
    }

    pub fn concat(&self) -> Option<&[VizSpec]> {
        match &self.composition {
            Some(Composition::Concat { concat }) => Some(concat),
            _ => None,
        }
    }

    pub fn repeat_def(&self) -> Option<&RepeatDef> {
        match &self.composition {
            Some(Composition::Repeat { repeat, .. }) => Some(repeat),
            _ => None,
        }
    }

    pub fn repeated_spec(&self) -> Option<&VizSpec> {
        match &self.composition {
            Some(Composition::Repeat { spec, .. }) => spec.as_deref(),
            _ => None,
        }
    }

    pub fn state(&self) -> NodeState {
        if self.composition.is_some() {
            NodeState::Composite
        } else if self.mark.is_some() || !self.encoding.is_empty() {
            NodeState::SingleView
        } else {
            NodeState::Empty
        }
    }

    /// Visit this node and then its descendants, depth first. Each node is
    /// passed with the child index path leading to it from `self`.
    pub fn walk(&self, visitor: &mut dyn SpecVisitor) -> Result<()> {
        self.walk_scoped(visitor, &mut Vec::new())
    }

    fn walk_scoped(&self, visitor: &mut dyn SpecVisitor, path: &mut Vec<u32>) -> Result<()> {
        visitor.visit_spec(self, path)?;
        for (index, child) in self.children().iter().enumerate() {
            path.push(index as u32);
            child.walk_scoped(visitor, path)?;
            path.pop();
        }
        Ok(())
    }

    pub fn walk_mut(&mut self, visitor: &mut dyn MutSpecVisitor) -> Result<()> {
        self.walk_scoped_mut(visitor, &mut Vec::new())
    }

    fn walk_scoped_mut(
        &mut self,
        visitor: &mut dyn MutSpecVisitor,
        path: &mut Vec<u32>,
    ) -> Result<()> {
        visitor.visit_spec(self, path)?;
        for (index, child) in self.children_mut().iter_mut().enumerate() {
            path.push(index as u32);
            child.walk_scoped_mut(visitor, path)?;
            path.pop();
        }
        Ok(())
    }

    pub fn get_child(&self, index: u32) -> Result<&VizSpec> {
        self.children()
            .get(index as usize)
            .with_context(|| format!("No child spec with index {index}"))
    }

    pub fn get_nested_child(&self, path: &[u32]) -> Result<&VizSpec> {
        if path.is_empty() {
            return Err(VizSpecError::internal("Nested child path may not be empty"));
        }
        let mut child = self.get_child(path[0])?;
        for index in &path[1..] {
            child = child.get_child(*index)?;
        }
        Ok(child)
    }

    /// Collapse every mark record in the tree that equals its type's default
    pub fn compact_marks(&mut self) {
        for child in self.children_mut() {
            child.compact_marks();
        }
        self.mark = self.mark.take().map(AnyMark::compact);
    }

    /// Sorted, de-duplicated data fields referenced by encodings and
    /// transforms anywhere in the tree
    pub fn referenced_fields(&self) -> Result<Vec<String>> {
        let mut visitor = ReferencedFieldsVisitor::default();
        self.walk(&mut visitor)?;
        Ok(visitor.fields.into_iter().sorted().dedup().collect())
    }

    /// Marks of the tree in depth-first order, with their node paths
    pub fn mark_types(&self) -> Result<Vec<(Vec<u32>, MarkKind)>> {
        let mut visitor = MarkTypesVisitor::default();
        self.walk(&mut visitor)?;
        Ok(visitor.marks)
    }
}

#[derive(Default)]
struct ReferencedFieldsVisitor {
    fields: Vec<String>,
}

impl SpecVisitor for ReferencedFieldsVisitor {
    fn visit_spec(&mut self, spec: &VizSpec, _path: &[u32]) -> Result<()> {
        self.fields.extend(spec.encoding.referenced_fields());
        for transform in &spec.transform {
            self.fields.extend(transform.input_fields());
        }
        Ok(())
    }
}

#[derive(Default)]
struct MarkTypesVisitor {
    marks: Vec<(Vec<u32>, MarkKind)>,
}

impl SpecVisitor for MarkTypesVisitor {
    fn visit_spec(&mut self, spec: &VizSpec, path: &[u32]) -> Result<()> {
        if let Some(mark) = &spec.mark {
            self.marks.push((Vec::from(path), mark.kind()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::mark::MarkType;
    use serde_json::json;

    fn leaf(mark: MarkType) -> VizSpec {
        VizSpec {
            mark: Some(mark.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_child_starts_overlay() {
        let mut spec = VizSpec::new();
        assert_eq!(spec.state(), NodeState::Empty);
        assert!(spec.push_child(leaf(MarkType::Bar)).is_none());
        assert_eq!(spec.arrangement(), Arrangement::Overlay);
        assert_eq!(spec.state(), NodeState::Composite);
        assert_eq!(spec.layer().map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_repeat_keeps_first_child() {
        let mut spec = VizSpec::new();
        spec.set_arrangement(Arrangement::Horizontal);
        spec.push_child(leaf(MarkType::Bar));
        spec.push_child(leaf(MarkType::Line));
        spec.push_child(leaf(MarkType::Point));

        let dropped = spec.set_arrangement(Arrangement::Repeat);
        assert_eq!(dropped, vec![leaf(MarkType::Line), leaf(MarkType::Point)]);
        assert_eq!(spec.repeated_spec(), Some(&leaf(MarkType::Bar)));
        assert!(spec.hconcat().is_none());

        // A full repeat hands further children back
        assert_eq!(spec.push_child(leaf(MarkType::Rule)), Some(leaf(MarkType::Rule)));
    }

    #[test]
    fn test_repeat_def_is_kept_across_reassignment() {
        let mut spec = VizSpec::new();
        spec.set_repeat(RepeatDef::for_arrangement(
            Arrangement::Vertical,
            vec!["a".to_string()],
        ));
        spec.set_arrangement(Arrangement::Repeat);
        assert_eq!(
            serde_json::to_value(spec.repeat_def()).unwrap(),
            json!({"row": ["a"]})
        );
    }

    #[test]
    fn test_composition_serialization() {
        let mut spec = VizSpec {
            schema: Some(default_schema()),
            ..Default::default()
        };
        spec.set_arrangement(Arrangement::Vertical);
        spec.push_child(leaf(MarkType::Bar));

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
                "vconcat": [{"mark": "bar"}]
            })
        );
        let parsed = VizSpec::from_value(value).unwrap();
        assert_eq!(parsed, spec);
        assert_eq!(parsed.arrangement(), Arrangement::Vertical);
    }

    #[test]
    fn test_repeat_deserialization() {
        let spec = VizSpec::from_value(json!({
            "repeat": ["a", "b"],
            "columns": 2,
            "spec": {"mark": "point"}
        }))
        .unwrap();
        assert_eq!(spec.arrangement(), Arrangement::Repeat);
        assert_eq!(
            spec.repeat_def(),
            Some(&RepeatDef::Fields(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(spec.children(), &[leaf(MarkType::Point)]);
    }

    #[test]
    fn test_walk_paths() {
        let mut inner = VizSpec::new();
        inner.push_child(leaf(MarkType::Line));
        inner.push_child(leaf(MarkType::Point));

        let mut root = VizSpec::new();
        root.set_arrangement(Arrangement::Wrap);
        root.push_child(leaf(MarkType::Bar));
        root.push_child(inner);

        let marks = root.mark_types().unwrap();
        assert_eq!(
            marks,
            vec![
                (vec![0], MarkKind::Primitive(MarkType::Bar)),
                (vec![1, 0], MarkKind::Primitive(MarkType::Line)),
                (vec![1, 1], MarkKind::Primitive(MarkType::Point)),
            ]
        );
        assert_eq!(root.get_nested_child(&[1, 1]).unwrap(), &leaf(MarkType::Point));
        assert!(root.get_nested_child(&[2]).is_err());
        assert!(root.get_nested_child(&[]).is_err());
    }

    #[test]
    fn test_invalid_json_is_specification_error() {
        let err = VizSpec::from_json(r#"{"mark": 12}"#).unwrap_err();
        assert!(matches!(err, VizSpecError::SpecificationError(..)));
    }
}
