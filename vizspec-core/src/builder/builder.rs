use crate::builder::element::{VizElement, VizLayer, VizMark, VizRepeat};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::spec::chart::{default_schema, Arrangement, RepeatDef, VizSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Written to `$schema` of the root node
    pub schema: Option<String>,

    /// Collapse mark records equal to their type's default into the bare type
    pub compact_marks: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            schema: Some(default_schema()),
            compact_marks: true,
        }
    }
}

/// Assembles a [`VizSpec`] from a list of declarative elements
#[derive(Debug, Clone, Default)]
pub struct VizSpecBuilder {
    config: BuilderConfig,
    elements: Vec<VizElement>,
}

impl VizSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    pub fn element<E: Into<VizElement>>(mut self, element: E) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = VizElement>,
    {
        self.elements.extend(elements);
        self
    }

    pub fn build(self) -> (VizSpec, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let spec = self.build_with(&mut diagnostics);
        (spec, diagnostics)
    }

    /// Build, recording diagnostics into a caller-supplied collector
    pub fn build_with(self, diagnostics: &mut Diagnostics) -> VizSpec {
        let mut root = VizSpec::new();
        root.schema = self.config.schema.clone();
        for element in self.elements {
            apply_element(&mut root, element, true, diagnostics);
        }
        if self.config.compact_marks {
            root.compact_marks();
        }
        root
    }
}

pub fn build_spec(elements: Vec<VizElement>, config: BuilderConfig) -> (VizSpec, Diagnostics) {
    VizSpecBuilder::with_config(config).elements(elements).build()
}

/// Apply one element to `node`. Child-creating elements build their child
/// completely before it is appended.
fn apply_element(
    node: &mut VizSpec,
    element: VizElement,
    is_root: bool,
    diagnostics: &mut Diagnostics,
) {
    match element {
        VizElement::Mark(mark) => {
            let index = node.children().len() as u32;
            let child = diagnostics.scoped(index, |d| build_mark(mark, d));
            append_child(node, child, diagnostics);
        }
        VizElement::Layer(layer) => {
            let index = node.children().len() as u32;
            let child = diagnostics.scoped(index, |d| build_layer(layer, d));
            append_child(node, child, diagnostics);
        }
        VizElement::Repeat(repeat) => {
            let index = node.children().len() as u32;
            let child = diagnostics.scoped(index, |d| build_repeat(repeat, d));
            append_child(node, child, diagnostics);
        }
        VizElement::Encode(encoding) => node.encoding.attach(encoding, diagnostics),
        VizElement::Transform(transform) => node.transform.push(transform),
        VizElement::Param(param) => node.params.push(param),
        VizElement::Resolve(resolve) => match &mut node.resolve {
            Some(existing) => existing.merge(resolve),
            None => node.resolve = Some(resolve),
        },
        VizElement::Data(data) => node.data = Some(data),
        VizElement::Projection(projection) => node.projection = Some(projection),
        VizElement::Title(title) => node.title = Some(title),
        VizElement::Width(width) => node.width = Some(width),
        VizElement::Height(height) => node.height = Some(height),
        VizElement::Padding(padding) => node.padding = Some(padding),
        VizElement::Autosize(autosize) => node.autosize = Some(autosize),
        VizElement::Spacing(spacing) => node.spacing = Some(spacing),
        VizElement::Columns(columns) => node.columns = Some(columns),
        VizElement::View(view) => node.view = Some(view),
        VizElement::Background(background) => node.background = Some(background),
        VizElement::Name(name) => node.name = Some(name),
        VizElement::Description(description) => node.description = Some(description),
        VizElement::Config(config) => {
            if is_root {
                match &mut node.config {
                    Some(existing) => existing.merge(config),
                    None => node.config = Some(config),
                }
            } else {
                diagnostics.push(DiagnosticKind::TopLevelOnly { property: "config" });
            }
        }
        VizElement::Usermeta(usermeta) => {
            if is_root {
                node.usermeta.get_or_insert_with(Default::default).extend(usermeta);
            } else {
                diagnostics.push(DiagnosticKind::TopLevelOnly { property: "usermeta" });
            }
        }
        VizElement::Datasets(datasets) => {
            if is_root {
                node.datasets.get_or_insert_with(Default::default).extend(datasets);
            } else {
                diagnostics.push(DiagnosticKind::TopLevelOnly { property: "datasets" });
            }
        }
    }
}

fn append_child(node: &mut VizSpec, child: VizSpec, diagnostics: &mut Diagnostics) {
    if node.push_child(child).is_some() {
        diagnostics.push(DiagnosticKind::DroppedRepeatChildren { kept: 1, dropped: 1 });
    }
}

fn apply_elements(node: &mut VizSpec, elements: Vec<VizElement>, diagnostics: &mut Diagnostics) {
    for element in elements {
        apply_element(node, element, false, diagnostics);
    }
}

fn build_mark(mark: VizMark, diagnostics: &mut Diagnostics) -> VizSpec {
    let mut node = VizSpec::with_mark(mark.mark);
    apply_elements(&mut node, mark.elements, diagnostics);
    node
}

fn build_layer(layer: VizLayer, diagnostics: &mut Diagnostics) -> VizSpec {
    let mut node = VizSpec::new();
    apply_elements(&mut node, layer.elements, diagnostics);
    collapse_children(&mut node, layer.arrangement.into(), diagnostics);
    node
}

fn build_repeat(repeat: VizRepeat, diagnostics: &mut Diagnostics) -> VizSpec {
    let mut node = VizSpec::new();
    apply_elements(&mut node, repeat.elements, diagnostics);
    collapse_children(&mut node, Arrangement::Repeat, diagnostics);
    node.set_repeat(RepeatDef::for_arrangement(repeat.arrangement, repeat.fields));
    if repeat.columns.is_some() {
        node.columns = repeat.columns;
    }
    node
}

/// Move the children collected so far into the slot for `arrangement`
fn collapse_children(
    node: &mut VizSpec,
    arrangement: Arrangement,
    diagnostics: &mut Diagnostics,
) {
    let dropped = node.set_arrangement(arrangement);
    if !dropped.is_empty() {
        diagnostics.push(DiagnosticKind::DroppedRepeatChildren {
            kept: node.children().len(),
            dropped: dropped.len(),
        });
    }
}
