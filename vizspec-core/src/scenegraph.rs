//! Read-only model of the scenegraph produced by the rendering engine.
//!
//! Every mark node carries a list of items of its kind. Items of all kinds
//! share the [`SceneItemCommon`] properties, and group items hold nested
//! mark nodes.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Fill or stroke of a scene item: a CSS color or a gradient object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenePaint {
    Color(String),
    Gradient(Map<String, Value>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemCommon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zindex: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<ScenePaint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ScenePaint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_role_description: Option<String>,
}

pub trait SceneItem {
    fn common(&self) -> &SceneItemCommon;
}

macro_rules! scene_item {
    (
        $(#[$meta:meta])*
        $name:ident { $( $field:ident : $ty:ty ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(flatten)]
            pub common: SceneItemCommon,
            $(
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $field: Option<$ty>,
            )*
            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }

        impl SceneItem for $name {
            fn common(&self) -> &SceneItemCommon {
                &self.common
            }
        }
    };
}

scene_item!(SceneArcItem {
    start_angle: f64,
    end_angle: f64,
    pad_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
    corner_radius: f64,
});

scene_item!(SceneAreaItem {
    x2: f64,
    y2: f64,
    orient: String,
    interpolate: String,
    tension: f64,
    defined: bool,
});

scene_item!(SceneImageItem {
    url: String,
    aspect: bool,
    smooth: bool,
    align: String,
    baseline: String,
});

scene_item!(SceneLineItem {
    interpolate: String,
    tension: f64,
    defined: bool,
});

scene_item!(ScenePathItem {
    path: String,
    scale_x: f64,
    scale_y: f64,
    angle: f64,
});

scene_item!(SceneRectItem {
    x2: f64,
    y2: f64,
    corner_radius: f64,
});

scene_item!(SceneRuleItem { x2: f64, y2: f64 });

scene_item!(
    /// Item of a `shape` mark. The geometry is engine specific and kept opaque.
    SceneShapeItem { shape: Value }
);

scene_item!(SceneSymbolItem {
    shape: String,
    size: f64,
    angle: f64,
});

scene_item!(SceneTextItem {
    text: Value,
    font: String,
    font_size: f64,
    font_weight: Value,
    font_style: String,
    align: String,
    baseline: String,
    angle: f64,
    dx: f64,
    dy: f64,
    limit: f64,
    radius: f64,
    theta: f64,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGroupItem {
    #[serde(flatten)]
    pub common: SceneItemCommon,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SceneNode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SceneItem for SceneGroupItem {
    fn common(&self) -> &SceneItemCommon {
        &self.common
    }
}

/// A mark node and its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMark<I> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zindex: Option<f64>,

    #[serde(default = "Vec::new")]
    pub items: Vec<I>,
}

impl<I> Default for SceneMark<I> {
    fn default() -> Self {
        Self {
            name: None,
            role: None,
            interactive: None,
            clip: None,
            zindex: None,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMarkType {
    Arc,
    Area,
    Image,
    Line,
    Path,
    Rect,
    Rule,
    Shape,
    Symbol,
    Text,
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "marktype", rename_all = "lowercase")]
pub enum SceneNode {
    Arc(SceneMark<SceneArcItem>),
    Area(SceneMark<SceneAreaItem>),
    Image(SceneMark<SceneImageItem>),
    Line(SceneMark<SceneLineItem>),
    Path(SceneMark<ScenePathItem>),
    Rect(SceneMark<SceneRectItem>),
    Rule(SceneMark<SceneRuleItem>),
    Shape(SceneMark<SceneShapeItem>),
    Symbol(SceneMark<SceneSymbolItem>),
    Text(SceneMark<SceneTextItem>),
    Group(SceneMark<SceneGroupItem>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
}

macro_rules! for_each_node_kind {
    ($node:expr, $mark:ident => $body:expr) => {
        match $node {
            SceneNode::Arc($mark) => $body,
            SceneNode::Area($mark) => $body,
            SceneNode::Image($mark) => $body,
            SceneNode::Line($mark) => $body,
            SceneNode::Path($mark) => $body,
            SceneNode::Rect($mark) => $body,
            SceneNode::Rule($mark) => $body,
            SceneNode::Shape($mark) => $body,
            SceneNode::Symbol($mark) => $body,
            SceneNode::Text($mark) => $body,
            SceneNode::Group($mark) => $body,
        }
    };
}

impl SceneNode {
    pub fn mark_type(&self) -> SceneMarkType {
        match self {
            SceneNode::Arc(_) => SceneMarkType::Arc,
            SceneNode::Area(_) => SceneMarkType::Area,
            SceneNode::Image(_) => SceneMarkType::Image,
            SceneNode::Line(_) => SceneMarkType::Line,
            SceneNode::Path(_) => SceneMarkType::Path,
            SceneNode::Rect(_) => SceneMarkType::Rect,
            SceneNode::Rule(_) => SceneMarkType::Rule,
            SceneNode::Shape(_) => SceneMarkType::Shape,
            SceneNode::Symbol(_) => SceneMarkType::Symbol,
            SceneNode::Text(_) => SceneMarkType::Text,
            SceneNode::Group(_) => SceneMarkType::Group,
        }
    }

    pub fn name(&self) -> Option<&str> {
        for_each_node_kind!(self, mark => mark.name.as_deref())
    }

    pub fn role(&self) -> Option<&str> {
        for_each_node_kind!(self, mark => mark.role.as_deref())
    }

    pub fn len(&self) -> usize {
        for_each_node_kind!(self, mark => mark.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Common properties of every item of this node, whatever its kind
    pub fn item_commons(&self) -> Vec<&SceneItemCommon> {
        for_each_node_kind!(self, mark => mark.items.iter().map(|item| item.common()).collect())
    }

    /// Mark nodes nested under this node's group items, in item order
    pub fn children(&self) -> Vec<&SceneNode> {
        match self {
            SceneNode::Group(mark) => mark.items.iter().flat_map(|item| &item.items).collect(),
            _ => Vec::new(),
        }
    }

    /// Every node of the tree paired with its index path from `self`
    pub fn flatten(&self, order: TraversalOrder) -> Vec<(Vec<usize>, &SceneNode)> {
        let mut result = Vec::new();
        match order {
            TraversalOrder::DepthFirst => {
                let mut stack = vec![(Vec::new(), self)];
                while let Some((path, node)) = stack.pop() {
                    for (index, child) in node.children().into_iter().enumerate().rev() {
                        let mut child_path = path.clone();
                        child_path.push(index);
                        stack.push((child_path, child));
                    }
                    result.push((path, node));
                }
            }
            TraversalOrder::BreadthFirst => {
                let mut queue = VecDeque::from([(Vec::new(), self)]);
                while let Some((path, node)) = queue.pop_front() {
                    for (index, child) in node.children().into_iter().enumerate() {
                        let mut child_path = path.clone();
                        child_path.push(index);
                        queue.push_back((child_path, child));
                    }
                    result.push((path, node));
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenegraph() -> SceneNode {
        serde_json::from_value(json!({
            "marktype": "group",
            "name": "root",
            "role": "frame",
            "items": [{
                "x": 0, "y": 0, "width": 200, "height": 100,
                "items": [
                    {
                        "marktype": "rect",
                        "role": "mark",
                        "items": [
                            {"x": 5, "y": 10, "width": 20, "height": 90, "fill": "steelblue"},
                            {"x": 30, "y": 40, "width": 20, "height": 60, "fill": "steelblue"}
                        ]
                    },
                    {
                        "marktype": "group",
                        "role": "axis",
                        "items": [{
                            "items": [{
                                "marktype": "text",
                                "role": "axis-label",
                                "items": [{"x": 15, "y": 110, "text": "A", "fontSize": 10}]
                            }]
                        }]
                    },
                    {
                        "marktype": "symbol",
                        "items": [{"x": 1, "y": 2, "shape": "circle", "size": 30}]
                    }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_common_lookup() {
        let root = scenegraph();
        let rect = root.children()[0];
        assert_eq!(rect.mark_type(), SceneMarkType::Rect);
        let heights: Vec<_> = rect.item_commons().iter().map(|c| c.height).collect();
        assert_eq!(heights, vec![Some(90.0), Some(60.0)]);
        assert_eq!(
            rect.item_commons()[0].fill,
            Some(ScenePaint::Color("steelblue".to_string()))
        );

        match &root.children()[2] {
            SceneNode::Symbol(mark) => {
                assert_eq!(mark.items[0].shape.as_deref(), Some("circle"));
                assert_eq!(mark.items[0].common.x, Some(1.0));
            }
            other => panic!("expected symbol node, got {:?}", other.mark_type()),
        }
    }

    #[test]
    fn test_flatten_orders() {
        let root = scenegraph();

        let depth_first: Vec<_> = root
            .flatten(TraversalOrder::DepthFirst)
            .into_iter()
            .map(|(path, node)| (path, node.mark_type()))
            .collect();
        assert_eq!(
            depth_first,
            vec![
                (vec![], SceneMarkType::Group),
                (vec![0], SceneMarkType::Rect),
                (vec![1], SceneMarkType::Group),
                (vec![1, 0], SceneMarkType::Text),
                (vec![2], SceneMarkType::Symbol),
            ]
        );

        let breadth_first: Vec<_> = root
            .flatten(TraversalOrder::BreadthFirst)
            .into_iter()
            .map(|(path, node)| (path, node.mark_type()))
            .collect();
        assert_eq!(
            breadth_first,
            vec![
                (vec![], SceneMarkType::Group),
                (vec![0], SceneMarkType::Rect),
                (vec![1], SceneMarkType::Group),
                (vec![2], SceneMarkType::Symbol),
                (vec![1, 0], SceneMarkType::Text),
            ]
        );
    }
}
