use serde::{Serialize, Deserialize};
use kurbo::{Affine, Point, Rect};
use std::fmt;
use thiserror::Error;
use crate::types::{ArcData, AutoLayout, Reaction, StyleAttribute, StyleValue};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// Where a node lives: directly on the page or inside another node.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Parent {
    Page,
    Node(NodeId),
}

/// Failure reported by the canvas host for a single call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    #[error("{0} does not exist or was removed")]
    NodeNotFound(NodeId),
    #[error("the canvas node limit of {limit} was reached")]
    NodeLimitExceeded { limit: usize },
    #[error("dimensions {width}x{height} are below the canvas minimum")]
    InvalidDimension { width: f64, height: f64 },
    #[error("{node} is not a {expected}")]
    WrongNodeKind { node: NodeId, expected: &'static str },
    #[error("style {0:?} is not defined in this document")]
    UnknownStyle(String),
    #[error("{child} cannot be placed inside {parent}")]
    InvalidHierarchy { parent: NodeId, child: NodeId },
    #[error("the operation needs at least one node")]
    EmptySelection,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Smallest width or height the canvas accepts for a node.
pub const MIN_DIMENSION: f64 = 0.01;

/// Imperative canvas the engine draws radials into. Every call may fail; nothing is reactive.
pub trait SceneGraph {
    fn create_container(&mut self) -> SceneResult<NodeId>;
    /// Ellipse of `size` x `size` carrying `arc`.
    fn create_arc_shape(&mut self, size: f64, arc: ArcData) -> SceneResult<NodeId>;
    /// Replaces `shapes` by one static path in the parent of the first shape.
    fn flatten_to_path(&mut self, shapes: &[NodeId]) -> SceneResult<NodeId>;
    fn create_component(&mut self) -> SceneResult<NodeId>;
    /// Wraps `components` into a component set; the first one becomes the default variant.
    fn combine_as_variants(&mut self, components: &[NodeId]) -> SceneResult<NodeId>;
    fn clone_node(&mut self, node: NodeId) -> SceneResult<NodeId>;
    /// Instance of the default variant of `component_set`.
    fn create_instance(&mut self, component_set: NodeId) -> SceneResult<NodeId>;
    fn append_child(&mut self, parent: Parent, child: NodeId) -> SceneResult<()>;
    fn insert_child(&mut self, parent: Parent, index: usize, child: NodeId) -> SceneResult<()>;
    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> SceneResult<()>;
    fn set_transform(&mut self, node: NodeId, transform: Affine) -> SceneResult<()>;
    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> SceneResult<()>;
    fn remove(&mut self, node: NodeId) -> SceneResult<()>;
    fn set_fill(&mut self, node: NodeId, color: &str) -> SceneResult<()>;

    fn set_name(&mut self, node: NodeId, name: &str) -> SceneResult<()>;
    fn set_clips_content(&mut self, node: NodeId, clips: bool) -> SceneResult<()>;
    fn set_auto_layout(&mut self, node: NodeId, layout: AutoLayout) -> SceneResult<()>;
    fn set_reactions(&mut self, node: NodeId, reactions: Vec<Reaction>) -> SceneResult<()>;
    fn style_attribute(&self, node: NodeId, attribute: StyleAttribute) -> SceneResult<StyleValue>;
    fn set_style_attribute(&mut self, node: NodeId, value: StyleValue) -> SceneResult<()>;

    fn is_live(&self, node: NodeId) -> bool;
    /// Parent of `node` and its index among the parent's children.
    fn location(&self, node: NodeId) -> SceneResult<(Parent, usize)>;
    fn children(&self, node: NodeId) -> SceneResult<Vec<NodeId>>;
    /// Axis-aligned bounds in the parent's coordinate space.
    fn bounds(&self, node: NodeId) -> SceneResult<Rect>;
    fn viewport_center(&self) -> Point;
}
