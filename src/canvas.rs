use kurbo::{Affine, BezPath, Point, Rect, Shape};
use crate::objects::SceneNode;
use crate::scene::{NodeId, Parent, SceneError, SceneGraph, SceneResult, MIN_DIMENSION};
use crate::types::{ArcData, AutoLayout, LayoutMode, NodeKind, Paint, Reaction, StyleAttribute, StyleValue};

/// In-memory canvas host: a flat node list plus the page's top-level order.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pub(crate) nodes: Vec<SceneNode>,
    pub(crate) page: Vec<NodeId>,
    next_id: u32,
    viewport_center: Point,
    node_limit: Option<usize>,
    styles: Vec<String>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas {
            nodes: Vec::new(),
            page: Vec::new(),
            next_id: 1,
            viewport_center: Point::ORIGIN,
            node_limit: None,
            styles: Vec::new(),
        }
    }

    /// A canvas that refuses to hold more than `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Canvas {
        Canvas { node_limit: Some(limit), ..Canvas::new() }
    }

    pub fn set_node_limit(&mut self, limit: Option<usize>) {
        self.node_limit = limit;
    }

    pub fn set_viewport_center(&mut self, center: Point) {
        self.viewport_center = center;
    }

    pub fn register_style(&mut self, id: &str) {
        if !self.styles.iter().any(|s| s == id) {
            self.styles.push(id.to_string());
        }
    }

    pub fn unregister_style(&mut self, id: &str) {
        self.styles.retain(|s| s != id);
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn page_children(&self) -> &[NodeId] {
        &self.page
    }

    pub fn get_nodes_json(&self) -> String {
        serde_json::to_string(&self.nodes).unwrap_or_else(|_| "[]".to_string())
    }

    fn find(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.node(id).ok_or(SceneError::NodeNotFound(id))
    }

    fn find_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id).ok_or(SceneError::NodeNotFound(id))
    }

    fn reserve(&self, count: usize) -> SceneResult<()> {
        match self.node_limit {
            Some(limit) if self.nodes.len() + count > limit => Err(SceneError::NodeLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Creates a detached node; callers attach it.
    fn spawn(&mut self, kind: NodeKind, width: f64, height: f64) -> SceneResult<NodeId> {
        self.reserve(1)?;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(SceneNode::new(id, kind, width, height));
        Ok(id)
    }

    fn spawn_on_page(&mut self, kind: NodeKind, width: f64, height: f64) -> SceneResult<NodeId> {
        let id = self.spawn(kind, width, height)?;
        self.attach(Parent::Page, usize::MAX, id);
        Ok(id)
    }

    fn siblings_mut(&mut self, parent: Parent) -> Option<&mut Vec<NodeId>> {
        match parent {
            Parent::Page => Some(&mut self.page),
            Parent::Node(id) => self.nodes.iter_mut().find(|n| n.id == id).map(|n| &mut n.children),
        }
    }

    fn attach(&mut self, parent: Parent, index: usize, id: NodeId) {
        if let Some(siblings) = self.siblings_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, id);
        }
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.parent = parent;
        }
        self.relayout(parent);
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).map(|n| n.parent) else { return };
        if let Some(siblings) = self.siblings_mut(parent) {
            siblings.retain(|&c| c != id);
        }
        self.relayout(parent);
    }

    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            if let Some(node) = self.node(out[i]) {
                out.extend(node.children.iter().copied());
            }
            i += 1;
        }
        out
    }

    fn clone_subtree(&mut self, id: NodeId) -> SceneResult<NodeId> {
        let mut copy = self.find(id)?.clone();
        let children = std::mem::take(&mut copy.children);
        let new_id = NodeId(self.next_id);
        self.next_id += 1;
        copy.id = new_id;
        self.nodes.push(copy);
        for child in children {
            let child_copy = self.clone_subtree(child)?;
            self.attach(Parent::Node(new_id), usize::MAX, child_copy);
        }
        Ok(new_id)
    }

    fn check_style_ref(&self, value: &StyleValue) -> SceneResult<()> {
        let reference = match value {
            StyleValue::FillStyleId(Some(s)) | StyleValue::StrokeStyleId(Some(s)) | StyleValue::EffectStyleId(Some(s)) => s,
            _ => return Ok(()),
        };
        if self.styles.iter().any(|s| s == reference) { Ok(()) } else { Err(SceneError::UnknownStyle(reference.clone())) }
    }

    /// Re-flows the children of an auto layout frame and hugs its size around them.
    fn relayout(&mut self, parent: Parent) {
        let Parent::Node(id) = parent else { return };
        let Some(frame) = self.node(id) else { return };
        let layout = frame.layout;
        let horizontal = match layout.mode {
            LayoutMode::None => return,
            LayoutMode::Horizontal => true,
            LayoutMode::Vertical => false,
        };
        let children = frame.children.clone();

        let mut cursor = layout.padding;
        let mut cross: f64 = 0.0;
        for child in &children {
            if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *child) {
                let (along, across) = if horizontal { (node.width, node.height) } else { (node.height, node.width) };
                if horizontal { node.set_position(cursor, layout.padding); } else { node.set_position(layout.padding, cursor); }
                cursor += along + layout.item_spacing;
                cross = cross.max(across);
            }
        }
        let along = if children.is_empty() { 2.0 * layout.padding } else { cursor - layout.item_spacing + layout.padding };
        let across = cross + 2.0 * layout.padding;
        let (width, height) = if horizontal { (along, across) } else { (across, along) };

        let grandparent = match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(frame) => {
                frame.width = width.max(MIN_DIMENSION);
                frame.height = height.max(MIN_DIMENSION);
                frame.parent
            }
            None => return,
        };
        self.relayout(grandparent);
    }
}

impl SceneGraph for Canvas {
    fn create_container(&mut self) -> SceneResult<NodeId> {
        self.spawn_on_page(NodeKind::Frame, 100.0, 100.0)
    }

    fn create_arc_shape(&mut self, size: f64, arc: ArcData) -> SceneResult<NodeId> {
        if !(size >= MIN_DIMENSION) {
            return Err(SceneError::InvalidDimension { width: size, height: size });
        }
        let id = self.spawn_on_page(NodeKind::Ellipse, size, size)?;
        self.find_mut(id)?.arc_data = Some(arc);
        Ok(id)
    }

    fn flatten_to_path(&mut self, shapes: &[NodeId]) -> SceneResult<NodeId> {
        let first = shapes.first().copied().ok_or(SceneError::EmptySelection)?;
        let (parent, index) = self.location(first)?;

        let mut combined = BezPath::new();
        for &id in shapes {
            let node = self.find(id)?;
            let mut path = node.local_path().ok_or(SceneError::WrongNodeKind { node: id, expected: "shape" })?;
            path.apply_affine(node.transform);
            for el in path.elements() {
                combined.push(*el);
            }
        }
        let bbox = combined.bounding_box();
        combined.apply_affine(Affine::translate((-bbox.x0, -bbox.y0)));

        let source = self.find(first)?.clone();
        let id = self.spawn(NodeKind::Vector, bbox.width(), bbox.height())?;
        let vector = self.find_mut(id)?;
        for attribute in StyleAttribute::MIGRATED {
            vector.apply_style(source.style(attribute));
        }
        vector.apply_style(source.style(StyleAttribute::StrokeWeight));
        vector.path_data = combined.to_svg();
        vector.transform = Affine::translate((bbox.x0, bbox.y0));
        vector.name = "Vector".to_string();
        self.attach(parent, index, id);

        for &shape in shapes {
            self.remove(shape)?;
        }
        Ok(id)
    }

    fn create_component(&mut self) -> SceneResult<NodeId> {
        self.spawn_on_page(NodeKind::Component, 100.0, 100.0)
    }

    fn combine_as_variants(&mut self, components: &[NodeId]) -> SceneResult<NodeId> {
        if components.is_empty() {
            return Err(SceneError::EmptySelection);
        }
        let mut area: Option<Rect> = None;
        for &id in components {
            let node = self.find(id)?;
            if node.kind != NodeKind::Component {
                return Err(SceneError::WrongNodeKind { node: id, expected: "component" });
            }
            let b = node.bounds();
            area = Some(area.map_or(b, |a| a.union(b)));
        }
        let Some(area) = area else { return Err(SceneError::EmptySelection) };

        let set = self.spawn_on_page(NodeKind::ComponentSet, area.width().max(MIN_DIMENSION), area.height().max(MIN_DIMENSION))?;
        self.find_mut(set)?.set_position(area.x0, area.y0);
        for &id in components {
            self.detach(id);
            let node = self.find_mut(id)?;
            let (x, y) = (node.x() - area.x0, node.y() - area.y0);
            node.set_position(x, y);
            self.attach(Parent::Node(set), usize::MAX, id);
        }
        Ok(set)
    }

    fn clone_node(&mut self, node: NodeId) -> SceneResult<NodeId> {
        let (parent, index) = self.location(node)?;
        self.reserve(self.subtree(node).len())?;
        let copy = self.clone_subtree(node)?;
        self.attach(parent, index + 1, copy);
        Ok(copy)
    }

    fn create_instance(&mut self, component_set: NodeId) -> SceneResult<NodeId> {
        let set = self.find(component_set)?;
        if set.kind != NodeKind::ComponentSet {
            return Err(SceneError::WrongNodeKind { node: component_set, expected: "component set" });
        }
        let default_variant = set.children.first().copied().ok_or(SceneError::EmptySelection)?;
        let variant = self.find(default_variant)?;
        let (width, height) = (variant.width, variant.height);
        let id = self.spawn_on_page(NodeKind::Instance, width, height)?;
        let instance = self.find_mut(id)?;
        instance.main_component = Some(default_variant);
        instance.name = "Instance".to_string();
        Ok(id)
    }

    fn append_child(&mut self, parent: Parent, child: NodeId) -> SceneResult<()> {
        self.insert_child(parent, usize::MAX, child)
    }

    fn insert_child(&mut self, parent: Parent, index: usize, child: NodeId) -> SceneResult<()> {
        self.find(child)?;
        if let Parent::Node(parent_id) = parent {
            self.find(parent_id)?;
            if self.subtree(child).contains(&parent_id) {
                return Err(SceneError::InvalidHierarchy { parent: parent_id, child });
            }
        }
        self.detach(child);
        self.attach(parent, index, child);
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> SceneResult<()> {
        let target = self.find_mut(node)?;
        target.set_position(x, y);
        let parent = target.parent;
        self.relayout(parent);
        Ok(())
    }

    fn set_transform(&mut self, node: NodeId, transform: Affine) -> SceneResult<()> {
        self.find_mut(node)?.transform = transform;
        Ok(())
    }

    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> SceneResult<()> {
        if !(width >= MIN_DIMENSION && height >= MIN_DIMENSION) || !width.is_finite() || !height.is_finite() {
            return Err(SceneError::InvalidDimension { width, height });
        }
        let target = self.find_mut(node)?;
        target.width = width;
        target.height = height;
        let parent = target.parent;
        self.relayout(Parent::Node(node));
        self.relayout(parent);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> SceneResult<()> {
        self.find(node)?;
        self.detach(node);
        let doomed = self.subtree(node);
        self.nodes.retain(|n| !doomed.contains(&n.id));
        Ok(())
    }

    fn set_fill(&mut self, node: NodeId, color: &str) -> SceneResult<()> {
        let target = self.find_mut(node)?;
        target.fills = vec![Paint::solid(color)];
        target.fill_style_id = None;
        Ok(())
    }

    fn set_name(&mut self, node: NodeId, name: &str) -> SceneResult<()> {
        self.find_mut(node)?.name = name.to_string();
        Ok(())
    }

    fn set_clips_content(&mut self, node: NodeId, clips: bool) -> SceneResult<()> {
        self.find_mut(node)?.clips_content = clips;
        Ok(())
    }

    fn set_auto_layout(&mut self, node: NodeId, layout: AutoLayout) -> SceneResult<()> {
        self.find_mut(node)?.layout = layout;
        self.relayout(Parent::Node(node));
        Ok(())
    }

    fn set_reactions(&mut self, node: NodeId, reactions: Vec<Reaction>) -> SceneResult<()> {
        self.find_mut(node)?.reactions = reactions;
        Ok(())
    }

    fn style_attribute(&self, node: NodeId, attribute: StyleAttribute) -> SceneResult<StyleValue> {
        Ok(self.find(node)?.style(attribute))
    }

    fn set_style_attribute(&mut self, node: NodeId, value: StyleValue) -> SceneResult<()> {
        self.find(node)?;
        self.check_style_ref(&value)?;
        self.find_mut(node)?.apply_style(value);
        Ok(())
    }

    fn is_live(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn location(&self, node: NodeId) -> SceneResult<(Parent, usize)> {
        let parent = self.find(node)?.parent;
        let siblings = match parent {
            Parent::Page => &self.page,
            Parent::Node(id) => &self.find(id)?.children,
        };
        let index = siblings.iter().position(|&c| c == node).ok_or(SceneError::NodeNotFound(node))?;
        Ok((parent, index))
    }

    fn children(&self, node: NodeId) -> SceneResult<Vec<NodeId>> {
        Ok(self.find(node)?.children.clone())
    }

    fn bounds(&self, node: NodeId) -> SceneResult<Rect> {
        Ok(self.find(node)?.bounds())
    }

    fn viewport_center(&self) -> Point {
        self.viewport_center
    }
}
