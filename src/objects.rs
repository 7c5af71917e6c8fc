use serde::{Serialize, Deserialize};
use kurbo::{Affine, Arc, BezPath, Point, Rect, Vec2};
use std::f64::consts::TAU;
use crate::scene::{NodeId, Parent};
use crate::types::{
    ArcData, AutoLayout, BlendMode, LayerEffect, NodeKind, Paint, Reaction, StrokeAlign, StrokeCap,
    StrokeJoin, StyleAttribute, StyleValue,
};

const ARC_TOLERANCE: f64 = 0.1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub parent: Parent,
    pub children: Vec<NodeId>,
    // Relative to the parent; the translation part is the node's x/y
    pub transform: Affine,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    pub clips_content: bool,
    // Appearance
    pub opacity: f64,
    pub blend_mode: BlendMode,
    pub is_mask: bool,
    pub effects: Vec<LayerEffect>,
    pub effect_style_id: Option<String>,
    pub corner_radius: f64,
    pub corner_smoothing: f64,
    pub fills: Vec<Paint>,
    pub fill_style_id: Option<String>,
    pub strokes: Vec<Paint>,
    pub stroke_style_id: Option<String>,
    pub stroke_weight: f64,
    pub stroke_join: StrokeJoin,
    pub stroke_align: StrokeAlign,
    pub stroke_cap: StrokeCap,
    pub stroke_miter_limit: f64,
    pub dash_pattern: Vec<f64>,
    // Shape specific
    pub arc_data: Option<ArcData>,
    pub path_data: String,
    // Components
    pub main_component: Option<NodeId>,
    pub reactions: Vec<Reaction>,
    pub layout: AutoLayout,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind, width: f64, height: f64) -> Self {
        let fills = match kind {
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet => vec![Paint::solid("#ffffff")],
            NodeKind::Ellipse | NodeKind::Vector => vec![Paint::solid("#d9d9d9")],
            NodeKind::Instance => Vec::new(),
        };
        SceneNode {
            id, kind, name: format!("{:?} {}", kind, id.0), parent: Parent::Page, children: Vec::new(),
            transform: Affine::IDENTITY, width, height, visible: true, clips_content: kind == NodeKind::Frame,
            opacity: 1.0, blend_mode: BlendMode::PassThrough, is_mask: false, effects: Vec::new(), effect_style_id: None,
            corner_radius: 0.0, corner_smoothing: 0.0, fills, fill_style_id: None, strokes: Vec::new(), stroke_style_id: None,
            stroke_weight: 1.0, stroke_join: StrokeJoin::Miter, stroke_align: StrokeAlign::Inside, stroke_cap: StrokeCap::None,
            stroke_miter_limit: 4.0, dash_pattern: Vec::new(), arc_data: None, path_data: String::new(),
            main_component: None, reactions: Vec::new(), layout: AutoLayout::default(),
        }
    }

    pub fn x(&self) -> f64 { self.transform.as_coeffs()[4] }
    pub fn y(&self) -> f64 { self.transform.as_coeffs()[5] }

    pub fn set_position(&mut self, x: f64, y: f64) {
        let [a, b, c, d, _, _] = self.transform.as_coeffs();
        self.transform = Affine::new([a, b, c, d, x, y]);
    }

    /// Outline in the node's own coordinates, for shapes that have one.
    pub fn local_path(&self) -> Option<BezPath> {
        match self.kind {
            NodeKind::Ellipse => {
                let arc = self.arc_data.unwrap_or(ArcData { starting_angle: 0.0, ending_angle: TAU, inner_radius: 0.0 });
                Some(arc_path(self.width, self.height, &arc))
            }
            NodeKind::Vector => BezPath::from_svg(&self.path_data).ok(),
            _ => None,
        }
    }

    /// Axis-aligned bounds of the transformed node in its parent's space.
    pub fn bounds(&self) -> Rect {
        let corners = [
            Point::new(0.0, 0.0), Point::new(self.width, 0.0),
            Point::new(self.width, self.height), Point::new(0.0, self.height),
        ];
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for corner in corners {
            let p = self.transform * corner;
            if p.x < min_x { min_x = p.x; }
            if p.x > max_x { max_x = p.x; }
            if p.y < min_y { min_y = p.y; }
            if p.y > max_y { max_y = p.y; }
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    pub fn style(&self, attribute: StyleAttribute) -> StyleValue {
        match attribute {
            StyleAttribute::Opacity => StyleValue::Opacity(self.opacity),
            StyleAttribute::BlendMode => StyleValue::BlendMode(self.blend_mode),
            StyleAttribute::IsMask => StyleValue::IsMask(self.is_mask),
            StyleAttribute::Effects => StyleValue::Effects(self.effects.clone()),
            StyleAttribute::EffectStyleId => StyleValue::EffectStyleId(self.effect_style_id.clone()),
            StyleAttribute::CornerRadius => StyleValue::CornerRadius(self.corner_radius),
            StyleAttribute::CornerSmoothing => StyleValue::CornerSmoothing(self.corner_smoothing),
            StyleAttribute::Fills => StyleValue::Fills(self.fills.clone()),
            StyleAttribute::FillStyleId => StyleValue::FillStyleId(self.fill_style_id.clone()),
            StyleAttribute::Strokes => StyleValue::Strokes(self.strokes.clone()),
            StyleAttribute::StrokeStyleId => StyleValue::StrokeStyleId(self.stroke_style_id.clone()),
            StyleAttribute::StrokeWeight => StyleValue::StrokeWeight(self.stroke_weight),
            StyleAttribute::StrokeJoin => StyleValue::StrokeJoin(self.stroke_join),
            StyleAttribute::StrokeAlign => StyleValue::StrokeAlign(self.stroke_align),
            StyleAttribute::StrokeCap => StyleValue::StrokeCap(self.stroke_cap),
            StyleAttribute::StrokeMiterLimit => StyleValue::StrokeMiterLimit(self.stroke_miter_limit),
            StyleAttribute::DashPattern => StyleValue::DashPattern(self.dash_pattern.clone()),
        }
    }

    pub fn apply_style(&mut self, value: StyleValue) {
        match value {
            StyleValue::Opacity(v) => self.opacity = v,
            StyleValue::BlendMode(v) => self.blend_mode = v,
            StyleValue::IsMask(v) => self.is_mask = v,
            StyleValue::Effects(v) => self.effects = v,
            StyleValue::EffectStyleId(v) => self.effect_style_id = v,
            StyleValue::CornerRadius(v) => self.corner_radius = v,
            StyleValue::CornerSmoothing(v) => self.corner_smoothing = v,
            StyleValue::Fills(v) => self.fills = v,
            StyleValue::FillStyleId(v) => self.fill_style_id = v,
            StyleValue::Strokes(v) => self.strokes = v,
            StyleValue::StrokeStyleId(v) => self.stroke_style_id = v,
            StyleValue::StrokeWeight(v) => self.stroke_weight = v,
            StyleValue::StrokeJoin(v) => self.stroke_join = v,
            StyleValue::StrokeAlign(v) => self.stroke_align = v,
            StyleValue::StrokeCap(v) => self.stroke_cap = v,
            StyleValue::StrokeMiterLimit(v) => self.stroke_miter_limit = v,
            StyleValue::DashPattern(v) => self.dash_pattern = v,
        }
    }
}

fn point_on(center: Point, radii: Vec2, angle: f64) -> Point {
    Point::new(center.x + radii.x * angle.cos(), center.y + radii.y * angle.sin())
}

fn push_arc(path: &mut BezPath, center: Point, radii: Vec2, start_angle: f64, sweep_angle: f64) {
    let arc = Arc { center, radii, start_angle, sweep_angle, x_rotation: 0.0 };
    for el in arc.append_iter(ARC_TOLERANCE) {
        path.push(el);
    }
}

/// Outline of an ellipse arc inscribed in `width` x `height`: a pie slice when the inner radius
/// is zero, an annular sector otherwise, a full disk or ring once the sweep reaches a turn.
pub fn arc_path(width: f64, height: f64, arc: &ArcData) -> BezPath {
    let center = Point::new(width / 2.0, height / 2.0);
    let outer = Vec2::new(width / 2.0, height / 2.0);
    let inner = outer * arc.inner_radius.clamp(0.0, 1.0);
    let start = arc.starting_angle;
    let end = arc.ending_angle;
    let sweep = end - start;

    let mut path = BezPath::new();
    if sweep.abs() >= TAU {
        path.move_to(point_on(center, outer, start));
        push_arc(&mut path, center, outer, start, TAU);
        path.close_path();
        if inner.x > 0.0 && inner.y > 0.0 {
            path.move_to(point_on(center, inner, start));
            push_arc(&mut path, center, inner, start, -TAU);
            path.close_path();
        }
    } else if inner.x <= 0.0 || inner.y <= 0.0 {
        path.move_to(center);
        path.line_to(point_on(center, outer, start));
        push_arc(&mut path, center, outer, start, sweep);
        path.close_path();
    } else {
        path.move_to(point_on(center, inner, start));
        path.line_to(point_on(center, outer, start));
        push_arc(&mut path, center, outer, start, sweep);
        path.line_to(point_on(center, inner, end));
        push_arc(&mut path, center, inner, end, -sweep);
        path.close_path();
    }
    path
}
