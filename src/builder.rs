use kurbo::Point;
use crate::config::RadialConfig;
use crate::error::RadialError;
use crate::geometry::{arc_angle, degrees_to_radians, rotate_around_point};
use crate::scene::{NodeId, Parent, SceneGraph, MIN_DIMENSION};
use crate::settings::EngineSettings;
use crate::types::{ArcData, AutoLayout, Easing, Reaction, StyleValue, Transition, TransitionKind, Trigger};

/// One radial on the canvas: its config, the frame holding its segment instances and the
/// component set those instances are drawn from. Both nodes live and die together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialEntity {
    pub(crate) config: RadialConfig,
    pub(crate) container: NodeId,
    pub(crate) component_set: NodeId,
}

impl RadialEntity {
    pub fn config(&self) -> &RadialConfig { &self.config }
    pub fn container(&self) -> NodeId { self.container }
    pub fn component_set(&self) -> NodeId { self.component_set }
}

pub fn ensure_min_dimension(dimension: f64) -> f64 {
    if dimension >= MIN_DIMENSION { dimension } else { MIN_DIMENSION }
}

/// Numbers the builder derives from a config before touching the canvas. Angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentLayout {
    pub size: f64,
    pub gap: f64,
    pub segment_sweep: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl SegmentLayout {
    pub fn new(config: &RadialConfig) -> Result<Self, RadialError> {
        let size = ensure_min_dimension(config.size);
        let gap = config.gap.min(size);
        let segment_sweep = config.segment_sweep();
        let half_gap = arc_angle(size / 2.0, gap)? / 2.0;
        Ok(SegmentLayout {
            size,
            gap,
            segment_sweep,
            start_angle: half_gap,
            end_angle: (segment_sweep - half_gap).max(half_gap),
        })
    }

    /// Rotation of segment `index`, in degrees.
    pub fn segment_angle(&self, config: &RadialConfig, index: u32) -> f64 {
        config.rotation + index as f64 * self.segment_sweep
    }
}

pub struct RadialBuilder<'a> {
    settings: &'a EngineSettings,
}

impl<'a> RadialBuilder<'a> {
    pub fn new(settings: &'a EngineSettings) -> Self {
        RadialBuilder { settings }
    }

    /// Draws a radial for `config` into `scene`. On failure every node created so far is removed
    /// again before the error is returned.
    pub fn build<S: SceneGraph + ?Sized>(&self, scene: &mut S, config: &RadialConfig, name: &str) -> Result<RadialEntity, RadialError> {
        config.validate()?;
        let mut created = Vec::new();
        match self.build_nodes(scene, config, name, &mut created) {
            Ok(entity) => {
                log::debug!("built {} with {} segments", name, config.num_segments);
                Ok(entity)
            }
            Err(err) => {
                log::warn!("building {} failed, rolling back {} nodes: {}", name, created.len(), err);
                for &id in created.iter().rev() {
                    if scene.is_live(id) {
                        if let Err(e) = scene.remove(id) {
                            log::warn!("rollback could not remove {}: {}", id, e);
                        }
                    }
                }
                Err(err)
            }
        }
    }

    fn build_nodes<S: SceneGraph + ?Sized>(&self, scene: &mut S, config: &RadialConfig, name: &str, created: &mut Vec<NodeId>) -> Result<RadialEntity, RadialError> {
        let layout = SegmentLayout::new(config)?;
        let size = layout.size;

        let container = scene.create_container().map_err(RadialError::build("creating the container"))?;
        created.push(container);
        scene.set_name(container, name).map_err(RadialError::build("naming the container"))?;
        scene.set_style_attribute(container, StyleValue::Fills(Vec::new())).map_err(RadialError::build("clearing container fills"))?;
        scene.set_clips_content(container, false).map_err(RadialError::build("unclipping the container"))?;
        scene.resize(container, size, size).map_err(RadialError::build("sizing the container"))?;

        let arc = ArcData {
            starting_angle: degrees_to_radians(layout.start_angle),
            ending_angle: degrees_to_radians(layout.end_angle),
            inner_radius: config.inner_offset,
        };
        let ellipse = scene.create_arc_shape(size, arc).map_err(RadialError::build("creating the reference arc"))?;
        created.push(ellipse);
        scene.set_fill(ellipse, &self.settings.reference_fill).map_err(RadialError::build("filling the reference arc"))?;
        scene.append_child(Parent::Node(container), ellipse).map_err(RadialError::build("placing the reference arc"))?;
        scene.set_position(ellipse, 0.0, 0.0).map_err(RadialError::build("placing the reference arc"))?;

        // The arc's angles cannot be edited once flattened
        let path = scene.flatten_to_path(&[ellipse]).map_err(RadialError::build("flattening the reference arc"))?;
        created.push(path);

        let component_set = self.build_variants(scene, path, created)?;
        scene.set_name(component_set, &format!("{} Segments", name)).map_err(RadialError::build("naming the component set"))?;

        let origin = scene.bounds(path).map_err(RadialError::build("measuring the reference arc"))?.origin();
        let center = Point::new(size / 2.0, size / 2.0);

        let first = scene.create_instance(component_set).map_err(RadialError::build("instancing a segment"))?;
        created.push(first);
        scene.set_position(first, origin.x, origin.y).map_err(RadialError::build("placing a segment"))?;
        let mut segments = vec![first];
        for _ in 1..config.num_segments {
            let segment = scene.clone_node(first).map_err(RadialError::build("cloning a segment"))?;
            created.push(segment);
            segments.push(segment);
        }

        for (i, &segment) in segments.iter().enumerate() {
            let angle = layout.segment_angle(config, i as u32);
            scene.set_name(segment, &format!("Segment {}", i + 1)).map_err(RadialError::build("naming a segment"))?;
            scene.append_child(Parent::Node(container), segment).map_err(RadialError::build("placing a segment"))?;
            scene.set_transform(segment, rotate_around_point(origin, center, angle)).map_err(RadialError::build("rotating a segment"))?;
        }

        scene.remove(path).map_err(RadialError::build("discarding the reference path"))?;

        Ok(RadialEntity { config: *config, container, component_set })
    }

    /// Unfocused and focused variants of one segment, switching on hover.
    fn build_variants<S: SceneGraph + ?Sized>(&self, scene: &mut S, path: NodeId, created: &mut Vec<NodeId>) -> Result<NodeId, RadialError> {
        let bounds = scene.bounds(path).map_err(RadialError::build("measuring the reference arc"))?;
        let width = ensure_min_dimension(bounds.width());
        let height = ensure_min_dimension(bounds.height());

        let unfocused_segment = scene.clone_node(path).map_err(RadialError::build("copying the unfocused segment"))?;
        created.push(unfocused_segment);
        let unfocused = scene.create_component().map_err(RadialError::build("creating the unfocused variant"))?;
        created.push(unfocused);
        scene.set_name(unfocused, "Focused=No").map_err(RadialError::build("naming the unfocused variant"))?;
        scene.resize(unfocused, width, height).map_err(RadialError::build("sizing the unfocused variant"))?;
        scene.append_child(Parent::Node(unfocused), unfocused_segment).map_err(RadialError::build("filling the unfocused variant"))?;
        scene.set_position(unfocused_segment, 0.0, 0.0).map_err(RadialError::build("filling the unfocused variant"))?;

        let focused_segment = scene.clone_node(unfocused_segment).map_err(RadialError::build("copying the focused segment"))?;
        created.push(focused_segment);
        scene.set_fill(focused_segment, &self.settings.focused_fill).map_err(RadialError::build("highlighting the focused segment"))?;
        let focused = scene.create_component().map_err(RadialError::build("creating the focused variant"))?;
        created.push(focused);
        scene.set_name(focused, "Focused=Yes").map_err(RadialError::build("naming the focused variant"))?;
        scene.resize(focused, width, height).map_err(RadialError::build("sizing the focused variant"))?;
        scene.append_child(Parent::Node(focused), focused_segment).map_err(RadialError::build("filling the focused variant"))?;

        let component_set = scene.combine_as_variants(&[unfocused, focused]).map_err(RadialError::build("combining variants"))?;
        created.push(component_set);
        scene
            .set_auto_layout(component_set, AutoLayout::vertical(self.settings.variant_spacing, self.settings.variant_padding))
            .map_err(RadialError::build("laying out variants"))?;

        let hover = Reaction {
            trigger: Trigger::OnHover,
            destination: focused,
            transition: Transition {
                kind: TransitionKind::SmartAnimate,
                easing: Easing::EaseOut,
                duration: self.settings.hover_transition_secs,
            },
        };
        scene.set_reactions(unfocused, vec![hover]).map_err(RadialError::build("linking variants"))?;

        Ok(component_set)
    }
}
