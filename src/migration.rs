use crate::builder::RadialEntity;
use crate::error::RadialError;
use crate::scene::{NodeId, SceneError, SceneGraph, SceneResult};
use crate::types::StyleAttribute;

/// Outcome of copying styles between two radials.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationReport {
    /// Attributes written to the new variants.
    pub copied: usize,
    /// Attributes that were skipped, one entry each.
    pub failures: Vec<RadialError>,
}

impl MigrationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The segment shape of each variant of `component_set`, in variant order. A variant whose shape
/// is gone keeps its slot as an error.
pub fn variant_segments<S: SceneGraph + ?Sized>(scene: &S, component_set: NodeId) -> Vec<SceneResult<NodeId>> {
    let Ok(variants) = scene.children(component_set) else { return Vec::new() };
    variants
        .into_iter()
        .map(|variant| scene.children(variant)?.first().copied().ok_or(SceneError::EmptySelection))
        .collect()
}

/// Copies the cosmetic attributes of `from`'s variants onto `to`'s, pairing variants by index.
/// A failed attribute is logged and skipped; the rest still go through.
pub fn migrate<S: SceneGraph + ?Sized>(scene: &mut S, from: &RadialEntity, to: &RadialEntity) -> MigrationReport {
    let mut report = MigrationReport::default();
    if !scene.is_live(from.component_set()) {
        log::debug!("nothing to migrate, {} is gone", from.component_set());
        return report;
    }

    let sources = variant_segments(scene, from.component_set());
    let targets = variant_segments(scene, to.component_set());
    if sources.len() != targets.len() {
        log::warn!("variant count changed from {} to {}, migrating the common prefix", sources.len(), targets.len());
    }

    for (variant, pair) in sources.into_iter().zip(targets).enumerate() {
        let (source, target) = match pair {
            (Ok(source), Ok(target)) => (source, target),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("skipping variant {}: {}", variant, e);
                report.failures.extend(StyleAttribute::MIGRATED.into_iter().map(|attribute| {
                    RadialError::VisualAttributeCopyFailed { attribute, variant, source: e.clone() }
                }));
                continue;
            }
        };
        for attribute in StyleAttribute::MIGRATED {
            let copied = scene
                .style_attribute(source, attribute)
                .and_then(|value| scene.set_style_attribute(target, value));
            match copied {
                Ok(()) => report.copied += 1,
                Err(source) => {
                    let err = RadialError::VisualAttributeCopyFailed { attribute, variant, source };
                    log::warn!("{}", err);
                    report.failures.push(err);
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RadialBuilder;
    use crate::canvas::Canvas;
    use crate::config::RadialConfig;
    use crate::scene::SceneError;
    use crate::settings::EngineSettings;
    use crate::types::{BlendMode, Paint, StyleValue};
    use pretty_assertions::assert_eq;

    fn shapes(canvas: &Canvas, component_set: NodeId) -> Vec<NodeId> {
        variant_segments(canvas, component_set).into_iter().map(Result::unwrap).collect()
    }

    fn two_radials(canvas: &mut Canvas) -> (RadialEntity, RadialEntity) {
        let settings = EngineSettings::default();
        let builder = RadialBuilder::new(&settings);
        let old = builder.build(canvas, &RadialConfig::default(), "Radial 1").unwrap();
        let new = builder
            .build(canvas, &RadialConfig { num_segments: 8, gap: 4.0, ..Default::default() }, "Radial 2")
            .unwrap();
        (old, new)
    }

    #[test]
    fn copies_cosmetics_but_not_stroke_weight() {
        let mut canvas = Canvas::new();
        let (old, new) = two_radials(&mut canvas);
        let old_shapes = shapes(&canvas, old.component_set());
        let new_shapes = shapes(&canvas, new.component_set());
        assert_eq!(old_shapes.len(), 2);

        let red = vec![Paint::solid("#ff0000")];
        canvas.set_style_attribute(old_shapes[1], StyleValue::Fills(red.clone())).unwrap();
        canvas.set_style_attribute(old_shapes[1], StyleValue::Opacity(0.4)).unwrap();
        canvas.set_style_attribute(old_shapes[0], StyleValue::BlendMode(BlendMode::Multiply)).unwrap();
        canvas.set_style_attribute(old_shapes[0], StyleValue::StrokeWeight(7.0)).unwrap();
        let new_path = canvas.node(new_shapes[0]).unwrap().path_data.clone();

        let report = migrate(&mut canvas, &old, &new);
        assert!(report.is_complete());
        assert_eq!(report.copied, 2 * StyleAttribute::MIGRATED.len());

        let focused = canvas.node(new_shapes[1]).unwrap();
        assert_eq!(focused.fills, red);
        assert_eq!(focused.opacity, 0.4);
        let unfocused = canvas.node(new_shapes[0]).unwrap();
        assert_eq!(unfocused.blend_mode, BlendMode::Multiply);
        assert_eq!(unfocused.stroke_weight, 1.0);
        assert_eq!(unfocused.path_data, new_path);
    }

    #[test]
    fn a_bad_style_reference_only_skips_itself() {
        let mut canvas = Canvas::new();
        let (old, new) = two_radials(&mut canvas);
        let old_shapes = shapes(&canvas, old.component_set());
        let new_shapes = shapes(&canvas, new.component_set());

        canvas.register_style("S:accent");
        canvas.set_style_attribute(old_shapes[0], StyleValue::FillStyleId(Some("S:accent".to_string()))).unwrap();
        canvas.set_style_attribute(old_shapes[0], StyleValue::CornerRadius(3.0)).unwrap();
        canvas.unregister_style("S:accent");

        let report = migrate(&mut canvas, &old, &new);
        assert_eq!(
            report.failures,
            vec![RadialError::VisualAttributeCopyFailed {
                attribute: StyleAttribute::FillStyleId,
                variant: 0,
                source: SceneError::UnknownStyle("S:accent".to_string()),
            }]
        );
        assert_eq!(report.copied, 2 * StyleAttribute::MIGRATED.len() - 1);
        assert_eq!(canvas.node(new_shapes[0]).unwrap().corner_radius, 3.0);
    }

    #[test]
    fn a_variant_without_a_shape_keeps_the_others_paired() {
        let mut canvas = Canvas::new();
        let (old, new) = two_radials(&mut canvas);
        let old_shapes = shapes(&canvas, old.component_set());
        let new_shapes = shapes(&canvas, new.component_set());
        let red = vec![Paint::solid("#ff0000")];
        canvas.set_style_attribute(old_shapes[1], StyleValue::Fills(red.clone())).unwrap();
        canvas.remove(old_shapes[0]).unwrap();
        let unfocused_fills = canvas.node(new_shapes[0]).unwrap().fills.clone();

        let report = migrate(&mut canvas, &old, &new);
        assert_eq!(report.copied, StyleAttribute::MIGRATED.len());
        assert_eq!(report.failures.len(), StyleAttribute::MIGRATED.len());
        assert!(report.failures.iter().all(|e| matches!(
            e,
            RadialError::VisualAttributeCopyFailed { variant: 0, source: SceneError::EmptySelection, .. }
        )));
        assert_eq!(canvas.node(new_shapes[0]).unwrap().fills, unfocused_fills);
        assert_eq!(canvas.node(new_shapes[1]).unwrap().fills, red);
    }

    #[test]
    fn missing_source_is_a_no_op() {
        let mut canvas = Canvas::new();
        let (old, new) = two_radials(&mut canvas);
        canvas.remove(old.component_set()).unwrap();
        assert_eq!(migrate(&mut canvas, &old, &new), MigrationReport::default());
    }
}
