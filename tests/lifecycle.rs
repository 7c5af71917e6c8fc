use kurbo::Point;
use pretty_assertions::assert_eq;
use radial_engine::geometry::{arc_angle, arc_distance, transform_angle};
use radial_engine::manager::PANEL_NAME;
use radial_engine::types::StyleValue;
use radial_engine::{Canvas, Confirmation, Intent, RadialConfig, RadialError, RadialManager, SceneError, SceneGraph};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn manager() -> RadialManager<Canvas> {
    init();
    let mut canvas = Canvas::new();
    canvas.set_viewport_center(Point::new(0.0, 0.0));
    RadialManager::new(canvas)
}

fn names(manager: &RadialManager<Canvas>) -> Vec<String> {
    manager
        .radials()
        .iter()
        .map(|r| manager.scene().node(r.container()).unwrap().name.clone())
        .collect()
}

fn updated() -> RadialConfig {
    RadialConfig { size: 800.0, num_segments: 8, sweep: 360.0, rotation: 0.0, inner_offset: 0.3, gap: 4.0 }
}

#[test]
fn add_duplicate_update_remove() {
    let mut manager = manager();

    assert_eq!(manager.handle(Intent::Add).unwrap(), Confirmation::Added { config: RadialConfig::default() });
    assert_eq!(names(&manager), ["Radial 1"]);

    assert_eq!(
        manager.handle(Intent::Duplicate { index: 0 }).unwrap(),
        Confirmation::Duplicated { index: 1, config: RadialConfig::default() }
    );
    assert_eq!(names(&manager), ["Radial 1", "Radial 2"]);

    manager.handle(Intent::Update { index: 1, config: updated() }).unwrap();
    let configs: Vec<RadialConfig> = manager.radials().iter().map(|r| *r.config()).collect();
    assert_eq!(configs, [RadialConfig::default(), updated()]);
    assert_eq!(names(&manager), ["Radial 1", "Radial 2"]);
    let segments = manager.scene().children(manager.radials()[1].container()).unwrap();
    assert_eq!(segments.len(), 8);

    assert_eq!(manager.handle(Intent::Remove { index: 0 }).unwrap(), Confirmation::Removed { index: 0 });
    assert_eq!(manager.radials().len(), 1);
    assert_eq!(*manager.radials()[0].config(), updated());
    assert_eq!(names(&manager), ["Radial 1"]);
    let set = manager.radials()[0].component_set();
    assert_eq!(manager.scene().node(set).unwrap().name, "Radial 1 Segments");

    let panel = manager.components_frame().unwrap();
    assert_eq!(manager.scene().node(panel).unwrap().name, PANEL_NAME);
    assert_eq!(manager.scene().children(panel).unwrap(), vec![set]);

    manager.handle(Intent::Remove { index: 0 }).unwrap();
    assert!(manager.radials().is_empty());
    assert!(manager.components_frame().is_none());
    assert!(manager.scene().page_children().is_empty());
}

#[test]
fn update_keeps_styles_and_other_radials() {
    let mut manager = manager();
    manager.add().unwrap();
    manager.add().unwrap();
    manager.add().unwrap();

    let focused_shape = |m: &RadialManager<Canvas>, i: usize| {
        let variants = m.scene().children(m.radials()[i].component_set()).unwrap();
        m.scene().children(variants[1]).unwrap()[0]
    };
    let shape = focused_shape(&manager, 1);
    manager.scene_mut().set_style_attribute(shape, StyleValue::Opacity(0.25)).unwrap();
    let untouched = [manager.radials()[0], manager.radials()[2]];

    let report = manager.update(1, RadialConfig { num_segments: 12, ..Default::default() }).unwrap();
    assert!(report.is_complete());
    assert_eq!([manager.radials()[0], manager.radials()[2]], untouched);
    assert_eq!(manager.radials()[1].config().num_segments, 12);
    assert_eq!(manager.scene().node(focused_shape(&manager, 1)).unwrap().opacity, 0.25);
    assert_eq!(names(&manager), ["Radial 1", "Radial 2", "Radial 3"]);

    let panel = manager.components_frame().unwrap();
    let expected: Vec<_> = manager.radials().iter().map(|r| r.component_set()).collect();
    assert_eq!(manager.scene().children(panel).unwrap(), expected);
}

#[test]
fn update_survives_a_missing_style() {
    let mut manager = manager();
    manager.add().unwrap();
    let variants = manager.scene().children(manager.radials()[0].component_set()).unwrap();
    let shape = manager.scene().children(variants[0]).unwrap()[0];
    manager.scene_mut().register_style("S:brand");
    manager.scene_mut().set_style_attribute(shape, StyleValue::StrokeStyleId(Some("S:brand".into()))).unwrap();
    manager.scene_mut().unregister_style("S:brand");

    let report = manager.update(0, RadialConfig { gap: 0.0, ..Default::default() }).unwrap();
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        &report.failures[0],
        RadialError::VisualAttributeCopyFailed { variant: 0, source: SceneError::UnknownStyle(s), .. } if s == "S:brand"
    ));
    assert_eq!(manager.radials()[0].config().gap, 0.0);
}

#[test]
fn rejected_intents_leave_everything_as_it_was() {
    let mut manager = manager();
    manager.add().unwrap();
    let radials = manager.radials().to_vec();
    let nodes = manager.scene().nodes().to_vec();

    let live = nodes.len();
    manager.scene_mut().set_node_limit(Some(live + 6));
    assert!(matches!(manager.handle(Intent::Add), Err(RadialError::GeometryBuildFailed { .. })));
    assert!(matches!(manager.handle(Intent::Duplicate { index: 0 }), Err(RadialError::GeometryBuildFailed { .. })));
    assert!(matches!(manager.handle(Intent::Duplicate { index: 4 }), Err(RadialError::IndexOutOfBounds { index: 4, len: 1 })));

    assert_eq!(manager.radials(), &radials[..]);
    assert_eq!(manager.scene().nodes(), &nodes[..]);

    manager.scene_mut().set_node_limit(None);
    manager.handle(Intent::Add).unwrap();
    assert_eq!(names(&manager), ["Radial 1", "Radial 2"]);
}

#[test]
fn segments_follow_rotation_and_sweep() {
    let mut manager = manager();
    let config = RadialConfig { num_segments: 5, sweep: 200.0, rotation: 15.0, ..Default::default() };
    manager.add().unwrap();
    manager.update(0, config).unwrap();

    let segments = manager.scene().children(manager.radials()[0].container()).unwrap();
    assert_eq!(segments.len(), 5);
    for (i, id) in segments.iter().enumerate() {
        let angle = transform_angle(manager.scene().node(*id).unwrap().transform);
        let expected = (15.0 + i as f64 * 40.0).to_radians();
        assert!((angle.to_radians().cos() - expected.cos()).abs() < 1e-9);
        assert!((angle.to_radians().sin() - expected.sin()).abs() < 1e-9);
    }
}

#[test]
fn chord_and_angle_invert_each_other() {
    for radius in [0.5, 1.0, 37.0, 320.0, 1e4] {
        for step in 0..=20 {
            let distance = 2.0 * radius * step as f64 / 20.0;
            let back = arc_distance(radius, arc_angle(radius, distance).unwrap());
            assert!((back - distance).abs() <= 1e-9 * distance.max(1.0), "r={radius} d={distance} got {back}");
        }
    }
}
