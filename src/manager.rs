use kurbo::Point;
use crate::builder::{RadialBuilder, RadialEntity};
use crate::config::RadialConfig;
use crate::error::RadialError;
use crate::migration::{migrate, MigrationReport};
use crate::scene::{NodeId, Parent, SceneGraph, SceneResult};
use crate::settings::EngineSettings;
use crate::types::{AutoLayout, StyleValue};

pub const PANEL_NAME: &str = "Radial Components";

pub fn display_name(index: usize) -> String {
    format!("Radial {}", index + 1)
}

/// Owns the ordered list of radials and the shared components panel, and keeps the canvas in
/// step with both. Radials are addressed by their position in the list.
pub struct RadialManager<S: SceneGraph> {
    scene: S,
    radials: Vec<RadialEntity>,
    components_frame: Option<NodeId>,
    settings: EngineSettings,
}

impl<S: SceneGraph> RadialManager<S> {
    pub fn new(scene: S) -> Self {
        RadialManager::with_settings(scene, EngineSettings::default())
    }

    pub fn with_settings(scene: S, settings: EngineSettings) -> Self {
        RadialManager { scene, radials: Vec::new(), components_frame: None, settings }
    }

    pub fn scene(&self) -> &S { &self.scene }
    pub fn scene_mut(&mut self) -> &mut S { &mut self.scene }
    pub fn radials(&self) -> &[RadialEntity] { &self.radials }
    pub fn components_frame(&self) -> Option<NodeId> { self.components_frame }
    pub fn settings(&self) -> &EngineSettings { &self.settings }

    /// New settings apply to radials built from now on.
    pub fn set_settings(&mut self, settings: EngineSettings) {
        self.settings = settings;
    }

    /// Builds a radial from the default config and appends it.
    pub fn add(&mut self) -> Result<RadialConfig, RadialError> {
        let config = self.settings.default_radial;
        let index = self.radials.len();
        let entity = self.build(&config, index)?;

        let anchor = self.radials.first().copied().filter(|first| self.scene.is_live(first.container()));
        let placed = match anchor {
            Some(first) => self.center_at_radial(&entity, &first),
            None => self.center_in_viewport(&entity),
        };
        self.commit_placement(&entity, placed)?;

        self.radials.push(entity);
        log::debug!("added {}", display_name(index));
        self.housekeeping();
        Ok(config)
    }

    /// Rebuilds the radial at `index` from its config and inserts the copy right after it.
    pub fn duplicate(&mut self, index: usize) -> Result<RadialConfig, RadialError> {
        let source = self.entry(index)?;
        let entity = self.build(source.config(), index + 1)?;
        let placed = self.place_next_to(&entity, &source);
        self.commit_placement(&entity, placed)?;

        self.radials.insert(index + 1, entity);
        log::debug!("duplicated {} into {}", display_name(index), display_name(index + 1));
        self.housekeeping();
        Ok(*source.config())
    }

    /// Replaces the radial at `index` by one built from `config`, carrying its styles over.
    pub fn update(&mut self, index: usize, config: RadialConfig) -> Result<MigrationReport, RadialError> {
        let old = self.entry(index)?;
        let entity = self.build(&config, index)?;
        let placed = self.place_next_to(&entity, &old);
        self.commit_placement(&entity, placed)?;

        let report = migrate(&mut self.scene, &old, &entity);
        self.radials[index] = entity;
        self.dispose(&old);
        log::debug!("updated {}, {} styles copied, {} skipped", display_name(index), report.copied, report.failures.len());
        self.housekeeping();
        Ok(report)
    }

    pub fn remove(&mut self, index: usize) -> Result<RadialEntity, RadialError> {
        self.entry(index)?;
        let entity = self.radials.remove(index);
        self.dispose(&entity);
        log::debug!("removed radial at {}", index);
        self.housekeeping();
        Ok(entity)
    }

    /// Renames every live radial after its position and puts the component sets into the panel in
    /// list order, creating the panel on demand and dropping it once the list is empty. Running it
    /// again changes nothing.
    pub fn housekeeping(&mut self) {
        for (index, radial) in self.radials.iter().enumerate() {
            let name = display_name(index);
            if self.scene.is_live(radial.container()) {
                if let Err(e) = self.scene.set_name(radial.container(), &name) {
                    log::warn!("could not rename {}: {}", radial.container(), e);
                }
            }
            if self.scene.is_live(radial.component_set()) {
                if let Err(e) = self.scene.set_name(radial.component_set(), &format!("{} Segments", name)) {
                    log::warn!("could not rename {}: {}", radial.component_set(), e);
                }
            }
        }

        if self.radials.is_empty() {
            self.remove_panel();
            return;
        }

        let panel = match self.ensure_panel() {
            Ok(panel) => panel,
            Err(e) => {
                log::warn!("components panel unavailable: {}", e);
                return;
            }
        };

        let mut slot = 0;
        for radial in &self.radials {
            let set = radial.component_set();
            if !self.scene.is_live(set) {
                continue;
            }
            let in_place = matches!(self.scene.location(set), Ok((Parent::Node(p), i)) if p == panel && i == slot);
            if !in_place {
                if let Err(e) = self.scene.insert_child(Parent::Node(panel), slot, set) {
                    log::warn!("could not move {} into the components panel: {}", set, e);
                    continue;
                }
            }
            slot += 1;
        }
    }

    fn entry(&self, index: usize) -> Result<RadialEntity, RadialError> {
        self.radials.get(index).copied().ok_or(RadialError::IndexOutOfBounds { index, len: self.radials.len() })
    }

    fn build(&mut self, config: &RadialConfig, index: usize) -> Result<RadialEntity, RadialError> {
        RadialBuilder::new(&self.settings).build(&mut self.scene, config, &display_name(index))
    }

    /// Drops a freshly built radial whose placement failed.
    fn commit_placement(&mut self, entity: &RadialEntity, placed: SceneResult<()>) -> Result<(), RadialError> {
        placed.map_err(|source| {
            self.dispose(entity);
            let err = RadialError::GeometryBuildFailed { step: "placing the radial", source };
            log::warn!("{}", err);
            err
        })
    }

    /// Puts `entity` after `anchor` in the anchor's parent, centred on it, or in the viewport when
    /// the anchor is gone.
    fn place_next_to(&mut self, entity: &RadialEntity, anchor: &RadialEntity) -> SceneResult<()> {
        if !self.scene.is_live(anchor.container()) {
            return self.center_in_viewport(entity);
        }
        let (parent, index) = self.scene.location(anchor.container())?;
        self.scene.insert_child(parent, index + 1, entity.container())?;
        self.center_at_radial(entity, anchor)
    }

    fn center_in_viewport(&mut self, entity: &RadialEntity) -> SceneResult<()> {
        let center = self.scene.viewport_center();
        self.center_at(entity, center)
    }

    fn center_at_radial(&mut self, entity: &RadialEntity, other: &RadialEntity) -> SceneResult<()> {
        let center = self.scene.bounds(other.container())?.center();
        self.center_at(entity, center)
    }

    fn center_at(&mut self, entity: &RadialEntity, center: Point) -> SceneResult<()> {
        let bounds = self.scene.bounds(entity.container())?;
        self.scene.set_position(entity.container(), center.x - bounds.width() / 2.0, center.y - bounds.height() / 2.0)
    }

    /// Removes a radial's nodes. Failures are logged; the radial is considered gone either way.
    fn dispose(&mut self, entity: &RadialEntity) {
        for node in [entity.container(), entity.component_set()] {
            if let Err(source) = self.scene.remove(node) {
                log::warn!("{}", RadialError::NodeRemovalFailed { node, source });
            }
        }
    }

    fn ensure_panel(&mut self) -> SceneResult<NodeId> {
        if let Some(panel) = self.components_frame.filter(|&p| self.scene.is_live(p)) {
            return Ok(panel);
        }
        let panel = self.scene.create_container()?;
        if let Err(e) = self.setup_panel(panel) {
            if let Err(cleanup) = self.scene.remove(panel) {
                log::warn!("could not discard half-built panel {}: {}", panel, cleanup);
            }
            return Err(e);
        }
        log::debug!("created components panel {}", panel);
        self.components_frame = Some(panel);
        Ok(panel)
    }

    fn setup_panel(&mut self, panel: NodeId) -> SceneResult<()> {
        self.scene.set_name(panel, PANEL_NAME)?;
        self.scene.set_style_attribute(panel, StyleValue::Fills(Vec::new()))?;
        self.scene.set_auto_layout(panel, AutoLayout::horizontal(self.settings.panel_spacing))?;
        let first = self.radials.iter().find(|r| self.scene.is_live(r.container())).map(|r| r.container());
        if let Some(container) = first {
            let bounds = self.scene.bounds(container)?;
            self.scene.set_position(panel, bounds.x1 + self.settings.panel_margin, bounds.y0)?;
        }
        Ok(())
    }

    fn remove_panel(&mut self) {
        let Some(panel) = self.components_frame.take() else { return };
        if self.scene.is_live(panel) {
            if let Err(source) = self.scene.remove(panel) {
                log::warn!("{}", RadialError::NodeRemovalFailed { node: panel, source });
            }
        }
    }
}
