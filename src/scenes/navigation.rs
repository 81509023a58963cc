use tracing::{debug, trace, warn};

use crate::core::Viewport;
use crate::error::VizResult;
use crate::render::{NavigationBar, Renderer, SceneHeader, SurfaceId, SurfaceSpec, TileSlot};

use super::registry::{SceneDescriptor, SceneRegistry};
use super::tile::{DrawTarget, PeriodicTask, TileEnv, TileRefresh, TileSpec};
use super::timer::{TimerId, TimerService};

/// Interval owned by the active scene.
#[derive(Debug)]
pub struct ActiveTimer {
    id: TimerId,
    surface: SurfaceId,
    slot: TileSlot,
    task: Box<dyn PeriodicTask>,
    ticks: u64,
}

impl ActiveTimer {
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    #[must_use]
    pub fn slot(&self) -> TileSlot {
        self.slot
    }

    /// Ticks delivered since the scene was entered.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[derive(Debug, Clone, Copy)]
struct MountedTile {
    slot: TileSlot,
    surface: SurfaceId,
    viewport: Viewport,
    spec: TileSpec,
}

/// Scene index plus the timer resource of the active scene.
#[derive(Debug)]
pub struct NavigationState {
    current: usize,
    active_timer: Option<ActiveTimer>,
}

/// Moves through the scene registry and keeps the rendered scene in sync.
///
/// Entering a scene always releases the previous scene's timer before its
/// output is torn down, so no tick of an old scene can interleave with the
/// new one.
#[derive(Debug)]
pub struct NavigationController {
    registry: SceneRegistry,
    state: NavigationState,
    mounted: Vec<MountedTile>,
    total_ticks: u64,
}

impl NavigationController {
    #[must_use]
    pub fn new(registry: SceneRegistry) -> Self {
        Self {
            registry,
            state: NavigationState {
                current: 0,
                active_timer: None,
            },
            mounted: Vec::new(),
            total_ticks: 0,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current
    }

    #[must_use]
    pub fn current_scene(&self) -> Option<&SceneDescriptor> {
        self.registry.get(self.state.current)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.state.current > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.state.current + 1 < self.registry.len()
    }

    #[must_use]
    pub fn active_timer(&self) -> Option<&ActiveTimer> {
        self.state.active_timer.as_ref()
    }

    /// Ticks delivered to any scene over the controller's lifetime.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    #[must_use]
    pub fn mounted_slots(&self) -> Vec<TileSlot> {
        self.mounted.iter().map(|tile| tile.slot).collect()
    }

    #[must_use]
    pub fn navigation_bar(&self) -> NavigationBar {
        self.navigation_bar_at(self.state.current)
    }

    fn navigation_bar_at(&self, position: usize) -> NavigationBar {
        let title_at = |index: usize| self.registry.get(index).map(|scene| scene.title.to_owned());
        NavigationBar {
            previous: position.checked_sub(1).and_then(title_at),
            next: title_at(position + 1),
            position,
            total: self.registry.len(),
        }
    }

    /// Advances one scene. Returns `false` without side effects on the last scene.
    pub fn next<R, T>(
        &mut self,
        renderer: &mut R,
        timers: &mut T,
        env: &TileEnv<'_>,
    ) -> VizResult<bool>
    where
        R: Renderer,
        T: TimerService,
    {
        if !self.has_next() {
            trace!(index = self.state.current, "next ignored at last scene");
            return Ok(false);
        }
        self.enter(self.state.current + 1, renderer, timers, env)?;
        Ok(true)
    }

    /// Goes back one scene. Returns `false` without side effects on the first scene.
    pub fn previous<R, T>(
        &mut self,
        renderer: &mut R,
        timers: &mut T,
        env: &TileEnv<'_>,
    ) -> VizResult<bool>
    where
        R: Renderer,
        T: TimerService,
    {
        if !self.has_previous() {
            trace!("previous ignored at first scene");
            return Ok(false);
        }
        self.enter(self.state.current - 1, renderer, timers, env)?;
        Ok(true)
    }

    /// Re-renders the current scene from scratch.
    pub fn render_current<R, T>(
        &mut self,
        renderer: &mut R,
        timers: &mut T,
        env: &TileEnv<'_>,
    ) -> VizResult<()>
    where
        R: Renderer,
        T: TimerService,
    {
        self.enter(self.state.current, renderer, timers, env)
    }

    /// Tears down the current scene and mounts the scene at `index`.
    ///
    /// The index only moves once every tile has rendered. On failure the
    /// partial output is cleared, any timer it started is released and the
    /// controller stays on its previous index, so `render_current` restores it.
    fn enter<R, T>(
        &mut self,
        index: usize,
        renderer: &mut R,
        timers: &mut T,
        env: &TileEnv<'_>,
    ) -> VizResult<()>
    where
        R: Renderer,
        T: TimerService,
    {
        let Some(scene) = self.registry.get(index).cloned() else {
            warn!(index, scenes = self.registry.len(), "scene index out of range");
            return Ok(());
        };

        self.release_timer(timers);
        renderer.clear_scene()?;
        self.mounted.clear();
        debug!(index, title = scene.title, tiles = scene.tiles.len(), "enter scene");

        if let Err(err) = self.mount(index, &scene, renderer, timers, env) {
            warn!(index, title = scene.title, error = %err, "scene failed to render; rolling back");
            self.release_timer(timers);
            self.mounted.clear();
            if let Err(clear_err) = renderer.clear_scene() {
                warn!(error = %clear_err, "could not clear the partial scene");
            }
            return Err(err);
        }
        self.state.current = index;
        Ok(())
    }

    fn mount<R, T>(
        &mut self,
        index: usize,
        scene: &SceneDescriptor,
        renderer: &mut R,
        timers: &mut T,
        env: &TileEnv<'_>,
    ) -> VizResult<()>
    where
        R: Renderer,
        T: TimerService,
    {
        renderer.render_header(&SceneHeader {
            title: scene.title.to_owned(),
            description: scene.description_text(),
            navigation: self.navigation_bar_at(index),
        })?;

        for (slot, spec) in scene.tiles.iter() {
            let viewport = env.config.tile_viewport(spec.size);
            let surface = renderer.create_surface(&SurfaceSpec {
                slot,
                title: spec.title.map(str::to_owned),
                viewport,
            })?;
            let target = DrawTarget {
                surface,
                slot,
                viewport,
            };
            let output = (spec.render)(env, &target)?;
            renderer.render(surface, &output.frame)?;
            self.mounted.push(MountedTile {
                slot,
                surface,
                viewport,
                spec: *spec,
            });
            if let Some(task) = output.task {
                self.install_timer(timers, surface, slot, task);
            }
        }
        Ok(())
    }

    fn install_timer<T: TimerService>(
        &mut self,
        timers: &mut T,
        surface: SurfaceId,
        slot: TileSlot,
        task: Box<dyn PeriodicTask>,
    ) {
        if self.state.active_timer.is_some() {
            warn!(%slot, "scene started a second periodic task; replacing the first");
            self.release_timer(timers);
        }
        let id = timers.start_interval(task.period());
        debug!(%id, %slot, period_ms = task.period().as_millis() as u64, "timer started");
        self.state.active_timer = Some(ActiveTimer {
            id,
            surface,
            slot,
            task,
            ticks: 0,
        });
    }

    /// Cancels the active timer, if any. Safe to call repeatedly.
    pub fn release_timer<T: TimerService>(&mut self, timers: &mut T) {
        if let Some(active) = self.state.active_timer.take() {
            let was_running = timers.cancel(active.id);
            debug!(id = %active.id, ticks = active.ticks, was_running, "timer released");
        }
    }

    /// Delivers one timer firing. Firings of released timers are ignored.
    pub fn on_timer<R: Renderer>(
        &mut self,
        id: TimerId,
        renderer: &mut R,
        env: &TileEnv<'_>,
    ) -> VizResult<bool> {
        let Some(active) = self
            .state
            .active_timer
            .as_mut()
            .filter(|active| active.id == id)
        else {
            trace!(%id, "ignoring firing of a released timer");
            return Ok(false);
        };

        active.ticks += 1;
        self.total_ticks += 1;
        trace!(%id, ticks = active.ticks, "timer tick");
        if let Some(transition) = active.task.tick(env)? {
            renderer.apply(active.surface, &transition)?;
        }
        Ok(true)
    }

    /// Redraws mounted tiles that follow the given refresh policy.
    ///
    /// Returns how many tiles were drawn.
    pub fn refresh<R: Renderer>(
        &mut self,
        policy: TileRefresh,
        renderer: &mut R,
        env: &TileEnv<'_>,
    ) -> VizResult<usize> {
        let mut redrawn = 0;
        for tile in self.mounted.iter().filter(|tile| tile.spec.refresh == policy) {
            let target = DrawTarget {
                surface: tile.surface,
                slot: tile.slot,
                viewport: tile.viewport,
            };
            let output = (tile.spec.render)(env, &target)?;
            if output.task.is_some() {
                warn!(slot = %tile.slot, "dropping periodic task returned by a refresh");
            }
            renderer.render(tile.surface, &output.frame)?;
            redrawn += 1;
        }
        trace!(?policy, redrawn, "refresh tiles");
        Ok(redrawn)
    }
}
