//! Glue between map events and the overlay groups on a [`RenderSurface`].
//!
//! Each handled event recomputes the affected groups in full and installs
//! them through an [`OverlayInstaller`], so a group is always either the old
//! set or the new one.
//!
//! The controller owns the frame sequence. Events drained from any bus are
//! restamped in arrival order; events handed in directly keep their frame and
//! are ignored when older than the newest one already handled.

use foundation::geo::{LatLng, Viewport};
use layers::Layer;
use layers::cursor::CursorReadout;
use layers::grid::{GridCell, GridLayer};
use layers::objects::PointLayer;
use layers::sizing::{GridLock, GridSteps};
use layers::vector::GeometryLayer;
use runtime::metrics::{
    EVENTS_STALE, EVENTS_SUPERSEDED, GRID_CELLS, GRID_REGENERATIONS, GRID_SKIPPED, Metrics,
};
use runtime::{Event, EventBus, Frame, MapEvent, ViewToggle};
use scene::Store;
use tracing::{debug, info, warn};

use crate::options::ViewOptions;
use crate::overlay::OverlayInstaller;
use crate::surface::RenderSurface;

pub struct MapController<S: RenderSurface> {
    surface: S,
    store: Store,
    options: ViewOptions,
    lock: GridLock,
    grid: GridLayer,
    geometries: GeometryLayer,
    points: PointLayer,
    installer: OverlayInstaller,
    metrics: Metrics,
    /// Last settled viewport; the grid, lock capture and cursor all read it.
    viewport: Viewport,
    /// Newest frame handled so far.
    frame: Frame,
    cells: Vec<GridCell>,
}

impl<S: RenderSurface> MapController<S> {
    /// Build the controller and draw the initial state of every group.
    pub fn new(surface: S, store: Store, grid: GridLayer, options: ViewOptions) -> Self {
        let viewport = surface.viewport();
        let mut controller = Self {
            surface,
            store,
            options,
            lock: GridLock::Unlocked,
            grid,
            geometries: GeometryLayer::new(grid.classifier),
            points: PointLayer,
            installer: OverlayInstaller::new(),
            metrics: Metrics::new(),
            viewport,
            frame: Frame::default(),
            cells: Vec::new(),
        };

        if options.lock_grid {
            controller.lock.lock(&controller.grid.policy, viewport.zoom);
        }

        info!(
            geometries = controller.store.geometries().len(),
            points = controller.store.points().len(),
            "map controller ready"
        );

        let frame = controller.frame;
        controller.redraw_grid(frame);
        controller.redraw_geometries(frame);
        controller.redraw_points(frame);
        controller
    }

    /// Handle every pending event on `bus`, coalescing unhandled viewport changes.
    pub fn process(&mut self, bus: &mut EventBus) {
        let (events, superseded) = bus.drain_coalesced();
        if superseded > 0 {
            debug!(superseded, "coalesced viewport events");
            self.metrics
                .inc_counter(EVENTS_SUPERSEDED, superseded as u64);
        }
        for event in events {
            let frame = self.frame.next();
            self.handle(Event {
                frame,
                kind: event.kind,
            });
        }
    }

    /// Handle one event. Events older than the newest handled frame change nothing.
    pub fn handle(&mut self, event: Event) {
        if self.frame.is_newer_than(event.frame) {
            debug!(frame = event.frame.index, newest = self.frame.index, "ignoring stale event");
            self.metrics.inc_counter(EVENTS_STALE, 1);
            return;
        }
        self.frame = event.frame;

        match event.kind {
            MapEvent::ViewportSettled(viewport) => {
                self.viewport = viewport;
                self.redraw_grid(event.frame);
            }
            MapEvent::Toggle(toggle, on) => self.on_toggle(event.frame, toggle, on),
        }
    }

    fn on_toggle(&mut self, frame: Frame, toggle: ViewToggle, on: bool) {
        self.options.set(toggle, on);
        match toggle {
            ViewToggle::ShowPoints => self.redraw_points(frame),
            ViewToggle::ColorByDate => self.redraw_geometries(frame),
            ViewToggle::ShowGrid => {
                self.redraw_grid(frame);
                self.redraw_geometries(frame);
            }
            ViewToggle::LockGrid => {
                let zoom = self.viewport.zoom;
                let changed = self.lock.set_locked(on, &self.grid.policy, zoom);
                debug!(locked = on, zoom, changed, "grid lock toggled");
                if changed {
                    self.redraw_grid(frame);
                }
            }
        }
    }

    fn redraw_grid(&mut self, frame: Frame) {
        let name = self.grid.name();
        if !self.options.show_grid {
            if self.installer.retire(&mut self.surface, name, frame) {
                self.cells.clear();
            }
            return;
        }

        let viewport = self.viewport;
        let cells = match self.grid.try_generate(&viewport, &self.store, &self.lock) {
            Ok(cells) => {
                self.metrics.inc_counter(GRID_REGENERATIONS, 1);
                self.metrics.record_histogram(GRID_CELLS, cells.len() as u64);
                cells
            }
            Err(err) => {
                warn!(error = %err, zoom = viewport.zoom, "skipping grid regeneration");
                self.metrics.inc_counter(GRID_SKIPPED, 1);
                Vec::new()
            }
        };

        let drawables = self.grid.drawables(&cells);
        if self.installer.install(&mut self.surface, name, frame, drawables) {
            self.cells = cells;
        }
    }

    fn redraw_geometries(&mut self, frame: Frame) {
        let drawables = self.geometries.extract(
            &self.store,
            self.options.color_mode(),
            self.options.show_grid,
        );
        self.installer
            .install(&mut self.surface, self.geometries.name(), frame, drawables);
    }

    fn redraw_points(&mut self, frame: Frame) {
        let name = self.points.name();
        if self.options.show_points {
            let drawables = self.points.extract(&self.store);
            self.installer.install(&mut self.surface, name, frame, drawables);
        } else {
            self.installer.retire(&mut self.surface, name, frame);
        }
    }

    /// Steps of the grid currently drawn, if any.
    pub fn active_steps(&self) -> Option<GridSteps> {
        if !self.options.show_grid {
            return None;
        }
        self.grid.policy.steps(&self.viewport, &self.lock).ok()
    }

    pub fn cursor(&self, position: LatLng) -> CursorReadout {
        CursorReadout::new(position, self.active_steps())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn lock(&self) -> GridLock {
        self.lock
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
