use std::collections::BTreeMap;

use foundation::geo::Viewport;
use scene::components::Drawable2D;

/// The map widget the engine draws into.
pub trait RenderSurface {
    /// Bounds and zoom currently shown.
    fn viewport(&self) -> Viewport;

    /// Attach a named overlay group.
    fn add_overlay(&mut self, name: &str, primitives: Vec<Drawable2D>);

    /// Detach a named overlay group. Returns false when nothing was attached.
    fn remove_overlay(&mut self, name: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Added { name: String, primitives: usize },
    Removed { name: String },
}

/// Surface that keeps overlays in memory and records every operation.
///
/// Used headless by the CLI and by tests.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport: Viewport,
    overlays: BTreeMap<String, Vec<Drawable2D>>,
    ops: Vec<SurfaceOp>,
}

impl MemorySurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            overlays: BTreeMap::new(),
            ops: Vec::new(),
        }
    }

    /// Simulate the user panning or zooming.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn overlay(&self, name: &str) -> Option<&[Drawable2D]> {
        self.overlays.get(name).map(Vec::as_slice)
    }

    pub fn overlays(&self) -> &BTreeMap<String, Vec<Drawable2D>> {
        &self.overlays
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }
}

impl RenderSurface for MemorySurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_overlay(&mut self, name: &str, primitives: Vec<Drawable2D>) {
        self.ops.push(SurfaceOp::Added {
            name: name.to_string(),
            primitives: primitives.len(),
        });
        self.overlays.insert(name.to_string(), primitives);
    }

    fn remove_overlay(&mut self, name: &str) -> bool {
        let removed = self.overlays.remove(name).is_some();
        if removed {
            self.ops.push(SurfaceOp::Removed {
                name: name.to_string(),
            });
        }
        removed
    }
}
