use std::collections::HashMap;

use runtime::Frame;
use scene::components::Drawable2D;
use tracing::debug;

use crate::surface::RenderSurface;

/// Installs whole overlay groups onto a surface, newest frame wins.
///
/// The previous group is always detached before the replacement is attached,
/// so no stale primitive stays visible. A set computed for an older frame than
/// the one already installed is discarded.
#[derive(Debug, Default)]
pub struct OverlayInstaller {
    installed: HashMap<&'static str, Frame>,
}

impl OverlayInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the group `name`. Returns false when `frame` is stale.
    pub fn install<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        name: &'static str,
        frame: Frame,
        primitives: Vec<Drawable2D>,
    ) -> bool {
        if let Some(last) = self.installed.get(name)
            && last.is_newer_than(frame)
        {
            debug!(overlay = name, frame = frame.index, last = last.index, "dropping stale overlay");
            return false;
        }

        surface.remove_overlay(name);
        if !primitives.is_empty() {
            surface.add_overlay(name, primitives);
        }
        self.installed.insert(name, frame);
        true
    }

    /// Detach the group `name` without a replacement.
    pub fn retire<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        name: &'static str,
        frame: Frame,
    ) -> bool {
        self.install(surface, name, frame, Vec::new())
    }
}
