/// A map layer rendered as one named overlay group.
pub trait Layer {
    /// Overlay group name on the rendering surface.
    fn name(&self) -> &'static str;
}
