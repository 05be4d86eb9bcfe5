/// Draw order for entities, back to front. Within a layer the scene order
/// is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RenderLayer {
    /// Backdrop and decorations.
    Background,
    /// Platforms, lava, spikes.
    Terrain,
    #[default]
    Objects,
    /// The player.
    Foreground,
    /// Full-screen fades.
    Overlay,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 5] = [
        RenderLayer::Background,
        RenderLayer::Terrain,
        RenderLayer::Objects,
        RenderLayer::Foreground,
        RenderLayer::Overlay,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}
