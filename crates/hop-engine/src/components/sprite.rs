/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// How an entity appears: atlas cell, opacity and mirroring.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Which atlas this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid (first frame of a sprite sheet).
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Mirror horizontally (facing left).
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
    /// Hidden sprites keep their body but are not rendered.
    pub visible: bool,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            alpha: 1.0,
            flip_x: false,
            flip_y: false,
            visible: true,
        }
    }
}

impl SpriteComponent {
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
