use std::collections::HashMap;

use glam::Vec2;

use crate::assets::manifest::AssetManifest;
use crate::components::animation::AnimationDef;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// A resolved sprite: component template, world size and sheet width.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAsset {
    pub sprite: SpriteComponent,
    pub size: Vec2,
    /// Cells per row in the owning atlas.
    pub columns: u32,
    /// Atlas cells from the sprite's own cell to the end of the atlas,
    /// i.e. how many sheet frames it can address.
    pub frames: u32,
}

/// Registry of named sprites, built from an `AssetManifest`.
#[derive(Debug, Default, Clone)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteAsset>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites pointing at a missing atlas are skipped.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            let Some(atlas) = manifest.atlases.get(desc.atlas as usize) else {
                log::warn!("sprite '{}' references missing atlas {}", name, desc.atlas);
                continue;
            };
            sprites.insert(
                name.clone(),
                SpriteAsset {
                    sprite: SpriteComponent {
                        atlas: AtlasId(desc.atlas),
                        col: desc.col as f32,
                        row: desc.row as f32,
                        ..Default::default()
                    },
                    size: Vec2::new(desc.width, desc.height),
                    columns: atlas.cols,
                    frames: (atlas.cols * atlas.rows).saturating_sub(desc.row * atlas.cols + desc.col),
                },
            );
        }
        Self { sprites }
    }

    pub fn get(&self, name: &str) -> Option<&SpriteAsset> {
        self.sprites.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    /// Build a clip from sheet frame indices of sprite `name`.
    pub fn clip(&self, name: &str, indices: &[u32], fps: f32, looping: bool) -> Option<AnimationDef> {
        let asset = self.get(name)?;
        Some(AnimationDef::from_indices(
            indices,
            (asset.sprite.col, asset.sprite.row),
            asset.columns,
            fps,
            looping,
        ))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
