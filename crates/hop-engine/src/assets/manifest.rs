use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing atlases, named sprites and sounds for a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas cell plus world size.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// A texture atlas laid out as a grid of equally sized cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    /// Relative path to the image, e.g. "hero.png".
    pub path: String,
}

/// A named sprite: its first cell in an atlas and its size in world units.
/// Sprite sheets number their frames from that cell onward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    #[serde(default)]
    pub col: u32,
    #[serde(default)]
    pub row: u32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Name of the sound played for `event_id`, if one is mapped.
    pub fn sound_for_event(&self, event_id: u32) -> Option<&str> {
        self.sounds
            .iter()
            .find(|(_, sound)| sound.event_id == Some(event_id))
            .map(|(name, _)| name.as_str())
    }
}
