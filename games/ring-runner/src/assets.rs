//! Asset catalog baked into the binary: the sprite manifest and every level.

use std::fmt;

use hop_engine::{AssetManifest, SpriteRegistry};

use crate::events::sfx;
use crate::level::{LevelData, LevelError};
use crate::spawn::sprites as sprite_names;

const MANIFEST_JSON: &str = include_str!("../assets/manifest.json");

const LEVEL_JSON: [&str; LEVEL_COUNT] = [
    include_str!("../data/level00.json"),
    include_str!("../data/level01.json"),
    include_str!("../data/level02.json"),
];

pub const LEVEL_COUNT: usize = 3;

#[derive(Debug)]
pub enum AssetError {
    Manifest(serde_json::Error),
    /// A sprite the game looks up by name is not in the manifest.
    MissingSprite(&'static str),
    /// No manifest sound is bound to this sound event id.
    MissingSound(u32),
    NoLevels,
    Level { index: usize, source: LevelError },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Manifest(err) => write!(f, "bad asset manifest: {err}"),
            AssetError::MissingSprite(name) => write!(f, "asset manifest has no sprite '{name}'"),
            AssetError::MissingSound(id) => write!(f, "asset manifest has no sound for event {id}"),
            AssetError::NoLevels => write!(f, "no levels to play"),
            AssetError::Level { index, source } => write!(f, "level {index}: {source}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Manifest(err) => Some(err),
            AssetError::Level { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Everything the Loading screen produces.
#[derive(Debug, Clone)]
pub struct Assets {
    pub sprites: SpriteRegistry,
    pub levels: Vec<LevelData>,
}

impl Assets {
    pub fn embedded() -> Result<Self, AssetError> {
        Self::from_sources(MANIFEST_JSON, &LEVEL_JSON)
    }

    /// Parse the manifest, check the fixed sprite names and sound bindings,
    /// then parse and validate every level in order.
    pub fn from_sources(manifest: &str, levels: &[&str]) -> Result<Self, AssetError> {
        let manifest = AssetManifest::from_json(manifest).map_err(AssetError::Manifest)?;
        let sprites = SpriteRegistry::from_manifest(&manifest);

        if let Some(missing) = sprite_names::ALL.into_iter().find(|name| !sprites.contains(name)) {
            return Err(AssetError::MissingSprite(missing));
        }
        if let Some(unbound) = sfx::ALL.into_iter().find(|s| manifest.sound_for_event(s.0).is_none()) {
            return Err(AssetError::MissingSound(unbound.0));
        }
        if levels.is_empty() {
            return Err(AssetError::NoLevels);
        }

        let levels = levels
            .iter()
            .enumerate()
            .map(|(index, json)| {
                LevelData::parse(json, &sprites).map_err(|source| AssetError::Level { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("loaded {} sprites and {} levels", sprites.len(), levels.len());
        Ok(Self { sprites, levels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_assets_load() {
        let assets = Assets::embedded().unwrap();
        assert_eq!(assets.levels.len(), LEVEL_COUNT);
        for name in sprite_names::ALL {
            assert!(assets.sprites.contains(name), "missing {name}");
        }
    }

    #[test]
    fn embedded_levels_reference_known_images() {
        let assets = Assets::embedded().unwrap();
        for level in &assets.levels {
            assert!(level.validate(&assets.sprites).is_ok());
            assert!(!level.platforms.is_empty());
        }
    }

    #[test]
    fn missing_fixed_sprite_is_reported() {
        let manifest = r#"{
            "atlases": [{ "name": "a", "cols": 1, "rows": 1, "path": "a.png" }],
            "sprites": { "hero": { "atlas": 0, "width": 32, "height": 42 } }
        }"#;
        let err = Assets::from_sources(manifest, &LEVEL_JSON).unwrap_err();
        assert!(matches!(err, AssetError::MissingSprite(_)));
    }

    #[test]
    fn unbound_sound_event_is_reported() {
        let mut manifest: serde_json::Value = serde_json::from_str(MANIFEST_JSON).unwrap();
        let sounds = manifest["sounds"].as_object_mut().unwrap();
        sounds.retain(|_, sound| sound["event_id"] != 7);
        let err = Assets::from_sources(&manifest.to_string(), &LEVEL_JSON).unwrap_err();
        assert!(matches!(err, AssetError::MissingSound(7)));
    }

    #[test]
    fn bad_level_names_its_index() {
        let err = Assets::from_sources(MANIFEST_JSON, &[LEVEL_JSON[0], "{ \"hero\": 3 }"]).unwrap_err();
        assert!(matches!(err, AssetError::Level { index: 1, source: LevelError::Json(_) }));
        assert!(err.to_string().starts_with("level 1: malformed level"));
    }

    #[test]
    fn empty_level_list_is_rejected() {
        assert!(matches!(Assets::from_sources(MANIFEST_JSON, &[]), Err(AssetError::NoLevels)));
    }
}
