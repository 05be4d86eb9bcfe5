//! Level description as stored in `data/levelNN.json`.

use std::fmt;

use glam::Vec2;
use hop_engine::SpriteRegistry;
use serde::Deserialize;

use crate::spawn::sprites::DECORATION;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub image: String,
    #[serde(default)]
    pub gravity: bool,
}

/// Platform, lava tile or spike: a position and the image to use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageSpawn {
    pub x: f32,
    pub y: f32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FireballSpawn {
    pub x: f32,
    pub y: f32,
    /// How far above the spawn point the fireball climbs.
    pub height: f32,
    pub velocity: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecorationSpawn {
    pub x: f32,
    pub y: f32,
    pub frame: u32,
}

/// One level. Exactly one hero and one finish; every list may be empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub hero: Point,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub platforms: Vec<ImageSpawn>,
    #[serde(default)]
    pub moving_blocks: Vec<Point>,
    #[serde(default)]
    pub lava: Vec<ImageSpawn>,
    #[serde(default)]
    pub spring: Vec<Point>,
    #[serde(default)]
    pub rings: Vec<Point>,
    #[serde(default)]
    pub spike: Vec<ImageSpawn>,
    #[serde(default)]
    pub fireball: Vec<FireballSpawn>,
    pub finish: Point,
    #[serde(default)]
    pub decoration: Vec<DecorationSpawn>,
}

#[derive(Debug)]
pub enum LevelError {
    /// Not valid JSON, or a required field is missing.
    Json(serde_json::Error),
    UnknownImage { kind: &'static str, image: String },
    NonFinite { kind: &'static str, index: usize },
    FireballHeight { index: usize, height: f32 },
    FireballSpeed { index: usize },
    /// Decoration frame past the end of the decoration sheet.
    DecorationFrame { index: usize, frame: u32, frames: u32 },
    /// Asked to start a level index past the end of the list.
    NoSuchLevel { index: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Json(err) => write!(f, "malformed level: {err}"),
            LevelError::UnknownImage { kind, image } => {
                write!(f, "malformed level: {kind} uses unknown image '{image}'")
            }
            LevelError::NonFinite { kind, index } => {
                write!(f, "malformed level: {kind} #{index} has a non-finite coordinate")
            }
            LevelError::FireballHeight { index, height } => {
                write!(f, "malformed level: fireball #{index} height {height} must be positive")
            }
            LevelError::FireballSpeed { index } => {
                write!(f, "malformed level: fireball #{index} has zero velocity")
            }
            LevelError::DecorationFrame { index, frame, frames } => {
                write!(f, "malformed level: decoration #{index} frame {frame} is not below {frames}")
            }
            LevelError::NoSuchLevel { index } => write!(f, "no level with index {index}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Json(err)
    }
}

fn check_finite(kind: &'static str, index: usize, values: &[f32]) -> Result<(), LevelError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LevelError::NonFinite { kind, index })
    }
}

fn check_image(kind: &'static str, image: &str, sprites: &SpriteRegistry) -> Result<(), LevelError> {
    if sprites.contains(image) {
        Ok(())
    } else {
        Err(LevelError::UnknownImage {
            kind,
            image: image.to_string(),
        })
    }
}

impl LevelData {
    /// Parse and validate against the loaded sprites.
    pub fn parse(json: &str, sprites: &SpriteRegistry) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate(sprites)?;
        Ok(level)
    }

    pub fn validate(&self, sprites: &SpriteRegistry) -> Result<(), LevelError> {
        check_finite("hero", 0, &[self.hero.x, self.hero.y])?;
        check_finite("finish", 0, &[self.finish.x, self.finish.y])?;

        for (i, e) in self.enemies.iter().enumerate() {
            check_finite("enemy", i, &[e.x, e.y])?;
            check_image("enemy", &e.image, sprites)?;
        }
        for (kind, list) in [("platform", &self.platforms), ("lava", &self.lava), ("spike", &self.spike)] {
            for (i, s) in list.iter().enumerate() {
                check_finite(kind, i, &[s.x, s.y])?;
                check_image(kind, &s.image, sprites)?;
            }
        }
        for (kind, list) in [
            ("moving block", &self.moving_blocks),
            ("spring", &self.spring),
            ("ring", &self.rings),
        ] {
            for (i, p) in list.iter().enumerate() {
                check_finite(kind, i, &[p.x, p.y])?;
            }
        }
        for (i, f) in self.fireball.iter().enumerate() {
            check_finite("fireball", i, &[f.x, f.y, f.height, f.velocity])?;
            if f.height <= 0.0 {
                return Err(LevelError::FireballHeight { index: i, height: f.height });
            }
            if f.velocity == 0.0 {
                return Err(LevelError::FireballSpeed { index: i });
            }
        }
        let sheet = sprites.get(DECORATION).map_or(0, |asset| asset.frames);
        for (i, d) in self.decoration.iter().enumerate() {
            check_finite("decoration", i, &[d.x, d.y])?;
            if d.frame >= sheet {
                return Err(LevelError::DecorationFrame { index: i, frame: d.frame, frames: sheet });
            }
        }
        Ok(())
    }
}
