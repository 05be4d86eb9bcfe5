//! Named sprite-sheet clips.
//!
//! An entity holds every clip it can play; the active one is advanced by
//! `systems::animation::tick_animations`, which also reports finished
//! non-looping clips.

use std::collections::HashMap;

/// A single frame sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Frame cells as (col, row) in the atlas.
    pub frames: Vec<(f32, f32)>,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
}

impl AnimationDef {
    /// Clip from explicit cells.
    pub fn from_frames(frames: Vec<(f32, f32)>, fps: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_duration: 1.0 / fps.max(f32::EPSILON),
            looping,
        }
    }

    /// Clip from sheet frame indices, numbered left to right then top to
    /// bottom starting at cell (`origin_col`, `origin_row`).
    pub fn from_indices(
        indices: &[u32],
        origin: (f32, f32),
        columns: u32,
        fps: f32,
        looping: bool,
    ) -> Self {
        let columns = columns.max(1);
        let frames = indices
            .iter()
            .map(|&i| (origin.0 + (i % columns) as f32, origin.1 + (i / columns) as f32))
            .collect();
        Self::from_frames(frames, fps, looping)
    }
}

/// Animation state for an entity.
#[derive(Debug, Clone, Default)]
pub struct AnimationComponent {
    pub animations: HashMap<String, AnimationDef>,
    /// Currently selected clip; empty before the first `play`.
    pub current: String,
    pub frame_index: usize,
    /// Time accumulated in the current frame.
    pub frame_timer: f32,
    pub playing: bool,
    /// Playback speed multiplier.
    pub speed: f32,
}

impl AnimationComponent {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            ..Default::default()
        }
    }

    /// Single clip, already playing.
    pub fn single(name: impl Into<String>, def: AnimationDef) -> Self {
        let name = name.into();
        let mut anim = Self::new().with_clip(name.clone(), def);
        anim.play(&name);
        anim
    }

    pub fn with_clip(mut self, name: impl Into<String>, def: AnimationDef) -> Self {
        self.add(name, def);
        self
    }

    pub fn add(&mut self, name: impl Into<String>, def: AnimationDef) {
        self.animations.insert(name.into(), def);
    }

    /// Play a clip from its first frame. Unknown names are ignored.
    pub fn play(&mut self, name: &str) {
        if self.animations.contains_key(name) {
            self.current = name.to_string();
            self.frame_index = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    /// Play only if `name` is not already the current clip.
    pub fn play_if_different(&mut self, name: &str) {
        if self.current != name {
            self.play(name);
        }
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.animations.get(&self.current)
    }

    /// Cell to draw for the current frame.
    pub fn current_frame(&self) -> Option<(f32, f32)> {
        self.current_def()
            .and_then(|def| def.frames.get(self.frame_index).copied())
    }

    /// Advance by `dt` seconds. Returns true on the tick a non-looping clip
    /// runs past its last frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(def) = self.animations.get(&self.current) else {
            return false;
        };
        if def.frames.is_empty() {
            return false;
        }

        self.frame_timer += dt * self.speed;

        while self.frame_timer >= def.frame_duration {
            self.frame_timer -= def.frame_duration;
            self.frame_index += 1;

            if self.frame_index >= def.frames.len() {
                if def.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = def.frames.len() - 1;
                    self.playing = false;
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(row: f32, len: u32, fps: f32) -> AnimationDef {
        let indices: Vec<u32> = (0..len).collect();
        AnimationDef::from_indices(&indices, (0.0, row), len, fps, true)
    }

    #[test]
    fn indices_map_onto_sheet_cells() {
        let def = AnimationDef::from_indices(&[0, 1, 5], (0.0, 2.0), 4, 10.0, true);
        assert_eq!(def.frames, vec![(0.0, 2.0), (1.0, 2.0), (1.0, 3.0)]);
        assert!((def.frame_duration - 0.1).abs() < 1e-6);
    }

    #[test]
    fn looping_clip_wraps_and_never_finishes() {
        let mut anim = AnimationComponent::single("walk", strip(0.0, 4, 10.0));

        assert!(!anim.tick(0.15));
        assert_eq!(anim.current_frame(), Some((1.0, 0.0)));
        assert!(!anim.tick(0.3));
        assert_eq!(anim.frame_index, 0);
        assert!(anim.playing);
    }

    #[test]
    fn non_looping_clip_reports_finish_once() {
        let def = AnimationDef::from_frames(vec![(3.0, 0.0), (3.0, 0.0)], 6.0, false);
        let mut anim = AnimationComponent::single("die", def);

        assert!(!anim.tick(0.2));
        assert!(anim.tick(0.2));
        assert!(!anim.playing);
        assert_eq!(anim.frame_index, 1);
        assert!(!anim.tick(1.0));
    }

    #[test]
    fn play_if_different_keeps_progress() {
        let mut anim = AnimationComponent::new()
            .with_clip("idle", strip(0.0, 2, 5.0))
            .with_clip("walk", strip(1.0, 4, 10.0));

        anim.play("idle");
        anim.tick(0.25);
        anim.play_if_different("idle");
        assert_eq!(anim.frame_index, 1);

        anim.play_if_different("walk");
        assert_eq!(anim.current, "walk");
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut anim = AnimationComponent::single("idle", strip(0.0, 2, 5.0));
        anim.play("missing");
        assert_eq!(anim.current, "idle");
    }
}
