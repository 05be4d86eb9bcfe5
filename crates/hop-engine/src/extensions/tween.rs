//! Linear tweens keyed by `EntityId`, applied to the scene each step.
//!
//!   tweens.add(hero, Tween::position_x(x, 940.0, 0.5).with_on_complete(KIND));
//!   for (entity, kind) in tweens.tick(dt, &mut scene) { ... }

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Which property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    PositionX { from: f32, to: f32 },
    /// Sprite alpha; no-op on entities without a sprite.
    Alpha { from: f32, to: f32 },
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Seconds.
    pub duration: f32,
    pub elapsed: f32,
    /// Kind reported back when the tween completes.
    pub on_complete: Option<u32>,
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32) -> Self {
        Self { target, duration, elapsed: 0.0, on_complete: None }
    }

    pub fn position_x(from: f32, to: f32, duration: f32) -> Self {
        Self::new(TweenTarget::PositionX { from, to }, duration)
    }

    pub fn alpha(from: f32, to: f32, duration: f32) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration)
    }

    pub fn with_on_complete(mut self, kind: u32) -> Self {
        self.on_complete = Some(kind);
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Handle to a running tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// All running tweens, kept in creation order so completions are reported
/// deterministically.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<(TweenId, EntityId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tweens.push((id, entity, tween));
        id
    }

    /// Remove every tween driving `entity`. No completion is reported.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|(_, e, _)| *e != entity);
    }

    /// Advance every tween, write the interpolated values into the scene and
    /// return `(entity, kind)` for each completed tween that asked for it.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> Vec<(EntityId, u32)> {
        let mut completed = Vec::new();

        for (_, entity_id, tween) in &mut self.tweens {
            tween.elapsed += dt;
            let t = tween.progress();

            if let Some(entity) = scene.get_mut(*entity_id) {
                match tween.target {
                    TweenTarget::PositionX { from, to } => entity.pos.x = lerp(from, to, t),
                    TweenTarget::Alpha { from, to } => {
                        if let Some(sprite) = &mut entity.sprite {
                            sprite.alpha = lerp(from, to, t);
                        }
                    }
                }
            }

            if tween.is_complete() {
                if let Some(kind) = tween.on_complete {
                    completed.push((*entity_id, kind));
                }
            }
        }

        self.tweens.retain(|(_, _, tween)| !tween.is_complete());
        completed
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
