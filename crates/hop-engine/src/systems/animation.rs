//! Advances entity clips and mirrors the current frame into the sprite.

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Tick every entity animation and update its sprite cell.
/// Returns `(entity, clip)` for each non-looping clip that finished.
pub fn tick_animations(scene: &mut Scene, dt: f32) -> Vec<(EntityId, String)> {
    let mut finished = Vec::new();

    for entity in scene.iter_mut() {
        let Some(anim) = entity.animation.as_mut() else {
            continue;
        };
        if anim.tick(dt) {
            finished.push((entity.id, anim.current.clone()));
        }
        if let (Some((col, row)), Some(sprite)) = (anim.current_frame(), entity.sprite.as_mut()) {
            sprite.col = col;
            sprite.row = row;
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{AnimationComponent, AnimationDef};
    use crate::components::entity::Entity;
    use crate::components::sprite::SpriteComponent;

    #[test]
    fn tick_updates_sprite_frame() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_sprite(SpriteComponent::default())
                .with_animation(AnimationComponent::single(
                    "walk",
                    AnimationDef::from_indices(&[0, 1, 2, 3], (0.0, 0.0), 4, 10.0, true),
                )),
        );

        tick_animations(&mut scene, 0.15);

        assert_eq!(scene.get(EntityId(1)).unwrap().sprite.as_ref().unwrap().col, 1.0);
    }

    #[test]
    fn finished_clips_are_reported() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(4))
                .with_sprite(SpriteComponent::default())
                .with_animation(AnimationComponent::single(
                    "open",
                    AnimationDef::from_frames(vec![(0.0, 0.0), (1.0, 0.0)], 10.0, false),
                )),
        );

        assert!(tick_animations(&mut scene, 0.1).is_empty());
        let done = tick_animations(&mut scene, 0.1);
        assert_eq!(done, vec![(EntityId(4), "open".to_string())]);
        assert!(tick_animations(&mut scene, 0.1).is_empty());
    }
}
