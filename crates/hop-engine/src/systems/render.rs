use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Instances are ordered by layer (background first); within a layer the
/// scene order is kept. Inactive, sprite-less and hidden entities are skipped,
/// as is anything past `max_instances`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    let mut layers: [Vec<RenderInstance>; RenderLayer::COUNT] = Default::default();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(sprite) = entity.sprite.as_ref() else {
            continue;
        };
        if !sprite.visible {
            continue;
        }

        let top_left = entity.pos - entity.anchor * entity.scale;
        let width = if sprite.flip_x { -entity.scale.x } else { entity.scale.x };
        let height = if sprite.flip_y { -entity.scale.y } else { entity.scale.y };

        layers[entity.layer.index()].push(RenderInstance {
            x: top_left.x,
            y: top_left.y,
            width,
            height,
            col: sprite.col,
            row: sprite.row,
            alpha: sprite.alpha,
            atlas: sprite.atlas.0 as f32,
        });
    }

    for instance in layers.into_iter().flatten().take(max_instances) {
        buffer.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::SpriteComponent;
    use glam::Vec2;

    #[test]
    fn build_buffer_orders_by_layer() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_layer(RenderLayer::Foreground)
                .with_sprite(SpriteComponent { col: 1.0, ..Default::default() }),
            Entity::new(EntityId(2))
                .with_layer(RenderLayer::Background)
                .with_sprite(SpriteComponent { col: 2.0, ..Default::default() }),
            Entity::new(EntityId(3))
                .with_sprite(SpriteComponent { col: 3.0, ..Default::default() }),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 512);

        let cols: Vec<f32> = buffer.instances.iter().map(|i| i.col).collect();
        assert_eq!(cols, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn anchor_and_flip_shape_the_rect() {
        let entities = vec![Entity::new(EntityId(1))
            .with_pos(Vec2::new(100.0, 100.0))
            .with_anchor(Vec2::splat(0.5))
            .with_scale(Vec2::new(32.0, 42.0))
            .with_sprite(SpriteComponent { flip_x: true, ..Default::default() })];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 512);

        let inst = buffer.instances[0];
        assert_eq!((inst.x, inst.y), (84.0, 79.0));
        assert_eq!((inst.width, inst.height), (-32.0, 42.0));
    }

    #[test]
    fn inactive_and_hidden_entities_are_skipped() {
        let mut inactive = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        inactive.active = false;
        let hidden = Entity::new(EntityId(2)).with_sprite(SpriteComponent::default().hidden());
        let bare = Entity::new(EntityId(3));

        let entities = vec![inactive, hidden, bare];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 512);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn respects_instance_cap() {
        let entities: Vec<Entity> = (0..10)
            .map(|i| Entity::new(EntityId(i)).with_sprite(SpriteComponent::default()))
            .collect();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 4);
        assert_eq!(buffer.instance_count(), 4);
    }
}
