use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
use crate::core::physics::{Aabb, ArcadeBody};

/// Fat entity: one struct with optional components.
/// Game-specific state lives in the game, keyed by `id`.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not drawn).
    pub active: bool,
    /// Position of the anchor point in world space (Y down).
    pub pos: Vec2,
    /// Anchor within the sprite/body rectangle, (0,0) top-left, (0.5,0.5) center.
    pub anchor: Vec2,
    /// Rendered size in world units.
    pub scale: Vec2,
    pub layer: RenderLayer,
    pub sprite: Option<SpriteComponent>,
    pub animation: Option<AnimationComponent>,
    pub body: Option<ArcadeBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            anchor: Vec2::ZERO,
            scale: Vec2::ONE,
            layer: RenderLayer::default(),
            sprite: None,
            animation: None,
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_body(mut self, body: ArcadeBody) -> Self {
        self.body = Some(body);
        self
    }

    /// World-space rectangle of the physics body, if any.
    pub fn bounds(&self) -> Option<Aabb> {
        self.body
            .as_ref()
            .map(|body| Aabb::from_anchor(self.pos, self.anchor, body.size))
    }

    /// Whether the entity has a body taking part in physics.
    pub fn has_enabled_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| b.enable)
    }

    /// Play a clip if it differs from the current one. No-op without an animation.
    pub fn play(&mut self, clip: &str) {
        if let Some(anim) = self.animation.as_mut() {
            anim.play_if_different(clip);
        }
    }

    /// Name of the currently playing clip.
    pub fn current_clip(&self) -> Option<&str> {
        self.animation.as_ref().map(|a| a.current.as_str())
    }
}
