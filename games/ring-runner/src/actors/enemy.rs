use hop_engine::{EngineContext, EntityId};

use super::{body_mut, Damageable, Updatable};

pub const ENEMY_SPEED: f32 = 100.0;
pub const BLOCK_SPEED: f32 = 100.0;

pub mod clips {
    pub const MOVE: &str = "move";
    pub const DIE: &str = "die";
}

/// A walker that turns around at walls and platform edges.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    alive: bool,
}

impl Enemy {
    pub fn new(id: EntityId) -> Self {
        Self { id, alive: true }
    }
}

impl Damageable for Enemy {
    fn is_alive(&self) -> bool {
        self.alive
    }

    /// Stop colliding and play the death clip. The entity is removed when
    /// the clip completes.
    fn die(&mut self, ctx: &mut EngineContext) {
        self.alive = false;
        if let Some(entity) = ctx.scene.get_mut(self.id) {
            if let Some(body) = entity.body.as_mut() {
                body.enable = false;
                body.velocity = glam::Vec2::ZERO;
            }
            entity.play(clips::DIE);
        }
    }
}

impl Updatable for Enemy {
    fn update(&mut self, ctx: &mut EngineContext) {
        if !self.alive {
            return;
        }
        let Some(entity) = ctx.scene.get_mut(self.id) else {
            return;
        };
        let Some(body) = entity.body.as_mut() else {
            return;
        };

        let flip = if body.touching.right || body.blocked.right {
            body.velocity.x = -ENEMY_SPEED;
            Some(true)
        } else if body.touching.left || body.blocked.left {
            body.velocity.x = ENEMY_SPEED;
            Some(false)
        } else {
            None
        };
        if let (Some(flip), Some(sprite)) = (flip, entity.sprite.as_mut()) {
            sprite.flip_x = flip;
        }
    }
}

/// A platform that slides horizontally, reversing at obstacles.
#[derive(Debug, Clone)]
pub struct MovingBlock {
    pub id: EntityId,
}

impl MovingBlock {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl Updatable for MovingBlock {
    fn update(&mut self, ctx: &mut EngineContext) {
        let Some(body) = body_mut(ctx, self.id) else {
            return;
        };
        if body.touching.right || body.blocked.right {
            body.velocity.x = -BLOCK_SPEED;
        } else if body.touching.left || body.blocked.left {
            body.velocity.x = BLOCK_SPEED;
        }
    }
}
