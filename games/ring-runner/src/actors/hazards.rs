use hop_engine::{EngineContext, EntityId};

use super::Updatable;

/// Vertical offset of a spike between its two positions.
pub const SPIKE_TRAVEL: f32 = 30.0;
pub const SPIKE_INTERVAL_SECS: f32 = 1.5;

/// Bobs between `max_y - height` and `max_y`.
///
/// Bounds are checked with strict comparisons after the move, so the ball
/// overshoots by at most one step before turning.
#[derive(Debug, Clone)]
pub struct Fireball {
    pub id: EntityId,
    min_y: f32,
    max_y: f32,
    speed: f32,
}

impl Fireball {
    pub fn new(id: EntityId, spawn_y: f32, height: f32, speed: f32) -> Self {
        Self { id, min_y: spawn_y - height, max_y: spawn_y, speed }
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min_y, self.max_y)
    }
}

impl Updatable for Fireball {
    fn update(&mut self, ctx: &mut EngineContext) {
        let Some(entity) = ctx.scene.get_mut(self.id) else {
            return;
        };
        let y = entity.pos.y;
        let Some(body) = entity.body.as_mut() else {
            return;
        };

        let flip = if y < self.min_y {
            body.velocity.y = self.speed.abs();
            true
        } else if y > self.max_y {
            body.velocity.y = -self.speed;
            false
        } else {
            return;
        };
        if let Some(sprite) = entity.sprite.as_mut() {
            sprite.flip_y = flip;
        }
    }
}

/// Pops up and down by `SPIKE_TRAVEL` every `SPIKE_INTERVAL_SECS`.
/// The repeating timer is owned by the spike entity.
#[derive(Debug, Clone)]
pub struct Spike {
    pub id: EntityId,
    up: bool,
}

impl Spike {
    pub fn new(id: EntityId) -> Self {
        Self { id, up: true }
    }

    pub fn is_up(&self) -> bool {
        self.up
    }

    pub fn toggle(&mut self, ctx: &mut EngineContext) {
        let Some(entity) = ctx.scene.get_mut(self.id) else {
            return;
        };
        if self.up {
            entity.pos.y -= SPIKE_TRAVEL;
        } else {
            entity.pos.y += SPIKE_TRAVEL;
        }
        self.up = !self.up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use hop_engine::{ArcadeBody, Entity, SpriteComponent};

    const DT: f32 = 1.0 / 60.0;

    fn spawn_fireball(ctx: &mut EngineContext, y: f32, height: f32, speed: f32) -> Fireball {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_pos(Vec2::new(300.0, y))
                .with_anchor(Vec2::splat(0.5))
                .with_sprite(SpriteComponent::default())
                .with_body(
                    ArcadeBody::new(Vec2::new(15.0, 32.0))
                        .with_gravity(false)
                        .immovable()
                        .with_velocity(Vec2::new(0.0, speed)),
                ),
        );
        Fireball::new(id, y, height, speed)
    }

    #[test]
    fn fireball_stays_within_one_step_of_its_range() {
        let mut ctx = EngineContext::new();
        let mut ball = spawn_fireball(&mut ctx, 500.0, 150.0, 200.0);
        let slack = 200.0 * DT + 1e-3;
        let mut flips = 0;
        let mut last_vy = 200.0;

        for _ in 0..600 {
            ctx.step(DT);
            ball.update(&mut ctx);

            let e = ctx.scene.get(ball.id).unwrap();
            assert!(e.pos.y >= 350.0 - slack && e.pos.y <= 500.0 + slack, "y = {}", e.pos.y);
            let vy = e.body.as_ref().unwrap().velocity.y;
            if vy.signum() != f32::signum(last_vy) {
                flips += 1;
            }
            last_vy = vy;
        }
        // 10s at 200/s over a 150 span
        assert!(flips >= 12, "only {flips} reversals");
    }

    #[test]
    fn fireball_faces_its_direction() {
        let mut ctx = EngineContext::new();
        let mut ball = spawn_fireball(&mut ctx, 500.0, 100.0, 200.0);

        ctx.scene.get_mut(ball.id).unwrap().pos.y = 399.0;
        ball.update(&mut ctx);
        let e = ctx.scene.get(ball.id).unwrap();
        assert_eq!(e.body.as_ref().unwrap().velocity.y, 200.0);
        assert!(e.sprite.as_ref().unwrap().flip_y);

        ctx.scene.get_mut(ball.id).unwrap().pos.y = 501.0;
        ball.update(&mut ctx);
        let e = ctx.scene.get(ball.id).unwrap();
        assert_eq!(e.body.as_ref().unwrap().velocity.y, -200.0);
        assert!(!e.sprite.as_ref().unwrap().flip_y);
    }

    #[test]
    fn fireball_at_bound_does_not_turn() {
        let mut ctx = EngineContext::new();
        let mut ball = spawn_fireball(&mut ctx, 500.0, 100.0, -200.0);
        ctx.scene.get_mut(ball.id).unwrap().pos.y = 400.0;

        ball.update(&mut ctx);

        assert_eq!(ctx.scene.get(ball.id).unwrap().body.as_ref().unwrap().velocity.y, -200.0);
    }

    #[test]
    fn spike_alternates_between_two_heights() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 400.0)));
        let mut spike = Spike::new(id);

        spike.toggle(&mut ctx);
        assert_eq!(ctx.scene.get(id).unwrap().pos.y, 370.0);
        assert!(!spike.is_up());

        spike.toggle(&mut ctx);
        assert_eq!(ctx.scene.get(id).unwrap().pos.y, 400.0);
        assert!(spike.is_up());
    }
}
