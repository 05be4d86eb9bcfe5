use hop_engine::{EngineContext, EntityId, TimerId};

use super::{body, body_mut, Damageable, Updatable};
use crate::events::timers;

pub const WALK_SPEED: f32 = 200.0;
pub const JUMP_SPEED: f32 = 550.0;
/// Upward speed after stomping an enemy.
pub const BOUNCE_SPEED: f32 = 200.0;
/// Knock-back applied while hurt.
pub const RECOIL_SPEED: f32 = 100.0;
pub const HURT_SECS: f32 = 0.5;
pub const INVINCIBLE_SECS: f32 = 2.0;
/// Delay between the end of the death clip and removal.
pub const REMOVE_DELAY_SECS: f32 = 0.75;

pub mod clips {
    pub const STOP: &str = "stop";
    pub const RUN_RIGHT: &str = "run-right";
    pub const RUN_LEFT: &str = "run-left";
    pub const JUMP: &str = "jump";
    pub const DIE: &str = "die";
    pub const HURT: &str = "hurt";
}

/// The player character.
///
/// `hurt` and `invincible` are raised together by `injure` and dropped by
/// their own timers, hurt first. `die` is final for this entity; a new
/// hero is spawned when the level restarts.
#[derive(Debug, Clone)]
pub struct Hero {
    pub id: EntityId,
    alive: bool,
    frozen: bool,
    invincible: bool,
    hurt: bool,
    boosting: bool,
    hurt_timer: Option<TimerId>,
    invincible_timer: Option<TimerId>,
}

impl Hero {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            alive: true,
            frozen: false,
            invincible: false,
            hurt: false,
            boosting: false,
            hurt_timer: None,
            invincible_timer: None,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    /// Whether the hero still takes part in collisions.
    pub fn has_body(&self, ctx: &EngineContext) -> bool {
        body(ctx, self.id).is_some_and(|b| b.enable)
    }

    pub fn on_ground(&self, ctx: &EngineContext) -> bool {
        body(ctx, self.id).is_some_and(|b| b.touching.down)
    }

    /// Set horizontal speed from `direction` (-1, 0, 1) and face that way.
    /// While hurt the knock-back is applied first; its horizontal part is
    /// then replaced by the walking speed, the upward kick stays.
    pub fn walk(&mut self, ctx: &mut EngineContext, direction: i32) {
        if self.frozen {
            return;
        }
        let Some(entity) = ctx.scene.get_mut(self.id) else {
            return;
        };
        let Some(body) = entity.body.as_mut() else {
            return;
        };

        if self.hurt {
            body.velocity.x = if body.velocity.x > 0.0 { RECOIL_SPEED } else { -RECOIL_SPEED };
            body.velocity.y = -RECOIL_SPEED;
        }
        body.velocity.x = direction.signum() as f32 * WALK_SPEED;

        let vx = body.velocity.x;
        if let Some(sprite) = entity.sprite.as_mut() {
            if vx < 0.0 {
                sprite.flip_x = true;
            } else if vx > 0.0 {
                sprite.flip_x = false;
            }
        }
    }

    /// Jump with `boost` speed, or the default. Also applies while a boost
    /// is already running. Returns whether a grounded jump was allowed.
    pub fn jump(&mut self, ctx: &mut EngineContext, boost: Option<f32>) -> bool {
        let can_jump = self.on_ground(ctx) && self.alive && !self.frozen && !self.hurt;

        if can_jump || self.boosting {
            if let Some(body) = body_mut(ctx, self.id) {
                body.velocity.y = -boost.unwrap_or(JUMP_SPEED);
            }
            self.boosting = true;
        }
        can_jump
    }

    pub fn stop_jump_boost(&mut self) {
        self.boosting = false;
    }

    pub fn bounce(&mut self, ctx: &mut EngineContext) {
        if let Some(body) = body_mut(ctx, self.id) {
            body.velocity.y = -BOUNCE_SPEED;
        }
    }

    /// Become hurt and invincible. A second call restarts both windows.
    pub fn injure(&mut self, ctx: &mut EngineContext) {
        self.invincible = true;
        self.hurt = true;

        for timer in [self.hurt_timer.take(), self.invincible_timer.take()].into_iter().flatten() {
            ctx.timers.cancel(timer);
        }
        self.hurt_timer = Some(ctx.after(HURT_SECS, Some(self.id), timers::HURT_OVER));
        self.invincible_timer = Some(ctx.after(INVINCIBLE_SECS, Some(self.id), timers::INVINCIBLE_OVER));
        log::debug!("hero injured");
    }

    /// One of the injury timers fired.
    pub fn on_timer(&mut self, timer: TimerId) {
        if self.hurt_timer == Some(timer) {
            self.hurt = false;
            self.hurt_timer = None;
        }
        if self.invincible_timer == Some(timer) {
            self.invincible = false;
            self.invincible_timer = None;
        }
    }

    /// Stop taking part in physics and ignore input (level exit).
    pub fn freeze(&mut self, ctx: &mut EngineContext) {
        if let Some(body) = body_mut(ctx, self.id) {
            body.enable = false;
        }
        self.frozen = true;
    }

    /// A clip finished; after the death clip the hero is removed shortly.
    pub fn on_clip_finished(&mut self, ctx: &mut EngineContext, clip: &str) {
        if clip == clips::DIE && !self.alive {
            ctx.after(REMOVE_DELAY_SECS, Some(self.id), timers::HERO_REMOVE);
        }
    }

    /// Clip for the current state, highest priority first.
    pub fn animation_name(&self, ctx: &EngineContext) -> &'static str {
        let Some(body) = body(ctx, self.id) else {
            return clips::STOP;
        };
        let v = body.velocity;
        if !self.alive {
            clips::DIE
        } else if self.frozen {
            clips::STOP
        } else if self.hurt {
            clips::HURT
        } else if v.y != 0.0 {
            clips::JUMP
        } else if v.x > 0.0 && body.touching.down {
            clips::RUN_RIGHT
        } else if v.x < 0.0 && body.touching.down {
            clips::RUN_LEFT
        } else {
            clips::STOP
        }
    }
}

impl Damageable for Hero {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn die(&mut self, ctx: &mut EngineContext) {
        self.alive = false;
        if let Some(entity) = ctx.scene.get_mut(self.id) {
            if let Some(body) = entity.body.as_mut() {
                body.enable = false;
            }
            entity.play(clips::DIE);
        }
        log::debug!("hero died");
    }
}

impl Updatable for Hero {
    fn update(&mut self, ctx: &mut EngineContext) {
        let name = self.animation_name(ctx);
        if let Some(entity) = ctx.scene.get_mut(self.id) {
            entity.play(name);
        }
    }
}
