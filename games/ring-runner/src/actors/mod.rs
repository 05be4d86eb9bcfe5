//! Per-entity gameplay state. The engine entity carries position, body and
//! clips; these types carry what only the rules care about.

pub mod enemy;
pub mod hazards;
pub mod hero;

use hop_engine::{ArcadeBody, EngineContext, EntityId};

pub use enemy::{Enemy, MovingBlock};
pub use hazards::{Fireball, Spike};
pub use hero::Hero;

use crate::spawn::Group;

/// Per-step behaviour that runs after collisions and input.
pub trait Updatable {
    fn update(&mut self, ctx: &mut EngineContext);
}

/// Something that can be killed by the rules.
pub trait Damageable {
    fn is_alive(&self) -> bool;
    fn die(&mut self, ctx: &mut EngineContext);
}

/// The collision category an actor is registered under.
pub trait Collider {
    fn group(&self) -> Group;
}

/// Every level entity other than the hero.
#[derive(Debug, Clone)]
pub enum Actor {
    Enemy(Enemy),
    MovingBlock(MovingBlock),
    Fireball(Fireball),
    Spike(Spike),
    Ring,
    Spring,
    Finish,
    Lava,
    Platform,
    EnemyWall,
    Decoration,
}

impl Updatable for Actor {
    fn update(&mut self, ctx: &mut EngineContext) {
        match self {
            Actor::Enemy(enemy) => enemy.update(ctx),
            Actor::MovingBlock(block) => block.update(ctx),
            Actor::Fireball(fireball) => fireball.update(ctx),
            Actor::Spike(_)
            | Actor::Ring
            | Actor::Spring
            | Actor::Finish
            | Actor::Lava
            | Actor::Platform
            | Actor::EnemyWall
            | Actor::Decoration => {}
        }
    }
}

impl Collider for Actor {
    fn group(&self) -> Group {
        match self {
            Actor::Enemy(_) => Group::Enemies,
            Actor::MovingBlock(_) => Group::MovingBlocks,
            Actor::Fireball(_) => Group::Fireballs,
            Actor::Spike(_) => Group::Spikes,
            Actor::Ring => Group::Rings,
            Actor::Spring => Group::Springs,
            Actor::Finish => Group::Finish,
            Actor::Lava => Group::Lava,
            Actor::Platform => Group::Platforms,
            Actor::EnemyWall => Group::EnemyWalls,
            Actor::Decoration => Group::Decoration,
        }
    }
}

pub(crate) fn body(ctx: &EngineContext, id: EntityId) -> Option<&ArcadeBody> {
    ctx.scene.get(id).and_then(|e| e.body.as_ref())
}

pub(crate) fn body_mut(ctx: &mut EngineContext, id: EntityId) -> Option<&mut ArcadeBody> {
    ctx.scene.get_mut(id).and_then(|e| e.body.as_mut())
}
