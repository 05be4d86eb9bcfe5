//! What happens when the hero meets something. `resolve` runs the whole
//! per-frame collision pass; the handlers below are its pieces.

use std::collections::BTreeMap;

use hop_engine::{EngineContext, EntityId, Tween};

use crate::actors::{Actor, Damageable, Enemy, Hero};
use crate::events::{sfx, tweens};
use crate::session::{SessionState, STOMP_POINTS};
use crate::spawn::{clips, Group, Groups};

/// Speed granted by a spring.
pub const SPRING_SPEED: f32 = 900.0;
/// Where the hero runs to after touching the finish.
pub const FINISH_EXIT_X: f32 = 940.0;
pub const FINISH_EXIT_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Hero was invincible.
    Ignored,
    /// Rings were lost instead of the hero.
    Injured,
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyHit {
    Stomped,
    Damaged(DamageOutcome),
}

/// Shared by lava, fireballs, spikes and grounded enemy contact.
pub fn handle_damage(hero: &mut Hero, session: &mut SessionState, ctx: &mut EngineContext) -> DamageOutcome {
    if hero.is_invincible() {
        return DamageOutcome::Ignored;
    }
    if session.rings == 0 {
        hero.die(ctx);
        ctx.emit_sound(sfx::DEAD);
        DamageOutcome::Killed
    } else {
        session.lose_rings();
        hero.injure(ctx);
        ctx.emit_sound(sfx::HURT);
        DamageOutcome::Injured
    }
}

/// A moving hero stomps; a hero standing still gets hurt.
pub fn hero_vs_enemy(
    hero: &mut Hero,
    enemy: &mut Enemy,
    session: &mut SessionState,
    ctx: &mut EngineContext,
) -> EnemyHit {
    let vy = ctx.scene.get(hero.id).and_then(|e| e.body.as_ref()).map_or(0.0, |b| b.velocity.y);
    if vy != 0.0 {
        enemy.die(ctx);
        hero.bounce(ctx);
        ctx.emit_sound(sfx::POP);
        session.add_score(STOMP_POINTS);
        EnemyHit::Stomped
    } else {
        // overlap tests leave contact flags alone, so the enemy keeps its heading
        EnemyHit::Damaged(handle_damage(hero, session, ctx))
    }
}

/// Only a hero falling onto the spring is launched.
pub fn hero_vs_spring(hero: &mut Hero, spring: EntityId, ctx: &mut EngineContext) {
    let falling = ctx
        .scene
        .get(hero.id)
        .and_then(|e| e.body.as_ref())
        .is_some_and(|b| b.velocity.y > 0.0);
    if !falling {
        return;
    }
    if let Some(anim) = ctx.scene.get_mut(spring).and_then(|e| e.animation.as_mut()) {
        anim.play(clips::SPRING_JUMP);
    }
    if hero.jump(ctx, Some(SPRING_SPEED)) {
        ctx.emit_sound(sfx::SPRING);
    }
}

/// The caller removes the ring.
pub fn hero_vs_ring(session: &mut SessionState, ctx: &mut EngineContext) {
    ctx.emit_sound(sfx::RING);
    session.collect_ring();
}

/// Open the gate and walk the hero off-screen while fading out.
/// `tweens::FINISH_RUN` reports when the walk is over.
pub fn hero_vs_finish(hero: &mut Hero, finish: EntityId, ctx: &mut EngineContext) {
    ctx.emit_sound(sfx::FINISH);
    if let Some(anim) = ctx.scene.get_mut(finish).and_then(|e| e.animation.as_mut()) {
        anim.play(clips::FINISH_OPEN);
    }
    hero.freeze(ctx);

    let Some(entity) = ctx.scene.get(hero.id) else {
        return;
    };
    let x = entity.pos.x;
    let alpha = entity.sprite.as_ref().map_or(1.0, |s| s.alpha);
    ctx.tween(
        hero.id,
        Tween::position_x(x, FINISH_EXIT_X, FINISH_EXIT_SECS).with_on_complete(tweens::FINISH_RUN),
    );
    ctx.tween(hero.id, Tween::alpha(alpha, 0.0, FINISH_EXIT_SECS));
    log::info!("level finished");
}

/// One frame of collisions in their fixed order. Handlers stop running as
/// soon as the hero loses its body (death or finish). Returns the rings
/// that were picked up.
pub fn resolve(
    ctx: &mut EngineContext,
    hero: &mut Hero,
    actors: &mut BTreeMap<EntityId, Actor>,
    groups: &Groups,
    session: &mut SessionState,
) -> Vec<EntityId> {
    let hero_ids = [hero.id];
    // handlers need the whole context
    let physics = ctx.physics.clone();

    physics.collide(&mut ctx.scene, groups.get(Group::Enemies), groups.get(Group::Platforms));
    physics.collide(&mut ctx.scene, groups.get(Group::Enemies), groups.get(Group::EnemyWalls));
    physics.collide(&mut ctx.scene, &hero_ids, groups.get(Group::Platforms));
    physics.collide(&mut ctx.scene, &hero_ids, groups.get(Group::MovingBlocks));
    physics.collide(&mut ctx.scene, groups.get(Group::MovingBlocks), groups.get(Group::Platforms));
    physics.collide_within(&mut ctx.scene, groups.get(Group::MovingBlocks));

    for (_, id) in physics.overlap(&ctx.scene, &hero_ids, groups.get(Group::Enemies)) {
        if !hero.has_body(ctx) {
            break;
        }
        if let Some(Actor::Enemy(enemy)) = actors.get_mut(&id) {
            if enemy.is_alive() {
                hero_vs_enemy(hero, enemy, session, ctx);
            }
        }
    }

    for _ in physics.collide(&mut ctx.scene, &hero_ids, groups.get(Group::Lava)) {
        if !hero.has_body(ctx) {
            break;
        }
        handle_damage(hero, session, ctx);
    }

    for (_, id) in physics.overlap(&ctx.scene, &hero_ids, groups.get(Group::Springs)) {
        if !hero.has_body(ctx) {
            break;
        }
        hero_vs_spring(hero, id, ctx);
    }

    for group in [Group::Fireballs, Group::Spikes] {
        for _ in physics.overlap(&ctx.scene, &hero_ids, groups.get(group)) {
            if !hero.has_body(ctx) {
                break;
            }
            handle_damage(hero, session, ctx);
        }
    }

    let mut collected = Vec::new();
    for (_, id) in physics.overlap(&ctx.scene, &hero_ids, groups.get(Group::Rings)) {
        if !hero.has_body(ctx) {
            break;
        }
        hero_vs_ring(session, ctx);
        collected.push(id);
    }

    for (_, id) in physics.overlap(&ctx.scene, &hero_ids, groups.get(Group::Finish)) {
        if !hero.has_body(ctx) {
            break;
        }
        if hero.on_ground(ctx) {
            hero_vs_finish(hero, id, ctx);
        }
    }

    collected
}
