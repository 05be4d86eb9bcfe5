//! Builds a level's entities from its description.

use std::collections::BTreeMap;

use glam::Vec2;
use hop_engine::{AnimationComponent, AnimationDef, ArcadeBody, EngineContext, Entity, EntityId, RenderLayer};

use crate::actors::{Actor, Enemy, Fireball, Hero, MovingBlock, Spike};
use crate::actors::{enemy, hazards, hero};
use crate::events::timers;
use crate::level::LevelData;
use crate::level::LevelError;

/// Downward acceleration switched on once a level is built.
pub const GRAVITY: f32 = 1200.0;

/// Sprites looked up by fixed name rather than through level data.
pub mod sprites {
    pub const HERO: &str = "hero";
    pub const RING: &str = "ring";
    pub const SPRING: &str = "spring";
    pub const FINISH: &str = "finish";
    pub const BLOCK: &str = "block";
    pub const INVISIBLE_WALL: &str = "invisible-wall";
    pub const FIREBALL: &str = "fireball";
    pub const DECORATION: &str = "decoration";
    pub const BACKGROUND: &str = "background";
    pub const FADE: &str = "fade";

    pub const ALL: [&str; 10] = [
        HERO,
        RING,
        SPRING,
        FINISH,
        BLOCK,
        INVISIBLE_WALL,
        FIREBALL,
        DECORATION,
        BACKGROUND,
        FADE,
    ];
}

pub mod clips {
    pub const RING_ROTATE: &str = "rotate";
    pub const LAVA_FLOW: &str = "flow";
    pub const SPRING_JUMP: &str = "jump";
    pub const FINISH_OPEN: &str = "open";
    pub const FIREBALL_FIRE: &str = "fire";
}

/// Collision category. Every level entity except the hero belongs to
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Enemies,
    EnemyWalls,
    Platforms,
    MovingBlocks,
    Lava,
    Springs,
    Rings,
    Spikes,
    Fireballs,
    Finish,
    Decoration,
}

impl Group {
    pub const COUNT: usize = 11;

    pub const ALL: [Group; Group::COUNT] = [
        Group::Enemies,
        Group::EnemyWalls,
        Group::Platforms,
        Group::MovingBlocks,
        Group::Lava,
        Group::Springs,
        Group::Rings,
        Group::Spikes,
        Group::Fireballs,
        Group::Finish,
        Group::Decoration,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Entity ids per group, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    members: [Vec<EntityId>; Group::COUNT],
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, group: Group, id: EntityId) {
        self.members[group.index()].push(id);
    }

    /// Remove `id` from whichever group holds it.
    pub fn remove(&mut self, id: EntityId) -> Option<Group> {
        let group = self.group_of(id)?;
        self.members[group.index()].retain(|&member| member != id);
        Some(group)
    }

    pub fn get(&self, group: Group) -> &[EntityId] {
        &self.members[group.index()]
    }

    pub fn group_of(&self, id: EntityId) -> Option<Group> {
        Group::ALL.into_iter().find(|g| self.members[g.index()].contains(&id))
    }

    pub fn len(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything `spawn_level` created.
#[derive(Debug, Clone)]
pub struct Spawned {
    pub hero: Hero,
    pub actors: BTreeMap<EntityId, Actor>,
    pub groups: Groups,
    /// Full-screen black sprite used for the start flash and exit fade.
    pub overlay: EntityId,
}

struct Builder<'a> {
    ctx: &'a mut EngineContext,
    actors: BTreeMap<EntityId, Actor>,
    groups: Groups,
}

impl Builder<'_> {
    /// A sprite entity sized from the registry, with `anchor` at `pos`.
    fn sprite(&mut self, kind: &'static str, image: &str, pos: Vec2, anchor: Vec2) -> Result<Entity, LevelError> {
        let asset = self.ctx.sprites.get(image).ok_or_else(|| LevelError::UnknownImage {
            kind,
            image: image.to_string(),
        })?;
        let (sprite, size) = (asset.sprite.clone(), asset.size);
        let id = self.ctx.next_id();
        Ok(Entity::new(id)
            .with_tag(kind)
            .with_pos(pos)
            .with_anchor(anchor)
            .with_scale(size)
            .with_sprite(sprite))
    }

    fn clip(&self, image: &str, frames: &[u32], fps: f32, looping: bool) -> Result<AnimationDef, LevelError> {
        self.ctx
            .sprites
            .clip(image, frames, fps, looping)
            .ok_or_else(|| LevelError::UnknownImage { kind: "clip", image: image.to_string() })
    }

    fn insert(&mut self, entity: Entity, actor: Actor, group: Group) -> EntityId {
        let id = entity.id;
        self.ctx.scene.spawn(entity);
        self.groups.add(group, id);
        self.actors.insert(id, actor);
        id
    }
}

/// Spawn everything in `level` into `ctx`, then turn on gravity.
/// The caller resets the context first.
pub fn spawn_level(ctx: &mut EngineContext, level: &LevelData) -> Result<Spawned, LevelError> {
    let mut b = Builder { ctx, actors: BTreeMap::new(), groups: Groups::new() };

    let background = b
        .sprite("background", sprites::BACKGROUND, Vec2::ZERO, Vec2::ZERO)?
        .with_layer(RenderLayer::Background);
    b.ctx.scene.spawn(background);

    for deco in &level.decoration {
        let cell = b.clip(sprites::DECORATION, &[deco.frame], 1.0, false)?.frames[0];
        let mut entity = b
            .sprite("decoration", sprites::DECORATION, Vec2::new(deco.x, deco.y), Vec2::ZERO)?
            .with_layer(RenderLayer::Background);
        if let Some(sprite) = entity.sprite.as_mut() {
            sprite.col = cell.0;
            sprite.row = cell.1;
        }
        b.insert(entity, Actor::Decoration, Group::Decoration);
    }

    for spawn in &level.enemies {
        let anim = AnimationComponent::new()
            .with_clip(enemy::clips::MOVE, b.clip(&spawn.image, &[0, 1, 2], 8.0, true)?)
            .with_clip(enemy::clips::DIE, b.clip(&spawn.image, &[3, 3], 6.0, false)?);
        let mut entity = b.sprite("enemy", &spawn.image, Vec2::new(spawn.x, spawn.y), Vec2::splat(0.5))?;
        let size = entity.scale;
        entity = entity.with_animation(anim).with_body(
            ArcadeBody::new(size)
                .with_gravity(spawn.gravity)
                .with_velocity(Vec2::new(enemy::ENEMY_SPEED, 0.0))
                .with_world_bounds(),
        );
        entity.play(enemy::clips::MOVE);
        let id = entity.id;
        b.insert(entity, Actor::Enemy(Enemy::new(id)), Group::Enemies);
    }

    let hero = {
        let mut anim = AnimationComponent::new();
        for (name, frames, fps, looping) in [
            (hero::clips::STOP, &[0][..], 60.0, false),
            (hero::clips::RUN_RIGHT, &[1, 2][..], 8.0, true),
            (hero::clips::RUN_LEFT, &[1, 2][..], 8.0, true),
            (hero::clips::JUMP, &[4, 5, 6, 7][..], 12.0, true),
            (hero::clips::DIE, &[8][..], 60.0, false),
            (hero::clips::HURT, &[9][..], 60.0, false),
        ] {
            anim.add(name, b.clip(sprites::HERO, frames, fps, looping)?);
        }
        let mut entity = b
            .sprite("hero", sprites::HERO, level.hero.vec2(), Vec2::splat(0.5))?
            .with_layer(RenderLayer::Foreground);
        let size = entity.scale;
        entity = entity.with_animation(anim).with_body(ArcadeBody::new(size).with_world_bounds());
        entity.play(hero::clips::STOP);
        let id = entity.id;
        b.ctx.scene.spawn(entity);
        Hero::new(id)
    };

    for platform in &level.platforms {
        let entity = b
            .sprite("platform", &platform.image, Vec2::new(platform.x, platform.y), Vec2::ZERO)?
            .with_layer(RenderLayer::Terrain);
        let size = entity.scale;
        b.insert(
            entity.with_body(ArcadeBody::new(size).with_gravity(false).immovable()),
            Actor::Platform,
            Group::Platforms,
        );
        // walls stand on the platform's top corners, just outside it
        for (x, anchor) in [(platform.x, Vec2::new(1.0, 1.0)), (platform.x + size.x, Vec2::new(0.0, 1.0))] {
            let mut wall = b.sprite("enemy wall", sprites::INVISIBLE_WALL, Vec2::new(x, platform.y), anchor)?;
            let wall_size = wall.scale;
            if let Some(sprite) = wall.sprite.as_mut() {
                sprite.visible = false;
            }
            b.insert(
                wall.with_body(ArcadeBody::new(wall_size).with_gravity(false).immovable()),
                Actor::EnemyWall,
                Group::EnemyWalls,
            );
        }
    }

    for spawn in &level.moving_blocks {
        let entity = b.sprite("moving block", sprites::BLOCK, spawn.vec2(), Vec2::ZERO)?;
        let size = entity.scale;
        let id = entity.id;
        b.insert(
            entity.with_body(
                ArcadeBody::new(size)
                    .with_gravity(false)
                    .immovable()
                    .with_world_bounds()
                    .with_velocity(Vec2::new(enemy::BLOCK_SPEED, 0.0)),
            ),
            Actor::MovingBlock(MovingBlock::new(id)),
            Group::MovingBlocks,
        );
    }

    for tile in &level.lava {
        let flow = b.clip(&tile.image, &[0, 1, 2], 6.0, true)?;
        let mut entity = b
            .sprite("lava", &tile.image, Vec2::new(tile.x, tile.y), Vec2::ZERO)?
            .with_layer(RenderLayer::Terrain)
            .with_animation(AnimationComponent::single(clips::LAVA_FLOW, flow));
        let size = entity.scale;
        entity = entity.with_body(ArcadeBody::new(size).with_gravity(false).immovable());
        b.insert(entity, Actor::Lava, Group::Lava);
    }

    for spawn in &level.spring {
        let jump = b.clip(sprites::SPRING, &[0, 1, 0], 12.0, false)?;
        let entity = b.sprite("spring", sprites::SPRING, spawn.vec2(), Vec2::ZERO)?;
        let size = entity.scale;
        let anim = AnimationComponent::new().with_clip(clips::SPRING_JUMP, jump);
        b.insert(
            entity.with_animation(anim).with_body(ArcadeBody::new(size).with_gravity(false)),
            Actor::Spring,
            Group::Springs,
        );
    }

    for spawn in &level.rings {
        let rotate = b.clip(sprites::RING, &[0, 1, 2, 1], 6.0, true)?;
        let entity = b.sprite("ring", sprites::RING, spawn.vec2(), Vec2::splat(0.5))?;
        let size = entity.scale;
        b.insert(
            entity
                .with_animation(AnimationComponent::single(clips::RING_ROTATE, rotate))
                .with_body(ArcadeBody::new(size).with_gravity(false)),
            Actor::Ring,
            Group::Rings,
        );
    }

    for spawn in &level.spike {
        let entity = b
            .sprite("spike", &spawn.image, Vec2::new(spawn.x, spawn.y), Vec2::splat(0.5))?
            .with_layer(RenderLayer::Terrain);
        let size = entity.scale;
        let id = entity.id;
        b.insert(
            entity.with_body(ArcadeBody::new(size).with_gravity(false).immovable()),
            Actor::Spike(Spike::new(id)),
            Group::Spikes,
        );
        b.ctx.every(hazards::SPIKE_INTERVAL_SECS, Some(id), timers::SPIKE_TOGGLE);
    }

    for spawn in &level.fireball {
        let fire = b.clip(sprites::FIREBALL, &[0], 60.0, false)?;
        let entity = b.sprite("fireball", sprites::FIREBALL, Vec2::new(spawn.x, spawn.y), Vec2::splat(0.5))?;
        let size = entity.scale;
        let id = entity.id;
        b.insert(
            entity
                .with_animation(AnimationComponent::single(clips::FIREBALL_FIRE, fire))
                .with_body(
                    ArcadeBody::new(size)
                        .with_gravity(false)
                        .immovable()
                        .with_world_bounds()
                        .with_velocity(Vec2::new(0.0, spawn.velocity)),
                ),
            Actor::Fireball(Fireball::new(id, spawn.y, spawn.height, spawn.velocity)),
            Group::Fireballs,
        );
    }

    {
        let frames: Vec<u32> = (0..=16).collect();
        let open = b.clip(sprites::FINISH, &frames, 60.0, false)?;
        let entity = b.sprite("finish", sprites::FINISH, level.finish.vec2(), Vec2::new(0.5, 1.0))?;
        let size = entity.scale;
        let anim = AnimationComponent::new().with_clip(clips::FINISH_OPEN, open);
        b.insert(
            entity.with_animation(anim).with_body(ArcadeBody::new(size).with_gravity(false)),
            Actor::Finish,
            Group::Finish,
        );
    }

    let overlay = {
        let screen = b.ctx.physics.bounds.size();
        let entity = b
            .sprite("overlay", sprites::FADE, Vec2::ZERO, Vec2::ZERO)?
            .with_layer(RenderLayer::Overlay)
            .with_scale(screen);
        let id = entity.id;
        b.ctx.scene.spawn(entity);
        id
    };

    let Builder { ctx, actors, groups } = b;
    ctx.physics.gravity = Vec2::new(0.0, GRAVITY);
    log::debug!("spawned {} level entities", groups.len());

    Ok(Spawned { hero, actors, groups, overlay })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::level::{DecorationSpawn, FireballSpawn, ImageSpawn, Point};
    use crate::assets::Assets;

    pub(crate) fn context() -> EngineContext {
        let mut ctx = EngineContext::new();
        ctx.sprites = Assets::embedded().unwrap().sprites;
        ctx
    }

    pub(crate) fn empty_level() -> LevelData {
        LevelData {
            hero: Point { x: 100.0, y: 500.0 },
            enemies: vec![],
            platforms: vec![],
            moving_blocks: vec![],
            lava: vec![],
            spring: vec![],
            rings: vec![],
            spike: vec![],
            fireball: vec![],
            finish: Point { x: 900.0, y: 546.0 },
            decoration: vec![],
        }
    }

    #[test]
    fn every_platform_gets_two_walls() {
        let mut ctx = context();
        let mut level = empty_level();
        level.platforms = vec![
            ImageSpawn { x: 0.0, y: 546.0, image: "stone:4x1".into() },
            ImageSpawn { x: 300.0, y: 400.0, image: "stone:2x1".into() },
        ];

        let spawned = spawn_level(&mut ctx, &level).unwrap();

        let walls = spawned.groups.get(Group::EnemyWalls);
        assert_eq!(walls.len(), 4);
        let first = ctx.scene.get(walls[0]).unwrap().bounds().unwrap();
        let second = ctx.scene.get(walls[1]).unwrap().bounds().unwrap();
        assert_eq!(first.max, Vec2::new(0.0, 546.0));
        assert_eq!(second.min.x, 168.0);
        assert_eq!(second.max.y, 546.0);
        assert!(!ctx.scene.get(walls[0]).unwrap().sprite.as_ref().unwrap().visible);
    }

    #[test]
    fn groups_match_level_lists() {
        let mut ctx = context();
        let mut level = empty_level();
        level.rings = vec![Point { x: 10.0, y: 10.0 }, Point { x: 20.0, y: 10.0 }];
        level.spring = vec![Point { x: 50.0, y: 530.0 }];
        level.spike = vec![ImageSpawn { x: 400.0, y: 530.0, image: "spike".into() }];
        level.fireball = vec![FireballSpawn { x: 600.0, y: 580.0, height: 150.0, velocity: 200.0 }];
        level.decoration = vec![DecorationSpawn { x: 5.0, y: 5.0, frame: 2 }];

        let spawned = spawn_level(&mut ctx, &level).unwrap();

        assert_eq!(spawned.groups.get(Group::Rings).len(), 2);
        assert_eq!(spawned.groups.get(Group::Springs).len(), 1);
        assert_eq!(spawned.groups.get(Group::Spikes).len(), 1);
        assert_eq!(spawned.groups.get(Group::Fireballs).len(), 1);
        assert_eq!(spawned.groups.get(Group::Finish).len(), 1);
        assert_eq!(spawned.groups.get(Group::Decoration).len(), 1);
        assert_eq!(spawned.groups.group_of(spawned.hero.id), None);
        assert_eq!(ctx.physics.gravity, Vec2::new(0.0, GRAVITY));
        // one repeating toggle per spike
        assert_eq!(ctx.timers.len(), 1);
    }

    #[test]
    fn finish_stands_on_its_point() {
        let mut ctx = context();
        let spawned = spawn_level(&mut ctx, &empty_level()).unwrap();

        let finish = spawned.groups.get(Group::Finish)[0];
        let bounds = ctx.scene.get(finish).unwrap().bounds().unwrap();
        assert_eq!(bounds.max.y, 546.0);
        assert_eq!(bounds.center().x, 900.0);
    }

    #[test]
    fn enemies_patrol_from_the_start() {
        let mut ctx = context();
        let mut level = empty_level();
        level.enemies = vec![crate::level::EnemySpawn { x: 300.0, y: 400.0, image: "bug".into(), gravity: false }];

        let spawned = spawn_level(&mut ctx, &level).unwrap();

        let id = spawned.groups.get(Group::Enemies)[0];
        let entity = ctx.scene.get(id).unwrap();
        let body = entity.body.as_ref().unwrap();
        assert_eq!(body.velocity.x, enemy::ENEMY_SPEED);
        assert!(!body.allow_gravity);
        assert_eq!(entity.current_clip(), Some(enemy::clips::MOVE));
        assert!(matches!(spawned.actors.get(&id), Some(Actor::Enemy(_))));
    }

    #[test]
    fn unknown_platform_image_fails() {
        let mut ctx = context();
        let mut level = empty_level();
        level.platforms = vec![ImageSpawn { x: 0.0, y: 0.0, image: "marble".into() }];

        let err = spawn_level(&mut ctx, &level).unwrap_err();
        assert!(matches!(err, LevelError::UnknownImage { kind: "platform", .. }));
    }

    #[test]
    fn removing_from_groups() {
        let mut groups = Groups::new();
        groups.add(Group::Rings, EntityId(3));
        groups.add(Group::Rings, EntityId(4));

        assert_eq!(groups.remove(EntityId(3)), Some(Group::Rings));
        assert_eq!(groups.get(Group::Rings), &[EntityId(4)]);
        assert_eq!(groups.remove(EntityId(3)), None);
        assert_eq!(groups.len(), 1);
    }
}
