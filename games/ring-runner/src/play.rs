//! The Playing screen: one level from spawn to death or exit.

use std::collections::BTreeMap;

use hop_engine::{Completion, EngineContext, EntityId, GameEvent, Tween};

use crate::actors::{enemy, Actor, Hero, Updatable};
use crate::controls::Commands;
use crate::events::{game_events, sfx, timers, tweens};
use crate::hud::Hud;
use crate::level::{LevelData, LevelError};
use crate::rules;
use crate::session::SessionState;
use crate::spawn::{spawn_level, Groups, Spawned};

/// Length of the black flash at level start and of the exit fade.
pub const FADE_SECS: f32 = 0.5;

/// What the next Playing screen starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayParams {
    pub level: usize,
    pub session: SessionState,
}

impl PlayParams {
    pub fn first() -> Self {
        Self { level: 0, session: SessionState::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Hero died; replay the same level from scratch.
    Restart,
    /// Exit fade finished.
    NextLevel,
}

#[derive(Debug)]
pub struct PlayState {
    level: usize,
    level_count: usize,
    session: SessionState,
    hero: Hero,
    actors: BTreeMap<EntityId, Actor>,
    groups: Groups,
    overlay: EntityId,
    hud: Hud,
    pending: Option<Transition>,
}

impl PlayState {
    /// Tear down whatever `ctx` holds and build level `params.level`.
    pub fn start(ctx: &mut EngineContext, levels: &[LevelData], params: PlayParams) -> Result<Self, LevelError> {
        let data = levels
            .get(params.level)
            .ok_or(LevelError::NoSuchLevel { index: params.level })?;

        ctx.reset();
        let Spawned { hero, actors, groups, overlay } = spawn_level(ctx, data)?;

        ctx.every(1.0, None, timers::CLOCK);
        ctx.tween(overlay, Tween::alpha(1.0, 0.0, FADE_SECS));
        ctx.emit_sound(sfx::MUSIC);
        ctx.emit_event(GameEvent::new(game_events::LEVEL_START, params.level as f32, 0.0, 0.0));
        log::info!("level {} started, score {}", params.level, params.session.score);

        let mut hud = Hud::default();
        hud.refresh(&params.session);

        Ok(Self {
            level: params.level,
            level_count: levels.len(),
            session: params.session,
            hero,
            actors,
            groups,
            overlay,
            hud,
            pending: None,
        })
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// One step after physics has run. Returns the parameters for the next
    /// Playing screen once this one is over.
    pub fn update(&mut self, ctx: &mut EngineContext, commands: Commands) -> Option<PlayParams> {
        self.handle_completions(ctx);

        if let Some(transition) = self.pending.take() {
            return Some(match transition {
                Transition::Restart => PlayParams { level: self.level, session: self.session.for_retry() },
                Transition::NextLevel => PlayParams {
                    level: (self.level + 1) % self.level_count.max(1),
                    session: self.session.for_next_level(),
                },
            });
        }

        let collected = rules::resolve(ctx, &mut self.hero, &mut self.actors, &self.groups, &mut self.session);
        for ring in collected {
            self.destroy(ctx, ring);
        }

        self.handle_input(ctx, commands);

        self.hero.update(ctx);
        for actor in self.actors.values_mut() {
            actor.update(ctx);
        }

        self.hud.refresh(&self.session);
        ctx.emit_event(Hud::event(&self.session));
        None
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, commands: Commands) {
        self.hero.walk(ctx, commands.direction);
        if commands.jump {
            if self.hero.jump(ctx, None) {
                ctx.emit_sound(sfx::JUMP);
            } else {
                self.hero.stop_jump_boost();
            }
        }
    }

    fn handle_completions(&mut self, ctx: &mut EngineContext) {
        for done in ctx.drain_completions() {
            match done {
                Completion::Timer { kind: timers::CLOCK, .. } => self.session.tick_second(),
                Completion::Timer { owner: Some(owner), kind: timers::SPIKE_TOGGLE, .. } => {
                    if let Some(Actor::Spike(spike)) = self.actors.get_mut(&owner) {
                        spike.toggle(ctx);
                    }
                }
                Completion::Timer { id, kind: timers::HURT_OVER | timers::INVINCIBLE_OVER, .. } => {
                    self.hero.on_timer(id);
                }
                Completion::Timer { kind: timers::HERO_REMOVE, .. } => {
                    ctx.despawn(self.hero.id);
                    self.pending = Some(Transition::Restart);
                }
                Completion::Animation { entity, clip } if entity == self.hero.id => {
                    self.hero.on_clip_finished(ctx, &clip);
                }
                Completion::Animation { entity, clip } if clip == enemy::clips::DIE => {
                    if matches!(self.actors.get(&entity), Some(Actor::Enemy(_))) {
                        self.destroy(ctx, entity);
                    }
                }
                Completion::Tween { kind: tweens::FINISH_RUN, .. } => {
                    ctx.tween(
                        self.overlay,
                        Tween::alpha(0.0, 1.0, FADE_SECS).with_on_complete(tweens::EXIT_FADE),
                    );
                }
                Completion::Tween { kind: tweens::EXIT_FADE, .. } => {
                    self.pending = Some(Transition::NextLevel);
                }
                _ => {}
            }
        }
    }

    /// Remove an entity from the world, its group and the actor table.
    fn destroy(&mut self, ctx: &mut EngineContext, id: EntityId) {
        ctx.despawn(id);
        self.groups.remove(id);
        self.actors.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::hazards::SPIKE_TRAVEL;
    use crate::actors::Damageable;
    use crate::level::{EnemySpawn, ImageSpawn, Point};
    use crate::spawn::tests::{context, empty_level};
    use crate::spawn::Group;

    const DT: f32 = 1.0 / 60.0;
    const RIGHT: Commands = Commands { direction: 1, jump: false };
    const IDLE: Commands = Commands { direction: 0, jump: false };

    fn floor_level() -> LevelData {
        let mut level = empty_level();
        level.hero = Point { x: 100.0, y: 525.0 };
        level.platforms = vec![
            ImageSpawn { x: 0.0, y: 546.0, image: "stone:16x1".into() },
            ImageSpawn { x: 672.0, y: 546.0, image: "stone:8x1".into() },
        ];
        level.finish = Point { x: 400.0, y: 546.0 };
        level
    }

    /// Step until the play state hands over, or give up after `frames`.
    fn run_until_over(
        ctx: &mut EngineContext,
        play: &mut PlayState,
        commands: Commands,
        frames: usize,
        mut each: impl FnMut(&EngineContext, &PlayState),
    ) -> Option<PlayParams> {
        for _ in 0..frames {
            ctx.clear_frame_data();
            ctx.step(DT);
            if let Some(next) = play.update(ctx, commands) {
                return Some(next);
            }
            each(ctx, play);
        }
        None
    }

    #[test]
    fn start_flashes_and_plays_music() {
        let mut ctx = context();
        let play = PlayState::start(&mut ctx, &[floor_level()], PlayParams::first()).unwrap();

        assert_eq!(ctx.sounds, vec![sfx::MUSIC]);
        assert_eq!(ctx.events[0].kind, game_events::LEVEL_START);
        assert_eq!(ctx.tweens.len(), 1);
        assert_eq!(play.hud().time, "0:00");
    }

    #[test]
    fn missing_level_index_is_an_error() {
        let mut ctx = context();
        let params = PlayParams { level: 4, session: SessionState::default() };

        let err = PlayState::start(&mut ctx, &[floor_level()], params).unwrap_err();
        assert!(matches!(err, LevelError::NoSuchLevel { index: 4 }));
    }

    #[test]
    fn hero_rests_on_the_floor() {
        let mut ctx = context();
        let mut play = PlayState::start(&mut ctx, &[floor_level()], PlayParams::first()).unwrap();

        run_until_over(&mut ctx, &mut play, IDLE, 30, |_, _| {});

        let hero = play.hero();
        assert!(hero.on_ground(&ctx));
        let bounds = ctx.scene.get(hero.id).unwrap().bounds().unwrap();
        assert!((bounds.max.y - 546.0).abs() < 0.5, "hero bottom at {}", bounds.max.y);
    }

    #[test]
    fn collecting_a_ring_and_finishing_advances() {
        let mut ctx = context();
        let mut level = floor_level();
        level.rings = vec![Point { x: 200.0, y: 525.0 }];
        let levels = vec![level.clone(), level];
        let mut play = PlayState::start(&mut ctx, &levels, PlayParams::first()).unwrap();

        let mut rings_when_frozen = None;
        let next = run_until_over(&mut ctx, &mut play, RIGHT, 600, |_, play| {
            if play.hero().is_frozen() && rings_when_frozen.is_none() {
                rings_when_frozen = Some(play.session().rings);
            }
        })
        .expect("level should end");

        assert_eq!(rings_when_frozen, Some(1));
        assert_eq!(play.session().score, 0);
        assert!(play.groups().get(Group::Rings).is_empty());
        assert_eq!(next.level, 1);
        assert_eq!(next.session, SessionState { score: 1000, rings: 0, elapsed_secs: 0 });

        let play = PlayState::start(&mut ctx, &levels, next).unwrap();
        assert_eq!(play.level(), 1);
        assert_eq!(play.session().score, 1000);
        assert_eq!(play.session().rings, 0);
    }

    #[test]
    fn finishing_the_last_level_wraps_to_the_first() {
        let mut ctx = context();
        let levels = vec![floor_level()];
        let params = PlayParams { level: 0, session: SessionState { score: 250, rings: 2, elapsed_secs: 9 } };
        let mut play = PlayState::start(&mut ctx, &levels, params).unwrap();

        let next = run_until_over(&mut ctx, &mut play, RIGHT, 600, |_, _| {}).expect("level should end");

        assert_eq!(next.level, 0);
        assert_eq!(next.session.score, 1250);
    }

    #[test]
    fn touching_lava_without_rings_restarts_the_level() {
        let mut ctx = context();
        let mut level = floor_level();
        level.lava = vec![ImageSpawn { x: 84.0, y: 546.0, image: "lava".into() }];
        level.platforms.clear();
        let levels = vec![level];
        let params = PlayParams { level: 0, session: SessionState { score: 500, rings: 0, elapsed_secs: 3 } };
        let mut play = PlayState::start(&mut ctx, &levels, params).unwrap();
        let first_hero = play.hero().id;

        let mut dead_sound = false;
        let next = run_until_over(&mut ctx, &mut play, IDLE, 120, |ctx, _| {
            dead_sound |= ctx.sounds.contains(&sfx::DEAD);
        })
        .expect("dead hero should restart the level");

        assert!(dead_sound);
        assert!(!play.hero().is_alive());
        assert_eq!(next, PlayParams { level: 0, session: SessionState::default() });

        let play = PlayState::start(&mut ctx, &levels, next).unwrap();
        assert_ne!(play.hero().id, first_hero);
        assert!(play.hero().is_alive());
    }

    #[test]
    fn lava_with_rings_only_hurts() {
        let mut ctx = context();
        let mut level = floor_level();
        level.lava = vec![ImageSpawn { x: 84.0, y: 546.0, image: "lava".into() }];
        level.platforms.clear();
        let params = PlayParams { level: 0, session: SessionState { rings: 4, ..Default::default() } };
        let mut play = PlayState::start(&mut ctx, &[level], params).unwrap();

        let over = run_until_over(&mut ctx, &mut play, IDLE, 20, |_, _| {});

        assert!(over.is_none());
        assert!(play.hero().is_alive());
        assert!(play.hero().is_invincible());
        assert_eq!(play.session().rings, 0);
    }

    #[test]
    fn stomped_enemy_is_removed_after_its_clip() {
        let mut ctx = context();
        let mut level = floor_level();
        level.hero = Point { x: 315.0, y: 440.0 };
        level.enemies = vec![EnemySpawn { x: 300.0, y: 531.0, image: "bug".into(), gravity: true }];
        let mut play = PlayState::start(&mut ctx, &[level], PlayParams::first()).unwrap();

        run_until_over(&mut ctx, &mut play, IDLE, 90, |_, _| {});

        assert!(play.groups().get(Group::Enemies).is_empty());
        assert_eq!(play.session().score, crate::session::STOMP_POINTS);
        assert!(play.hero().is_alive());
    }

    #[test]
    fn grounded_enemy_contact_costs_rings_and_the_enemy_walks_on() {
        let mut ctx = context();
        let mut level = floor_level();
        level.enemies = vec![EnemySpawn { x: 30.0, y: 531.0, image: "bug".into(), gravity: true }];
        let params = PlayParams { level: 0, session: SessionState { rings: 3, ..Default::default() } };
        let mut play = PlayState::start(&mut ctx, &[level], params).unwrap();
        let bug = play.groups().get(Group::Enemies)[0];

        let mut at_hit = None;
        run_until_over(&mut ctx, &mut play, IDLE, 60, |ctx, play| {
            if at_hit.is_none() && play.session().rings == 0 {
                let body = ctx.scene.get(bug).and_then(|e| e.body.as_ref()).unwrap();
                at_hit = Some((
                    body.enable,
                    body.velocity.x,
                    play.hero().is_alive(),
                    play.hero().is_invincible(),
                    play.session().score,
                ));
            }
        });

        assert_eq!(at_hit, Some((true, enemy::ENEMY_SPEED, true, true, 0)));
    }

    #[test]
    fn enemy_patrols_between_its_platform_walls() {
        let mut ctx = context();
        let mut level = floor_level();
        level.platforms.push(ImageSpawn { x: 400.0, y: 300.0, image: "stone:4x1".into() });
        level.enemies = vec![EnemySpawn { x: 484.0, y: 280.0, image: "bug".into(), gravity: true }];
        let mut play = PlayState::start(&mut ctx, &[level], PlayParams::first()).unwrap();
        let bug = play.groups().get(Group::Enemies)[0];

        let (mut left, mut right) = (f32::MAX, f32::MIN);
        let (mut heading, mut turns) = (enemy::ENEMY_SPEED, 0);
        run_until_over(&mut ctx, &mut play, IDLE, 900, |ctx, _| {
            let entity = ctx.scene.get(bug).unwrap();
            let bounds = entity.bounds().unwrap();
            left = left.min(bounds.min.x);
            right = right.max(bounds.max.x);
            let vx = entity.body.as_ref().unwrap().velocity.x;
            if vx != 0.0 && vx.signum() != heading.signum() {
                heading = vx;
                turns += 1;
            }
        });

        assert!(left >= 399.5 && right <= 568.5, "enemy left its platform: {left}..{right}");
        assert!(turns >= 4, "only {turns} turns");
        assert_eq!(play.groups().get(Group::Enemies), &[bug]);
    }

    #[test]
    fn moving_block_turns_back_at_a_platform() {
        let mut ctx = context();
        let mut level = floor_level();
        level.platforms.push(ImageSpawn { x: 700.0, y: 400.0, image: "stone:1x1".into() });
        level.moving_blocks = vec![Point { x: 500.0, y: 400.0 }];
        let mut play = PlayState::start(&mut ctx, &[level], PlayParams::first()).unwrap();
        let block = play.groups().get(Group::MovingBlocks)[0];

        let mut right = f32::MIN;
        let mut turned = false;
        run_until_over(&mut ctx, &mut play, IDLE, 150, |ctx, _| {
            let entity = ctx.scene.get(block).unwrap();
            right = right.max(entity.bounds().unwrap().max.x);
            turned |= entity.body.as_ref().unwrap().velocity.x == -enemy::BLOCK_SPEED;
        });

        assert!(turned);
        assert!(right < 702.0, "block ran into the platform up to {right}");
        assert!(ctx.scene.get(block).unwrap().pos.x < 500.0);
    }

    #[test]
    fn spikes_toggle_on_their_timer() {
        let mut ctx = context();
        let mut level = floor_level();
        level.spike = vec![ImageSpawn { x: 300.0, y: 525.0, image: "spike".into() }];
        let mut play = PlayState::start(&mut ctx, &[level], PlayParams::first()).unwrap();
        let spike = play.groups().get(Group::Spikes)[0];
        let spike_y = |ctx: &EngineContext| ctx.scene.get(spike).unwrap().pos.y;

        run_until_over(&mut ctx, &mut play, IDLE, 80, |_, _| {});
        assert_eq!(spike_y(&ctx), 525.0);

        run_until_over(&mut ctx, &mut play, IDLE, 20, |_, _| {});
        assert_eq!(spike_y(&ctx), 525.0 - SPIKE_TRAVEL);

        run_until_over(&mut ctx, &mut play, IDLE, 90, |_, _| {});
        assert_eq!(spike_y(&ctx), 525.0);
        assert!(play.hero().is_alive());
    }

    #[test]
    fn clock_counts_whole_seconds() {
        let mut ctx = context();
        let mut play = PlayState::start(&mut ctx, &[floor_level()], PlayParams::first()).unwrap();

        run_until_over(&mut ctx, &mut play, IDLE, 125, |_, _| {});

        assert_eq!(play.session().elapsed_secs, 2);
        assert_eq!(play.hud().time, "0:02");
        let hud = ctx.events.iter().rev().find(|e| e.kind == game_events::HUD).unwrap();
        assert_eq!(hud.c, 2.0);
    }
}
