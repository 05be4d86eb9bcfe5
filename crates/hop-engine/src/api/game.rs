use glam::Vec2;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::assets::registry::SpriteRegistry;
use crate::core::physics::ArcadePhysics;
use crate::core::scene::Scene;
use crate::core::timer::{TimerId, TimerQueue};
use crate::extensions::tween::{Tween, TweenId, TweenState};
use crate::input::queue::InputQueue;
use crate::systems::animation::tick_animations;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 960.0,
            world_height: 600.0,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step of game logic. Runs after `EngineContext::step`, so
    /// physics has moved bodies and completions of this step are queued.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Something scheduled earlier that finished during `EngineContext::step`.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Timer { id: TimerId, owner: Option<EntityId>, kind: u32 },
    Tween { entity: EntityId, kind: u32 },
    Animation { entity: EntityId, clip: String },
}

impl Completion {
    /// The entity this completion belongs to, if any.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Completion::Timer { owner, .. } => *owner,
            Completion::Tween { entity, .. } => Some(*entity),
            Completion::Animation { entity, .. } => Some(*entity),
        }
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: ArcadePhysics,
    pub timers: TimerQueue,
    pub tweens: TweenState,
    pub sprites: SpriteRegistry,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    completions: Vec<Completion>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            physics: ArcadePhysics::new(config.world_width, config.world_height),
            timers: TimerQueue::new(),
            tweens: TweenState::new(),
            sprites: SpriteRegistry::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            completions: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance the world by one fixed step: physics, clips, tweens, timers.
    /// Everything that finished is queued for `drain_completions`.
    pub fn step(&mut self, dt: f32) {
        self.physics.step(&mut self.scene, dt);

        for (entity, clip) in tick_animations(&mut self.scene, dt) {
            self.completions.push(Completion::Animation { entity, clip });
        }
        for (entity, kind) in self.tweens.tick(dt, &mut self.scene) {
            self.completions.push(Completion::Tween { entity, kind });
        }
        for fired in self.timers.advance(dt) {
            self.completions.push(Completion::Timer {
                id: fired.id,
                owner: fired.owner,
                kind: fired.kind,
            });
        }
    }

    /// Take everything that completed since the last drain, in order.
    pub fn drain_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.completions)
    }

    pub fn after(&mut self, delay: f32, owner: Option<EntityId>, kind: u32) -> TimerId {
        self.timers.after(delay, owner, kind)
    }

    pub fn every(&mut self, interval: f32, owner: Option<EntityId>, kind: u32) -> TimerId {
        self.timers.every(interval, owner, kind)
    }

    pub fn tween(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        self.tweens.add(entity, tween)
    }

    /// Remove an entity along with its timers, tweens and any queued
    /// completions, so nothing fires for it afterwards.
    pub fn despawn(&mut self, id: EntityId) {
        self.scene.despawn(id);
        self.timers.cancel_owner(id);
        self.tweens.remove_entity(id);
        self.completions.retain(|c| c.entity() != Some(id));
    }

    /// Tear down the whole world for a rebuild. Entity ids keep counting up.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.timers.clear();
        self.tweens.clear();
        self.completions.clear();
        self.physics.gravity = Vec2::ZERO;
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
