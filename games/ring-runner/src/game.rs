use hop_engine::{EngineContext, Game, GameConfig, GameEvent, InputQueue, Keyboard};

use crate::assets::Assets;
use crate::controls;
use crate::events::game_events;
use crate::level::LevelData;
use crate::play::{PlayParams, PlayState};

enum Screen {
    /// Waiting for the first step to parse the catalog.
    Loading,
    Playing(Box<PlayState>),
    /// Assets or a level could not be loaded. Nothing runs.
    Failed,
}

/// Ring Runner: a single-screen platformer. Collect rings, stomp enemies,
/// reach the gate.
pub struct RingRunner {
    config: GameConfig,
    keyboard: Keyboard,
    /// Game-side clock for key press times; survives level restarts.
    clock: f64,
    screen: Screen,
    /// Preloaded catalog, otherwise the embedded one is parsed on load.
    assets: Option<Assets>,
    levels: Vec<LevelData>,
}

impl RingRunner {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            keyboard: Keyboard::new(),
            clock: 0.0,
            screen: Screen::Loading,
            assets: None,
            levels: Vec::new(),
        }
    }

    pub fn with_assets(assets: Assets) -> Self {
        Self { assets: Some(assets), ..Self::new() }
    }

    /// The running level, if any.
    pub fn play(&self) -> Option<&PlayState> {
        match &self.screen {
            Screen::Playing(play) => Some(play),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading)
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.screen, Screen::Failed)
    }

    fn load(&mut self, ctx: &mut EngineContext) {
        let loaded = match self.assets.take() {
            Some(assets) => Ok(assets),
            None => Assets::embedded(),
        };
        match loaded {
            Ok(assets) => {
                ctx.sprites = assets.sprites;
                self.levels = assets.levels;
                self.enter_level(ctx, PlayParams::first());
            }
            Err(err) => {
                log::error!("loading failed: {err}");
                self.fail(ctx);
            }
        }
    }

    fn enter_level(&mut self, ctx: &mut EngineContext, params: PlayParams) {
        match PlayState::start(ctx, &self.levels, params) {
            Ok(play) => self.screen = Screen::Playing(Box::new(play)),
            Err(err) => {
                log::error!("could not start level {}: {err}", params.level);
                self.fail(ctx);
            }
        }
    }

    fn fail(&mut self, ctx: &mut EngineContext) {
        ctx.reset();
        ctx.emit_event(GameEvent::new(game_events::LOAD_FAILED, 0.0, 0.0, 0.0));
        self.screen = Screen::Failed;
    }
}

impl Default for RingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for RingRunner {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("ring-runner: loading");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.clock += f64::from(self.config.fixed_dt);
        self.keyboard.handle(input, self.clock);

        if self.is_loading() {
            self.load(ctx);
            return;
        }

        let next = match &mut self.screen {
            Screen::Playing(play) => play.update(ctx, controls::read(&self.keyboard, self.clock)),
            Screen::Loading | Screen::Failed => None,
        };
        if let Some(params) = next {
            self.enter_level(ctx, params);
        }
    }
}
