//! Numeric kinds for the engine queues and the host page.

/// Timer kinds.
pub mod timers {
    /// Once per second while playing.
    pub const CLOCK: u32 = 1;
    pub const SPIKE_TOGGLE: u32 = 2;
    pub const HURT_OVER: u32 = 3;
    pub const INVINCIBLE_OVER: u32 = 4;
    /// Dead hero leaves the level.
    pub const HERO_REMOVE: u32 = 5;
}

/// Tween completion kinds.
pub mod tweens {
    /// Hero finished running off-screen after touching the goal.
    pub const FINISH_RUN: u32 = 1;
    /// Screen is fully black after the level exit fade.
    pub const EXIT_FADE: u32 = 2;
}

/// Sound cues; ids match `event_id` in `assets/manifest.json`.
pub mod sfx {
    use hop_engine::SoundEvent;

    pub const MUSIC: SoundEvent = SoundEvent(1);
    pub const JUMP: SoundEvent = SoundEvent(2);
    pub const SPRING: SoundEvent = SoundEvent(3);
    pub const RING: SoundEvent = SoundEvent(4);
    pub const POP: SoundEvent = SoundEvent(5);
    pub const FINISH: SoundEvent = SoundEvent(6);
    pub const HURT: SoundEvent = SoundEvent(7);
    pub const DEAD: SoundEvent = SoundEvent(8);

    pub const ALL: [SoundEvent; 8] = [MUSIC, JUMP, SPRING, RING, POP, FINISH, HURT, DEAD];
}

/// Game event kinds sent to the host page.
pub mod game_events {
    /// a = score, b = rings, c = elapsed seconds.
    pub const HUD: f32 = 1.0;
    /// a = level index.
    pub const LEVEL_START: f32 = 2.0;
    /// Loading failed; the game will not start.
    pub const LOAD_FAILED: f32 = 3.0;
}
