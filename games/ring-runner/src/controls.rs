use hop_engine::Keyboard;

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;

/// Jump input only counts within this window after the key went down.
pub const JUMP_WINDOW_SECS: f64 = 0.2;

/// Hero commands for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Commands {
    /// -1 left, 0 stop, 1 right.
    pub direction: i32,
    pub jump: bool,
}

/// Left wins over right when both are held.
pub fn read(keyboard: &Keyboard, now: f64) -> Commands {
    let direction = if keyboard.is_down(KEY_LEFT) {
        -1
    } else if keyboard.is_down(KEY_RIGHT) {
        1
    } else {
        0
    };
    Commands {
        direction,
        // pressed less than the window ago, not held at least that long
        jump: keyboard.down_duration(KEY_UP, JUMP_WINDOW_SECS, now),
    }
}
