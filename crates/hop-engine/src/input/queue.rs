/// Input events the engine understands. Key codes are DOM `keyCode` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Auto-repeat delivers this again while the key is held.
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Host-defined event; `kind` picks the meaning of `a`, `b`, `c`.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events pushed by the host between ticks. The runner clears it after the
/// first fixed step that sees it.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Key transitions in arrival order as `(key_code, pressed)`.
    pub fn key_events(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            InputEvent::KeyDown { key_code } => Some((key_code, true)),
            InputEvent::KeyUp { key_code } => Some((key_code, false)),
            InputEvent::Custom { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
