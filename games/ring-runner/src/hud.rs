use hop_engine::GameEvent;

use crate::events::game_events;
use crate::session::SessionState;

pub const SCORE_LABEL: &str = "SCORE";
pub const RINGS_LABEL: &str = "RINGS";
pub const TIME_LABEL: &str = "TIME";

/// `m:ss`, minutes unpadded.
pub fn format_time(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Text shown next to the HUD labels, refreshed every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub rings: String,
    pub time: String,
}

impl Hud {
    pub fn refresh(&mut self, session: &SessionState) {
        self.score = session.score.to_string();
        self.rings = session.rings.to_string();
        self.time = format_time(session.elapsed_secs);
    }

    /// Same numbers packed for the host page.
    pub fn event(session: &SessionState) -> GameEvent {
        GameEvent::new(
            game_events::HUD,
            session.score as f32,
            session.rings as f32,
            session.elapsed_secs as f32,
        )
    }
}
