/// Points for stomping an enemy.
pub const STOMP_POINTS: u32 = 100;
/// Points carried into the next level after finishing one.
pub const LEVEL_BONUS: u32 = 1000;

/// Counters for the current run, owned by the play state and handed to
/// the rules and the HUD by reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub score: u32,
    pub rings: u32,
    pub elapsed_secs: u32,
}

impl SessionState {
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn collect_ring(&mut self) {
        self.rings += 1;
    }

    /// All rings are lost on a hit.
    pub fn lose_rings(&mut self) {
        self.rings = 0;
    }

    pub fn tick_second(&mut self) {
        self.elapsed_secs += 1;
    }

    /// Session for the level after this one: score plus the bonus, fresh
    /// rings and clock.
    pub fn for_next_level(&self) -> Self {
        Self {
            score: self.score.saturating_add(LEVEL_BONUS),
            ..Self::default()
        }
    }

    /// Session after a death: everything starts over.
    pub fn for_retry(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_level_keeps_score_only() {
        let s = SessionState { score: 300, rings: 4, elapsed_secs: 61 };
        assert_eq!(s.for_next_level(), SessionState { score: 1300, rings: 0, elapsed_secs: 0 });
    }

    #[test]
    fn retry_resets_everything() {
        let s = SessionState { score: 300, rings: 4, elapsed_secs: 61 };
        assert_eq!(s.for_retry(), SessionState::default());
    }

    #[test]
    fn rings_are_lost_together() {
        let mut s = SessionState::default();
        s.collect_ring();
        s.collect_ring();
        s.lose_rings();
        assert_eq!(s.rings, 0);
    }
}
