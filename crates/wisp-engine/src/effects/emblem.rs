//! Logo click counter behind the easter egg.

/// Counts emblem clicks toward the spin-then-pulse easter egg.
#[derive(Debug, Clone)]
pub struct EmblemState {
    clicks: u32,
    threshold: u32,
}

impl EmblemState {
    pub fn new(threshold: u32) -> Self {
        Self { clicks: 0, threshold: threshold.max(1) }
    }

    /// Count one click. Returns true when the threshold is reached; the
    /// count resets so the egg can be triggered again.
    pub fn click(&mut self) -> bool {
        self.clicks += 1;
        if self.clicks >= self.threshold {
            self.clicks = 0;
            true
        } else {
            false
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_the_fifth_click() {
        let mut emblem = EmblemState::new(5);
        for _ in 0..4 {
            assert!(!emblem.click());
        }
        assert!(emblem.click());
    }

    #[test]
    fn resets_and_can_fire_again() {
        let mut emblem = EmblemState::new(5);
        for _ in 0..5 {
            emblem.click();
        }
        assert_eq!(emblem.clicks(), 0);
        for _ in 0..4 {
            assert!(!emblem.click());
        }
        assert!(emblem.click());
    }

    #[test]
    fn zero_threshold_behaves_as_one() {
        let mut emblem = EmblemState::new(0);
        assert!(emblem.click());
    }
}
