//! Animation sub-states that gate input between committed quiz states.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Skip.
    Left,
    /// Choose.
    Right,
}

impl SwipeDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Which visual transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Question,
    Swipe(SwipeDirection),
    Reveal,
}

/// Presentation sub-state layered over the committed session.
///
/// `Exiting` runs before the next state is committed, `Entering` after.
/// Input is only accepted while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Idle,
    Exiting(MotionKind),
    Entering(MotionKind),
}

impl Motion {
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_entering(self) -> bool {
        matches!(self, Self::Entering(_))
    }
}

/// Durations of each animated sub-phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub question_exit: Duration,
    pub question_settle: Duration,
    pub card_swipe: Duration,
    pub card_settle: Duration,
    pub result_reveal_delay: Duration,
    pub result_fade: Duration,
    pub lead_capture_close_delay: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            question_exit: Duration::from_millis(300),
            question_settle: Duration::from_millis(50),
            card_swipe: Duration::from_millis(700),
            card_settle: Duration::from_millis(50),
            result_reveal_delay: Duration::from_millis(100),
            result_fade: Duration::from_millis(600),
            lead_capture_close_delay: Duration::from_millis(2000),
        }
    }
}

impl TransitionTimings {
    /// All-zero timings; transitions still go through every sub-phase.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            question_exit: Duration::ZERO,
            question_settle: Duration::ZERO,
            card_swipe: Duration::ZERO,
            card_settle: Duration::ZERO,
            result_reveal_delay: Duration::ZERO,
            result_fade: Duration::ZERO,
            lead_capture_close_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn exit_for(&self, kind: MotionKind) -> Duration {
        match kind {
            MotionKind::Question => self.question_exit,
            MotionKind::Swipe(_) => self.card_swipe,
            MotionKind::Reveal => Duration::ZERO,
        }
    }

    #[must_use]
    pub fn settle_for(&self, kind: MotionKind) -> Duration {
        match kind {
            MotionKind::Question => self.question_settle,
            MotionKind::Swipe(_) => self.card_settle,
            MotionKind::Reveal => self.result_reveal_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_accepts_input() {
        assert!(Motion::Idle.accepts_input());
        assert!(!Motion::Exiting(MotionKind::Question).accepts_input());
        assert!(!Motion::Entering(MotionKind::Reveal).accepts_input());
    }

    #[test]
    fn default_timings_match_page_transitions() {
        let timings = TransitionTimings::default();
        assert_eq!(timings.exit_for(MotionKind::Question), Duration::from_millis(300));
        assert_eq!(
            timings.exit_for(MotionKind::Swipe(SwipeDirection::Left)),
            Duration::from_millis(700)
        );
        assert_eq!(timings.settle_for(MotionKind::Reveal), Duration::from_millis(100));
    }
}
