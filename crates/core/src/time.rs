use chrono::{DateTime, Duration, Utc};

/// Wall clock used to timestamp analytics records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// A clock that only moves when told to.
    Manual(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn manual(at: DateTime<Utc>) -> Self {
        Self::Manual(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Manual(at) => *at,
        }
    }

    /// Move a manual clock forward. No effect on the system clock.
    pub fn advance(&mut self, by: std::time::Duration) {
        if let Self::Manual(at) = self {
            let delta = Duration::from_std(by).unwrap_or(Duration::MAX);
            *at = at.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
        }
    }
}

/// 2023-11-14T22:13:20Z, for deterministic tests.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::manual(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(std::time::Duration::from_millis(1500));
        assert_eq!(clock.now().timestamp_millis(), FIXED_TEST_TIMESTAMP * 1000 + 1500);
    }
}
