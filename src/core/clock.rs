/// Real-time counter for one observer's calendar.
///
/// Fires at most once per `tick`; time past the threshold is dropped, not banked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockAccumulator {
    accumulated_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub fired: bool,
    pub jump_days: u64,
}

impl Tick {
    pub const IDLE: Tick = Tick {
        fired: false,
        jump_days: 0,
    };
}

impl ClockAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn tick(&mut self, elapsed_ms: u64, threshold_ms: u64, jump_days: u64) -> Tick {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= threshold_ms {
            self.accumulated_ms = 0;
            Tick {
                fired: true,
                jump_days,
            }
        } else {
            Tick::IDLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_below_threshold() {
        let mut clock = ClockAccumulator::new();
        assert_eq!(clock.tick(16, 1000, 1), Tick::IDLE);
        assert_eq!(clock.tick(16, 1000, 1), Tick::IDLE);
        assert_eq!(clock.accumulated_ms(), 32);
    }

    #[test]
    fn fires_on_reaching_threshold_and_resets() {
        let mut clock = ClockAccumulator::new();
        clock.tick(600, 1000, 1);
        let tick = clock.tick(400, 1000, 1);
        assert!(tick.fired);
        assert_eq!(tick.jump_days, 1);
        assert_eq!(clock.accumulated_ms(), 0);
    }

    #[test]
    fn overshoot_is_not_carried() {
        let mut clock = ClockAccumulator::new();
        clock.tick(990, 1000, 1);
        assert!(clock.tick(500, 1000, 1).fired);
        assert_eq!(clock.accumulated_ms(), 0);
        assert!(!clock.tick(500, 1000, 1).fired);
    }

    #[test]
    fn large_elapsed_fires_only_once() {
        let mut clock = ClockAccumulator::new();
        let tick = clock.tick(10_000, 100, 4);
        assert_eq!(
            tick,
            Tick {
                fired: true,
                jump_days: 4
            }
        );
    }

    #[test]
    fn zero_threshold_fires_every_tick() {
        let mut clock = ClockAccumulator::new();
        assert!(clock.tick(0, 0, 1).fired);
        assert!(clock.tick(0, 0, 1).fired);
    }

    #[test]
    fn saturated_threshold_never_fires() {
        let mut clock = ClockAccumulator::new();
        for _ in 0..100 {
            assert!(!clock.tick(1_000_000, u64::MAX, 1).fired);
        }
    }
}
