use chrono::{Local, NaiveDate};
use thiserror::Error;

pub const SIM_HZ: f32 = 60.0;
pub const DT: f32 = 1.0 / SIM_HZ;

pub const BASE_DAY_MS: u64 = 1000;
pub const DAYS_PER_YEAR: u32 = 365;
pub const STARTING_AGE: u32 = 20;

pub const EARTH_POSITION: f64 = 0.0;
pub const MASSIVE_BODY_POSITION: f64 = 1000.0;
pub const HORIZON_POSITION: f64 = 2000.0;
pub const SHIP_START_POSITION: f64 = -1.0;

pub const SHIP_SPEED: f64 = 1.0;
pub const DEPARTURE_FRAMES: f64 = 30.0;

// Descending radius thresholds; first bucket whose bound the radius exceeds wins.
pub const JUMP_TABLE: [(f64, u64); 10] = [
    (500.0, 1),
    (250.0, 2),
    (125.0, 4),
    (62.0, 8),
    (30.0, 16),
    (15.0, 32),
    (8.0, 64),
    (4.0, 128),
    (2.0, 256),
    (1.0, 512),
];
pub const FINAL_JUMP_DAYS: u64 = 1024;

pub const STARS_PER_LAYER: usize = 200;
pub const STAR_COLOR_MOD: usize = 10;

pub const EARTH_LABEL: &str = "  Earth's calendar";
pub const SHIP_LABEL: &str = "Spaceship's calendar";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RolloverPolicy {
    /// Earth folds 365 days per year, the ship hard-resets its counter.
    #[default]
    Split,
    /// Both clocks fold.
    Unified,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("horizon position {horizon} must lie beyond the massive body at {mass}")]
    HorizonNotBeyondMass { mass: f64, horizon: f64 },

    #[error("base day length must be at least one millisecond")]
    NonPositiveDayLength,

    #[error("{0} must be a finite number")]
    NonFinitePosition(&'static str),

    #[error("ship starts at {ship}, already past the horizon at {horizon}")]
    ShipBeyondHorizon { ship: f64, horizon: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub base_day_ms: u64,
    pub massive_body_position: f64,
    pub horizon_position: f64,
    pub ship_start_position: f64,
    pub earth_start_age: u32,
    pub ship_start_age: u32,
    pub earth_start_date: NaiveDate,
    pub ship_start_date: NaiveDate,
    pub rollover_policy: RolloverPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::starting_on(Local::now().date_naive())
    }
}

impl SimConfig {
    /// Defaults with both calendars starting on `date`.
    pub fn starting_on(date: NaiveDate) -> Self {
        Self {
            base_day_ms: BASE_DAY_MS,
            massive_body_position: MASSIVE_BODY_POSITION,
            horizon_position: HORIZON_POSITION,
            ship_start_position: SHIP_START_POSITION,
            earth_start_age: STARTING_AGE,
            ship_start_age: STARTING_AGE,
            earth_start_date: date,
            ship_start_date: date,
            rollover_policy: RolloverPolicy::Split,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_day_ms == 0 {
            return Err(ConfigError::NonPositiveDayLength);
        }
        if !self.massive_body_position.is_finite() {
            return Err(ConfigError::NonFinitePosition("massive body position"));
        }
        if !self.horizon_position.is_finite() {
            return Err(ConfigError::NonFinitePosition("horizon position"));
        }
        if !self.ship_start_position.is_finite() {
            return Err(ConfigError::NonFinitePosition("ship start position"));
        }
        if self.horizon_position <= self.massive_body_position {
            return Err(ConfigError::HorizonNotBeyondMass {
                mass: self.massive_body_position,
                horizon: self.horizon_position,
            });
        }
        if self.horizon_position - self.ship_start_position <= 0.0 {
            return Err(ConfigError::ShipBeyondHorizon {
                ship: self.ship_start_position,
                horizon: self.horizon_position,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig::starting_on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    mod validate {
        use super::*;

        #[test]
        fn defaults_are_valid() {
            assert_eq!(config().validate(), Ok(()));
        }

        #[test]
        fn horizon_equal_to_mass_is_rejected() {
            let mut cfg = config();
            cfg.horizon_position = cfg.massive_body_position;
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::HorizonNotBeyondMass {
                    mass: 1000.0,
                    horizon: 1000.0
                })
            );
        }

        #[test]
        fn horizon_before_mass_is_rejected() {
            let mut cfg = config();
            cfg.horizon_position = 500.0;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::HorizonNotBeyondMass { .. })
            ));
        }

        #[test]
        fn zero_day_length_is_rejected() {
            let mut cfg = config();
            cfg.base_day_ms = 0;
            assert_eq!(cfg.validate(), Err(ConfigError::NonPositiveDayLength));
        }

        #[test]
        fn nan_position_is_rejected() {
            let mut cfg = config();
            cfg.massive_body_position = f64::NAN;
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::NonFinitePosition("massive body position"))
            );
        }

        #[test]
        fn ship_at_horizon_is_rejected() {
            let mut cfg = config();
            cfg.ship_start_position = cfg.horizon_position;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::ShipBeyondHorizon { .. })
            ));
        }
    }

    mod jump_table {
        use super::*;

        #[test]
        fn thresholds_strictly_decrease() {
            for pair in JUMP_TABLE.windows(2) {
                assert!(pair[0].0 > pair[1].0);
                assert_eq!(pair[1].1, pair[0].1 * 2);
            }
        }

        #[test]
        fn final_bucket_doubles_last_entry() {
            assert_eq!(FINAL_JUMP_DAYS, JUMP_TABLE[JUMP_TABLE.len() - 1].1 * 2);
        }
    }

    #[test]
    fn error_messages_name_the_positions() {
        let err = ConfigError::HorizonNotBeyondMass {
            mass: 1000.0,
            horizon: 900.0,
        };
        assert_eq!(
            err.to_string(),
            "horizon position 900 must lie beyond the massive body at 1000"
        );
    }
}
