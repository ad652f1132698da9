use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::{self, ConfigError, RolloverPolicy, SimConfig};

#[derive(Debug, Parser)]
#[command(
    name = "horizon-twins",
    version,
    about = "Two calendars: one twin stays on Earth, the other flies toward a black hole"
)]
pub struct Cli {
    /// Real milliseconds per simulated day at zero dilation
    #[arg(long, default_value_t = config::BASE_DAY_MS)]
    pub base_day_ms: u64,

    /// Position of the massive body, in lightyears from Earth
    #[arg(long = "mass-position", default_value_t = config::MASSIVE_BODY_POSITION)]
    pub massive_body_position: f64,

    /// Position of the event horizon; must lie beyond the massive body
    #[arg(long, default_value_t = config::HORIZON_POSITION)]
    pub horizon_position: f64,

    #[arg(long, default_value_t = config::STARTING_AGE)]
    pub earth_age: u32,

    #[arg(long, default_value_t = config::STARTING_AGE)]
    pub ship_age: u32,

    /// Starting date for both calendars (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Fold the ship's day counter into years the same way Earth does
    #[arg(long)]
    pub unified_rollover: bool,

    /// Write logs here instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> Result<SimConfig, ConfigError> {
        let mut cfg = match self.start_date {
            Some(date) => SimConfig::starting_on(date),
            None => SimConfig::default(),
        };
        cfg.base_day_ms = self.base_day_ms;
        cfg.massive_body_position = self.massive_body_position;
        cfg.horizon_position = self.horizon_position;
        cfg.earth_start_age = self.earth_age;
        cfg.ship_start_age = self.ship_age;
        if self.unified_rollover {
            cfg.rollover_policy = RolloverPolicy::Unified;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
