pub mod calendar;
pub mod clock;
pub mod dilation;
pub mod distance;
pub mod jump;
pub mod viewpoint;

use crate::{
    config::{self, ConfigError, SimConfig},
    types::{Facing, FrameInput, FrameSnapshot, Regime, Side, Viewpoint},
};

use calendar::ObserverClock;
use viewpoint::ViewpointController;

/// Real-time length of one simulated day and how many days each crossing advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rate {
    pub threshold_ms: u64,
    pub jump_days: u64,
}

impl Rate {
    pub fn natural(base_day_ms: u64) -> Self {
        Self {
            threshold_ms: base_day_ms,
            jump_days: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayPlan {
    pub earth: Rate,
    pub ship: Rate,
}

/// Chooses each clock's rate for one frame.
///
/// The active observer's own clock always runs naturally. Inside the approach band
/// the other clock is skewed: the ship looks slow from Earth, and Earth looks fast
/// from the ship, where it also jumps several days per crossing.
pub fn day_plan(
    viewpoint: Viewpoint,
    regime: Regime,
    radius: f64,
    characteristic: f64,
    base_day_ms: u64,
) -> DayPlan {
    let natural = Rate::natural(base_day_ms);
    if regime != Regime::Approach {
        return DayPlan {
            earth: natural,
            ship: natural,
        };
    }
    match viewpoint {
        Viewpoint::EarthView => DayPlan {
            earth: natural,
            ship: Rate {
                threshold_ms: dilation::slower_day_length(base_day_ms, radius, characteristic),
                jump_days: 1,
            },
        },
        Viewpoint::ShipView => DayPlan {
            earth: Rate {
                threshold_ms: dilation::faster_day_length(base_day_ms, radius, characteristic),
                jump_days: jump::jump_days(radius),
            },
            ship: natural,
        },
    }
}

pub struct SimulationState {
    config: SimConfig,
    ship_position: f64,
    facing: Facing,
    regime: Regime,
    viewpoint: ViewpointController,
    earth: ObserverClock,
    ship: ObserverClock,
    terminal: bool,
    frames: u64,
}

impl SimulationState {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "starting: mass at {}, horizon at {}, {} ms per day, ship at {}",
            config.massive_body_position,
            config.horizon_position,
            config.base_day_ms,
            config.ship_start_position
        );
        let earth = ObserverClock::new(
            Side::Earth,
            config::EARTH_LABEL,
            config.earth_start_date,
            config.earth_start_age,
        );
        let ship = ObserverClock::new(
            Side::Ship,
            config::SHIP_LABEL,
            config.ship_start_date,
            config.ship_start_age,
        );
        let ship_position = config.ship_start_position;
        Ok(Self {
            regime: distance::classify(ship_position, config.massive_body_position),
            config,
            ship_position,
            facing: Facing::Right,
            viewpoint: ViewpointController::new(),
            earth,
            ship,
            terminal: false,
            frames: 0,
        })
    }

    pub fn ship_position(&self) -> f64 {
        self.ship_position
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn viewpoint(&self) -> Viewpoint {
        self.viewpoint.active()
    }

    pub fn earth(&self) -> &ObserverClock {
        &self.earth
    }

    pub fn ship(&self) -> &ObserverClock {
        &self.ship
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[cfg(test)]
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    pub fn distance_to_horizon(&self) -> f64 {
        distance::distance_to_horizon(self.config.horizon_position, self.ship_position)
    }

    /// Runs one frame. Does nothing once the ship is stuck at the horizon.
    pub fn tick(&mut self, input: &FrameInput) {
        if self.terminal {
            return;
        }
        self.frames += 1;

        self.viewpoint.update(input.toggle_down);
        self.move_ship(input.displacement);

        let regime = distance::classify(self.ship_position, self.config.massive_body_position);
        if regime != self.regime {
            log::info!("{:?} -> {:?} at {}", self.regime, regime, self.ship_position);
            self.regime = regime;
        }

        let radius = self.distance_to_horizon();
        if radius <= 0.0 {
            self.terminal = true;
            log::info!(
                "ship reached the horizon after {} frames; earth {} age {}, ship {} age {}",
                self.frames,
                self.earth.date,
                self.earth.age_years,
                self.ship.date,
                self.ship.age_years
            );
            return;
        }

        let plan = day_plan(
            self.viewpoint.active(),
            self.regime,
            radius,
            distance::characteristic_distance(
                self.config.horizon_position,
                self.config.massive_body_position,
            ),
            self.config.base_day_ms,
        );
        Self::run_clock(&mut self.earth, input.elapsed_ms, plan.earth);
        Self::run_clock(&mut self.ship, input.elapsed_ms, plan.ship);

        calendar::rollover(&mut self.earth, self.config.rollover_policy);
        calendar::rollover(&mut self.ship, self.config.rollover_policy);
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            regime: self.regime,
            viewpoint: self.viewpoint.active(),
            facing: self.facing,
            ship_position: self.ship_position,
            massive_body_position: self.config.massive_body_position,
            horizon_position: self.config.horizon_position,
            distance_to_horizon: self.distance_to_horizon(),
            readout: distance::readout(
                self.regime,
                self.facing,
                self.ship_position,
                self.config.massive_body_position,
                self.config.horizon_position,
            ),
            earth: self.earth.snapshot(),
            ship: self.ship.snapshot(),
            terminal: self.terminal,
        }
    }

    fn move_ship(&mut self, displacement: f64) {
        if !displacement.is_finite() || displacement == 0.0 {
            return;
        }
        self.facing = if displacement > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
        self.ship_position += displacement;
    }

    fn run_clock(clock: &mut ObserverClock, elapsed_ms: u64, rate: Rate) {
        let tick = clock
            .accumulator
            .tick(elapsed_ms, rate.threshold_ms, rate.jump_days);
        if tick.fired {
            calendar::advance(clock, tick.jump_days);
        }
    }
}
