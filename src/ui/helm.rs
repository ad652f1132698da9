use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Thrust {
    Idle,
    Forward,
    Reverse,
}

impl Thrust {
    pub fn from_keys(right: bool, left: bool) -> Self {
        match (right, left) {
            (true, false) => Thrust::Forward,
            (false, true) => Thrust::Reverse,
            _ => Thrust::Idle,
        }
    }
}

/// Ship displacement for one frame.
///
/// Between the launch pad and Earth's position the ship creeps in
/// `1 / DEPARTURE_FRAMES` steps and lands exactly on 0, so open space is
/// travelled on whole units. It never backs up past the launch pad.
pub fn displacement(thrust: Thrust, ship_position: f64) -> f64 {
    let departure_step = 1.0 / config::DEPARTURE_FRAMES;
    match thrust {
        Thrust::Idle => 0.0,
        Thrust::Forward if ship_position < config::EARTH_POSITION => {
            departure_step.min(config::EARTH_POSITION - ship_position)
        }
        Thrust::Forward => config::SHIP_SPEED,
        Thrust::Reverse => {
            let room = (ship_position - config::SHIP_START_POSITION).max(0.0);
            let step = if ship_position <= config::EARTH_POSITION {
                departure_step
            } else {
                config::SHIP_SPEED
            };
            -step.min(room)
        }
    }
}
