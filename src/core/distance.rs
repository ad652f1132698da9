use crate::{
    config,
    types::{DistanceReadout, DistanceUnit, Facing, Landmark, Regime},
};

pub fn classify(ship_position: f64, massive_body_position: f64) -> Regime {
    if ship_position < config::EARTH_POSITION {
        Regime::NearOrigin
    } else if ship_position < massive_body_position {
        Regime::Transit
    } else {
        Regime::Approach
    }
}

/// Zero or below means the ship is stuck at the horizon; callers handle that.
pub fn distance_to_horizon(horizon_position: f64, ship_position: f64) -> f64 {
    horizon_position - ship_position
}

pub fn characteristic_distance(horizon_position: f64, massive_body_position: f64) -> f64 {
    horizon_position - massive_body_position
}

/// On-screen distance line. Units and reference points change with the regime,
/// and while approaching the mass the horizon distance is shown in kilometers.
pub fn readout(
    regime: Regime,
    facing: Facing,
    ship_position: f64,
    massive_body_position: f64,
    horizon_position: f64,
) -> DistanceReadout {
    let (value, unit, landmark) = match (regime, facing) {
        (Regime::NearOrigin, Facing::Right) => (
            massive_body_position - config::EARTH_POSITION,
            DistanceUnit::Lightyears,
            Landmark::Horizon,
        ),
        (Regime::NearOrigin, Facing::Left) => (0.0, DistanceUnit::Lightyears, Landmark::Earth),
        (Regime::Transit, Facing::Right) => (
            massive_body_position - ship_position,
            DistanceUnit::Lightyears,
            Landmark::Horizon,
        ),
        (Regime::Transit, Facing::Left) => (
            ship_position - config::EARTH_POSITION,
            DistanceUnit::Lightyears,
            Landmark::Earth,
        ),
        (Regime::Approach, Facing::Right) => (
            distance_to_horizon(horizon_position, ship_position),
            DistanceUnit::Kilometers,
            Landmark::Horizon,
        ),
        (Regime::Approach, Facing::Left) => (
            massive_body_position - config::EARTH_POSITION,
            DistanceUnit::Lightyears,
            Landmark::Earth,
        ),
    };
    DistanceReadout {
        value,
        unit,
        landmark,
    }
}
