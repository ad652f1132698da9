use std::fmt;
use std::ops::AddAssign;

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    White,
    Grey,
    Yellow,
    LightBlue,
    SkyBlue,
    Purple,
    Pink,
    Red,
}

/// Spatial classification of the ship, recomputed every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    NearOrigin,
    Transit,
    Approach,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Viewpoint {
    #[default]
    EarthView,
    ShipView,
}

impl Viewpoint {
    pub fn toggled(self) -> Self {
        match self {
            Viewpoint::EarthView => Viewpoint::ShipView,
            Viewpoint::ShipView => Viewpoint::EarthView,
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            Viewpoint::EarthView => "YOU ARE ON EARTH",
            Viewpoint::ShipView => "YOU ARE ON THE SPACESHIP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Earth,
    Ship,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceUnit {
    Lightyears,
    Kilometers,
}

impl DistanceUnit {
    fn label(self) -> &'static str {
        match self {
            DistanceUnit::Lightyears => "LIGHTYEARS",
            DistanceUnit::Kilometers => "KM",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landmark {
    Earth,
    Horizon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceReadout {
    pub value: f64,
    pub unit: DistanceUnit,
    pub landmark: Landmark,
}

impl fmt::Display for DistanceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = match self.landmark {
            Landmark::Earth => "EARTH",
            Landmark::Horizon => "THE EVENT HORIZON",
        };
        write!(
            f,
            "THE SHIP IS {} {} FROM {}",
            self.value,
            self.unit.label(),
            place
        )
    }
}

/// Everything the engine consumes from the input and movement layer for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub elapsed_ms: u64,
    pub displacement: f64,
    /// Level of the toggle key this frame; edges are detected by the engine.
    pub toggle_down: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalendarSnapshot {
    pub lines: Vec<String>,
    pub date: NaiveDate,
    pub age_years: u32,
    /// Row and column of the blanked "today" token within `lines`.
    pub today_cell: Option<(usize, usize)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub regime: Regime,
    pub viewpoint: Viewpoint,
    pub facing: Facing,
    pub ship_position: f64,
    pub massive_body_position: f64,
    pub horizon_position: f64,
    pub distance_to_horizon: f64,
    pub readout: DistanceReadout,
    pub earth: CalendarSnapshot,
    pub ship: CalendarSnapshot,
    pub terminal: bool,
}
