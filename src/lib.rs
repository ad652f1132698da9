pub mod cli;
pub mod config;
pub mod core;
pub mod render;
pub mod starfield;
pub mod types;
pub mod ui;

pub use crate::config::{ConfigError, RolloverPolicy, SimConfig};
pub use crate::core::SimulationState;
pub use crate::types::{FrameInput, FrameSnapshot, Regime, Viewpoint};
