pub mod config;
pub mod constants;
pub mod errors;
pub mod maneuver;
pub mod mission;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::SimulationConfig;
pub use constants::*;
pub use errors::SimulationError;
pub use maneuver::orbits::{hohmann, HohmannTransfer, TransferOrbit};
pub use maneuver::planner::{BurnKind, BurnPlan, ManeuverPlanner, MissionBudget};
pub use mission::launch::LaunchSite;
pub use mission::orbit_spec::{inclination_from_azimuth, launch_azimuth, LaunchAzimuth, OrbitSpec};
pub use simulation::engine::SimulationEngine;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::state::{KinematicState, Phase};
pub use trajectory_system::trajectory::{Trajectory, TrajectorySample};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Telemetry, TelemetrySummary};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
