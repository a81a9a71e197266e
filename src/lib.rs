pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::environment::Environment;
pub use control::launch::LaunchConditions;
pub use control::parameters::{DerivedQuantities, PhysicalParameters};
pub use control::projectile::Projectile;
pub use control::run_config::{Horizon, RunConfig, TerminationPolicy};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::forces::DerivativeField;
pub use trajectory_system::integrator::{
    RangeCrossing, RunResult, Sample, Termination, Trajectory, TrajectoryIntegrator,
};
pub use trajectory_system::kinematics::State;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::sink::{Recorder, SampleSink, TableWriter};
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::angle::Angle;
pub use utils::vector3d::Vector3D;
