use super::launch::LaunchConditions;
use crate::constants::{
    DEPTH_LIMIT, FLIGHT_TIME_MULTIPLE, MAX_SIMULATION_TIME, RANGE_TOLERANCE, TIME_STEP,
};
use crate::errors::{require_positive, SimulationError};

/// How long to integrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    /// Stop once `t` reaches this many seconds.
    Fixed(f64),
    /// A multiple of the drag-free time of flight `2·v0·sin(θ0)/g0`.
    FlightTimeMultiple(f64),
}

impl Horizon {
    pub fn flight_time_multiple() -> Self {
        Horizon::FlightTimeMultiple(FLIGHT_TIME_MULTIPLE)
    }

    pub fn resolve(&self, launch: &LaunchConditions, gravity: f64) -> Result<f64, SimulationError> {
        let t_max = match *self {
            Horizon::Fixed(t_max) => t_max,
            Horizon::FlightTimeMultiple(multiple) => {
                require_positive("flight time multiple", multiple)?;
                multiple * launch.drag_free_flight_time(gravity)
            }
        };
        require_positive("time horizon", t_max)
    }
}

/// Stop conditions and the range detector band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminationPolicy {
    /// Half-width of the band around z = 0 that counts as a landing.
    pub range_tolerance: f64,
    /// Stop once z drops below `-depth_limit`. `f64::INFINITY` disables it.
    pub depth_limit: f64,
}

impl TerminationPolicy {
    pub fn new(range_tolerance: f64, depth_limit: f64) -> Self {
        TerminationPolicy {
            range_tolerance,
            depth_limit,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("range tolerance", self.range_tolerance)?;
        if self.depth_limit.is_nan() || self.depth_limit < 0.0 {
            return Err(SimulationError::domain(format!(
                "depth limit must be non-negative, got {}",
                self.depth_limit
            )));
        }
        Ok(())
    }

    pub fn in_range_band(&self, z: f64) -> bool {
        z > -self.range_tolerance && z < self.range_tolerance
    }

    pub fn below_depth_limit(&self, z: f64) -> bool {
        z < -self.depth_limit
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        TerminationPolicy::new(RANGE_TOLERANCE, DEPTH_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub time_step: f64,
    pub horizon: Horizon,
    pub termination: TerminationPolicy,
}

impl RunConfig {
    pub fn new(time_step: f64, horizon: Horizon) -> Self {
        RunConfig {
            time_step,
            horizon,
            termination: TerminationPolicy::default(),
        }
    }

    pub fn with_termination(self, termination: TerminationPolicy) -> Self {
        RunConfig {
            termination,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("time step", self.time_step)?;
        self.termination.validate()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig::new(TIME_STEP, Horizon::Fixed(MAX_SIMULATION_TIME))
    }
}
