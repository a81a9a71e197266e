use std::fmt;

use crate::control::{
    parameters::{DerivedQuantities, PhysicalParameters},
    run_config::{RunConfig, TerminationPolicy},
};
use crate::errors::SimulationError;
use crate::telemetry_system::sink::SampleSink;

use super::{forces::DerivativeField, kinematics::State, reference::DragFreeReference};

/// One row of output: the integrated position and the drag-free reference
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub x_no_resist: f64,
    pub z_no_resist: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    HorizonReached,
    DepthLimitReached,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::HorizonReached => write!(f, "time horizon reached"),
            Termination::DepthLimitReached => write!(f, "depth limit reached"),
        }
    }
}

/// The last step that entered the landing band while descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCrossing {
    pub range: f64,
    pub time: f64,
    /// Sideways (y) drift at the crossing, from the Coriolis force.
    pub lateral_deflection: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    pub terminal_velocity: Option<f64>,
    pub effective_gravity: f64,
    pub range_crossing: Option<RangeCrossing>,
    pub termination: Termination,
    pub steps: u64,
    pub final_state: State,
}

impl RunResult {
    pub fn range(&self) -> Option<f64> {
        self.range_crossing.map(|crossing| crossing.range)
    }
}

/// Fixed-step RK4 integrator for one set of parameters.
#[derive(Debug, Clone)]
pub struct TrajectoryIntegrator {
    params: PhysicalParameters,
    derived: DerivedQuantities,
    field: DerivativeField,
    reference: DragFreeReference,
    time_step: f64,
    t_max: f64,
    termination: TerminationPolicy,
}

impl TrajectoryIntegrator {
    pub fn new(params: PhysicalParameters, config: RunConfig) -> Result<Self, SimulationError> {
        let derived = params.derive()?;
        config.validate()?;
        let t_max = config
            .horizon
            .resolve(&params.launch, params.environment.gravity)?;

        log::debug!(
            "Derived quantities: c = {:.6}, g_eff = {:.6} m/s², v_terminal = {:?}, t_max = {:.4} s",
            derived.drag_constant,
            derived.effective_gravity,
            derived.terminal_velocity,
            t_max
        );

        Ok(TrajectoryIntegrator {
            field: DerivativeField::new(&params, &derived),
            reference: DragFreeReference::new(&params.launch, derived.effective_gravity),
            params,
            derived,
            time_step: config.time_step,
            t_max,
            termination: config.termination,
        })
    }

    /// Lazy sample stream; each pull performs at most one RK4 step.
    pub fn trajectory(&self) -> Trajectory<'_> {
        Trajectory {
            integrator: self,
            state: State::at_launch(&self.params.launch),
            phase: Phase::NotStarted,
            steps: 0,
            range_crossing: None,
        }
    }

    /// Drains the trajectory into `sink` and returns the run summary.
    pub fn run<S: SampleSink + ?Sized>(&self, sink: &mut S) -> Result<RunResult, SimulationError> {
        let mut trajectory = self.trajectory();
        loop {
            match trajectory.advance()? {
                Advance::Sample(sample) => sink.record(&sample)?,
                Advance::Stopped(termination) => {
                    sink.flush()?;
                    return Ok(trajectory.result(termination));
                }
            }
        }
    }

    pub fn get_derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    pub fn get_time_step(&self) -> f64 {
        self.time_step
    }

    pub fn get_t_max(&self) -> f64 {
        self.t_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    NotStarted,
    Running,
    Finished(Termination),
    Failed { time: f64, quantity: &'static str },
}

enum Advance {
    Sample(Sample),
    Stopped(Termination),
}

/// Pull-based run loop. Yields the `t = 0` sample first, then one sample
/// per step until the horizon or the depth limit stops it. A non-finite
/// state is yielded once as `NumericOverflow` and ends the stream.
#[derive(Debug, Clone)]
pub struct Trajectory<'a> {
    integrator: &'a TrajectoryIntegrator,
    state: State,
    phase: Phase,
    steps: u64,
    range_crossing: Option<RangeCrossing>,
}

impl<'a> Trajectory<'a> {
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.phase {
            Phase::Finished(termination) => Some(termination),
            _ => None,
        }
    }

    /// Available once the stream has ended normally.
    pub fn summary(&self) -> Option<RunResult> {
        self.termination()
            .map(|termination| self.result(termination))
    }

    fn result(&self, termination: Termination) -> RunResult {
        let derived = &self.integrator.derived;
        RunResult {
            terminal_velocity: derived.terminal_velocity,
            effective_gravity: derived.effective_gravity,
            range_crossing: self.range_crossing,
            termination,
            steps: self.steps,
            final_state: self.state,
        }
    }

    fn advance(&mut self) -> Result<Advance, SimulationError> {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::Running;
                Ok(Advance::Sample(self.sample()))
            }
            Phase::Running => self.step(),
            Phase::Finished(termination) => Ok(Advance::Stopped(termination)),
            Phase::Failed { time, quantity } => {
                Err(SimulationError::NumericOverflow { time, quantity })
            }
        }
    }

    fn step(&mut self) -> Result<Advance, SimulationError> {
        let integrator = self.integrator;
        let time = (self.steps + 1) as f64 * integrator.time_step;

        if time >= integrator.t_max {
            return Ok(Advance::Stopped(self.finish(Termination::HorizonReached)));
        }

        self.steps += 1;
        self.state.time = time;
        self.state.advance(&integrator.field, integrator.time_step);

        if let Some(quantity) = self.non_finite_quantity() {
            log::warn!(
                "Integration diverged at t = {:.4} s after {} steps; reduce the time step",
                time,
                self.steps
            );
            self.phase = Phase::Failed { time, quantity };
            return Err(SimulationError::NumericOverflow { time, quantity });
        }

        self.detect_range();
        let sample = self.sample();

        if integrator
            .termination
            .below_depth_limit(self.state.position.z)
        {
            self.finish(Termination::DepthLimitReached);
        }

        Ok(Advance::Sample(sample))
    }

    fn finish(&mut self, termination: Termination) -> Termination {
        self.phase = Phase::Finished(termination);
        log::info!(
            "Trajectory finished ({}) after {} steps at t = {:.4} s",
            termination,
            self.steps,
            self.state.time
        );
        termination
    }

    fn non_finite_quantity(&self) -> Option<&'static str> {
        if !self.state.velocity.is_finite() {
            Some("velocity")
        } else if !self.state.position.is_finite() {
            Some("position")
        } else {
            None
        }
    }

    // Tolerance band, not root finding: every descending step inside the
    // band overwrites the previous one, so the last band entry wins. A plain
    // band test would also accept the steps just after launch; those are
    // skipped here, so a ball still climbing at the horizon has no range.
    fn detect_range(&mut self) {
        let position = self.state.position;
        let descending = self.state.velocity.z < 0.0;

        if position.x != 0.0
            && descending
            && self.integrator.termination.in_range_band(position.z)
        {
            self.range_crossing = Some(RangeCrossing {
                range: position.x,
                time: self.state.time,
                lateral_deflection: position.y,
            });
        }
    }

    fn sample(&self) -> Sample {
        let (x_no_resist, z_no_resist) = self.integrator.reference.position_at(self.state.time);
        Sample {
            t: self.state.time,
            x: self.state.position.x,
            y: self.state.position.y,
            z: self.state.position.z,
            x_no_resist,
            z_no_resist,
        }
    }
}

impl<'a> Iterator for Trajectory<'a> {
    type Item = Result<Sample, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.phase, Phase::Finished(_) | Phase::Failed { .. }) {
            return None;
        }
        match self.advance() {
            Ok(Advance::Sample(sample)) => Some(Ok(sample)),
            Ok(Advance::Stopped(_)) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
