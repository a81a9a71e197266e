use crate::control::launch::LaunchConditions;
use crate::utils::vector3d::Vector3D;

use super::forces::DerivativeField;

/// Time, position and velocity of the ball. Owned by a single run loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub time: f64,
    pub position: Vector3D,
    pub velocity: Vector3D,
}

/// Result of advancing the velocity by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityStep {
    pub velocity: Vector3D,
    /// Mean of the velocities at the start and end of the step; this is what
    /// moves the position.
    pub average: Vector3D,
}

impl State {
    pub fn at_launch(launch: &LaunchConditions) -> Self {
        State {
            time: 0.0,
            position: launch.origin,
            velocity: launch.initial_velocity(),
        }
    }

    /// Advances velocity with RK4 and position with the step-averaged
    /// velocity. Time is left to the caller.
    pub fn advance(&mut self, field: &DerivativeField, time_step: f64) {
        let step = advance_velocity(field, self.velocity, time_step);
        self.velocity = step.velocity;
        self.position = self.position + step.average * time_step;
    }
}

/// Classical RK4 on each velocity component in turn: x first with the
/// step-start y and z, then y with the new x, then z with the new x and y.
pub fn advance_velocity(
    field: &DerivativeField,
    velocity: Vector3D,
    time_step: f64,
) -> VelocityStep {
    let mut v = velocity;
    let mut average = Vector3D::zero();

    let sum = weighted_increment(time_step, |dv| {
        field.acceleration(Vector3D::new(v.x + dv, v.y, v.z)).x
    });
    average.x = v.x + sum / 12.0;
    v.x += sum / 6.0;

    let sum = weighted_increment(time_step, |dv| {
        field.acceleration(Vector3D::new(v.x, v.y + dv, v.z)).y
    });
    average.y = v.y + sum / 12.0;
    v.y += sum / 6.0;

    let sum = weighted_increment(time_step, |dv| {
        field.acceleration(Vector3D::new(v.x, v.y, v.z + dv)).z
    });
    average.z = v.z + sum / 12.0;
    v.z += sum / 6.0;

    VelocityStep {
        velocity: v,
        average,
    }
}

/// `k1 + 2·k2 + 2·k3 + k4`, where each `k` is a rate times the step and
/// `rate` takes the offset from the step-start value.
fn weighted_increment(time_step: f64, rate: impl Fn(f64) -> f64) -> f64 {
    let k1 = rate(0.0) * time_step;
    let k2 = rate(k1 / 2.0) * time_step;
    let k3 = rate(k2 / 2.0) * time_step;
    let k4 = rate(k3) * time_step;
    k1 + 2.0 * k2 + 2.0 * k3 + k4
}
