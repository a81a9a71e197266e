use crate::constants::{LAUNCH_ANGLE_DEG, LAUNCH_SPEED};
use crate::errors::{require_finite, require_non_negative, SimulationError};
use crate::utils::{angle::Angle, vector3d::Vector3D};

/// Launch along the x axis (East-West) at `angle` above the horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchConditions {
    pub speed: f64,
    pub angle: Angle,
    pub origin: Vector3D,
}

impl LaunchConditions {
    pub fn new(speed: f64, angle_deg: f64, origin: Vector3D) -> Self {
        LaunchConditions {
            speed,
            angle: Angle::from_degrees(angle_deg),
            origin,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_non_negative("launch speed", self.speed)?;
        require_finite("launch angle", self.angle.radians())?;
        if !self.origin.is_finite() {
            return Err(SimulationError::domain(format!(
                "launch position must be finite, got {:?}",
                self.origin
            )));
        }
        Ok(())
    }

    pub fn initial_velocity(&self) -> Vector3D {
        Vector3D::new(
            self.speed * self.angle.cos(),
            0.0,
            self.speed * self.angle.sin(),
        )
    }

    /// Time to return to the launch plane with gravity alone.
    pub fn drag_free_flight_time(&self, gravity: f64) -> f64 {
        2.0 * self.speed * self.angle.sin() / gravity
    }
}

impl Default for LaunchConditions {
    fn default() -> Self {
        LaunchConditions::new(LAUNCH_SPEED, LAUNCH_ANGLE_DEG, Vector3D::zero())
    }
}
