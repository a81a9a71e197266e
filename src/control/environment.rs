use crate::constants::{AIR_DENSITY, CO_LATITUDE_DEG, DRAG_GAMMA, EARTH_ANGULAR_RATE, GRAVITY};
use crate::errors::{require_finite, require_non_negative, require_positive, SimulationError};
use crate::utils::angle::Angle;

/// Surroundings of the launch site: gravity, air and Earth's rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: f64,
    pub angular_rate: f64,
    pub air_density: f64,
    pub drag_gamma: f64,
    pub co_latitude: Angle,
}

impl Environment {
    pub fn new(
        gravity: f64,
        angular_rate: f64,
        air_density: f64,
        drag_gamma: f64,
        co_latitude_deg: f64,
    ) -> Self {
        Environment {
            gravity,
            angular_rate,
            air_density,
            drag_gamma,
            co_latitude: Angle::from_degrees(co_latitude_deg),
        }
    }

    /// Same environment on a non-rotating Earth.
    pub fn without_rotation(self) -> Self {
        Environment {
            angular_rate: 0.0,
            ..self
        }
    }

    /// Same environment with the quadratic drag law switched off.
    pub fn without_drag(self) -> Self {
        Environment {
            drag_gamma: 0.0,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("gravity", self.gravity)?;
        require_finite("angular rate", self.angular_rate)?;
        require_non_negative("air density", self.air_density)?;
        require_non_negative("drag coefficient gamma", self.drag_gamma)?;
        require_finite("co-latitude", self.co_latitude.radians())?;
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(
            GRAVITY,
            EARTH_ANGULAR_RATE,
            AIR_DENSITY,
            DRAG_GAMMA,
            CO_LATITUDE_DEG,
        )
    }
}
