use std::f64::consts::PI;

use crate::constants::{PROJECTILE_DIAMETER, PROJECTILE_MASS};
use crate::errors::{require_positive, SimulationError};

/// A solid sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub mass: f64,
    pub diameter: f64,
}

impl Projectile {
    pub fn new(mass: f64, diameter: f64) -> Self {
        Projectile { mass, diameter }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("mass", self.mass)?;
        require_positive("diameter", self.diameter)?;
        Ok(())
    }

    pub fn volume(&self) -> f64 {
        PI / 6.0 * self.diameter.powi(3)
    }

    /// Quadratic drag constant c = γ·D².
    pub fn drag_constant(&self, drag_gamma: f64) -> f64 {
        drag_gamma * self.diameter.powi(2)
    }

    /// Mass of the air displaced by the ball.
    pub fn displaced_air_mass(&self, air_density: f64) -> f64 {
        air_density * self.volume()
    }
}

impl Default for Projectile {
    fn default() -> Self {
        Projectile::new(PROJECTILE_MASS, PROJECTILE_DIAMETER)
    }
}
