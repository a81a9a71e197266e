use super::{environment::Environment, launch::LaunchConditions, projectile::Projectile};
use crate::errors::SimulationError;

/// Everything that defines one trajectory physically. Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalParameters {
    pub projectile: Projectile,
    pub environment: Environment,
    pub launch: LaunchConditions,
}

/// Quantities computed once from [`PhysicalParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    pub drag_constant: f64,
    pub effective_gravity: f64,
    /// `None` when the drag law is switched off (γ = 0).
    pub terminal_velocity: Option<f64>,
}

impl PhysicalParameters {
    pub fn new(
        projectile: Projectile,
        environment: Environment,
        launch: LaunchConditions,
    ) -> Self {
        PhysicalParameters {
            projectile,
            environment,
            launch,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.projectile.validate()?;
        self.environment.validate()?;
        self.launch.validate()?;
        Ok(())
    }

    pub fn derive(&self) -> Result<DerivedQuantities, SimulationError> {
        self.validate()?;

        let mass = self.projectile.mass;
        let drag_constant = self.projectile.drag_constant(self.environment.drag_gamma);
        let effective_gravity = self.environment.gravity
            - self
                .projectile
                .displaced_air_mass(self.environment.air_density)
                / mass;

        if effective_gravity <= 0.0 {
            return Err(SimulationError::domain(format!(
                "buoyancy cancels gravity: effective gravity is {} m/s²",
                effective_gravity
            )));
        }

        let terminal_velocity = if drag_constant > 0.0 {
            Some((mass * effective_gravity / drag_constant).sqrt())
        } else {
            None
        };

        Ok(DerivedQuantities {
            drag_constant,
            effective_gravity,
            terminal_velocity,
        })
    }
}
