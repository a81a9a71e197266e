use crate::control::parameters::{DerivedQuantities, PhysicalParameters};
use crate::utils::vector3d::Vector3D;

/// Acceleration of the ball as a function of its velocity: quadratic drag,
/// buoyancy-reduced gravity and the first-order Coriolis term.
///
/// Axes: x points East (the launch direction), y North, z up. The
/// co-latitude splits Earth's rotation into the `cos φ` and `sin φ`
/// components used below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeField {
    drag_per_mass: f64,
    effective_gravity: f64,
    angular_rate: f64,
    cos_co_latitude: f64,
    sin_co_latitude: f64,
}

impl DerivativeField {
    pub fn new(params: &PhysicalParameters, derived: &DerivedQuantities) -> Self {
        let co_latitude = params.environment.co_latitude;
        DerivativeField {
            drag_per_mass: derived.drag_constant / params.projectile.mass,
            effective_gravity: derived.effective_gravity,
            angular_rate: params.environment.angular_rate,
            cos_co_latitude: co_latitude.cos(),
            sin_co_latitude: co_latitude.sin(),
        }
    }

    pub fn acceleration(&self, velocity: Vector3D) -> Vector3D {
        self.drag(velocity) + self.coriolis(velocity) + self.gravity()
    }

    pub fn drag(&self, velocity: Vector3D) -> Vector3D {
        -(self.drag_per_mass * velocity.magnitude()) * velocity
    }

    pub fn coriolis(&self, velocity: Vector3D) -> Vector3D {
        let two_omega = 2.0 * self.angular_rate;
        Vector3D::new(
            two_omega * (velocity.y * self.cos_co_latitude - velocity.z * self.sin_co_latitude),
            -two_omega * velocity.x * self.cos_co_latitude,
            two_omega * velocity.x * self.sin_co_latitude,
        )
    }

    pub fn gravity(&self) -> Vector3D {
        Vector3D::new(0.0, 0.0, -self.effective_gravity)
    }

    pub fn get_effective_gravity(&self) -> f64 {
        self.effective_gravity
    }
}
