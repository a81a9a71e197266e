use crate::control::launch::LaunchConditions;

/// Closed-form trajectory with gravity alone, measured from the launch
/// point. Used only for side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFreeReference {
    horizontal_speed: f64,
    vertical_speed: f64,
    gravity: f64,
}

impl DragFreeReference {
    pub fn new(launch: &LaunchConditions, gravity: f64) -> Self {
        DragFreeReference {
            horizontal_speed: launch.speed * launch.angle.cos(),
            vertical_speed: launch.speed * launch.angle.sin(),
            gravity,
        }
    }

    /// `(x, z)` at time `t`.
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        let x = self.horizontal_speed * t;
        let z = self.vertical_speed * t - (self.gravity / 2.0) * t.powi(2);
        (x, z)
    }
}
