pub mod forces;
pub mod integrator;
pub mod kinematics;
pub mod reference;
