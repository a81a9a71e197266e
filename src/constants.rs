// Physical Constants
pub const GRAVITY: f64 = 9.8; // m/s²
pub const EARTH_ANGULAR_RATE: f64 = 7.272e-5; // rad/s, 2π in 24 h

// Environmental Constants
pub const AIR_DENSITY: f64 = 1.2; // kg/m³
pub const DRAG_GAMMA: f64 = 0.25; // kg/m³, quadratic drag c = γ·D²
pub const CO_LATITUDE_DEG: f64 = 45.0; // degrees

// Projectile Constants
pub const PROJECTILE_MASS: f64 = 0.25; // kg
pub const PROJECTILE_DIAMETER: f64 = 0.1; // m

// Launch Constants
pub const LAUNCH_SPEED: f64 = 10.0; // m/s
pub const LAUNCH_ANGLE_DEG: f64 = 60.0; // degrees above horizontal

// Simulation Parameters
pub const TIME_STEP: f64 = 0.005; // s
pub const MAX_SIMULATION_TIME: f64 = 5.0; // s
pub const FLIGHT_TIME_MULTIPLE: f64 = 5.0; // horizon = multiple × drag-free flight time

// Termination Policy
pub const RANGE_TOLERANCE: f64 = 0.1; // m, half-width of the z≈0 band
pub const DEPTH_LIMIT: f64 = 1.0; // m below the launch plane

// Output
pub const OUTPUT_PRECISION: usize = 4;
pub const SUMMARY_PRECISION: usize = 2;
pub const DEFAULT_OUTPUT_FILE: &str = "AirResistQuad.txt";
