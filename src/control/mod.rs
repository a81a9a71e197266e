pub mod environment;
pub mod launch;
pub mod parameters;
pub mod projectile;
pub mod run_config;
