pub mod sink;
pub mod telemetry;
