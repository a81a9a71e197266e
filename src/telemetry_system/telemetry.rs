use crate::constants::SUMMARY_PRECISION;
use crate::errors::SimulationError;
use crate::trajectory_system::integrator::{RunResult, Sample};

use super::sink::SampleSink;

/// Running flight statistics gathered from the sample stream.
#[derive(Debug, Clone)]
pub struct Telemetry {
    samples: usize,
    max_height: f64,
    apex_time: f64,
    max_lateral_drift: f64,
    max_reference_gap: f64,
    simulation_time: f64,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            samples: 0,
            max_height: f64::MIN,
            apex_time: 0.0,
            max_lateral_drift: 0.0,
            max_reference_gap: 0.0,
            simulation_time: 0.0,
        }
    }

    fn format_distance(distance: f64) -> String {
        if distance.abs() >= 1000.0 {
            format!("{:.2} km", distance / 1000.0)
        } else {
            format!("{:.2} m", distance)
        }
    }

    pub fn collect_data(&mut self, sample: &Sample) {
        self.samples += 1;
        self.simulation_time = sample.t;

        if sample.z > self.max_height {
            self.max_height = sample.z;
            self.apex_time = sample.t;
        }
        if sample.y.abs() > self.max_lateral_drift {
            self.max_lateral_drift = sample.y.abs();
        }

        // Distance between the integrated point and the drag-free one.
        let gap = (sample.x - sample.x_no_resist).hypot(sample.z - sample.z_no_resist);
        if gap > self.max_reference_gap {
            self.max_reference_gap = gap;
        }
    }

    pub fn get_samples(&self) -> usize {
        self.samples
    }

    /// Highest z seen, `None` before the first sample.
    pub fn get_max_height(&self) -> Option<f64> {
        (self.samples > 0).then_some(self.max_height)
    }

    pub fn get_apex_time(&self) -> f64 {
        self.apex_time
    }

    pub fn get_max_lateral_drift(&self) -> f64 {
        self.max_lateral_drift
    }

    pub fn get_max_reference_gap(&self) -> f64 {
        self.max_reference_gap
    }

    pub fn get_simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Run summary lines for display, followed by the collected statistics.
    pub fn report(&self, result: &RunResult, surface_gravity: f64) -> String {
        let p = SUMMARY_PRECISION;
        let mut lines = Vec::new();

        lines.push(match result.terminal_velocity {
            Some(v) => format!("Terminal velocity    : {:.p$} m/s", v, p = p),
            None => "Terminal velocity    : none (no drag)".to_string(),
        });
        lines.push(match result.range() {
            Some(range) => format!("Range                : {:.p$} m", range, p = p),
            None => "Range                : not found".to_string(),
        });
        lines.push(format!(
            "Effective g (g0={}) : {:.p$} m/s^2",
            surface_gravity,
            result.effective_gravity,
            p = p
        ));
        lines.push(format!("Termination          : {}", result.termination));

        if let Some(max_height) = self.get_max_height() {
            lines.push(format!(
                "Apex                 : {} at t = {:.p$} s",
                Self::format_distance(max_height),
                self.apex_time,
                p = p
            ));
        }
        if let Some(crossing) = result.range_crossing {
            lines.push(format!(
                "Lateral drift        : {:.4} m at t = {:.p$} s",
                crossing.lateral_deflection,
                crossing.time,
                p = p
            ));
        }
        if self.samples > 0 {
            lines.push(format!(
                "Max lateral drift    : {:.4} m",
                self.max_lateral_drift
            ));
            lines.push(format!(
                "Max gap to drag-free : {}",
                Self::format_distance(self.max_reference_gap)
            ));
        }
        lines.push(format!(
            "Samples              : {} over {:.p$} s",
            self.samples,
            self.simulation_time,
            p = p
        ));

        lines.join("\n")
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new()
    }
}

impl SampleSink for Telemetry {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        self.collect_data(sample);
        Ok(())
    }
}
