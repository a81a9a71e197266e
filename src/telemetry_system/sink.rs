use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::constants::OUTPUT_PRECISION;
use crate::errors::SimulationError;
use crate::trajectory_system::integrator::Sample;

/// Consumer of the sample stream, fed in emission order.
pub trait SampleSink {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError>;

    /// Called once after the last sample of a completed run.
    fn flush(&mut self) -> Result<(), SimulationError> {
        Ok(())
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        (**self).record(sample)
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        (**self).flush()
    }
}

/// A disabled sink when `None`.
impl<S: SampleSink> SampleSink for Option<S> {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        match self {
            Some(sink) => sink.record(sample),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        match self {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

/// Feeds both sinks, first `A` then `B`.
impl<A: SampleSink, B: SampleSink> SampleSink for (A, B) {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        self.0.record(sample)?;
        self.1.record(sample)
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        self.0.flush()?;
        self.1.flush()
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub samples: Vec<Sample>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }
}

impl SampleSink for Recorder {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        self.samples.push(*sample);
        Ok(())
    }
}

/// Plot-friendly rows: a leading tab, then `t x y z xNoResist zNoResist`
/// at fixed precision.
pub struct TableWriter<W: Write> {
    writer: W,
    precision: usize,
}

impl TableWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SimulationError> {
        let file = File::create(path)?;
        log::debug!("Writing trajectory table to {:?}", path);
        Ok(TableWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter {
            writer,
            precision: OUTPUT_PRECISION,
        }
    }

    pub fn with_precision(self, precision: usize) -> Self {
        TableWriter { precision, ..self }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SampleSink for TableWriter<W> {
    fn record(&mut self, sample: &Sample) -> Result<(), SimulationError> {
        let p = self.precision;
        writeln!(
            self.writer,
            "\t {:.p$}   {:.p$}   {:.p$}   {:.p$}   {:.p$}    {:.p$}",
            sample.t,
            sample.x,
            sample.y,
            sample.z,
            sample.x_no_resist,
            sample.z_no_resist,
            p = p
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        self.writer.flush()?;
        Ok(())
    }
}
