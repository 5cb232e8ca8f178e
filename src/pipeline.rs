// MotionStream — Sampling Pipeline
//
// One tick = acquire a raw 6-axis reading, smooth every channel, stamp with
// milliseconds since the pipeline started. Runs in the sampler task only,
// never concurrently with itself.

use std::time::Instant;

use crate::filter::FilterBank;
use crate::sample::{RawSample, SampleRecord};

/// Capability to read one accelerometer+gyroscope sample on demand.
///
/// Implementations are expected to have been initialised successfully before
/// the pipeline starts; a failed read afterwards costs the caller that tick,
/// nothing more.
pub trait InertialSensor {
    fn read(&mut self) -> anyhow::Result<RawSample>;
}

pub struct SamplingPipeline<S: InertialSensor> {
    sensor: S,
    filters: FilterBank,
    origin: Instant,
}

impl<S: InertialSensor> SamplingPipeline<S> {
    pub fn new(sensor: S, alpha: f32) -> Self {
        Self {
            sensor,
            filters: FilterBank::new(alpha),
            origin: Instant::now(),
        }
    }

    /// Produce one smoothed, timestamped sample record.
    pub fn tick(&mut self) -> anyhow::Result<SampleRecord> {
        let raw = self.sensor.read()?;
        let filtered = self.filters.apply(&raw);
        let timestamp = self.origin.elapsed().as_millis() as u64;
        Ok(SampleRecord::new(filtered, timestamp))
    }
}
