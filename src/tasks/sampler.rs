// MotionStream — Sampler Task
//
// Periodic driver for the sample→filter→batch→publish pipeline. Owns all
// pipeline state exclusively; the only cross-context input is the client
// presence counter, which gates whether a tick does any work at all.

use std::thread;
use std::time::{Duration, Instant};

use crate::batch::SampleBatch;
use crate::config::{BATCH_LEN, FILTER_ALPHA, SAMPLE_INTERVAL_MS};
use crate::pipeline::{InertialSensor, SamplingPipeline};
use crate::presence::ClientPresence;
use crate::publisher::{Broadcast, PublishOutcome, Publisher};

/// The streaming engine: pipeline, batch buffer, and publisher behind one
/// exclusively-owned object the task loop drives.
pub struct Streamer<S: InertialSensor, B: Broadcast> {
    pipeline: SamplingPipeline<S>,
    batch: SampleBatch,
    publisher: Publisher<B>,
    presence: ClientPresence,
}

impl<S: InertialSensor, B: Broadcast> Streamer<S, B> {
    pub fn new(sensor: S, transport: B, presence: ClientPresence) -> Self {
        Self {
            pipeline: SamplingPipeline::new(sensor, FILTER_ALPHA),
            batch: SampleBatch::new(BATCH_LEN),
            publisher: Publisher::new(transport),
            presence,
        }
    }

    /// One scheduler tick.
    ///
    /// With no client attached the tick is skipped outright — no acquisition,
    /// no filter advance, nothing buffered. Otherwise the sample is appended,
    /// and filling the last slot publishes and resets the batch in the same
    /// step, so the buffer can never be appended into partially drained.
    pub fn poll(&mut self) -> anyhow::Result<Option<PublishOutcome>> {
        if !self.presence.connected() {
            return Ok(None);
        }

        let record = self.pipeline.tick()?;
        self.batch.append(&record)?;

        if self.batch.is_full() {
            let records = self.batch.drain();
            return Ok(Some(self.publisher.publish(&records)));
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn buffered(&self) -> usize {
        self.batch.len()
    }
}

/// Thread entry point: drive the streamer at the fixed sampling period until
/// power-off. A failed tick (sensor read error) is logged and the period is
/// kept; there is no retry and no upstream error channel.
pub fn sampler_task<S: InertialSensor, B: Broadcast>(mut streamer: Streamer<S, B>) {
    log::info!("Sampler task started ({SAMPLE_INTERVAL_MS} ms period)");

    let interval = Duration::from_millis(SAMPLE_INTERVAL_MS);

    loop {
        let tick_start = Instant::now();

        if let Err(e) = streamer.poll() {
            log::warn!("sample tick failed: {e:#}");
        }

        // Sleep for the remainder of the period to hold the cadence.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
