// MotionStream — Exponential Low-Pass Filters
//
// Single-pole smoothing per axis: state = α·raw + (1−α)·state.
// α is shared by all six channels; state starts at 0, so the first few
// outputs are biased toward zero (startup transient, not corrected).

use crate::sample::RawSample;

// ---------------------------------------------------------------------------
// Single-axis filter
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy)]
pub struct LowPass {
    alpha: f32,
    state: f32,
}

impl LowPass {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, state: 0.0 }
    }

    /// Feed one raw value, return the new smoothed value.
    pub fn update(&mut self, raw: f32) -> f32 {
        self.state = self.alpha * raw + (1.0 - self.alpha) * self.state;
        self.state
    }
}

// ---------------------------------------------------------------------------
// Six-channel bank
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct FilterBank {
    accel_x: LowPass,
    accel_y: LowPass,
    accel_z: LowPass,
    gyro_x: LowPass,
    gyro_y: LowPass,
    gyro_z: LowPass,
}

impl FilterBank {
    pub fn new(alpha: f32) -> Self {
        Self {
            accel_x: LowPass::new(alpha),
            accel_y: LowPass::new(alpha),
            accel_z: LowPass::new(alpha),
            gyro_x: LowPass::new(alpha),
            gyro_y: LowPass::new(alpha),
            gyro_z: LowPass::new(alpha),
        }
    }

    /// Run every channel of one raw reading through its own filter.
    pub fn apply(&mut self, raw: &RawSample) -> RawSample {
        RawSample {
            ax: self.accel_x.update(raw.ax),
            ay: self.accel_y.update(raw.ay),
            az: self.accel_z.update(raw.az),
            gx: self.gyro_x.update(raw.gx),
            gy: self.gyro_y.update(raw.gy),
            gz: self.gyro_z.update(raw.gz),
        }
    }
}
