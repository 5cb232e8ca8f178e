// MotionStream — Sample Data Types

use serde::Serialize;

// ---------------------------------------------------------------------------
// Raw Sample (one 6-axis IMU reading)
// ---------------------------------------------------------------------------
// Accelerometer in m/s², gyroscope in rad/s. Produced by one sensor read and
// consumed immediately by the filter bank.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

// ---------------------------------------------------------------------------
// Sample Record (filtered values + timestamp, wire-serializable)
// ---------------------------------------------------------------------------

/// One smoothed, timestamped sample as it appears on the wire.
///
/// Serializes to a JSON object with exactly the keys
/// `accelX, accelY, accelZ, gyroX, gyroY, gyroZ, timestamp`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
    /// Milliseconds since the pipeline started (monotonic).
    pub timestamp: u64,
}

impl SampleRecord {
    pub fn new(filtered: RawSample, timestamp: u64) -> Self {
        Self {
            accel_x: filtered.ax,
            accel_y: filtered.ay,
            accel_z: filtered.az,
            gyro_x: filtered.gx,
            gyro_y: filtered.gy,
            gyro_z: filtered.gz,
            timestamp,
        }
    }
}
