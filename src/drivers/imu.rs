// MotionStream — MPU6050 IMU Driver
//
// Custom register-level driver over shared I2C bus.
// Avoids external crate version conflicts with esp-idf-hal.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;
use crate::pipeline::InertialSensor;
use crate::sample::RawSample;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 14-byte sensor burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor and configure accel (±2 g), gyro (±250 °/s),
    /// DLPF wide open (260 Hz) — smoothing happens in the filter bank.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)?;

        // DLPF bandwidth 260 Hz
        bus.write(I2C_ADDR_MPU6050, &[REG_CONFIG, 0x00], I2C_TIMEOUT_TICKS)?;

        // Gyroscope: ±250 °/s
        bus.write(I2C_ADDR_MPU6050, &[REG_GYRO_CONFIG, 0x00], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±2 g
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x00], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±2g, ±250°/s)");
        Ok(())
    }

    /// Burst-read all 6 axes and convert to m/s² and rad/s.
    pub fn read_sample(&self) -> anyhow::Result<RawSample> {
        let mut bus = self.bus.lock().unwrap();
        let mut raw = [0u8; 14];
        bus.write_read(
            I2C_ADDR_MPU6050,
            &[REG_ACCEL_XOUT_H],
            &mut raw,
            I2C_TIMEOUT_TICKS,
        )?;

        let accel = |hi: u8, lo: u8| {
            i16::from_be_bytes([hi, lo]) as f32 / ACCEL_SCALE_2G * STANDARD_GRAVITY
        };
        let gyro = |hi: u8, lo: u8| {
            i16::from_be_bytes([hi, lo]) as f32 / GYRO_SCALE_250 * DEG_TO_RAD
        };

        Ok(RawSample {
            ax: accel(raw[0], raw[1]),
            ay: accel(raw[2], raw[3]),
            az: accel(raw[4], raw[5]),
            // raw[6..8] = temperature — skipped
            gx: gyro(raw[8], raw[9]),
            gy: gyro(raw[10], raw[11]),
            gz: gyro(raw[12], raw[13]),
        })
    }
}

impl InertialSensor for Mpu6050 {
    fn read(&mut self) -> anyhow::Result<RawSample> {
        self.read_sample()
    }
}
