// MotionStream — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_I2C_SDA: i32 = 6; // D4 — I2C data line
pub const PIN_I2C_SCL: i32 = 7; // D5 — I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Sampling & Filtering
// ---------------------------------------------------------------------------
pub const SAMPLE_INTERVAL_MS: u64 = 25; // 40 Hz acquisition cadence
pub const FILTER_ALPHA: f32 = 0.2;      // shared smoothing factor, all 6 axes
pub const BATCH_LEN: usize = 10;        // samples per broadcast frame

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------
// Credentials are baked in at compile time; override with
// MOTIONSTREAM_WIFI_SSID / MOTIONSTREAM_WIFI_PASS in the build environment.
pub const WIFI_SSID: &str = match option_env!("MOTIONSTREAM_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "motionstream",
};
pub const WIFI_PASS: &str = match option_env!("MOTIONSTREAM_WIFI_PASS") {
    Some(pass) => pass,
    None => "motionstream",
};

pub const HTTP_PORT: u16 = 80;
pub const WS_URI: &str = "/ws";

// Pre-allocation for one assembled batch frame (10 records ≈ 1.5 KiB JSON).
pub const FRAME_RESERVE_BYTES: usize = 2048;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SAMPLER: usize = 8192;

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_2G: f32 = 16384.0;   // LSB/g   at ±2 g
pub const GYRO_SCALE_250: f32 = 131.0;     // LSB/°/s at ±250 °/s
pub const STANDARD_GRAVITY: f32 = 9.80665; // m/s² per g
