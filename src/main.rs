// MotionStream — Firmware Entry Point
//
// Boot sequence:
//   1. Initialise logging.
//   2. Bring up the shared I2C bus and probe the MPU6050 (halt if absent).
//   3. Connect Wi-Fi and start the HTTP/WebSocket server.
//   4. Spawn the sampler task; park the main thread forever.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use motionstream::config::*;
    use motionstream::drivers::imu::Mpu6050;
    use motionstream::presence::ClientPresence;
    use motionstream::tasks;
    use motionstream::tasks::sampler::Streamer;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("MotionStream firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus ----------------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // ---- IMU (the only fatal condition) -----------------------------------
    let imu = Mpu6050::new(i2c_bus);
    if !imu.is_connected() {
        log::error!("MPU6050 not found on the I2C bus — halting");
        halt();
    }
    if let Err(e) = imu.init() {
        log::error!("MPU6050 init failed: {e:#} — halting");
        halt();
    }
    log::info!("MPU6050 found");

    // ---- Network ----------------------------------------------------------
    let presence = ClientPresence::new();
    let net = tasks::server::start(peripherals.modem, presence.clone())?;

    // ---- Sampler task ------------------------------------------------------
    let streamer = Streamer::new(imu, net.hub(), presence);
    thread::Builder::new()
        .name("sampler".into())
        .stack_size(STACK_SAMPLER)
        .spawn(move || {
            tasks::sampler::sampler_task(streamer);
        })?;

    // Main thread has nothing left to do — park it forever. `net` stays
    // owned here so the Wi-Fi driver and server are never dropped.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

/// Unrecoverable boot failure: hold the firmware here until an external
/// reset or power cycle.
#[cfg(target_os = "espidf")]
fn halt() -> ! {
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    // Host builds exist for the test suite; the binary itself is firmware.
    eprintln!("motionstream targets ESP-IDF; build with --target riscv32imc-esp-espidf");
}
