fn main() {
    // ESP-IDF linkage only matters for the firmware target; host builds
    // (unit/integration tests) must not require the Espressif toolchain.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
