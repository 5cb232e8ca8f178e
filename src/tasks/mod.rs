pub mod sampler;

#[cfg(target_os = "espidf")]
pub mod server;
