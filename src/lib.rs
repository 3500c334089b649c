//! spitest - push a few bytes through a Linux spidev device and show the reply.
//!
//! The `--write` string is decoded into bytes, sent as one SPI message
//! together with an optional read, and both directions are printed in hex.

pub mod config;
#[cfg(target_os = "linux")]
pub mod device;
pub mod error;
pub mod output;
pub mod spi;
pub mod token;

// Re-export main types for convenience
pub use config::{Config, Invocation};
pub use error::SpiError;
pub use spi::{DeviceTransactor, EchoTransactor, SpiBus, Transactor};
