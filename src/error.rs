use std::io;
use thiserror::Error;

/// Failures of a bus run. Each one is fatal.
#[derive(Debug, Error)]
pub enum SpiError {
    /// The device node could not be opened
    #[error("open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    /// A mode, speed or word size ioctl failed; `step` is the ioctl name
    #[error("ioctl: {step}")]
    Configure {
        step: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("ioctl: SPI_IOC_MESSAGE")]
    Transfer {
        #[source]
        source: io::Error,
    },
    /// Printing the TX/RX lines failed
    #[error("failed to write output")]
    Output(#[source] io::Error),
}
