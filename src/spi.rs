use log::{debug, info};
use std::io::{self, Write};
use std::marker::PhantomData;

use crate::config::Config;
use crate::error::SpiError;
use crate::output::print_bytes;

/// Only CPOL and CPHA are taken from the requested mode.
pub const MODE_MASK: u8 = 0x03;

/// The mode byte actually written to the bus.
pub fn bus_mode(mode: i64) -> u8 {
    (mode & i64::from(MODE_MASK)) as u8
}
pub const BITS_PER_WORD: u8 = 8;

/// Register-level access to an SPI controller, one call per ioctl.
pub trait SpiBus {
    fn write_mode(&mut self, mode: u8) -> io::Result<()>;
    fn read_mode(&mut self) -> io::Result<u8>;
    fn write_max_speed_hz(&mut self, speed_hz: u32) -> io::Result<()>;
    fn read_max_speed_hz(&mut self) -> io::Result<u32>;
    fn write_bits_per_word(&mut self, bits: u8) -> io::Result<()>;
    fn read_bits_per_word(&mut self) -> io::Result<u8>;

    /// Run all segments as one message with chip select held across them.
    fn transfer(&mut self, segments: &mut [Segment<'_>]) -> io::Result<()>;
}

/// One leg of a message.
#[derive(Debug)]
pub enum Segment<'a> {
    Write { data: &'a [u8], delay_us: u16 },
    Read { buf: &'a mut [u8], delay_us: u16 },
}

/// Lay out the message: the write leg if there is anything to send, then the
/// read leg if anything is to be read.
pub fn plan<'a>(write: &'a [u8], read: &'a mut [u8], delay_us: u16) -> Vec<Segment<'a>> {
    let mut segments = Vec::with_capacity(2);
    if !write.is_empty() {
        segments.push(Segment::Write { data: write, delay_us });
    }
    if !read.is_empty() {
        segments.push(Segment::Read { buf: read, delay_us });
    }
    segments
}

fn failed(step: &'static str) -> impl FnOnce(io::Error) -> SpiError {
    move |source| SpiError::Configure { step, source }
}

/// Apply mode, clock and word size, reading each one back after writing it.
pub fn configure<B: SpiBus>(bus: &mut B, config: &Config) -> Result<(), SpiError> {
    bus.write_mode(bus_mode(config.mode))
        .map_err(failed("SPI_IOC_WR_MODE"))?;
    let mode = bus.read_mode().map_err(failed("SPI_IOC_RD_MODE"))?;
    debug!("SPI mode: {}", mode);

    bus.write_max_speed_hz(config.speed_hz)
        .map_err(failed("SPI_IOC_WR_MAX_SPEED_HZ"))?;
    let speed_hz = bus
        .read_max_speed_hz()
        .map_err(failed("SPI_IOC_RD_MAX_SPEED_HZ"))?;
    debug!("SPI max speed: {} Hz", speed_hz);

    bus.write_bits_per_word(BITS_PER_WORD)
        .map_err(failed("SPI_IOC_WR_BITS_PER_WORD"))?;
    let bits = bus
        .read_bits_per_word()
        .map_err(failed("SPI_IOC_RD_BITS_PER_WORD"))?;
    debug!("SPI bits per word: {}", bits);

    Ok(())
}

/// Performs the single write/read exchange of a run and prints the result.
pub trait Transactor {
    fn exchange(&self, config: &Config, out: &mut dyn Write) -> Result<(), SpiError>;
}

/// Exchange against a real bus obtained from `open`.
pub struct DeviceTransactor<F, B> {
    open: F,
    _bus: PhantomData<fn() -> B>,
}

impl<F, B> DeviceTransactor<F, B>
where
    F: Fn(&str) -> io::Result<B>,
    B: SpiBus,
{
    pub fn new(open: F) -> Self {
        DeviceTransactor {
            open,
            _bus: PhantomData,
        }
    }
}

impl<F, B> Transactor for DeviceTransactor<F, B>
where
    F: Fn(&str) -> io::Result<B>,
    B: SpiBus,
{
    fn exchange(&self, config: &Config, out: &mut dyn Write) -> Result<(), SpiError> {
        let mut bus = (self.open)(&config.device).map_err(|source| SpiError::Open {
            path: config.device.clone(),
            source,
        })?;
        configure(&mut bus, config)?;

        if config.write.is_empty() && config.bytes_to_read == 0 {
            info!("Nothing to write or read on {}", config.device);
            return Ok(());
        }

        let mut rx = vec![0u8; config.bytes_to_read];
        let mut segments = plan(&config.write, &mut rx, config.delay_us);
        info!(
            "Transferring {} segment(s) on {}: {} byte(s) out, {} byte(s) in",
            segments.len(),
            config.device,
            config.write.len(),
            config.bytes_to_read
        );

        if config.verbose {
            print_bytes(out, "TX:", &config.write).map_err(SpiError::Output)?;
        }
        bus.transfer(&mut segments)
            .map_err(|source| SpiError::Transfer { source })?;
        drop(segments);

        print_bytes(out, "RX:", &rx).map_err(SpiError::Output)
    }
}

/// Stand-in for targets without spidev: shows what would be sent and nothing more.
#[derive(Debug, Default)]
pub struct EchoTransactor;

impl Transactor for EchoTransactor {
    fn exchange(&self, config: &Config, out: &mut dyn Write) -> Result<(), SpiError> {
        debug!("No SPI driver on this target, echoing {}", config.device);
        print_bytes(out, "TX:", &config.write).map_err(SpiError::Output)
    }
}

/// The transactor for the platform this binary was built for.
#[cfg(target_os = "linux")]
pub fn default_transactor() -> Box<dyn Transactor> {
    Box::new(DeviceTransactor::new(crate::device::SpidevBus::open))
}

#[cfg(not(target_os = "linux"))]
pub fn default_transactor() -> Box<dyn Transactor> {
    Box::new(EchoTransactor)
}
