use clap::{CommandFactory, Parser};
use std::ffi::OsString;

use crate::token;

pub const DEFAULT_DEVICE: &str = "/dev/spidev0.0";
pub const DEFAULT_SPEED_HZ: u32 = 100_000;
pub const DEFAULT_BYTES_TO_READ: usize = 1;
pub const DEFAULT_DELAY_US: u16 = 100;

#[derive(Debug, Parser)]
#[command(
    name = "spitest",
    about = "Write bytes to a spidev device and print what comes back",
    override_usage = "spitest [OPTION]",
    disable_help_flag = true
)]
struct Cli {
    /// produce help message
    #[arg(short, long)]
    help: bool,

    /// be verbose and print everything
    #[arg(short, long)]
    verbose: bool,

    /// Spi Mode: 0-3
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    mode: i64,

    /// device
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Bits per second
    #[arg(short, long, default_value_t = DEFAULT_SPEED_HZ)]
    speed: u32,

    /// Write these bytes to spi. '0xaa' will be one byte. '123 134' will be two bytes.
    /// Other ascii chars will be just one byte per character
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    write: String,

    /// Read this number of bytes from the SPI after the write
    #[arg(short = 'r', long = "bytes_to_read", default_value_t = DEFAULT_BYTES_TO_READ)]
    bytes_to_read: usize,

    /// delay in microseconds between read and write
    #[arg(short = 'd', long = "delay_us", default_value_t = DEFAULT_DELAY_US)]
    delay_us: u16,
}

/// Everything a single run needs. Built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    /// Requested SPI mode as given; only the low two bits reach the bus
    pub mode: i64,
    pub device: String,
    pub speed_hz: u32,
    pub bytes_to_read: usize,
    pub delay_us: u16,
    /// Decoded `--write` bytes
    pub write: Vec<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            mode: 0,
            device: DEFAULT_DEVICE.to_string(),
            speed_hz: DEFAULT_SPEED_HZ,
            bytes_to_read: DEFAULT_BYTES_TO_READ,
            delay_us: DEFAULT_DELAY_US,
            write: vec![],
        }
    }
}

impl Config {
    fn from_cli(cli: Cli) -> Self {
        Self {
            verbose: cli.verbose,
            mode: cli.mode,
            device: cli.device,
            speed_hz: cli.speed,
            bytes_to_read: cli.bytes_to_read,
            delay_us: cli.delay_us,
            write: token::decode(&cli.write),
        }
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    /// Print this usage text and exit with failure status
    Usage(String),
    Run(Config),
}

/// Parse process arguments (program name first).
///
/// No arguments at all, or `--help`, yield [`Invocation::Usage`].
pub fn parse_args<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Ok(Invocation::Usage(usage()));
    }

    let cli = Cli::try_parse_from(args)?;
    if cli.help {
        return Ok(Invocation::Usage(usage()));
    }
    Ok(Invocation::Run(Config::from_cli(cli)))
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}
