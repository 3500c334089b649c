use anyhow::Result;
use log::info;
use std::io::{self, Write};
use std::process::ExitCode;

use spitest::config::{self, Invocation};
use spitest::spi;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Malformed or unknown options: clap reports them and exits non-zero.
    let config = match config::parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit()) {
        Invocation::Usage(text) => {
            println!("{}", text);
            return Ok(ExitCode::FAILURE);
        }
        Invocation::Run(config) => config,
    };

    init_logger(config.verbose);
    info!(
        "Using {} (mode {}, {} Hz, delay {} us)",
        config.device, config.mode, config.speed_hz, config.delay_us
    );

    let transactor = spi::default_transactor();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    transactor.exchange(&config, &mut out)?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn init_logger(verbose: bool) {
    // Logs go to stderr so stdout only carries the TX/RX lines.
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", if verbose { "info" } else { "warn" });
    }
    env_logger::init();
}
