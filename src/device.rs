use linux_embedded_hal::spidev::{spidevioctl, SpiModeFlags, Spidev, SpidevTransfer};
use log::debug;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::spi::{Segment, SpiBus};

/// A spidev character device, e.g. `/dev/spidev0.0`. Closed on drop.
pub struct SpidevBus {
    dev: Spidev,
    device_path: String,
}

impl SpidevBus {
    /// Open the device read/write.
    pub fn open(device_path: &str) -> io::Result<Self> {
        let dev = Spidev::open(device_path)?;
        debug!("Opened SPI device: {}", device_path);

        Ok(SpidevBus {
            dev,
            device_path: device_path.to_string(),
        })
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    fn fd(&self) -> RawFd {
        self.dev.as_raw_fd()
    }
}

impl SpiBus for SpidevBus {
    fn write_mode(&mut self, mode: u8) -> io::Result<()> {
        spidevioctl::set_mode(self.fd(), SpiModeFlags::from_bits_truncate(u32::from(mode)))
    }

    fn read_mode(&mut self) -> io::Result<u8> {
        spidevioctl::get_mode(self.fd())
    }

    fn write_max_speed_hz(&mut self, speed_hz: u32) -> io::Result<()> {
        spidevioctl::set_max_speed_hz(self.fd(), speed_hz)
    }

    fn read_max_speed_hz(&mut self) -> io::Result<u32> {
        spidevioctl::get_max_speed_hz(self.fd())
    }

    fn write_bits_per_word(&mut self, bits: u8) -> io::Result<()> {
        spidevioctl::set_bits_per_word(self.fd(), bits)
    }

    fn read_bits_per_word(&mut self) -> io::Result<u8> {
        spidevioctl::get_bits_per_word(self.fd())
    }

    fn transfer(&mut self, segments: &mut [Segment<'_>]) -> io::Result<()> {
        let mut transfers: Vec<SpidevTransfer> = segments
            .iter_mut()
            .map(|segment| match segment {
                Segment::Write { data, delay_us } => {
                    let mut transfer = SpidevTransfer::write(*data);
                    transfer.delay_usecs = *delay_us;
                    transfer
                }
                Segment::Read { buf, delay_us } => {
                    let mut transfer = SpidevTransfer::read(&mut **buf);
                    transfer.delay_usecs = *delay_us;
                    transfer
                }
            })
            .collect();

        // A negative return from SPI_IOC_MESSAGE comes back as Err here.
        self.dev.transfer_multiple(&mut transfers)
    }
}

impl Drop for SpidevBus {
    fn drop(&mut self) {
        debug!("Closing SPI device: {}", self.device_path());
    }
}
