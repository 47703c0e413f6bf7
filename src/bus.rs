//! Byte wide parallel data bus of the source driver

use embedded_hal::digital::OutputPin;

/// Transmits row data to the source driver, one byte per write strobe.
pub trait DataBus {
    type Error;

    /// Puts `value` on the data lines and strobes it into the source driver.
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Writes a complete row, byte by byte.
    #[inline]
    fn write_line(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for byte in bytes {
            self.write_byte(*byte)?;
        }
        Ok(())
    }
}

/// Data bus built from up to 8 GPIO pins (D0..D7, LSB first) and the CKH write strobe.
///
/// Lines given as `None` are not wired. They are skipped on every write, which allows running
/// the driver on a reduced width harness.
pub struct ParallelBus<D, WR> {
    lines: [Option<D>; 8],
    wr: WR,
    mask: u8,
}

impl<D, WR, ERR> ParallelBus<D, WR>
where
    D: OutputPin<Error = ERR>,
    WR: OutputPin<Error = ERR>,
{
    /// Constructs the bus from the D0..D7 pins and the write strobe (CKH).
    pub fn new(lines: [Option<D>; 8], mut wr: WR) -> Result<ParallelBus<D, WR>, ERR> {
        wr.set_low()?;
        let mask = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_some())
            .fold(0u8, |mask, (i, _)| mask | (1 << i));
        Ok(ParallelBus { lines, wr, mask })
    }

    /// Bitmask of the wired data lines, bit 0 is D0.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Gives the pins back
    pub fn release(self) -> ([Option<D>; 8], WR) {
        (self.lines, self.wr)
    }
}

impl<D, WR, ERR> DataBus for ParallelBus<D, WR>
where
    D: OutputPin<Error = ERR>,
    WR: OutputPin<Error = ERR>,
{
    type Error = ERR;

    #[inline]
    fn write_byte(&mut self, value: u8) -> Result<(), ERR> {
        for (i, line) in self.lines.iter_mut().enumerate() {
            if let Some(pin) = line {
                if value & (1 << i) != 0 {
                    pin.set_high()?;
                } else {
                    pin.set_low()?;
                }
            }
        }
        self.wr.set_high()?;
        self.wr.set_low()
    }
}
