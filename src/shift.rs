//! "Bit bang" implementation of the configuration shift register protocol

use embedded_hal::digital::OutputPin;

use crate::register::ControlRegister;

/// Something that can transfer the full control register shadow to the panel board.
pub trait ConfigLatch {
    type Error;

    /// Shifts all 8 bits of `reg` out and latches them into the register outputs.
    fn push(&mut self, reg: &ControlRegister) -> Result<(), Self::Error>;
}

/// 3-wire (data, clock, strobe) shift register driven from plain GPIO pins.
pub struct ShiftRegister<DATA, CLK, STR> {
    data: DATA,
    clk: CLK,
    strobe: STR,
}

impl<DATA, CLK, STR, ERR> ShiftRegister<DATA, CLK, STR>
where
    DATA: OutputPin<Error = ERR>,
    CLK: OutputPin<Error = ERR>,
    STR: OutputPin<Error = ERR>,
{
    /// Constructs the shift register driver from the CFG_DATA, CFG_CLK and CFG_STR pins.
    ///
    /// Nothing is written to the pins until the first push.
    pub fn new(data: DATA, clk: CLK, strobe: STR) -> ShiftRegister<DATA, CLK, STR> {
        ShiftRegister { data, clk, strobe }
    }

    /// Gives the pins back
    pub fn release(self) -> (DATA, CLK, STR) {
        (self.data, self.clk, self.strobe)
    }

    #[inline]
    fn write_bit(&mut self, high: bool) -> Result<(), ERR> {
        self.clk.set_low()?;
        if high {
            self.data.set_high()?;
        } else {
            self.data.set_low()?;
        }
        // rising edge captures the bit
        self.clk.set_high()
    }
}

impl<DATA, CLK, STR, ERR> ConfigLatch for ShiftRegister<DATA, CLK, STR>
where
    DATA: OutputPin<Error = ERR>,
    CLK: OutputPin<Error = ERR>,
    STR: OutputPin<Error = ERR>,
{
    type Error = ERR;

    fn push(&mut self, reg: &ControlRegister) -> Result<(), ERR> {
        self.strobe.set_low()?;
        for bit in reg.push_order() {
            self.write_bit(bit)?;
        }
        // rising edge on the strobe moves the shifted bits to the outputs
        self.strobe.set_high()
    }
}
