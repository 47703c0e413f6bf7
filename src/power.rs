//! Power rail sequencing
//!
//! The high voltage rails of the panel have to come up negative first and go down positive
//! first, with settle times in between. Getting the order wrong can damage the panel.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{bus::DataBus, device::Ed047tc1, register::Field, shift::ConfigLatch};

/// Power state of the panel as established by the last power sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// rails off, either after `power_off()`/`power_off_all()` or since creation
    Off,
    /// rails up, input enabled, ready to draw
    On,
}

impl<CFG, BUS, CKV, STH, DELAY, ERR> Ed047tc1<CFG, BUS, CKV, STH, DELAY>
where
    CFG: ConfigLatch<Error = ERR>,
    BUS: DataBus<Error = ERR>,
    CKV: OutputPin<Error = ERR>,
    STH: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    /// Brings the panel supply and both high voltage rails up.
    ///
    /// Blocks for about 700ms of settle time.
    pub fn power_on(&mut self) -> Result<(), ERR> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ed047tc1: power on");

        self.reg.scan_direction = true;
        self.update(Field::PowerDisable, false)?;
        self.delay.delay_ms(100);

        self.update(Field::NegativePowerEnable, true)?;
        self.delay.delay_ms(500);

        self.update(Field::PositivePowerEnable, true)?;
        self.delay.delay_ms(100);

        self.update(Field::StartPulse, true)?;
        self.sth.set_high()?;

        self.power = PowerState::On;
        Ok(())
    }

    /// Takes the high voltage rails down in reverse order and disables the supply.
    pub fn power_off(&mut self) -> Result<(), ERR> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ed047tc1: power off");

        self.update(Field::PositivePowerEnable, false)?;
        self.delay.delay_ms(10);

        self.update(Field::NegativePowerEnable, false)?;
        self.delay.delay_ms(100);

        self.update(Field::PowerDisable, true)?;
        self.update(Field::StartPulse, false)?;

        self.power = PowerState::Off;
        Ok(())
    }

    /// Clears every control line at once, without any settle time.
    ///
    /// This is the emergency stop and works from any state. A frame that is being drawn gets
    /// torn, the panel keeps whatever it shows at that moment.
    pub fn power_off_all(&mut self) -> Result<(), ERR> {
        #[cfg(feature = "defmt")]
        defmt::warn!("ed047tc1: hard power off");

        self.reg = Default::default();
        self.push()?;
        self.power = PowerState::Off;
        Ok(())
    }

    pub fn power_state(&self) -> PowerState {
        self.power
    }
}
