//! # Main driver struct for the ED047TC1
//!
//! This contains the state shared by all the other modules: the pins, the shadow of the
//! configuration register, the row buffers and the grayscale lookup table. The actual protocol
//! lives in separate modules, each adding methods to [`Ed047tc1`]:
//!  - `power` for the power rail sequences
//!  - `frame` for the frame/row timing of the gate driver
//!  - `mono` for 1 bit per pixel drawing and clearing
//!  - `grayscale` for the 15 pass, 16 level grayscale drawing
//!
//! Typically you want to:
//!  - create the [`ShiftRegister`](crate::shift::ShiftRegister) and
//!    [`ParallelBus`](crate::bus::ParallelBus) from your pins
//!  - create the driver with [`Ed047tc1::new()`]
//!  - `power_on()`, `clear()`, draw, and `power_off()` again, the panel keeps its image without
//!    power.
//!
//! All buffers are sized for the largest panel at compile time, the driver never allocates.
//! The struct is about 5kB large, consider putting it in a static cell on small targets.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::{
    bus::DataBus,
    config::Dimensions,
    frame::FrameState,
    grayscale::Lut,
    power::PowerState,
    register::{ControlRegister, Field},
    shift::ConfigLatch,
    MAX_LINE_BYTES_1BPP, MAX_LINE_BYTES_4BPP, MAX_LINE_BYTES_DRIVE,
};

/// main struct for state keeping of the ED047TC1 driver
pub struct Ed047tc1<CFG, BUS, CKV, STH, DELAY> {
    pub(crate) cfg: CFG,
    pub(crate) bus: BUS,
    pub(crate) ckv: CKV,
    pub(crate) sth: STH,
    pub(crate) delay: DELAY,
    pub(crate) dims: Dimensions,
    pub(crate) reg: ControlRegister,
    pub(crate) power: PowerState,
    pub(crate) frame: FrameState,
    /// 1bpp row, MSB first
    pub(crate) line_1bpp: [u8; MAX_LINE_BYTES_1BPP],
    /// 4bpp scratch row, high nibble is the even column
    pub(crate) line_4bpp: [u8; MAX_LINE_BYTES_4BPP],
    /// 2 bit per pixel drive row for grayscale passes
    pub(crate) line_drive: [u8; MAX_LINE_BYTES_DRIVE],
    pub(crate) lut: Lut,
}

impl<CFG, BUS, CKV, STH, DELAY, ERR> Ed047tc1<CFG, BUS, CKV, STH, DELAY>
where
    CFG: ConfigLatch<Error = ERR>,
    BUS: DataBus<Error = ERR>,
    CKV: OutputPin<Error = ERR>,
    STH: OutputPin<Error = ERR>,
    DELAY: DelayNs,
{
    /// Create a new instance of the ED047TC1 driver
    ///
    /// Arguments:
    ///
    /// - cfg: the configuration shift register (CFG_DATA, CFG_CLK, CFG_STR)
    /// - bus: the 8 bit data bus including the CKH write strobe
    /// - ckv: vertical gate clock
    /// - sth: source driver input enable
    /// - delay: blocking microsecond delay
    /// - dims: panel size, see [`Dimensions::new()`] for the clamping rules
    ///
    /// The panel stays unpowered. The safe power-off state is pushed to the configuration
    /// register right away because its outputs are undefined after the board powers up.
    pub fn new(
        cfg: CFG,
        bus: BUS,
        mut ckv: CKV,
        mut sth: STH,
        delay: DELAY,
        dims: Dimensions,
    ) -> Result<Ed047tc1<CFG, BUS, CKV, STH, DELAY>, ERR> {
        ckv.set_low()?;
        sth.set_low()?;

        let mut epd = Ed047tc1 {
            cfg,
            bus,
            ckv,
            sth,
            delay,
            dims,
            reg: ControlRegister::POWERED_OFF,
            power: PowerState::Off,
            frame: FrameState::Idle,
            line_1bpp: [0u8; MAX_LINE_BYTES_1BPP],
            line_4bpp: [0u8; MAX_LINE_BYTES_4BPP],
            line_drive: [0u8; MAX_LINE_BYTES_DRIVE],
            lut: Lut::new(),
        };
        epd.push()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ed047tc1: created {}x{}", dims.width(), dims.height());

        Ok(epd)
    }

    /// Panel width in pixels
    pub fn width(&self) -> u16 {
        self.dims.width()
    }

    /// Panel height in pixels
    pub fn height(&self) -> u16 {
        self.dims.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// The shadow of the configuration register, as last pushed to the panel board.
    pub fn control_register(&self) -> ControlRegister {
        self.reg
    }

    /// Destroys the driver and gives back the hardware
    pub fn release(self) -> (CFG, BUS, CKV, STH, DELAY) {
        (self.cfg, self.bus, self.ckv, self.sth, self.delay)
    }

    // Sends the complete shadow to the shift register.
    pub(crate) fn push(&mut self) -> Result<(), ERR> {
        self.cfg.push(&self.reg)
    }

    // Changes one line and pushes the whole register, there is no partial update.
    pub(crate) fn update(&mut self, field: Field, value: bool) -> Result<(), ERR> {
        self.reg.set(field, value);
        self.push()
    }

    /// Pulses the vertical gate clock.
    ///
    /// A zero `high_us` skips the high phase, a zero `low_us` returns right after pulling the
    /// clock low.
    pub(crate) fn pulse_ckv(&mut self, high_us: u32, low_us: u32) -> Result<(), ERR> {
        if high_us > 0 {
            self.ckv.set_high()?;
            self.delay.delay_us(high_us);
        }
        self.ckv.set_low()?;
        if low_us > 0 {
            self.delay.delay_us(low_us);
        }
        Ok(())
    }
}
