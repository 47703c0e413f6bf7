//! # Module defining the configuration register of the ED047TC1 panel board
//!
//! The panel board carries an 8 bit serial-in/parallel-out shift register which holds all the
//! "slow" control signals of the panel: the power rail enables, the gate driver start pulse,
//! scan direction, and so on. The register is write only, there is no way to read it back, so
//! the driver keeps a shadow copy ([`ControlRegister`]) which is the only readable truth about
//! the state of these lines.
//!
//! ## Power rails
//! The panel needs a positive and a negative high voltage rail to move the pigment particles.
//! Both are generated on the board and switched through this register. They must be enabled and
//! disabled in a specific order (negative first when powering up, positive first when powering
//! down) with settle times in between, see the power module.
//!
//! ## Gate driver signals
//! `start_pulse` (STV in the datasheet) starts a new frame on the gate driver, `mode` enables
//! the gate driver output, `output_enable` enables the source driver output and `latch_enable`
//! latches the source driver shift register into its outputs at the start of each row.
//!
//! Every change to the shadow must be followed by a full push of all 8 bits. There are no
//! partial updates.

/// One of the 8 control lines held in the configuration shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Latches the source driver row data into its outputs (LE)
    LatchEnable,
    /// Disables the board power supply when set
    PowerDisable,
    /// Enables the positive high voltage rail
    PositivePowerEnable,
    /// Enables the negative high voltage rail
    NegativePowerEnable,
    /// Gate driver start pulse (STV)
    StartPulse,
    /// Gate driver scan direction
    ScanDirection,
    /// Gate driver output mode (MODE)
    Mode,
    /// Source driver output enable (OE)
    OutputEnable,
}

impl Field {
    /// The order in which the bits are clocked into the shift register.
    ///
    /// The first bit shifted in ends up at the far end of the register, so this is the reverse
    /// of the register's output order.
    pub const PUSH_ORDER: [Field; 8] = [
        Field::OutputEnable,
        Field::Mode,
        Field::ScanDirection,
        Field::StartPulse,
        Field::NegativePowerEnable,
        Field::PositivePowerEnable,
        Field::PowerDisable,
        Field::LatchEnable,
    ];
}

/// Shadow of the write only configuration register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister {
    /// see [`Field::LatchEnable`]
    pub latch_enable: bool,
    /// see [`Field::PowerDisable`]
    pub power_disable: bool,
    /// see [`Field::PositivePowerEnable`]
    pub positive_power_enable: bool,
    /// see [`Field::NegativePowerEnable`]
    pub negative_power_enable: bool,
    /// see [`Field::StartPulse`]
    pub start_pulse: bool,
    /// see [`Field::ScanDirection`]
    pub scan_direction: bool,
    /// see [`Field::Mode`]
    pub mode: bool,
    /// see [`Field::OutputEnable`]
    pub output_enable: bool,
}

impl ControlRegister {
    /// The state pushed when the driver is created: supply disabled, rails off, start pulse
    /// idle high and forward scan direction.
    pub const POWERED_OFF: ControlRegister = ControlRegister {
        latch_enable: false,
        power_disable: true,
        positive_power_enable: false,
        negative_power_enable: false,
        start_pulse: true,
        scan_direction: true,
        mode: false,
        output_enable: false,
    };

    /// Returns the current value of a single line
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::LatchEnable => self.latch_enable,
            Field::PowerDisable => self.power_disable,
            Field::PositivePowerEnable => self.positive_power_enable,
            Field::NegativePowerEnable => self.negative_power_enable,
            Field::StartPulse => self.start_pulse,
            Field::ScanDirection => self.scan_direction,
            Field::Mode => self.mode,
            Field::OutputEnable => self.output_enable,
        }
    }

    /// Changes a single line in the shadow. This does not touch the hardware.
    pub fn set(&mut self, field: Field, value: bool) {
        let bit = match field {
            Field::LatchEnable => &mut self.latch_enable,
            Field::PowerDisable => &mut self.power_disable,
            Field::PositivePowerEnable => &mut self.positive_power_enable,
            Field::NegativePowerEnable => &mut self.negative_power_enable,
            Field::StartPulse => &mut self.start_pulse,
            Field::ScanDirection => &mut self.scan_direction,
            Field::Mode => &mut self.mode,
            Field::OutputEnable => &mut self.output_enable,
        };
        *bit = value;
    }

    /// Returns the 8 bits in the order they have to be shifted out
    pub fn push_order(&self) -> [bool; 8] {
        Field::PUSH_ORDER.map(|field| self.get(field))
    }

    /// Rebuilds a register from 8 bits in push order.
    ///
    /// The driver never needs this, the register is write only. It decodes what a logic
    /// analyzer or a recording test pin captured between two strobe edges, and is the exact
    /// inverse of [`push_order()`](Self::push_order).
    pub fn from_push_order(bits: [bool; 8]) -> ControlRegister {
        let mut reg = ControlRegister::default();
        for (field, bit) in Field::PUSH_ORDER.iter().zip(bits) {
            reg.set(*field, bit);
        }
        reg
    }
}
