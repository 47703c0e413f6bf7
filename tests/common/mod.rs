//! Pin capture harness shared by the integration tests.
//!
//! All pins of a driver write into one [`Wire`], which decodes what the panel board would see:
//! complete configuration register pushes, CKV and STH edges, bytes strobed over the data bus
//! and the requested delays, in order.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use ed047tc1::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    CfgData,
    CfgClk,
    CfgStr,
    Ckv,
    Sth,
    Ckh,
    Data(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Push(ControlRegister),
    Ckv(bool),
    Sth(bool),
    Byte(u8),
    DelayUs(u32),
}

#[derive(Debug, Default)]
pub struct Wire {
    data_levels: [bool; 8],
    cfg_data: bool,
    cfg_clk: bool,
    cfg_bits: Vec<bool>,
    ckh: bool,
    pub events: Vec<Event>,
}

impl Wire {
    fn set(&mut self, line: Line, high: bool) {
        match line {
            Line::CfgData => self.cfg_data = high,
            Line::CfgClk => {
                if high && !self.cfg_clk {
                    self.cfg_bits.push(self.cfg_data);
                }
                self.cfg_clk = high;
            }
            Line::CfgStr => {
                if high {
                    let bits: [bool; 8] = self
                        .cfg_bits
                        .as_slice()
                        .try_into()
                        .expect("exactly 8 bits per push");
                    self.events
                        .push(Event::Push(ControlRegister::from_push_order(bits)));
                }
                self.cfg_bits.clear();
            }
            Line::Ckv => self.events.push(Event::Ckv(high)),
            Line::Sth => self.events.push(Event::Sth(high)),
            Line::Ckh => {
                if high && !self.ckh {
                    let byte = self
                        .data_levels
                        .iter()
                        .enumerate()
                        .filter(|(_, level)| **level)
                        .fold(0u8, |byte, (i, _)| byte | (1 << i));
                    self.events.push(Event::Byte(byte));
                }
                self.ckh = high;
            }
            Line::Data(i) => self.data_levels[i] = high,
        }
    }
}

pub type SharedWire = Rc<RefCell<Wire>>;

pub struct Probe {
    line: Line,
    wire: SharedWire,
}

impl ErrorType for Probe {
    type Error = Infallible;
}

impl OutputPin for Probe {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.wire.borrow_mut().set(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.wire.borrow_mut().set(self.line, true);
        Ok(())
    }
}

pub struct ProbeDelay {
    wire: SharedWire,
}

impl DelayNs for ProbeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.borrow_mut().events.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.wire.borrow_mut().events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wire.borrow_mut().events.push(Event::DelayUs(ms * 1_000));
    }
}

pub type TestEpd =
    Ed047tc1<ShiftRegister<Probe, Probe, Probe>, ParallelBus<Probe, Probe>, Probe, Probe, ProbeDelay>;

fn probe(wire: &SharedWire, line: Line) -> Probe {
    Probe {
        line,
        wire: wire.clone(),
    }
}

/// Driver with all 8 data lines wired. The construction events are discarded.
pub fn driver(width: i32, height: i32) -> (TestEpd, SharedWire) {
    driver_with_lines(width, height, 0xFF)
}

/// Driver with only the data lines in `mask` wired.
pub fn driver_with_lines(width: i32, height: i32, mask: u8) -> (TestEpd, SharedWire) {
    let wire: SharedWire = Rc::new(RefCell::new(Wire::default()));
    let cfg = ShiftRegister::new(
        probe(&wire, Line::CfgData),
        probe(&wire, Line::CfgClk),
        probe(&wire, Line::CfgStr),
    );
    let lines = core::array::from_fn(|i| {
        if mask & (1 << i) != 0 {
            Some(probe(&wire, Line::Data(i)))
        } else {
            None
        }
    });
    let bus = ParallelBus::new(lines, probe(&wire, Line::Ckh)).unwrap();
    let epd = Ed047tc1::new(
        cfg,
        bus,
        probe(&wire, Line::Ckv),
        probe(&wire, Line::Sth),
        ProbeDelay { wire: wire.clone() },
        Dimensions::new(width, height),
    )
    .unwrap();
    wire.borrow_mut().events.clear();
    (epd, wire)
}

/// Takes the recorded events out of the wire
pub fn take(wire: &SharedWire) -> Vec<Event> {
    core::mem::take(&mut wire.borrow_mut().events)
}

pub fn pushes(events: &[Event]) -> Vec<ControlRegister> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Push(reg) => Some(*reg),
            _ => None,
        })
        .collect()
}

/// Number of pushes where `field` went from low to high
pub fn rising(events: &[Event], field: Field) -> usize {
    let mut previous = false;
    let mut count = 0;
    for reg in pushes(events) {
        let now = reg.get(field);
        if now && !previous {
            count += 1;
        }
        previous = now;
    }
    count
}

/// Number of pushes where `field` went from high to low
pub fn falling(events: &[Event], field: Field) -> usize {
    let mut previous = false;
    let mut count = 0;
    for reg in pushes(events) {
        let now = reg.get(field);
        if !now && previous {
            count += 1;
        }
        previous = now;
    }
    count
}

/// Frames started, counted by the mode line going high
pub fn frame_starts(events: &[Event]) -> usize {
    rising(events, Field::Mode)
}

pub fn frame_ends(events: &[Event]) -> usize {
    falling(events, Field::Mode)
}

/// Skipped rows, counted by their 45us CKV high time
pub fn skipped_rows(events: &[Event]) -> usize {
    events
        .windows(2)
        .filter(|w| w[0] == Event::Ckv(true) && w[1] == Event::DelayUs(45))
        .count()
}

/// Bytes of every data row, split at the latch pulses
pub fn data_rows(events: &[Event]) -> Vec<Vec<u8>> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for event in events {
        match event {
            Event::Push(reg) if reg.latch_enable => rows.push(Vec::new()),
            Event::Byte(b) => rows
                .last_mut()
                .expect("bytes only follow a latch pulse")
                .push(*b),
            _ => {}
        }
    }
    rows
}

/// CKV high times of the row enable pulses, i.e. the first CKV pulse after each latch
pub fn row_pulses(events: &[Event]) -> Vec<u32> {
    let mut pulses = Vec::new();
    let mut after_latch = false;
    for w in events.windows(2) {
        match w {
            [Event::Push(reg), _] if reg.latch_enable => after_latch = true,
            [Event::Ckv(true), Event::DelayUs(us)] if after_latch => {
                pulses.push(*us);
                after_latch = false;
            }
            _ => {}
        }
    }
    pulses
}

/// Sum of all requested delays
pub fn total_delay_us(events: &[Event]) -> u64 {
    events
        .iter()
        .map(|e| match e {
            Event::DelayUs(us) => u64::from(*us),
            _ => 0,
        })
        .sum()
}
