use ed047tc1::prelude::*;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};

fn level(high: bool) -> PinTransaction {
    PinTransaction::set(if high {
        PinState::High
    } else {
        PinState::Low
    })
}

fn clock_pulses(n: usize) -> Vec<PinTransaction> {
    (0..n)
        .flat_map(|_| [level(false), level(true)])
        .collect()
}

#[test]
fn push_shifts_all_bits_between_strobe_edges() {
    let reg = ControlRegister::POWERED_OFF;
    let bits = reg.push_order();
    assert_eq!(bits, [false, false, true, true, false, false, true, false]);

    let data_expect: Vec<_> = bits.iter().map(|b| level(*b)).collect();
    let mut data = PinMock::new(&data_expect);
    let mut clk = PinMock::new(&clock_pulses(8));
    let mut strobe = PinMock::new(&[level(false), level(true)]);

    let mut cfg = ShiftRegister::new(data.clone(), clk.clone(), strobe.clone());
    cfg.push(&reg).unwrap();

    data.done();
    clk.done();
    strobe.done();
}

#[test]
fn bus_drives_only_wired_lines_then_strobes() {
    // 0b1010_0101, D0..D3 wired
    let mut d0 = PinMock::new(&[level(true)]);
    let mut d1 = PinMock::new(&[level(false)]);
    let mut d2 = PinMock::new(&[level(true)]);
    let mut d3 = PinMock::new(&[level(false)]);
    let mut wr = PinMock::new(&[level(false), level(true), level(false)]);

    let mut bus = ParallelBus::new(
        [
            Some(d0.clone()),
            Some(d1.clone()),
            Some(d2.clone()),
            Some(d3.clone()),
            None,
            None,
            None,
            None,
        ],
        wr.clone(),
    )
    .unwrap();
    assert_eq!(bus.mask(), 0x0F);
    bus.write_byte(0b1010_0101).unwrap();

    for pin in [&mut d0, &mut d1, &mut d2, &mut d3, &mut wr] {
        pin.done();
    }
}

#[test]
fn new_parks_the_clocks_and_pushes_the_power_off_state() {
    let bits = ControlRegister::POWERED_OFF.push_order();
    let data_expect: Vec<_> = bits.iter().map(|b| level(*b)).collect();
    let mut data = PinMock::new(&data_expect);
    let mut clk = PinMock::new(&clock_pulses(8));
    let mut strobe = PinMock::new(&[level(false), level(true)]);
    let mut wr = PinMock::new(&[level(false)]);
    let mut ckv = PinMock::new(&[level(false)]);
    let mut sth = PinMock::new(&[level(false)]);

    let lines: [Option<PinMock>; 8] = Default::default();
    let bus = ParallelBus::new(lines, wr.clone()).unwrap();
    let cfg = ShiftRegister::new(data.clone(), clk.clone(), strobe.clone());
    let epd = Ed047tc1::new(
        cfg,
        bus,
        ckv.clone(),
        sth.clone(),
        NoopDelay,
        Dimensions::default(),
    )
    .unwrap();
    assert_eq!(epd.control_register(), ControlRegister::POWERED_OFF);

    for pin in [&mut data, &mut clk, &mut strobe, &mut wr, &mut ckv, &mut sth] {
        pin.done();
    }
}
