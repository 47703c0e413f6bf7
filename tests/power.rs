mod common;

use common::*;
use ed047tc1::prelude::*;

fn delays(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::DelayUs(us) => Some(*us),
            _ => None,
        })
        .collect()
}

#[test]
fn new_driver_is_powered_off() {
    let (epd, _wire) = driver(960, 540);
    assert_eq!(epd.control_register(), ControlRegister::POWERED_OFF);
    assert_eq!(epd.power_state(), PowerState::Off);
}

#[test]
fn power_on_enables_negative_rail_first() {
    let (mut epd, wire) = driver(8, 1);
    epd.power_on().unwrap();
    let events = take(&wire);

    let base = ControlRegister {
        scan_direction: true,
        start_pulse: true,
        ..Default::default()
    };
    let negative = ControlRegister {
        negative_power_enable: true,
        ..base
    };
    let both = ControlRegister {
        positive_power_enable: true,
        ..negative
    };
    assert_eq!(pushes(&events), vec![base, negative, both, both]);
    assert_eq!(delays(&events), vec![100_000, 500_000, 100_000]);
    assert_eq!(events.last(), Some(&Event::Sth(true)));

    assert_eq!(epd.control_register(), both);
    assert_eq!(epd.power_state(), PowerState::On);
}

#[test]
fn power_off_disables_positive_rail_first() {
    let (mut epd, wire) = driver(8, 1);
    epd.power_on().unwrap();
    take(&wire);
    epd.power_off().unwrap();
    let events = take(&wire);

    let registers = pushes(&events);
    assert_eq!(registers.len(), 4);
    assert!(!registers[0].positive_power_enable);
    assert!(registers[0].negative_power_enable);
    assert!(!registers[1].negative_power_enable);
    assert!(!registers[1].power_disable);
    assert!(registers[2].power_disable);
    assert!(!registers[3].start_pulse);
    assert_eq!(delays(&events), vec![10_000, 100_000]);

    assert_eq!(epd.power_state(), PowerState::Off);
}

#[test]
fn power_off_all_clears_every_line() {
    let (mut epd, wire) = driver(8, 1);
    epd.power_on().unwrap();
    epd.power_off().unwrap();
    take(&wire);

    epd.power_off_all().unwrap();
    let events = take(&wire);
    assert_eq!(pushes(&events), vec![ControlRegister::default()]);
    assert!(delays(&events).is_empty());
    assert_eq!(epd.control_register(), ControlRegister::default());
    assert_eq!(epd.power_state(), PowerState::Off);
}

#[test]
fn power_off_all_works_while_powered() {
    let (mut epd, wire) = driver(8, 1);
    epd.power_on().unwrap();
    epd.power_off_all().unwrap();
    take(&wire);

    assert_eq!(epd.control_register(), ControlRegister::default());
    assert_eq!(epd.power_state(), PowerState::Off);
}

#[test]
fn powered_draw_keeps_the_rails_up() {
    let (mut epd, wire) = driver(8, 2);
    epd.power_on().unwrap();
    take(&wire);
    epd.clear(1).unwrap();

    let events = take(&wire);
    assert!(pushes(&events)
        .iter()
        .all(|reg| reg.positive_power_enable && reg.negative_power_enable && !reg.power_disable));
}

#[test]
fn dimensions_are_clamped() {
    let (epd, _wire) = driver(0, 600);
    assert_eq!((epd.width(), epd.height()), (960, 540));

    let (epd, _wire) = driver(-5, 100);
    assert_eq!((epd.width(), epd.height()), (960, 100));

    let (epd, _wire) = driver(1200, 540);
    assert_eq!(epd.dimensions(), Dimensions::default());
}

#[test]
fn release_hands_back_the_hardware() {
    let (epd, _wire) = driver_with_lines(8, 1, 0x3F);
    let (_cfg, bus, _ckv, _sth, _delay) = epd.release();
    assert_eq!(bus.mask(), 0x3F);
}
