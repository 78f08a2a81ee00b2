//! Stepping behavior over long runs of key presses.
//!
//! The middle of three moving rotors advances on two consecutive key
//! presses when it reaches its own notch: once driven by the rotor to its
//! right, and once more because its notch engages the pawl on its left.

use enigma::{Machine, MachineConfig};

const DEFAULT_CONF: &str = include_str!("../conf/default.conf");

fn m3(setting: &str) -> Machine {
    let text = DEFAULT_CONF.replacen("5 3", "4 3", 1);
    let mut machine = MachineConfig::parse(&text).unwrap().build().unwrap();
    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    machine.set_rotors(setting).unwrap();
    machine
}

/// Returns the 1-based key presses after which slot `slot` changed.
fn moves_of(machine: &mut Machine, slot: usize, presses: usize) -> Vec<usize> {
    let mut moved = Vec::new();
    for press in 1..=presses {
        let before = machine.slot(slot).unwrap().position();
        machine.convert("A").unwrap();
        if machine.slot(slot).unwrap().position() != before {
            moved.push(press);
        }
    }
    moved
}

#[test]
fn middle_rotor_steps_twice_in_succession() {
    let mut machine = m3("ADU");
    assert_eq!(moves_of(&mut machine, 2, 30), vec![2, 3, 28]);
    assert_eq!(machine.positions(), "BGY");
}

#[test]
fn left_rotor_moves_once_on_the_double_step() {
    let mut machine = m3("ADU");
    assert_eq!(moves_of(&mut machine, 1, 30), vec![3]);
}

#[test]
fn rightmost_rotor_moves_every_press() {
    let mut machine = m3("QEV");
    assert_eq!(moves_of(&mut machine, 3, 40), (1..=40).collect::<Vec<_>>());
}

/// Across a full period of the right rotor and several starting points,
/// the middle rotor moves exactly when the right rotor or the middle rotor
/// itself sat at a notch before the press.
#[test]
fn middle_rotor_follows_notch_snapshot() {
    for setting in ["AAA", "ADU", "AEA", "ZEV", "QDV", "MMM"] {
        let mut machine = m3(setting);
        for _ in 0..60 {
            let middle_notch = machine.slot(2).unwrap().at_notch();
            let right_notch = machine.slot(3).unwrap().at_notch();
            let before = machine.slot(2).unwrap().position();

            machine.convert("X").unwrap();

            let moved = machine.slot(2).unwrap().position() != before;
            assert_eq!(
                moved,
                middle_notch || right_notch,
                "setting {} at {}",
                setting,
                machine.positions()
            );
        }
    }
}

#[test]
fn long_run_on_five_slots() {
    let mut machine = MachineConfig::parse(DEFAULT_CONF).unwrap().build().unwrap();
    machine.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    machine.set_rotors("AAAA").unwrap();
    machine.convert(&"A".repeat(200)).unwrap();
    assert_eq!(machine.positions(), "ABIS");
}

#[test]
fn second_rotor_from_right_leaves_its_notch_with_two_pawls() {
    let text = DEFAULT_CONF.replacen("5 3", "4 2", 1);
    let mut machine = MachineConfig::parse(&text).unwrap().build().unwrap();
    machine.insert_rotors(&["B", "Beta", "II", "III"]).unwrap();
    machine.set_rotors("AEU").unwrap();
    assert_eq!(moves_of(&mut machine, 2, 30), vec![1, 2, 28]);
    assert_eq!(machine.positions(), "AHY");
}
