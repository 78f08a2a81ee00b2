//! Property-based tests for permutations and machine symmetry.

use std::rc::Rc;

use proptest::prelude::*;

use enigma::{Alphabet, Machine, MachineConfig, Permutation};

const DEFAULT_CONF: &str = include_str!("../conf/default.conf");
const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Cycle notation for the permutation that sends `LATIN[i]` to
/// `LATIN[image[i]]`.
fn cycle_text(image: &[usize]) -> String {
    let symbols: Vec<char> = LATIN.chars().collect();
    let mut seen = vec![false; image.len()];
    let mut cycles = Vec::new();
    for start in 0..image.len() {
        if seen[start] {
            continue;
        }
        let mut cycle = String::from("(");
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            cycle.push(symbols[i]);
            i = image[i];
        }
        cycle.push(')');
        cycles.push(cycle);
    }
    cycles.join(" ")
}

fn machine_at(rotors: &[&str], positions: &str, rings: &str, plugboard: &str) -> Machine {
    let mut machine = MachineConfig::parse(DEFAULT_CONF).unwrap().build().unwrap();
    machine.insert_rotors(rotors).unwrap();
    machine.set_rotors(positions).unwrap();
    machine.set_rings(rings).unwrap();
    let alphabet = Rc::clone(machine.alphabet());
    machine
        .set_plugboard(Permutation::new(plugboard, alphabet).unwrap())
        .unwrap();
    machine
}

fn setting() -> impl Strategy<Value = String> {
    "[A-Z]{4}"
}

fn rotor_choice() -> impl Strategy<Value = Vec<&'static str>> {
    Just(vec!["I", "II", "III", "IV", "V", "VI", "VII", "VIII"])
        .prop_shuffle()
        .prop_map(|v| v[..3].to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invert_undoes_permute(image in Just((0..26usize).collect::<Vec<_>>()).prop_shuffle()) {
        let alphabet = Rc::new(Alphabet::default());
        let perm = Permutation::new(&cycle_text(&image), alphabet).unwrap();
        for x in 0..26 {
            prop_assert_eq!(perm.permute(x), image[x]);
            prop_assert_eq!(perm.invert(perm.permute(x)), x);
            prop_assert_eq!(perm.permute(perm.invert(x)), x);
        }
    }

    #[test]
    fn derangement_iff_no_fixed_point(image in Just((0..26usize).collect::<Vec<_>>()).prop_shuffle()) {
        let alphabet = Rc::new(Alphabet::default());
        let perm = Permutation::new(&cycle_text(&image), alphabet).unwrap();
        let no_fixed_point = (0..26).all(|x| perm.permute(x) != x);
        prop_assert_eq!(perm.derangement(), no_fixed_point);
    }

    #[test]
    fn wrap_stays_in_range(p in -10_000i64..10_000) {
        let perm = Permutation::identity(Rc::new(Alphabet::default()));
        let w = perm.wrap(p);
        prop_assert!(w < 26);
        prop_assert_eq!((w as i64 - p).rem_euclid(26), 0);
    }

    #[test]
    fn decrypt_restores_plaintext(
        reflector in prop_oneof![Just("B"), Just("C")],
        fourth in prop_oneof![Just("Beta"), Just("Gamma")],
        moving in rotor_choice(),
        positions in setting(),
        rings in setting(),
        plain in "[A-Z]{1,120}",
    ) {
        let rotors = [reflector, fourth, moving[0], moving[1], moving[2]];
        let plugboard = "(AQ) (BZ) (MX) (EK)";

        let mut encoder = machine_at(&rotors, &positions, &rings, plugboard);
        let cipher = encoder.convert(&plain).unwrap();
        prop_assert_eq!(cipher.len(), plain.len());

        let mut decoder = machine_at(&rotors, &positions, &rings, plugboard);
        prop_assert_eq!(decoder.convert(&cipher).unwrap(), plain);
    }

    #[test]
    fn same_settings_same_ciphertext(
        moving in rotor_choice(),
        positions in setting(),
        plain in "[A-Z]{1,60}",
    ) {
        let rotors = ["B", "Beta", moving[0], moving[1], moving[2]];
        let mut a = machine_at(&rotors, &positions, "AAAA", "");
        let mut b = machine_at(&rotors, &positions, "AAAA", "");
        prop_assert_eq!(a.convert(&plain).unwrap(), b.convert(&plain).unwrap());
    }
}
