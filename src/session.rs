//! Session: drives a machine from a stream of setup directives and messages.
//!
//! A line starting with `*` is a setup directive:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! * B Beta III IV I AXLE BBBB (HQ) (EX)
//!   |  rotor names  | |pos| |rings| |plugboard|
//! ```
//!
//! naming one rotor per slot, the starting positions of the non-reflector
//! rotors, optional ring settings and an optional plugboard. Every other
//! line is a message, converted and written in blocks of five.

use std::rc::Rc;

use tracing::debug;

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::utils::grouping::{group, GROUP_WIDTH};

/// Parsed form of a setup directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup<'a> {
    /// Rotor names, leftmost (reflector) first.
    pub rotors: Vec<&'a str>,
    /// Starting positions of the non-reflector rotors.
    pub positions: &'a str,
    /// Ring settings of the non-reflector rotors, if given.
    pub rings: Option<&'a str>,
    /// Plugboard cycles; empty for no swaps.
    pub plugboard: String,
}

impl<'a> Setup<'a> {
    /// Parses the text after the leading `*` of a directive for a machine
    /// with `num_rotors` slots.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if fewer than `num_rotors` names or
    /// no position setting are given.
    pub fn parse(directive: &'a str, num_rotors: usize) -> Result<Self, EnigmaError> {
        let mut tokens = directive.split_whitespace();
        let rotors: Vec<&str> = tokens.by_ref().take(num_rotors).collect();
        if rotors.len() != num_rotors {
            return Err(EnigmaError::format(format!(
                "setup names {} rotors, the machine has {} slots",
                rotors.len(),
                num_rotors
            )));
        }
        let positions = match tokens.next() {
            Some(token) if !token.starts_with('(') => token,
            _ => return Err(EnigmaError::format("setup has no rotor positions")),
        };
        let rest: Vec<&str> = tokens.collect();
        let (rings, cycles) = match rest.split_first() {
            Some((first, tail)) if !first.starts_with('(') => (Some(*first), tail),
            _ => (None, &rest[..]),
        };
        Ok(Setup {
            rotors,
            positions,
            rings,
            plugboard: cycles.join(" "),
        })
    }

    /// Applies this setup to `machine`.
    ///
    /// The setup is applied to a copy first; on error `machine` keeps its
    /// previous rotors, positions and plugboard.
    ///
    /// # Errors
    /// Any error of [`Machine::insert_rotors`], [`Machine::set_rotors`],
    /// [`Machine::set_rings`] or [`Machine::set_plugboard`], or a malformed
    /// plugboard.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), EnigmaError> {
        let plugboard = Permutation::new(&self.plugboard, Rc::clone(machine.alphabet()))?;
        let mut staged = machine.clone();
        staged.insert_rotors(self.rotors.as_slice())?;
        staged.set_rotors(self.positions)?;
        if let Some(rings) = self.rings {
            staged.set_rings(rings)?;
        }
        staged.set_plugboard(plugboard)?;
        *machine = staged;
        Ok(())
    }
}

/// Message stream processor owning its machine.
#[derive(Debug, Clone)]
pub struct Session {
    machine: Machine,
    converted: usize,
}

impl Session {
    /// Creates a session for `machine`.
    pub fn new(machine: Machine) -> Self {
        Session {
            machine,
            converted: 0,
        }
    }

    /// Returns the machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Returns the number of message lines converted so far.
    pub fn converted(&self) -> usize {
        self.converted
    }

    /// Processes one input line.
    ///
    /// Returns `None` for a setup directive and the grouped conversion for a
    /// message line.
    ///
    /// # Errors
    /// - [`EnigmaError::State`] for a message before the first directive.
    /// - Any error of [`Setup::parse`], [`Setup::apply`] or
    ///   [`Machine::convert`].
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, EnigmaError> {
        if let Some(directive) = line.trim_start().strip_prefix('*') {
            let setup = Setup::parse(directive, self.machine.num_rotors())?;
            setup.apply(&mut self.machine)?;
            debug!(
                rotors = ?setup.rotors,
                positions = setup.positions,
                "setup applied"
            );
            return Ok(None);
        }
        let converted = self.machine.convert(line)?;
        self.converted += 1;
        Ok(Some(group(&converted, GROUP_WIDTH)))
    }

    /// Processes every line of `input` and returns the output text, one
    /// line per message line.
    ///
    /// # Errors
    /// The first error of [`process_line`](Self::process_line) aborts the
    /// whole input.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{MachineConfig, Session};
    ///
    /// let text = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/conf/default.conf"));
    /// let config = MachineConfig::parse(text).unwrap();
    /// let mut session = Session::new(config.build().unwrap());
    /// let out = session
    ///     .process("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nFROM his shoulder Hiawatha\n")
    ///     .unwrap();
    /// assert_eq!(out, "QVPQS OKOIL PUBKJ ZPISF XDW\n");
    /// ```
    pub fn process(&mut self, input: &str) -> Result<String, EnigmaError> {
        let mut output = String::new();
        for line in input.lines() {
            if let Some(converted) = self.process_line(line)? {
                output.push_str(&converted);
                output.push('\n');
            }
        }
        Ok(output)
    }
}
