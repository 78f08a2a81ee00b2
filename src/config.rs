//! Configuration loader.
//!
//! A configuration describes the alphabet, the slot and pawl counts, and
//! every rotor the machine may use:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//!  I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!  Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!  B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!            (RX) (SZ) (TV)
//! ```
//!
//! Each rotor line holds a name, a type (`R` reflector, `N` fixed, `M`
//! followed by the notch symbols) and the wiring in cycle notation. A line
//! starting with `(` continues the wiring of the rotor above it.

use std::rc::Rc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Parsed configuration, ready to be turned into a [`Machine`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Alphabet shared by every rotor and the plugboard.
    pub alphabet: Rc<Alphabet>,
    /// Number of rotor slots.
    pub num_rotors: usize,
    /// Number of pawls, i.e. of moving rotor slots.
    pub pawls: usize,
    /// Every available rotor, in configuration order.
    pub rotors: Vec<Rotor>,
}

impl MachineConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    /// - [`EnigmaError::Format`] for a bad alphabet, missing or non-numeric
    ///   slot/pawl counts, or a malformed rotor line.
    /// - [`EnigmaError::Lookup`] if a notch or wiring symbol is not in the
    ///   alphabet.
    /// - [`EnigmaError::Config`] if a reflector's wiring leaves a symbol
    ///   in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let text = "ABCD\n2 1\n R R (AB) (CD)\n X MA (ABC)\n";
    /// let config = MachineConfig::parse(text).unwrap();
    /// assert_eq!(config.num_rotors, 2);
    /// assert_eq!(config.rotors.len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let mut lines = text.lines();

        let alphabet_line = lines.next().ok_or_else(truncated)?;
        let alphabet = Rc::new(Alphabet::new(alphabet_line.trim())?);

        let mut counts: Vec<usize> = Vec::with_capacity(2);
        while counts.len() < 2 {
            let line = lines.next().ok_or_else(truncated)?;
            for token in line.split_whitespace() {
                if counts.len() == 2 {
                    return Err(EnigmaError::format(format!(
                        "unexpected {:?} after the slot and pawl counts",
                        token
                    )));
                }
                let count = token.parse::<usize>().map_err(|_| {
                    EnigmaError::format(format!("{:?} is not a slot or pawl count", token))
                })?;
                counts.push(count);
            }
        }
        let (num_rotors, pawls) = (counts[0], counts[1]);

        let mut rotors: Vec<Rotor> = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('(') {
                let rotor = rotors.last_mut().ok_or_else(|| {
                    EnigmaError::format("wiring continuation before any rotor")
                })?;
                rotor.permutation_mut().add_cycles(line)?;
            } else {
                rotors.push(parse_rotor(line, &alphabet)?);
            }
        }

        if let Some(rotor) = rotors
            .iter()
            .find(|r| r.reflecting() && !r.permutation().derangement())
        {
            return Err(EnigmaError::config(format!(
                "reflector {} leaves a symbol unchanged",
                rotor.name()
            )));
        }

        debug!(
            alphabet = %alphabet,
            num_rotors,
            pawls,
            rotors = rotors.len(),
            "configuration parsed"
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            pawls,
            rotors,
        })
    }

    /// Builds the machine described by this configuration.
    ///
    /// # Errors
    /// Same as [`Machine::new`].
    pub fn build(self) -> Result<Machine, EnigmaError> {
        Machine::new(self.alphabet, self.num_rotors, self.pawls, self.rotors)
    }
}

fn truncated() -> EnigmaError {
    EnigmaError::format("configuration truncated")
}

/// Splits the first whitespace-delimited token off `s`.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Parses a `NAME TYPE CYCLES...` rotor line.
fn parse_rotor(line: &str, alphabet: &Rc<Alphabet>) -> Result<Rotor, EnigmaError> {
    let (name, rest) = split_token(line);
    let (kind, cycles) = split_token(rest);
    if kind.is_empty() {
        return Err(EnigmaError::format(format!("rotor {} has no type", name)));
    }
    let permutation = Permutation::new(cycles, Rc::clone(alphabet))?;

    let mut chars = kind.chars();
    let tag = chars.next();
    let tail = chars.as_str();
    match tag {
        Some('M') => Rotor::moving(name, permutation, tail),
        Some('N') if tail.is_empty() => Ok(Rotor::fixed(name, permutation)),
        Some('R') if tail.is_empty() => Ok(Rotor::reflector(name, permutation)),
        _ => Err(EnigmaError::format(format!(
            "rotor {} has unknown type {:?}",
            name, kind
        ))),
    }
}
