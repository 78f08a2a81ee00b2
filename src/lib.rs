//! Rotor cipher machine simulator.
//!
//! Simulates an Enigma-style machine: a stack of interchangeable rotors,
//! each wired as a fixed permutation of an alphabet, stepped mechanically
//! before every key press. The signal runs right to left through the
//! rotors, is bounced back by a reflector, runs left to right again, and
//! passes through an optional plugboard on the way in and out.
//!
//! # Architecture
//!
//! ```text
//! Alphabet      (symbols <-> indices)
//!     ↑ shared
//! Permutation   (cycle notation, precomputed forward/inverse tables)
//!     ↑ owned
//! Rotor         (Reflector | Fixed | Moving{notches}, position, ring)
//!     ↑ catalog + slots
//! Machine       (stepping with double-step, signal path, plugboard)
//!     ↑ driven by
//! Session       (setup directives and message lines)
//! ```
//!
//! # Examples
//!
//! Encrypt a message and decrypt it again from the same settings:
//!
//! ```
//! use enigma::{MachineConfig, Setup};
//!
//! let text = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/conf/default.conf"));
//! let mut machine = MachineConfig::parse(text).unwrap().build().unwrap();
//! let setup = Setup::parse("B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
//!
//! setup.apply(&mut machine).unwrap();
//! let cipher = machine.convert("From his shoulder Hiawatha").unwrap();
//! assert_eq!(cipher, "QVPQSOKOILPUBKJZPISFXDW");
//!
//! setup.apply(&mut machine).unwrap();
//! assert_eq!(machine.convert(&cipher).unwrap(), "FROMHISSHOULDERHIAWATHA");
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
pub mod config;
mod machine;
mod permutation;
mod rotor;
pub mod session;
pub mod utils;

pub use alphabet::Alphabet;
pub use config::MachineConfig;
pub use error::EnigmaError;
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use session::{Session, Setup};
