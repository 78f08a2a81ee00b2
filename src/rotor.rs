//! Rotor: a wired wheel with a rotational offset.
//!
//! The three physical variants differ only in what they allow: a
//! reflector never moves and bounces the signal back through the stack,
//! a fixed rotor can be set by hand but has no pawl, and a moving rotor
//! is advanced by the machine and carries notches that drive its left
//! neighbor.

use std::fmt;
use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Behavioral variant of a [`Rotor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Non-rotating rotor in slot 0 that returns the signal.
    Reflector,
    /// Non-rotating rotor that may be positioned by hand.
    Fixed,
    /// Rotating rotor; `notches` holds the alphabet indices of its notches.
    Moving { notches: Vec<usize> },
}

/// A rotor: wiring permutation, current position, ring setting and kind.
///
/// The wiring is applied at an offset of `position - ring`, which models
/// the wheel being turned against its fixed contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    position: usize,
    ring: usize,
    kind: RotorKind,
}

impl Rotor {
    /// Creates a reflector named `name`.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::build(name.into(), permutation, RotorKind::Reflector)
    }

    /// Creates a non-rotating rotor named `name`.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::build(name.into(), permutation, RotorKind::Fixed)
    }

    /// Creates a rotating rotor named `name` with the given notch symbols.
    ///
    /// # Errors
    /// - [`EnigmaError::Format`] if `notches` is empty.
    /// - [`EnigmaError::Lookup`] if a notch is not in the rotor's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alpha = Rc::new(Alphabet::default());
    /// let wiring = Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", alpha).unwrap();
    /// let mut rotor = Rotor::moving("I", wiring, "Q").unwrap();
    /// rotor.set_symbol('Q').unwrap();
    /// assert!(rotor.at_notch());
    /// rotor.advance().unwrap();
    /// assert!(!rotor.at_notch());
    /// ```
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let name = name.into();
        if notches.is_empty() {
            return Err(EnigmaError::format(format!(
                "moving rotor {} has no notches",
                name
            )));
        }
        let alphabet = permutation.alphabet();
        let mut indices = Vec::with_capacity(notches.len());
        for c in notches.chars() {
            let index = alphabet.to_int(c)?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        Ok(Self::build(
            name,
            permutation,
            RotorKind::Moving { notches: indices },
        ))
    }

    fn build(name: String, permutation: Permutation, kind: RotorKind) -> Self {
        Rotor {
            name,
            permutation,
            position: 0,
            ring: 0,
            kind,
        }
    }

    /// Returns the rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor's variant.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns the wiring permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the wiring permutation for appending continuation cycles.
    pub(crate) fn permutation_mut(&mut self) -> &mut Permutation {
        &mut self.permutation
    }

    /// Returns the alphabet of the wiring.
    pub fn alphabet(&self) -> &Rc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Returns the size of the wiring's alphabet.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns true if the machine may advance this rotor.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true if this rotor returns the signal.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns the current position index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the symbol of the current position.
    pub fn position_symbol(&self) -> char {
        self.alphabet().symbols()[self.position]
    }

    /// Returns the ring setting index.
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Sets the position to `position`.
    ///
    /// A reflector has a single position; only `0` is accepted for it.
    ///
    /// # Errors
    /// - [`EnigmaError::Config`] for a non-zero reflector position.
    /// - [`EnigmaError::Range`] if `position >= size()`.
    pub fn set_position(&mut self, position: usize) -> Result<(), EnigmaError> {
        self.check_setting(position, "position")?;
        self.position = position;
        Ok(())
    }

    /// Sets the position to the index of symbol `c`.
    ///
    /// # Errors
    /// [`EnigmaError::Lookup`] if `c` is not in the alphabet, otherwise as
    /// [`set_position`](Self::set_position).
    pub fn set_symbol(&mut self, c: char) -> Result<(), EnigmaError> {
        let position = self.alphabet().to_int(c)?;
        self.set_position(position)
    }

    /// Sets the ring setting to `ring`.
    ///
    /// # Errors
    /// Same as [`set_position`](Self::set_position).
    pub fn set_ring(&mut self, ring: usize) -> Result<(), EnigmaError> {
        self.check_setting(ring, "ring setting")?;
        self.ring = ring;
        Ok(())
    }

    /// Sets the ring setting to the index of symbol `c`.
    ///
    /// # Errors
    /// Same as [`set_symbol`](Self::set_symbol).
    pub fn set_ring_symbol(&mut self, c: char) -> Result<(), EnigmaError> {
        let ring = self.alphabet().to_int(c)?;
        self.set_ring(ring)
    }

    fn check_setting(&self, value: usize, what: &str) -> Result<(), EnigmaError> {
        if value >= self.size() {
            return Err(EnigmaError::range(format!(
                "{} {} outside alphabet of size {}",
                what,
                value,
                self.size()
            )));
        }
        if value != 0 && self.reflecting() {
            return Err(EnigmaError::config(format!(
                "reflector {} has a single {}",
                self.name, what
            )));
        }
        Ok(())
    }

    /// Returns position and ring setting to 0.
    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.ring = 0;
    }

    /// Returns true if the current position is one of the notches.
    ///
    /// Always false for reflectors and fixed rotors.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.position),
            RotorKind::Reflector | RotorKind::Fixed => false,
        }
    }

    /// Advances the position by one, wrapping at the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Config`] for reflectors and fixed rotors.
    pub fn advance(&mut self) -> Result<(), EnigmaError> {
        match self.kind {
            RotorKind::Moving { .. } => {
                self.position = self.permutation.wrap(self.position as i64 + 1);
                Ok(())
            }
            RotorKind::Reflector | RotorKind::Fixed => Err(EnigmaError::config(format!(
                "rotor {} does not rotate",
                self.name
            ))),
        }
    }

    /// Rotational displacement applied around the wiring lookup.
    fn offset(&self) -> i64 {
        self.position as i64 - self.ring as i64
    }

    /// Converts a signal entering at contact `index` from the right.
    pub fn convert_forward(&self, index: usize) -> usize {
        let offset = self.offset();
        let shifted = self.permutation.wrap(index as i64 + offset);
        self.permutation
            .wrap(self.permutation.permute(shifted) as i64 - offset)
    }

    /// Converts a signal entering at contact `index` from the left.
    pub fn convert_backward(&self, index: usize) -> usize {
        let offset = self.offset();
        let shifted = self.permutation.wrap(index as i64 + offset);
        self.permutation
            .wrap(self.permutation.invert(shifted) as i64 - offset)
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotor {}", self.name)
    }
}
