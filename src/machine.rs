//! Machine: rotor slots, plugboard, stepping and the signal path.
//!
//! The machine owns a catalog of every available rotor and fills its slots
//! with `RotorId`s into that catalog, the same way the slots of a physical
//! machine hold wheels taken from a box. Slot 0 is the leftmost slot and
//! holds the reflector; the rightmost `pawls` slots hold moving rotors.
//!
//! ```text
//!   slot:     0          1 .. n-pawls-1        n-pawls .. n-1
//!           reflector    fixed rotors          moving rotors
//!   signal: <---- forward (right to left, through the reflector) ----
//!           ----- backward (left to right, reflector excluded) ---->
//! ```

use std::rc::Rc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Index of a rotor within a machine's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RotorId(usize);

/// A rotor cipher machine.
///
/// Positions advance with every converted symbol and persist across calls
/// to [`convert`](Self::convert) until the next
/// [`insert_rotors`](Self::insert_rotors).
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Rc<Alphabet>,
    rotors: Vec<Rotor>,
    using: Vec<RotorId>,
    plugboard: Option<Permutation>,
    num_rotors: usize,
    pawls: usize,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots and `pawls` pawls, able to
    /// use any rotor in `rotors`.
    ///
    /// No rotors are inserted yet; [`insert_rotors`](Self::insert_rotors)
    /// must run before anything is converted.
    ///
    /// # Errors
    /// - [`EnigmaError::Config`] if `num_rotors < 2`, `pawls >= num_rotors`,
    ///   or a rotor is wired over a different alphabet.
    /// - [`EnigmaError::Duplicate`] if two rotors share a name, ignoring case.
    pub fn new(
        alphabet: Rc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        rotors: Vec<Rotor>,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 {
            return Err(EnigmaError::config(format!(
                "a machine needs at least 2 rotor slots, got {}",
                num_rotors
            )));
        }
        if pawls >= num_rotors {
            return Err(EnigmaError::config(format!(
                "{} pawls do not fit in {} rotor slots",
                pawls, num_rotors
            )));
        }
        for (i, rotor) in rotors.iter().enumerate() {
            if **rotor.alphabet() != *alphabet {
                return Err(EnigmaError::config(format!(
                    "rotor {} is wired over a different alphabet",
                    rotor.name()
                )));
            }
            if rotors[..i].iter().any(|r| same_name(r.name(), rotor.name())) {
                return Err(EnigmaError::duplicate(format!(
                    "rotor name {} is used twice",
                    rotor.name()
                )));
            }
        }
        debug!(
            num_rotors,
            pawls,
            available = rotors.len(),
            "machine assembled"
        );
        Ok(Machine {
            alphabet,
            rotors,
            using: Vec::with_capacity(num_rotors),
            plugboard: None,
            num_rotors,
            pawls,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, i.e. of moving rotor slots.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the machine's alphabet.
    pub fn alphabet(&self) -> &Rc<Alphabet> {
        &self.alphabet
    }

    /// Returns the catalog of available rotors.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Returns true once rotors have been inserted.
    pub fn is_set_up(&self) -> bool {
        !self.using.is_empty()
    }

    /// Returns the rotor in `slot`, if rotors are inserted and the slot exists.
    pub fn slot(&self, slot: usize) -> Option<&Rotor> {
        self.using.get(slot).map(|id| &self.rotors[id.0])
    }

    /// Returns the current plugboard, if one is set.
    pub fn plugboard(&self) -> Option<&Permutation> {
        self.plugboard.as_ref()
    }

    /// Returns the position symbols of every slot but the reflector, left
    /// to right. Empty before rotors are inserted.
    pub fn positions(&self) -> String {
        self.using
            .iter()
            .skip(1)
            .map(|id| self.rotors[id.0].position_symbol())
            .collect()
    }

    /// First slot driven by a pawl.
    fn first_moving_slot(&self) -> usize {
        self.num_rotors - self.pawls
    }

    /// Fills the slots with the rotors named in `names`, left to right, and
    /// resets their positions and ring settings to 0.
    ///
    /// Names are matched against the catalog ignoring case. On error the
    /// slots are left as they were.
    ///
    /// # Errors
    /// - [`EnigmaError::Config`] if `names` does not name exactly one rotor
    ///   per slot, slot 0 is not a reflector, a reflector sits outside slot
    ///   0, or a rotor's ability to rotate does not match its slot.
    /// - [`EnigmaError::Lookup`] if a name is not in the catalog.
    /// - [`EnigmaError::Duplicate`] if a rotor is named twice.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::config(format!(
                "expected {} rotors, got {}",
                self.num_rotors,
                names.len()
            )));
        }
        let first_moving = self.first_moving_slot();
        let mut slots: Vec<RotorId> = Vec::with_capacity(self.num_rotors);

        for (slot, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let id = self
                .rotors
                .iter()
                .position(|r| same_name(r.name(), name))
                .map(RotorId)
                .ok_or_else(|| EnigmaError::lookup(format!("rotor {} not found", name)))?;
            if slots.contains(&id) {
                return Err(EnigmaError::duplicate(format!(
                    "rotor {} is inserted more than once",
                    name
                )));
            }

            let rotor = &self.rotors[id.0];
            if slot == 0 && !rotor.reflecting() {
                return Err(EnigmaError::config(format!(
                    "slot 0 must hold a reflector, got {}",
                    rotor.name()
                )));
            }
            if slot > 0 && rotor.reflecting() {
                return Err(EnigmaError::config(format!(
                    "reflector {} placed in slot {}",
                    rotor.name(),
                    slot
                )));
            }
            if slot >= first_moving && !rotor.rotates() {
                return Err(EnigmaError::config(format!(
                    "slot {} needs a moving rotor, {} does not rotate",
                    slot,
                    rotor.name()
                )));
            }
            if slot > 0 && slot < first_moving && rotor.rotates() {
                return Err(EnigmaError::config(format!(
                    "slot {} has no pawl, {} is a moving rotor",
                    slot,
                    rotor.name()
                )));
            }
            slots.push(id);
        }

        for id in &slots {
            self.rotors[id.0].reset();
        }
        self.using = slots;
        debug!(
            rotors = ?self.using.iter().map(|id| self.rotors[id.0].name()).collect::<Vec<_>>(),
            "rotors inserted"
        );
        Ok(())
    }

    /// Resolves a per-slot setting string into indices, one symbol per
    /// non-reflector slot.
    fn parse_setting(&self, setting: &str, what: &str) -> Result<Vec<usize>, EnigmaError> {
        if !self.is_set_up() {
            return Err(EnigmaError::state(format!(
                "cannot apply {} before rotors are inserted",
                what
            )));
        }
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != self.num_rotors - 1 {
            return Err(EnigmaError::config(format!(
                "{} {:?} must have {} symbols",
                what,
                setting,
                self.num_rotors - 1
            )));
        }
        symbols
            .into_iter()
            .map(|c| self.alphabet.to_int(c))
            .collect()
    }

    /// Sets the positions of the non-reflector slots from `setting`, one
    /// symbol per slot, left to right.
    ///
    /// # Errors
    /// - [`EnigmaError::State`] before rotors are inserted.
    /// - [`EnigmaError::Config`] if `setting` has the wrong length.
    /// - [`EnigmaError::Lookup`] if a symbol is not in the alphabet.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let positions = self.parse_setting(setting, "rotor setting")?;
        for (slot, position) in positions.into_iter().enumerate() {
            let id = self.using[slot + 1];
            self.rotors[id.0].set_position(position)?;
        }
        debug!(positions = %self.positions(), "rotor positions set");
        Ok(())
    }

    /// Sets the ring settings of the non-reflector slots from `setting`,
    /// one symbol per slot, left to right.
    ///
    /// # Errors
    /// Same as [`set_rotors`](Self::set_rotors).
    pub fn set_rings(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let rings = self.parse_setting(setting, "ring setting")?;
        for (slot, ring) in rings.into_iter().enumerate() {
            let id = self.using[slot + 1];
            self.rotors[id.0].set_ring(ring)?;
        }
        debug!(rings = setting, "ring settings set");
        Ok(())
    }

    /// Replaces the plugboard.
    ///
    /// The same permutation is applied on the way in and on the way out, so
    /// it must be its own inverse.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Config`] if `plugboard` uses another alphabet
    /// or has a cycle longer than two.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), EnigmaError> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(EnigmaError::config(
                "plugboard is wired over a different alphabet",
            ));
        }
        if !plugboard.is_involution() {
            return Err(EnigmaError::config(format!(
                "plugboard {} must only swap pairs of symbols",
                plugboard
            )));
        }
        debug!(plugboard = %plugboard, "plugboard set");
        self.plugboard = Some(plugboard);
        Ok(())
    }

    /// Advances the rotors for one key press.
    ///
    /// Notches are read once before anything moves. A moving rotor then
    /// advances if it is the rightmost, if its right neighbor is at a
    /// notch, or if it is itself at a notch (the double step). The notch
    /// of the leftmost moving rotor only moves it when it is also the
    /// second rotor from the right.
    fn step(&mut self) -> Result<(), EnigmaError> {
        if self.pawls == 0 {
            return Ok(());
        }
        let n = self.num_rotors;
        let first = self.first_moving_slot();
        let notched: Vec<bool> = self
            .using
            .iter()
            .map(|id| self.rotors[id.0].at_notch())
            .collect();

        let moving: Vec<usize> = (first..n)
            .filter(|&slot| {
                slot == n - 1
                    || notched[slot + 1]
                    || (notched[slot] && (slot > first || slot == n - 2))
            })
            .collect();
        for &slot in &moving {
            self.rotors[self.using[slot].0].advance()?;
        }
        trace!(slots = ?moving, "rotors stepped");
        Ok(())
    }

    /// Converts the symbol at index `c`, after first advancing the rotors.
    ///
    /// # Errors
    /// - [`EnigmaError::State`] before rotors are inserted.
    /// - [`EnigmaError::Range`] if `c` is outside the alphabet.
    pub fn convert_index(&mut self, c: usize) -> Result<usize, EnigmaError> {
        if !self.is_set_up() {
            return Err(EnigmaError::state("machine was not set up"));
        }
        if c >= self.alphabet.size() {
            return Err(EnigmaError::range(format!(
                "index {} outside alphabet of size {}",
                c,
                self.alphabet.size()
            )));
        }
        self.step()?;

        let mut c = match &self.plugboard {
            Some(plugboard) => plugboard.permute(c),
            None => c,
        };
        for id in self.using.iter().rev() {
            c = self.rotors[id.0].convert_forward(c);
        }
        for id in self.using.iter().skip(1) {
            c = self.rotors[id.0].convert_backward(c);
        }
        if let Some(plugboard) = &self.plugboard {
            c = plugboard.permute(c);
        }
        Ok(c)
    }

    /// Converts `msg`, upper-casing it and skipping whitespace.
    ///
    /// Encryption and decryption are the same operation: converting the
    /// output again from the same starting positions restores the input.
    ///
    /// # Errors
    /// - [`EnigmaError::State`] before rotors are inserted.
    /// - [`EnigmaError::Lookup`] if a symbol is not in the alphabet.
    pub fn convert(&mut self, msg: &str) -> Result<String, EnigmaError> {
        if !self.is_set_up() {
            return Err(EnigmaError::state("machine was not set up"));
        }
        let mut converted = String::with_capacity(msg.len());
        for c in msg
            .chars()
            .flat_map(char::to_uppercase)
            .filter(|c| !c.is_whitespace())
        {
            let index = self.alphabet.to_int(c)?;
            let out = self.convert_index(index)?;
            converted.push(self.alphabet.to_char(out)?);
        }
        Ok(converted)
    }
}

/// Case-insensitive rotor name comparison.
fn same_name(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}
