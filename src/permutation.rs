//! Permutation: a bijection of an alphabet built from cycle notation.
//!
//! Cycle text such as `"(AELT) (BK) (S)"` is parsed once into direct
//! index tables for both directions, so applying the permutation (or its
//! inverse) is a single array lookup.

use std::fmt;
use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A permutation of the symbols of an [`Alphabet`].
///
/// The cycle `(s0 s1 ... sm)` maps `s_i` to `s_(i+1) mod (m+1)`. Symbols that
/// appear in no cycle are fixed points. Each symbol may appear in at most
/// one cycle, across the initial text and every later
/// [`add_cycles`](Self::add_cycles) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Rc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
    /// `cycled[i]` holds once symbol `i` has been named in some cycle.
    cycled: Vec<bool>,
}

impl Permutation {
    /// Parses `cycles` into a permutation of `alphabet`.
    ///
    /// Whitespace between cycles is ignored.
    ///
    /// # Errors
    /// - [`EnigmaError::Format`] on unbalanced or nested parentheses, text
    ///   outside a cycle, or a symbol repeated across cycles.
    /// - [`EnigmaError::Lookup`] if a cycle names a symbol not in `alphabet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Rc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(AB) (CD)", alpha).unwrap();
    /// assert_eq!(perm.permute_symbol('A').unwrap(), 'B');
    /// assert_eq!(perm.invert_symbol('A').unwrap(), 'B');
    /// ```
    pub fn new(cycles: &str, alphabet: Rc<Alphabet>) -> Result<Self, EnigmaError> {
        let mut perm = Self::identity(alphabet);
        perm.add_cycles(cycles)?;
        Ok(perm)
    }

    /// Returns the identity permutation of `alphabet`.
    pub fn identity(alphabet: Rc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
            cycled: vec![false; size],
        }
    }

    /// Parses `cycles` and adds them to this permutation.
    ///
    /// Used when a rotor's wiring continues over several configuration
    /// lines. On error the permutation is left unchanged.
    ///
    /// # Errors
    /// Same as [`new`](Self::new); a symbol already placed in an earlier
    /// cycle is a [`EnigmaError::Format`] error.
    pub fn add_cycles(&mut self, cycles: &str) -> Result<(), EnigmaError> {
        let parsed = self.parse_cycles(cycles)?;
        for cycle in parsed {
            let len = cycle.len();
            for (i, &from) in cycle.iter().enumerate() {
                let to = cycle[(i + 1) % len];
                self.forward[from] = to;
                self.inverse[to] = from;
                self.cycled[from] = true;
            }
        }
        Ok(())
    }

    /// Tokenizes cycle notation into index cycles without touching `self`.
    fn parse_cycles(&self, text: &str) -> Result<Vec<Vec<usize>>, EnigmaError> {
        let mut seen = self.cycled.clone();
        let mut cycles = Vec::new();
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            match c {
                c if c.is_whitespace() => {}
                '(' => {
                    let mut cycle = Vec::new();
                    loop {
                        match chars.next() {
                            None => {
                                return Err(EnigmaError::format(format!(
                                    "unclosed cycle in {:?}",
                                    text
                                )))
                            }
                            Some(')') => break,
                            Some('(') => {
                                return Err(EnigmaError::format(format!(
                                    "nested cycle in {:?}",
                                    text
                                )))
                            }
                            Some(c) if c.is_whitespace() => {
                                return Err(EnigmaError::format(format!(
                                    "whitespace inside cycle in {:?}",
                                    text
                                )))
                            }
                            Some(c) => {
                                let index = self.alphabet.to_int(c)?;
                                if seen[index] {
                                    return Err(EnigmaError::format(format!(
                                        "symbol {:?} appears in more than one cycle",
                                        c
                                    )));
                                }
                                seen[index] = true;
                                cycle.push(index);
                            }
                        }
                    }
                    cycles.push(cycle);
                }
                ')' => {
                    return Err(EnigmaError::format(format!(
                        "unbalanced ')' in {:?}",
                        text
                    )))
                }
                other => {
                    return Err(EnigmaError::format(format!(
                        "unexpected {:?} outside a cycle in {:?}",
                        other, text
                    )))
                }
            }
        }
        Ok(cycles)
    }

    /// Returns the size of the permuted alphabet.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns `p` modulo [`size`](Self::size), normalized to `[0, size)`.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let perm = Permutation::identity(Rc::new(Alphabet::default()));
    /// assert_eq!(perm.wrap(-1), 25);
    /// assert_eq!(perm.wrap(27), 1);
    /// ```
    pub fn wrap(&self, p: i64) -> usize {
        p.rem_euclid(self.size() as i64) as usize
    }

    /// Applies the permutation to index `p` (taken modulo the size).
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.size()]
    }

    /// Applies the inverse permutation to index `c` (taken modulo the size).
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[c % self.size()]
    }

    /// Applies the permutation to symbol `p`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Lookup`] if `p` is not in the alphabet.
    pub fn permute_symbol(&self, p: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Lookup`] if `c` is not in the alphabet.
    pub fn invert_symbol(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// Returns the alphabet this permutation acts on.
    pub fn alphabet(&self) -> &Rc<Alphabet> {
        &self.alphabet
    }

    /// Returns true iff no symbol maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &j)| i != j)
    }

    /// Returns true iff the permutation is its own inverse, i.e. all of its
    /// cycles have length one or two.
    pub fn is_involution(&self) -> bool {
        self.forward == self.inverse
    }
}

impl fmt::Display for Permutation {
    /// Renders the non-trivial cycles, each starting at its lowest index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.alphabet.symbols();
        let mut visited = vec![false; self.size()];
        let mut first = true;
        for start in 0..self.size() {
            if visited[start] || self.forward[start] == start {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "(")?;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                write!(f, "{}", symbols[i])?;
                i = self.forward[i];
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
