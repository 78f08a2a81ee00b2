//! Alphabet: bijection between an ordered set of symbols and `[0, size)`.

use std::collections::HashMap;
use std::fmt;

use crate::error::EnigmaError;

/// Symbols of the standard 26-letter alphabet.
const LATIN_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Characters with a structural meaning in configuration and setup text.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// An ordered set of distinct symbols.
///
/// Symbol number `k` has index `k`. Immutable once built; machines share a
/// single instance between every rotor and the plugboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Default for Alphabet {
    /// The upper-case Latin alphabet `A..=Z`.
    fn default() -> Self {
        let symbols: Vec<char> = LATIN_UPPER.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, index }
    }
}

impl Alphabet {
    /// Builds an alphabet from the characters of `chars`, in order.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if `chars` is empty, repeats a symbol,
    /// or contains whitespace, `(`, `)` or `*`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert_eq!(alpha.to_int('C').unwrap(), 2);
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        if chars.is_empty() {
            return Err(EnigmaError::format("alphabet must not be empty"));
        }
        let mut symbols = Vec::with_capacity(chars.len());
        let mut index = HashMap::with_capacity(chars.len());
        for c in chars.chars() {
            if c.is_whitespace() || RESERVED.contains(&c) {
                return Err(EnigmaError::format(format!(
                    "alphabet may not contain {:?}",
                    c
                )));
            }
            if index.insert(c, symbols.len()).is_some() {
                return Err(EnigmaError::format(format!(
                    "alphabet repeats symbol {:?}",
                    c
                )));
            }
            symbols.push(c);
        }
        Ok(Alphabet { symbols, index })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `c` is one of the symbols.
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols.get(index).copied().ok_or_else(|| {
            EnigmaError::range(format!(
                "index {} outside alphabet of size {}",
                index,
                self.size()
            ))
        })
    }

    /// Returns the index of `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Lookup`] if `c` is not in the alphabet.
    pub fn to_int(&self, c: char) -> Result<usize, EnigmaError> {
        self.index
            .get(&c)
            .copied()
            .ok_or_else(|| EnigmaError::lookup(format!("symbol {:?} not in alphabet", c)))
    }

    /// Returns the symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_latin_upper() {
        let alpha = Alphabet::default();
        assert_eq!(alpha.size(), 26);
        assert_eq!(alpha.to_char(0).unwrap(), 'A');
        assert_eq!(alpha.to_char(25).unwrap(), 'Z');
        assert_eq!(alpha.to_string(), LATIN_UPPER);
    }

    #[test]
    fn test_to_int_and_to_char_are_inverse() {
        let alpha = Alphabet::new("QWERTY").unwrap();
        for (i, &c) in alpha.symbols().iter().enumerate() {
            assert_eq!(alpha.to_int(c).unwrap(), i);
            assert_eq!(alpha.to_char(i).unwrap(), c);
        }
    }

    #[test]
    fn test_contains() {
        let alpha = Alphabet::new("ABCD").unwrap();
        assert!(alpha.contains('A'));
        assert!(alpha.contains('D'));
        assert!(!alpha.contains('E'));
        assert!(!alpha.contains('a'));
    }

    #[test]
    fn test_to_char_out_of_range() {
        let alpha = Alphabet::default();
        assert!(matches!(alpha.to_char(26), Err(EnigmaError::Range(_))));
    }

    #[test]
    fn test_to_int_unknown_symbol() {
        let alpha = Alphabet::new("ABCD").unwrap();
        assert!(matches!(alpha.to_int('Z'), Err(EnigmaError::Lookup(_))));
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(Alphabet::new(""), Err(EnigmaError::Format(_))));
        assert!(matches!(Alphabet::new("ABA"), Err(EnigmaError::Format(_))));
        assert!(matches!(Alphabet::new("AB C"), Err(EnigmaError::Format(_))));
        assert!(matches!(Alphabet::new("AB(C"), Err(EnigmaError::Format(_))));
        assert!(matches!(Alphabet::new("*AB"), Err(EnigmaError::Format(_))));
    }

    #[test]
    fn test_non_latin_symbols() {
        let alpha = Alphabet::new("0123456789.").unwrap();
        assert_eq!(alpha.size(), 11);
        assert_eq!(alpha.to_int('.').unwrap(), 10);
    }
}
