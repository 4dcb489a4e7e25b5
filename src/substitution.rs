use std::str::FromStr;

use tracing::debug;

use crate::error::AlphabetError;

const ALPHABET_LEN: u8 = 26;

/// A monoalphabetic substitution over the 26 Latin letters.
///
/// Implementors only map uppercase letters: [`Substitution::substitute`] is
/// called with a byte in `b'A'..=b'Z'` and must return a byte in the same
/// range. Case handling and pass-through of everything else is done by
/// [`Substitution::apply`], which is what the [`Reader`] and [`Writer`] use.
///
/// Any `Fn(u8) -> u8` is a substitution, so ad-hoc mappings can be passed as
/// closures:
///
/// ```
/// use transparent_substitution::Substitution;
///
/// let swap_a_and_b = |letter: u8| match letter {
///     b'A' => b'B',
///     b'B' => b'A',
///     other => other,
/// };
///
/// assert_eq!(swap_a_and_b.apply(b'a'), b'b');
/// assert_eq!(swap_a_and_b.apply(b'!'), b'!');
/// ```
///
/// [`Reader`]: crate::Reader
/// [`Writer`]: crate::Writer
pub trait Substitution {
    /// Maps one uppercase letter to another.
    fn substitute(&self, letter: u8) -> u8;

    /// Maps any byte. Lowercase letters are substituted as their uppercase
    /// counterpart and keep their case; non-letters are returned unchanged.
    fn apply(&self, byte: u8) -> u8 {
        match byte {
            b'A'..=b'Z' => self.substitute(byte),
            b'a'..=b'z' => self
                .substitute(byte.to_ascii_uppercase())
                .to_ascii_lowercase(),
            _ => byte,
        }
    }

    /// Applies the substitution to every byte of `buf`.
    fn apply_in_place(&self, buf: &mut [u8]) {
        for byte in buf {
            *byte = self.apply(*byte);
        }
    }
}

impl<F> Substitution for F
where
    F: Fn(u8) -> u8,
{
    fn substitute(&self, letter: u8) -> u8 {
        self(letter)
    }
}

const fn index_of(letter: u8) -> u8 {
    letter.wrapping_sub(b'A') % ALPHABET_LEN
}

/// Rotates every letter by 13 positions. Applying it twice is the identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Rot13;

impl Substitution for Rot13 {
    fn substitute(&self, letter: u8) -> u8 {
        b'A' + (index_of(letter) + 13) % ALPHABET_LEN
    }
}

/// Mirrors every letter through the alphabet, `A <-> Z`, `B <-> Y` and so on.
/// Applying it twice is the identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Atbash;

impl Substitution for Atbash {
    fn substitute(&self, letter: u8) -> u8 {
        b'Z' - index_of(letter)
    }
}

/// Shifts every letter by a fixed number of positions.
///
/// [`Rot13`] is `Caesar::new(13)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Caesar {
    shift: u8,
}

impl Caesar {
    /// The shift is taken modulo 26.
    #[must_use]
    pub const fn new(shift: u8) -> Self {
        Self {
            shift: shift % ALPHABET_LEN,
        }
    }

    #[must_use]
    pub const fn shift(self) -> u8 {
        self.shift
    }

    /// The shift that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::new(ALPHABET_LEN - self.shift)
    }
}

impl Substitution for Caesar {
    fn substitute(&self, letter: u8) -> u8 {
        b'A' + (index_of(letter) + self.shift) % ALPHABET_LEN
    }
}

/// A substitution given as an explicit permutation of the alphabet.
///
/// The key lists the image of `A`, then of `B`, and so on:
///
/// ```
/// use transparent_substitution::{Keyed, Substitution};
///
/// let keyed: Keyed = "QWERTYUIOPASDFGHJKLZXCVBNM".parse()?;
/// assert_eq!(keyed.apply(b'A'), b'Q');
/// assert_eq!(keyed.inverse().apply(b'Q'), b'A');
/// # Ok::<(), transparent_substitution::AlphabetError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Keyed {
    table: [u8; ALPHABET_LEN as usize],
}

impl Keyed {
    /// Builds the alphabet from a 26-letter key. Letters of either case are
    /// accepted; each letter must appear exactly once.
    ///
    /// # Errors
    ///
    /// Returns an [`AlphabetError`] if the key has the wrong length, holds a
    /// byte that is not an ASCII letter, or repeats a letter.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, AlphabetError> {
        let key = key.as_ref();
        Self::from_key(key).map_err(|e| {
            debug!(error = %e, "rejected substitution key");
            e
        })
    }

    fn from_key(key: &[u8]) -> Result<Self, AlphabetError> {
        if key.len() != ALPHABET_LEN as usize {
            return Err(AlphabetError::Length { len: key.len() });
        }

        let mut table = [0; ALPHABET_LEN as usize];
        let mut seen = [false; ALPHABET_LEN as usize];
        for (position, &byte) in key.iter().enumerate() {
            if !byte.is_ascii_alphabetic() {
                return Err(AlphabetError::NotALetter { byte, position });
            }

            let letter = byte.to_ascii_uppercase();
            let index = usize::from(index_of(letter));
            if seen[index] {
                return Err(AlphabetError::Duplicate {
                    letter: char::from(letter),
                    position,
                });
            }

            seen[index] = true;
            table[position] = letter;
        }

        Ok(Self { table })
    }

    /// The alphabet that maps every image back to its letter.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut table = [0; ALPHABET_LEN as usize];
        for (letter, &image) in (b'A'..=b'Z').zip(self.table.iter()) {
            table[usize::from(index_of(image))] = letter;
        }

        Self { table }
    }

    /// The key, as uppercase letters.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ALPHABET_LEN as usize] {
        &self.table
    }
}

impl FromStr for Keyed {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Substitution for Keyed {
    fn substitute(&self, letter: u8) -> u8 {
        self.table[usize::from(index_of(letter))]
    }
}
