use thiserror::Error;

/// Reasons a key cannot be turned into a [`Keyed`] alphabet.
///
/// [`Keyed`]: crate::Keyed
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum AlphabetError {
    /// The key must hold exactly one image per letter.
    #[error("expected a 26-letter key, got {len} bytes")]
    Length { len: usize },

    /// A byte in the key is not an ASCII letter.
    #[error("byte {byte:#04x} at position {position} is not a letter")]
    NotALetter { byte: u8, position: usize },

    /// A letter appears twice, so the key is not a permutation.
    #[error("letter {letter:?} at position {position} was already used")]
    Duplicate { letter: char, position: usize },
}
