use cipher::inout::InOutBuf;
use cipher::{StreamCipher, StreamCipherError};

use crate::substitution::Substitution;

/// Exposes a [`Substitution`] through the RustCrypto [`StreamCipher`] trait,
/// for code that is written against [`cipher`] rather than this crate.
///
/// The substitution has no keystream position, so applying it never fails
/// and never runs out.
///
/// ```
/// use cipher::StreamCipher;
/// use transparent_substitution::{Rot13, SubstitutionCipher};
///
/// let mut cipher = SubstitutionCipher::new(Rot13);
/// let mut data = *b"Hello";
/// cipher.apply_keystream(&mut data);
/// assert_eq!(&data, b"Uryyb");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SubstitutionCipher<S>(S);

impl<S> SubstitutionCipher<S> {
    /// Wraps `substitution` so it can be used as a stream cipher.
    pub const fn new(substitution: S) -> Self {
        Self(substitution)
    }

    /// Returns the wrapped substitution.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S> StreamCipher for SubstitutionCipher<S>
where
    S: Substitution,
{
    fn try_apply_keystream_inout(
        &mut self,
        mut buf: InOutBuf<'_, '_, u8>,
    ) -> Result<(), StreamCipherError> {
        for i in 0..buf.len() {
            let mut byte = buf.get(i);
            let substituted = self.0.apply(*byte.get_in());
            *byte.get_out() = substituted;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use cipher::StreamCipher;

    use super::SubstitutionCipher;
    use crate::{Atbash, Keyed, Rot13};

    pub type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

    #[test]
    fn in_place() {
        let mut cipher = SubstitutionCipher::new(Atbash);
        let mut data = *b"Wizard 42";
        cipher.apply_keystream(&mut data);
        assert_eq!(&data, b"Draziw 42");
    }

    #[test]
    fn buffer_to_buffer() -> TestResult<()> {
        let mut cipher = SubstitutionCipher::new(Keyed::new("BCDEFGHIJKLMNOPQRSTUVWXYZA")?);
        let mut out = [0; 4];
        cipher
            .apply_keystream_b2b(b"HAL!", &mut out)
            .map_err(|e| e.to_string())?;
        assert_eq!(&out, b"IBM!");
        Ok(())
    }

    #[test]
    fn applying_twice_is_identity() {
        let mut cipher = SubstitutionCipher::new(Rot13);
        let mut data = *b"Round and round";
        cipher.apply_keystream(&mut data);
        cipher.apply_keystream(&mut data);
        assert_eq!(&data, b"Round and round");
    }
}
