use std::io::{Read, Result as IoResult};

use tracing::trace;

use crate::substitution::{Atbash, Rot13, Substitution};

#[cfg(feature = "tokio")]
use core::marker::Unpin;
#[cfg(feature = "tokio")]
use core::pin::Pin;
#[cfg(feature = "tokio")]
use core::task::{Context, Poll};
#[cfg(feature = "tokio")]
use tokio::io::{AsyncRead, ReadBuf};

/// Reader that transparently applies a letter substitution to an underlying
/// synchronous or asynchronous reader.
///
/// Bytes are substituted in place as they are read; nothing is buffered
/// beyond the caller's buffer. Readers nest, so wrapping one [`Reader`] in
/// another applies both substitutions in order:
///
/// ```
/// use std::io::Read;
///
/// use transparent_substitution::Reader;
///
/// let input = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".as_bytes();
/// let mut reader = Reader::atbash(Reader::rot13(input));
///
/// let mut output = String::new();
/// reader.read_to_string(&mut output)?;
/// assert_eq!(output, "MLKJIHGFEDCBAZYXWVUTSRQPON");
///
/// # std::io::Result::Ok(())
/// ```
///
/// Errors from the underlying reader are returned as-is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Reader<Inner, Substitution> {
    reader: Inner,
    substitution: Substitution,
}

impl<Inner, S> Reader<Inner, S> {
    /// Constructs a new reader that applies `substitution` to everything read
    /// from `reader`. No I/O is performed.
    pub const fn new(reader: Inner, substitution: S) -> Self {
        Self {
            reader,
            substitution,
        }
    }

    /// Gets a reference to the underlying reader.
    pub const fn get_ref(&self) -> &Inner {
        &self.reader
    }

    /// Reading directly from the returned reader bypasses the substitution.
    pub fn get_mut(&mut self) -> &mut Inner {
        &mut self.reader
    }

    /// Unwraps this reader, returning the underlying reader at its current
    /// position.
    pub fn into_inner(self) -> Inner {
        self.reader
    }
}

impl<Inner> Reader<Inner, Rot13> {
    /// Convenience constructor for a [`Rot13`] reader.
    pub const fn rot13(reader: Inner) -> Self {
        Self::new(reader, Rot13)
    }
}

impl<Inner> Reader<Inner, Atbash> {
    /// Convenience constructor for an [`Atbash`] reader.
    pub const fn atbash(reader: Inner) -> Self {
        Self::new(reader, Atbash)
    }
}

impl<Inner, S> Read for Reader<Inner, S>
where
    Inner: Read,
    S: Substitution,
{
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let bytes_read = self.reader.read(buf)?;
        trace!(bytes_read, "substituting read");
        self.substitution.apply_in_place(&mut buf[..bytes_read]);
        Ok(bytes_read)
    }
}

#[cfg(feature = "tokio")]
impl<Inner, S> AsyncRead for Reader<Inner, S>
where
    Inner: AsyncRead + Unpin,
    S: Substitution + Unpin,
{
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context, buf: &mut ReadBuf) -> Poll<IoResult<()>> {
        let start_index = buf.filled().len();
        let me = self.get_mut();
        match Pin::new(&mut me.reader).poll_read(cx, buf) {
            res @ Poll::Ready(Ok(())) => {
                let buffer = &mut buf.filled_mut()[start_index..];
                trace!(bytes_read = buffer.len(), "substituting async read");
                me.substitution.apply_in_place(buffer);
                res
            }
            other => other,
        }
    }
}
