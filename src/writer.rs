use std::io::{Error as IoError, ErrorKind, Result as IoResult, Write};

use tracing::trace;

use crate::substitution::{Atbash, Rot13, Substitution};

#[cfg(feature = "tokio")]
use core::marker::Unpin;
#[cfg(feature = "tokio")]
use core::pin::Pin;
#[cfg(feature = "tokio")]
use core::task::{Context, Poll};
#[cfg(feature = "tokio")]
use tokio::io::AsyncWrite;

/// Writer that transparently applies a letter substitution to an underlying
/// synchronous or asynchronous writer.
///
/// [`Writer`] must maintain an internal stack-allocated buffer to store
/// already-substituted data. The size is dependent on the user provided
/// `BUFFER_SIZE`. Reasonable defaults will depend on your use case, but
/// values such as `4096` or `8192` are pretty good starting points.
///
/// `BUFFER_SIZE` cannot be zero. This is a restriction of the [`Write`] trait,
/// as it only provides an immutable reference to the buffer of data to be
/// written. As a result, we need a buffer to modify the data before
/// providing the substituted bytes to the underlying writer.
///
/// Like all buffered [`Write`] implementors, it is not guaranteed that written
/// bytes will be immediately available for reading. If this is needed, you
/// should call [`Writer::flush`] before attempting any read calls. Dropping the
/// writer does not flush it.
///
/// However, unlike other buffered [`Write`] implementors, this makes no attempt
/// to coalesce multiple smaller write calls into one larger one. As a result,
/// if buffered writing is preferred, it is recommended to wrap the underlying
/// writer in a [`BufWriter`].
///
/// [`Write`]: std::io::Write
/// [`BufWriter`]: std::io::BufWriter
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Writer<Inner, Substitution, const BUFFER_SIZE: usize> {
    writer: Inner,
    substitution: Substitution,
    buffer: [u8; BUFFER_SIZE],
    buffer_end: usize,
}

impl<Inner, S, const BUFFER_SIZE: usize> Default for Writer<Inner, S, BUFFER_SIZE>
where
    Inner: Default,
    S: Default,
{
    fn default() -> Self {
        Self::new(Inner::default(), S::default())
    }
}

impl<Inner, S, const BUFFER_SIZE: usize> Writer<Inner, S, BUFFER_SIZE>
where
    S: Substitution,
{
    /// Move the remaining to the beginning of the buffer, and updates the tail
    /// index. Fails if the inner writer claims more bytes than it was given.
    fn take_bytes(&mut self, bytes_written: usize) -> IoResult<()> {
        if bytes_written > self.buffer_end {
            return Err(IoError::new(
                ErrorKind::InvalidData,
                "inner writer reported more bytes than it was given",
            ));
        }

        self.buffer.copy_within(bytes_written..self.buffer_end, 0);
        self.buffer_end -= bytes_written;
        Ok(())
    }

    /// Appends the provided bytes, substituting the ones that we could fit
    /// into the internal buffer, and returning the number of bytes written to
    /// our buffer.
    fn push_bytes(&mut self, buf: &[u8]) -> usize {
        let to_write = buf.len().min(BUFFER_SIZE - self.buffer_end);
        let end = self.buffer_end + to_write;
        self.buffer[self.buffer_end..end].copy_from_slice(&buf[..to_write]);
        self.substitution
            .apply_in_place(&mut self.buffer[self.buffer_end..end]);
        self.buffer_end = end;
        to_write
    }
}

impl<Inner, S, const BUFFER_SIZE: usize> Writer<Inner, S, BUFFER_SIZE> {
    /// Constructs a new writer that applies the provided substitution to the
    /// provided input, before writing the substituted data to the inner
    /// writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use transparent_substitution::{Caesar, Writer};
    ///
    /// let mut file: Vec<u8> = vec![];
    /// let mut writer: Writer<_, _, 4096> = Writer::new(&mut file, Caesar::new(3));
    ///
    /// writer.write_all(b"hello world")?;
    /// writer.flush()?;
    ///
    /// assert_eq!(file, b"khoor zruog");
    ///
    /// # std::io::Result::Ok(())
    /// ```
    ///
    /// # Panics
    ///
    /// This will panic if `BUFFER_SIZE` is zero.
    pub const fn new(writer: Inner, substitution: S) -> Self {
        assert!(BUFFER_SIZE > 0, "BUFFER_SIZE cannot be zero!");
        Self {
            writer,
            substitution,
            buffer: [0; BUFFER_SIZE],
            buffer_end: 0,
        }
    }

    pub const fn get_ref(&self) -> &Inner {
        &self.writer
    }

    /// Writing directly to the returned writer bypasses both the substitution
    /// and any bytes still buffered.
    pub fn get_mut(&mut self) -> &mut Inner {
        &mut self.writer
    }

    /// Substituted bytes not yet handed to the inner writer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.buffer_end]
    }
}

impl<Inner, const BUFFER_SIZE: usize> Writer<Inner, Rot13, BUFFER_SIZE> {
    /// Convenience constructor for a [`Rot13`] writer.
    ///
    /// # Panics
    ///
    /// This will panic if `BUFFER_SIZE` is zero.
    pub const fn rot13(writer: Inner) -> Self {
        Self::new(writer, Rot13)
    }
}

impl<Inner, const BUFFER_SIZE: usize> Writer<Inner, Atbash, BUFFER_SIZE> {
    /// Convenience constructor for an [`Atbash`] writer.
    ///
    /// # Panics
    ///
    /// This will panic if `BUFFER_SIZE` is zero.
    pub const fn atbash(writer: Inner) -> Self {
        Self::new(writer, Atbash)
    }
}

impl<Inner, S, const BUFFER_SIZE: usize> Write for Writer<Inner, S, BUFFER_SIZE>
where
    Inner: Write,
    S: Substitution,
{
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        // Try to write our buffer first.
        if self.buffer_end > 0 {
            let bytes_written = self.writer.write(&self.buffer[..self.buffer_end])?;
            self.take_bytes(bytes_written)?;
        }

        let pushed = self.push_bytes(buf);
        trace!(pushed, buffered = self.buffer_end, "substituting write");
        Ok(pushed)
    }

    fn flush(&mut self) -> IoResult<()> {
        trace!(buffered = self.buffer_end, "flushing substituted bytes");
        while self.buffer_end > 0 {
            match self.writer.write(&self.buffer[..self.buffer_end])? {
                0 => return Err(ErrorKind::WriteZero.into()),
                bytes_written => self.take_bytes(bytes_written)?,
            }
        }

        self.writer.flush()
    }
}

#[cfg(feature = "tokio")]
impl<Inner, S, const BUFFER_SIZE: usize> AsyncWrite for Writer<Inner, S, BUFFER_SIZE>
where
    Inner: AsyncWrite + Unpin,
    S: Substitution + Unpin,
{
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context, buf: &[u8]) -> Poll<IoResult<usize>> {
        let me = self.get_mut();

        let mut inner_pending = false;
        if me.buffer_end > 0 {
            match Pin::new(&mut me.writer).poll_write(cx, &me.buffer[..me.buffer_end]) {
                Poll::Ready(Ok(bytes)) => {
                    if let Err(e) = me.take_bytes(bytes) {
                        return Poll::Ready(Err(e));
                    }
                }
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                // Underlying writer is full, lets try to add to our buffer instead
                Poll::Pending => inner_pending = true,
            }
        }

        match me.push_bytes(buf) {
            // Buffer is full as well, bubble up pending status. The inner
            // writer has registered the waker.
            0 if inner_pending && !buf.is_empty() => Poll::Pending,
            n => Poll::Ready(Ok(n)),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context) -> Poll<IoResult<()>> {
        let me = self.get_mut();
        while me.buffer_end > 0 {
            match Pin::new(&mut me.writer).poll_write(cx, &me.buffer[..me.buffer_end]) {
                Poll::Ready(Ok(0)) => return Poll::Ready(Err(ErrorKind::WriteZero.into())),
                Poll::Ready(Ok(bytes)) => {
                    if let Err(e) = me.take_bytes(bytes) {
                        return Poll::Ready(Err(e));
                    }
                }
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                Poll::Pending => return Poll::Pending,
            }
        }

        Pin::new(&mut me.writer).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<IoResult<()>> {
        match self.as_mut().poll_flush(cx) {
            Poll::Ready(Ok(())) => Pin::new(&mut self.get_mut().writer).poll_shutdown(cx),
            other => other,
        }
    }
}



#[cfg(all(test, feature = "tokio"))]
mod tokio_async_write {
    use super::test::*;
    use super::Writer;

    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn simple_large_buffer() -> TestResult<()> {
        let mut underlying = vec![];
        let mut writer = Writer::<_, _, 2048>::rot13(&mut underlying);
        AsyncWriteExt::write_all(&mut writer, &plaintext()).await?;
        writer.flush().await?;
        assert_eq!(underlying, expected());
        Ok(())
    }

    #[tokio::test]
    async fn simple_small_buffer() -> TestResult<()> {
        let mut underlying = vec![];
        let mut writer = Writer::<_, _, 16>::rot13(&mut underlying);
        AsyncWriteExt::write_all(&mut writer, &plaintext()).await?;
        writer.flush().await?;
        assert_eq!(underlying, expected());
        Ok(())
    }

    #[tokio::test]
    async fn slow_writer() -> TestResult<()> {
        let mut underlying = ThreeByteWriter(vec![]);
        let mut writer = Writer::<_, _, 2048>::rot13(&mut underlying);
        AsyncWriteExt::write_all(&mut writer, &plaintext()).await?;
        writer.shutdown().await?;
        assert_eq!(underlying.0, expected());
        Ok(())
    }
}
