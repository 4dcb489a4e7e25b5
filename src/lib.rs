#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Micro-crate providing [`Write`]r and [`Read`]er implementations that apply
//! a letter-substitution cipher to an asynchronous or synchronous stream.
//! Substitution happens lazily, byte by byte, as data flows through; nothing
//! is read ahead or held back beyond what the caller asks for.
//!
//! Two classic ciphers are ready to use, [`Rot13`] and [`Atbash`], along with
//! arbitrary shifts ([`Caesar`]) and explicit permutations ([`Keyed`]). Any
//! `Fn(u8) -> u8` closure is also accepted as a [`Substitution`]. Readers and
//! writers nest, so ciphers compose by wrapping:
//!
//! ```
//! use std::io::Read;
//!
//! use transparent_substitution::Reader;
//!
//! let mut reader = Reader::rot13(Reader::atbash("Hello, World!".as_bytes()));
//! let mut output = String::new();
//! reader.read_to_string(&mut output)?;
//! assert_eq!(output, "Fibby, Qyvbj!");
//!
//! # std::io::Result::Ok(())
//! ```
//!
//! Both uppercase and lowercase ASCII letters are substituted and keep their
//! case. Every other byte, including each byte of a multi-byte UTF-8
//! sequence, passes through unchanged. Errors from the wrapped reader or
//! writer are returned untouched.
//!
//! Additionally, [`Reader`] and [`Writer`] implement [`AsyncRead`] and
//! [`AsyncWrite`] if their underlying reader and writer implement the
//! respective traits and the `tokio` feature is enabled. Substitutions can
//! also be handed to [RustCrypto] code as a [`cipher::StreamCipher`] through
//! [`SubstitutionCipher`].
//!
//! [`Write`]: std::io::Write
//! [`Read`]: std::io::Read
//! [RustCrypto]: https://github.com/RustCrypto
//! [`AsyncRead`]: https://docs.rs/tokio/latest/tokio/io/trait.AsyncRead.html
//! [`AsyncWrite`]: https://docs.rs/tokio/latest/tokio/io/trait.AsyncWrite.html
//!
//! ## ⚠️ Security Warning
//!
//! Substitution ciphers provide no confidentiality whatsoever. They are
//! trivially broken by frequency analysis and are suitable only for
//! obfuscation, puzzles, and teaching.
//!
//! **DO NOT USE TO PROTECT ANYTHING!**

mod error;
mod reader;
mod stream_cipher;
mod substitution;
mod writer;

pub use error::AlphabetError;
pub use reader::Reader;
pub use stream_cipher::SubstitutionCipher;
pub use substitution::{Atbash, Caesar, Keyed, Rot13, Substitution};
pub use writer::Writer;

/// Convenience alias for a writer with a reasonable buffer.
pub type BufWriter<Inner, Substitution> = writer::Writer<Inner, Substitution, 4096>;
