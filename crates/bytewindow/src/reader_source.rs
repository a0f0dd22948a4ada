//! [`ByteSource`] adapter for [`std::io::Read`] implementations.

use std::io::{self, ErrorKind, Read};

use crate::source::ByteSource;

/// A [`ByteSource`] over any [`Read`] implementation: files, sockets, pipes.
///
/// - `Ok(0)` from the reader marks the source exhausted.
/// - [`ErrorKind::Interrupted`] is retried.
/// - [`ErrorKind::WouldBlock`] reads as "nothing right now": the source stays
///   live and the window asks again.
/// - Any other error marks the source failed. The error is kept so the caller
///   can tell a truncated stream from a clean end; see [`error`](Self::error).
///
/// Wrap unbuffered readers as they are: the window already batches reads, so
/// an extra [`std::io::BufReader`] only adds a copy.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    exhausted: bool,
    failed: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            exhausted: false,
            failed: false,
            error: None,
        }
    }

    /// The error that stopped the source, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Takes the recorded error. The source stays failed.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Borrows the wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() || !self.is_live() {
            return 0;
        }
        loop {
            match self.reader.read(buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return 0;
                }
                Ok(n) => return n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) if e.kind() == ErrorKind::WouldBlock => return 0,
                Err(e) => {
                    log::debug!("byte source read failed: {e}");
                    self.failed = true;
                    self.error = Some(e);
                    return 0;
                }
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn has_failed(&self) -> bool {
        self.failed
    }
}
