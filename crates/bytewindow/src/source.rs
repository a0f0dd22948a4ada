//! The pull contract a [`WindowBuffer`](crate::WindowBuffer) reads from.

use alloc::boxed::Box;

/// Anything that can hand out bytes on demand.
///
/// The window calls [`read_into`](ByteSource::read_into) only while refilling,
/// and consults [`is_exhausted`](ByteSource::is_exhausted) and
/// [`has_failed`](ByteSource::has_failed) to decide whether another read is
/// worth attempting. Exhaustion and failure are both terminal from the
/// window's point of view; they differ only in what the caller is told.
///
/// A read that returns `0` while the source is neither exhausted nor failed
/// means "nothing right now": the window will ask again. Sources that can
/// block should block inside `read_into` instead.
pub trait ByteSource {
    /// Copies up to `buf.len()` bytes into the front of `buf` and returns how
    /// many were written. May return fewer than requested.
    fn read_into(&mut self, buf: &mut [u8]) -> usize;

    /// `true` once no more bytes will ever be produced.
    fn is_exhausted(&self) -> bool;

    /// `true` if the source hit an unrecoverable error. A failed source
    /// produces no further bytes.
    fn has_failed(&self) -> bool;

    /// `true` while another read may still produce bytes.
    fn is_live(&self) -> bool {
        !self.is_exhausted() && !self.has_failed()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        (**self).read_into(buf)
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }

    #[inline]
    fn has_failed(&self) -> bool {
        (**self).has_failed()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        (**self).read_into(buf)
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }

    #[inline]
    fn has_failed(&self) -> bool {
        (**self).has_failed()
    }
}

/// An in-memory byte source over a borrowed slice.
///
/// Never fails; exhausted once every byte has been read.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source that yields `data` front to back.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes handed out so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let rest = self.remaining();
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        n
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn has_failed(&self) -> bool {
        false
    }
}
