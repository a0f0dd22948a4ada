use core::ops::{Deref, DerefMut};

use crate::source::ByteSource;

/// Whether a window owns its source or borrows it from the caller.
///
/// An owned source is dropped together with the window, or right after it is
/// replaced by [`WindowBuffer::rebind`](crate::WindowBuffer::rebind). A
/// borrowed source outlives the window and stays usable by the caller once the
/// window is gone.
#[derive(Debug)]
pub enum SourceHandle<'s, S> {
    /// The window is responsible for dropping the source.
    Owned(S),
    /// The caller keeps the source alive.
    Borrowed(&'s mut S),
}

impl<S> SourceHandle<'_, S> {
    /// Returns `true` for [`SourceHandle::Owned`].
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self, SourceHandle::Owned(_))
    }

    /// Returns the source if it was owned.
    #[must_use]
    pub fn into_owned(self) -> Option<S> {
        match self {
            SourceHandle::Owned(source) => Some(source),
            SourceHandle::Borrowed(_) => None,
        }
    }
}

impl<S> From<S> for SourceHandle<'_, S> {
    fn from(source: S) -> Self {
        SourceHandle::Owned(source)
    }
}

impl<S> Deref for SourceHandle<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        match self {
            SourceHandle::Owned(source) => source,
            SourceHandle::Borrowed(source) => &**source,
        }
    }
}

impl<S> DerefMut for SourceHandle<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        match self {
            SourceHandle::Owned(source) => source,
            SourceHandle::Borrowed(source) => &mut **source,
        }
    }
}

impl<S: ByteSource> ByteSource for SourceHandle<'_, S> {
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
