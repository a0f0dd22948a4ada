//! The windowed byte buffer.
//!
//! Storage is a fixed `[u8; N]` ring addressed through three cursors:
//!
//! - `start`: storage index of the oldest retained byte,
//! - `count`: number of retained bytes,
//! - `read_offset`: bytes consumed, counted from `start`.
//!
//! Logical position `i` (counted from the oldest retained byte) lives at
//! storage index `(start + i) % N`. Positions `0..read_offset` are the past
//! region (the last of them is the current byte once `advance` has returned
//! one), `read_offset..count` the future region.
//!
//! Refills write straight into the ring. When the ring is full each new byte
//! overwrites the oldest one, moving `start` forward and `read_offset` back.
//! A refill never requests more than `N - future_count()` bytes, so only
//! consumed bytes are ever overwritten, whatever stride the caller uses.

use core::fmt;

use bstr::BString;

use crate::{
    error::PolicyError, handle::SourceHandle, input::Input, options::RefillPolicy,
    source::ByteSource,
};

/// Window capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A bounded lookahead/pushback window over a [`ByteSource`].
///
/// See the [crate documentation](crate) for the region model. `N` is the
/// capacity in bytes and must be non-zero.
pub struct WindowBuffer<'s, S, const N: usize = DEFAULT_CAPACITY> {
    storage: [u8; N],
    start: usize,
    count: usize,
    read_offset: usize,
    /// Storage index of the byte last returned by `advance`.
    current: Option<usize>,
    policy: RefillPolicy,
    source: SourceHandle<'s, S>,
}

impl<'s, S: ByteSource, const N: usize> WindowBuffer<'s, S, N> {
    const NON_EMPTY: () = assert!(N > 0, "window capacity must be at least 1");

    /// Creates an empty window over `source` with the default
    /// [`RefillPolicy`] for capacity `N`.
    pub fn new(source: SourceHandle<'s, S>) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            storage: [0; N],
            start: 0,
            count: 0,
            read_offset: 0,
            current: None,
            policy: RefillPolicy::for_capacity(N),
            source,
        }
    }

    /// Creates an empty window that owns `source`.
    pub fn owned(source: S) -> Self {
        Self::new(SourceHandle::Owned(source))
    }

    /// Creates an empty window that borrows `source`.
    pub fn borrowed(source: &'s mut S) -> Self {
        Self::new(SourceHandle::Borrowed(source))
    }

    /// Creates an empty window with a custom refill policy.
    ///
    /// # Errors
    ///
    /// Returns the [`PolicyError`] reported by [`RefillPolicy::validate`].
    pub fn with_policy(
        source: SourceHandle<'s, S>,
        policy: RefillPolicy,
    ) -> Result<Self, PolicyError> {
        policy.validate(N)?;
        let mut window = Self::new(source);
        window.policy = policy;
        Ok(window)
    }

    /// `true` once the source will produce no more bytes.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_exhausted()
    }

    /// `true` if the source stopped because of an error rather than a clean
    /// end of stream.
    ///
    /// A failed source is treated like an exhausted one: buffered bytes can
    /// still be consumed, then `advance` returns [`Input::End`]. Check this
    /// after reaching the end to tell the two apart.
    pub fn failed(&self) -> bool {
        self.source.has_failed()
    }

    /// Moves the read cursor forward by `stride` bytes and returns the last
    /// byte stepped over, which becomes the current byte.
    ///
    /// Refills from the source first when fewer than
    /// [`low_water_mark`](RefillPolicy::low_water_mark) (or fewer than
    /// `stride`) unconsumed bytes are buffered. Returns [`Input::End`] once
    /// the source is exhausted or failed and nothing unconsumed is left;
    /// from then on [`current`](Self::current) is also `End`.
    ///
    /// # Panics
    ///
    /// If `stride` is zero or larger than `N`, or if it reaches past the
    /// final byte of a stream that has ended. Confirm multi-byte strides with
    /// [`future_count`](Self::future_count) or
    /// [`matches_ahead`](Self::matches_ahead) first.
    pub fn advance(&mut self, stride: usize) -> Input {
        assert!(stride >= 1, "advance stride must be at least 1");
        assert!(
            stride <= N,
            "advance stride {stride} exceeds window capacity {N}"
        );

        let ahead = self.future_count();
        if ahead < self.policy.low_water_mark.max(stride) && self.source.is_live() {
            let limit = if !self.is_full() && ahead == 0 {
                self.policy.initial_fill
            } else {
                self.policy.refill_chunk
            };
            self.refill(limit.max(stride.saturating_sub(ahead)));

            // A live source that returned nothing yet must not be mistaken
            // for an exhausted one.
            while self.future_count() < stride && self.source.is_live() {
                self.refill(stride - self.future_count());
            }
        }

        let ahead = self.future_count();
        if ahead == 0 {
            self.current = None;
            return Input::End;
        }
        assert!(
            stride <= ahead,
            "advance stride {stride} overruns the {ahead} bytes left before end of input"
        );

        let index = (self.start + self.read_offset + stride - 1) % N;
        self.current = Some(index);
        self.read_offset += stride;
        Input::Byte(self.storage[index])
    }

    /// Shorthand for `advance(1)`.
    #[inline]
    pub fn next_byte(&mut self) -> Input {
        self.advance(1)
    }

    /// Pulls up to `limit` bytes from the source into the ring. Returns how
    /// many arrived.
    fn refill(&mut self, limit: usize) -> usize {
        let limit = limit.min(N - self.future_count());
        let mut received = 0;

        while received < limit && self.source.is_live() {
            let end = (self.start + self.count) % N;
            let span = (limit - received).min(N - end);
            let n = self.source.read_into(&mut self.storage[end..end + span]);
            debug_assert!(n <= span, "byte source reported {n} bytes for a {span} byte read");
            if n == 0 {
                break;
            }
            self.commit(n.min(span));
            received += n.min(span);
        }

        log::trace!(
            "refill: requested {limit}, received {received} (start {}, count {}, read_offset {})",
            self.start,
            self.count,
            self.read_offset
        );
        if !self.source.is_live() {
            if self.source.has_failed() {
                log::debug!("byte source failed after refill of {received} bytes");
            } else {
                log::debug!("byte source exhausted after refill of {received} bytes");
            }
        }
        received
    }

    /// Accounts for `n` bytes just written behind the newest retained byte,
    /// evicting the oldest ones if the ring overflowed.
    fn commit(&mut self, n: usize) {
        let total = self.count + n;
        if total > N {
            let evicted = total - N;
            debug_assert!(
                evicted <= self.read_offset,
                "refill evicted {evicted} bytes but only {} were consumed",
                self.read_offset
            );
            self.start = (self.start + evicted) % N;
            self.read_offset -= evicted;
            self.count = N;
        } else {
            self.count = total;
        }
    }

    /// Replaces the source. An owned previous source is dropped after the new
    /// one is in place. Buffered bytes are kept.
    pub fn rebind(&mut self, source: SourceHandle<'s, S>) {
        let previous = core::mem::replace(&mut self.source, source);
        log::debug!(
            "rebound byte source (previous was {})",
            if previous.is_owned() { "owned" } else { "borrowed" }
        );
        drop(previous);
    }

    /// The active source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The active source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the window and returns its source handle.
    pub fn into_source(self) -> SourceHandle<'s, S> {
        self.source
    }
}

impl<S, const N: usize> WindowBuffer<'_, S, N> {
    /// Capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes currently retained, consumed or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// `true` if every slot holds a retained byte.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.count == N
    }

    /// `true` if nothing is retained.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` once anything has been read from the source.
    ///
    /// Distinguishes a fresh window from one whose input was read and fully
    /// consumed, where [`at_end`](Self::at_end) is `true` for both.
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.count != 0
    }

    /// `true` if there is no current byte: nothing was advanced over yet, or
    /// the input ended.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// The active refill policy.
    #[must_use]
    pub const fn policy(&self) -> &RefillPolicy {
        &self.policy
    }

    /// The byte last returned by [`advance`](WindowBuffer::advance), or
    /// [`Input::End`]. Never reads from the source.
    #[must_use]
    pub fn current(&self) -> Input {
        self.current.map_or(Input::End, |i| Input::Byte(self.storage[i]))
    }

    /// Number of buffered bytes not yet consumed.
    #[must_use]
    pub const fn future_count(&self) -> usize {
        self.count - self.read_offset
    }

    /// Number of consumed bytes before the current one that are still
    /// retained.
    #[must_use]
    pub const fn past_count(&self) -> usize {
        self.read_offset.saturating_sub(1)
    }

    /// The byte `offset` positions ahead of the read cursor; `future(0)` is
    /// what `advance(1)` would return next. Never reads from the source.
    ///
    /// # Panics
    ///
    /// If `offset >= self.future_count()`.
    #[must_use]
    pub fn future(&self, offset: usize) -> u8 {
        let ahead = self.future_count();
        assert!(
            offset < ahead,
            "future offset {offset} is outside the {ahead} buffered bytes ahead"
        );
        self.at(self.read_offset + offset)
    }

    /// Like [`future`](Self::future), but `None` outside the window.
    #[must_use]
    pub fn get_future(&self, offset: usize) -> Option<u8> {
        (offset < self.future_count()).then(|| self.at(self.read_offset + offset))
    }

    /// The byte `offset` positions behind the current byte; `past(0)` is the
    /// byte consumed just before it.
    ///
    /// # Panics
    ///
    /// If `offset >= self.past_count()`, i.e. the byte was never read or has
    /// been overwritten.
    #[must_use]
    pub fn past(&self, offset: usize) -> u8 {
        let behind = self.past_count();
        assert!(
            offset < behind,
            "past offset {offset} is outside the {behind} retained bytes behind"
        );
        self.at(self.read_offset - 2 - offset)
    }

    /// Like [`past`](Self::past), but `None` outside the window.
    #[must_use]
    pub fn get_past(&self, offset: usize) -> Option<u8> {
        (offset < self.past_count()).then(|| self.at(self.read_offset - 2 - offset))
    }

    /// `true` if the unconsumed bytes start with `pattern`.
    ///
    /// Only looks at what is already buffered; a pattern longer than
    /// [`future_count`](Self::future_count) never matches.
    #[must_use]
    pub fn matches_ahead(&self, pattern: &[u8]) -> bool {
        let (front, back) = self.future_slices();
        if pattern.len() > front.len() + back.len() {
            return false;
        }
        let split = pattern.len().min(front.len());
        front[..split] == pattern[..split] && back.starts_with(&pattern[split..])
    }

    /// The unconsumed bytes as two contiguous slices, in order. The second
    /// slice is empty unless the region wraps around the end of storage.
    #[must_use]
    pub fn future_slices(&self) -> (&[u8], &[u8]) {
        self.region(self.read_offset, self.future_count())
    }

    /// Drops the oldest retained byte if it has been consumed and is not the
    /// most recently consumed one, returning it.
    ///
    /// The last consumed byte is kept even after the input ended, so a window
    /// that has read anything never becomes empty this way and
    /// [`has_started`](Self::has_started) stays `true`.
    pub fn discard_oldest(&mut self) -> Option<u8> {
        // Position `read_offset - 1` is the current byte, or the last byte
        // before end of input.
        if self.read_offset <= 1 {
            return None;
        }
        let byte = self.storage[self.start];
        self.start = (self.start + 1) % N;
        self.count -= 1;
        self.read_offset -= 1;
        Some(byte)
    }

    #[inline]
    fn at(&self, logical: usize) -> u8 {
        self.storage[(self.start + logical) % N]
    }

    /// `len` bytes starting at logical position `from`, split at the end of
    /// storage.
    fn region(&self, from: usize, len: usize) -> (&[u8], &[u8]) {
        if len == 0 {
            return (&[], &[]);
        }
        let begin = (self.start + from) % N;
        if begin + len <= N {
            (&self.storage[begin..begin + len], &[])
        } else {
            (&self.storage[begin..], &self.storage[..begin + len - N])
        }
    }
}

impl<S: ByteSource, const N: usize> Iterator for WindowBuffer<'_, S, N> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.advance(1).byte()
    }
}

impl<S, const N: usize> fmt::Debug for WindowBuffer<'_, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = |(front, back): (&[u8], &[u8])| {
            let mut bytes = BString::from(front);
            bytes.extend_from_slice(back);
            bytes
        };
        f.debug_struct("WindowBuffer")
            .field("capacity", &N)
            .field("start", &self.start)
            .field("count", &self.count)
            .field("read_offset", &self.read_offset)
            .field("current", &self.current())
            .field("consumed", &joined(self.region(0, self.read_offset)))
            .field("ahead", &joined(self.future_slices()))
            .finish_non_exhaustive()
    }
}
