//! A fixed-capacity lookahead/pushback window over a streaming byte source.
//!
//! [`WindowBuffer`] sits between a tokenizer and whatever produces its bytes
//! (a file, a socket, an in-memory slice). It keeps the most recent `N` bytes
//! of the stream in circular storage and exposes them as three regions around
//! a read cursor:
//!
//! - the *current* byte, the last one returned by [`WindowBuffer::advance`],
//! - the *future* region, bytes already pulled from the source but not yet
//!   consumed, available through [`WindowBuffer::future`],
//! - the *past* region, consumed bytes that have not been overwritten yet,
//!   available through [`WindowBuffer::past`].
//!
//! The window refills itself from its [`ByteSource`] only when the future
//! region drops below a low-water mark, so the per-byte cost stays O(1)
//! amortized even when every source read blocks.
//!
//! ```rust
//! use bytewindow::{Input, SliceSource, WindowBuffer};
//!
//! let mut window = WindowBuffer::<_, 8>::owned(SliceSource::new(b"let x"));
//!
//! assert_eq!(window.advance(1), Input::Byte(b'l'));
//! assert!(window.matches_ahead(b"et"));
//! assert_eq!(window.advance(2), Input::Byte(b't'));
//! assert_eq!(window.past(0), b'e');
//! assert_eq!(window.future(0), b' ');
//!
//! let rest: Vec<u8> = window.by_ref().collect();
//! assert_eq!(rest, b" x");
//! assert_eq!(window.advance(1), Input::End);
//! assert!(window.at_end());
//! ```
//!
//! # Crate organisation
//!
//! - [`WindowBuffer`]: the window itself.
//! - [`ByteSource`]: the pull contract the window reads from, with
//!   [`SliceSource`] for in-memory input and, behind the `std` feature,
//!   [`ReaderSource`] for any [`std::io::Read`].
//! - [`SourceHandle`]: whether the window owns its source or borrows it.
//! - [`RefillPolicy`]: low-water mark and refill sizes.
//! - [`Input`]: a byte or the end-of-input marker.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod handle;
mod input;
mod options;
#[cfg(feature = "std")]
mod reader_source;
mod source;
mod window;

#[cfg(test)]
mod tests;

pub use error::PolicyError;
pub use handle::SourceHandle;
pub use input::Input;
pub use options::RefillPolicy;
#[cfg(feature = "std")]
pub use reader_source::ReaderSource;
pub use source::{ByteSource, SliceSource};
pub use window::{DEFAULT_CAPACITY, WindowBuffer};
