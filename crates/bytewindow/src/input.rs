/// What the window hands back when asked for a byte.
///
/// End of input is a separate variant rather than a reserved byte value, so
/// `0x00` and `0xFF` are ordinary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// A byte from the stream.
    Byte(u8),
    /// The source is exhausted (or failed) and every buffered byte has been
    /// consumed.
    End,
}

impl Input {
    /// Returns the byte, or `None` at end of input.
    #[must_use]
    pub const fn byte(self) -> Option<u8> {
        match self {
            Input::Byte(b) => Some(b),
            Input::End => None,
        }
    }

    /// Returns `true` for [`Input::End`].
    #[must_use]
    pub const fn is_end(self) -> bool {
        matches!(self, Input::End)
    }

    /// Returns `true` if this is exactly the byte `expected`.
    #[must_use]
    pub const fn is(self, expected: u8) -> bool {
        matches!(self, Input::Byte(b) if b == expected)
    }
}

impl From<Input> for Option<u8> {
    fn from(input: Input) -> Self {
        input.byte()
    }
}

impl From<Option<u8>> for Input {
    fn from(byte: Option<u8>) -> Self {
        byte.map_or(Input::End, Input::Byte)
    }
}
