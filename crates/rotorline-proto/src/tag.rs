//! Wire tags: the PRT-7 opcode set.

/// Tag identifying a command's kind, the first character of every line.
///
/// The protocol defines exactly two tags and is closed: there is no
/// extension or version negotiation, so downstream dispatch can match
/// exhaustively with no default arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `L`: load one ciphered symbol into the message.
    Load,
    /// `M`: rotate the cipher wheel.
    Rotate,
}

impl Tag {
    /// Parse a tag character. Case-insensitive. `None` if unrecognized.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' | 'l' => Some(Self::Load),
            'M' | 'm' => Some(Self::Rotate),
            _ => None,
        }
    }

    /// Canonical (uppercase) wire character for this tag.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Rotate => 'M',
        }
    }
}
