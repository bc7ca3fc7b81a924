//! Ordered plaintext accumulator.

/// Decoded message under assembly.
///
/// Append-only: characters land in arrival order and nothing is ever
/// removed or reordered, so the length always equals the number of load
/// commands dispatched so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    symbols: Vec<char>,
}

impl DecodedMessage {
    /// Create an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Append one decoded character.
    pub fn append(&mut self, symbol: char) {
        self.symbols.push(symbol);
    }

    /// Number of characters accumulated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing has been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Render the message with each character bracketed: `[H][O][L][A]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.symbols.len().saturating_mul(3));
        for &symbol in &self.symbols {
            out.push('[');
            out.push(symbol);
            out.push(']');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let message = DecodedMessage::new();
        assert!(message.is_empty());
        assert_eq!(message.len(), 0);
        assert_eq!(message.render(), "");
    }

    #[test]
    fn append_preserves_arrival_order() {
        let mut message = DecodedMessage::new();
        for symbol in ['H', 'O', 'L', 'A'] {
            message.append(symbol);
        }
        assert_eq!(message.len(), 4);
        assert_eq!(message.render(), "[H][O][L][A]");
    }

    #[test]
    fn render_brackets_every_character() {
        let mut message = DecodedMessage::new();
        message.append(' ');
        message.append('!');
        assert_eq!(message.render(), "[ ][!]");
    }

    #[test]
    fn duplicates_are_kept() {
        let mut message = DecodedMessage::new();
        message.append('A');
        message.append('A');
        assert_eq!(message.len(), 2);
        assert_eq!(message.render(), "[A][A]");
    }
}
