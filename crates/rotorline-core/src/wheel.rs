//! Rotating substitution cipher.
//!
//! The sender enciphers each letter by looking it up on a rotor wheel
//! whose zero position drifts as rotation commands arrive. The receiver
//! runs the same wheel: the whole device state is one offset into the
//! alphabet, rotation is modular addition, and decoding a letter is a
//! single shift. Rotations compose, so any burst of rotation commands
//! collapses to one offset change.

/// Letters on the wheel.
const ALPHABET_LEN: u8 = 26;

/// Cipher wheel state: the current zero-position offset.
///
/// The offset is always in `[0, 26)`; every mutation re-normalizes, so
/// the invariant is structural. A fresh wheel sits at offset zero, where
/// [`decode`](Self::decode) is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherWheel {
    offset: u8,
}

impl CipherWheel {
    /// Create a wheel at offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Current offset, in `[0, 26)`.
    #[must_use]
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Advance the wheel by `delta` positions.
    ///
    /// Negative deltas rotate backwards. Rotations are cumulative modulo
    /// the alphabet: `rotate(a)` then `rotate(b)` leaves the wheel where
    /// a single `rotate(a + b)` would. Never fails, any `i32` is a valid
    /// delta.
    pub fn rotate(&mut self, delta: i32) {
        let step = delta.rem_euclid(i32::from(ALPHABET_LEN));
        self.offset = ((i32::from(self.offset) + step) % i32::from(ALPHABET_LEN)) as u8;
    }

    /// Decode one symbol at the current offset.
    ///
    /// ASCII letters shift forward by the offset, wrapping within their
    /// own case; everything else (digits, punctuation, non-ASCII) passes
    /// through unchanged. At offset zero this is the identity.
    #[must_use]
    pub fn decode(&self, symbol: char) -> char {
        let base = if symbol.is_ascii_uppercase() {
            b'A'
        } else if symbol.is_ascii_lowercase() {
            b'a'
        } else {
            return symbol;
        };

        let index = (symbol as u8) - base;
        char::from(base + (index + self.offset) % ALPHABET_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_wheel_is_identity() {
        let wheel = CipherWheel::new();
        assert_eq!(wheel.offset(), 0);
        assert_eq!(wheel.decode('A'), 'A');
        assert_eq!(wheel.decode('Z'), 'Z');
        assert_eq!(wheel.decode('m'), 'm');
    }

    #[test]
    fn decode_shifts_forward_with_wraparound() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(3);
        assert_eq!(wheel.decode('A'), 'D');
        assert_eq!(wheel.decode('X'), 'A');
        assert_eq!(wheel.decode('Z'), 'C');
    }

    #[test]
    fn decode_preserves_case() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(1);
        assert_eq!(wheel.decode('a'), 'b');
        assert_eq!(wheel.decode('z'), 'a');
        assert_eq!(wheel.decode('A'), 'B');
    }

    #[test]
    fn decode_passes_non_letters_through() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(13);
        assert_eq!(wheel.decode('3'), '3');
        assert_eq!(wheel.decode(','), ',');
        assert_eq!(wheel.decode(' '), ' ');
        assert_eq!(wheel.decode('ñ'), 'ñ');
    }

    #[test]
    fn rotations_accumulate() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(10);
        wheel.rotate(20);
        assert_eq!(wheel.offset(), 4);

        let mut single = CipherWheel::new();
        single.rotate(30);
        assert_eq!(wheel, single);
    }

    #[test]
    fn negative_rotation_wraps_backwards() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(-3);
        assert_eq!(wheel.offset(), 23);
        assert_eq!(wheel.decode('A'), 'X');

        wheel.rotate(3);
        assert_eq!(wheel.offset(), 0);
    }

    #[test]
    fn full_turn_is_identity() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(26);
        assert_eq!(wheel.offset(), 0);
        wheel.rotate(-52);
        assert_eq!(wheel.offset(), 0);
    }

    #[test]
    fn extreme_deltas_stay_normalized() {
        let mut wheel = CipherWheel::new();
        wheel.rotate(i32::MAX);
        assert!(wheel.offset() < 26);
        wheel.rotate(i32::MIN);
        assert!(wheel.offset() < 26);
        // MAX + MIN = -1, so the two rotations net to -1.
        assert_eq!(wheel.offset(), 25);
    }
}
