//! Six-digit rolling entry buffer for HH:MM:SS input.
//!
//! The buffer behaves like the keypad of a kitchen timer: every new digit
//! shifts in from the right and the oldest one falls off the left, while
//! deleting shifts everything right and feeds a zero in from the left.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DigitError;

/// Number of digits held by the buffer (HH, MM, SS).
pub const DIGIT_COUNT: usize = 6;

/// Largest duration in canonical form (99:59:59).
pub const MAX_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

/// Largest duration the keypad can enter (99:99:99).
pub const MAX_ENTRY_SECONDS: u32 = 99 * 3600 + 99 * 60 + 99;

// ============================================================================
// DigitBuffer
// ============================================================================

/// Fixed-length queue of decimal digits, oldest first.
///
/// `DigitBuffer` is a plain value: [`push`](Self::push) and
/// [`pop`](Self::pop) return a new buffer and leave `self` untouched.
/// It serializes as a plain array of six digits and rejects any digit above
/// 9 when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[u8; 6]", into = "[u8; 6]")]
pub struct DigitBuffer {
    digits: [u8; DIGIT_COUNT],
}

impl DigitBuffer {
    /// Creates an all-zero buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a buffer from a number of seconds.
    ///
    /// Up to [`MAX_SECONDS`] the result is canonical (minutes and seconds
    /// below 60). Above that, hours stay at 99 and the remainder spills into
    /// minutes and seconds up to 99 each, so every total the keypad can
    /// enter comes back unchanged. Values above [`MAX_ENTRY_SECONDS`] are
    /// clamped.
    pub fn from_seconds(seconds: u32) -> Self {
        let seconds = seconds.min(MAX_ENTRY_SECONDS);
        let (hours, minutes, secs) = if seconds <= MAX_SECONDS {
            (seconds / 3600, (seconds % 3600) / 60, seconds % 60)
        } else {
            let rest = seconds - 99 * 3600;
            let minutes = (rest / 60).min(99);
            (99, minutes, rest - minutes * 60)
        };

        Self {
            digits: [
                (hours / 10) as u8,
                (hours % 10) as u8,
                (minutes / 10) as u8,
                (minutes % 10) as u8,
                (secs / 10) as u8,
                (secs % 10) as u8,
            ],
        }
    }

    /// Returns a new buffer with `digit` appended and the oldest digit dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DigitError::InvalidDigit`] if `digit` is greater than 9.
    pub fn push(&self, digit: u8) -> Result<Self, DigitError> {
        if digit > 9 {
            return Err(DigitError::InvalidDigit(digit));
        }

        let mut digits = self.digits;
        digits.rotate_left(1);
        digits[DIGIT_COUNT - 1] = digit;
        Ok(Self { digits })
    }

    /// Returns a new buffer with the newest digit dropped and a zero prepended.
    ///
    /// Popping an all-zero buffer yields the same all-zero buffer.
    pub fn pop(&self) -> Self {
        let mut digits = self.digits;
        digits.rotate_right(1);
        digits[0] = 0;
        Self { digits }
    }

    /// Total duration in seconds described by the digits.
    ///
    /// Groups are read as written, so "00 : 99 : 99" is 99 minutes plus
    /// 99 seconds.
    pub fn total_seconds(&self) -> u32 {
        let [h1, h2, m1, m2, s1, s2] = self.digits.map(u32::from);
        (h1 * 10 + h2) * 3600 + (m1 * 10 + m2) * 60 + (s1 * 10 + s2)
    }

    /// Formats the digits as `HH : MM : SS`.
    pub fn display_text(&self) -> String {
        let d = self.digits;
        format!(
            "{}{} : {}{} : {}{}",
            d[0], d[1], d[2], d[3], d[4], d[5]
        )
    }

    /// Returns the digits, oldest first.
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.digits
    }

    /// Returns true if every digit is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Parses a duration written either as raw keypad digits (`"130"`) or in
    /// colon form (`"1:30"`, `"1:02:03"`).
    ///
    /// # Errors
    ///
    /// Returns [`DigitError::InvalidFormat`] for anything else.
    pub fn parse(input: &str) -> Result<Self, DigitError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DigitError::InvalidFormat(input.to_string()));
        }

        if input.contains(':') {
            return Self::parse_colon_form(input);
        }

        if input.len() > DIGIT_COUNT || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DigitError::InvalidFormat(input.to_string()));
        }

        input
            .bytes()
            .try_fold(Self::new(), |buffer, b| buffer.push(b - b'0'))
    }

    fn parse_colon_form(input: &str) -> Result<Self, DigitError> {
        let fields: Vec<&str> = input.split(':').map(str::trim).collect();
        if fields.len() > 3 {
            return Err(DigitError::InvalidFormat(input.to_string()));
        }

        let mut buffer = Self::new();
        // Left-pad missing groups so "1:30" means 00:01:30.
        for _ in fields.len()..3 {
            buffer = buffer.push(0)?.push(0)?;
        }

        for field in fields {
            if field.is_empty()
                || field.len() > 2
                || !field.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(DigitError::InvalidFormat(input.to_string()));
            }
            let value = field
                .parse::<u8>()
                .map_err(|_| DigitError::InvalidFormat(input.to_string()))?;
            buffer = buffer.push(value / 10)?.push(value % 10)?;
        }

        Ok(buffer)
    }
}

impl TryFrom<[u8; DIGIT_COUNT]> for DigitBuffer {
    type Error = DigitError;

    fn try_from(digits: [u8; DIGIT_COUNT]) -> Result<Self, Self::Error> {
        match digits.iter().find(|&&d| d > 9) {
            Some(&d) => Err(DigitError::InvalidDigit(d)),
            None => Ok(Self { digits }),
        }
    }
}

impl From<DigitBuffer> for [u8; DIGIT_COUNT] {
    fn from(buffer: DigitBuffer) -> Self {
        buffer.digits
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl FromStr for DigitBuffer {
    type Err = DigitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(digits: &[u8]) -> DigitBuffer {
        digits
            .iter()
            .fold(DigitBuffer::new(), |b, &d| b.push(d).unwrap())
    }

    // ------------------------------------------------------------------------
    // Push / Pop Tests
    // ------------------------------------------------------------------------

    mod push_pop_tests {
        use super::*;

        #[test]
        fn test_new_is_all_zero() {
            let buffer = DigitBuffer::new();
            assert_eq!(buffer.digits(), [0; 6]);
            assert!(buffer.is_zero());
            assert_eq!(buffer.total_seconds(), 0);
        }

        #[test]
        fn test_push_thirty_seconds() {
            let buffer = push_all(&[0, 0, 0, 0, 3, 0]);
            assert_eq!(buffer.digits(), [0, 0, 0, 0, 3, 0]);
            assert_eq!(buffer.total_seconds(), 30);
            assert_eq!(buffer.display_text(), "00 : 00 : 30");
        }

        #[test]
        fn test_push_shifts_left() {
            let buffer = push_all(&[1, 2, 3]);
            assert_eq!(buffer.digits(), [0, 0, 0, 1, 2, 3]);
            assert_eq!(buffer.display_text(), "00 : 01 : 23");
            assert_eq!(buffer.total_seconds(), 83);
        }

        #[test]
        fn test_push_drops_oldest_on_overflow() {
            let buffer = push_all(&[1, 2, 3, 4, 5, 6, 7]);
            assert_eq!(buffer.digits(), [2, 3, 4, 5, 6, 7]);
        }

        #[test]
        fn test_push_does_not_mutate_original() {
            let original = push_all(&[4, 2]);
            let _ = original.push(9).unwrap();
            assert_eq!(original.digits(), [0, 0, 0, 0, 4, 2]);
        }

        #[test]
        fn test_push_invalid_digit_rejected() {
            let buffer = push_all(&[5]);
            let result = buffer.push(10);
            assert!(matches!(result, Err(DigitError::InvalidDigit(10))));
            assert_eq!(buffer.digits(), [0, 0, 0, 0, 0, 5]);
        }

        #[test]
        fn test_pop_drops_newest() {
            let buffer = push_all(&[1, 2, 3]).pop();
            assert_eq!(buffer.digits(), [0, 0, 0, 0, 1, 2]);
        }

        #[test]
        fn test_pop_full_buffer() {
            let buffer = push_all(&[9, 8, 7, 6, 5, 4]).pop();
            assert_eq!(buffer.digits(), [0, 9, 8, 7, 6, 5]);
        }

        #[test]
        fn test_pop_all_zero_is_noop() {
            let buffer = DigitBuffer::new();
            assert_eq!(buffer.pop(), buffer);
            assert_eq!(buffer.pop().pop(), DigitBuffer::new());
        }

        #[test]
        fn test_any_push_sequence_keeps_six_valid_digits() {
            let mut buffer = DigitBuffer::new();
            for i in 0..200u32 {
                buffer = if i % 7 == 3 {
                    buffer.pop()
                } else {
                    buffer.push(((i * 37) % 10) as u8).unwrap()
                };
                assert_eq!(buffer.digits().len(), DIGIT_COUNT);
                assert!(buffer.digits().iter().all(|&d| d <= 9));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Derived Value Tests
    // ------------------------------------------------------------------------

    mod derived_tests {
        use super::*;

        #[test]
        fn test_total_seconds_full() {
            let buffer = push_all(&[1, 2, 3, 4, 5, 6]);
            assert_eq!(buffer.total_seconds(), 12 * 3600 + 34 * 60 + 56);
        }

        #[test]
        fn test_total_seconds_non_canonical() {
            let buffer = push_all(&[0, 0, 9, 9, 9, 9]);
            assert_eq!(buffer.total_seconds(), 99 * 60 + 99);
            assert_eq!(buffer.display_text(), "00 : 99 : 99");
        }

        #[test]
        fn test_display_trait_matches_display_text() {
            let buffer = push_all(&[2, 5, 0, 0]);
            assert_eq!(buffer.to_string(), "00 : 25 : 00");
        }
    }

    // ------------------------------------------------------------------------
    // Serde Tests
    // ------------------------------------------------------------------------

    mod serde_tests {
        use super::*;

        #[test]
        fn test_serializes_as_digit_array() {
            let buffer = push_all(&[1, 3, 0]);
            assert_eq!(serde_json::to_string(&buffer).unwrap(), "[0,0,0,1,3,0]");
        }

        #[test]
        fn test_deserialize_valid_digits() {
            let buffer: DigitBuffer = serde_json::from_str("[0,0,0,1,3,0]").unwrap();
            assert_eq!(buffer.total_seconds(), 90);
        }

        #[test]
        fn test_deserialize_rejects_digit_above_nine() {
            let result = serde_json::from_str::<DigitBuffer>("[0,0,0,0,0,42]");
            let err = result.unwrap_err();
            assert!(err.to_string().contains("invalid digit: 42"));
        }

        #[test]
        fn test_try_from_array() {
            assert_eq!(
                DigitBuffer::try_from([0, 0, 0, 0, 10, 0]),
                Err(DigitError::InvalidDigit(10))
            );
            assert_eq!(
                DigitBuffer::try_from([0, 0, 0, 0, 3, 0]).unwrap(),
                push_all(&[3, 0])
            );
        }
    }

    // ------------------------------------------------------------------------
    // Seeding Tests
    // ------------------------------------------------------------------------

    mod seeding_tests {
        use super::*;

        #[test]
        fn test_from_seconds_zero() {
            assert_eq!(DigitBuffer::from_seconds(0), DigitBuffer::new());
        }

        #[test]
        fn test_from_seconds_decomposes() {
            let buffer = DigitBuffer::from_seconds(3 * 3600 + 7 * 60 + 45);
            assert_eq!(buffer.digits(), [0, 3, 0, 7, 4, 5]);
        }

        #[test]
        fn test_from_seconds_normalizes_non_canonical_entry() {
            let entered = push_all(&[0, 0, 9, 9, 9, 9]);
            let seeded = DigitBuffer::from_seconds(entered.total_seconds());
            assert_eq!(seeded.display_text(), "01 : 40 : 39");
            assert_eq!(seeded.total_seconds(), entered.total_seconds());
        }

        #[test]
        fn test_from_seconds_keeps_full_keypad_entry() {
            let entered = push_all(&[9, 9, 9, 9, 9, 9]);
            assert_eq!(entered.total_seconds(), MAX_ENTRY_SECONDS);

            let seeded = DigitBuffer::from_seconds(MAX_ENTRY_SECONDS);
            assert_eq!(seeded.digits(), [9, 9, 9, 9, 9, 9]);
        }

        #[test]
        fn test_from_seconds_spills_past_canonical_max() {
            let buffer = DigitBuffer::from_seconds(MAX_SECONDS + 1);
            assert_eq!(buffer.display_text(), "99 : 60 : 00");
            assert_eq!(buffer.total_seconds(), MAX_SECONDS + 1);
        }

        #[test]
        fn test_from_seconds_clamps_above_entry_max() {
            let buffer = DigitBuffer::from_seconds(u32::MAX);
            assert_eq!(buffer.total_seconds(), MAX_ENTRY_SECONDS);
        }

        #[test]
        fn test_from_seconds_round_trip_whole_range() {
            for s in 0..=MAX_ENTRY_SECONDS {
                let buffer = DigitBuffer::from_seconds(s);
                assert_eq!(buffer.total_seconds(), s, "round trip failed for {}", s);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Parse Tests
    // ------------------------------------------------------------------------

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_keypad_digits() {
            let buffer = DigitBuffer::parse("130").unwrap();
            assert_eq!(buffer.display_text(), "00 : 01 : 30");
        }

        #[test]
        fn test_parse_six_digits() {
            let buffer: DigitBuffer = "013000".parse().unwrap();
            assert_eq!(buffer.total_seconds(), 3600 + 30 * 60);
        }

        #[test]
        fn test_parse_colon_minutes_seconds() {
            let buffer = DigitBuffer::parse("5:07").unwrap();
            assert_eq!(buffer.display_text(), "00 : 05 : 07");
        }

        #[test]
        fn test_parse_colon_full() {
            let buffer = DigitBuffer::parse("1:02:03").unwrap();
            assert_eq!(buffer.digits(), [0, 1, 0, 2, 0, 3]);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(DigitBuffer::parse("").is_err());
            assert!(DigitBuffer::parse("12a").is_err());
            assert!(DigitBuffer::parse("1234567").is_err());
            assert!(DigitBuffer::parse("1:2:3:4").is_err());
            assert!(DigitBuffer::parse("1::3").is_err());
            assert!(DigitBuffer::parse("100:00").is_err());
        }
    }
}
