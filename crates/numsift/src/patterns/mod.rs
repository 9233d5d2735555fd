//! Digit-pattern classifiers.
//!
//! Pure, stateless predicates over digit strings. Every function is total: it
//! accepts any `&str` and never panics, although the interesting domain is the
//! 10-digit [`Token`](crate::Token). Non-digit characters never satisfy a digit
//! relation (sequential, rising, falling) and count as zero in digit sums.
//!
//! # Example
//!
//! ```rust
//! use numsift::patterns::{digit_sum, has_repeating_sequence, is_mirror, single_digit_sum};
//!
//! assert!(is_mirror("1234554321"));
//! assert!(has_repeating_sequence("9877776543", 4));
//! assert_eq!(digit_sum("6112345678"), 43);
//! assert_eq!(single_digit_sum("6112345678"), 7);
//! ```

mod kinds;

pub use kinds::{PatternKind, SpecialKind};

/// Prefix treated as lucky by [`is_fancy_number`].
pub const LUCKY_PREFIX: &str = "786";

/// Triple runs recognised by [`is_fancy_number`]. `000`, `444` and `666` are deliberately absent.
pub const FANCY_TRIPLES: [&str; 7] = ["111", "222", "333", "555", "777", "888", "999"];

/// Length of the window scanned by [`is_sequential`].
pub const SEQUENTIAL_RUN: usize = 4;

fn digit_at(byte: u8) -> Option<u32> {
    (byte as char).to_digit(10)
}

/// True iff the string equals its own character reversal.
pub fn is_mirror(num: &str) -> bool {
    num.chars().eq(num.chars().rev())
}

/// True iff some window of exactly `len` characters repeats its first character `len` times.
///
/// A zero-length run is vacuously present.
pub fn has_repeating_sequence(num: &str, len: usize) -> bool {
    if len == 0 {
        return true;
    }
    num.as_bytes()
        .windows(len)
        .any(|window| window.iter().all(|&b| b == window[0]))
}

/// True iff some 4-character window is a cyclic ascending run (`7890`, `9012` included).
pub fn is_sequential(num: &str) -> bool {
    num.as_bytes().windows(SEQUENTIAL_RUN).any(|window| {
        window.windows(2).all(|pair| match (digit_at(pair[0]), digit_at(pair[1])) {
            (Some(prev), Some(next)) => next == (prev + 1) % 10,
            _ => false,
        })
    })
}

/// True iff the whole string is one block of 2 or 3 characters repeated end to end.
///
/// A block size is only tried when it divides the string length evenly, so on
/// 10-digit tokens only the 2-character form (`6767676767`) can ever match; the
/// 3-character form is unreachable for that length.
pub fn has_xy_pattern(num: &str) -> bool {
    let bytes = num.as_bytes();
    if bytes.len() < 6 {
        return false;
    }

    (2..=3).any(|block| {
        bytes.len() % block == 0 && {
            let head = &bytes[..block];
            bytes.chunks(block).all(|chunk| chunk == head)
        }
    })
}

/// True iff every adjacent digit pair is strictly increasing.
///
/// Over ten decimal digits only `0123456789` qualifies, which is never a token.
pub fn has_rising_digits(num: &str) -> bool {
    num.as_bytes()
        .windows(2)
        .all(|pair| matches!((digit_at(pair[0]), digit_at(pair[1])), (Some(a), Some(b)) if b > a))
}

/// True iff every adjacent digit pair is strictly decreasing.
pub fn has_falling_digits(num: &str) -> bool {
    num.as_bytes()
        .windows(2)
        .all(|pair| matches!((digit_at(pair[0]), digit_at(pair[1])), (Some(a), Some(b)) if b < a))
}

/// True iff `num` ends with `suffix`. The empty suffix always matches.
pub fn ends_with_pattern(num: &str, suffix: &str) -> bool {
    num.ends_with(suffix)
}

/// Heuristic "fancy" test: lucky prefix, a recognised triple, or two adjacent equal pairs (`xxyy`).
pub fn is_fancy_number(num: &str) -> bool {
    if num.starts_with(LUCKY_PREFIX) {
        return true;
    }
    if FANCY_TRIPLES.iter().any(|triple| num.contains(triple)) {
        return true;
    }

    num.as_bytes()
        .windows(4)
        .any(|w| w[0] == w[1] && w[2] == w[3])
}

/// Sum of the decimal digits in `num`.
pub fn digit_sum(num: &str) -> u32 {
    num.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Repeatedly sum the decimal digits of `value` until a single digit remains.
pub fn reduce_to_single_digit(mut value: u64) -> u64 {
    while value > 9 {
        let mut next = 0;
        while value > 0 {
            next += value % 10;
            value /= 10;
        }
        value = next;
    }
    value
}

/// Digit sum of `num` reduced to a single digit (`0..=9`).
pub fn single_digit_sum(num: &str) -> u32 {
    reduce_to_single_digit(u64::from(digit_sum(num))) as u32
}

/// True iff `num` contains every lucky digit and none of the unlucky ones.
///
/// Empty sets impose no constraint.
pub fn matches_digit_preferences<'a, L, U>(num: &str, lucky: L, unlucky: U) -> bool
where
    L: IntoIterator<Item = &'a char>,
    U: IntoIterator<Item = &'a char>,
{
    lucky.into_iter().all(|&digit| num.contains(digit)) && unlucky.into_iter().all(|&digit| !num.contains(digit))
}
