use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    ends_with_pattern, has_falling_digits, has_repeating_sequence, has_rising_digits, has_xy_pattern, is_fancy_number,
    is_mirror, is_sequential,
};
use crate::error::{NumsiftError, Result};

/// Digit pattern selected for the `pattern` filter category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Mirror,
    /// Four equal digits in a row, same check as `Tetra`.
    Repeating,
    Sequential,
    /// Ends with the configured suffix.
    Ending,
    Penta,
    Hexa,
    Tetra,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Mirror,
        PatternKind::Repeating,
        PatternKind::Sequential,
        PatternKind::Ending,
        PatternKind::Penta,
        PatternKind::Hexa,
        PatternKind::Tetra,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PatternKind::Mirror => "mirror",
            PatternKind::Repeating => "repeating",
            PatternKind::Sequential => "sequential",
            PatternKind::Ending => "ending",
            PatternKind::Penta => "penta",
            PatternKind::Hexa => "hexa",
            PatternKind::Tetra => "tetra",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PatternKind::Mirror => "Reads the same backwards",
            PatternKind::Repeating => "Four same digits in a row (7777, 8888)",
            PatternKind::Sequential => "Four ascending digits (1234, 6789)",
            PatternKind::Ending => "Ends with a chosen suffix (xxx0000)",
            PatternKind::Penta => "Five same digits",
            PatternKind::Hexa => "Six same digits",
            PatternKind::Tetra => "Four same digits",
        }
    }

    /// Evaluate this pattern. `ending` is only consulted for [`PatternKind::Ending`].
    pub fn matches(self, num: &str, ending: &str) -> bool {
        match self {
            PatternKind::Mirror => is_mirror(num),
            PatternKind::Repeating | PatternKind::Tetra => has_repeating_sequence(num, 4),
            PatternKind::Sequential => is_sequential(num),
            PatternKind::Ending => ends_with_pattern(num, ending),
            PatternKind::Penta => has_repeating_sequence(num, 5),
            PatternKind::Hexa => has_repeating_sequence(num, 6),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PatternKind {
    type Err = NumsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| NumsiftError::validation(format!("Unknown pattern '{}'", s)))
    }
}

/// Number type selected for the `special` filter category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    #[default]
    Fancy,
    Xy,
    Rising,
    Falling,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 4] = [
        SpecialKind::Fancy,
        SpecialKind::Xy,
        SpecialKind::Rising,
        SpecialKind::Falling,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SpecialKind::Fancy => "fancy",
            SpecialKind::Xy => "xy",
            SpecialKind::Rising => "rising",
            SpecialKind::Falling => "falling",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SpecialKind::Fancy => "Special combinations like 786xxx, 111x",
            SpecialKind::Xy => "Numbers following an AB-AB-AB pattern",
            SpecialKind::Rising => "Digits increasing throughout",
            SpecialKind::Falling => "Digits decreasing throughout",
        }
    }

    pub fn matches(self, num: &str) -> bool {
        match self {
            SpecialKind::Fancy => is_fancy_number(num),
            SpecialKind::Xy => has_xy_pattern(num),
            SpecialKind::Rising => has_rising_digits(num),
            SpecialKind::Falling => has_falling_digits(num),
        }
    }
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SpecialKind {
    type Err = NumsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        SpecialKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| NumsiftError::validation(format!("Unknown special type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_ids_round_trip_through_from_str() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.id().parse::<PatternKind>().unwrap(), kind);
        }
        assert_eq!(" Mirror ".parse::<PatternKind>().unwrap(), PatternKind::Mirror);
        assert!("spiral".parse::<PatternKind>().is_err());
    }

    #[test]
    fn test_pattern_dispatch() {
        assert!(PatternKind::Mirror.matches("1234554321", ""));
        assert!(PatternKind::Repeating.matches("9777712345", ""));
        assert!(PatternKind::Tetra.matches("9777712345", ""));
        assert!(!PatternKind::Penta.matches("9777712345", ""));
        assert!(PatternKind::Hexa.matches("9777777345", ""));
        assert!(PatternKind::Sequential.matches("9000456700", ""));
    }

    #[test]
    fn test_ending_uses_suffix_only_for_ending() {
        assert!(PatternKind::Ending.matches("9876540000", "0000"));
        assert!(!PatternKind::Ending.matches("9876540000", "1234"));
        assert!(!PatternKind::Mirror.matches("9876540000", "0000"));
    }

    #[test]
    fn test_special_dispatch() {
        assert!(SpecialKind::Fancy.matches("7861234509"));
        assert!(SpecialKind::Xy.matches("6767676767"));
        assert!(!SpecialKind::Rising.matches("6789012345"));
        assert!(SpecialKind::Falling.matches("9876543210"));
        assert_eq!("XY".parse::<SpecialKind>().unwrap(), SpecialKind::Xy);
        assert!("lucky".parse::<SpecialKind>().is_err());
    }

    #[test]
    fn test_kinds_serialize_as_ids() {
        assert_eq!(serde_json::to_string(&PatternKind::Penta).unwrap(), "\"penta\"");
        assert_eq!(serde_json::to_string(&SpecialKind::Xy).unwrap(), "\"xy\"");
        let kind: SpecialKind = serde_json::from_str("\"falling\"").unwrap();
        assert_eq!(kind, SpecialKind::Falling);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PatternKind::default(), PatternKind::Mirror);
        assert_eq!(SpecialKind::default(), SpecialKind::Fancy);
    }
}
