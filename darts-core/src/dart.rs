//! Dart values and notation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseDartError;

/// Outer bull segment (25 points)
pub const OUTER_BULL: u8 = 25;

/// Double bull segment (50 points)
pub const BULL: u8 = 50;

/// Highest numbered segment on the board
pub const MAX_NUMBER: u8 = 20;

/// A single thrown dart
///
/// `segment` is 0 for a miss, 1-20 for the numbered beds, 25 for the outer
/// bull and 50 for the double bull. Bull values are absolute: the multiplier
/// is ignored for segments 25 and 50.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dart {
    pub segment: u8,
    pub multiplier: u8,
}

impl Dart {
    pub const MISS: Dart = Dart::new(0, 1);

    pub const fn new(segment: u8, multiplier: u8) -> Self {
        Self { segment, multiplier }
    }

    pub const fn single(number: u8) -> Self {
        Self::new(number, 1)
    }

    pub const fn double(number: u8) -> Self {
        Self::new(number, 2)
    }

    pub const fn triple(number: u8) -> Self {
        Self::new(number, 3)
    }

    pub const fn outer_bull() -> Self {
        Self::new(OUTER_BULL, 1)
    }

    pub const fn bull() -> Self {
        Self::new(BULL, 1)
    }

    /// Points scored by this dart. Segments or multipliers that are not on
    /// the board score nothing.
    pub fn value(&self) -> u32 {
        match (self.segment, self.multiplier) {
            (OUTER_BULL, _) => 25,
            (BULL, _) => 50,
            (s, m @ 1..=3) if (1..=MAX_NUMBER).contains(&s) => s as u32 * m as u32,
            _ => 0,
        }
    }

    /// D1-D20 or the double bull
    pub fn is_double(&self) -> bool {
        self.segment == BULL || (self.is_number() && self.multiplier == 2)
    }

    pub fn is_triple(&self) -> bool {
        self.is_number() && self.multiplier == 3
    }

    /// Either bull bed
    pub fn is_bull(&self) -> bool {
        self.segment == OUTER_BULL || self.segment == BULL
    }

    /// Landed in one of the numbered beds 1-20
    pub fn is_number(&self) -> bool {
        (1..=MAX_NUMBER).contains(&self.segment)
    }

    pub fn is_miss(&self) -> bool {
        self.value() == 0
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.segment, self.multiplier) {
            (BULL, _) => write!(f, "Bull"),
            (OUTER_BULL, _) => write!(f, "25"),
            (0, _) => write!(f, "Miss"),
            (s, 2) => write!(f, "D{}", s),
            (s, 3) => write!(f, "T{}", s),
            (s, _) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Dart {
    type Err = ParseDartError;

    /// Accepts `T20`, `D16`, `S5`, `5`, `25`, `Bull`, `DB`, `Miss`
    /// (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        match token.as_str() {
            "" => return Err(ParseDartError::Empty),
            "BULL" | "DB" | "50" => return Ok(Dart::bull()),
            "OB" | "SB" | "25" => return Ok(Dart::outer_bull()),
            "MISS" | "M" | "0" => return Ok(Dart::MISS),
            _ => {}
        }

        let (multiplier, digits) = match token.as_bytes()[0] {
            b'S' => (1, &token[1..]),
            b'D' => (2, &token[1..]),
            b'T' => (3, &token[1..]),
            _ => (1, token.as_str()),
        };

        let number: u8 = digits
            .parse()
            .map_err(|_| ParseDartError::Invalid(s.to_string()))?;
        if !(1..=MAX_NUMBER).contains(&number) {
            return Err(ParseDartError::SegmentOutOfRange(number));
        }
        Ok(Dart::new(number, multiplier))
    }
}

/// Every scoring dart on the board: singles, doubles, triples, then bulls
pub fn all_scoring_darts() -> Vec<Dart> {
    let mut darts = Vec::with_capacity(62);
    for multiplier in 1..=3 {
        for number in 1..=MAX_NUMBER {
            darts.push(Dart::new(number, multiplier));
        }
    }
    darts.push(Dart::outer_bull());
    darts.push(Dart::bull());
    darts
}

/// Space-separated notation, e.g. `T20 T20 Bull`
pub fn describe(darts: &[Dart]) -> String {
    darts
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_board_darts_score_nothing() {
        assert_eq!(Dart::new(21, 1).value(), 0);
        assert_eq!(Dart::new(20, 4).value(), 0);
        assert!(Dart::new(21, 2).is_miss());
        assert!(!Dart::new(21, 2).is_double());
    }

    #[test]
    fn test_values() {
        assert_eq!(Dart::triple(20).value(), 60);
        assert_eq!(Dart::double(16).value(), 32);
        assert_eq!(Dart::single(7).value(), 7);
        assert_eq!(Dart::MISS.value(), 0);
        assert_eq!(Dart::outer_bull().value(), 25);
        assert_eq!(Dart::bull().value(), 50);
        // Bull values ignore the multiplier field
        assert_eq!(Dart::new(25, 3).value(), 25);
        assert_eq!(Dart::new(50, 2).value(), 50);
    }

    #[test]
    fn test_double_classification() {
        assert!(Dart::double(1).is_double());
        assert!(Dart::bull().is_double());
        assert!(!Dart::outer_bull().is_double());
        assert!(!Dart::single(2).is_double());
        assert!(!Dart::new(25, 2).is_double());
        assert!(!Dart::new(0, 2).is_double());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dart::triple(20).to_string(), "T20");
        assert_eq!(Dart::double(8).to_string(), "D8");
        assert_eq!(Dart::single(19).to_string(), "19");
        assert_eq!(Dart::outer_bull().to_string(), "25");
        assert_eq!(Dart::bull().to_string(), "Bull");
        assert_eq!(Dart::MISS.to_string(), "Miss");
    }

    #[test]
    fn test_parse() {
        assert_eq!("T20".parse::<Dart>().unwrap(), Dart::triple(20));
        assert_eq!("d16".parse::<Dart>().unwrap(), Dart::double(16));
        assert_eq!("S5".parse::<Dart>().unwrap(), Dart::single(5));
        assert_eq!("5".parse::<Dart>().unwrap(), Dart::single(5));
        assert_eq!("bull".parse::<Dart>().unwrap(), Dart::bull());
        assert_eq!("25".parse::<Dart>().unwrap(), Dart::outer_bull());
        assert_eq!("miss".parse::<Dart>().unwrap(), Dart::MISS);
        assert!("T21".parse::<Dart>().is_err());
        assert!("X3".parse::<Dart>().is_err());
        assert!("".parse::<Dart>().is_err());
    }

    #[test]
    fn test_all_scoring_darts() {
        let darts = all_scoring_darts();
        assert_eq!(darts.len(), 62);
        assert!(darts.iter().all(|d| d.value() > 0));
    }

    #[test]
    fn test_describe() {
        let darts = [Dart::triple(20), Dart::triple(20), Dart::bull()];
        assert_eq!(describe(&darts), "T20 T20 Bull");
    }
}
