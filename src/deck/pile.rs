//! Pile choices

use super::DeckError;
use std::fmt;
use std::str::FromStr;

/// The pile a user says holds their card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileChoice {
    First,
    Second,
    Third,
}

impl PileChoice {
    pub const ALL: [PileChoice; 3] = [PileChoice::First, PileChoice::Second, PileChoice::Third];

    pub fn from_number(number: usize) -> Result<Self, DeckError> {
        match number {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            other => Err(DeckError::InvalidPile(other.to_string())),
        }
    }

    /// 1-based pile number as shown to users
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// 0-based pile index into the deck
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Button payload for this pile
    pub fn payload(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
        }
    }
}

impl FromStr for PileChoice {
    type Err = DeckError;

    /// Accepts only the literal payload tokens `1`, `2` and `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::First),
            "2" => Ok(Self::Second),
            "3" => Ok(Self::Third),
            other => Err(DeckError::InvalidPile(other.to_string())),
        }
    }
}

impl fmt::Display for PileChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
