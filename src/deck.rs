//! Deck engine for the 21-card trick
//!
//! Owns the 21 cards, derives the three piles and applies the
//! deal-by-threes regroup that walks the chosen card to position 10.

mod card;
mod catalog;
mod error;
mod pile;

#[cfg(test)]
mod proptests;

pub use card::Card;
pub use catalog::CardCatalog;
pub use error::DeckError;
pub use pile::PileChoice;

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 21;
pub const PILE_SIZE: usize = 7;
pub const PILE_COUNT: usize = 3;

/// Where the chosen card sits after three consistent regroups
pub const REVEAL_POSITION: usize = 10;

/// An ordered deck of exactly 21 distinct cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck in the given (canonical) order without shuffling.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() > DECK_SIZE {
            return Err(DeckError::TooManyCards { count: cards.len() });
        }
        let distinct = cards.iter().collect::<HashSet<_>>().len();
        if distinct < DECK_SIZE {
            return Err(DeckError::NotEnoughCards { distinct });
        }
        Ok(Self { cards })
    }

    /// Build a deck and shuffle it, ready for a first round.
    pub fn initialize<R: Rng + ?Sized>(cards: Vec<Card>, rng: &mut R) -> Result<Self, DeckError> {
        let mut deck = Self::new(cards)?;
        deck.shuffle(rng);
        Ok(deck)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of one pile. Numbers outside 1..=3 are rejected by
    /// [`PileChoice::from_number`] before they get here.
    pub fn pile(&self, choice: PileChoice) -> &[Card] {
        let start = choice.index() * PILE_SIZE;
        &self.cards[start..start + PILE_SIZE]
    }

    /// Put the chosen pile in the middle, then re-deal the deck by threes.
    pub fn regroup(&mut self, choice: PileChoice) {
        let first = self.pile(PileChoice::First);
        let second = self.pile(PileChoice::Second);
        let third = self.pile(PileChoice::Third);

        let stacked = match choice {
            PileChoice::First => [second, first, third].concat(),
            PileChoice::Second => [first, second, third].concat(),
            PileChoice::Third => [first, third, second].concat(),
        };

        let mut dealt = Vec::with_capacity(DECK_SIZE);
        for pile in 0..PILE_COUNT {
            dealt.extend(stacked.iter().skip(pile).step_by(PILE_COUNT).cloned());
        }
        self.cards = dealt;
    }

    /// The card at position 10. Only meaningful after exactly three regroups.
    pub fn reveal_card(&self) -> &Card {
        &self.cards[REVEAL_POSITION]
    }

    /// Pile currently holding `card`, if it is in the deck
    pub fn pile_containing(&self, card: &Card) -> Option<PileChoice> {
        let position = self.cards.iter().position(|c| c == card)?;
        PileChoice::from_number(position / PILE_SIZE + 1).ok()
    }
}
