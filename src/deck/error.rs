//! Deck error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    /// Fatal: the trick cannot run without 21 distinct cards
    #[error("found {distinct} distinct cards, the trick needs 21")]
    NotEnoughCards { distinct: usize },

    #[error("found {count} cards, the trick needs exactly 21")]
    TooManyCards { count: usize },

    #[error("invalid pile {0:?}, expected 1, 2 or 3")]
    InvalidPile(String),

    #[error("failed to read card directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
