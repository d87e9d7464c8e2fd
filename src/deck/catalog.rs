//! Card catalog: the canonical 21 cards a deck is built from

use super::{Card, Deck, DeckError, DECK_SIZE};
use rand::Rng;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Validated set of 21 distinct cards in canonical order
#[derive(Debug, Clone)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        let deck = Deck::new(cards)?;
        Ok(Self { cards: deck.cards })
    }

    /// Cards named `{prefix}1{extension}` through `{prefix}21{extension}`.
    pub fn numbered(prefix: &str, extension: &str) -> Self {
        let cards = (1..=DECK_SIZE)
            .map(|i| Card::new(format!("{prefix}{i}{extension}")))
            .collect();
        Self { cards }
    }

    /// Image files in `dir`, numeric stems first in numeric order, then by name.
    pub fn from_dir(dir: &Path) -> Result<Self, DeckError> {
        let io_error = |source| DeckError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut images: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_image(&path) {
                images.push(path);
            }
        }

        if images.len() < DECK_SIZE {
            return Err(DeckError::NotEnoughCards {
                distinct: images.len(),
            });
        }

        images.sort_by(|a, b| canonical_order(a, b));
        images.truncate(DECK_SIZE);

        tracing::debug!(dir = %dir.display(), "Loaded card images");
        Self::new(
            images
                .into_iter()
                .map(|path| Card::new(path.to_string_lossy().into_owned()))
                .collect(),
        )
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// A freshly shuffled deck for a new session
    pub fn shuffled_deck<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deck, DeckError> {
        Deck::initialize(self.cards.clone(), rng)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn numeric_stem(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

fn canonical_order(a: &Path, b: &Path) -> Ordering {
    match (numeric_stem(a), numeric_stem(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
