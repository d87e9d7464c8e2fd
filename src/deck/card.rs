//! Card references

use std::fmt;
use std::sync::Arc;

/// Opaque reference to a card image: a local path, a URL or a Telegram file id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(Arc<str>);

impl Card {
    pub fn new(reference: impl Into<Arc<str>>) -> Self {
        Self(reference.into())
    }

    pub fn reference(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Card {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for Card {
    fn from(reference: String) -> Self {
        Self::new(reference)
    }
}
