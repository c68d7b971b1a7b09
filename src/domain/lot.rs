//! Purchase lots and the ordered, never-empty lot book.

use serde::{Deserialize, Serialize};

/// Number of blank lots a fresh (or cleared) book starts with.
pub const DEFAULT_LOT_COUNT: usize = 3;

/// One purchase entry. Fields hold raw form input and are parsed lazily.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub price: String,
    pub quantity: String,
}

impl Lot {
    pub fn new(price: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }
}

/// Editable field of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotField {
    Price,
    Quantity,
}

/// Ordered list of lots that always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LotBook {
    lots: Vec<Lot>,
}

impl LotBook {
    /// A book of [`DEFAULT_LOT_COUNT`] blank lots.
    pub fn new() -> Self {
        Self {
            lots: vec![Lot::blank(); DEFAULT_LOT_COUNT],
        }
    }

    /// Build a book from stored lots. An empty list yields the default book.
    pub fn from_lots(lots: Vec<Lot>) -> Self {
        if lots.is_empty() {
            Self::new()
        } else {
            Self { lots }
        }
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Never true for a book built through this API.
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Lot> {
        self.lots.get(index)
    }

    /// Overwrite one field of the lot at `index`.
    ///
    /// Returns false when `index` is out of range.
    pub fn set_field(&mut self, index: usize, field: LotField, value: String) -> bool {
        let Some(lot) = self.lots.get_mut(index) else {
            return false;
        };
        match field {
            LotField::Price => lot.price = value,
            LotField::Quantity => lot.quantity = value,
        }
        true
    }

    /// Append a blank lot.
    pub fn push_blank(&mut self) {
        self.lots.push(Lot::blank());
    }

    /// Remove the lot at `index`.
    ///
    /// Returns the removed lot, or `None` when the index is out of range or
    /// only one lot remains (the book never becomes empty).
    pub fn remove(&mut self, index: usize) -> Option<Lot> {
        if self.lots.len() <= 1 || index >= self.lots.len() {
            return None;
        }
        Some(self.lots.remove(index))
    }

    /// Reset to the default blank book.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for LotBook {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for LotBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Lot>::deserialize(deserializer).map(LotBook::from_lots)
    }
}
