//! Tier-list document model.
//!
//! A `TierBoard` is one full snapshot of the editable tier list: the
//! ordered tiers with their items, plus the bank of items not yet ranked.
//! Boards are plain values. Edits in the `edit` submodule build a new
//! board rather than changing one in place, so any board already handed
//! to the history stays as it was.

mod edit;

use std::fmt;

use serde::{Deserialize, Serialize};

use musicbucket_config::{HexColor, TierPreset};

pub use edit::{Edit, EditError};

/// Opaque reference to a rankable item (track, album, or artist id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(pub String);

impl ItemRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier of a tier within one board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub String);

impl TierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id for a tier added during editing.
    pub fn generate() -> Self {
        Self(format!("tier-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A labeled, colored, ranked bucket of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub label: String,
    pub color: HexColor,
    /// Position from the top, 0 = best. Kept equal to the tier's index.
    pub rank: u32,
    pub items: Vec<ItemRef>,
}

impl Tier {
    pub fn new(id: impl Into<TierId>, label: impl Into<String>, color: HexColor) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color,
            rank: 0,
            items: Vec::new(),
        }
    }

    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemRef>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }
}

/// Where an item sits on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Bank,
    Tier(TierId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Bank => f.write_str("bank"),
            Location::Tier(id) => write!(f, "tier {id}"),
        }
    }
}

/// One full snapshot of the tier list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierBoard {
    /// Tiers, top first.
    pub tiers: Vec<Tier>,
    /// Items not yet placed in any tier.
    pub bank_items: Vec<ItemRef>,
}

impl TierBoard {
    /// A board with no tiers and an empty bank.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a board from tiers (top first) and bank items.
    ///
    /// Ranks are re-derived from tier order. Uniqueness is not checked;
    /// call `validate` on boards built from outside input.
    pub fn new<I, T>(tiers: Vec<Tier>, bank: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemRef>,
    {
        let mut board = Self {
            tiers,
            bank_items: bank.into_iter().map(Into::into).collect(),
        };
        board.rerank();
        board
    }

    /// Builds an unranked board: one empty tier per preset and every item
    /// in the bank. Tier ids are the preset labels.
    pub fn from_presets<I, T>(presets: &[TierPreset], items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemRef>,
    {
        let tiers = presets
            .iter()
            .map(|p| Tier::new(p.label.as_str(), p.label.as_str(), p.color))
            .collect();
        Self::new(tiers, items)
    }

    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| &t.id == id)
    }

    pub(crate) fn tier_index(&self, id: &TierId) -> Option<usize> {
        self.tiers.iter().position(|t| &t.id == id)
    }

    /// Finds which tier (or the bank) holds `item`.
    pub fn locate(&self, item: &ItemRef) -> Option<Location> {
        if self.bank_items.contains(item) {
            return Some(Location::Bank);
        }
        self.tiers
            .iter()
            .find(|t| t.items.contains(item))
            .map(|t| Location::Tier(t.id.clone()))
    }

    /// Total items on the board, ranked or not.
    pub fn item_count(&self) -> usize {
        self.bank_items.len() + self.tiers.iter().map(|t| t.items.len()).sum::<usize>()
    }

    /// True when no item has been placed in a tier yet.
    pub fn is_unranked(&self) -> bool {
        self.tiers.iter().all(|t| t.items.is_empty())
    }

    /// Sets each tier's rank to its index.
    pub(crate) fn rerank(&mut self) {
        for (i, tier) in self.tiers.iter_mut().enumerate() {
            tier.rank = i as u32;
        }
    }
}

impl fmt::Display for TierBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .tiers
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        for tier in &self.tiers {
            write!(f, "{:<width$} {} |", tier.label, tier.color)?;
            for item in &tier.items {
                write!(f, " {item}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{:<width$} {:7} |", "bank", "")?;
        for item in &self.bank_items {
            write!(f, " {item}")?;
        }
        writeln!(f)
    }
}
