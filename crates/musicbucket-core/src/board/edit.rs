//! Board edits. Each edit turns one snapshot into the next.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use musicbucket_config::HexColor;

use super::{ItemRef, Location, Tier, TierBoard, TierId};

/// Errors raised when an edit does not fit the board it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("unknown tier: {0}")]
    UnknownTier(TierId),

    #[error("unknown item: {0}")]
    UnknownItem(ItemRef),

    #[error("item already on the board: {item} (in {location})")]
    DuplicateItem { item: ItemRef, location: Location },

    #[error("tier id already in use: {0}")]
    DuplicateTier(TierId),

    #[error("tier label must not be empty")]
    EmptyLabel,
}

/// A single user edit to the tier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// Move an item (from anywhere) to `to`, at `index` or at the end.
    MoveItem {
        item: ItemRef,
        to: Location,
        index: Option<usize>,
    },
    /// Put a new item at the end of the bank.
    AddItem { item: ItemRef },
    /// Take an item off the board entirely.
    RemoveItem { item: ItemRef },
    RenameTier { tier: TierId, label: String },
    RecolorTier { tier: TierId, color: HexColor },
    /// Append a tier at the bottom. `id: None` generates one.
    AddTier {
        id: Option<TierId>,
        label: String,
        color: HexColor,
    },
    /// Remove a tier; its items go back to the end of the bank.
    RemoveTier { tier: TierId },
    /// Move a tier to `index` (clamped).
    MoveTier { tier: TierId, index: usize },
}

impl TierBoard {
    /// Applies `edit` and returns the resulting board.
    ///
    /// `self` is left untouched, so a failed edit needs no rollback.
    pub fn apply(&self, edit: &Edit) -> Result<TierBoard, EditError> {
        let mut next = self.clone();
        match edit {
            Edit::MoveItem { item, to, index } => {
                let dest_tier = match to {
                    Location::Bank => None,
                    Location::Tier(id) => Some(
                        next.tier_index(id)
                            .ok_or_else(|| EditError::UnknownTier(id.clone()))?,
                    ),
                };
                next.take_item(item)?;
                let dest = match dest_tier {
                    Some(i) => &mut next.tiers[i].items,
                    None => &mut next.bank_items,
                };
                let at = index.unwrap_or(dest.len()).min(dest.len());
                dest.insert(at, item.clone());
            }
            Edit::AddItem { item } => {
                if let Some(location) = next.locate(item) {
                    return Err(EditError::DuplicateItem {
                        item: item.clone(),
                        location,
                    });
                }
                next.bank_items.push(item.clone());
            }
            Edit::RemoveItem { item } => {
                next.take_item(item)?;
            }
            Edit::RenameTier { tier, label } => {
                let label = checked_label(label)?;
                next.tier_mut(tier)?.label = label;
            }
            Edit::RecolorTier { tier, color } => {
                next.tier_mut(tier)?.color = *color;
            }
            Edit::AddTier { id, label, color } => {
                let label = checked_label(label)?;
                let id = id.clone().unwrap_or_else(TierId::generate);
                if next.tier_index(&id).is_some() {
                    return Err(EditError::DuplicateTier(id));
                }
                next.tiers.push(Tier::new(id, label, *color));
                next.rerank();
            }
            Edit::RemoveTier { tier } => {
                let i = next
                    .tier_index(tier)
                    .ok_or_else(|| EditError::UnknownTier(tier.clone()))?;
                let removed = next.tiers.remove(i);
                next.bank_items.extend(removed.items);
                next.rerank();
            }
            Edit::MoveTier { tier, index } => {
                let i = next
                    .tier_index(tier)
                    .ok_or_else(|| EditError::UnknownTier(tier.clone()))?;
                let moved = next.tiers.remove(i);
                let at = (*index).min(next.tiers.len());
                next.tiers.insert(at, moved);
                next.rerank();
            }
        }
        Ok(next)
    }

    /// Checks the rules every edit keeps: tier ids are unique, labels are
    /// not blank, and each item sits on the board exactly once.
    ///
    /// Boards produced by `apply` always pass. Boards built from outside
    /// input (`new`, `from_presets`, deserialized JSON) are not checked
    /// until this is called.
    pub fn validate(&self) -> Result<(), EditError> {
        let mut tier_ids = HashSet::with_capacity(self.tiers.len());
        let mut seen: HashMap<&ItemRef, Location> = HashMap::new();

        for tier in &self.tiers {
            if !tier_ids.insert(&tier.id) {
                return Err(EditError::DuplicateTier(tier.id.clone()));
            }
            if tier.label.trim().is_empty() {
                return Err(EditError::EmptyLabel);
            }
            for item in &tier.items {
                if let Some(location) = seen.insert(item, Location::Tier(tier.id.clone())) {
                    return Err(EditError::DuplicateItem {
                        item: item.clone(),
                        location,
                    });
                }
            }
        }
        for item in &self.bank_items {
            if let Some(location) = seen.insert(item, Location::Bank) {
                return Err(EditError::DuplicateItem {
                    item: item.clone(),
                    location,
                });
            }
        }
        Ok(())
    }

    fn tier_mut(&mut self, id: &TierId) -> Result<&mut Tier, EditError> {
        self.tiers
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| EditError::UnknownTier(id.clone()))
    }

    /// Removes `item` from the bank or whichever tier holds it.
    fn take_item(&mut self, item: &ItemRef) -> Result<(), EditError> {
        if let Some(i) = self.bank_items.iter().position(|x| x == item) {
            self.bank_items.remove(i);
            return Ok(());
        }
        for tier in &mut self.tiers {
            if let Some(i) = tier.items.iter().position(|x| x == item) {
                tier.items.remove(i);
                return Ok(());
            }
        }
        Err(EditError::UnknownItem(item.clone()))
    }
}

fn checked_label(label: &str) -> Result<String, EditError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(EditError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}
