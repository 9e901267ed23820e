use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Caller-assigned identifier of a list item. Unique within one list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completion state of an item, derived from `completed_at_timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Active,
    Completed(i64),
}

/// One entry of the shopping list, stored as part of a JSON array.
///
/// Timestamps are epoch milliseconds. `completed_at_timestamp` is present
/// exactly when the item is completed and is left out of the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_timestamp: Option<i64>,
    pub last_updated_timestamp: i64,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, now: i64) -> Self {
        Self {
            id: ItemId::random(),
            name: name.into(),
            completed_at_timestamp: None,
            last_updated_timestamp: now,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn state(&self) -> ItemState {
        match self.completed_at_timestamp {
            Some(ts) => ItemState::Completed(ts),
            None => ItemState::Active,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at_timestamp.is_some()
    }

    /// Returns the replacement value with the completion state flipped.
    ///
    /// `completed_floor` is the newest completion stamp already in the list,
    /// so a fresh completion always sorts ahead of older ones.
    pub fn toggled(&self, now: i64, completed_floor: Option<i64>) -> Self {
        let completed_at_timestamp = match self.completed_at_timestamp {
            Some(_) => None,
            None => Some(next_timestamp(now, completed_floor)),
        };
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            completed_at_timestamp,
            last_updated_timestamp: next_timestamp(now, Some(self.last_updated_timestamp)),
        }
    }
}

/// Current wall clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A stamp that is at least `now` and strictly after `floor`, except at
/// `i64::MAX` where it stays put.
pub fn next_timestamp(now: i64, floor: Option<i64>) -> i64 {
    match floor {
        Some(f) if f >= now => f.saturating_add(1),
        _ => now,
    }
}

/// The default items shown before any persisted list is loaded.
pub fn seed_items<S: AsRef<str>>(names: &[S], now: i64) -> Vec<ShoppingListItem> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            ShoppingListItem::new(name.as_ref(), now).with_id(ItemId::new((i + 1).to_string()))
        })
        .collect()
}
