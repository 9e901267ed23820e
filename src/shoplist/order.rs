//! # Display Ordering
//!
//! The list is kept in memory in whatever order mutations left it. Before it is
//! shown, [`order_shopping_list`] derives the display order:
//!
//! 1. Active items first, most recently updated first.
//! 2. Completed items after, most recently completed first.
//!
//! Equal stamps fall back to the item id, so the result depends only on the set
//! of items and never on the order they were passed in.
//!
//! ## Display Indexes
//!
//! Users refer to items by position rather than by id: active items get `1`,
//! `2`, ... and completed items get `c1`, `c2`, ... These are assigned over the
//! ordered list by [`index_items`] and are only stable until the next mutation.

use crate::model::{ItemState, ShoppingListItem};
use std::cmp::Ordering;
use std::str::FromStr;

/// Returns `items` in display order. Never fails; empty in, empty out.
pub fn order_shopping_list(items: &[ShoppingListItem]) -> Vec<ShoppingListItem> {
    let mut ordered = items.to_vec();
    ordered.sort_by(display_cmp);
    ordered
}

fn display_cmp(a: &ShoppingListItem, b: &ShoppingListItem) -> Ordering {
    let by_state = match (a.state(), b.state()) {
        (ItemState::Active, ItemState::Active) => {
            b.last_updated_timestamp.cmp(&a.last_updated_timestamp)
        }
        (ItemState::Active, ItemState::Completed(_)) => Ordering::Less,
        (ItemState::Completed(_), ItemState::Active) => Ordering::Greater,
        (ItemState::Completed(x), ItemState::Completed(y)) => y.cmp(&x),
    };
    by_state.then_with(|| a.id.cmp(&b.id))
}

/// A user-facing index for an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Active(usize),
    Completed(usize),
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayIndex::Active(i) => write!(f, "{}", i),
            DisplayIndex::Completed(i) => write!(f, "c{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('c') {
            if let Ok(n) = rest.parse::<usize>() {
                if n > 0 {
                    return Ok(DisplayIndex::Completed(n));
                }
            }
        }
        if let Ok(n) = s.parse::<usize>() {
            if n > 0 {
                return Ok(DisplayIndex::Active(n));
            }
        }
        Err(format!("Invalid index format: {}", s))
    }
}

/// A user input to select an item, either by its index or by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Index(DisplayIndex),
    Name(String),
}

impl std::fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemSelector::Index(idx) => write!(f, "{}", idx),
            ItemSelector::Name(n) => write!(f, "\"{}\"", n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub item: ShoppingListItem,
    pub index: DisplayIndex,
}

/// Orders `items` for display and assigns each one its index.
pub fn index_items(items: &[ShoppingListItem]) -> Vec<DisplayItem> {
    let mut active_idx = 0;
    let mut completed_idx = 0;

    order_shopping_list(items)
        .into_iter()
        .map(|item| {
            let index = if item.is_completed() {
                completed_idx += 1;
                DisplayIndex::Completed(completed_idx)
            } else {
                active_idx += 1;
                DisplayIndex::Active(active_idx)
            };
            DisplayItem { item, index }
        })
        .collect()
}

/// Parses a single index ("3", "c1") or a range ("2-4", "c1-c3").
///
/// Both ends of a range must be the same kind and start must not exceed end.
/// Whether the indexes exist is checked later, during resolution.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    if let Some((start, end)) = s.split_once('-') {
        if !start.is_empty() {
            let start = DisplayIndex::from_str(start)?;
            let end = DisplayIndex::from_str(end)?;
            return expand_range(start, end);
        }
    }
    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

fn expand_range(start: DisplayIndex, end: DisplayIndex) -> Result<Vec<DisplayIndex>, String> {
    match (&start, &end) {
        (DisplayIndex::Active(s), DisplayIndex::Active(e)) if s <= e => {
            Ok((*s..=*e).map(DisplayIndex::Active).collect())
        }
        (DisplayIndex::Completed(s), DisplayIndex::Completed(e)) if s <= e => {
            Ok((*s..=*e).map(DisplayIndex::Completed).collect())
        }
        (DisplayIndex::Active(_), DisplayIndex::Active(_))
        | (DisplayIndex::Completed(_), DisplayIndex::Completed(_)) => Err(format!(
            "Invalid range: start ({}) must be <= end ({})",
            start, end
        )),
        _ => Err(format!(
            "Invalid range: cannot mix index types ({} and {})",
            start, end
        )),
    }
}

/// Turns raw user arguments into selectors.
///
/// If every argument is an index or range they are used as such; otherwise
/// all arguments are joined into one name.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<ItemSelector> {
    let all_indexes: Result<Vec<Vec<DisplayIndex>>, _> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref()))
        .collect();

    match all_indexes {
        Ok(indexes) if !indexes.is_empty() => indexes
            .into_iter()
            .flatten()
            .map(ItemSelector::Index)
            .collect(),
        _ => {
            let name = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            vec![ItemSelector::Name(name)]
        }
    }
}
