use crate::error::{Result, ShopError};
use crate::model::{ItemId, ShoppingListItem};
use crate::order::{index_items, ItemSelector};
use std::collections::HashSet;

/// Map selectors to item ids against the current display order.
///
/// Each selector must match at least one item. A name selector matches every
/// item whose trimmed name equals it, ignoring case. An item picked by more
/// than one selector appears once, at its first position.
pub fn resolve_selectors(
    items: &[ShoppingListItem],
    selectors: &[ItemSelector],
) -> Result<Vec<(String, ItemId)>> {
    let indexed = index_items(items);
    let mut resolved = Vec::new();
    let mut seen = HashSet::new();

    for selector in selectors {
        let matches: Vec<_> = match selector {
            ItemSelector::Index(idx) => indexed.iter().filter(|di| &di.index == idx).collect(),
            ItemSelector::Name(name) => {
                let wanted = name.trim().to_lowercase();
                indexed
                    .iter()
                    .filter(|di| di.item.name.trim().to_lowercase() == wanted)
                    .collect()
            }
        };
        if matches.is_empty() {
            return Err(ShopError::ItemNotFound(selector.to_string()));
        }
        for di in matches {
            if seen.insert(di.item.id.clone()) {
                resolved.push((di.index.to_string(), di.item.id.clone()));
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_items;
    use crate::order::DisplayIndex;

    #[test]
    fn resolves_indexes_in_display_order() {
        // Equal stamps: ids break the tie, so "1" (Coffee) shows first
        let items = seed_items(&["Coffee", "Tea", "Milk"], 5);
        let resolved =
            resolve_selectors(&items, &[ItemSelector::Index(DisplayIndex::Active(2))]).unwrap();
        assert_eq!(resolved, vec![("2".to_string(), ItemId::new("2"))]);
    }

    #[test]
    fn resolves_names_case_insensitively() {
        let items = seed_items(&["Coffee", "Tea"], 5);
        let resolved = resolve_selectors(&items, &[ItemSelector::Name("tea".into())]).unwrap();
        assert_eq!(resolved[0].1, ItemId::new("2"));
    }

    #[test]
    fn overlapping_selectors_resolve_each_item_once() {
        let items = seed_items(&["Coffee", "Tea", "Milk"], 5);
        let selectors = [
            ItemSelector::Index(DisplayIndex::Active(2)),
            ItemSelector::Index(DisplayIndex::Active(1)),
            ItemSelector::Index(DisplayIndex::Active(2)),
            ItemSelector::Name("coffee".into()),
        ];
        let resolved = resolve_selectors(&items, &selectors).unwrap();
        let ids: Vec<_> = resolved.iter().map(|(_, id)| id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let items = seed_items(&["Coffee"], 5);
        let err = resolve_selectors(&items, &[ItemSelector::Index(DisplayIndex::Completed(1))])
            .unwrap_err();
        assert!(matches!(err, ShopError::ItemNotFound(ref s) if s == "c1"));
    }
}
