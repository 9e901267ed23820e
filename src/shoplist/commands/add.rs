use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShopError};
use crate::model::{next_timestamp, ShoppingListItem};

/// Put a new active item at the front of the list.
///
/// Blank names are rejected before the list is touched. The new item is
/// stamped after every other item so it always shows first.
pub fn run(items: &mut Vec<ShoppingListItem>, name: &str, now: i64) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ShopError::EmptyName);
    }

    let newest = items.iter().map(|i| i.last_updated_timestamp).max();
    let item = ShoppingListItem::new(name, next_timestamp(now, newest));
    items.insert(0, item.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Added: {}", item.name)));
    Ok(result.with_affected_items(vec![item]))
}
