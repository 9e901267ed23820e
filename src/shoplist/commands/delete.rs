use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ItemId, ShoppingListItem};

/// Remove the item with `id`. An unknown id leaves the list as it was.
pub fn run(items: &mut Vec<ShoppingListItem>, id: &ItemId) -> CmdResult {
    let mut result = CmdResult::default();

    match items.iter().position(|i| &i.id == id) {
        Some(pos) => {
            let removed = items.remove(pos);
            result.add_message(CmdMessage::success(format!("Deleted: {}", removed.name)));
            result.affected_items.push(removed);
        }
        None => {
            result.add_message(CmdMessage::info(format!("No item with id {}", id)));
        }
    }

    result
}
