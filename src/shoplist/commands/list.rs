use crate::commands::CmdResult;
use crate::model::ShoppingListItem;
use crate::order::index_items;

pub fn run(items: &[ShoppingListItem], show_completed: bool) -> CmdResult {
    let listed = index_items(items)
        .into_iter()
        .filter(|di| show_completed || !di.item.is_completed())
        .collect();
    CmdResult::default().with_listed_items(listed)
}
