use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ItemId, ShoppingListItem};

/// Flip the completed state of the item with `id`, replacing it in place.
pub fn run(items: &mut [ShoppingListItem], id: &ItemId, now: i64) -> CmdResult {
    let mut result = CmdResult::default();
    let completed_floor = items.iter().filter_map(|i| i.completed_at_timestamp).max();

    let Some(slot) = items.iter_mut().find(|i| &i.id == id) else {
        result.add_message(CmdMessage::warning(format!("No item with id {}", id)));
        return result;
    };

    let replacement = slot.toggled(now, completed_floor);
    *slot = replacement.clone();

    let verb = if replacement.is_completed() {
        "Completed"
    } else {
        "Reopened"
    };
    result.add_message(CmdMessage::success(format!("{}: {}", verb, replacement.name)));
    result.with_affected_items(vec![replacement])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::ItemState;
    use crate::order::order_shopping_list;

    #[test]
    fn completing_moves_item_to_completed_group() {
        let mut items = Vec::new();
        add::run(&mut items, "Coffee", 1_000).unwrap();
        add::run(&mut items, "Tea", 2_000).unwrap();
        let coffee = items[1].id.clone();

        run(&mut items, &coffee, 3_000);

        let ordered = order_shopping_list(&items);
        assert_eq!(ordered[0].name, "Tea");
        assert_eq!(ordered[0].state(), ItemState::Active);
        assert_eq!(ordered[1].name, "Coffee");
        assert_eq!(ordered[1].state(), ItemState::Completed(3_000));
    }

    #[test]
    fn toggling_twice_reactivates_with_fresh_stamp() {
        let mut items = Vec::new();
        add::run(&mut items, "Milk", 10).unwrap();
        let id = items[0].id.clone();

        run(&mut items, &id, 20);
        run(&mut items, &id, 30);

        assert_eq!(items[0].state(), ItemState::Active);
        assert_eq!(items[0].last_updated_timestamp, 30);
    }

    #[test]
    fn latest_completion_sorts_first_even_in_same_millisecond() {
        let mut items = Vec::new();
        add::run(&mut items, "A", 1).unwrap();
        add::run(&mut items, "B", 2).unwrap();
        let (b, a) = (items[0].id.clone(), items[1].id.clone());

        run(&mut items, &a, 50);
        run(&mut items, &b, 50);

        let ordered = order_shopping_list(&items);
        assert_eq!(ordered[0].name, "B");
        assert_eq!(ordered[1].name, "A");
    }

    #[test]
    fn unknown_id_leaves_list_unchanged() {
        let mut items = Vec::new();
        add::run(&mut items, "Milk", 10).unwrap();
        let before = items.clone();

        let result = run(&mut items, &ItemId::new("nope"), 20);
        assert!(result.affected_items.is_empty());
        assert_eq!(items, before);
    }
}
