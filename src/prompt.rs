//! Prompt construction for the restaurant assistant.
//!
//! Every prompt embeds the menu serialized as JSON so the model answers
//! against the actual catalogue instead of inventing dishes.

use crate::store::MenuItem;

/// Free-form ordering assistant prompt. The reply is returned to the
/// client verbatim.
pub fn ordering_prompt(user_text: &str, menu: &[MenuItem]) -> String {
    format!(
        "You are an AI assistant for a restaurant. The user says: \"{user_text}\". \
         Here's our menu: {menu}. Please help the user order by suggesting items, \
         answering questions about the menu, or assisting with their order. If they \
         want to order, confirm the items and total price.",
        menu = menu_json(menu),
    )
}

/// Recommendation prompt whose reply is a numbered list with dish names in
/// bold, the shape the name-based reconciler parses.
pub fn dish_list_prompt(user_text: &str, menu: &[MenuItem]) -> String {
    format!(
        "You are a food ordering chatbot. The user's message is: \"{user_text}\". \
         Here's the menu: {menu}. Recommend dishes based on the user's message and \
         the available menu items. Format your response as a numbered list with the \
         recommended dishes in bold, including their prices.",
        menu = menu_json(menu),
    )
}

/// Recommendation prompt whose reply is a bare JSON array of menu item ids,
/// the shape the ID-based reconciler parses.
pub fn id_selection_prompt(user_text: &str, menu: &[MenuItem]) -> String {
    format!(
        "You are an AI assistant for a restaurant. The user says: \"{user_text}\". \
         Here's our menu: {menu}. Please recommend suitable menu items based on the \
         user's request. Return only the IDs of the recommended items as a JSON \
         array. Do not include any additional text or formatting in your response, \
         just the JSON array.",
        menu = menu_json(menu),
    )
}

fn menu_json(menu: &[MenuItem]) -> String {
    serde_json::to_string(menu).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Vec<MenuItem> {
        vec![MenuItem {
            id: 7,
            title: "Veggie Pizza".into(),
            category: "Mains".into(),
            description: "Tomato and basil".into(),
            price: 10.5,
        }]
    }

    #[test]
    fn test_ordering_prompt_embeds_user_text_and_menu() {
        let prompt = ordering_prompt("two pizzas please", &sample_menu());
        assert!(prompt.contains("\"two pizzas please\""));
        assert!(prompt.contains("Veggie Pizza"));
        assert!(prompt.contains("\"id\":7"));
    }

    #[test]
    fn test_dish_list_prompt_asks_for_numbered_bold_list() {
        let prompt = dish_list_prompt("something vegetarian", &sample_menu());
        assert!(prompt.contains("numbered list"));
        assert!(prompt.contains("bold"));
        assert!(prompt.contains("something vegetarian"));
    }

    #[test]
    fn test_id_selection_prompt_asks_for_json_array_only() {
        let prompt = id_selection_prompt("light lunch", &sample_menu());
        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("Return only the IDs"));
    }

    #[test]
    fn test_empty_menu_serializes_as_empty_array() {
        let prompt = ordering_prompt("hi", &[]);
        assert!(prompt.contains("Here's our menu: []."));
    }
}
