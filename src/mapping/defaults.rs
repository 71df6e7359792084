//! Literal values the site builder seeds into custom fields. A field still
//! holding one of these was never edited and counts as empty.

use serde_json::Value;

use super::accessor::get_str;

pub const ESSENCE_ITEM_TITLE: &str = "특징 타이틀";
pub const ESSENCE_ITEM_DESCRIPTION: &str = "특징 설명";

/// Seeded title/description pair for one repeated custom item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDefault {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ESSENCE_ITEM: ItemDefault = ItemDefault {
    title: ESSENCE_ITEM_TITLE,
    description: ESSENCE_ITEM_DESCRIPTION,
};

impl ItemDefault {
    /// True when the item's text is exactly the seeded pair. Blank fields
    /// count as seeded too.
    pub fn matches(&self, item: &Value) -> bool {
        let title = get_str(item, "title").map(str::trim);
        let description = get_str(item, "description").map(str::trim);
        title.map_or(true, |t| t == self.title)
            && description.map_or(true, |d| d == self.description)
    }
}

/// Whether a custom collection has any owner-authored content.
///
/// Missing, empty, and all-default collections are all "no content".
pub fn has_custom_content(items: Option<&Value>, default: ItemDefault) -> bool {
    items
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().any(|item| !default.matches(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_default_items_are_no_content() {
        let items = json!([
            { "title": "특징 타이틀", "description": "특징 설명" },
            { "title": "특징 타이틀", "description": "특징 설명" }
        ]);
        assert!(!has_custom_content(Some(&items), ESSENCE_ITEM));
    }

    #[test]
    fn one_edited_item_is_content() {
        let items = json!([
            { "title": "특징 타이틀", "description": "특징 설명" },
            { "title": "오션뷰 객실", "description": "특징 설명" }
        ]);
        assert!(has_custom_content(Some(&items), ESSENCE_ITEM));
    }

    #[test]
    fn missing_and_empty_collections_are_no_content() {
        assert!(!has_custom_content(None, ESSENCE_ITEM));
        assert!(!has_custom_content(Some(&json!([])), ESSENCE_ITEM));
        assert!(!has_custom_content(Some(&json!("nope")), ESSENCE_ITEM));
    }

    #[test]
    fn blank_fields_count_as_seeded() {
        assert!(ESSENCE_ITEM.matches(&json!({ "title": "", "description": "특징 설명" })));
        assert!(!ESSENCE_ITEM.matches(&json!({ "title": "", "description": "바다 전망" })));
    }
}
