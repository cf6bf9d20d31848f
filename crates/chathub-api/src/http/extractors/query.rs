//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use chathub_types::filter::ChatFilter;

/// Query parameters for the chat list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ChatListQuery {
    /// Case-insensitive search over name and description.
    #[serde(default)]
    pub q: String,
    /// Only chats in this category.
    pub category: Option<String>,
    /// Only favorites.
    #[serde(default)]
    pub favorites: bool,
}

impl ChatListQuery {
    pub fn into_filter(self) -> ChatFilter {
        ChatFilter {
            query: self.q,
            category: self.category.filter(|c| !c.trim().is_empty()),
            favorites_only: self.favorites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_category_is_no_filter() {
        let query = ChatListQuery {
            q: "code".to_string(),
            category: Some(" ".to_string()),
            favorites: true,
        };
        let filter = query.into_filter();
        assert_eq!(filter.query, "code");
        assert!(filter.category.is_none());
        assert!(filter.favorites_only);
    }
}
