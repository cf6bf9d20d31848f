//! Search and filter criteria for the chat list.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatConfig, ChatItem};

/// Active view filters. All criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatFilter {
    /// Case-insensitive substring matched against name and description.
    #[serde(default)]
    pub query: String,
    /// Only chats whose effective category equals this one.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl ChatFilter {
    pub fn matches(&self, chat: &ChatItem, config: &ChatConfig) -> bool {
        if !self.query.is_empty() {
            let query = self.query.to_lowercase();
            if !chat.name.to_lowercase().contains(&query)
                && !chat.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if config.effective_category(chat) != Some(category.as_str()) {
                return false;
            }
        }

        !self.favorites_only || chat.favorite
    }

    /// Filtered view of the config, in config order.
    pub fn apply(&self, config: &ChatConfig) -> Vec<ChatItem> {
        config
            .chats
            .iter()
            .filter(|chat| self.matches(chat, config))
            .cloned()
            .collect()
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.category.is_some() || self.favorites_only
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Message shown when the filtered view is empty. The search query takes
    /// precedence, then the favorites toggle, then the category.
    pub fn empty_message(&self) -> String {
        if !self.query.is_empty() {
            return format!("No chats match \"{}\"", self.query);
        }
        if self.favorites_only {
            return "No favorite chats yet".to_string();
        }
        if let Some(category) = &self.category {
            return format!("No chats in category \"{category}\"");
        }
        "No chats available".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::default_config;

    #[test]
    fn test_empty_filter_matches_everything() {
        let config = default_config();
        let filter = ChatFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&config).len(), config.chats.len());
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_and_description() {
        let config = default_config();
        let by_name = ChatFilter {
            query: "CODE".to_string(),
            ..Default::default()
        };
        let names: Vec<String> = by_name.apply(&config).into_iter().map(|c| c.name).collect();
        assert!(names.contains(&"Code Assistant".to_string()));

        let by_description = ChatFilter {
            query: "visualiz".to_string(),
            ..Default::default()
        };
        let hits = by_description.apply(&config);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "4");
    }

    #[test]
    fn test_category_and_favorites_combine() {
        let config = default_config();
        let filter = ChatFilter {
            query: String::new(),
            category: Some("Content Creation".to_string()),
            favorites_only: true,
        };
        let hits = filter.apply(&config);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");

        let filter = ChatFilter {
            category: Some("Education".to_string()),
            favorites_only: true,
            ..Default::default()
        };
        assert!(filter.apply(&config).is_empty());
    }

    #[test]
    fn test_dangling_category_never_matches_category_filter() {
        let mut config = default_config();
        config.chats[1].category = Some("Removed".to_string());
        let filter = ChatFilter {
            category: Some("Removed".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&config).is_empty());
    }

    #[test]
    fn test_empty_message_priority() {
        let mut filter = ChatFilter {
            query: "zzz".to_string(),
            category: Some("Tools".to_string()),
            favorites_only: true,
        };
        assert_eq!(filter.empty_message(), "No chats match \"zzz\"");
        filter.query.clear();
        assert_eq!(filter.empty_message(), "No favorite chats yet");
        filter.favorites_only = false;
        assert_eq!(filter.empty_message(), "No chats in category \"Tools\"");
        filter.reset();
        assert_eq!(filter.empty_message(), "No chats available");
    }
}
