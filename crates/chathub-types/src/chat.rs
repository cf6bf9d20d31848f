//! Chat directory entries and the configuration aggregate that holds them.
//!
//! `ChatConfig` is the unit of persistence: every backend loads and saves the
//! whole aggregate as one JSON document. Keys are camelCase on the wire so the
//! document stays interchangeable with the HTTP endpoint and exported files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A single externally hosted chat assistant in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatItem {
    /// Unique within a `ChatConfig`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Launch target, opened in a new browser tab.
    pub url: String,
    /// Icon name (e.g. "MessageSquare") or a `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional reference into `ChatConfig::categories`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
}

/// Color scheme stored alongside the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The opposite scheme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme: '{other}'")),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// The whole directory: display settings, chats and the category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    pub title: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub chats: Vec<ChatItem>,
    /// Explicit category list. When absent, categories are derived from the
    /// chats themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ChatConfig {
    /// Check the aggregate invariants. Returns the first duplicated chat id.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.chats.len());
        for chat in &self.chats {
            if !seen.insert(chat.id.as_str()) {
                return Err(chat.id.clone());
            }
        }
        Ok(())
    }

    /// The category list in effect: the explicit list if present, otherwise
    /// the distinct categories used by chats in first-seen order.
    pub fn category_names(&self) -> Vec<String> {
        match &self.categories {
            Some(list) => list.clone(),
            None => {
                let mut names: Vec<String> = Vec::new();
                for category in self.chats.iter().filter_map(|c| c.category.as_ref()) {
                    if !category.is_empty() && !names.contains(category) {
                        names.push(category.clone());
                    }
                }
                names
            }
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category_names().iter().any(|c| c == name)
    }

    /// Category of a chat after resolving the foreign key. Dangling references
    /// resolve to `None` (uncategorized).
    pub fn effective_category<'a>(&self, chat: &'a ChatItem) -> Option<&'a str> {
        let category = chat.category.as_deref().filter(|c| !c.is_empty())?;
        match &self.categories {
            Some(list) if !list.iter().any(|c| c == category) => None,
            _ => Some(category),
        }
    }

    pub fn find(&self, id: &str) -> Option<&ChatItem> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ChatItem> {
        self.chats.iter_mut().find(|c| c.id == id)
    }

    pub fn favorite_count(&self) -> usize {
        self.chats.iter().filter(|c| c.favorite).count()
    }
}

/// A chat entry as submitted by the add form. The id is optional and is
/// generated when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChat {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial edit of a chat entry. For `icon` and `category`, an empty string
/// clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub favorite: Option<bool>,
}

/// Generate a fresh chat id (UUID v7, time-sortable).
pub fn new_chat_id() -> String {
    Uuid::now_v7().to_string()
}

/// Normalize an optional text field: trimmed, and empty becomes `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seed_chat(id: &str, name: &str, description: &str, path: &str, icon: &str) -> ChatItem {
    ChatItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        url: format!("https://example.com/chat/{path}"),
        icon: Some(icon.to_string()),
        category: None,
        favorite: false,
        last_visited: None,
    }
}

/// Seed directory written on first run.
pub fn default_config() -> ChatConfig {
    let mut general = seed_chat(
        "1",
        "General Assistant",
        "Answers everyday questions with broad knowledge support.",
        "general",
        "MessageSquare",
    );
    general.favorite = true;

    let mut code = seed_chat(
        "2",
        "Code Assistant",
        "Answers programming questions, helps debug code and explains concepts.",
        "code",
        "Code",
    );
    code.category = Some("Developer Tools".to_string());

    let mut creative = seed_chat(
        "3",
        "Creative Writing",
        "Suggests ideas and helps draft articles, stories and other content.",
        "creative",
        "Sparkles",
    );
    creative.category = Some("Content Creation".to_string());
    creative.favorite = true;

    let mut data = seed_chat(
        "4",
        "Data Analysis",
        "Helps analyze and understand data and suggests visualizations.",
        "data",
        "LayoutGrid",
    );
    data.category = Some("Data Tools".to_string());

    let mut learning = seed_chat(
        "5",
        "Study Buddy",
        "Supports learning across subjects and answers academic questions.",
        "learning",
        "BookOpen",
    );
    learning.category = Some("Education".to_string());

    let mut ai = seed_chat(
        "6",
        "AI Advisor",
        "Discusses artificial intelligence technology and its development.",
        "ai",
        "BrainCircuit",
    );
    ai.category = Some("Technology".to_string());

    ChatConfig {
        title: "AI Chat Hub".to_string(),
        theme: Theme::Light,
        chats: vec![general, code, creative, data, learning, ai],
        categories: Some(vec![
            "Developer Tools".to_string(),
            "Content Creation".to_string(),
            "Data Tools".to_string(),
            "Education".to_string(),
            "Technology".to_string(),
        ]),
    }
}
