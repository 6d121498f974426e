use serde::{Deserialize, Serialize};

/// A markdown link found in a menu item or recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
    /// Set when the link was attached automatically rather than written by hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_added: Option<bool>,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            auto_added: None,
        }
    }
}

/// One occurrence of an item on one week's menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub text: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub source_hint: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl MenuItem {
    pub fn has_links(&self) -> bool {
        !self.links.is_empty() || !self.urls.is_empty()
    }
}

/// A weekly menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub file: String,
    #[serde(default)]
    pub title: Option<String>,
    /// ISO `YYYY-MM-DD`; kept as text so malformed dates survive a round trip
    #[serde(default)]
    pub week_of_date: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A free-text recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub file: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Link>,
    #[serde(default)]
    pub text: String,
}

/// Deduplicated, cross-menu record of a menu item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub url: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub link_texts: Vec<String>,
    #[serde(default)]
    pub menu_files: Vec<String>,
    #[serde(default)]
    pub menu_weeks: Vec<String>,
    #[serde(default)]
    pub menu_seasons: Vec<String>,
    #[serde(default)]
    pub meal_types: Vec<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub source_hints: Vec<String>,
    #[serde(default)]
    pub item_texts: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_protein: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_dishes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CanonicalItem {
    /// First link text, else first item text.
    pub fn primary_title(&self) -> Option<&str> {
        self.link_texts
            .iter()
            .chain(self.item_texts.iter())
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
    }

    /// Title shown in lists and exports
    pub fn display_title(&self) -> &str {
        self.primary_title().unwrap_or("Untitled item")
    }

    /// Recompute `count` from the menu membership sets.
    ///
    /// Files win over weeks; with neither the previous count stands.
    pub fn recount(&mut self) {
        if !self.menu_files.is_empty() {
            self.count = self.menu_files.len();
        } else if !self.menu_weeks.is_empty() {
            self.count = self.menu_weeks.len();
        }
    }
}

/// Append `value` unless it is empty or already present.
///
/// Returns true when the list changed.
pub fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

/// On-disk shape of `menus.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenusFile {
    #[serde(default)]
    pub menus: Vec<Menu>,
}

/// On-disk shape of `recipes.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipesFile {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// On-disk shape of `menu_items_refactored.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsFile {
    #[serde(default)]
    pub items: Vec<CanonicalItem>,
}
