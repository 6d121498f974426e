//! Read-only views over the loaded data: sorting, grouping, filtering and
//! display text.

pub mod items;
pub mod menus;
pub mod recipes;

pub use items::{sort_items, ItemFilter};
pub use menus::{group_by_section, menu_stats, sort_menus, MenuStats, UNSECTIONED_SECTION};
pub use recipes::{
    browsable_recipes, find_recipe_match, recipe_image_path, recipe_source_url, RecipeIndex,
};

use url::Url;

/// Host name without a leading "www.", or the input unchanged when it is not
/// a parseable URL.
pub fn site_name(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

pub fn is_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Lowercase, non-alphanumerics to spaces, whitespace collapsed.
pub fn normalize_title(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
