use super::{is_url, normalize_title};
use crate::model::{Link, Recipe};

/// Index note kept alongside real recipes in the source vault
const HIDDEN_RECIPE_TITLE: &str = "blue apron recipes to copy";

/// Titled recipes sorted by title, minus the index note.
pub fn browsable_recipes(recipes: &[Recipe]) -> Vec<&Recipe> {
    let mut visible: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| match r.title.as_deref() {
            Some(title) => !title.is_empty() && title.to_lowercase() != HIDDEN_RECIPE_TITLE,
            None => false,
        })
        .collect();
    visible.sort_by(|a, b| {
        a.title
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .cmp(&b.title.as_deref().unwrap_or("").to_lowercase())
    });
    visible
}

fn is_external(url: &str) -> bool {
    !url.contains("attachments/") && is_url(url)
}

/// First external web URL, looking at bare URLs before links.
pub fn recipe_source_url(recipe: &Recipe) -> Option<&str> {
    recipe
        .urls
        .iter()
        .map(String::as_str)
        .find(|url| is_external(url))
        .or_else(|| {
            recipe
                .links
                .iter()
                .map(|link| link.url.as_str())
                .find(|url| is_external(url))
        })
}

/// Bundled image path for the recipe's first attachment, if it is one.
pub fn recipe_image_path(recipe: &Recipe) -> Option<String> {
    recipe.attachments.first().and_then(attachment_image_path)
}

fn attachment_image_path(attachment: &Link) -> Option<String> {
    let url = attachment.url.as_str();
    if url.starts_with("attachments/") || url.starts_with("../attachments/") {
        url.rsplit('/').next().map(|name| format!("images/{}", name))
    } else {
        None
    }
}

/// Normalized recipe titles used to spot recipes mentioned by menu items
pub struct RecipeIndex<'a> {
    entries: Vec<(String, &'a Recipe)>,
}

impl<'a> RecipeIndex<'a> {
    pub fn new(recipes: &'a [Recipe]) -> Self {
        let entries = recipes
            .iter()
            .filter_map(|recipe| {
                let title = recipe.title.as_deref()?;
                let normalized = normalize_title(title);
                if normalized.is_empty() {
                    None
                } else {
                    Some((normalized, recipe))
                }
            })
            .collect();
        Self { entries }
    }

    /// First recipe whose normalized title appears in the item text.
    pub fn find(&self, item_text: &str) -> Option<&'a Recipe> {
        let normalized = normalize_title(item_text);
        self.entries
            .iter()
            .find(|(title, _)| normalized.contains(title.as_str()))
            .map(|(_, recipe)| *recipe)
    }
}

pub fn find_recipe_match<'a>(recipes: &'a [Recipe], item_text: &str) -> Option<&'a Recipe> {
    RecipeIndex::new(recipes).find(item_text)
}
