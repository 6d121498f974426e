//! Markdown checklists for a menu selection.
//!
//! Every function takes the date stamp explicitly so output is reproducible.

use crate::classifier::{dedupe_ingredients, group_by_category};
use crate::error::MenuError;
use crate::model::CanonicalItem;
use crate::season::long_date;
use chrono::NaiveDate;
use log::info;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const NO_INGREDIENTS: &str = "No ingredients listed";

/// How the ingredient checklist is organized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// One section per selected item, raw ingredient text
    MenuItem,
    /// Deduplicated across the selection, one section per category
    #[default]
    Category,
}

impl std::str::FromStr for Grouping {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "item" | "items" | "menu-item" | "menu_item" => Ok(Grouping::MenuItem),
            "category" | "categories" => Ok(Grouping::Category),
            other => Err(MenuError::InvalidSelection(format!(
                "Unknown grouping '{}', expected 'item' or 'category'",
                other
            ))),
        }
    }
}

fn checklist_line(out: &mut String, text: &str) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "- [ ] {}", text);
}

fn section(out: &mut String, heading: &str) {
    let _ = write!(out, "\n## {}\n\n", heading);
}

/// Checklist of the selected dishes
pub fn menu_markdown(selection: &[&CanonicalItem], date: NaiveDate) -> String {
    let mut out = format!("# Menu - {}\n", long_date(date));
    if selection.is_empty() {
        return out;
    }
    out.push('\n');
    for item in selection {
        let title = item.display_title();
        match &item.url {
            Some(url) => checklist_line(&mut out, &format!("[{}]({})", title, url)),
            None => checklist_line(&mut out, title),
        }
    }
    out
}

/// Shopping checklist for the selected dishes
pub fn ingredients_markdown(
    selection: &[&CanonicalItem],
    grouping: Grouping,
    date: NaiveDate,
) -> String {
    let mut out = format!("# Ingredients - {}\n", long_date(date));

    match grouping {
        Grouping::MenuItem => {
            for item in selection {
                section(&mut out, item.display_title());
                if item.ingredients.is_empty() {
                    let _ = writeln!(out, "{}", NO_INGREDIENTS);
                }
                for ingredient in &item.ingredients {
                    checklist_line(&mut out, ingredient);
                }
            }
        }
        Grouping::Category => {
            let unique = dedupe_ingredients(
                selection
                    .iter()
                    .flat_map(|item| item.ingredients.iter().map(String::as_str)),
            );
            for (category, ingredients) in group_by_category(&unique) {
                section(&mut out, category.label());
                for ingredient in &ingredients {
                    checklist_line(&mut out, ingredient);
                }
            }
        }
    }

    out
}

pub fn menu_file_name(date: NaiveDate) -> String {
    format!("menu-{}.md", date.format("%Y-%m-%d"))
}

pub fn ingredients_file_name(date: NaiveDate) -> String {
    format!("ingredients-{}.md", date.format("%Y-%m-%d"))
}

/// Write an export document into `dir`, returning the full path.
pub async fn write_export(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, MenuError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, content).await?;
    info!("Exported {}", path.display());
    Ok(path)
}
