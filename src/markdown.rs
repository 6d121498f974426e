//! Reading menus and recipes out of markdown notes.

use crate::model::{Link, Menu, MenuItem, Recipe};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static WEEK_OF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Menu\s+week\s+of|Week\s+of)\s+(\d{1,2})-(\d{1,2})-(\d{2,4})")
        .expect("valid week regex")
});
static CHECKBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-\s*\[(?P<mark>[xX\s])\]\s*(?P<text>.+?)\s*$").expect("valid checkbox regex")
});
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#{1,6}\s*(?P<text>.+?)\s*$").expect("valid heading regex"));
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z\s'&]+?)(?:\s*\(\d+\))?\s*$").expect("valid section regex")
});
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s)]+").expect("valid url regex"));
static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static TRAILING_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)\s*$").expect("valid paren regex"));

const DEFAULT_MEAL_TYPE: &str = "Dinner";

/// Markdown links and bare URLs, in document order
pub fn extract_links(text: &str) -> (Vec<Link>, Vec<String>) {
    let links = MD_LINK_RE
        .captures_iter(text)
        .map(|c| Link::new(&c[1], &c[2]))
        .collect();
    let urls = URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    (links, urls)
}

/// Trailing parenthetical such as "(NYT Cooking)". Parentheticals with digits
/// are usually quantities or dates and are ignored, as is the URL half of a
/// trailing markdown link.
pub fn extract_source_hint(text: &str) -> Option<String> {
    let captures = TRAILING_PAREN_RE.captures(text)?;
    let start = captures.get(0)?.start();
    if text[..start].ends_with(']') {
        return None;
    }
    let hint = captures[1].trim();
    if hint.is_empty() || hint.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(hint.to_string())
}

/// Week date from names like "Menu week of 6-1-21.md" or "Week of 12-31-2020".
///
/// Two-digit years are taken as 2000s; impossible dates yield `None`.
pub fn parse_week_from_name(name: &str) -> Option<NaiveDate> {
    let captures = WEEK_OF_RE.captures(name)?;
    let month: u32 = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;
    let mut year: i32 = captures[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn meal_type_for(section: &str) -> Option<&'static str> {
    match section.trim().to_lowercase().as_str() {
        "breakfast" | "breakfasts" => Some("Breakfast"),
        "lunch" | "lunches" => Some("Lunch"),
        "dinner" | "dinners" => Some("Dinner"),
        "snack" | "snacks" => Some("Snack"),
        "drinks" => Some("Drink"),
        "dessert" | "desserts" => Some("Dessert"),
        _ => None,
    }
}

/// Parse one weekly menu note. `file` is stored as the menu's identity.
pub fn parse_menu(file: &str, text: &str) -> Menu {
    let name = file.rsplit('/').next().unwrap_or(file);
    let week_of_date = parse_week_from_name(name).map(|d| d.format("%Y-%m-%d").to_string());

    let mut title = None;
    let mut current_section: Option<String> = None;
    let mut items = Vec::new();

    for line in text.lines() {
        if title.is_none() {
            if let Some(heading) = HEADING_RE.captures(line) {
                title = Some(heading["text"].trim().to_string());
            }
        }

        if let Some(checkbox) = CHECKBOX_RE.captures(line) {
            let item_text = checkbox["text"].trim().to_string();
            let (links, urls) = extract_links(&item_text);
            let meal_type = current_section
                .as_deref()
                .and_then(meal_type_for)
                .unwrap_or(DEFAULT_MEAL_TYPE);
            items.push(MenuItem {
                source_hint: extract_source_hint(&item_text),
                section: current_section.clone(),
                meal_type: meal_type.to_string(),
                text: item_text,
                links,
                urls,
            });
            continue;
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('-') {
            if let Some(section) = SECTION_RE.captures(trimmed) {
                let label = section[1].trim();
                if meal_type_for(label).is_some() {
                    current_section = Some(label.to_string());
                }
            }
        }
    }

    Menu {
        file: file.to_string(),
        title,
        week_of_date,
        items,
    }
}

/// Parse one recipe note
pub fn parse_recipe(file: &str, text: &str) -> Recipe {
    let title = text
        .lines()
        .find_map(|line| HEADING_RE.captures(line))
        .map(|c| c["text"].trim().to_string());

    let (links, urls) = extract_links(text);
    let attachments = links
        .iter()
        .filter(|link| {
            link.url.starts_with("attachments/") || link.url.starts_with("../attachments/")
        })
        .cloned()
        .collect();

    Recipe {
        file: file.to_string(),
        title,
        links,
        urls,
        attachments,
        text: text.to_string(),
    }
}
